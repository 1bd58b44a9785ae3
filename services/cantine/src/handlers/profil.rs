use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;

use cantine_auth_types::identity::Identity;

use crate::error::CantineError;
use crate::handlers::menu::MenuResponse;
use crate::handlers::prestataire::ProfilResponse;
use crate::state::AppState;
use crate::usecase::dashboard::DashboardUseCase;

// ── GET /profil/mon_profil ───────────────────────────────────────────────────

pub async fn mon_profil(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfilResponse>, CantineError> {
    let acteur = super::acteur(&state, &identity).await?;
    Ok(Json(acteur.profil().clone().into()))
}

// ── GET /profil/dashboard ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardResponse {
    pub total_eleves_actifs: u64,
    pub repas_aujourd_hui: u64,
    pub repas_ce_mois: u64,
    pub eleves_inscrits_mois: u64,
    pub factures_en_attente: u64,
    pub menu_du_jour: Option<MenuResponse>,
}

pub async fn dashboard(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = DashboardUseCase {
        eleves: state.eleve_repo(),
        repas: state.repas_repo(),
        inscriptions: state.inscription_repo(),
        factures: state.facture_repo(),
        menus: state.menu_repo(),
    };
    let dashboard = usecase
        .execute(identity.user_id, Utc::now().date_naive())
        .await?;
    Ok(Json(DashboardResponse {
        total_eleves_actifs: dashboard.total_eleves_actifs,
        repas_aujourd_hui: dashboard.repas_aujourd_hui,
        repas_ce_mois: dashboard.repas_ce_mois,
        eleves_inscrits_mois: dashboard.eleves_inscrits_mois,
        factures_en_attente: dashboard.factures_en_attente,
        menu_du_jour: dashboard.menu_du_jour.map(Into::into),
    }))
}
