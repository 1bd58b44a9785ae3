use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use cantine_auth_types::identity::Identity;

use crate::error::CantineError;
use crate::handlers::eleve::EleveResponse;
use crate::handlers::facture::FactureResponse;
use crate::handlers::menu::MenuResponse;
use crate::state::AppState;
use crate::usecase::recherche::RechercheGlobaleUseCase;

// ── GET /recherche ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RechercheQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct RechercheResponse {
    pub query: String,
    pub eleves: Vec<EleveResponse>,
    pub menus: Vec<MenuResponse>,
    pub factures: Vec<FactureResponse>,
}

pub async fn recherche_globale(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<RechercheQuery>,
) -> Result<Json<RechercheResponse>, CantineError> {
    let acteur = super::acteur(&state, &identity).await?;
    let usecase = RechercheGlobaleUseCase {
        eleves: state.eleve_repo(),
        menus: state.menu_repo(),
        factures: state.facture_repo(),
    };
    let resultats = usecase.execute(&acteur, &query.q).await?;
    Ok(Json(RechercheResponse {
        query: query.q,
        eleves: resultats.eleves.into_iter().map(Into::into).collect(),
        menus: resultats.menus.into_iter().map(Into::into).collect(),
        factures: resultats.factures.into_iter().map(Into::into).collect(),
    }))
}
