use axum::{
    extract::{Query, State},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use cantine_auth_types::identity::Identity;
use cantine_domain::action::ActionKind;
use cantine_domain::calendrier::PeriodeRapport;

use crate::error::CantineError;
use crate::render::{CONTENT_TYPE_PDF, CONTENT_TYPE_XLSX, render_pdf, render_xlsx};
use crate::state::AppState;
use crate::usecase::journal;
use crate::usecase::rapport::{BuildRapportUseCase, FormatExport, RapportParams};

// ── GET /rapports ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RapportQuery {
    /// JOURNALIER | HEBDOMADAIRE | MENSUEL
    #[serde(rename = "type")]
    pub type_rapport: String,
    /// PDF | XLSX
    pub format: String,
    pub date: Option<NaiveDate>,
    pub annee: Option<i32>,
    pub mois: Option<u8>,
}

pub async fn generer_rapport(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<RapportQuery>,
) -> Result<impl IntoResponse, CantineError> {
    super::acteur(&state, &identity).await?;

    let periode = PeriodeRapport::from_str_opt(&query.type_rapport)
        .ok_or(CantineError::PeriodeInvalide)?;
    let format =
        FormatExport::from_str_opt(&query.format).ok_or(CantineError::FormatInvalide)?;

    let usecase = BuildRapportUseCase {
        repas: state.repas_repo(),
    };
    let rapport = usecase
        .execute(
            RapportParams {
                periode,
                date_reference: query.date,
                annee: query.annee,
                mois: query.mois,
            },
            Utc::now().date_naive(),
        )
        .await?;

    let (bytes, content_type, extension) = match format {
        FormatExport::Pdf => (render_pdf(&rapport)?, CONTENT_TYPE_PDF, "pdf"),
        FormatExport::Xlsx => (render_xlsx(&rapport)?, CONTENT_TYPE_XLSX, "xlsx"),
    };

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Export,
        "Rapport",
        None,
        format!("Génération du rapport {}", rapport.titre),
    )
    .await;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type.parse().unwrap());
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!(
            "attachment; filename=\"{}.{extension}\"",
            rapport.nom_fichier
        )
        .parse()
        .unwrap(),
    );
    Ok((headers, bytes))
}
