use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;

use cantine_auth_types::identity::Identity;
use cantine_domain::action::ActionKind;

use crate::domain::dump::CantineDump;
use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::journal;
use crate::usecase::sauvegarde::{ExportDumpUseCase, RestoreDumpUseCase};

// ── GET /sauvegarde/export ───────────────────────────────────────────────────

pub async fn export_sauvegarde(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = ExportDumpUseCase {
        sauvegardes: state.sauvegarde_repo(),
    };
    let dump = usecase.execute().await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Export,
        "Database",
        None,
        format!("Export de sauvegarde version {}", dump.version),
    )
    .await;

    let filename = format!("sauvegarde_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{filename}\"").parse().unwrap(),
    );
    Ok((headers, Json(dump)))
}

// ── POST /sauvegarde/restaurer ───────────────────────────────────────────────

pub async fn restaurer_sauvegarde(
    identity: Identity,
    State(state): State<AppState>,
    Json(dump): Json<CantineDump>,
) -> Result<StatusCode, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = RestoreDumpUseCase {
        sauvegardes: state.sauvegarde_repo(),
    };
    usecase.execute(&dump).await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Import,
        "Database",
        None,
        "Restauration d'une sauvegarde".to_owned(),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
