use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cantine_auth_types::identity::Identity;
use cantine_domain::action::ActionKind;
use cantine_domain::pagination::PageRequest;

use crate::domain::types::ActionEntry;
use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::journal::ListJournalUseCase;

#[derive(Serialize)]
pub struct ActionEntryResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: ActionKind,
    pub model_name: String,
    pub object_id: Option<Uuid>,
    pub description: String,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ActionEntry> for ActionEntryResponse {
    fn from(e: ActionEntry) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            action: e.action,
            model_name: e.model_name,
            object_id: e.object_id,
            description: e.description,
            created_at: e.created_at,
        }
    }
}

// ── GET /journal ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct JournalQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_journal(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<JournalQuery>,
) -> Result<Json<Vec<ActionEntryResponse>>, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = ListJournalUseCase {
        journal: state.action_log_repo(),
    };
    let entries = usecase
        .execute(PageRequest {
            per_page: query.per_page.unwrap_or(50),
            page: query.page.unwrap_or(1),
        })
        .await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
