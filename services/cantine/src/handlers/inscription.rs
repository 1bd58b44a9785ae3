use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cantine_auth_types::identity::Identity;
use cantine_domain::action::ActionKind;
use cantine_domain::pagination::PageRequest;

use crate::domain::types::{InscriptionFiltre, InscriptionMensuelle};
use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::inscription::{
    CreateInscriptionInput, CreateInscriptionUseCase, DeleteInscriptionUseCase,
    GetInscriptionUseCase, ListInscriptionsUseCase, UpdateInscriptionInput,
    UpdateInscriptionUseCase,
};
use crate::usecase::journal;

#[derive(Serialize)]
pub struct InscriptionResponse {
    pub id: Uuid,
    pub eleve_id: Uuid,
    pub annee: i32,
    pub mois: u8,
    pub inscrit: bool,
    pub notes: String,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: Option<Uuid>,
}

impl From<InscriptionMensuelle> for InscriptionResponse {
    fn from(i: InscriptionMensuelle) -> Self {
        Self {
            id: i.id,
            eleve_id: i.eleve_id,
            annee: i.annee,
            mois: i.mois,
            inscrit: i.inscrit,
            notes: i.notes,
            created_at: i.created_at,
            created_by: i.created_by,
        }
    }
}

// ── GET /inscriptions ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct InscriptionListQuery {
    pub annee: Option<i32>,
    pub mois: Option<u8>,
    pub eleve_id: Option<Uuid>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_inscriptions(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<InscriptionListQuery>,
) -> Result<Json<Vec<InscriptionResponse>>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = ListInscriptionsUseCase {
        inscriptions: state.inscription_repo(),
    };
    let inscriptions = usecase
        .execute(
            InscriptionFiltre {
                annee: query.annee,
                mois: query.mois,
                eleve_id: query.eleve_id,
            },
            PageRequest {
                per_page: query.per_page.unwrap_or(50),
                page: query.page.unwrap_or(1),
            },
        )
        .await?;
    Ok(Json(
        inscriptions
            .into_iter()
            .map(InscriptionResponse::from)
            .collect(),
    ))
}

// ── GET /inscriptions/{id} ───────────────────────────────────────────────────

pub async fn get_inscription(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InscriptionResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = GetInscriptionUseCase {
        inscriptions: state.inscription_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /inscriptions ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateInscriptionRequest {
    pub eleve_id: Uuid,
    pub annee: i32,
    pub mois: u8,
    #[serde(default = "default_inscrit")]
    pub inscrit: bool,
    #[serde(default)]
    pub notes: String,
}

fn default_inscrit() -> bool {
    true
}

pub async fn create_inscription(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateInscriptionRequest>,
) -> Result<(StatusCode, Json<InscriptionResponse>), CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = CreateInscriptionUseCase {
        inscriptions: state.inscription_repo(),
        eleves: state.eleve_repo(),
    };
    let inscription = usecase
        .execute(
            identity.user_id,
            CreateInscriptionInput {
                eleve_id: body.eleve_id,
                annee: body.annee,
                mois: body.mois,
                inscrit: body.inscrit,
                notes: body.notes,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Create,
        "InscriptionMensuelle",
        Some(inscription.id),
        format!(
            "Création inscription {}/{}",
            inscription.mois, inscription.annee
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(inscription.into())))
}

// ── PUT /inscriptions/{id} ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateInscriptionRequest {
    pub inscrit: Option<bool>,
    pub notes: Option<String>,
}

pub async fn update_inscription(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateInscriptionRequest>,
) -> Result<Json<InscriptionResponse>, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = UpdateInscriptionUseCase {
        inscriptions: state.inscription_repo(),
    };
    let inscription = usecase
        .execute(
            id,
            UpdateInscriptionInput {
                inscrit: body.inscrit,
                notes: body.notes,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Update,
        "InscriptionMensuelle",
        Some(inscription.id),
        "Modification inscription mensuelle".to_owned(),
    )
    .await;

    Ok(Json(inscription.into()))
}

// ── DELETE /inscriptions/{id} ────────────────────────────────────────────────

pub async fn delete_inscription(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = DeleteInscriptionUseCase {
        inscriptions: state.inscription_repo(),
    };
    usecase.execute(id).await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Delete,
        "InscriptionMensuelle",
        Some(id),
        "Suppression inscription mensuelle".to_owned(),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
