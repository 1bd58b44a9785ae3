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

use crate::domain::types::Classe;
use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::classe::{
    CreateClasseInput, CreateClasseUseCase, DeleteClasseUseCase, GetClasseUseCase,
    ListClassesUseCase, UpdateClasseInput, UpdateClasseUseCase,
};
use crate::usecase::journal;

#[derive(Serialize)]
pub struct ClasseResponse {
    pub id: Uuid,
    pub nom: String,
    pub niveau: String,
}

impl From<Classe> for ClasseResponse {
    fn from(c: Classe) -> Self {
        Self {
            id: c.id,
            nom: c.nom,
            niveau: c.niveau,
        }
    }
}

// ── GET /classes ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ClasseListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_classes(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ClasseListQuery>,
) -> Result<Json<Vec<ClasseResponse>>, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = ListClassesUseCase {
        classes: state.classe_repo(),
    };
    let classes = usecase
        .execute(PageRequest {
            per_page: query.per_page.unwrap_or(50),
            page: query.page.unwrap_or(1),
        })
        .await?;
    Ok(Json(classes.into_iter().map(ClasseResponse::from).collect()))
}

// ── GET /classes/{id} ────────────────────────────────────────────────────────

pub async fn get_classe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClasseResponse>, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = GetClasseUseCase {
        classes: state.classe_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /classes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateClasseRequest {
    pub nom: String,
    #[serde(default)]
    pub niveau: String,
}

pub async fn create_classe(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateClasseRequest>,
) -> Result<(StatusCode, Json<ClasseResponse>), CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = CreateClasseUseCase {
        classes: state.classe_repo(),
    };
    let classe = usecase
        .execute(CreateClasseInput {
            nom: body.nom,
            niveau: body.niveau,
        })
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Create,
        "Classe",
        Some(classe.id),
        format!("Création de la classe {}", classe.nom),
    )
    .await;

    Ok((StatusCode::CREATED, Json(classe.into())))
}

// ── PUT /classes/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateClasseRequest {
    pub nom: Option<String>,
    pub niveau: Option<String>,
}

pub async fn update_classe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateClasseRequest>,
) -> Result<Json<ClasseResponse>, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = UpdateClasseUseCase {
        classes: state.classe_repo(),
    };
    let classe = usecase
        .execute(
            id,
            UpdateClasseInput {
                nom: body.nom,
                niveau: body.niveau,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Update,
        "Classe",
        Some(classe.id),
        format!("Modification de la classe {}", classe.nom),
    )
    .await;

    Ok(Json(classe.into()))
}

// ── DELETE /classes/{id} ─────────────────────────────────────────────────────

pub async fn delete_classe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = DeleteClasseUseCase {
        classes: state.classe_repo(),
    };
    usecase.execute(id).await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Delete,
        "Classe",
        Some(id),
        "Suppression de la classe".to_owned(),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
