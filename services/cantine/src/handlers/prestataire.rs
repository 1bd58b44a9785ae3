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
use cantine_domain::role::Role;

use crate::domain::types::{Profil, ProfilFiltre};
use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::acteur::{
    CreatePrestataireInput, CreatePrestataireUseCase, DeletePrestataireUseCase,
    ListPrestatairesUseCase, UpdatePrestataireInput, UpdatePrestataireUseCase,
};
use crate::usecase::journal;

#[derive(Serialize)]
pub struct ProfilResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub telephone: String,
    pub entreprise: String,
    pub actif: bool,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Profil> for ProfilResponse {
    fn from(p: Profil) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            role: p.role,
            telephone: p.telephone,
            entreprise: p.entreprise,
            actif: p.actif,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ── GET /prestataires ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct PrestataireListQuery {
    pub role: Option<String>,
    pub actif: Option<bool>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_prestataires(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<PrestataireListQuery>,
) -> Result<Json<Vec<ProfilResponse>>, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let role = query
        .role
        .as_deref()
        .map(|r| Role::from_str_opt(r).ok_or(CantineError::RoleInvalide))
        .transpose()?;
    let usecase = ListPrestatairesUseCase {
        profils: state.profil_repo(),
    };
    let profils = usecase
        .execute(
            ProfilFiltre {
                role,
                actif: query.actif,
            },
            PageRequest {
                per_page: query.per_page.unwrap_or(20),
                page: query.page.unwrap_or(1),
            },
        )
        .await?;
    Ok(Json(profils.into_iter().map(ProfilResponse::from).collect()))
}

// ── POST /prestataires ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePrestataireRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub entreprise: String,
    pub role: Option<Role>,
}

pub async fn create_prestataire(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreatePrestataireRequest>,
) -> Result<(StatusCode, Json<ProfilResponse>), CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = CreatePrestataireUseCase {
        profils: state.profil_repo(),
    };
    let username = body.username.clone();
    let profil = usecase
        .execute(CreatePrestataireInput {
            username: body.username,
            password: body.password,
            full_name: body.full_name,
            email: body.email,
            telephone: body.telephone,
            entreprise: body.entreprise,
            role: body.role,
        })
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Create,
        "ProfilPrestataire",
        Some(profil.id),
        format!("Création du compte prestataire {username}"),
    )
    .await;

    Ok((StatusCode::CREATED, Json(profil.into())))
}

// ── PUT /prestataires/{id} ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePrestataireRequest {
    pub role: Option<Role>,
    pub telephone: Option<String>,
    pub entreprise: Option<String>,
    pub actif: Option<bool>,
}

pub async fn update_prestataire(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePrestataireRequest>,
) -> Result<Json<ProfilResponse>, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = UpdatePrestataireUseCase {
        profils: state.profil_repo(),
    };
    let profil = usecase
        .execute(
            id,
            UpdatePrestataireInput {
                role: body.role,
                telephone: body.telephone,
                entreprise: body.entreprise,
                actif: body.actif,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Update,
        "ProfilPrestataire",
        Some(profil.id),
        "Modification du compte prestataire".to_owned(),
    )
    .await;

    Ok(Json(profil.into()))
}

// ── DELETE /prestataires/{id} ────────────────────────────────────────────────

pub async fn delete_prestataire(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = DeletePrestataireUseCase {
        profils: state.profil_repo(),
    };
    usecase.execute(id).await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Delete,
        "ProfilPrestataire",
        Some(id),
        "Suppression du compte prestataire".to_owned(),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
