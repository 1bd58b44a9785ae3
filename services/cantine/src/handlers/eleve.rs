use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cantine_auth_types::identity::Identity;
use cantine_domain::action::ActionKind;
use cantine_domain::pagination::PageRequest;

use crate::domain::types::{Eleve, EleveFiltre};
use crate::error::CantineError;
use crate::render::{CONTENT_TYPE_XLSX, render_xlsx_table};
use crate::state::AppState;
use crate::usecase::eleve::{
    CreateEleveInput, CreateEleveUseCase, DeleteEleveUseCase, EXPORT_ENTETES,
    ExportElevesUseCase, GetEleveUseCase, InscritsDuMoisUseCase, ListElevesUseCase,
    UpdateEleveInput, UpdateEleveUseCase,
};
use crate::usecase::journal;

// ── Response type ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EleveResponse {
    pub id: Uuid,
    pub prenom: String,
    pub nom: String,
    pub classe_id: Option<Uuid>,
    pub actif: bool,
    pub telephone_parent: String,
    pub email_parent: String,
    pub photo: Option<String>,
    pub notes: String,
    pub date_inscription: chrono::NaiveDate,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Eleve> for EleveResponse {
    fn from(e: Eleve) -> Self {
        Self {
            id: e.id,
            prenom: e.prenom,
            nom: e.nom,
            classe_id: e.classe_id,
            actif: e.actif,
            telephone_parent: e.telephone_parent,
            email_parent: e.email_parent,
            photo: e.photo,
            notes: e.notes,
            date_inscription: e.date_inscription,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

// ── GET /eleves ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct EleveListQuery {
    pub classe_id: Option<Uuid>,
    pub search: Option<String>,
    pub actif: Option<bool>,
    pub mois_inscrit: Option<u8>,
    pub annee: Option<i32>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_eleves(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<EleveListQuery>,
) -> Result<Json<Vec<EleveResponse>>, CantineError> {
    super::acteur(&state, &identity).await?;
    let inscrit_mois = match (query.annee, query.mois_inscrit) {
        (Some(annee), Some(mois)) => Some((annee, mois)),
        _ => None,
    };
    let usecase = ListElevesUseCase {
        eleves: state.eleve_repo(),
    };
    let eleves = usecase
        .execute(
            EleveFiltre {
                classe_id: query.classe_id,
                recherche: query.search,
                actif: query.actif,
                inscrit_mois,
            },
            PageRequest {
                per_page: query.per_page.unwrap_or(25),
                page: query.page.unwrap_or(1),
            },
        )
        .await?;
    Ok(Json(eleves.into_iter().map(EleveResponse::from).collect()))
}

// ── GET /eleves/inscrits_ce_mois ─────────────────────────────────────────────

pub async fn inscrits_ce_mois(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<EleveResponse>>, CantineError> {
    super::acteur(&state, &identity).await?;
    let aujourd_hui = Utc::now().date_naive();
    let usecase = InscritsDuMoisUseCase {
        eleves: state.eleve_repo(),
    };
    let eleves = usecase
        .execute(aujourd_hui.year(), aujourd_hui.month() as u8)
        .await?;
    Ok(Json(eleves.into_iter().map(EleveResponse::from).collect()))
}

// ── GET /eleves/export ───────────────────────────────────────────────────────

pub async fn export_eleves(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = ExportElevesUseCase {
        eleves: state.eleve_repo(),
        classes: state.classe_repo(),
    };
    let rows = usecase.execute().await?;
    let nombre = rows.len();
    let bytes = render_xlsx_table("Export des élèves", &EXPORT_ENTETES, &rows)?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Export,
        "Eleve",
        None,
        format!("Export de {nombre} élèves"),
    )
    .await;

    let filename = format!(
        "eleves_export_{}.xlsx",
        Utc::now().format("%Y%m%d_%H%M%S")
    );
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, CONTENT_TYPE_XLSX.parse().unwrap());
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{filename}\"").parse().unwrap(),
    );
    Ok((headers, bytes))
}

// ── GET /eleves/{id} ─────────────────────────────────────────────────────────

pub async fn get_eleve(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EleveResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = GetEleveUseCase {
        eleves: state.eleve_repo(),
    };
    let eleve = usecase.execute(id).await?;
    Ok(Json(eleve.into()))
}

// ── POST /eleves ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateEleveRequest {
    pub prenom: String,
    pub nom: String,
    pub classe_id: Option<Uuid>,
    #[serde(default)]
    pub telephone_parent: String,
    #[serde(default)]
    pub email_parent: String,
    #[serde(default)]
    pub notes: String,
}

pub async fn create_eleve(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateEleveRequest>,
) -> Result<(StatusCode, Json<EleveResponse>), CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = CreateEleveUseCase {
        eleves: state.eleve_repo(),
    };
    let eleve = usecase
        .execute(CreateEleveInput {
            prenom: body.prenom,
            nom: body.nom,
            classe_id: body.classe_id,
            telephone_parent: body.telephone_parent,
            email_parent: body.email_parent,
            notes: body.notes,
        })
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Create,
        "Eleve",
        Some(eleve.id),
        format!("Création élève {} {}", eleve.prenom, eleve.nom),
    )
    .await;

    Ok((StatusCode::CREATED, Json(eleve.into())))
}

// ── PUT /eleves/{id} ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateEleveRequest {
    pub prenom: Option<String>,
    pub nom: Option<String>,
    /// Present-and-null detaches the student from its class; absent leaves
    /// it untouched.
    #[serde(default, deserialize_with = "cantine_core::serde::double_option")]
    pub classe_id: Option<Option<Uuid>>,
    pub actif: Option<bool>,
    pub telephone_parent: Option<String>,
    pub email_parent: Option<String>,
    pub notes: Option<String>,
}

pub async fn update_eleve(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEleveRequest>,
) -> Result<Json<EleveResponse>, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = UpdateEleveUseCase {
        eleves: state.eleve_repo(),
    };
    let eleve = usecase
        .execute(
            id,
            UpdateEleveInput {
                prenom: body.prenom,
                nom: body.nom,
                classe_id: body.classe_id,
                actif: body.actif,
                telephone_parent: body.telephone_parent,
                email_parent: body.email_parent,
                notes: body.notes,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Update,
        "Eleve",
        Some(eleve.id),
        format!("Modification élève {} {}", eleve.prenom, eleve.nom),
    )
    .await;

    Ok(Json(eleve.into()))
}

// ── DELETE /eleves/{id} ──────────────────────────────────────────────────────

pub async fn delete_eleve(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CantineError> {
    super::acteur_admin(&state, &identity).await?;
    let usecase = DeleteEleveUseCase {
        eleves: state.eleve_repo(),
    };
    usecase.execute(id).await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Delete,
        "Eleve",
        Some(id),
        "Suppression élève".to_owned(),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
