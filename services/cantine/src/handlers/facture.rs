use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cantine_auth_types::identity::Identity;
use cantine_domain::action::ActionKind;
use cantine_domain::facture::FactureStatut;
use cantine_domain::pagination::PageRequest;

use crate::domain::types::{Facture, FactureFiltre};
use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::facture::{
    CreateFactureInput, CreateFactureUseCase, DeleteFactureUseCase, GetFactureUseCase,
    ListFacturesUseCase, UpdateFactureInput, UpdateFactureUseCase,
};
use crate::usecase::journal;

#[derive(Serialize)]
pub struct FactureResponse {
    pub id: Uuid,
    pub numero: String,
    pub annee: i32,
    pub mois: u8,
    pub nombre_jours_travail: i32,
    pub nombre_repas_servis: i32,
    pub prix_unitaire_repas: Decimal,
    pub montant_total: Decimal,
    pub statut: FactureStatut,
    pub date_emission: NaiveDate,
    pub date_paiement: Option<NaiveDate>,
    pub notes: String,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: Option<Uuid>,
}

impl From<Facture> for FactureResponse {
    fn from(f: Facture) -> Self {
        Self {
            id: f.id,
            numero: f.numero,
            annee: f.annee,
            mois: f.mois,
            nombre_jours_travail: f.nombre_jours_travail,
            nombre_repas_servis: f.nombre_repas_servis,
            prix_unitaire_repas: f.prix_unitaire_repas,
            montant_total: f.montant_total,
            statut: f.statut,
            date_emission: f.date_emission,
            date_paiement: f.date_paiement,
            notes: f.notes,
            created_at: f.created_at,
            created_by: f.created_by,
        }
    }
}

// ── GET /factures ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct FactureListQuery {
    pub annee: Option<i32>,
    pub mois: Option<u8>,
    pub statut: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_factures(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<FactureListQuery>,
) -> Result<Json<Vec<FactureResponse>>, CantineError> {
    super::acteur(&state, &identity).await?;
    let statut = query
        .statut
        .as_deref()
        .map(|s| FactureStatut::from_str_opt(s).ok_or(CantineError::StatutInvalide))
        .transpose()?;
    let usecase = ListFacturesUseCase {
        factures: state.facture_repo(),
    };
    let factures = usecase
        .execute(
            FactureFiltre {
                annee: query.annee,
                mois: query.mois,
                statut,
                recherche: None,
            },
            PageRequest {
                per_page: query.per_page.unwrap_or(20),
                page: query.page.unwrap_or(1),
            },
        )
        .await?;
    Ok(Json(factures.into_iter().map(FactureResponse::from).collect()))
}

// ── GET /factures/{id} ───────────────────────────────────────────────────────

pub async fn get_facture(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FactureResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = GetFactureUseCase {
        factures: state.facture_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /factures ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateFactureRequest {
    pub numero: Option<String>,
    pub annee: i32,
    pub mois: u8,
    #[serde(default)]
    pub nombre_jours_travail: i32,
    #[serde(default)]
    pub nombre_repas_servis: i32,
    pub prix_unitaire_repas: Decimal,
    pub montant_total: Option<Decimal>,
    pub statut: Option<FactureStatut>,
    pub date_emission: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

pub async fn create_facture(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateFactureRequest>,
) -> Result<(StatusCode, Json<FactureResponse>), CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = CreateFactureUseCase {
        factures: state.facture_repo(),
    };
    let facture = usecase
        .execute(
            identity.user_id,
            CreateFactureInput {
                numero: body.numero,
                annee: body.annee,
                mois: body.mois,
                nombre_jours_travail: body.nombre_jours_travail,
                nombre_repas_servis: body.nombre_repas_servis,
                prix_unitaire_repas: body.prix_unitaire_repas,
                montant_total: body.montant_total,
                statut: body.statut,
                date_emission: body.date_emission,
                notes: body.notes,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Create,
        "Facture",
        Some(facture.id),
        format!("Création facture {}", facture.numero),
    )
    .await;

    Ok((StatusCode::CREATED, Json(facture.into())))
}

// ── PUT /factures/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateFactureRequest {
    pub nombre_jours_travail: Option<i32>,
    pub nombre_repas_servis: Option<i32>,
    pub prix_unitaire_repas: Option<Decimal>,
    pub montant_total: Option<Decimal>,
    pub statut: Option<FactureStatut>,
    pub date_emission: Option<NaiveDate>,
    /// Present-and-null clears the payment date; absent leaves it untouched.
    #[serde(default, deserialize_with = "cantine_core::serde::double_option")]
    pub date_paiement: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}

pub async fn update_facture(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateFactureRequest>,
) -> Result<Json<FactureResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = UpdateFactureUseCase {
        factures: state.facture_repo(),
    };
    let facture = usecase
        .execute(
            id,
            UpdateFactureInput {
                nombre_jours_travail: body.nombre_jours_travail,
                nombre_repas_servis: body.nombre_repas_servis,
                prix_unitaire_repas: body.prix_unitaire_repas,
                montant_total: body.montant_total,
                statut: body.statut,
                date_emission: body.date_emission,
                date_paiement: body.date_paiement,
                notes: body.notes,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Update,
        "Facture",
        Some(facture.id),
        format!("Modification facture {}", facture.numero),
    )
    .await;

    Ok(Json(facture.into()))
}

// ── DELETE /factures/{id} ────────────────────────────────────────────────────

pub async fn delete_facture(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = DeleteFactureUseCase {
        factures: state.facture_repo(),
    };
    usecase.execute(id).await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Delete,
        "Facture",
        Some(id),
        "Suppression de la facture".to_owned(),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
