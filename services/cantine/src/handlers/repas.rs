use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cantine_auth_types::identity::Identity;
use cantine_domain::action::ActionKind;
use cantine_domain::pagination::PageRequest;

use crate::domain::types::{Repas, RepasFiltre};
use crate::error::CantineError;
use crate::handlers::menu::MenuResponse;
use crate::state::AppState;
use crate::usecase::journal;
use crate::usecase::repas::{
    CreateRepasInput, CreateRepasUseCase, DecompteJournalierUseCase, DecompteMensuelUseCase,
    DeleteRepasUseCase, ElevesAMarquerUseCase, GetRepasUseCase, ListRepasUseCase,
    MarquageIgnore, MarquerRepasMultiplesInput, MarquerRepasMultiplesUseCase,
    StatistiquesRepasUseCase, UpdateRepasInput, UpdateRepasUseCase,
};

#[derive(Serialize)]
pub struct RepasResponse {
    pub id: Uuid,
    pub eleve_id: Uuid,
    pub menu_id: Option<Uuid>,
    pub date: NaiveDate,
    pub note: String,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: Option<Uuid>,
}

impl From<Repas> for RepasResponse {
    fn from(r: Repas) -> Self {
        Self {
            id: r.id,
            eleve_id: r.eleve_id,
            menu_id: r.menu_id,
            date: r.date,
            note: r.note,
            created_at: r.created_at,
            created_by: r.created_by,
        }
    }
}

// ── GET /repas ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RepasListQuery {
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub eleve_id: Option<Uuid>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_repas(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<RepasListQuery>,
) -> Result<Json<Vec<RepasResponse>>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = ListRepasUseCase {
        repas: state.repas_repo(),
    };
    let repas = usecase
        .execute(
            RepasFiltre {
                date: query.date,
                date_from: query.date_from,
                date_to: query.date_to,
                eleve_id: query.eleve_id,
            },
            PageRequest {
                per_page: query.per_page.unwrap_or(50),
                page: query.page.unwrap_or(1),
            },
        )
        .await?;
    Ok(Json(repas.into_iter().map(RepasResponse::from).collect()))
}

// ── GET /repas/aujourdhui ────────────────────────────────────────────────────

pub async fn repas_aujourdhui(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<RepasResponse>>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = ListRepasUseCase {
        repas: state.repas_repo(),
    };
    let repas = usecase
        .execute(
            RepasFiltre {
                date: Some(Utc::now().date_naive()),
                ..Default::default()
            },
            PageRequest {
                per_page: 100,
                page: 1,
            },
        )
        .await?;
    Ok(Json(repas.into_iter().map(RepasResponse::from).collect()))
}

// ── GET /repas/a_marquer ─────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct AMarquerQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct MarquageContexteResponse {
    pub date: NaiveDate,
    pub eleves: Vec<super::eleve::EleveResponse>,
    pub menu: Option<MenuResponse>,
    pub deja_marques: Vec<Uuid>,
}

/// Students eligible for marking on a date, with the enrollment fallback.
pub async fn eleves_a_marquer(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<AMarquerQuery>,
) -> Result<Json<MarquageContexteResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let usecase = ElevesAMarquerUseCase {
        eleves: state.eleve_repo(),
        repas: state.repas_repo(),
        menus: state.menu_repo(),
    };
    let contexte = usecase.execute(date).await?;
    Ok(Json(MarquageContexteResponse {
        date,
        eleves: contexte.eleves.into_iter().map(Into::into).collect(),
        menu: contexte.menu.map(Into::into),
        deja_marques: contexte.deja_marques,
    }))
}

// ── POST /repas/marquer_multiples ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MarquerMultiplesRequest {
    pub eleves: Vec<Uuid>,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct MarquerMultiplesResponse {
    pub detail: String,
    pub repas_crees: u32,
    pub ignores: Vec<MarquageIgnore>,
}

pub async fn marquer_multiples(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<MarquerMultiplesRequest>,
) -> Result<Json<MarquerMultiplesResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let usecase = MarquerRepasMultiplesUseCase {
        eleves: state.eleve_repo(),
        repas: state.repas_repo(),
        menus: state.menu_repo(),
    };
    let resultat = usecase
        .execute(
            identity.user_id,
            MarquerRepasMultiplesInput {
                date,
                eleve_ids: body.eleves,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Create,
        "Repas",
        None,
        format!("Création de {} repas pour {date}", resultat.repas_crees),
    )
    .await;

    Ok(Json(MarquerMultiplesResponse {
        detail: format!("{} repas enregistré(s) avec succès", resultat.repas_crees),
        repas_crees: resultat.repas_crees,
        ignores: resultat.ignores,
    }))
}

// ── GET /repas/statistiques ──────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct StatistiquesQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct JourStat {
    pub date: NaiveDate,
    pub nombre: i64,
}

#[derive(Serialize)]
pub struct EleveStat {
    pub nom: String,
    pub prenom: String,
    pub nombre: i64,
}

#[derive(Serialize)]
pub struct StatistiquesResponse {
    pub total_repas: u64,
    pub par_jour: Vec<JourStat>,
    pub par_eleve: Vec<EleveStat>,
}

pub async fn statistiques(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<StatistiquesQuery>,
) -> Result<Json<StatistiquesResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = StatistiquesRepasUseCase {
        repas: state.repas_repo(),
    };
    let stats = usecase.execute(query.date_from, query.date_to).await?;
    Ok(Json(StatistiquesResponse {
        total_repas: stats.total,
        par_jour: stats
            .par_jour
            .into_iter()
            .map(|j| JourStat {
                date: j.date,
                nombre: j.nombre,
            })
            .collect(),
        par_eleve: stats
            .par_eleve
            .into_iter()
            .map(|e| EleveStat {
                nom: e.nom,
                prenom: e.prenom,
                nombre: e.nombre,
            })
            .collect(),
    }))
}

// ── GET /repas/{id} ──────────────────────────────────────────────────────────

pub async fn get_repas(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RepasResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = GetRepasUseCase {
        repas: state.repas_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /repas ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRepasRequest {
    pub eleve_id: Uuid,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
}

pub async fn create_repas(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateRepasRequest>,
) -> Result<(StatusCode, Json<RepasResponse>), CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = CreateRepasUseCase {
        eleves: state.eleve_repo(),
        repas: state.repas_repo(),
        menus: state.menu_repo(),
    };
    let repas = usecase
        .execute(
            identity.user_id,
            CreateRepasInput {
                eleve_id: body.eleve_id,
                date: body.date.unwrap_or_else(|| Utc::now().date_naive()),
                note: body.note,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Create,
        "Repas",
        Some(repas.id),
        format!("Création repas du {}", repas.date),
    )
    .await;

    Ok((StatusCode::CREATED, Json(repas.into())))
}

// ── PUT /repas/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRepasRequest {
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

pub async fn update_repas(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRepasRequest>,
) -> Result<Json<RepasResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = UpdateRepasUseCase {
        repas: state.repas_repo(),
        menus: state.menu_repo(),
    };
    let repas = usecase
        .execute(
            id,
            UpdateRepasInput {
                date: body.date,
                note: body.note,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Update,
        "Repas",
        Some(repas.id),
        format!("Modification repas du {}", repas.date),
    )
    .await;

    Ok(Json(repas.into()))
}

// ── DELETE /repas/{id} ───────────────────────────────────────────────────────

pub async fn delete_repas(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = DeleteRepasUseCase {
        repas: state.repas_repo(),
    };
    usecase.execute(id).await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Delete,
        "Repas",
        Some(id),
        "Suppression du repas".to_owned(),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

// ── GET /decomptes/journalier ────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct DecompteJournalierQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct DecompteJournalierResponse {
    pub date: NaiveDate,
    pub nombre_repas: u64,
    pub eleves_servis: u64,
    pub menu: Option<MenuResponse>,
    pub repas: Vec<RepasResponse>,
}

pub async fn decompte_journalier(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<DecompteJournalierQuery>,
) -> Result<Json<DecompteJournalierResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let usecase = DecompteJournalierUseCase {
        repas: state.repas_repo(),
        menus: state.menu_repo(),
    };
    let decompte = usecase.execute(date).await?;
    Ok(Json(DecompteJournalierResponse {
        date: decompte.date,
        nombre_repas: decompte.nombre_repas,
        eleves_servis: decompte.eleves_servis,
        menu: decompte.menu.map(Into::into),
        repas: decompte.repas.into_iter().map(Into::into).collect(),
    }))
}

// ── GET /decomptes/mensuel ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct DecompteMensuelQuery {
    pub annee: Option<i32>,
    pub mois: Option<u8>,
}

#[derive(Serialize)]
pub struct DecompteMensuelResponse {
    pub annee: i32,
    pub mois: u8,
    pub nombre_repas: u64,
    pub nombre_jours_travail: u64,
    pub eleves_servis: u64,
    pub repas_par_jour: Vec<JourStat>,
}

pub async fn decompte_mensuel(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<DecompteMensuelQuery>,
) -> Result<Json<DecompteMensuelResponse>, CantineError> {
    use chrono::Datelike;

    super::acteur(&state, &identity).await?;
    let aujourd_hui = Utc::now().date_naive();
    let usecase = DecompteMensuelUseCase {
        repas: state.repas_repo(),
    };
    let decompte = usecase
        .execute(
            query.annee.unwrap_or(aujourd_hui.year()),
            query.mois.unwrap_or(aujourd_hui.month() as u8),
        )
        .await?;
    Ok(Json(DecompteMensuelResponse {
        annee: decompte.annee,
        mois: decompte.mois,
        nombre_repas: decompte.nombre_repas,
        nombre_jours_travail: decompte.nombre_jours_travail,
        eleves_servis: decompte.eleves_servis,
        repas_par_jour: decompte
            .repas_par_jour
            .into_iter()
            .map(|j| JourStat {
                date: j.date,
                nombre: j.nombre,
            })
            .collect(),
    }))
}
