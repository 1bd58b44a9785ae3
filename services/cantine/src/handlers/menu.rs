use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cantine_auth_types::identity::Identity;
use cantine_domain::action::ActionKind;
use cantine_domain::pagination::PageRequest;

use crate::domain::types::{Menu, MenuFiltre};
use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::journal;
use crate::usecase::menu::{
    CreateMenuInput, CreateMenuUseCase, DeleteMenuUseCase, GetMenuUseCase, ListMenusUseCase,
    MenuDuJourUseCase, MenusDuMoisUseCase, UpdateMenuInput, UpdateMenuUseCase,
};

#[derive(Serialize)]
pub struct MenuResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub jour_semaine: String,
    pub plat_principal: String,
    pub accompagnement: String,
    pub dessert: String,
    pub disponible: bool,
    pub notes: String,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cantine_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Menu> for MenuResponse {
    fn from(m: Menu) -> Self {
        Self {
            id: m.id,
            date: m.date,
            jour_semaine: m.jour_semaine,
            plat_principal: m.plat_principal,
            accompagnement: m.accompagnement,
            dessert: m.dessert,
            disponible: m.disponible,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ── GET /menus ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct MenuListQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_menus(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<MenuListQuery>,
) -> Result<Json<Vec<MenuResponse>>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = ListMenusUseCase {
        menus: state.menu_repo(),
    };
    let menus = usecase
        .execute(
            MenuFiltre {
                date_from: query.date_from,
                date_to: query.date_to,
                recherche: query.search,
            },
            PageRequest {
                per_page: query.per_page.unwrap_or(25),
                page: query.page.unwrap_or(1),
            },
        )
        .await?;
    Ok(Json(menus.into_iter().map(MenuResponse::from).collect()))
}

// ── GET /menus/aujourdhui ────────────────────────────────────────────────────

pub async fn menu_aujourdhui(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<MenuResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = MenuDuJourUseCase {
        menus: state.menu_repo(),
    };
    let menu = usecase.execute(Utc::now().date_naive()).await?;
    Ok(Json(menu.into()))
}

// ── GET /menus/mois ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct MenusMoisQuery {
    pub annee: Option<i32>,
    pub mois: Option<u8>,
}

pub async fn menus_mois(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<MenusMoisQuery>,
) -> Result<Json<Vec<MenuResponse>>, CantineError> {
    super::acteur(&state, &identity).await?;
    let aujourd_hui = Utc::now().date_naive();
    let usecase = MenusDuMoisUseCase {
        menus: state.menu_repo(),
    };
    let menus = usecase
        .execute(
            query.annee.unwrap_or(aujourd_hui.year()),
            query.mois.unwrap_or(aujourd_hui.month() as u8),
        )
        .await?;
    Ok(Json(menus.into_iter().map(MenuResponse::from).collect()))
}

// ── GET /menus/{id} ──────────────────────────────────────────────────────────

pub async fn get_menu(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MenuResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = GetMenuUseCase {
        menus: state.menu_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /menus ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateMenuRequest {
    pub date: NaiveDate,
    pub jour_semaine: Option<String>,
    pub plat_principal: String,
    #[serde(default)]
    pub accompagnement: String,
    #[serde(default)]
    pub dessert: String,
    #[serde(default = "default_disponible")]
    pub disponible: bool,
    #[serde(default)]
    pub notes: String,
}

fn default_disponible() -> bool {
    true
}

pub async fn create_menu(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateMenuRequest>,
) -> Result<(StatusCode, Json<MenuResponse>), CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = CreateMenuUseCase {
        menus: state.menu_repo(),
    };
    let menu = usecase
        .execute(CreateMenuInput {
            date: body.date,
            jour_semaine: body.jour_semaine,
            plat_principal: body.plat_principal,
            accompagnement: body.accompagnement,
            dessert: body.dessert,
            disponible: body.disponible,
            notes: body.notes,
        })
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Create,
        "Menu",
        Some(menu.id),
        format!("Création menu {}", menu.date),
    )
    .await;

    Ok((StatusCode::CREATED, Json(menu.into())))
}

// ── PUT /menus/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMenuRequest {
    pub date: Option<NaiveDate>,
    pub jour_semaine: Option<String>,
    pub plat_principal: Option<String>,
    pub accompagnement: Option<String>,
    pub dessert: Option<String>,
    pub disponible: Option<bool>,
    pub notes: Option<String>,
}

pub async fn update_menu(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMenuRequest>,
) -> Result<Json<MenuResponse>, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = UpdateMenuUseCase {
        menus: state.menu_repo(),
    };
    let menu = usecase
        .execute(
            id,
            UpdateMenuInput {
                date: body.date,
                jour_semaine: body.jour_semaine,
                plat_principal: body.plat_principal,
                accompagnement: body.accompagnement,
                dessert: body.dessert,
                disponible: body.disponible,
                notes: body.notes,
            },
        )
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Update,
        "Menu",
        Some(menu.id),
        format!("Modification menu {}", menu.date),
    )
    .await;

    Ok(Json(menu.into()))
}

// ── DELETE /menus/{id} ───────────────────────────────────────────────────────

pub async fn delete_menu(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CantineError> {
    super::acteur(&state, &identity).await?;
    let usecase = DeleteMenuUseCase {
        menus: state.menu_repo(),
    };
    usecase.execute(id).await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(identity.user_id),
        ActionKind::Delete,
        "Menu",
        Some(id),
        "Suppression du menu".to_owned(),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
