use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use cantine_domain::action::ActionKind;

use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase, RefreshUseCase, VerifyUseCase};
use crate::usecase::journal;

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_exp: u64,
    pub user_id: uuid::Uuid,
    pub role: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, CantineError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        profils: state.profil_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let username = body.username.clone();
    let pair = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    journal::enregistrer(
        &state.action_log_repo(),
        Some(pair.user_id),
        ActionKind::Login,
        "User",
        Some(pair.user_id),
        format!("Connexion de {username}"),
    )
    .await;

    Ok(Json(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        access_token_exp: pair.access_token_exp,
        user_id: pair.user_id,
        role: pair.role,
    }))
}

// ── POST /auth/refresh ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, CantineError> {
    let usecase = RefreshUseCase {
        users: state.user_repo(),
        profils: state.profil_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let pair = usecase.execute(&body.refresh_token).await?;
    Ok(Json(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        access_token_exp: pair.access_token_exp,
        user_id: pair.user_id,
        role: pair.role,
    }))
}

// ── POST /auth/verify ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub user_id: uuid::Uuid,
    pub role: String,
    pub exp: u64,
}

pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, CantineError> {
    let usecase = VerifyUseCase {
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&body.token)?;
    Ok(Json(VerifyResponse {
        user_id: out.user_id,
        role: out.role,
        exp: out.exp,
    }))
}
