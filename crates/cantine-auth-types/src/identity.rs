//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::token::validate_access_token;

/// JWT signing secret, provided by application state via `FromRef`.
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// Authenticated caller identity, extracted from the `Authorization: Bearer`
/// header and validated against [`JwtSecret`] from state.
///
/// Returns 401 if the header is absent, not a bearer token, or the token
/// fails validation. Role enforcement (403) is done by guards after
/// extraction, against the stored profile — never the token claim.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    /// Role claimed at token issue time; informational only.
    pub role_claim: String,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            let info = validate_access_token(&token, &secret.0)
                .map_err(|_| StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id: info.user_id,
                role_claim: info.role,
            })
        }
    }
}
