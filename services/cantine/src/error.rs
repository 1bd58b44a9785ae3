use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Canteen service error variants.
#[derive(Debug, thiserror::Error)]
pub enum CantineError {
    #[error("eleve not found")]
    EleveNotFound,
    #[error("classe not found")]
    ClasseNotFound,
    #[error("menu not found")]
    MenuNotFound,
    #[error("repas not found")]
    RepasNotFound,
    #[error("inscription not found")]
    InscriptionNotFound,
    #[error("facture not found")]
    FactureNotFound,
    #[error("profil not found")]
    ProfilNotFound,

    #[error("a menu already exists for this date")]
    MenuDejaExistant,
    #[error("a repas already exists for this eleve and date")]
    RepasDejaExistant,
    #[error("an inscription already exists for this eleve and month")]
    InscriptionDejaExistante,
    #[error("a facture with this numero already exists")]
    NumeroDejaExistant,
    #[error("a classe with this nom already exists")]
    ClasseDejaExistante,
    #[error("this username is already taken")]
    UsernameDejaPris,
    #[error("invalid facture status transition")]
    TransitionInvalide,

    #[error("missing data")]
    MissingData,
    #[error("invalid date")]
    DateInvalide,
    #[error("invalid month")]
    MoisInvalide,
    #[error("invalid statut")]
    StatutInvalide,
    #[error("invalid role")]
    RoleInvalide,
    #[error("invalid report period")]
    PeriodeInvalide,
    #[error("invalid export format")]
    FormatInvalide,
    #[error("invalid dump: {0}")]
    DumpInvalide(String),

    #[error("invalid credentials")]
    IdentifiantsInvalides,
    #[error("invalid token")]
    TokenInvalide,

    #[error("forbidden")]
    Forbidden,
    #[error("no profil associated with this account")]
    ProfilManquant,
    #[error("this account is deactivated")]
    ProfilInactif,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CantineError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EleveNotFound => "ELEVE_NOT_FOUND",
            Self::ClasseNotFound => "CLASSE_NOT_FOUND",
            Self::MenuNotFound => "MENU_NOT_FOUND",
            Self::RepasNotFound => "REPAS_NOT_FOUND",
            Self::InscriptionNotFound => "INSCRIPTION_NOT_FOUND",
            Self::FactureNotFound => "FACTURE_NOT_FOUND",
            Self::ProfilNotFound => "PROFIL_NOT_FOUND",
            Self::MenuDejaExistant => "MENU_DEJA_EXISTANT",
            Self::RepasDejaExistant => "REPAS_DEJA_EXISTANT",
            Self::InscriptionDejaExistante => "INSCRIPTION_DEJA_EXISTANTE",
            Self::NumeroDejaExistant => "NUMERO_DEJA_EXISTANT",
            Self::ClasseDejaExistante => "CLASSE_DEJA_EXISTANTE",
            Self::UsernameDejaPris => "USERNAME_DEJA_PRIS",
            Self::TransitionInvalide => "TRANSITION_INVALIDE",
            Self::MissingData => "MISSING_DATA",
            Self::DateInvalide => "DATE_INVALIDE",
            Self::MoisInvalide => "MOIS_INVALIDE",
            Self::StatutInvalide => "STATUT_INVALIDE",
            Self::RoleInvalide => "ROLE_INVALIDE",
            Self::PeriodeInvalide => "PERIODE_INVALIDE",
            Self::FormatInvalide => "FORMAT_INVALIDE",
            Self::DumpInvalide(_) => "DUMP_INVALIDE",
            Self::IdentifiantsInvalides => "IDENTIFIANTS_INVALIDES",
            Self::TokenInvalide => "TOKEN_INVALIDE",
            Self::Forbidden => "FORBIDDEN",
            Self::ProfilManquant => "PROFIL_MANQUANT",
            Self::ProfilInactif => "PROFIL_INACTIF",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CantineError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::EleveNotFound
            | Self::ClasseNotFound
            | Self::MenuNotFound
            | Self::RepasNotFound
            | Self::InscriptionNotFound
            | Self::FactureNotFound
            | Self::ProfilNotFound => StatusCode::NOT_FOUND,
            Self::MenuDejaExistant
            | Self::RepasDejaExistant
            | Self::InscriptionDejaExistante
            | Self::NumeroDejaExistant
            | Self::ClasseDejaExistante
            | Self::UsernameDejaPris
            | Self::TransitionInvalide => StatusCode::CONFLICT,
            Self::MissingData
            | Self::DateInvalide
            | Self::MoisInvalide
            | Self::StatutInvalide
            | Self::RoleInvalide
            | Self::PeriodeInvalide
            | Self::FormatInvalide
            | Self::DumpInvalide(_) => StatusCode::BAD_REQUEST,
            Self::IdentifiantsInvalides | Self::TokenInvalide => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::ProfilManquant | Self::ProfilInactif => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn assert_error(
        error: CantineError,
        expected_status: StatusCode,
        expected_kind: &str,
        expected_message: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn should_return_eleve_not_found() {
        assert_error(
            CantineError::EleveNotFound,
            StatusCode::NOT_FOUND,
            "ELEVE_NOT_FOUND",
            "eleve not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_menu_deja_existant_as_conflict() {
        assert_error(
            CantineError::MenuDejaExistant,
            StatusCode::CONFLICT,
            "MENU_DEJA_EXISTANT",
            "a menu already exists for this date",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_transition_invalide_as_conflict() {
        assert_error(
            CantineError::TransitionInvalide,
            StatusCode::CONFLICT,
            "TRANSITION_INVALIDE",
            "invalid facture status transition",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_profil_manquant_as_forbidden() {
        assert_error(
            CantineError::ProfilManquant,
            StatusCode::FORBIDDEN,
            "PROFIL_MANQUANT",
            "no profil associated with this account",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_identifiants_invalides_as_unauthorized() {
        assert_error(
            CantineError::IdentifiantsInvalides,
            StatusCode::UNAUTHORIZED,
            "IDENTIFIANTS_INVALIDES",
            "invalid credentials",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_dump_invalide_as_bad_request() {
        assert_error(
            CantineError::DumpInvalide("version 9 not supported".into()),
            StatusCode::BAD_REQUEST,
            "DUMP_INVALIDE",
            "invalid dump: version 9 not supported",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_internal_as_500() {
        assert_error(
            CantineError::Internal(anyhow::anyhow!("db error")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
        .await;
    }
}
