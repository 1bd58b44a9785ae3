use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use cantine_auth_types::identity::JwtSecret;

use crate::infra::db::{
    DbActionLogRepository, DbClasseRepository, DbEleveRepository, DbFactureRepository,
    DbInscriptionRepository, DbMenuRepository, DbProfilRepository, DbRepasRepository,
    DbSauvegardeRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn profil_repo(&self) -> DbProfilRepository {
        DbProfilRepository {
            db: self.db.clone(),
        }
    }

    pub fn classe_repo(&self) -> DbClasseRepository {
        DbClasseRepository {
            db: self.db.clone(),
        }
    }

    pub fn eleve_repo(&self) -> DbEleveRepository {
        DbEleveRepository {
            db: self.db.clone(),
        }
    }

    pub fn menu_repo(&self) -> DbMenuRepository {
        DbMenuRepository {
            db: self.db.clone(),
        }
    }

    pub fn repas_repo(&self) -> DbRepasRepository {
        DbRepasRepository {
            db: self.db.clone(),
        }
    }

    pub fn inscription_repo(&self) -> DbInscriptionRepository {
        DbInscriptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn facture_repo(&self) -> DbFactureRepository {
        DbFactureRepository {
            db: self.db.clone(),
        }
    }

    pub fn action_log_repo(&self) -> DbActionLogRepository {
        DbActionLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn sauvegarde_repo(&self) -> DbSauvegardeRepository {
        DbSauvegardeRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}
