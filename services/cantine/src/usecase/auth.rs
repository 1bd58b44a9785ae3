use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use uuid::Uuid;

use cantine_auth_types::token::{issue_access_token, issue_refresh_token, validate_token};

use crate::domain::repository::{ProfilRepository, UserRepository};
use crate::error::CantineError;

/// Hash a password with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, CantineError> {
    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| CantineError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Constant-time verification against a stored argon2 hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct TokenPair {
    pub user_id: Uuid,
    pub role: String,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Credential exchange: username + password → access/refresh token pair.
///
/// A login requires an active identity *and* an active profile; an account
/// without a profile is rejected explicitly, never let through with
/// degraded access.
pub struct LoginUseCase<U: UserRepository, P: ProfilRepository> {
    pub users: U,
    pub profils: P,
    pub jwt_secret: String,
}

impl<U: UserRepository, P: ProfilRepository> LoginUseCase<U, P> {
    pub async fn execute(&self, input: LoginInput) -> Result<TokenPair, CantineError> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or(CantineError::IdentifiantsInvalides)?;

        if !verify_password(&input.password, &user.password_hash) || !user.actif {
            return Err(CantineError::IdentifiantsInvalides);
        }

        let profil = self
            .profils
            .find_by_user_id(user.id)
            .await?
            .ok_or(CantineError::ProfilManquant)?;
        if !profil.actif {
            return Err(CantineError::ProfilInactif);
        }

        let role = profil.role.as_str();
        let (access_token, access_token_exp) =
            issue_access_token(user.id, role, &self.jwt_secret)
                .map_err(|e| CantineError::Internal(anyhow::anyhow!("issue token: {e}")))?;
        let refresh_token = issue_refresh_token(user.id, role, &self.jwt_secret)
            .map_err(|e| CantineError::Internal(anyhow::anyhow!("issue token: {e}")))?;

        Ok(TokenPair {
            user_id: user.id,
            role: role.to_owned(),
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

/// Rotate a refresh token into a fresh pair.
///
/// The role is re-read from the stored profile, so an elevation or
/// deactivation takes effect at the next refresh at the latest.
pub struct RefreshUseCase<U: UserRepository, P: ProfilRepository> {
    pub users: U,
    pub profils: P,
    pub jwt_secret: String,
}

impl<U: UserRepository, P: ProfilRepository> RefreshUseCase<U, P> {
    pub async fn execute(&self, refresh_token_value: &str) -> Result<TokenPair, CantineError> {
        let claims = validate_token(refresh_token_value, &self.jwt_secret)
            .map_err(|_| CantineError::TokenInvalide)?;
        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| CantineError::TokenInvalide)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.actif)
            .ok_or(CantineError::TokenInvalide)?;

        let profil = self
            .profils
            .find_by_user_id(user.id)
            .await?
            .filter(|p| p.actif)
            .ok_or(CantineError::TokenInvalide)?;

        let role = profil.role.as_str();
        let (access_token, access_token_exp) =
            issue_access_token(user.id, role, &self.jwt_secret)
                .map_err(|e| CantineError::Internal(anyhow::anyhow!("issue token: {e}")))?;
        let refresh_token = issue_refresh_token(user.id, role, &self.jwt_secret)
            .map_err(|e| CantineError::Internal(anyhow::anyhow!("issue token: {e}")))?;

        Ok(TokenPair {
            user_id: user.id,
            role: role.to_owned(),
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── Verify ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct VerifyOutput {
    pub user_id: Uuid,
    pub role: String,
    pub exp: u64,
}

/// Check a token's signature and expiry without touching storage.
pub struct VerifyUseCase {
    pub jwt_secret: String,
}

impl VerifyUseCase {
    pub fn execute(&self, token: &str) -> Result<VerifyOutput, CantineError> {
        let claims = validate_token(token, &self.jwt_secret)
            .map_err(|_| CantineError::TokenInvalide)?;
        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| CantineError::TokenInvalide)?;
        Ok(VerifyOutput {
            user_id,
            role: claims.role,
            exp: claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use cantine_domain::pagination::PageRequest;
    use cantine_domain::role::Role;

    use crate::domain::types::{Profil, ProfilFiltre, User};

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    struct MockUserRepo {
        user: Option<User>,
    }

    impl UserRepository for MockUserRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, CantineError> {
            Ok(self.user.clone())
        }
        async fn find_by_username(&self, _username: &str) -> Result<Option<User>, CantineError> {
            Ok(self.user.clone())
        }
    }

    struct MockProfilRepo {
        profil: Option<Profil>,
    }

    impl ProfilRepository for MockProfilRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Profil>, CantineError> {
            Ok(self.profil.clone())
        }
        async fn find_by_user_id(&self, _user_id: Uuid) -> Result<Option<Profil>, CantineError> {
            Ok(self.profil.clone())
        }
        async fn list(
            &self,
            _filtre: ProfilFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Profil>, CantineError> {
            Ok(vec![])
        }
        async fn create_with_user(
            &self,
            _user: &User,
            _profil: &Profil,
        ) -> Result<(), CantineError> {
            Ok(())
        }
        async fn update(&self, _profil: &Profil) -> Result<(), CantineError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, CantineError> {
            Ok(false)
        }
    }

    fn user_with_password(password: &str, actif: bool) -> User {
        User {
            id: Uuid::now_v7(),
            username: "cantine".into(),
            password_hash: hash_password(password).unwrap(),
            full_name: "Cantine".into(),
            email: "cantine@example.com".into(),
            actif,
            created_at: Utc::now(),
        }
    }

    fn profil_for(user: &User, role: Role, actif: bool) -> Profil {
        Profil {
            id: Uuid::now_v7(),
            user_id: user.id,
            role,
            telephone: String::new(),
            entreprise: String::new(),
            actif,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn should_verify_hashed_password() {
        let hash = hash_password("un secret").unwrap();
        assert!(verify_password("un secret", &hash));
        assert!(!verify_password("autre chose", &hash));
        assert!(!verify_password("un secret", "not-a-hash"));
    }

    #[tokio::test]
    async fn should_issue_tokens_for_valid_credentials() {
        let user = user_with_password("motdepasse", true);
        let profil = profil_for(&user, Role::Prestataire, true);
        let usecase = LoginUseCase {
            users: MockUserRepo { user: Some(user) },
            profils: MockProfilRepo {
                profil: Some(profil),
            },
            jwt_secret: TEST_SECRET.into(),
        };
        let pair = usecase
            .execute(LoginInput {
                username: "cantine".into(),
                password: "motdepasse".into(),
            })
            .await
            .unwrap();
        assert_eq!(pair.role, "PRESTATAIRE");

        let verify = VerifyUseCase {
            jwt_secret: TEST_SECRET.into(),
        };
        let out = verify.execute(&pair.access_token).unwrap();
        assert_eq!(out.user_id, pair.user_id);
        assert_eq!(out.role, "PRESTATAIRE");
    }

    #[tokio::test]
    async fn should_reject_wrong_password() {
        let user = user_with_password("motdepasse", true);
        let profil = profil_for(&user, Role::Prestataire, true);
        let usecase = LoginUseCase {
            users: MockUserRepo { user: Some(user) },
            profils: MockProfilRepo {
                profil: Some(profil),
            },
            jwt_secret: TEST_SECRET.into(),
        };
        let result = usecase
            .execute(LoginInput {
                username: "cantine".into(),
                password: "faux".into(),
            })
            .await;
        assert!(matches!(result, Err(CantineError::IdentifiantsInvalides)));
    }

    #[tokio::test]
    async fn should_reject_unknown_user() {
        let usecase = LoginUseCase {
            users: MockUserRepo { user: None },
            profils: MockProfilRepo { profil: None },
            jwt_secret: TEST_SECRET.into(),
        };
        let result = usecase
            .execute(LoginInput {
                username: "inconnu".into(),
                password: "x".into(),
            })
            .await;
        assert!(matches!(result, Err(CantineError::IdentifiantsInvalides)));
    }

    #[tokio::test]
    async fn should_reject_login_without_profil() {
        let user = user_with_password("motdepasse", true);
        let usecase = LoginUseCase {
            users: MockUserRepo { user: Some(user) },
            profils: MockProfilRepo { profil: None },
            jwt_secret: TEST_SECRET.into(),
        };
        let result = usecase
            .execute(LoginInput {
                username: "cantine".into(),
                password: "motdepasse".into(),
            })
            .await;
        assert!(matches!(result, Err(CantineError::ProfilManquant)));
    }

    #[tokio::test]
    async fn should_reject_login_with_inactive_profil() {
        let user = user_with_password("motdepasse", true);
        let profil = profil_for(&user, Role::Prestataire, false);
        let usecase = LoginUseCase {
            users: MockUserRepo { user: Some(user) },
            profils: MockProfilRepo {
                profil: Some(profil),
            },
            jwt_secret: TEST_SECRET.into(),
        };
        let result = usecase
            .execute(LoginInput {
                username: "cantine".into(),
                password: "motdepasse".into(),
            })
            .await;
        assert!(matches!(result, Err(CantineError::ProfilInactif)));
    }

    #[tokio::test]
    async fn should_refresh_with_current_role() {
        let user = user_with_password("motdepasse", true);
        // Role elevated after the original login.
        let profil = profil_for(&user, Role::Admin, true);
        let refresh_token =
            issue_refresh_token(user.id, "PRESTATAIRE", TEST_SECRET).unwrap();

        let usecase = RefreshUseCase {
            users: MockUserRepo { user: Some(user) },
            profils: MockProfilRepo {
                profil: Some(profil),
            },
            jwt_secret: TEST_SECRET.into(),
        };
        let pair = usecase.execute(&refresh_token).await.unwrap();
        assert_eq!(pair.role, "ADMIN");
    }

    #[tokio::test]
    async fn should_reject_refresh_for_deactivated_user() {
        let user = user_with_password("motdepasse", false);
        let refresh_token = issue_refresh_token(user.id, "ADMIN", TEST_SECRET).unwrap();
        let usecase = RefreshUseCase {
            users: MockUserRepo { user: Some(user) },
            profils: MockProfilRepo { profil: None },
            jwt_secret: TEST_SECRET.into(),
        };
        let result = usecase.execute(&refresh_token).await;
        assert!(matches!(result, Err(CantineError::TokenInvalide)));
    }

    #[test]
    fn should_reject_garbage_token_on_verify() {
        let verify = VerifyUseCase {
            jwt_secret: TEST_SECRET.into(),
        };
        assert!(matches!(
            verify.execute("garbage"),
            Err(CantineError::TokenInvalide)
        ));
    }
}
