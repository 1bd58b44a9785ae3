use chrono::Utc;
use uuid::Uuid;

use cantine_domain::pagination::PageRequest;
use cantine_domain::role::Role;

use crate::domain::repository::ProfilRepository;
use crate::domain::types::{Acteur, Profil, ProfilFiltre, User};
use crate::error::CantineError;
use crate::usecase::auth::hash_password;

// ── ResoudreActeur ───────────────────────────────────────────────────────────

/// Resolve the acting profile for an authenticated user id.
///
/// The token only authenticates; the stored profile decides authorization,
/// so a deleted or deactivated profile is denied immediately.
pub struct ResoudreActeurUseCase<R: ProfilRepository> {
    pub profils: R,
}

impl<R: ProfilRepository> ResoudreActeurUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Acteur, CantineError> {
        let profil = self
            .profils
            .find_by_user_id(user_id)
            .await?
            .ok_or(CantineError::ProfilManquant)?;
        if !profil.actif {
            return Err(CantineError::ProfilInactif);
        }
        Ok(match profil.role {
            Role::Admin => Acteur::Admin(profil),
            Role::Prestataire => Acteur::Prestataire(profil),
        })
    }

    /// Resolve and require the ADMIN role.
    pub async fn execute_admin(&self, user_id: Uuid) -> Result<Acteur, CantineError> {
        let acteur = self.execute(user_id).await?;
        if !acteur.est_admin() {
            return Err(CantineError::Forbidden);
        }
        Ok(acteur)
    }
}

// ── CreatePrestataire ────────────────────────────────────────────────────────

pub struct CreatePrestataireInput {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub telephone: String,
    pub entreprise: String,
    /// Defaults to PRESTATAIRE; ADMIN only when the creating actor elevates
    /// deliberately.
    pub role: Option<Role>,
}

/// Create a login identity and its profile in one transaction.
pub struct CreatePrestataireUseCase<R: ProfilRepository> {
    pub profils: R,
}

impl<R: ProfilRepository> CreatePrestataireUseCase<R> {
    pub async fn execute(&self, input: CreatePrestataireInput) -> Result<Profil, CantineError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(CantineError::MissingData);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            password_hash: hash_password(&input.password)?,
            full_name: input.full_name,
            email: input.email,
            actif: true,
            created_at: now,
        };
        let profil = Profil {
            id: Uuid::now_v7(),
            user_id: user.id,
            role: input.role.unwrap_or_default(),
            telephone: input.telephone,
            entreprise: input.entreprise,
            actif: true,
            created_at: now,
            updated_at: now,
        };
        self.profils.create_with_user(&user, &profil).await?;
        Ok(profil)
    }
}

// ── UpdatePrestataire ────────────────────────────────────────────────────────

pub struct UpdatePrestataireInput {
    pub role: Option<Role>,
    pub telephone: Option<String>,
    pub entreprise: Option<String>,
    pub actif: Option<bool>,
}

pub struct UpdatePrestataireUseCase<R: ProfilRepository> {
    pub profils: R,
}

impl<R: ProfilRepository> UpdatePrestataireUseCase<R> {
    pub async fn execute(
        &self,
        profil_id: Uuid,
        input: UpdatePrestataireInput,
    ) -> Result<Profil, CantineError> {
        let mut profil = self
            .profils
            .find_by_id(profil_id)
            .await?
            .ok_or(CantineError::ProfilNotFound)?;
        if let Some(role) = input.role {
            profil.role = role;
        }
        if let Some(telephone) = input.telephone {
            profil.telephone = telephone;
        }
        if let Some(entreprise) = input.entreprise {
            profil.entreprise = entreprise;
        }
        if let Some(actif) = input.actif {
            profil.actif = actif;
        }
        profil.updated_at = Utc::now();
        self.profils.update(&profil).await?;
        Ok(profil)
    }
}

// ── DeletePrestataire / ListPrestataires ─────────────────────────────────────

pub struct DeletePrestataireUseCase<R: ProfilRepository> {
    pub profils: R,
}

impl<R: ProfilRepository> DeletePrestataireUseCase<R> {
    pub async fn execute(&self, profil_id: Uuid) -> Result<(), CantineError> {
        let deleted = self.profils.delete(profil_id).await?;
        if !deleted {
            return Err(CantineError::ProfilNotFound);
        }
        Ok(())
    }
}

pub struct ListPrestatairesUseCase<R: ProfilRepository> {
    pub profils: R,
}

impl<R: ProfilRepository> ListPrestatairesUseCase<R> {
    pub async fn execute(
        &self,
        filtre: ProfilFiltre,
        page: PageRequest,
    ) -> Result<Vec<Profil>, CantineError> {
        self.profils.list(filtre, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockProfilRepo {
        profil: Option<Profil>,
        created: Mutex<Option<(User, Profil)>>,
        delete_returns: bool,
    }

    impl MockProfilRepo {
        fn with_profil(profil: Option<Profil>) -> Self {
            Self {
                profil,
                created: Mutex::new(None),
                delete_returns: false,
            }
        }
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
            Ok(self.profil.clone().into_iter().collect())
        }
        async fn create_with_user(
            &self,
            user: &User,
            profil: &Profil,
        ) -> Result<(), CantineError> {
            *self.created.lock().unwrap() = Some((user.clone(), profil.clone()));
            Ok(())
        }
        async fn update(&self, _profil: &Profil) -> Result<(), CantineError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, CantineError> {
            Ok(self.delete_returns)
        }
    }

    fn profil(role: Role, actif: bool) -> Profil {
        Profil {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            role,
            telephone: String::new(),
            entreprise: String::new(),
            actif,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn should_resolve_admin_actor() {
        let usecase = ResoudreActeurUseCase {
            profils: MockProfilRepo::with_profil(Some(profil(Role::Admin, true))),
        };
        let acteur = usecase.execute(Uuid::now_v7()).await.unwrap();
        assert!(acteur.est_admin());
    }

    #[tokio::test]
    async fn should_resolve_prestataire_actor() {
        let usecase = ResoudreActeurUseCase {
            profils: MockProfilRepo::with_profil(Some(profil(Role::Prestataire, true))),
        };
        let acteur = usecase.execute(Uuid::now_v7()).await.unwrap();
        assert!(!acteur.est_admin());
    }

    #[tokio::test]
    async fn should_deny_actor_without_profil() {
        let usecase = ResoudreActeurUseCase {
            profils: MockProfilRepo::with_profil(None),
        };
        let result = usecase.execute(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CantineError::ProfilManquant)));
    }

    #[tokio::test]
    async fn should_deny_inactive_profil() {
        let usecase = ResoudreActeurUseCase {
            profils: MockProfilRepo::with_profil(Some(profil(Role::Admin, false))),
        };
        let result = usecase.execute(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CantineError::ProfilInactif)));
    }

    #[tokio::test]
    async fn should_deny_prestataire_where_admin_required() {
        let usecase = ResoudreActeurUseCase {
            profils: MockProfilRepo::with_profil(Some(profil(Role::Prestataire, true))),
        };
        let result = usecase.execute_admin(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CantineError::Forbidden)));
    }

    #[tokio::test]
    async fn should_create_prestataire_with_default_role() {
        let repo = MockProfilRepo::with_profil(None);
        let usecase = CreatePrestataireUseCase { profils: repo };
        let profil = usecase
            .execute(CreatePrestataireInput {
                username: "traiteur".into(),
                password: "secret123".into(),
                full_name: "Traiteur SARL".into(),
                email: "contact@traiteur.example".into(),
                telephone: String::new(),
                entreprise: "Traiteur SARL".into(),
                role: None,
            })
            .await
            .unwrap();
        assert_eq!(profil.role, Role::Prestataire);

        let created = usecase.profils.created.lock().unwrap().take().unwrap();
        assert_eq!(created.0.id, created.1.user_id);
        // Password is stored hashed, never verbatim.
        assert_ne!(created.0.password_hash, "secret123");
    }

    #[tokio::test]
    async fn should_reject_create_without_username() {
        let usecase = CreatePrestataireUseCase {
            profils: MockProfilRepo::with_profil(None),
        };
        let result = usecase
            .execute(CreatePrestataireInput {
                username: "  ".into(),
                password: "secret123".into(),
                full_name: String::new(),
                email: String::new(),
                telephone: String::new(),
                entreprise: String::new(),
                role: None,
            })
            .await;
        assert!(matches!(result, Err(CantineError::MissingData)));
    }

    #[tokio::test]
    async fn should_elevate_role_on_update() {
        let existing = profil(Role::Prestataire, true);
        let usecase = UpdatePrestataireUseCase {
            profils: MockProfilRepo::with_profil(Some(existing.clone())),
        };
        let updated = usecase
            .execute(
                existing.id,
                UpdatePrestataireInput {
                    role: Some(Role::Admin),
                    telephone: None,
                    entreprise: None,
                    actif: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn should_return_not_found_on_delete_missing() {
        let usecase = DeletePrestataireUseCase {
            profils: MockProfilRepo::with_profil(None),
        };
        let result = usecase.execute(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CantineError::ProfilNotFound)));
    }
}
