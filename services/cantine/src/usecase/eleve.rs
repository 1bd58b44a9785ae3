use chrono::Utc;
use uuid::Uuid;

use cantine_domain::pagination::PageRequest;

use crate::domain::repository::{ClasseRepository, EleveRepository};
use crate::domain::types::{Eleve, EleveFiltre};
use crate::error::CantineError;

// ── ListEleves / GetEleve ────────────────────────────────────────────────────

pub struct ListElevesUseCase<R: EleveRepository> {
    pub eleves: R,
}

impl<R: EleveRepository> ListElevesUseCase<R> {
    pub async fn execute(
        &self,
        filtre: EleveFiltre,
        page: PageRequest,
    ) -> Result<Vec<Eleve>, CantineError> {
        if let Some((_, mois)) = filtre.inscrit_mois {
            if !(1..=12).contains(&mois) {
                return Err(CantineError::MoisInvalide);
            }
        }
        self.eleves.list(filtre, page).await
    }
}

pub struct GetEleveUseCase<R: EleveRepository> {
    pub eleves: R,
}

impl<R: EleveRepository> GetEleveUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Eleve, CantineError> {
        self.eleves
            .find_by_id(id)
            .await?
            .ok_or(CantineError::EleveNotFound)
    }
}

/// Active students enrolled for a month (the prestataire "enrolled
/// students" view). No fallback here — an empty month is an empty list.
pub struct InscritsDuMoisUseCase<R: EleveRepository> {
    pub eleves: R,
}

impl<R: EleveRepository> InscritsDuMoisUseCase<R> {
    pub async fn execute(&self, annee: i32, mois: u8) -> Result<Vec<Eleve>, CantineError> {
        if !(1..=12).contains(&mois) {
            return Err(CantineError::MoisInvalide);
        }
        self.eleves.list_inscrits(annee, mois).await
    }
}

// ── CreateEleve ──────────────────────────────────────────────────────────────

pub struct CreateEleveInput {
    pub prenom: String,
    pub nom: String,
    pub classe_id: Option<Uuid>,
    pub telephone_parent: String,
    pub email_parent: String,
    pub notes: String,
}

pub struct CreateEleveUseCase<R: EleveRepository> {
    pub eleves: R,
}

impl<R: EleveRepository> CreateEleveUseCase<R> {
    pub async fn execute(&self, input: CreateEleveInput) -> Result<Eleve, CantineError> {
        if input.prenom.trim().is_empty() || input.nom.trim().is_empty() {
            return Err(CantineError::MissingData);
        }
        let now = Utc::now();
        let eleve = Eleve {
            id: Uuid::now_v7(),
            prenom: input.prenom,
            nom: input.nom,
            classe_id: input.classe_id,
            actif: true,
            telephone_parent: input.telephone_parent,
            email_parent: input.email_parent,
            photo: None,
            notes: input.notes,
            // Set once at creation, never updated afterwards.
            date_inscription: now.date_naive(),
            created_at: now,
            updated_at: now,
        };
        self.eleves.create(&eleve).await?;
        Ok(eleve)
    }
}

// ── UpdateEleve ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateEleveInput {
    pub prenom: Option<String>,
    pub nom: Option<String>,
    pub classe_id: Option<Option<Uuid>>,
    pub actif: Option<bool>,
    pub telephone_parent: Option<String>,
    pub email_parent: Option<String>,
    pub notes: Option<String>,
}

pub struct UpdateEleveUseCase<R: EleveRepository> {
    pub eleves: R,
}

impl<R: EleveRepository> UpdateEleveUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateEleveInput) -> Result<Eleve, CantineError> {
        let mut eleve = self
            .eleves
            .find_by_id(id)
            .await?
            .ok_or(CantineError::EleveNotFound)?;
        if let Some(prenom) = input.prenom {
            eleve.prenom = prenom;
        }
        if let Some(nom) = input.nom {
            eleve.nom = nom;
        }
        if let Some(classe_id) = input.classe_id {
            eleve.classe_id = classe_id;
        }
        if let Some(actif) = input.actif {
            eleve.actif = actif;
        }
        if let Some(telephone_parent) = input.telephone_parent {
            eleve.telephone_parent = telephone_parent;
        }
        if let Some(email_parent) = input.email_parent {
            eleve.email_parent = email_parent;
        }
        if let Some(notes) = input.notes {
            eleve.notes = notes;
        }
        eleve.updated_at = Utc::now();
        self.eleves.update(&eleve).await?;
        Ok(eleve)
    }
}

// ── ExportEleves ─────────────────────────────────────────────────────────────

pub const EXPORT_ENTETES: [&str; 7] = [
    "Prénom",
    "Nom",
    "Classe",
    "Téléphone Parent",
    "Email Parent",
    "Actif",
    "Date Inscription",
];

/// Flatten every student into spreadsheet rows matching [`EXPORT_ENTETES`].
pub struct ExportElevesUseCase<E: EleveRepository, C: ClasseRepository> {
    pub eleves: E,
    pub classes: C,
}

impl<E: EleveRepository, C: ClasseRepository> ExportElevesUseCase<E, C> {
    pub async fn execute(&self) -> Result<Vec<Vec<String>>, CantineError> {
        let classes = self
            .classes
            .list(PageRequest {
                per_page: 100,
                page: 1,
            })
            .await?;
        let noms: std::collections::HashMap<Uuid, String> =
            classes.into_iter().map(|c| (c.id, c.nom)).collect();

        let rows = self
            .eleves
            .list_tous()
            .await?
            .into_iter()
            .map(|e| {
                vec![
                    e.prenom,
                    e.nom,
                    e.classe_id
                        .and_then(|id| noms.get(&id).cloned())
                        .unwrap_or_default(),
                    e.telephone_parent,
                    e.email_parent,
                    if e.actif { "Oui" } else { "Non" }.to_owned(),
                    e.date_inscription.format("%d/%m/%Y").to_string(),
                ]
            })
            .collect();
        Ok(rows)
    }
}

// ── DeleteEleve ──────────────────────────────────────────────────────────────

/// Hard delete. The storage layer cascades to the student's repas and
/// inscriptions. Normal retirement is `actif = false` via update.
pub struct DeleteEleveUseCase<R: EleveRepository> {
    pub eleves: R,
}

impl<R: EleveRepository> DeleteEleveUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), CantineError> {
        let deleted = self.eleves.delete(id).await?;
        if !deleted {
            return Err(CantineError::EleveNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockEleveRepo {
        eleve: Option<Eleve>,
        delete_returns: bool,
    }

    impl EleveRepository for MockEleveRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Eleve>, CantineError> {
            Ok(self.eleve.clone())
        }
        async fn list(
            &self,
            _filtre: EleveFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Eleve>, CantineError> {
            Ok(self.eleve.clone().into_iter().collect())
        }
        async fn list_actifs(&self) -> Result<Vec<Eleve>, CantineError> {
            Ok(self.eleve.clone().into_iter().collect())
        }
        async fn list_tous(&self) -> Result<Vec<Eleve>, CantineError> {
            Ok(self.eleve.clone().into_iter().collect())
        }
        async fn list_inscrits(&self, _annee: i32, _mois: u8) -> Result<Vec<Eleve>, CantineError> {
            Ok(vec![])
        }
        async fn count_actifs(&self) -> Result<u64, CantineError> {
            Ok(0)
        }
        async fn create(&self, _eleve: &Eleve) -> Result<(), CantineError> {
            Ok(())
        }
        async fn update(&self, _eleve: &Eleve) -> Result<(), CantineError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, CantineError> {
            Ok(self.delete_returns)
        }
    }

    fn repo_with(eleve: Option<Eleve>) -> MockEleveRepo {
        MockEleveRepo {
            eleve,
            delete_returns: false,
        }
    }

    fn test_eleve() -> Eleve {
        let now = Utc::now();
        Eleve {
            id: Uuid::now_v7(),
            prenom: "Awa".into(),
            nom: "Diallo".into(),
            classe_id: None,
            actif: true,
            telephone_parent: String::new(),
            email_parent: String::new(),
            photo: None,
            notes: String::new(),
            date_inscription: now.date_naive(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn should_create_eleve_active_with_inscription_date() {
        let usecase = CreateEleveUseCase {
            eleves: repo_with(None),
        };
        let eleve = usecase
            .execute(CreateEleveInput {
                prenom: "Awa".into(),
                nom: "Diallo".into(),
                classe_id: None,
                telephone_parent: String::new(),
                email_parent: String::new(),
                notes: String::new(),
            })
            .await
            .unwrap();
        assert!(eleve.actif);
        assert_eq!(eleve.date_inscription, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn should_reject_create_without_names() {
        let usecase = CreateEleveUseCase {
            eleves: repo_with(None),
        };
        let result = usecase
            .execute(CreateEleveInput {
                prenom: String::new(),
                nom: "Diallo".into(),
                classe_id: None,
                telephone_parent: String::new(),
                email_parent: String::new(),
                notes: String::new(),
            })
            .await;
        assert!(matches!(result, Err(CantineError::MissingData)));
    }

    #[tokio::test]
    async fn should_soft_retire_via_update() {
        let existing = test_eleve();
        let usecase = UpdateEleveUseCase {
            eleves: repo_with(Some(existing.clone())),
        };
        let updated = usecase
            .execute(
                existing.id,
                UpdateEleveInput {
                    actif: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.actif);
        // date_inscription is untouched by updates.
        assert_eq!(updated.date_inscription, existing.date_inscription);
    }

    #[tokio::test]
    async fn should_detach_classe_with_explicit_null() {
        let mut existing = test_eleve();
        existing.classe_id = Some(Uuid::now_v7());
        let usecase = UpdateEleveUseCase {
            eleves: repo_with(Some(existing.clone())),
        };
        let updated = usecase
            .execute(
                existing.id,
                UpdateEleveInput {
                    classe_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.classe_id, None);
    }

    #[tokio::test]
    async fn should_reject_invalid_month_filter() {
        let usecase = ListElevesUseCase {
            eleves: repo_with(None),
        };
        let result = usecase
            .execute(
                EleveFiltre {
                    inscrit_mois: Some((2024, 13)),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await;
        assert!(matches!(result, Err(CantineError::MoisInvalide)));
    }

    #[tokio::test]
    async fn should_return_not_found_on_delete_missing() {
        let usecase = DeleteEleveUseCase {
            eleves: repo_with(None),
        };
        let result = usecase.execute(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CantineError::EleveNotFound)));
    }
}
