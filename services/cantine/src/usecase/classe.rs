use uuid::Uuid;

use cantine_domain::pagination::PageRequest;

use crate::domain::repository::ClasseRepository;
use crate::domain::types::Classe;
use crate::error::CantineError;

// ── CreateClasse ─────────────────────────────────────────────────────────────

pub struct CreateClasseInput {
    pub nom: String,
    pub niveau: String,
}

pub struct CreateClasseUseCase<R: ClasseRepository> {
    pub classes: R,
}

impl<R: ClasseRepository> CreateClasseUseCase<R> {
    pub async fn execute(&self, input: CreateClasseInput) -> Result<Classe, CantineError> {
        if input.nom.trim().is_empty() {
            return Err(CantineError::MissingData);
        }
        let classe = Classe {
            id: Uuid::now_v7(),
            nom: input.nom,
            niveau: input.niveau,
        };
        self.classes.create(&classe).await?;
        Ok(classe)
    }
}

// ── GetClasse / ListClasses ──────────────────────────────────────────────────

pub struct GetClasseUseCase<R: ClasseRepository> {
    pub classes: R,
}

impl<R: ClasseRepository> GetClasseUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Classe, CantineError> {
        self.classes
            .find_by_id(id)
            .await?
            .ok_or(CantineError::ClasseNotFound)
    }
}

pub struct ListClassesUseCase<R: ClasseRepository> {
    pub classes: R,
}

impl<R: ClasseRepository> ListClassesUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Classe>, CantineError> {
        self.classes.list(page).await
    }
}

// ── UpdateClasse ─────────────────────────────────────────────────────────────

pub struct UpdateClasseInput {
    pub nom: Option<String>,
    pub niveau: Option<String>,
}

pub struct UpdateClasseUseCase<R: ClasseRepository> {
    pub classes: R,
}

impl<R: ClasseRepository> UpdateClasseUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateClasseInput,
    ) -> Result<Classe, CantineError> {
        let mut classe = self
            .classes
            .find_by_id(id)
            .await?
            .ok_or(CantineError::ClasseNotFound)?;
        if let Some(nom) = input.nom {
            if nom.trim().is_empty() {
                return Err(CantineError::MissingData);
            }
            classe.nom = nom;
        }
        if let Some(niveau) = input.niveau {
            classe.niveau = niveau;
        }
        self.classes.update(&classe).await?;
        Ok(classe)
    }
}

// ── DeleteClasse ─────────────────────────────────────────────────────────────

/// Deleting a classe nulls the `classe_id` of its students (FK set-null);
/// students themselves are untouched.
pub struct DeleteClasseUseCase<R: ClasseRepository> {
    pub classes: R,
}

impl<R: ClasseRepository> DeleteClasseUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), CantineError> {
        let deleted = self.classes.delete(id).await?;
        if !deleted {
            return Err(CantineError::ClasseNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockClasseRepo {
        classe: Option<Classe>,
        delete_returns: bool,
    }

    impl ClasseRepository for MockClasseRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Classe>, CantineError> {
            Ok(self.classe.clone())
        }
        async fn list(&self, _page: PageRequest) -> Result<Vec<Classe>, CantineError> {
            Ok(self.classe.clone().into_iter().collect())
        }
        async fn create(&self, _classe: &Classe) -> Result<(), CantineError> {
            Ok(())
        }
        async fn update(&self, _classe: &Classe) -> Result<(), CantineError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, CantineError> {
            Ok(self.delete_returns)
        }
    }

    #[tokio::test]
    async fn should_create_classe() {
        let usecase = CreateClasseUseCase {
            classes: MockClasseRepo {
                classe: None,
                delete_returns: false,
            },
        };
        let classe = usecase
            .execute(CreateClasseInput {
                nom: "6eme A".into(),
                niveau: "College".into(),
            })
            .await
            .unwrap();
        assert_eq!(classe.nom, "6eme A");
    }

    #[tokio::test]
    async fn should_reject_blank_nom() {
        let usecase = CreateClasseUseCase {
            classes: MockClasseRepo {
                classe: None,
                delete_returns: false,
            },
        };
        let result = usecase
            .execute(CreateClasseInput {
                nom: "   ".into(),
                niveau: String::new(),
            })
            .await;
        assert!(matches!(result, Err(CantineError::MissingData)));
    }

    #[tokio::test]
    async fn should_return_not_found_on_get_missing() {
        let usecase = GetClasseUseCase {
            classes: MockClasseRepo {
                classe: None,
                delete_returns: false,
            },
        };
        let result = usecase.execute(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CantineError::ClasseNotFound)));
    }

    #[tokio::test]
    async fn should_return_not_found_on_delete_missing() {
        let usecase = DeleteClasseUseCase {
            classes: MockClasseRepo {
                classe: None,
                delete_returns: false,
            },
        };
        let result = usecase.execute(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CantineError::ClasseNotFound)));
    }
}
