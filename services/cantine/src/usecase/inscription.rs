use chrono::Utc;
use uuid::Uuid;

use cantine_domain::pagination::PageRequest;

use crate::domain::repository::{EleveRepository, InscriptionRepository};
use crate::domain::types::{InscriptionFiltre, InscriptionMensuelle};
use crate::error::CantineError;

// ── CreateInscription ────────────────────────────────────────────────────────

pub struct CreateInscriptionInput {
    pub eleve_id: Uuid,
    pub annee: i32,
    pub mois: u8,
    pub inscrit: bool,
    pub notes: String,
}

pub struct CreateInscriptionUseCase<I: InscriptionRepository, E: EleveRepository> {
    pub inscriptions: I,
    pub eleves: E,
}

impl<I: InscriptionRepository, E: EleveRepository> CreateInscriptionUseCase<I, E> {
    pub async fn execute(
        &self,
        acting_user: Uuid,
        input: CreateInscriptionInput,
    ) -> Result<InscriptionMensuelle, CantineError> {
        if !(1..=12).contains(&input.mois) {
            return Err(CantineError::MoisInvalide);
        }
        self.eleves
            .find_by_id(input.eleve_id)
            .await?
            .ok_or(CantineError::EleveNotFound)?;

        let inscription = InscriptionMensuelle {
            id: Uuid::now_v7(),
            eleve_id: input.eleve_id,
            annee: input.annee,
            mois: input.mois,
            inscrit: input.inscrit,
            notes: input.notes,
            created_at: Utc::now(),
            created_by: Some(acting_user),
        };
        self.inscriptions.create(&inscription).await?;
        Ok(inscription)
    }
}

// ── ListInscriptions / GetInscription ────────────────────────────────────────

pub struct ListInscriptionsUseCase<I: InscriptionRepository> {
    pub inscriptions: I,
}

impl<I: InscriptionRepository> ListInscriptionsUseCase<I> {
    pub async fn execute(
        &self,
        filtre: InscriptionFiltre,
        page: PageRequest,
    ) -> Result<Vec<InscriptionMensuelle>, CantineError> {
        if let Some(mois) = filtre.mois {
            if !(1..=12).contains(&mois) {
                return Err(CantineError::MoisInvalide);
            }
        }
        self.inscriptions.list(filtre, page).await
    }
}

pub struct GetInscriptionUseCase<I: InscriptionRepository> {
    pub inscriptions: I,
}

impl<I: InscriptionRepository> GetInscriptionUseCase<I> {
    pub async fn execute(&self, id: Uuid) -> Result<InscriptionMensuelle, CantineError> {
        self.inscriptions
            .find_by_id(id)
            .await?
            .ok_or(CantineError::InscriptionNotFound)
    }
}

// ── UpdateInscription ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateInscriptionInput {
    pub inscrit: Option<bool>,
    pub notes: Option<String>,
}

pub struct UpdateInscriptionUseCase<I: InscriptionRepository> {
    pub inscriptions: I,
}

impl<I: InscriptionRepository> UpdateInscriptionUseCase<I> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateInscriptionInput,
    ) -> Result<InscriptionMensuelle, CantineError> {
        let mut inscription = self
            .inscriptions
            .find_by_id(id)
            .await?
            .ok_or(CantineError::InscriptionNotFound)?;
        if let Some(inscrit) = input.inscrit {
            inscription.inscrit = inscrit;
        }
        if let Some(notes) = input.notes {
            inscription.notes = notes;
        }
        self.inscriptions.update(&inscription).await?;
        Ok(inscription)
    }
}

// ── DeleteInscription ────────────────────────────────────────────────────────

pub struct DeleteInscriptionUseCase<I: InscriptionRepository> {
    pub inscriptions: I,
}

impl<I: InscriptionRepository> DeleteInscriptionUseCase<I> {
    pub async fn execute(&self, id: Uuid) -> Result<(), CantineError> {
        let deleted = self.inscriptions.delete(id).await?;
        if !deleted {
            return Err(CantineError::InscriptionNotFound);
        }
        Ok(())
    }
}
