use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use cantine_domain::facture::{self, FactureStatut};
use cantine_domain::pagination::PageRequest;

use crate::domain::repository::FactureRepository;
use crate::domain::types::{Facture, FactureFiltre};
use crate::error::CantineError;

// ── CreateFacture ────────────────────────────────────────────────────────────

pub struct CreateFactureInput {
    /// None or blank → auto-assigned from the global sequence.
    pub numero: Option<String>,
    pub annee: i32,
    pub mois: u8,
    pub nombre_jours_travail: i32,
    pub nombre_repas_servis: i32,
    pub prix_unitaire_repas: Decimal,
    /// An explicit non-zero total wins; zero or absent is recomputed as
    /// nombre_repas_servis × prix_unitaire_repas.
    pub montant_total: Option<Decimal>,
    pub statut: Option<FactureStatut>,
    pub date_emission: Option<NaiveDate>,
    pub notes: String,
}

pub struct CreateFactureUseCase<R: FactureRepository> {
    pub factures: R,
}

impl<R: FactureRepository> CreateFactureUseCase<R> {
    pub async fn execute(
        &self,
        acting_user: Uuid,
        input: CreateFactureInput,
    ) -> Result<Facture, CantineError> {
        if !(1..=12).contains(&input.mois) {
            return Err(CantineError::MoisInvalide);
        }
        if input.nombre_repas_servis < 0 || input.prix_unitaire_repas < Decimal::ZERO {
            return Err(CantineError::MissingData);
        }

        let montant_total = match input.montant_total {
            Some(m) if !m.is_zero() => m,
            _ => facture::montant_total(input.nombre_repas_servis, input.prix_unitaire_repas),
        };

        let facture = Facture {
            id: Uuid::now_v7(),
            numero: input.numero.unwrap_or_default(),
            annee: input.annee,
            mois: input.mois,
            nombre_jours_travail: input.nombre_jours_travail,
            nombre_repas_servis: input.nombre_repas_servis,
            prix_unitaire_repas: input.prix_unitaire_repas,
            montant_total,
            statut: input.statut.unwrap_or_default(),
            date_emission: input
                .date_emission
                .unwrap_or_else(|| Utc::now().date_naive()),
            date_paiement: None,
            notes: input.notes,
            created_at: Utc::now(),
            created_by: Some(acting_user),
        };
        self.factures.create(&facture).await
    }
}

// ── GetFacture / ListFactures ────────────────────────────────────────────────

pub struct GetFactureUseCase<R: FactureRepository> {
    pub factures: R,
}

impl<R: FactureRepository> GetFactureUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Facture, CantineError> {
        self.factures
            .find_by_id(id)
            .await?
            .ok_or(CantineError::FactureNotFound)
    }
}

pub struct ListFacturesUseCase<R: FactureRepository> {
    pub factures: R,
}

impl<R: FactureRepository> ListFacturesUseCase<R> {
    pub async fn execute(
        &self,
        filtre: FactureFiltre,
        page: PageRequest,
    ) -> Result<Vec<Facture>, CantineError> {
        self.factures.list(filtre, page).await
    }
}

// ── UpdateFacture ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateFactureInput {
    pub nombre_jours_travail: Option<i32>,
    pub nombre_repas_servis: Option<i32>,
    pub prix_unitaire_repas: Option<Decimal>,
    /// Non-zero → explicit override; zero or absent → recomputed.
    pub montant_total: Option<Decimal>,
    pub statut: Option<FactureStatut>,
    pub date_emission: Option<NaiveDate>,
    pub date_paiement: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}

pub struct UpdateFactureUseCase<R: FactureRepository> {
    pub factures: R,
}

impl<R: FactureRepository> UpdateFactureUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateFactureInput,
    ) -> Result<Facture, CantineError> {
        let mut facture = self
            .factures
            .find_by_id(id)
            .await?
            .ok_or(CantineError::FactureNotFound)?;

        if let Some(statut) = input.statut {
            if !facture.statut.peut_passer_a(statut) {
                return Err(CantineError::TransitionInvalide);
            }
            facture.statut = statut;
        }
        if let Some(nombre_jours_travail) = input.nombre_jours_travail {
            facture.nombre_jours_travail = nombre_jours_travail;
        }
        if let Some(nombre_repas_servis) = input.nombre_repas_servis {
            if nombre_repas_servis < 0 {
                return Err(CantineError::MissingData);
            }
            facture.nombre_repas_servis = nombre_repas_servis;
        }
        if let Some(prix_unitaire_repas) = input.prix_unitaire_repas {
            if prix_unitaire_repas < Decimal::ZERO {
                return Err(CantineError::MissingData);
            }
            facture.prix_unitaire_repas = prix_unitaire_repas;
        }
        facture.montant_total = match input.montant_total {
            Some(m) if !m.is_zero() => m,
            _ => facture::montant_total(facture.nombre_repas_servis, facture.prix_unitaire_repas),
        };
        if let Some(date_emission) = input.date_emission {
            facture.date_emission = date_emission;
        }
        if let Some(date_paiement) = input.date_paiement {
            facture.date_paiement = date_paiement;
        }
        if let Some(notes) = input.notes {
            facture.notes = notes;
        }

        self.factures.update(&facture).await?;
        Ok(facture)
    }
}

// ── DeleteFacture ────────────────────────────────────────────────────────────

pub struct DeleteFactureUseCase<R: FactureRepository> {
    pub factures: R,
}

impl<R: FactureRepository> DeleteFactureUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), CantineError> {
        let deleted = self.factures.delete(id).await?;
        if !deleted {
            return Err(CantineError::FactureNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock honoring the FactureRepository numbering contract: blank numero
    /// → continue the global sequence from the most recently created row.
    #[derive(Default)]
    struct MockFactureRepo {
        stored: Mutex<Vec<Facture>>,
    }

    impl FactureRepository for MockFactureRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Facture>, CantineError> {
            Ok(self.stored.lock().unwrap().iter().find(|f| f.id == id).cloned())
        }
        async fn list(
            &self,
            _filtre: FactureFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Facture>, CantineError> {
            Ok(self.stored.lock().unwrap().clone())
        }
        async fn create(&self, facture: &Facture) -> Result<Facture, CantineError> {
            let mut stored = self.stored.lock().unwrap();
            let mut facture = facture.clone();
            if facture.numero.is_empty() {
                let dernier = stored.last().map(|f: &Facture| f.numero.as_str());
                facture.numero =
                    facture::prochain_numero(dernier, facture.annee, facture.mois);
            }
            if stored.iter().any(|f| f.numero == facture.numero) {
                return Err(CantineError::NumeroDejaExistant);
            }
            stored.push(facture.clone());
            Ok(facture)
        }
        async fn update(&self, facture: &Facture) -> Result<(), CantineError> {
            let mut stored = self.stored.lock().unwrap();
            if let Some(slot) = stored.iter_mut().find(|f| f.id == facture.id) {
                *slot = facture.clone();
            }
            Ok(())
        }
        async fn delete(&self, id: Uuid) -> Result<bool, CantineError> {
            let mut stored = self.stored.lock().unwrap();
            let avant = stored.len();
            stored.retain(|f| f.id != id);
            Ok(stored.len() < avant)
        }
        async fn count_en_attente(&self, _created_by: Uuid) -> Result<u64, CantineError> {
            Ok(0)
        }
        async fn somme_montants(&self, _annee: i32, _mois: u8) -> Result<Decimal, CantineError> {
            Ok(Decimal::ZERO)
        }
    }

    fn input(annee: i32, mois: u8) -> CreateFactureInput {
        CreateFactureInput {
            numero: None,
            annee,
            mois,
            nombre_jours_travail: 20,
            nombre_repas_servis: 120,
            prix_unitaire_repas: Decimal::new(50000, 2), // 500.00
            montant_total: None,
            statut: None,
            date_emission: None,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn should_compute_total_from_repas_and_prix() {
        let usecase = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        };
        let facture = usecase
            .execute(Uuid::now_v7(), input(2024, 1))
            .await
            .unwrap();
        assert_eq!(facture.montant_total, Decimal::new(6000000, 2)); // 60000.00
    }

    #[tokio::test]
    async fn should_recompute_total_when_passed_as_zero() {
        let usecase = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        };
        let mut create = input(2024, 1);
        create.montant_total = Some(Decimal::ZERO);
        let facture = usecase.execute(Uuid::now_v7(), create).await.unwrap();
        assert_eq!(facture.montant_total, Decimal::new(6000000, 2));
    }

    #[tokio::test]
    async fn should_keep_explicit_nonzero_total() {
        let usecase = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        };
        let mut create = input(2024, 1);
        create.montant_total = Some(Decimal::new(12345, 2));
        let facture = usecase.execute(Uuid::now_v7(), create).await.unwrap();
        assert_eq!(facture.montant_total, Decimal::new(12345, 2));
    }

    #[tokio::test]
    async fn should_number_invoices_in_creation_order_across_periods() {
        let usecase = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        };
        let user = Uuid::now_v7();
        let f1 = usecase.execute(user, input(2024, 1)).await.unwrap();
        let f2 = usecase.execute(user, input(2024, 1)).await.unwrap();
        // Different period, same global sequence.
        let f3 = usecase.execute(user, input(2024, 2)).await.unwrap();
        assert_eq!(f1.numero, "FAC-2024-01-0001");
        assert_eq!(f2.numero, "FAC-2024-01-0002");
        assert_eq!(f3.numero, "FAC-2024-02-0003");
    }

    #[tokio::test]
    async fn should_keep_explicit_numero() {
        let usecase = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        };
        let mut create = input(2024, 1);
        create.numero = Some("FAC-SPECIALE".into());
        let facture = usecase.execute(Uuid::now_v7(), create).await.unwrap();
        assert_eq!(facture.numero, "FAC-SPECIALE");
    }

    #[tokio::test]
    async fn should_default_to_brouillon() {
        let usecase = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        };
        let facture = usecase
            .execute(Uuid::now_v7(), input(2024, 1))
            .await
            .unwrap();
        assert_eq!(facture.statut, FactureStatut::Brouillon);
    }

    #[tokio::test]
    async fn should_reject_invalid_month() {
        let usecase = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        };
        let result = usecase.execute(Uuid::now_v7(), input(2024, 13)).await;
        assert!(matches!(result, Err(CantineError::MoisInvalide)));
    }

    #[tokio::test]
    async fn should_follow_statut_transitions() {
        let repo = MockFactureRepo::default();
        let created = CreateFactureUseCase { factures: repo }
            .execute(Uuid::now_v7(), input(2024, 1))
            .await
            .unwrap();

        let update = UpdateFactureUseCase {
            factures: MockFactureRepo {
                stored: Mutex::new(vec![created.clone()]),
            },
        };

        let envoyee = update
            .execute(
                created.id,
                UpdateFactureInput {
                    statut: Some(FactureStatut::Envoyee),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(envoyee.statut, FactureStatut::Envoyee);

        let payee = update
            .execute(
                created.id,
                UpdateFactureInput {
                    statut: Some(FactureStatut::Payee),
                    date_paiement: Some(Some(Utc::now().date_naive())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(payee.statut, FactureStatut::Payee);

        // PAYEE is terminal.
        let result = update
            .execute(
                created.id,
                UpdateFactureInput {
                    statut: Some(FactureStatut::Annulee),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(CantineError::TransitionInvalide)));
    }

    #[tokio::test]
    async fn should_recompute_total_on_update_of_inputs() {
        let created = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        }
        .execute(Uuid::now_v7(), input(2024, 1))
        .await
        .unwrap();

        let update = UpdateFactureUseCase {
            factures: MockFactureRepo {
                stored: Mutex::new(vec![created.clone()]),
            },
        };
        let updated = update
            .execute(
                created.id,
                UpdateFactureInput {
                    nombre_repas_servis: Some(100),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.montant_total, Decimal::new(5000000, 2)); // 50000.00
    }

    #[tokio::test]
    async fn should_conflict_on_duplicate_explicit_numero() {
        let usecase = CreateFactureUseCase {
            factures: MockFactureRepo::default(),
        };
        let mut create = input(2024, 1);
        create.numero = Some("FAC-2024-01-0001".into());
        usecase
            .execute(Uuid::now_v7(), CreateFactureInput {
                numero: Some("FAC-2024-01-0001".into()),
                ..input(2024, 1)
            })
            .await
            .unwrap();
        let result = usecase.execute(Uuid::now_v7(), create).await;
        assert!(matches!(result, Err(CantineError::NumeroDejaExistant)));
    }
}
