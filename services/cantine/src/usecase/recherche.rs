use cantine_domain::pagination::PageRequest;

use crate::domain::repository::{EleveRepository, FactureRepository, MenuRepository};
use crate::domain::types::{
    Acteur, Eleve, EleveFiltre, Facture, FactureFiltre, Menu, MenuFiltre,
};
use crate::error::CantineError;

/// Minimum query length; shorter queries return empty result sets rather
/// than an error.
const LONGUEUR_MIN: usize = 2;

const LIMITE_PAR_CATEGORIE: u32 = 10;

#[derive(Debug, Default)]
pub struct RechercheResultats {
    pub eleves: Vec<Eleve>,
    pub menus: Vec<Menu>,
    pub factures: Vec<Facture>,
}

/// Global search. Students are admin-only; menus and invoices are visible
/// to any actor.
pub struct RechercheGlobaleUseCase<E: EleveRepository, M: MenuRepository, F: FactureRepository> {
    pub eleves: E,
    pub menus: M,
    pub factures: F,
}

impl<E: EleveRepository, M: MenuRepository, F: FactureRepository>
    RechercheGlobaleUseCase<E, M, F>
{
    pub async fn execute(
        &self,
        acteur: &Acteur,
        q: &str,
    ) -> Result<RechercheResultats, CantineError> {
        let q = q.trim();
        if q.len() < LONGUEUR_MIN {
            return Ok(RechercheResultats::default());
        }
        let page = PageRequest {
            per_page: LIMITE_PAR_CATEGORIE,
            page: 1,
        };

        let eleves = if acteur.est_admin() {
            self.eleves
                .list(
                    EleveFiltre {
                        recherche: Some(q.to_owned()),
                        ..Default::default()
                    },
                    page,
                )
                .await?
        } else {
            vec![]
        };

        let menus = self
            .menus
            .list(
                MenuFiltre {
                    recherche: Some(q.to_owned()),
                    ..Default::default()
                },
                page,
            )
            .await?;

        let factures = self
            .factures
            .list(
                FactureFiltre {
                    recherche: Some(q.to_owned()),
                    ..Default::default()
                },
                page,
            )
            .await?;

        Ok(RechercheResultats {
            eleves,
            menus,
            factures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use cantine_domain::role::Role;

    use crate::domain::types::Profil;

    struct MockEleveRepo;

    impl EleveRepository for MockEleveRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Eleve>, CantineError> {
            Ok(None)
        }
        async fn list(
            &self,
            filtre: EleveFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Eleve>, CantineError> {
            assert!(filtre.recherche.is_some());
            let now = Utc::now();
            Ok(vec![Eleve {
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
            }])
        }
        async fn list_actifs(&self) -> Result<Vec<Eleve>, CantineError> {
            Ok(vec![])
        }
        async fn list_tous(&self) -> Result<Vec<Eleve>, CantineError> {
            Ok(vec![])
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
            Ok(false)
        }
    }

    struct MockMenuRepo;

    impl MenuRepository for MockMenuRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Menu>, CantineError> {
            Ok(None)
        }
        async fn find_by_date(&self, _date: NaiveDate) -> Result<Option<Menu>, CantineError> {
            Ok(None)
        }
        async fn list(
            &self,
            _filtre: MenuFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Menu>, CantineError> {
            let now = Utc::now();
            Ok(vec![Menu {
                id: Uuid::now_v7(),
                date: now.date_naive(),
                jour_semaine: "LUNDI".into(),
                plat_principal: "Riz au poisson".into(),
                accompagnement: String::new(),
                dessert: String::new(),
                disponible: true,
                notes: String::new(),
                created_at: now,
                updated_at: now,
            }])
        }
        async fn list_periode(
            &self,
            _debut: NaiveDate,
            _fin: NaiveDate,
        ) -> Result<Vec<Menu>, CantineError> {
            Ok(vec![])
        }
        async fn create(&self, _menu: &Menu) -> Result<(), CantineError> {
            Ok(())
        }
        async fn update(&self, _menu: &Menu) -> Result<(), CantineError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, CantineError> {
            Ok(false)
        }
    }

    struct MockFactureRepo;

    impl FactureRepository for MockFactureRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Facture>, CantineError> {
            Ok(None)
        }
        async fn list(
            &self,
            _filtre: FactureFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Facture>, CantineError> {
            Ok(vec![])
        }
        async fn create(&self, facture: &Facture) -> Result<Facture, CantineError> {
            Ok(facture.clone())
        }
        async fn update(&self, _facture: &Facture) -> Result<(), CantineError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, CantineError> {
            Ok(false)
        }
        async fn count_en_attente(&self, _created_by: Uuid) -> Result<u64, CantineError> {
            Ok(0)
        }
        async fn somme_montants(
            &self,
            _annee: i32,
            _mois: u8,
        ) -> Result<rust_decimal::Decimal, CantineError> {
            Ok(rust_decimal::Decimal::ZERO)
        }
    }

    fn acteur(role: Role) -> Acteur {
        let profil = Profil {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            role,
            telephone: String::new(),
            entreprise: String::new(),
            actif: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        match role {
            Role::Admin => Acteur::Admin(profil),
            Role::Prestataire => Acteur::Prestataire(profil),
        }
    }

    fn usecase() -> RechercheGlobaleUseCase<MockEleveRepo, MockMenuRepo, MockFactureRepo> {
        RechercheGlobaleUseCase {
            eleves: MockEleveRepo,
            menus: MockMenuRepo,
            factures: MockFactureRepo,
        }
    }

    #[tokio::test]
    async fn should_return_empty_results_for_short_query() {
        let resultats = usecase().execute(&acteur(Role::Admin), "a").await.unwrap();
        assert!(resultats.eleves.is_empty());
        assert!(resultats.menus.is_empty());
        assert!(resultats.factures.is_empty());
    }

    #[tokio::test]
    async fn should_include_eleves_for_admin() {
        let resultats = usecase()
            .execute(&acteur(Role::Admin), "diallo")
            .await
            .unwrap();
        assert_eq!(resultats.eleves.len(), 1);
        assert_eq!(resultats.menus.len(), 1);
    }

    #[tokio::test]
    async fn should_hide_eleves_from_prestataire() {
        let resultats = usecase()
            .execute(&acteur(Role::Prestataire), "diallo")
            .await
            .unwrap();
        assert!(resultats.eleves.is_empty());
        assert_eq!(resultats.menus.len(), 1);
    }
}
