use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use cantine_domain::calendrier::mois_bornes;
use cantine_domain::pagination::PageRequest;

use crate::domain::repository::{EleveRepository, MenuRepository, RepasRepository};
use crate::domain::types::{Eleve, Menu, Repas, RepasFiltre, RepasParEleve, RepasParJour};
use crate::error::CantineError;

// ── ElevesAMarquer ───────────────────────────────────────────────────────────

/// Attendance-marking context for a date.
pub struct MarquageContexte {
    pub eleves: Vec<Eleve>,
    pub menu: Option<Menu>,
    /// Students that already have a meal for the date.
    pub deja_marques: Vec<Uuid>,
}

/// Students eligible for attendance marking on a date: active students
/// enrolled for that month, falling back to all active students when no
/// enrollment exists yet — enrollment is advisory, not a hard filter, so
/// the system stays usable before enrollment data is entered.
pub struct ElevesAMarquerUseCase<E: EleveRepository, R: RepasRepository, M: MenuRepository> {
    pub eleves: E,
    pub repas: R,
    pub menus: M,
}

impl<E: EleveRepository, R: RepasRepository, M: MenuRepository> ElevesAMarquerUseCase<E, R, M> {
    pub async fn execute(&self, date: NaiveDate) -> Result<MarquageContexte, CantineError> {
        use chrono::Datelike;

        let mut eleves = self
            .eleves
            .list_inscrits(date.year(), date.month() as u8)
            .await?;
        if eleves.is_empty() {
            eleves = self.eleves.list_actifs().await?;
        }
        let menu = self.menus.find_by_date(date).await?;
        let deja_marques = self.repas.eleve_ids_pour_date(date).await?;
        Ok(MarquageContexte {
            eleves,
            menu,
            deja_marques,
        })
    }
}

// ── MarquerRepasMultiples ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarquageIgnoreRaison {
    DejaMarque,
    EleveInconnu,
    EleveInactif,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarquageIgnore {
    pub eleve_id: Uuid,
    pub raison: MarquageIgnoreRaison,
}

#[derive(Debug, Serialize)]
pub struct MarquageResultat {
    pub repas_crees: u32,
    pub ignores: Vec<MarquageIgnore>,
}

pub struct MarquerRepasMultiplesInput {
    pub date: NaiveDate,
    pub eleve_ids: Vec<Uuid>,
}

/// Bulk attendance recorder.
///
/// For each id referring to an active student with no meal on the date,
/// creates one meal record linked to that date's menu — or to no menu at
/// all when none is defined, recording attendance over menu completeness.
/// Duplicates and unknown/inactive ids are skipped and reported, never
/// failing the whole batch. The insert itself is insert-if-absent, so a
/// concurrent duplicate submission also degrades to a skip.
pub struct MarquerRepasMultiplesUseCase<E: EleveRepository, R: RepasRepository, M: MenuRepository>
{
    pub eleves: E,
    pub repas: R,
    pub menus: M,
}

impl<E: EleveRepository, R: RepasRepository, M: MenuRepository>
    MarquerRepasMultiplesUseCase<E, R, M>
{
    pub async fn execute(
        &self,
        acting_user: Uuid,
        input: MarquerRepasMultiplesInput,
    ) -> Result<MarquageResultat, CantineError> {
        if input.eleve_ids.is_empty() {
            return Err(CantineError::MissingData);
        }

        let menu = self.menus.find_by_date(input.date).await?;
        let menu_id = menu.map(|m| m.id);

        let mut repas_crees = 0;
        let mut ignores = Vec::new();

        for eleve_id in input.eleve_ids {
            let eleve = match self.eleves.find_by_id(eleve_id).await? {
                Some(e) => e,
                None => {
                    ignores.push(MarquageIgnore {
                        eleve_id,
                        raison: MarquageIgnoreRaison::EleveInconnu,
                    });
                    continue;
                }
            };
            if !eleve.actif {
                ignores.push(MarquageIgnore {
                    eleve_id,
                    raison: MarquageIgnoreRaison::EleveInactif,
                });
                continue;
            }

            let repas = Repas {
                id: Uuid::now_v7(),
                eleve_id,
                menu_id,
                date: input.date,
                note: String::new(),
                created_at: Utc::now(),
                created_by: Some(acting_user),
            };
            if self.repas.insert_if_absent(&repas).await? {
                repas_crees += 1;
            } else {
                ignores.push(MarquageIgnore {
                    eleve_id,
                    raison: MarquageIgnoreRaison::DejaMarque,
                });
            }
        }

        Ok(MarquageResultat {
            repas_crees,
            ignores,
        })
    }
}

// ── CRUD ─────────────────────────────────────────────────────────────────────

pub struct GetRepasUseCase<R: RepasRepository> {
    pub repas: R,
}

impl<R: RepasRepository> GetRepasUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Repas, CantineError> {
        self.repas
            .find_by_id(id)
            .await?
            .ok_or(CantineError::RepasNotFound)
    }
}

pub struct ListRepasUseCase<R: RepasRepository> {
    pub repas: R,
}

impl<R: RepasRepository> ListRepasUseCase<R> {
    pub async fn execute(
        &self,
        filtre: RepasFiltre,
        page: PageRequest,
    ) -> Result<Vec<Repas>, CantineError> {
        self.repas.list(filtre, page).await
    }
}

pub struct CreateRepasInput {
    pub eleve_id: Uuid,
    pub date: NaiveDate,
    pub note: String,
}

/// Direct single-meal create (API parity). The menu link is resolved from
/// the date, like the bulk recorder; a duplicate (eleve, date) is a
/// conflict.
pub struct CreateRepasUseCase<E: EleveRepository, R: RepasRepository, M: MenuRepository> {
    pub eleves: E,
    pub repas: R,
    pub menus: M,
}

impl<E: EleveRepository, R: RepasRepository, M: MenuRepository> CreateRepasUseCase<E, R, M> {
    pub async fn execute(
        &self,
        acting_user: Uuid,
        input: CreateRepasInput,
    ) -> Result<Repas, CantineError> {
        self.eleves
            .find_by_id(input.eleve_id)
            .await?
            .ok_or(CantineError::EleveNotFound)?;
        let menu_id = self.menus.find_by_date(input.date).await?.map(|m| m.id);
        let repas = Repas {
            id: Uuid::now_v7(),
            eleve_id: input.eleve_id,
            menu_id,
            date: input.date,
            note: input.note,
            created_at: Utc::now(),
            created_by: Some(acting_user),
        };
        self.repas.create(&repas).await?;
        Ok(repas)
    }
}

#[derive(Default)]
pub struct UpdateRepasInput {
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

pub struct UpdateRepasUseCase<R: RepasRepository, M: MenuRepository> {
    pub repas: R,
    pub menus: M,
}

impl<R: RepasRepository, M: MenuRepository> UpdateRepasUseCase<R, M> {
    pub async fn execute(&self, id: Uuid, input: UpdateRepasInput) -> Result<Repas, CantineError> {
        let mut repas = self
            .repas
            .find_by_id(id)
            .await?
            .ok_or(CantineError::RepasNotFound)?;
        if let Some(date) = input.date {
            if date != repas.date {
                repas.date = date;
                // The menu link follows the date.
                repas.menu_id = self.menus.find_by_date(date).await?.map(|m| m.id);
            }
        }
        if let Some(note) = input.note {
            repas.note = note;
        }
        self.repas.update(&repas).await?;
        Ok(repas)
    }
}

pub struct DeleteRepasUseCase<R: RepasRepository> {
    pub repas: R,
}

impl<R: RepasRepository> DeleteRepasUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), CantineError> {
        let deleted = self.repas.delete(id).await?;
        if !deleted {
            return Err(CantineError::RepasNotFound);
        }
        Ok(())
    }
}

// ── Statistiques ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct StatistiquesRepas {
    pub total: u64,
    pub par_jour: Vec<RepasParJour>,
    pub par_eleve: Vec<RepasParEleve>,
}

pub struct StatistiquesRepasUseCase<R: RepasRepository> {
    pub repas: R,
}

impl<R: RepasRepository> StatistiquesRepasUseCase<R> {
    pub async fn execute(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<StatistiquesRepas, CantineError> {
        // Open-ended ranges fall back to sentinel bounds the storage layer
        // can index on.
        let debut =
            date_from.unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date"));
        let fin =
            date_to.unwrap_or_else(|| NaiveDate::from_ymd_opt(9999, 12, 31).expect("valid date"));
        Ok(StatistiquesRepas {
            total: self.repas.count_periode(debut, fin).await?,
            par_jour: self.repas.count_par_jour(debut, fin).await?,
            par_eleve: self.repas.count_par_eleve(debut, fin, 10).await?,
        })
    }
}

// ── Décomptes ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct DecompteJournalier {
    pub date: NaiveDate,
    pub repas: Vec<Repas>,
    pub nombre_repas: u64,
    pub eleves_servis: u64,
    pub menu: Option<Menu>,
}

pub struct DecompteJournalierUseCase<R: RepasRepository, M: MenuRepository> {
    pub repas: R,
    pub menus: M,
}

impl<R: RepasRepository, M: MenuRepository> DecompteJournalierUseCase<R, M> {
    pub async fn execute(&self, date: NaiveDate) -> Result<DecompteJournalier, CantineError> {
        let filtre = RepasFiltre {
            date: Some(date),
            ..Default::default()
        };
        let repas = self
            .repas
            .list(filtre, PageRequest { per_page: 100, page: 1 })
            .await?;
        Ok(DecompteJournalier {
            date,
            nombre_repas: self.repas.count_periode(date, date).await?,
            eleves_servis: self.repas.eleves_servis(date, date).await?,
            menu: self.menus.find_by_date(date).await?,
            repas,
        })
    }
}

#[derive(Debug)]
pub struct DecompteMensuel {
    pub annee: i32,
    pub mois: u8,
    pub nombre_repas: u64,
    pub nombre_jours_travail: u64,
    pub eleves_servis: u64,
    pub repas_par_jour: Vec<RepasParJour>,
}

pub struct DecompteMensuelUseCase<R: RepasRepository> {
    pub repas: R,
}

impl<R: RepasRepository> DecompteMensuelUseCase<R> {
    pub async fn execute(&self, annee: i32, mois: u8) -> Result<DecompteMensuel, CantineError> {
        let (debut, fin) = mois_bornes(annee, mois).ok_or(CantineError::MoisInvalide)?;
        Ok(DecompteMensuel {
            annee,
            mois,
            nombre_repas: self.repas.count_periode(debut, fin).await?,
            nombre_jours_travail: self.repas.jours_travail(debut, fin).await?,
            eleves_servis: self.repas.eleves_servis(debut, fin).await?,
            repas_par_jour: self.repas.count_par_jour(debut, fin).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use crate::domain::types::{EleveFiltre, MenuFiltre, RapportLigne};

    struct MockEleveRepo {
        eleves: Vec<Eleve>,
        inscrits: Vec<Eleve>,
    }

    impl EleveRepository for MockEleveRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Eleve>, CantineError> {
            Ok(self.eleves.iter().find(|e| e.id == id).cloned())
        }
        async fn list(
            &self,
            _filtre: EleveFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Eleve>, CantineError> {
            Ok(self.eleves.clone())
        }
        async fn list_actifs(&self) -> Result<Vec<Eleve>, CantineError> {
            Ok(self.eleves.iter().filter(|e| e.actif).cloned().collect())
        }
        async fn list_tous(&self) -> Result<Vec<Eleve>, CantineError> {
            Ok(self.eleves.clone())
        }
        async fn list_inscrits(&self, _annee: i32, _mois: u8) -> Result<Vec<Eleve>, CantineError> {
            Ok(self.inscrits.clone())
        }
        async fn count_actifs(&self) -> Result<u64, CantineError> {
            Ok(self.eleves.iter().filter(|e| e.actif).count() as u64)
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

    #[derive(Default)]
    struct MockRepasRepo {
        existing: Mutex<HashSet<(Uuid, NaiveDate)>>,
        created: Mutex<Vec<Repas>>,
    }

    impl RepasRepository for MockRepasRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Repas>, CantineError> {
            Ok(None)
        }
        async fn list(
            &self,
            _filtre: RepasFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Repas>, CantineError> {
            Ok(vec![])
        }
        async fn insert_if_absent(&self, repas: &Repas) -> Result<bool, CantineError> {
            let inserted = self
                .existing
                .lock()
                .unwrap()
                .insert((repas.eleve_id, repas.date));
            if inserted {
                self.created.lock().unwrap().push(repas.clone());
            }
            Ok(inserted)
        }
        async fn create(&self, repas: &Repas) -> Result<(), CantineError> {
            if !self.insert_if_absent(repas).await? {
                return Err(CantineError::RepasDejaExistant);
            }
            Ok(())
        }
        async fn update(&self, _repas: &Repas) -> Result<(), CantineError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, CantineError> {
            Ok(false)
        }
        async fn eleve_ids_pour_date(&self, date: NaiveDate) -> Result<Vec<Uuid>, CantineError> {
            Ok(self
                .existing
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, d)| *d == date)
                .map(|(id, _)| *id)
                .collect())
        }
        async fn count_periode(
            &self,
            _debut: NaiveDate,
            _fin: NaiveDate,
        ) -> Result<u64, CantineError> {
            Ok(self.existing.lock().unwrap().len() as u64)
        }
        async fn count_par_jour(
            &self,
            _debut: NaiveDate,
            _fin: NaiveDate,
        ) -> Result<Vec<RepasParJour>, CantineError> {
            Ok(vec![])
        }
        async fn count_par_eleve(
            &self,
            _debut: NaiveDate,
            _fin: NaiveDate,
            _limite: u64,
        ) -> Result<Vec<RepasParEleve>, CantineError> {
            Ok(vec![])
        }
        async fn jours_travail(
            &self,
            _debut: NaiveDate,
            _fin: NaiveDate,
        ) -> Result<u64, CantineError> {
            Ok(0)
        }
        async fn eleves_servis(
            &self,
            _debut: NaiveDate,
            _fin: NaiveDate,
        ) -> Result<u64, CantineError> {
            Ok(0)
        }
        async fn lignes_rapport(
            &self,
            _debut: NaiveDate,
            _fin: NaiveDate,
        ) -> Result<Vec<RapportLigne>, CantineError> {
            Ok(vec![])
        }
    }

    struct MockMenuRepo {
        menu: Option<Menu>,
    }

    impl MenuRepository for MockMenuRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Menu>, CantineError> {
            Ok(self.menu.clone())
        }
        async fn find_by_date(&self, _date: NaiveDate) -> Result<Option<Menu>, CantineError> {
            Ok(self.menu.clone())
        }
        async fn list(
            &self,
            _filtre: MenuFiltre,
            _page: PageRequest,
        ) -> Result<Vec<Menu>, CantineError> {
            Ok(vec![])
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

    fn eleve(actif: bool) -> Eleve {
        let now = Utc::now();
        Eleve {
            id: Uuid::now_v7(),
            prenom: "Awa".into(),
            nom: "Diallo".into(),
            classe_id: None,
            actif,
            telephone_parent: String::new(),
            email_parent: String::new(),
            photo: None,
            notes: String::new(),
            date_inscription: now.date_naive(),
            created_at: now,
            updated_at: now,
        }
    }

    fn menu(date: NaiveDate) -> Menu {
        let now = Utc::now();
        Menu {
            id: Uuid::now_v7(),
            date,
            jour_semaine: "LUNDI".into(),
            plat_principal: "Riz".into(),
            accompagnement: String::new(),
            dessert: String::new(),
            disponible: true,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn d(annee: i32, mois: u32, jour: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(annee, mois, jour).unwrap()
    }

    #[tokio::test]
    async fn should_create_one_repas_per_eleve() {
        let e1 = eleve(true);
        let e2 = eleve(true);
        let date = d(2024, 1, 1);
        let usecase = MarquerRepasMultiplesUseCase {
            eleves: MockEleveRepo {
                eleves: vec![e1.clone(), e2.clone()],
                inscrits: vec![],
            },
            repas: MockRepasRepo::default(),
            menus: MockMenuRepo {
                menu: Some(menu(date)),
            },
        };
        let result = usecase
            .execute(
                Uuid::now_v7(),
                MarquerRepasMultiplesInput {
                    date,
                    eleve_ids: vec![e1.id, e2.id],
                },
            )
            .await
            .unwrap();
        assert_eq!(result.repas_crees, 2);
        assert!(result.ignores.is_empty());

        let created = usecase.repas.created.lock().unwrap();
        assert!(created.iter().all(|r| r.menu_id.is_some()));
        assert!(created.iter().all(|r| r.created_by.is_some()));
    }

    #[tokio::test]
    async fn should_skip_duplicate_on_second_submission() {
        let e1 = eleve(true);
        let date = d(2024, 1, 1);
        let usecase = MarquerRepasMultiplesUseCase {
            eleves: MockEleveRepo {
                eleves: vec![e1.clone()],
                inscrits: vec![],
            },
            repas: MockRepasRepo::default(),
            menus: MockMenuRepo { menu: None },
        };
        let input = |ids: Vec<Uuid>| MarquerRepasMultiplesInput {
            date,
            eleve_ids: ids,
        };

        let first = usecase
            .execute(Uuid::now_v7(), input(vec![e1.id]))
            .await
            .unwrap();
        assert_eq!(first.repas_crees, 1);

        let second = usecase
            .execute(Uuid::now_v7(), input(vec![e1.id]))
            .await
            .unwrap();
        assert_eq!(second.repas_crees, 0);
        assert_eq!(second.ignores.len(), 1);
        assert_eq!(second.ignores[0].raison, MarquageIgnoreRaison::DejaMarque);

        // Exactly one record exists for the (eleve, date) pair.
        assert_eq!(usecase.repas.existing.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_record_without_menu_when_none_defined() {
        let e1 = eleve(true);
        let usecase = MarquerRepasMultiplesUseCase {
            eleves: MockEleveRepo {
                eleves: vec![e1.clone()],
                inscrits: vec![],
            },
            repas: MockRepasRepo::default(),
            menus: MockMenuRepo { menu: None },
        };
        let result = usecase
            .execute(
                Uuid::now_v7(),
                MarquerRepasMultiplesInput {
                    date: d(2024, 1, 1),
                    eleve_ids: vec![e1.id],
                },
            )
            .await
            .unwrap();
        assert_eq!(result.repas_crees, 1);

        let created = usecase.repas.created.lock().unwrap();
        assert_eq!(created[0].menu_id, None);
    }

    #[tokio::test]
    async fn should_skip_unknown_and_inactive_without_failing_batch() {
        let actif = eleve(true);
        let inactif = eleve(false);
        let inconnu = Uuid::now_v7();
        let usecase = MarquerRepasMultiplesUseCase {
            eleves: MockEleveRepo {
                eleves: vec![actif.clone(), inactif.clone()],
                inscrits: vec![],
            },
            repas: MockRepasRepo::default(),
            menus: MockMenuRepo { menu: None },
        };
        let result = usecase
            .execute(
                Uuid::now_v7(),
                MarquerRepasMultiplesInput {
                    date: d(2024, 1, 1),
                    eleve_ids: vec![actif.id, inactif.id, inconnu],
                },
            )
            .await
            .unwrap();
        assert_eq!(result.repas_crees, 1);
        assert_eq!(result.ignores.len(), 2);
        let raisons: Vec<_> = result.ignores.iter().map(|i| i.raison).collect();
        assert!(raisons.contains(&MarquageIgnoreRaison::EleveInactif));
        assert!(raisons.contains(&MarquageIgnoreRaison::EleveInconnu));
    }

    #[tokio::test]
    async fn should_reject_empty_batch() {
        let usecase = MarquerRepasMultiplesUseCase {
            eleves: MockEleveRepo {
                eleves: vec![],
                inscrits: vec![],
            },
            repas: MockRepasRepo::default(),
            menus: MockMenuRepo { menu: None },
        };
        let result = usecase
            .execute(
                Uuid::now_v7(),
                MarquerRepasMultiplesInput {
                    date: d(2024, 1, 1),
                    eleve_ids: vec![],
                },
            )
            .await;
        assert!(matches!(result, Err(CantineError::MissingData)));
    }

    #[tokio::test]
    async fn should_fall_back_to_all_active_without_enrollment() {
        let e1 = eleve(true);
        let e2 = eleve(false);
        let usecase = ElevesAMarquerUseCase {
            eleves: MockEleveRepo {
                eleves: vec![e1.clone(), e2],
                inscrits: vec![],
            },
            repas: MockRepasRepo::default(),
            menus: MockMenuRepo { menu: None },
        };
        let contexte = usecase.execute(d(2024, 1, 1)).await.unwrap();
        // Only the active student, via the fallback path.
        assert_eq!(contexte.eleves.len(), 1);
        assert_eq!(contexte.eleves[0].id, e1.id);
    }

    #[tokio::test]
    async fn should_prefer_enrolled_students_when_present() {
        let inscrit = eleve(true);
        let autre = eleve(true);
        let usecase = ElevesAMarquerUseCase {
            eleves: MockEleveRepo {
                eleves: vec![inscrit.clone(), autre],
                inscrits: vec![inscrit.clone()],
            },
            repas: MockRepasRepo::default(),
            menus: MockMenuRepo { menu: None },
        };
        let contexte = usecase.execute(d(2024, 1, 1)).await.unwrap();
        assert_eq!(contexte.eleves.len(), 1);
        assert_eq!(contexte.eleves[0].id, inscrit.id);
    }

    #[tokio::test]
    async fn should_reject_direct_duplicate_create() {
        let e1 = eleve(true);
        let date = d(2024, 1, 1);
        let usecase = CreateRepasUseCase {
            eleves: MockEleveRepo {
                eleves: vec![e1.clone()],
                inscrits: vec![],
            },
            repas: MockRepasRepo::default(),
            menus: MockMenuRepo { menu: None },
        };
        let input = || CreateRepasInput {
            eleve_id: e1.id,
            date,
            note: String::new(),
        };
        usecase.execute(Uuid::now_v7(), input()).await.unwrap();
        let result = usecase.execute(Uuid::now_v7(), input()).await;
        assert!(matches!(result, Err(CantineError::RepasDejaExistant)));
    }

    #[tokio::test]
    async fn should_reject_invalid_month_for_decompte_mensuel() {
        let usecase = DecompteMensuelUseCase {
            repas: MockRepasRepo::default(),
        };
        let result = usecase.execute(2024, 13).await;
        assert!(matches!(result, Err(CantineError::MoisInvalide)));
    }
}
