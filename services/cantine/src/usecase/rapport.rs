use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cantine_domain::calendrier::{PeriodeRapport, mois_bornes};

use crate::domain::repository::RepasRepository;
use crate::domain::types::RapportLigne;
use crate::error::CantineError;

/// Export format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormatExport {
    Pdf,
    Xlsx,
}

impl FormatExport {
    pub fn from_str_opt(v: &str) -> Option<Self> {
        match v {
            "PDF" => Some(Self::Pdf),
            "XLSX" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

/// Compiled report: one intermediate row list plus aggregate stats.
/// Every renderer consumes this same structure, so export formats can
/// differ only in presentation, never in content.
#[derive(Debug)]
pub struct Rapport {
    pub titre: String,
    pub nom_fichier: String,
    pub lignes: Vec<RapportLigne>,
    pub stats: Vec<(String, String)>,
}

pub struct RapportParams {
    pub periode: PeriodeRapport,
    /// Reference date for daily/weekly reports; defaults to today.
    pub date_reference: Option<NaiveDate>,
    /// Year/month for monthly reports; default from the reference date.
    pub annee: Option<i32>,
    pub mois: Option<u8>,
}

pub struct BuildRapportUseCase<R: RepasRepository> {
    pub repas: R,
}

impl<R: RepasRepository> BuildRapportUseCase<R> {
    pub async fn execute(
        &self,
        params: RapportParams,
        aujourd_hui: NaiveDate,
    ) -> Result<Rapport, CantineError> {
        use chrono::Datelike;

        let reference = params.date_reference.unwrap_or(aujourd_hui);
        let (debut, fin) = match params.periode {
            PeriodeRapport::Mensuel => {
                let annee = params.annee.unwrap_or(aujourd_hui.year());
                let mois = params.mois.unwrap_or(aujourd_hui.month() as u8);
                mois_bornes(annee, mois).ok_or(CantineError::MoisInvalide)?
            }
            periode => periode.bornes(reference),
        };

        let lignes = self.repas.lignes_rapport(debut, fin).await?;

        let mut stats = vec![(
            "Nombre total de repas".to_owned(),
            lignes.len().to_string(),
        )];
        if params.periode == PeriodeRapport::Mensuel {
            let eleves_servis = self.repas.eleves_servis(debut, fin).await?;
            stats.push(("Nombre d'élèves servis".to_owned(), eleves_servis.to_string()));
        }

        let (titre, nom_fichier) = match params.periode {
            PeriodeRapport::Journalier => (
                format!("Rapport Journalier - {}", debut.format("%d/%m/%Y")),
                format!("rapport_journalier_{}", debut.format("%Y%m%d")),
            ),
            PeriodeRapport::Hebdomadaire => (
                format!(
                    "Rapport Hebdomadaire - {} au {}",
                    debut.format("%d/%m/%Y"),
                    fin.format("%d/%m/%Y")
                ),
                format!(
                    "rapport_hebdomadaire_{}_{}",
                    debut.format("%Y%m%d"),
                    fin.format("%Y%m%d")
                ),
            ),
            PeriodeRapport::Mensuel => (
                format!("Rapport Mensuel - {}/{}", debut.month(), debut.year()),
                format!("rapport_mensuel_{}", debut.format("%Y_%m")),
            ),
        };

        Ok(Rapport {
            titre,
            nom_fichier,
            lignes,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use uuid::Uuid;

    use cantine_domain::pagination::PageRequest;

    use crate::domain::types::{Repas, RepasFiltre, RepasParEleve, RepasParJour};

    struct MockRepasRepo {
        lignes: Vec<RapportLigne>,
        bornes_vues: Mutex<Option<(NaiveDate, NaiveDate)>>,
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
        async fn insert_if_absent(&self, _repas: &Repas) -> Result<bool, CantineError> {
            Ok(false)
        }
        async fn create(&self, _repas: &Repas) -> Result<(), CantineError> {
            Ok(())
        }
        async fn update(&self, _repas: &Repas) -> Result<(), CantineError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, CantineError> {
            Ok(false)
        }
        async fn eleve_ids_pour_date(&self, _date: NaiveDate) -> Result<Vec<Uuid>, CantineError> {
            Ok(vec![])
        }
        async fn count_periode(
            &self,
            _debut: NaiveDate,
            _fin: NaiveDate,
        ) -> Result<u64, CantineError> {
            Ok(self.lignes.len() as u64)
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
            Ok(7)
        }
        async fn lignes_rapport(
            &self,
            debut: NaiveDate,
            fin: NaiveDate,
        ) -> Result<Vec<RapportLigne>, CantineError> {
            *self.bornes_vues.lock().unwrap() = Some((debut, fin));
            Ok(self.lignes.clone())
        }
    }

    fn d(annee: i32, mois: u32, jour: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(annee, mois, jour).unwrap()
    }

    fn ligne(date: NaiveDate) -> RapportLigne {
        RapportLigne {
            date,
            eleve: "Awa Diallo".into(),
            classe: "6eme A".into(),
            plat_principal: "Riz".into(),
            menu_complet: "Riz - Salade".into(),
        }
    }

    fn repo(lignes: Vec<RapportLigne>) -> MockRepasRepo {
        MockRepasRepo {
            lignes,
            bornes_vues: Mutex::new(None),
        }
    }

    #[tokio::test]
    async fn should_build_daily_report() {
        let usecase = BuildRapportUseCase {
            repas: repo(vec![ligne(d(2024, 5, 15))]),
        };
        let rapport = usecase
            .execute(
                RapportParams {
                    periode: PeriodeRapport::Journalier,
                    date_reference: Some(d(2024, 5, 15)),
                    annee: None,
                    mois: None,
                },
                d(2024, 5, 20),
            )
            .await
            .unwrap();
        assert_eq!(rapport.titre, "Rapport Journalier - 15/05/2024");
        assert_eq!(rapport.nom_fichier, "rapport_journalier_20240515");
        assert_eq!(rapport.lignes.len(), 1);
        assert_eq!(rapport.stats[0].1, "1");
        assert_eq!(
            *usecase.repas.bornes_vues.lock().unwrap(),
            Some((d(2024, 5, 15), d(2024, 5, 15)))
        );
    }

    #[tokio::test]
    async fn should_build_weekly_report_over_monday_to_sunday() {
        let usecase = BuildRapportUseCase { repas: repo(vec![]) };
        // 2024-05-15 is a Wednesday.
        let rapport = usecase
            .execute(
                RapportParams {
                    periode: PeriodeRapport::Hebdomadaire,
                    date_reference: Some(d(2024, 5, 15)),
                    annee: None,
                    mois: None,
                },
                d(2024, 5, 20),
            )
            .await
            .unwrap();
        assert_eq!(
            rapport.titre,
            "Rapport Hebdomadaire - 13/05/2024 au 19/05/2024"
        );
        assert_eq!(
            *usecase.repas.bornes_vues.lock().unwrap(),
            Some((d(2024, 5, 13), d(2024, 5, 19)))
        );
    }

    #[tokio::test]
    async fn should_build_monthly_report_with_eleves_servis() {
        let usecase = BuildRapportUseCase { repas: repo(vec![]) };
        let rapport = usecase
            .execute(
                RapportParams {
                    periode: PeriodeRapport::Mensuel,
                    date_reference: None,
                    annee: Some(2024),
                    mois: Some(2),
                },
                d(2024, 5, 20),
            )
            .await
            .unwrap();
        assert_eq!(rapport.titre, "Rapport Mensuel - 2/2024");
        assert_eq!(rapport.nom_fichier, "rapport_mensuel_2024_02");
        assert_eq!(rapport.stats.len(), 2);
        assert_eq!(rapport.stats[1].1, "7");
        assert_eq!(
            *usecase.repas.bornes_vues.lock().unwrap(),
            Some((d(2024, 2, 1), d(2024, 2, 29)))
        );
    }

    #[tokio::test]
    async fn should_default_monthly_to_current_month() {
        let usecase = BuildRapportUseCase { repas: repo(vec![]) };
        let rapport = usecase
            .execute(
                RapportParams {
                    periode: PeriodeRapport::Mensuel,
                    date_reference: None,
                    annee: None,
                    mois: None,
                },
                d(2024, 5, 20),
            )
            .await
            .unwrap();
        assert_eq!(rapport.nom_fichier, "rapport_mensuel_2024_05");
    }

    #[test]
    fn should_parse_format_export() {
        assert_eq!(FormatExport::from_str_opt("PDF"), Some(FormatExport::Pdf));
        assert_eq!(FormatExport::from_str_opt("XLSX"), Some(FormatExport::Xlsx));
        assert_eq!(FormatExport::from_str_opt("DOCX"), None);
    }
}
