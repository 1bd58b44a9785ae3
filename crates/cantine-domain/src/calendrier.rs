//! Calendar helpers: weekday labels, month bounds, report periods.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// French weekday label for a date, independent of any locale setting.
pub fn jour_semaine_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "LUNDI",
        Weekday::Tue => "MARDI",
        Weekday::Wed => "MERCREDI",
        Weekday::Thu => "JEUDI",
        Weekday::Fri => "VENDREDI",
        Weekday::Sat => "SAMEDI",
        Weekday::Sun => "DIMANCHE",
    }
}

/// First and last day of a month. `None` for an invalid month.
pub fn mois_bornes(annee: i32, mois: u8) -> Option<(NaiveDate, NaiveDate)> {
    let premier = NaiveDate::from_ymd_opt(annee, mois as u32, 1)?;
    let suivant = if mois == 12 {
        NaiveDate::from_ymd_opt(annee + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(annee, mois as u32 + 1, 1)?
    };
    Some((premier, suivant.pred_opt()?))
}

/// Report period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodeRapport {
    Journalier,
    Hebdomadaire,
    Mensuel,
}

impl PeriodeRapport {
    pub fn from_str_opt(v: &str) -> Option<Self> {
        match v {
            "JOURNALIER" => Some(Self::Journalier),
            "HEBDOMADAIRE" => Some(Self::Hebdomadaire),
            "MENSUEL" => Some(Self::Mensuel),
            _ => None,
        }
    }

    /// Resolve the inclusive date range covered by this period around a
    /// reference date: the day itself, its Monday-to-Sunday week, or its
    /// calendar month.
    pub fn bornes(self, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Journalier => (reference, reference),
            Self::Hebdomadaire => {
                let lundi =
                    reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
                (lundi, lundi + Duration::days(6))
            }
            Self::Mensuel => mois_bornes(reference.year(), reference.month() as u8)
                .expect("reference date has a valid month"),
        }
    }
}
