//! Invoice domain rules: status transitions, numbering, totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice status.
///
/// Wire format: the stored string (`"BROUILLON"`, `"ENVOYEE"`, `"PAYEE"`,
/// `"ANNULEE"`). Valid transitions: BROUILLON → ENVOYEE → PAYEE, plus
/// → ANNULEE from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactureStatut {
    Brouillon,
    Envoyee,
    Payee,
    Annulee,
}

impl FactureStatut {
    pub fn from_str_opt(v: &str) -> Option<Self> {
        match v {
            "BROUILLON" => Some(Self::Brouillon),
            "ENVOYEE" => Some(Self::Envoyee),
            "PAYEE" => Some(Self::Payee),
            "ANNULEE" => Some(Self::Annulee),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brouillon => "BROUILLON",
            Self::Envoyee => "ENVOYEE",
            Self::Payee => "PAYEE",
            Self::Annulee => "ANNULEE",
        }
    }

    /// PAYEE and ANNULEE accept no further transitions.
    pub fn est_terminal(self) -> bool {
        matches!(self, Self::Payee | Self::Annulee)
    }

    /// Whether a transition to `suivant` is allowed.
    ///
    /// Re-asserting the current status is always allowed so that updates
    /// which only touch other fields can echo the status back unchanged.
    pub fn peut_passer_a(self, suivant: FactureStatut) -> bool {
        if self == suivant {
            return true;
        }
        match (self, suivant) {
            (Self::Brouillon, Self::Envoyee) => true,
            (Self::Envoyee, Self::Payee) => true,
            (Self::Brouillon | Self::Envoyee, Self::Annulee) => true,
            _ => false,
        }
    }
}

impl Default for FactureStatut {
    fn default() -> Self {
        Self::Brouillon
    }
}

/// Format an invoice number: `FAC-{annee}-{mois:02}-{seq:04}`.
pub fn format_numero(annee: i32, mois: u8, seq: i64) -> String {
    format!("FAC-{annee}-{mois:02}-{seq:04}")
}

/// Extract the numeric suffix of an invoice number.
///
/// Returns 0 when the number has no hyphen or a non-numeric suffix, so a
/// malformed predecessor restarts the sequence at 1 rather than failing
/// invoice creation.
pub fn parse_numero_seq(numero: &str) -> i64 {
    match numero.rsplit_once('-') {
        Some((_, suffix)) => suffix.parse().unwrap_or(0),
        None => 0,
    }
}

/// Invoice total: meals served × unit price.
pub fn montant_total(nombre_repas_servis: i32, prix_unitaire: Decimal) -> Decimal {
    Decimal::from(nombre_repas_servis) * prix_unitaire
}

/// Next auto-assigned invoice number.
///
/// The sequence is global: it continues from the numeric suffix of the most
/// recently created invoice regardless of that invoice's year/month, while
/// the formatted prefix carries the year/month of the invoice being
/// created. Numbers are therefore strictly increasing in creation order
/// even across period boundaries.
pub fn prochain_numero(dernier_numero: Option<&str>, annee: i32, mois: u8) -> String {
    let dernier_seq = dernier_numero.map(parse_numero_seq).unwrap_or(0);
    format_numero(annee, mois, dernier_seq + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_numero_with_padding() {
        assert_eq!(format_numero(2024, 1, 1), "FAC-2024-01-0001");
        assert_eq!(format_numero(2024, 12, 42), "FAC-2024-12-0042");
        assert_eq!(format_numero(2025, 3, 12345), "FAC-2025-03-12345");
    }

    #[test]
    fn should_parse_numero_suffix() {
        assert_eq!(parse_numero_seq("FAC-2024-01-0001"), 1);
        assert_eq!(parse_numero_seq("FAC-2023-12-0199"), 199);
    }

    #[test]
    fn should_parse_malformed_numero_as_zero() {
        assert_eq!(parse_numero_seq("SANSNUMERO"), 0);
        assert_eq!(parse_numero_seq("FAC-2024-01-abc"), 0);
        assert_eq!(parse_numero_seq(""), 0);
    }

    #[test]
    fn should_compute_montant_total() {
        let prix = Decimal::new(50000, 2); // 500.00
        assert_eq!(montant_total(120, prix), Decimal::new(6000000, 2)); // 60000.00
        assert_eq!(montant_total(0, prix), Decimal::ZERO);
    }

    #[test]
    fn should_start_sequence_at_one() {
        assert_eq!(prochain_numero(None, 2024, 1), "FAC-2024-01-0001");
    }

    #[test]
    fn should_continue_global_sequence_across_periods() {
        // The sequence never restarts per year/month.
        assert_eq!(
            prochain_numero(Some("FAC-2024-01-0001"), 2024, 1),
            "FAC-2024-01-0002"
        );
        assert_eq!(
            prochain_numero(Some("FAC-2024-01-0002"), 2024, 2),
            "FAC-2024-02-0003"
        );
        assert_eq!(
            prochain_numero(Some("FAC-2024-02-0003"), 2025, 1),
            "FAC-2025-01-0004"
        );
    }

    #[test]
    fn should_restart_after_malformed_predecessor() {
        assert_eq!(
            prochain_numero(Some("SANSNUMERO"), 2024, 3),
            "FAC-2024-03-0001"
        );
    }

    #[test]
    fn should_allow_valid_transitions() {
        use FactureStatut::*;
        assert!(Brouillon.peut_passer_a(Envoyee));
        assert!(Envoyee.peut_passer_a(Payee));
        assert!(Brouillon.peut_passer_a(Annulee));
        assert!(Envoyee.peut_passer_a(Annulee));
    }

    #[test]
    fn should_reject_invalid_transitions() {
        use FactureStatut::*;
        assert!(!Brouillon.peut_passer_a(Payee));
        assert!(!Envoyee.peut_passer_a(Brouillon));
        assert!(!Payee.peut_passer_a(Annulee));
        assert!(!Payee.peut_passer_a(Envoyee));
        assert!(!Annulee.peut_passer_a(Brouillon));
        assert!(!Annulee.peut_passer_a(Envoyee));
    }

    #[test]
    fn should_allow_reasserting_current_status() {
        for statut in [
            FactureStatut::Brouillon,
            FactureStatut::Envoyee,
            FactureStatut::Payee,
            FactureStatut::Annulee,
        ] {
            assert!(statut.peut_passer_a(statut));
        }
    }

    #[test]
    fn should_mark_terminal_statuses() {
        assert!(!FactureStatut::Brouillon.est_terminal());
        assert!(!FactureStatut::Envoyee.est_terminal());
        assert!(FactureStatut::Payee.est_terminal());
        assert!(FactureStatut::Annulee.est_terminal());
    }

    #[test]
    fn should_serialize_statut_as_stored_string() {
        assert_eq!(
            serde_json::to_string(&FactureStatut::Brouillon).unwrap(),
            "\"BROUILLON\""
        );
        assert_eq!(
            serde_json::from_str::<FactureStatut>("\"ENVOYEE\"").unwrap(),
            FactureStatut::Envoyee
        );
    }
}
