//! Actor role domain types.

use serde::{Deserialize, Serialize};

/// Profile role.
///
/// Wire format: the stored string (`"ADMIN"` / `"PRESTATAIRE"`).
/// Every profile carries exactly one role; new profiles default to
/// `Prestataire` and elevation to `Admin` is a separate admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Prestataire,
}

impl Role {
    /// Convert from the stored string. Returns `None` for unknown values.
    pub fn from_str_opt(v: &str) -> Option<Self> {
        match v {
            "ADMIN" => Some(Self::Admin),
            "PRESTATAIRE" => Some(Self::Prestataire),
            _ => None,
        }
    }

    /// Convert to the stored string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Prestataire => "PRESTATAIRE",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Prestataire
    }
}
