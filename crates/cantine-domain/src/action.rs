//! Action-journal domain types.

use serde::{Deserialize, Serialize};

/// Kind of a journaled action.
///
/// Wire format: the stored string (`"CREATE"`, `"UPDATE"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
    View,
    Export,
    Import,
    Login,
    Logout,
}

impl ActionKind {
    pub fn from_str_opt(v: &str) -> Option<Self> {
        match v {
            "CREATE" => Some(Self::Create),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "VIEW" => Some(Self::View),
            "EXPORT" => Some(Self::Export),
            "IMPORT" => Some(Self::Import),
            "LOGIN" => Some(Self::Login),
            "LOGOUT" => Some(Self::Logout),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::View => "VIEW",
            Self::Export => "EXPORT",
            Self::Import => "IMPORT",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
        }
    }
}
