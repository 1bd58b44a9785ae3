//! Plain domain structs, decoupled from the persistence layer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use cantine_domain::action::ActionKind;
use cantine_domain::facture::FactureStatut;
use cantine_domain::role::Role;

/// Login identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub actif: bool,
    pub created_at: DateTime<Utc>,
}

/// Provider/admin profile, one per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profil {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub telephone: String,
    pub entreprise: String,
    pub actif: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resolved actor for an authenticated request.
///
/// Resolution fails with `ProfilManquant` / `ProfilInactif` instead of
/// producing a third variant, so every authorization branch is exhaustive
/// over the two real roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acteur {
    Admin(Profil),
    Prestataire(Profil),
}

impl Acteur {
    pub fn profil(&self) -> &Profil {
        match self {
            Self::Admin(p) | Self::Prestataire(p) => p,
        }
    }

    pub fn est_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    pub fn user_id(&self) -> Uuid {
        self.profil().user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classe {
    pub id: Uuid,
    pub nom: String,
    pub niveau: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eleve {
    pub id: Uuid,
    pub prenom: String,
    pub nom: String,
    pub classe_id: Option<Uuid>,
    pub actif: bool,
    pub telephone_parent: String,
    pub email_parent: String,
    pub photo: Option<String>,
    pub notes: String,
    pub date_inscription: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub id: Uuid,
    pub date: NaiveDate,
    pub jour_semaine: String,
    pub plat_principal: String,
    pub accompagnement: String,
    pub dessert: String,
    pub disponible: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repas {
    pub id: Uuid,
    pub eleve_id: Uuid,
    pub menu_id: Option<Uuid>,
    pub date: NaiveDate,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InscriptionMensuelle {
    pub id: Uuid,
    pub eleve_id: Uuid,
    pub annee: i32,
    pub mois: u8,
    pub inscrit: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facture {
    pub id: Uuid,
    pub numero: String,
    pub annee: i32,
    pub mois: u8,
    pub nombre_jours_travail: i32,
    pub nombre_repas_servis: i32,
    pub prix_unitaire_repas: Decimal,
    pub montant_total: Decimal,
    pub statut: FactureStatut,
    pub date_emission: NaiveDate,
    pub date_paiement: Option<NaiveDate>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

/// Append-only journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: ActionKind,
    pub model_name: String,
    pub object_id: Option<Uuid>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

// ── List filters ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct EleveFiltre {
    pub classe_id: Option<Uuid>,
    pub recherche: Option<String>,
    pub actif: Option<bool>,
    /// Restrict to students enrolled (inscrit = true) for this (annee, mois).
    pub inscrit_mois: Option<(i32, u8)>,
}

#[derive(Debug, Clone, Default)]
pub struct MenuFiltre {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub recherche: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RepasFiltre {
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub eleve_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct InscriptionFiltre {
    pub annee: Option<i32>,
    pub mois: Option<u8>,
    pub eleve_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct FactureFiltre {
    pub annee: Option<i32>,
    pub mois: Option<u8>,
    pub statut: Option<FactureStatut>,
    /// Free-text search over numero and notes.
    pub recherche: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfilFiltre {
    pub role: Option<Role>,
    pub actif: Option<bool>,
}

// ── Aggregates ───────────────────────────────────────────────────────────────

/// Meal count for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepasParJour {
    pub date: NaiveDate,
    pub nombre: i64,
}

/// Meal count for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepasParEleve {
    pub nom: String,
    pub prenom: String,
    pub nombre: i64,
}

/// One row of the report intermediate form. Both export formats are
/// rendered from the same row list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RapportLigne {
    pub date: NaiveDate,
    pub eleve: String,
    pub classe: String,
    pub plat_principal: String,
    pub menu_complet: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profil(role: Role) -> Profil {
        Profil {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            role,
            telephone: String::new(),
            entreprise: String::new(),
            actif: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn should_report_admin_actor() {
        let acteur = Acteur::Admin(profil(Role::Admin));
        assert!(acteur.est_admin());
    }

    #[test]
    fn should_report_prestataire_actor() {
        let acteur = Acteur::Prestataire(profil(Role::Prestataire));
        assert!(!acteur.est_admin());
    }

    #[test]
    fn should_expose_user_id_of_underlying_profil() {
        let p = profil(Role::Admin);
        let user_id = p.user_id;
        assert_eq!(Acteur::Admin(p).user_id(), user_id);
    }
}
