//! Versioned structured backup document.
//!
//! Replaces raw database-file copies: the dump is explicit JSON, carries a
//! format version, and is validated before a restore touches the database.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Current dump format version.
pub const DUMP_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub actif: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpProfil {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub telephone: String,
    pub entreprise: String,
    pub actif: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpClasse {
    pub id: Uuid,
    pub nom: String,
    pub niveau: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpEleve {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpMenu {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpRepas {
    pub id: Uuid,
    pub eleve_id: Uuid,
    pub menu_id: Option<Uuid>,
    pub date: NaiveDate,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpInscription {
    pub id: Uuid,
    pub eleve_id: Uuid,
    pub annee: i32,
    pub mois: i16,
    pub inscrit: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpFacture {
    pub id: Uuid,
    pub numero: String,
    pub annee: i32,
    pub mois: i16,
    pub nombre_jours_travail: i32,
    pub nombre_repas_servis: i32,
    pub prix_unitaire_repas: Decimal,
    pub montant_total: Decimal,
    pub statut: String,
    pub date_emission: NaiveDate,
    pub date_paiement: Option<NaiveDate>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpActionLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action_type: String,
    pub model_name: String,
    pub object_id: Option<Uuid>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Full database dump, format version 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CantineDump {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub users: Vec<DumpUser>,
    pub profils: Vec<DumpProfil>,
    pub classes: Vec<DumpClasse>,
    pub eleves: Vec<DumpEleve>,
    pub menus: Vec<DumpMenu>,
    pub repas: Vec<DumpRepas>,
    pub inscriptions: Vec<DumpInscription>,
    pub factures: Vec<DumpFacture>,
    pub action_logs: Vec<DumpActionLog>,
}

impl CantineDump {
    /// Validate the dump before restore: version match and referential
    /// integrity of every foreign key. Returns the first problem found.
    pub fn valider(&self) -> Result<(), String> {
        if self.version != DUMP_VERSION {
            return Err(format!(
                "unsupported dump version {} (expected {DUMP_VERSION})",
                self.version
            ));
        }

        let users: HashSet<Uuid> = self.users.iter().map(|u| u.id).collect();
        let classes: HashSet<Uuid> = self.classes.iter().map(|c| c.id).collect();
        let eleves: HashSet<Uuid> = self.eleves.iter().map(|e| e.id).collect();
        let menus: HashSet<Uuid> = self.menus.iter().map(|m| m.id).collect();

        for profil in &self.profils {
            if !users.contains(&profil.user_id) {
                return Err(format!("profil {} references unknown user", profil.id));
            }
        }
        for eleve in &self.eleves {
            if let Some(classe_id) = eleve.classe_id {
                if !classes.contains(&classe_id) {
                    return Err(format!("eleve {} references unknown classe", eleve.id));
                }
            }
        }
        for repas in &self.repas {
            if !eleves.contains(&repas.eleve_id) {
                return Err(format!("repas {} references unknown eleve", repas.id));
            }
            if let Some(menu_id) = repas.menu_id {
                if !menus.contains(&menu_id) {
                    return Err(format!("repas {} references unknown menu", repas.id));
                }
            }
            if let Some(created_by) = repas.created_by {
                if !users.contains(&created_by) {
                    return Err(format!("repas {} references unknown user", repas.id));
                }
            }
        }
        for inscription in &self.inscriptions {
            if !eleves.contains(&inscription.eleve_id) {
                return Err(format!(
                    "inscription {} references unknown eleve",
                    inscription.id
                ));
            }
            if let Some(created_by) = inscription.created_by {
                if !users.contains(&created_by) {
                    return Err(format!(
                        "inscription {} references unknown user",
                        inscription.id
                    ));
                }
            }
        }
        for facture in &self.factures {
            if let Some(created_by) = facture.created_by {
                if !users.contains(&created_by) {
                    return Err(format!("facture {} references unknown user", facture.id));
                }
            }
        }
        for log in &self.action_logs {
            if let Some(user_id) = log.user_id {
                if !users.contains(&user_id) {
                    return Err(format!("action log {} references unknown user", log.id));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_dump() -> CantineDump {
        CantineDump {
            version: DUMP_VERSION,
            exported_at: Utc::now(),
            users: vec![],
            profils: vec![],
            classes: vec![],
            eleves: vec![],
            menus: vec![],
            repas: vec![],
            inscriptions: vec![],
            factures: vec![],
            action_logs: vec![],
        }
    }

    fn eleve(id: Uuid, classe_id: Option<Uuid>) -> DumpEleve {
        DumpEleve {
            id,
            prenom: "Awa".into(),
            nom: "Diallo".into(),
            classe_id,
            actif: true,
            telephone_parent: String::new(),
            email_parent: String::new(),
            photo: None,
            notes: String::new(),
            date_inscription: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn should_accept_empty_dump() {
        assert!(empty_dump().valider().is_ok());
    }

    #[test]
    fn should_reject_wrong_version() {
        let mut dump = empty_dump();
        dump.version = 9;
        let err = dump.valider().unwrap_err();
        assert!(err.contains("unsupported dump version"));
    }

    #[test]
    fn should_reject_eleve_with_unknown_classe() {
        let mut dump = empty_dump();
        dump.eleves.push(eleve(Uuid::now_v7(), Some(Uuid::now_v7())));
        let err = dump.valider().unwrap_err();
        assert!(err.contains("unknown classe"));
    }

    #[test]
    fn should_reject_repas_with_unknown_eleve() {
        let mut dump = empty_dump();
        dump.repas.push(DumpRepas {
            id: Uuid::now_v7(),
            eleve_id: Uuid::now_v7(),
            menu_id: None,
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            note: String::new(),
            created_at: Utc::now(),
            created_by: None,
        });
        let err = dump.valider().unwrap_err();
        assert!(err.contains("unknown eleve"));
    }

    #[test]
    fn should_accept_consistent_references() {
        let mut dump = empty_dump();
        let classe_id = Uuid::now_v7();
        let eleve_id = Uuid::now_v7();
        dump.classes.push(DumpClasse {
            id: classe_id,
            nom: "6eme A".into(),
            niveau: "College".into(),
        });
        dump.eleves.push(eleve(eleve_id, Some(classe_id)));
        dump.repas.push(DumpRepas {
            id: Uuid::now_v7(),
            eleve_id,
            menu_id: None,
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            note: String::new(),
            created_at: Utc::now(),
            created_by: None,
        });
        assert!(dump.valider().is_ok());
    }

    #[test]
    fn should_round_trip_dump_via_serde() {
        let dump = empty_dump();
        let json = serde_json::to_string(&dump).unwrap();
        let parsed: CantineDump = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, DUMP_VERSION);
    }
}
