#![allow(async_fn_in_trait)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use cantine_domain::pagination::PageRequest;

use crate::domain::dump::CantineDump;
use crate::domain::types::{
    ActionEntry, Classe, Eleve, EleveFiltre, Facture, FactureFiltre, InscriptionFiltre,
    InscriptionMensuelle, Menu, MenuFiltre, Profil, ProfilFiltre, RapportLigne, Repas,
    RepasFiltre, RepasParEleve, RepasParJour, User,
};
use crate::error::CantineError;

/// Repository for login identities.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CantineError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CantineError>;
}

/// Repository for provider/admin profiles.
pub trait ProfilRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profil>, CantineError>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profil>, CantineError>;
    async fn list(
        &self,
        filtre: ProfilFiltre,
        page: PageRequest,
    ) -> Result<Vec<Profil>, CantineError>;

    /// Atomically create a login identity and its profile in one
    /// transaction. A duplicate username is a conflict.
    async fn create_with_user(&self, user: &User, profil: &Profil) -> Result<(), CantineError>;

    async fn update(&self, profil: &Profil) -> Result<(), CantineError>;

    /// Delete a profile and its login identity. Returns `true` if deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CantineError>;
}

/// Repository for school classes.
pub trait ClasseRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Classe>, CantineError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<Classe>, CantineError>;
    async fn create(&self, classe: &Classe) -> Result<(), CantineError>;
    async fn update(&self, classe: &Classe) -> Result<(), CantineError>;
    async fn delete(&self, id: Uuid) -> Result<bool, CantineError>;
}

/// Repository for students.
pub trait EleveRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Eleve>, CantineError>;
    async fn list(
        &self,
        filtre: EleveFiltre,
        page: PageRequest,
    ) -> Result<Vec<Eleve>, CantineError>;

    /// All active students, unpaginated (attendance marking).
    async fn list_actifs(&self) -> Result<Vec<Eleve>, CantineError>;

    /// Every student, active or not, unpaginated (exports).
    async fn list_tous(&self) -> Result<Vec<Eleve>, CantineError>;

    /// Active students enrolled (inscrit = true) for the given month.
    async fn list_inscrits(&self, annee: i32, mois: u8) -> Result<Vec<Eleve>, CantineError>;

    async fn count_actifs(&self) -> Result<u64, CantineError>;
    async fn create(&self, eleve: &Eleve) -> Result<(), CantineError>;
    async fn update(&self, eleve: &Eleve) -> Result<(), CantineError>;

    /// Hard delete; cascades to repas and inscriptions at the storage layer.
    async fn delete(&self, id: Uuid) -> Result<bool, CantineError>;
}

/// Repository for daily menus.
pub trait MenuRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Menu>, CantineError>;
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<Menu>, CantineError>;
    async fn list(&self, filtre: MenuFiltre, page: PageRequest)
    -> Result<Vec<Menu>, CantineError>;

    /// Menus of a month, ordered by date.
    async fn list_periode(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
    ) -> Result<Vec<Menu>, CantineError>;

    /// A duplicate date is a conflict.
    async fn create(&self, menu: &Menu) -> Result<(), CantineError>;
    async fn update(&self, menu: &Menu) -> Result<(), CantineError>;
    async fn delete(&self, id: Uuid) -> Result<bool, CantineError>;
}

/// Repository for meal records.
pub trait RepasRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Repas>, CantineError>;
    async fn list(
        &self,
        filtre: RepasFiltre,
        page: PageRequest,
    ) -> Result<Vec<Repas>, CantineError>;

    /// Atomic insert-if-absent on the (eleve_id, date) key. Returns `true`
    /// when a row was inserted, `false` when one already existed.
    async fn insert_if_absent(&self, repas: &Repas) -> Result<bool, CantineError>;

    /// Direct create; a duplicate (eleve, date) is a conflict.
    async fn create(&self, repas: &Repas) -> Result<(), CantineError>;

    async fn update(&self, repas: &Repas) -> Result<(), CantineError>;
    async fn delete(&self, id: Uuid) -> Result<bool, CantineError>;

    /// Student ids with a meal on the given date.
    async fn eleve_ids_pour_date(&self, date: NaiveDate) -> Result<Vec<Uuid>, CantineError>;

    async fn count_periode(&self, debut: NaiveDate, fin: NaiveDate) -> Result<u64, CantineError>;
    async fn count_par_jour(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
    ) -> Result<Vec<RepasParJour>, CantineError>;
    async fn count_par_eleve(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
        limite: u64,
    ) -> Result<Vec<RepasParEleve>, CantineError>;

    /// Distinct dates with at least one meal in the period.
    async fn jours_travail(&self, debut: NaiveDate, fin: NaiveDate) -> Result<u64, CantineError>;

    /// Distinct students served in the period.
    async fn eleves_servis(&self, debut: NaiveDate, fin: NaiveDate) -> Result<u64, CantineError>;

    /// Report rows (meal joined with student, classe, menu), ordered by
    /// date then student.
    async fn lignes_rapport(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
    ) -> Result<Vec<RapportLigne>, CantineError>;
}

/// Repository for monthly enrollments.
pub trait InscriptionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<InscriptionMensuelle>, CantineError>;
    async fn list(
        &self,
        filtre: InscriptionFiltre,
        page: PageRequest,
    ) -> Result<Vec<InscriptionMensuelle>, CantineError>;

    /// A duplicate (eleve, annee, mois) is a conflict.
    async fn create(&self, inscription: &InscriptionMensuelle) -> Result<(), CantineError>;
    async fn update(&self, inscription: &InscriptionMensuelle) -> Result<(), CantineError>;
    async fn delete(&self, id: Uuid) -> Result<bool, CantineError>;

    /// Enrolled (inscrit = true) count for a month.
    async fn count_mois(&self, annee: i32, mois: u8) -> Result<u64, CantineError>;
}

/// Repository for invoices.
pub trait FactureRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Facture>, CantineError>;
    async fn list(
        &self,
        filtre: FactureFiltre,
        page: PageRequest,
    ) -> Result<Vec<Facture>, CantineError>;

    /// Insert an invoice. When `facture.numero` is empty, allocate the next
    /// number from the global sequence — numeric suffix of the most recently
    /// created invoice plus one, formatted `FAC-{annee}-{mois:02}-{seq:04}` —
    /// under a lock that serializes concurrent allocations. Returns the
    /// stored invoice with its numero filled in.
    async fn create(&self, facture: &Facture) -> Result<Facture, CantineError>;

    async fn update(&self, facture: &Facture) -> Result<(), CantineError>;
    async fn delete(&self, id: Uuid) -> Result<bool, CantineError>;

    /// Pending (ENVOYEE) invoices created by the given user.
    async fn count_en_attente(&self, created_by: Uuid) -> Result<u64, CantineError>;

    /// Sum of montant_total over a billing month.
    async fn somme_montants(&self, annee: i32, mois: u8) -> Result<Decimal, CantineError>;
}

/// Append-only journal.
pub trait ActionLogRepository: Send + Sync {
    async fn append(&self, entry: &ActionEntry) -> Result<(), CantineError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<ActionEntry>, CantineError>;
}

/// Versioned dump export/restore.
pub trait SauvegardeRepository: Send + Sync {
    async fn export_dump(&self) -> Result<CantineDump, CantineError>;

    /// Replace the entire database content with the dump, in one
    /// transaction. Callers must have validated the dump first.
    async fn restore_dump(&self, dump: &CantineDump) -> Result<(), CantineError>;
}
