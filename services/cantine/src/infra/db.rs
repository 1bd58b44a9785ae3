use anyhow::Context as _;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr, Statement, TransactionError,
    TransactionTrait,
    sea_query::{Expr, OnConflict, extension::postgres::PgExpr},
};
use uuid::Uuid;

use cantine_domain::facture::{self, FactureStatut};
use cantine_domain::pagination::PageRequest;
use cantine_domain::role::Role;
use cantine_schema::{
    action_logs, classes, eleves, factures, inscriptions_mensuelles, menus,
    profils_prestataires, repas, users,
};

use crate::domain::dump::{
    CantineDump, DUMP_VERSION, DumpActionLog, DumpClasse, DumpEleve, DumpFacture,
    DumpInscription, DumpMenu, DumpProfil, DumpRepas, DumpUser,
};
use crate::domain::repository::{
    ActionLogRepository, ClasseRepository, EleveRepository, FactureRepository,
    InscriptionRepository, MenuRepository, ProfilRepository, RepasRepository,
    SauvegardeRepository, UserRepository,
};
use crate::domain::types::{
    ActionEntry, Classe, Eleve, EleveFiltre, Facture, FactureFiltre, InscriptionFiltre,
    InscriptionMensuelle, Menu, MenuFiltre, Profil, ProfilFiltre, RapportLigne, Repas,
    RepasFiltre, RepasParEleve, RepasParJour, User,
};
use crate::error::CantineError;

/// Postgres advisory-lock key serializing invoice-number allocation.
const FACTURE_NUMERO_LOCK_KEY: i64 = 0x43_41_4E_54;

fn internal(e: DbErr, ctx: &'static str) -> CantineError {
    CantineError::Internal(anyhow::Error::new(e).context(ctx))
}

/// Map an insert error: a unique-constraint violation becomes the given
/// conflict, anything else an internal error.
fn map_unique(e: DbErr, conflict: CantineError, ctx: &'static str) -> CantineError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => internal(e, ctx),
    }
}

fn flatten_txn(e: TransactionError<CantineError>, ctx: &'static str) -> CantineError {
    match e {
        TransactionError::Connection(db) => internal(db, ctx),
        TransactionError::Transaction(inner) => inner,
    }
}

fn ilike_pattern(q: &str) -> String {
    format!("%{q}%")
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CantineError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CantineError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        full_name: model.full_name,
        email: model.email,
        actif: model.actif,
        created_at: model.created_at,
    }
}

fn user_to_active(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        username: Set(user.username.clone()),
        password_hash: Set(user.password_hash.clone()),
        full_name: Set(user.full_name.clone()),
        email: Set(user.email.clone()),
        actif: Set(user.actif),
        created_at: Set(user.created_at),
    }
}

// ── Profil repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfilRepository {
    pub db: DatabaseConnection,
}

impl ProfilRepository for DbProfilRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profil>, CantineError> {
        let model = profils_prestataires::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profil by id")?;
        model.map(profil_from_model).transpose()
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profil>, CantineError> {
        let model = profils_prestataires::Entity::find()
            .filter(profils_prestataires::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find profil by user id")?;
        model.map(profil_from_model).transpose()
    }

    async fn list(
        &self,
        filtre: ProfilFiltre,
        page: PageRequest,
    ) -> Result<Vec<Profil>, CantineError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = profils_prestataires::Entity::find();
        if let Some(role) = filtre.role {
            query = query.filter(profils_prestataires::Column::Role.eq(role.as_str()));
        }
        if let Some(actif) = filtre.actif {
            query = query.filter(profils_prestataires::Column::Actif.eq(actif));
        }
        let models = query
            .order_by_asc(profils_prestataires::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list profils")?;
        models.into_iter().map(profil_from_model).collect()
    }

    async fn create_with_user(&self, user: &User, profil: &Profil) -> Result<(), CantineError> {
        let user = user.clone();
        let profil = profil.clone();
        self.db
            .transaction::<_, (), CantineError>(|txn| {
                Box::pin(async move {
                    user_to_active(&user)
                        .insert(txn)
                        .await
                        .map_err(|e| {
                            map_unique(e, CantineError::UsernameDejaPris, "insert user")
                        })?;
                    profil_to_active(&profil)
                        .insert(txn)
                        .await
                        .map_err(|e| internal(e, "insert profil"))?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| flatten_txn(e, "create user with profil"))
    }

    async fn update(&self, profil: &Profil) -> Result<(), CantineError> {
        profils_prestataires::ActiveModel {
            id: Set(profil.id),
            role: Set(profil.role.as_str().to_owned()),
            telephone: Set(profil.telephone.clone()),
            entreprise: Set(profil.entreprise.clone()),
            actif: Set(profil.actif),
            updated_at: Set(profil.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update profil")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CantineError> {
        // Deleting the login identity cascades to the profile.
        let Some(profil) = profils_prestataires::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profil for delete")?
        else {
            return Ok(false);
        };
        let result = users::Entity::delete_by_id(profil.user_id)
            .exec(&self.db)
            .await
            .context("delete user of profil")?;
        Ok(result.rows_affected > 0)
    }
}

fn profil_from_model(model: profils_prestataires::Model) -> Result<Profil, CantineError> {
    let role = Role::from_str_opt(&model.role).ok_or_else(|| {
        CantineError::Internal(anyhow::anyhow!("unknown role in storage: {}", model.role))
    })?;
    Ok(Profil {
        id: model.id,
        user_id: model.user_id,
        role,
        telephone: model.telephone,
        entreprise: model.entreprise,
        actif: model.actif,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn profil_to_active(profil: &Profil) -> profils_prestataires::ActiveModel {
    profils_prestataires::ActiveModel {
        id: Set(profil.id),
        user_id: Set(profil.user_id),
        role: Set(profil.role.as_str().to_owned()),
        telephone: Set(profil.telephone.clone()),
        entreprise: Set(profil.entreprise.clone()),
        actif: Set(profil.actif),
        created_at: Set(profil.created_at),
        updated_at: Set(profil.updated_at),
    }
}

// ── Classe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClasseRepository {
    pub db: DatabaseConnection,
}

impl ClasseRepository for DbClasseRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Classe>, CantineError> {
        let model = classes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find classe by id")?;
        Ok(model.map(classe_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Classe>, CantineError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = classes::Entity::find()
            .order_by_asc(classes::Column::Nom)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list classes")?;
        Ok(models.into_iter().map(classe_from_model).collect())
    }

    async fn create(&self, classe: &Classe) -> Result<(), CantineError> {
        classes::ActiveModel {
            id: Set(classe.id),
            nom: Set(classe.nom.clone()),
            niveau: Set(classe.niveau.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique(e, CantineError::ClasseDejaExistante, "insert classe"))?;
        Ok(())
    }

    async fn update(&self, classe: &Classe) -> Result<(), CantineError> {
        classes::ActiveModel {
            id: Set(classe.id),
            nom: Set(classe.nom.clone()),
            niveau: Set(classe.niveau.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| map_unique(e, CantineError::ClasseDejaExistante, "update classe"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CantineError> {
        let result = classes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete classe")?;
        Ok(result.rows_affected > 0)
    }
}

fn classe_from_model(model: classes::Model) -> Classe {
    Classe {
        id: model.id,
        nom: model.nom,
        niveau: model.niveau,
    }
}

// ── Eleve repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEleveRepository {
    pub db: DatabaseConnection,
}

impl EleveRepository for DbEleveRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Eleve>, CantineError> {
        let model = eleves::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find eleve by id")?;
        Ok(model.map(eleve_from_model))
    }

    async fn list(
        &self,
        filtre: EleveFiltre,
        page: PageRequest,
    ) -> Result<Vec<Eleve>, CantineError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = eleves::Entity::find();
        if let Some(classe_id) = filtre.classe_id {
            query = query.filter(eleves::Column::ClasseId.eq(classe_id));
        }
        if let Some(actif) = filtre.actif {
            query = query.filter(eleves::Column::Actif.eq(actif));
        }
        if let Some(ref q) = filtre.recherche {
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::col((eleves::Entity, eleves::Column::Nom))
                            .ilike(ilike_pattern(q)),
                    )
                    .add(
                        Expr::col((eleves::Entity, eleves::Column::Prenom))
                            .ilike(ilike_pattern(q)),
                    ),
            );
        }
        if let Some((annee, mois)) = filtre.inscrit_mois {
            query = query
                .join(
                    JoinType::InnerJoin,
                    eleves::Relation::InscriptionsMensuelles.def(),
                )
                .filter(inscriptions_mensuelles::Column::Annee.eq(annee))
                .filter(inscriptions_mensuelles::Column::Mois.eq(mois as i16))
                .filter(inscriptions_mensuelles::Column::Inscrit.eq(true))
                .distinct();
        }
        let models = query
            .order_by_asc(eleves::Column::Nom)
            .order_by_asc(eleves::Column::Prenom)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list eleves")?;
        Ok(models.into_iter().map(eleve_from_model).collect())
    }

    async fn list_actifs(&self) -> Result<Vec<Eleve>, CantineError> {
        let models = eleves::Entity::find()
            .filter(eleves::Column::Actif.eq(true))
            .order_by_asc(eleves::Column::Nom)
            .order_by_asc(eleves::Column::Prenom)
            .all(&self.db)
            .await
            .context("list active eleves")?;
        Ok(models.into_iter().map(eleve_from_model).collect())
    }

    async fn list_tous(&self) -> Result<Vec<Eleve>, CantineError> {
        let models = eleves::Entity::find()
            .order_by_asc(eleves::Column::Nom)
            .order_by_asc(eleves::Column::Prenom)
            .all(&self.db)
            .await
            .context("list all eleves")?;
        Ok(models.into_iter().map(eleve_from_model).collect())
    }

    async fn list_inscrits(&self, annee: i32, mois: u8) -> Result<Vec<Eleve>, CantineError> {
        let models = eleves::Entity::find()
            .filter(eleves::Column::Actif.eq(true))
            .join(
                JoinType::InnerJoin,
                eleves::Relation::InscriptionsMensuelles.def(),
            )
            .filter(inscriptions_mensuelles::Column::Annee.eq(annee))
            .filter(inscriptions_mensuelles::Column::Mois.eq(mois as i16))
            .filter(inscriptions_mensuelles::Column::Inscrit.eq(true))
            .distinct()
            .order_by_asc(eleves::Column::Nom)
            .order_by_asc(eleves::Column::Prenom)
            .all(&self.db)
            .await
            .context("list enrolled eleves")?;
        Ok(models.into_iter().map(eleve_from_model).collect())
    }

    async fn count_actifs(&self) -> Result<u64, CantineError> {
        let count = eleves::Entity::find()
            .filter(eleves::Column::Actif.eq(true))
            .count(&self.db)
            .await
            .context("count active eleves")?;
        Ok(count)
    }

    async fn create(&self, eleve: &Eleve) -> Result<(), CantineError> {
        eleve_to_active(eleve)
            .insert(&self.db)
            .await
            .context("insert eleve")?;
        Ok(())
    }

    async fn update(&self, eleve: &Eleve) -> Result<(), CantineError> {
        eleve_to_active(eleve)
            .update(&self.db)
            .await
            .context("update eleve")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CantineError> {
        let result = eleves::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete eleve")?;
        Ok(result.rows_affected > 0)
    }
}

fn eleve_from_model(model: eleves::Model) -> Eleve {
    Eleve {
        id: model.id,
        prenom: model.prenom,
        nom: model.nom,
        classe_id: model.classe_id,
        actif: model.actif,
        telephone_parent: model.telephone_parent,
        email_parent: model.email_parent,
        photo: model.photo,
        notes: model.notes,
        date_inscription: model.date_inscription,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn eleve_to_active(eleve: &Eleve) -> eleves::ActiveModel {
    eleves::ActiveModel {
        id: Set(eleve.id),
        prenom: Set(eleve.prenom.clone()),
        nom: Set(eleve.nom.clone()),
        classe_id: Set(eleve.classe_id),
        actif: Set(eleve.actif),
        telephone_parent: Set(eleve.telephone_parent.clone()),
        email_parent: Set(eleve.email_parent.clone()),
        photo: Set(eleve.photo.clone()),
        notes: Set(eleve.notes.clone()),
        date_inscription: Set(eleve.date_inscription),
        created_at: Set(eleve.created_at),
        updated_at: Set(eleve.updated_at),
    }
}

// ── Menu repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMenuRepository {
    pub db: DatabaseConnection,
}

impl MenuRepository for DbMenuRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Menu>, CantineError> {
        let model = menus::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find menu by id")?;
        Ok(model.map(menu_from_model))
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<Menu>, CantineError> {
        let model = menus::Entity::find()
            .filter(menus::Column::Date.eq(date))
            .one(&self.db)
            .await
            .context("find menu by date")?;
        Ok(model.map(menu_from_model))
    }

    async fn list(
        &self,
        filtre: MenuFiltre,
        page: PageRequest,
    ) -> Result<Vec<Menu>, CantineError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = menus::Entity::find();
        if let Some(date_from) = filtre.date_from {
            query = query.filter(menus::Column::Date.gte(date_from));
        }
        if let Some(date_to) = filtre.date_to {
            query = query.filter(menus::Column::Date.lte(date_to));
        }
        if let Some(ref q) = filtre.recherche {
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::col((menus::Entity, menus::Column::PlatPrincipal))
                            .ilike(ilike_pattern(q)),
                    )
                    .add(
                        Expr::col((menus::Entity, menus::Column::Accompagnement))
                            .ilike(ilike_pattern(q)),
                    )
                    .add(
                        Expr::col((menus::Entity, menus::Column::Dessert))
                            .ilike(ilike_pattern(q)),
                    ),
            );
        }
        let models = query
            .order_by_desc(menus::Column::Date)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list menus")?;
        Ok(models.into_iter().map(menu_from_model).collect())
    }

    async fn list_periode(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
    ) -> Result<Vec<Menu>, CantineError> {
        let models = menus::Entity::find()
            .filter(menus::Column::Date.between(debut, fin))
            .order_by_asc(menus::Column::Date)
            .all(&self.db)
            .await
            .context("list menus of period")?;
        Ok(models.into_iter().map(menu_from_model).collect())
    }

    async fn create(&self, menu: &Menu) -> Result<(), CantineError> {
        menu_to_active(menu)
            .insert(&self.db)
            .await
            .map_err(|e| map_unique(e, CantineError::MenuDejaExistant, "insert menu"))?;
        Ok(())
    }

    async fn update(&self, menu: &Menu) -> Result<(), CantineError> {
        menu_to_active(menu)
            .update(&self.db)
            .await
            .map_err(|e| map_unique(e, CantineError::MenuDejaExistant, "update menu"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CantineError> {
        let result = menus::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete menu")?;
        Ok(result.rows_affected > 0)
    }
}

fn menu_from_model(model: menus::Model) -> Menu {
    Menu {
        id: model.id,
        date: model.date,
        jour_semaine: model.jour_semaine,
        plat_principal: model.plat_principal,
        accompagnement: model.accompagnement,
        dessert: model.dessert,
        disponible: model.disponible,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn menu_to_active(menu: &Menu) -> menus::ActiveModel {
    menus::ActiveModel {
        id: Set(menu.id),
        date: Set(menu.date),
        jour_semaine: Set(menu.jour_semaine.clone()),
        plat_principal: Set(menu.plat_principal.clone()),
        accompagnement: Set(menu.accompagnement.clone()),
        dessert: Set(menu.dessert.clone()),
        disponible: Set(menu.disponible),
        notes: Set(menu.notes.clone()),
        created_at: Set(menu.created_at),
        updated_at: Set(menu.updated_at),
    }
}

// ── Repas repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRepasRepository {
    pub db: DatabaseConnection,
}

impl RepasRepository for DbRepasRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Repas>, CantineError> {
        let model = repas::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find repas by id")?;
        Ok(model.map(repas_from_model))
    }

    async fn list(
        &self,
        filtre: RepasFiltre,
        page: PageRequest,
    ) -> Result<Vec<Repas>, CantineError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = repas::Entity::find();
        if let Some(date) = filtre.date {
            query = query.filter(repas::Column::Date.eq(date));
        } else {
            if let Some(date_from) = filtre.date_from {
                query = query.filter(repas::Column::Date.gte(date_from));
            }
            if let Some(date_to) = filtre.date_to {
                query = query.filter(repas::Column::Date.lte(date_to));
            }
        }
        if let Some(eleve_id) = filtre.eleve_id {
            query = query.filter(repas::Column::EleveId.eq(eleve_id));
        }
        let models = query
            .order_by_desc(repas::Column::Date)
            .order_by_asc(repas::Column::EleveId)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list repas")?;
        Ok(models.into_iter().map(repas_from_model).collect())
    }

    async fn insert_if_absent(&self, repas_record: &Repas) -> Result<bool, CantineError> {
        // ON CONFLICT DO NOTHING on the unique (eleve_id, date) index: a
        // concurrent duplicate degrades to zero rows affected, never an
        // error.
        let inserted = repas::Entity::insert(repas_to_active(repas_record))
            .on_conflict(
                OnConflict::columns([repas::Column::EleveId, repas::Column::Date])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert repas if absent")?;
        Ok(inserted > 0)
    }

    async fn create(&self, repas_record: &Repas) -> Result<(), CantineError> {
        repas_to_active(repas_record)
            .insert(&self.db)
            .await
            .map_err(|e| map_unique(e, CantineError::RepasDejaExistant, "insert repas"))?;
        Ok(())
    }

    async fn update(&self, repas_record: &Repas) -> Result<(), CantineError> {
        repas_to_active(repas_record)
            .update(&self.db)
            .await
            .map_err(|e| map_unique(e, CantineError::RepasDejaExistant, "update repas"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CantineError> {
        let result = repas::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete repas")?;
        Ok(result.rows_affected > 0)
    }

    async fn eleve_ids_pour_date(&self, date: NaiveDate) -> Result<Vec<Uuid>, CantineError> {
        let ids = repas::Entity::find()
            .select_only()
            .column(repas::Column::EleveId)
            .filter(repas::Column::Date.eq(date))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("list eleve ids for date")?;
        Ok(ids)
    }

    async fn count_periode(&self, debut: NaiveDate, fin: NaiveDate) -> Result<u64, CantineError> {
        let count = repas::Entity::find()
            .filter(repas::Column::Date.between(debut, fin))
            .count(&self.db)
            .await
            .context("count repas of period")?;
        Ok(count)
    }

    async fn count_par_jour(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
    ) -> Result<Vec<RepasParJour>, CantineError> {
        #[derive(FromQueryResult)]
        struct Row {
            date: NaiveDate,
            nombre: i64,
        }

        let rows = Row::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT "date", COUNT(*) AS "nombre"
                FROM "repas"
                WHERE "date" BETWEEN $1 AND $2
                GROUP BY "date"
                ORDER BY "date"
            "#,
            [debut.into(), fin.into()],
        ))
        .all(&self.db)
        .await
        .context("count repas per day")?;

        Ok(rows
            .into_iter()
            .map(|r| RepasParJour {
                date: r.date,
                nombre: r.nombre,
            })
            .collect())
    }

    async fn count_par_eleve(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
        limite: u64,
    ) -> Result<Vec<RepasParEleve>, CantineError> {
        #[derive(FromQueryResult)]
        struct Row {
            nom: String,
            prenom: String,
            nombre: i64,
        }

        let rows = Row::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT e."nom", e."prenom", COUNT(*) AS "nombre"
                FROM "repas" r
                JOIN "eleves" e ON e."id" = r."eleve_id"
                WHERE r."date" BETWEEN $1 AND $2
                GROUP BY e."nom", e."prenom"
                ORDER BY "nombre" DESC
                LIMIT $3
            "#,
            [debut.into(), fin.into(), (limite as i64).into()],
        ))
        .all(&self.db)
        .await
        .context("count repas per eleve")?;

        Ok(rows
            .into_iter()
            .map(|r| RepasParEleve {
                nom: r.nom,
                prenom: r.prenom,
                nombre: r.nombre,
            })
            .collect())
    }

    async fn jours_travail(&self, debut: NaiveDate, fin: NaiveDate) -> Result<u64, CantineError> {
        #[derive(FromQueryResult)]
        struct Row {
            nombre: i64,
        }

        let row = Row::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"SELECT COUNT(DISTINCT "date") AS "nombre" FROM "repas" WHERE "date" BETWEEN $1 AND $2"#,
            [debut.into(), fin.into()],
        ))
        .one(&self.db)
        .await
        .context("count work days")?;
        Ok(row.map(|r| r.nombre as u64).unwrap_or(0))
    }

    async fn eleves_servis(&self, debut: NaiveDate, fin: NaiveDate) -> Result<u64, CantineError> {
        #[derive(FromQueryResult)]
        struct Row {
            nombre: i64,
        }

        let row = Row::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"SELECT COUNT(DISTINCT "eleve_id") AS "nombre" FROM "repas" WHERE "date" BETWEEN $1 AND $2"#,
            [debut.into(), fin.into()],
        ))
        .one(&self.db)
        .await
        .context("count served eleves")?;
        Ok(row.map(|r| r.nombre as u64).unwrap_or(0))
    }

    async fn lignes_rapport(
        &self,
        debut: NaiveDate,
        fin: NaiveDate,
    ) -> Result<Vec<RapportLigne>, CantineError> {
        #[derive(FromQueryResult)]
        struct Row {
            date: NaiveDate,
            eleve: String,
            classe: String,
            plat_principal: String,
            menu_complet: String,
        }

        let rows = Row::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT r."date" AS "date",
                   e."prenom" || ' ' || e."nom" AS "eleve",
                   COALESCE(c."nom", '') AS "classe",
                   COALESCE(m."plat_principal", '') AS "plat_principal",
                   CASE WHEN m."id" IS NULL THEN ''
                        ELSE m."plat_principal" || ' - ' || m."accompagnement"
                   END AS "menu_complet"
                FROM "repas" r
                JOIN "eleves" e ON e."id" = r."eleve_id"
                LEFT JOIN "classes" c ON c."id" = e."classe_id"
                LEFT JOIN "menus" m ON m."id" = r."menu_id"
                WHERE r."date" BETWEEN $1 AND $2
                ORDER BY r."date", e."nom", e."prenom"
            "#,
            [debut.into(), fin.into()],
        ))
        .all(&self.db)
        .await
        .context("load report rows")?;

        Ok(rows
            .into_iter()
            .map(|r| RapportLigne {
                date: r.date,
                eleve: r.eleve,
                classe: r.classe,
                plat_principal: r.plat_principal,
                menu_complet: r.menu_complet,
            })
            .collect())
    }
}

fn repas_from_model(model: repas::Model) -> Repas {
    Repas {
        id: model.id,
        eleve_id: model.eleve_id,
        menu_id: model.menu_id,
        date: model.date,
        note: model.note,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

fn repas_to_active(repas_record: &Repas) -> repas::ActiveModel {
    repas::ActiveModel {
        id: Set(repas_record.id),
        eleve_id: Set(repas_record.eleve_id),
        menu_id: Set(repas_record.menu_id),
        date: Set(repas_record.date),
        note: Set(repas_record.note.clone()),
        created_at: Set(repas_record.created_at),
        created_by: Set(repas_record.created_by),
    }
}

// ── Inscription repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInscriptionRepository {
    pub db: DatabaseConnection,
}

impl InscriptionRepository for DbInscriptionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<InscriptionMensuelle>, CantineError> {
        let model = inscriptions_mensuelles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find inscription by id")?;
        Ok(model.map(inscription_from_model))
    }

    async fn list(
        &self,
        filtre: InscriptionFiltre,
        page: PageRequest,
    ) -> Result<Vec<InscriptionMensuelle>, CantineError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = inscriptions_mensuelles::Entity::find();
        if let Some(annee) = filtre.annee {
            query = query.filter(inscriptions_mensuelles::Column::Annee.eq(annee));
        }
        if let Some(mois) = filtre.mois {
            query = query.filter(inscriptions_mensuelles::Column::Mois.eq(mois as i16));
        }
        if let Some(eleve_id) = filtre.eleve_id {
            query = query.filter(inscriptions_mensuelles::Column::EleveId.eq(eleve_id));
        }
        let models = query
            .order_by_desc(inscriptions_mensuelles::Column::Annee)
            .order_by_desc(inscriptions_mensuelles::Column::Mois)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list inscriptions")?;
        Ok(models.into_iter().map(inscription_from_model).collect())
    }

    async fn create(&self, inscription: &InscriptionMensuelle) -> Result<(), CantineError> {
        inscription_to_active(inscription)
            .insert(&self.db)
            .await
            .map_err(|e| {
                map_unique(
                    e,
                    CantineError::InscriptionDejaExistante,
                    "insert inscription",
                )
            })?;
        Ok(())
    }

    async fn update(&self, inscription: &InscriptionMensuelle) -> Result<(), CantineError> {
        inscription_to_active(inscription)
            .update(&self.db)
            .await
            .context("update inscription")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CantineError> {
        let result = inscriptions_mensuelles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete inscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_mois(&self, annee: i32, mois: u8) -> Result<u64, CantineError> {
        let count = inscriptions_mensuelles::Entity::find()
            .filter(inscriptions_mensuelles::Column::Annee.eq(annee))
            .filter(inscriptions_mensuelles::Column::Mois.eq(mois as i16))
            .filter(inscriptions_mensuelles::Column::Inscrit.eq(true))
            .count(&self.db)
            .await
            .context("count inscriptions of month")?;
        Ok(count)
    }
}

fn inscription_from_model(model: inscriptions_mensuelles::Model) -> InscriptionMensuelle {
    InscriptionMensuelle {
        id: model.id,
        eleve_id: model.eleve_id,
        annee: model.annee,
        mois: model.mois as u8,
        inscrit: model.inscrit,
        notes: model.notes,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

fn inscription_to_active(
    inscription: &InscriptionMensuelle,
) -> inscriptions_mensuelles::ActiveModel {
    inscriptions_mensuelles::ActiveModel {
        id: Set(inscription.id),
        eleve_id: Set(inscription.eleve_id),
        annee: Set(inscription.annee),
        mois: Set(inscription.mois as i16),
        inscrit: Set(inscription.inscrit),
        notes: Set(inscription.notes.clone()),
        created_at: Set(inscription.created_at),
        created_by: Set(inscription.created_by),
    }
}

// ── Facture repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFactureRepository {
    pub db: DatabaseConnection,
}

impl FactureRepository for DbFactureRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Facture>, CantineError> {
        let model = factures::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find facture by id")?;
        model.map(facture_from_model).transpose()
    }

    async fn list(
        &self,
        filtre: FactureFiltre,
        page: PageRequest,
    ) -> Result<Vec<Facture>, CantineError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = factures::Entity::find();
        if let Some(annee) = filtre.annee {
            query = query.filter(factures::Column::Annee.eq(annee));
        }
        if let Some(mois) = filtre.mois {
            query = query.filter(factures::Column::Mois.eq(mois as i16));
        }
        if let Some(statut) = filtre.statut {
            query = query.filter(factures::Column::Statut.eq(statut.as_str()));
        }
        if let Some(ref q) = filtre.recherche {
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::col((factures::Entity, factures::Column::Numero))
                            .ilike(ilike_pattern(q)),
                    )
                    .add(
                        Expr::col((factures::Entity, factures::Column::Notes))
                            .ilike(ilike_pattern(q)),
                    ),
            );
        }
        let models = query
            .order_by_desc(factures::Column::Annee)
            .order_by_desc(factures::Column::Mois)
            .order_by_desc(factures::Column::DateEmission)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list factures")?;
        models.into_iter().map(facture_from_model).collect()
    }

    async fn create(&self, facture_record: &Facture) -> Result<Facture, CantineError> {
        let facture_record = facture_record.clone();
        self.db
            .transaction::<_, Facture, CantineError>(|txn| {
                Box::pin(async move {
                    let mut facture_record = facture_record;
                    if facture_record.numero.is_empty() {
                        // Serialize allocation: the seed row is the most
                        // recently created invoice, so two concurrent
                        // creators must not read it at the same time.
                        txn.execute(Statement::from_string(
                            txn.get_database_backend(),
                            format!("SELECT pg_advisory_xact_lock({FACTURE_NUMERO_LOCK_KEY})"),
                        ))
                        .await
                        .map_err(|e| internal(e, "facture numero lock"))?;

                        let derniere = factures::Entity::find()
                            .order_by_desc(factures::Column::CreatedAt)
                            .order_by_desc(factures::Column::Id)
                            .one(txn)
                            .await
                            .map_err(|e| internal(e, "find last facture"))?;

                        facture_record.numero = facture::prochain_numero(
                            derniere.as_ref().map(|f| f.numero.as_str()),
                            facture_record.annee,
                            facture_record.mois,
                        );
                    }

                    facture_to_active(&facture_record)
                        .insert(txn)
                        .await
                        .map_err(|e| {
                            map_unique(e, CantineError::NumeroDejaExistant, "insert facture")
                        })?;
                    Ok(facture_record)
                })
            })
            .await
            .map_err(|e| flatten_txn(e, "create facture"))
    }

    async fn update(&self, facture_record: &Facture) -> Result<(), CantineError> {
        facture_to_active(facture_record)
            .update(&self.db)
            .await
            .map_err(|e| map_unique(e, CantineError::NumeroDejaExistant, "update facture"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CantineError> {
        let result = factures::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete facture")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_en_attente(&self, created_by: Uuid) -> Result<u64, CantineError> {
        let count = factures::Entity::find()
            .filter(factures::Column::Statut.eq(FactureStatut::Envoyee.as_str()))
            .filter(factures::Column::CreatedBy.eq(created_by))
            .count(&self.db)
            .await
            .context("count pending factures")?;
        Ok(count)
    }

    async fn somme_montants(&self, annee: i32, mois: u8) -> Result<Decimal, CantineError> {
        #[derive(FromQueryResult)]
        struct Row {
            total: Option<Decimal>,
        }

        let row = Row::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"SELECT SUM("montant_total") AS "total" FROM "factures" WHERE "annee" = $1 AND "mois" = $2"#,
            [annee.into(), (mois as i16).into()],
        ))
        .one(&self.db)
        .await
        .context("sum facture amounts")?;
        Ok(row.and_then(|r| r.total).unwrap_or(Decimal::ZERO))
    }
}

fn facture_from_model(model: factures::Model) -> Result<Facture, CantineError> {
    let statut = FactureStatut::from_str_opt(&model.statut).ok_or_else(|| {
        CantineError::Internal(anyhow::anyhow!(
            "unknown facture statut in storage: {}",
            model.statut
        ))
    })?;
    Ok(Facture {
        id: model.id,
        numero: model.numero,
        annee: model.annee,
        mois: model.mois as u8,
        nombre_jours_travail: model.nombre_jours_travail,
        nombre_repas_servis: model.nombre_repas_servis,
        prix_unitaire_repas: model.prix_unitaire_repas,
        montant_total: model.montant_total,
        statut,
        date_emission: model.date_emission,
        date_paiement: model.date_paiement,
        notes: model.notes,
        created_at: model.created_at,
        created_by: model.created_by,
    })
}

fn facture_to_active(facture_record: &Facture) -> factures::ActiveModel {
    factures::ActiveModel {
        id: Set(facture_record.id),
        numero: Set(facture_record.numero.clone()),
        annee: Set(facture_record.annee),
        mois: Set(facture_record.mois as i16),
        nombre_jours_travail: Set(facture_record.nombre_jours_travail),
        nombre_repas_servis: Set(facture_record.nombre_repas_servis),
        prix_unitaire_repas: Set(facture_record.prix_unitaire_repas),
        montant_total: Set(facture_record.montant_total),
        statut: Set(facture_record.statut.as_str().to_owned()),
        date_emission: Set(facture_record.date_emission),
        date_paiement: Set(facture_record.date_paiement),
        notes: Set(facture_record.notes.clone()),
        created_at: Set(facture_record.created_at),
        created_by: Set(facture_record.created_by),
    }
}

// ── ActionLog repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActionLogRepository {
    pub db: DatabaseConnection,
}

impl ActionLogRepository for DbActionLogRepository {
    async fn append(&self, entry: &ActionEntry) -> Result<(), CantineError> {
        action_logs::ActiveModel {
            id: Set(entry.id),
            user_id: Set(entry.user_id),
            action_type: Set(entry.action.as_str().to_owned()),
            model_name: Set(entry.model_name.clone()),
            object_id: Set(entry.object_id),
            description: Set(entry.description.clone()),
            created_at: Set(entry.created_at),
        }
        .insert(&self.db)
        .await
        .context("append action log")?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<ActionEntry>, CantineError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = action_logs::Entity::find()
            .order_by_desc(action_logs::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list action logs")?;
        models.into_iter().map(action_entry_from_model).collect()
    }
}

fn action_entry_from_model(model: action_logs::Model) -> Result<ActionEntry, CantineError> {
    let action = cantine_domain::action::ActionKind::from_str_opt(&model.action_type)
        .ok_or_else(|| {
            CantineError::Internal(anyhow::anyhow!(
                "unknown action type in storage: {}",
                model.action_type
            ))
        })?;
    Ok(ActionEntry {
        id: model.id,
        user_id: model.user_id,
        action,
        model_name: model.model_name,
        object_id: model.object_id,
        description: model.description,
        created_at: model.created_at,
    })
}

// ── Sauvegarde repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSauvegardeRepository {
    pub db: DatabaseConnection,
}

impl SauvegardeRepository for DbSauvegardeRepository {
    async fn export_dump(&self) -> Result<CantineDump, CantineError> {
        let users = users::Entity::find()
            .all(&self.db)
            .await
            .context("dump users")?;
        let profils = profils_prestataires::Entity::find()
            .all(&self.db)
            .await
            .context("dump profils")?;
        let classes_rows = classes::Entity::find()
            .all(&self.db)
            .await
            .context("dump classes")?;
        let eleves_rows = eleves::Entity::find()
            .all(&self.db)
            .await
            .context("dump eleves")?;
        let menus_rows = menus::Entity::find()
            .all(&self.db)
            .await
            .context("dump menus")?;
        let repas_rows = repas::Entity::find()
            .all(&self.db)
            .await
            .context("dump repas")?;
        let inscriptions = inscriptions_mensuelles::Entity::find()
            .all(&self.db)
            .await
            .context("dump inscriptions")?;
        let factures_rows = factures::Entity::find()
            .all(&self.db)
            .await
            .context("dump factures")?;
        let logs = action_logs::Entity::find()
            .all(&self.db)
            .await
            .context("dump action logs")?;

        Ok(CantineDump {
            version: DUMP_VERSION,
            exported_at: chrono::Utc::now(),
            users: users.into_iter().map(dump_user).collect(),
            profils: profils.into_iter().map(dump_profil).collect(),
            classes: classes_rows.into_iter().map(dump_classe).collect(),
            eleves: eleves_rows.into_iter().map(dump_eleve).collect(),
            menus: menus_rows.into_iter().map(dump_menu).collect(),
            repas: repas_rows.into_iter().map(dump_repas).collect(),
            inscriptions: inscriptions.into_iter().map(dump_inscription).collect(),
            factures: factures_rows.into_iter().map(dump_facture).collect(),
            action_logs: logs.into_iter().map(dump_action_log).collect(),
        })
    }

    async fn restore_dump(&self, dump: &CantineDump) -> Result<(), CantineError> {
        let dump = dump.clone();
        self.db
            .transaction::<_, (), CantineError>(|txn| {
                Box::pin(async move {
                    // Children first, parents last.
                    action_logs::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear action logs"))?;
                    repas::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear repas"))?;
                    inscriptions_mensuelles::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear inscriptions"))?;
                    factures::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear factures"))?;
                    eleves::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear eleves"))?;
                    menus::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear menus"))?;
                    classes::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear classes"))?;
                    profils_prestataires::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear profils"))?;
                    users::Entity::delete_many()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "clear users"))?;

                    // Parents first, children last.
                    let _ = users::Entity::insert_many(
                        dump.users.iter().map(restore_user),
                    )
                    .on_empty_do_nothing()
                    .exec(txn)
                    .await
                    .map_err(|e| internal(e, "restore users"))?;
                    let _ = profils_prestataires::Entity::insert_many(
                        dump.profils.iter().map(restore_profil),
                    )
                    .on_empty_do_nothing()
                    .exec(txn)
                    .await
                    .map_err(|e| internal(e, "restore profils"))?;
                    let _ = classes::Entity::insert_many(
                        dump.classes.iter().map(restore_classe),
                    )
                    .on_empty_do_nothing()
                    .exec(txn)
                    .await
                    .map_err(|e| internal(e, "restore classes"))?;
                    let _ = eleves::Entity::insert_many(
                        dump.eleves.iter().map(restore_eleve),
                    )
                    .on_empty_do_nothing()
                    .exec(txn)
                    .await
                    .map_err(|e| internal(e, "restore eleves"))?;
                    let _ = menus::Entity::insert_many(dump.menus.iter().map(restore_menu))
                        .on_empty_do_nothing()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "restore menus"))?;
                    let _ = repas::Entity::insert_many(dump.repas.iter().map(restore_repas))
                        .on_empty_do_nothing()
                        .exec(txn)
                        .await
                        .map_err(|e| internal(e, "restore repas"))?;
                    let _ = inscriptions_mensuelles::Entity::insert_many(
                        dump.inscriptions.iter().map(restore_inscription),
                    )
                    .on_empty_do_nothing()
                    .exec(txn)
                    .await
                    .map_err(|e| internal(e, "restore inscriptions"))?;
                    let _ = factures::Entity::insert_many(
                        dump.factures.iter().map(restore_facture),
                    )
                    .on_empty_do_nothing()
                    .exec(txn)
                    .await
                    .map_err(|e| internal(e, "restore factures"))?;
                    let _ = action_logs::Entity::insert_many(
                        dump.action_logs.iter().map(restore_action_log),
                    )
                    .on_empty_do_nothing()
                    .exec(txn)
                    .await
                    .map_err(|e| internal(e, "restore action logs"))?;

                    Ok(())
                })
            })
            .await
            .map_err(|e| flatten_txn(e, "restore dump"))
    }
}

fn dump_user(m: users::Model) -> DumpUser {
    DumpUser {
        id: m.id,
        username: m.username,
        password_hash: m.password_hash,
        full_name: m.full_name,
        email: m.email,
        actif: m.actif,
        created_at: m.created_at,
    }
}

fn restore_user(u: &DumpUser) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(u.id),
        username: Set(u.username.clone()),
        password_hash: Set(u.password_hash.clone()),
        full_name: Set(u.full_name.clone()),
        email: Set(u.email.clone()),
        actif: Set(u.actif),
        created_at: Set(u.created_at),
    }
}

fn dump_profil(m: profils_prestataires::Model) -> DumpProfil {
    DumpProfil {
        id: m.id,
        user_id: m.user_id,
        role: m.role,
        telephone: m.telephone,
        entreprise: m.entreprise,
        actif: m.actif,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn restore_profil(p: &DumpProfil) -> profils_prestataires::ActiveModel {
    profils_prestataires::ActiveModel {
        id: Set(p.id),
        user_id: Set(p.user_id),
        role: Set(p.role.clone()),
        telephone: Set(p.telephone.clone()),
        entreprise: Set(p.entreprise.clone()),
        actif: Set(p.actif),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

fn dump_classe(m: classes::Model) -> DumpClasse {
    DumpClasse {
        id: m.id,
        nom: m.nom,
        niveau: m.niveau,
    }
}

fn restore_classe(c: &DumpClasse) -> classes::ActiveModel {
    classes::ActiveModel {
        id: Set(c.id),
        nom: Set(c.nom.clone()),
        niveau: Set(c.niveau.clone()),
    }
}

fn dump_eleve(m: eleves::Model) -> DumpEleve {
    DumpEleve {
        id: m.id,
        prenom: m.prenom,
        nom: m.nom,
        classe_id: m.classe_id,
        actif: m.actif,
        telephone_parent: m.telephone_parent,
        email_parent: m.email_parent,
        photo: m.photo,
        notes: m.notes,
        date_inscription: m.date_inscription,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn restore_eleve(e: &DumpEleve) -> eleves::ActiveModel {
    eleves::ActiveModel {
        id: Set(e.id),
        prenom: Set(e.prenom.clone()),
        nom: Set(e.nom.clone()),
        classe_id: Set(e.classe_id),
        actif: Set(e.actif),
        telephone_parent: Set(e.telephone_parent.clone()),
        email_parent: Set(e.email_parent.clone()),
        photo: Set(e.photo.clone()),
        notes: Set(e.notes.clone()),
        date_inscription: Set(e.date_inscription),
        created_at: Set(e.created_at),
        updated_at: Set(e.updated_at),
    }
}

fn dump_menu(m: menus::Model) -> DumpMenu {
    DumpMenu {
        id: m.id,
        date: m.date,
        jour_semaine: m.jour_semaine,
        plat_principal: m.plat_principal,
        accompagnement: m.accompagnement,
        dessert: m.dessert,
        disponible: m.disponible,
        notes: m.notes,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn restore_menu(m: &DumpMenu) -> menus::ActiveModel {
    menus::ActiveModel {
        id: Set(m.id),
        date: Set(m.date),
        jour_semaine: Set(m.jour_semaine.clone()),
        plat_principal: Set(m.plat_principal.clone()),
        accompagnement: Set(m.accompagnement.clone()),
        dessert: Set(m.dessert.clone()),
        disponible: Set(m.disponible),
        notes: Set(m.notes.clone()),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    }
}

fn dump_repas(m: repas::Model) -> DumpRepas {
    DumpRepas {
        id: m.id,
        eleve_id: m.eleve_id,
        menu_id: m.menu_id,
        date: m.date,
        note: m.note,
        created_at: m.created_at,
        created_by: m.created_by,
    }
}

fn restore_repas(r: &DumpRepas) -> repas::ActiveModel {
    repas::ActiveModel {
        id: Set(r.id),
        eleve_id: Set(r.eleve_id),
        menu_id: Set(r.menu_id),
        date: Set(r.date),
        note: Set(r.note.clone()),
        created_at: Set(r.created_at),
        created_by: Set(r.created_by),
    }
}

fn dump_inscription(m: inscriptions_mensuelles::Model) -> DumpInscription {
    DumpInscription {
        id: m.id,
        eleve_id: m.eleve_id,
        annee: m.annee,
        mois: m.mois,
        inscrit: m.inscrit,
        notes: m.notes,
        created_at: m.created_at,
        created_by: m.created_by,
    }
}

fn restore_inscription(i: &DumpInscription) -> inscriptions_mensuelles::ActiveModel {
    inscriptions_mensuelles::ActiveModel {
        id: Set(i.id),
        eleve_id: Set(i.eleve_id),
        annee: Set(i.annee),
        mois: Set(i.mois),
        inscrit: Set(i.inscrit),
        notes: Set(i.notes.clone()),
        created_at: Set(i.created_at),
        created_by: Set(i.created_by),
    }
}

fn dump_facture(m: factures::Model) -> DumpFacture {
    DumpFacture {
        id: m.id,
        numero: m.numero,
        annee: m.annee,
        mois: m.mois,
        nombre_jours_travail: m.nombre_jours_travail,
        nombre_repas_servis: m.nombre_repas_servis,
        prix_unitaire_repas: m.prix_unitaire_repas,
        montant_total: m.montant_total,
        statut: m.statut,
        date_emission: m.date_emission,
        date_paiement: m.date_paiement,
        notes: m.notes,
        created_at: m.created_at,
        created_by: m.created_by,
    }
}

fn restore_facture(f: &DumpFacture) -> factures::ActiveModel {
    factures::ActiveModel {
        id: Set(f.id),
        numero: Set(f.numero.clone()),
        annee: Set(f.annee),
        mois: Set(f.mois),
        nombre_jours_travail: Set(f.nombre_jours_travail),
        nombre_repas_servis: Set(f.nombre_repas_servis),
        prix_unitaire_repas: Set(f.prix_unitaire_repas),
        montant_total: Set(f.montant_total),
        statut: Set(f.statut.clone()),
        date_emission: Set(f.date_emission),
        date_paiement: Set(f.date_paiement),
        notes: Set(f.notes.clone()),
        created_at: Set(f.created_at),
        created_by: Set(f.created_by),
    }
}

fn dump_action_log(m: action_logs::Model) -> DumpActionLog {
    DumpActionLog {
        id: m.id,
        user_id: m.user_id,
        action_type: m.action_type,
        model_name: m.model_name,
        object_id: m.object_id,
        description: m.description,
        created_at: m.created_at,
    }
}

fn restore_action_log(l: &DumpActionLog) -> action_logs::ActiveModel {
    action_logs::ActiveModel {
        id: Set(l.id),
        user_id: Set(l.user_id),
        action_type: Set(l.action_type.clone()),
        model_name: Set(l.model_name.clone()),
        object_id: Set(l.object_id),
        description: Set(l.description.clone()),
        created_at: Set(l.created_at),
    }
}
