use sea_orm::entity::prelude::*;

/// Student enrolled at the canteen.
///
/// Soft-retired via `actif`; `date_inscription` is set once at creation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "eleves")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub prenom: String,
    pub nom: String,
    pub classe_id: Option<Uuid>,
    pub actif: bool,
    pub telephone_parent: String,
    pub email_parent: String,
    pub photo: Option<String>,
    pub notes: String,
    pub date_inscription: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClasseId",
        to = "super::classes::Column::Id"
    )]
    Classe,
    #[sea_orm(has_many = "super::repas::Entity")]
    Repas,
    #[sea_orm(has_many = "super::inscriptions_mensuelles::Entity")]
    InscriptionsMensuelles,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classe.def()
    }
}

impl Related<super::repas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repas.def()
    }
}

impl Related<super::inscriptions_mensuelles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InscriptionsMensuelles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
