use sea_orm::entity::prelude::*;

/// Monthly canteen enrollment for a student.
///
/// Unique on (eleve_id, annee, mois).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inscriptions_mensuelles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub eleve_id: Uuid,
    pub annee: i32,
    pub mois: i16,
    pub inscrit: bool,
    pub notes: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::eleves::Entity",
        from = "Column::EleveId",
        to = "super::eleves::Column::Id"
    )]
    Eleve,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    CreatedBy,
}

impl Related<super::eleves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Eleve.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
