use sea_orm::entity::prelude::*;

/// Daily menu, at most one per calendar date.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub date: chrono::NaiveDate,
    pub jour_semaine: String,
    pub plat_principal: String,
    pub accompagnement: String,
    pub dessert: String,
    pub disponible: bool,
    pub notes: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::repas::Entity")]
    Repas,
}

impl Related<super::repas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
