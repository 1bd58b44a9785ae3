use sea_orm::entity::prelude::*;

/// Meal record: evidence that a student ate on a date.
///
/// Unique on (eleve_id, date). `menu_id` is nullable — attendance is
/// recorded even when no menu exists for the date.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "repas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub eleve_id: Uuid,
    pub menu_id: Option<Uuid>,
    pub date: chrono::NaiveDate,
    pub note: String,
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
        belongs_to = "super::menus::Entity",
        from = "Column::MenuId",
        to = "super::menus::Column::Id"
    )]
    Menu,
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

impl Related<super::menus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
