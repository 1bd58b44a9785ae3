use sea_orm::entity::prelude::*;

/// School class (6ème, Seconde, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub nom: String,
    pub niveau: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::eleves::Entity")]
    Eleves,
}

impl Related<super::eleves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Eleves.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
