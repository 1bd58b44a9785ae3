use sea_orm::entity::prelude::*;

/// Login identity. Authorization is carried by the associated
/// `profils_prestataires` row, never by this record alone.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub actif: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::profils_prestataires::Entity")]
    Profil,
    #[sea_orm(has_many = "super::action_logs::Entity")]
    ActionLogs,
}

impl Related<super::profils_prestataires::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profil.def()
    }
}

impl Related<super::action_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActionLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
