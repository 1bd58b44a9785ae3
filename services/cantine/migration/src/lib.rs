use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_profils_prestataires;
mod m20260801_000003_create_classes;
mod m20260801_000004_create_eleves;
mod m20260801_000005_create_menus;
mod m20260801_000006_create_repas;
mod m20260801_000007_create_inscriptions_mensuelles;
mod m20260801_000008_create_factures;
mod m20260801_000009_create_action_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_profils_prestataires::Migration),
            Box::new(m20260801_000003_create_classes::Migration),
            Box::new(m20260801_000004_create_eleves::Migration),
            Box::new(m20260801_000005_create_menus::Migration),
            Box::new(m20260801_000006_create_repas::Migration),
            Box::new(m20260801_000007_create_inscriptions_mensuelles::Migration),
            Box::new(m20260801_000008_create_factures::Migration),
            Box::new(m20260801_000009_create_action_logs::Migration),
        ]
    }
}
