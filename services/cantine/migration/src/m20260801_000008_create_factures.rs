use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Factures::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Factures::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Factures::Numero)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Factures::Annee).integer().not_null())
                    .col(ColumnDef::new(Factures::Mois).small_integer().not_null())
                    .col(
                        ColumnDef::new(Factures::NombreJoursTravail)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Factures::NombreRepasServis)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Factures::PrixUnitaireRepas)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Factures::MontantTotal)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Factures::Statut)
                            .string()
                            .not_null()
                            .default("BROUILLON"),
                    )
                    .col(ColumnDef::new(Factures::DateEmission).date().not_null())
                    .col(ColumnDef::new(Factures::DatePaiement).date())
                    .col(
                        ColumnDef::new(Factures::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Factures::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Factures::CreatedBy).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Factures::Table, Factures::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Factures::Table)
                    .col(Factures::Annee)
                    .col(Factures::Mois)
                    .name("idx_factures_annee_mois")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Factures::Table)
                    .col(Factures::Statut)
                    .name("idx_factures_statut")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Factures::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Factures {
    Table,
    Id,
    Numero,
    Annee,
    Mois,
    NombreJoursTravail,
    NombreRepasServis,
    PrixUnitaireRepas,
    MontantTotal,
    Statut,
    DateEmission,
    DatePaiement,
    Notes,
    CreatedAt,
    CreatedBy,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
