use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InscriptionsMensuelles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InscriptionsMensuelles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InscriptionsMensuelles::EleveId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InscriptionsMensuelles::Annee)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InscriptionsMensuelles::Mois)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InscriptionsMensuelles::Inscrit)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(InscriptionsMensuelles::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(InscriptionsMensuelles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(InscriptionsMensuelles::CreatedBy).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                InscriptionsMensuelles::Table,
                                InscriptionsMensuelles::EleveId,
                            )
                            .to(Eleves::Table, Eleves::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                InscriptionsMensuelles::Table,
                                InscriptionsMensuelles::CreatedBy,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One enrollment row per student per month.
        manager
            .create_index(
                Index::create()
                    .table(InscriptionsMensuelles::Table)
                    .col(InscriptionsMensuelles::EleveId)
                    .col(InscriptionsMensuelles::Annee)
                    .col(InscriptionsMensuelles::Mois)
                    .unique()
                    .name("idx_inscriptions_eleve_annee_mois")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(InscriptionsMensuelles::Table)
                    .col(InscriptionsMensuelles::Annee)
                    .col(InscriptionsMensuelles::Mois)
                    .name("idx_inscriptions_annee_mois")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InscriptionsMensuelles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum InscriptionsMensuelles {
    Table,
    Id,
    EleveId,
    Annee,
    Mois,
    Inscrit,
    Notes,
    CreatedAt,
    CreatedBy,
}

#[derive(Iden)]
enum Eleves {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
