use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Eleves::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Eleves::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Eleves::Prenom).string().not_null())
                    .col(ColumnDef::new(Eleves::Nom).string().not_null())
                    .col(ColumnDef::new(Eleves::ClasseId).uuid())
                    .col(
                        ColumnDef::new(Eleves::Actif)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Eleves::TelephoneParent)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Eleves::EmailParent)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Eleves::Photo).string())
                    .col(
                        ColumnDef::new(Eleves::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Eleves::DateInscription).date().not_null())
                    .col(
                        ColumnDef::new(Eleves::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Eleves::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Eleves::Table, Eleves::ClasseId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Eleves::Table)
                    .col(Eleves::Nom)
                    .col(Eleves::Prenom)
                    .name("idx_eleves_nom_prenom")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Eleves::Table)
                    .col(Eleves::Actif)
                    .name("idx_eleves_actif")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Eleves::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Eleves {
    Table,
    Id,
    Prenom,
    Nom,
    ClasseId,
    Actif,
    TelephoneParent,
    EmailParent,
    Photo,
    Notes,
    DateInscription,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}
