use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repas::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Repas::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Repas::EleveId).uuid().not_null())
                    .col(ColumnDef::new(Repas::MenuId).uuid())
                    .col(ColumnDef::new(Repas::Date).date().not_null())
                    .col(ColumnDef::new(Repas::Note).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Repas::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Repas::CreatedBy).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Repas::Table, Repas::EleveId)
                            .to(Eleves::Table, Eleves::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Repas::Table, Repas::MenuId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Repas::Table, Repas::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One meal per student per day; the attendance recorder relies on
        // this index for its insert-if-absent ON CONFLICT target.
        manager
            .create_index(
                Index::create()
                    .table(Repas::Table)
                    .col(Repas::EleveId)
                    .col(Repas::Date)
                    .unique()
                    .name("idx_repas_eleve_date")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Repas::Table)
                    .col(Repas::Date)
                    .name("idx_repas_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Repas::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Repas {
    Table,
    Id,
    EleveId,
    MenuId,
    Date,
    Note,
    CreatedAt,
    CreatedBy,
}

#[derive(Iden)]
enum Eleves {
    Table,
    Id,
}

#[derive(Iden)]
enum Menus {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
