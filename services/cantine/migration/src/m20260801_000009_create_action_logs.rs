use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActionLogs::UserId).uuid())
                    .col(ColumnDef::new(ActionLogs::ActionType).string().not_null())
                    .col(ColumnDef::new(ActionLogs::ModelName).string().not_null())
                    .col(ColumnDef::new(ActionLogs::ObjectId).uuid())
                    .col(ColumnDef::new(ActionLogs::Description).text().not_null())
                    .col(
                        ColumnDef::new(ActionLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActionLogs::Table, ActionLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ActionLogs::Table)
                    .col(ActionLogs::UserId)
                    .col(ActionLogs::CreatedAt)
                    .name("idx_action_logs_user_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ActionLogs::Table)
                    .col(ActionLogs::ActionType)
                    .col(ActionLogs::CreatedAt)
                    .name("idx_action_logs_type_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ActionLogs {
    Table,
    Id,
    UserId,
    ActionType,
    ModelName,
    ObjectId,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
