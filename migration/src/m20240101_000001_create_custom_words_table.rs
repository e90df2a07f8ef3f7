use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomWords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CustomWords::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CustomWords::Word).string().not_null())
                    .col(ColumnDef::new(CustomWords::CreatorName).string().not_null())
                    .col(
                        ColumnDef::new(CustomWords::Category)
                            .string()
                            .not_null()
                            .default("Custom"),
                    )
                    .col(
                        ColumnDef::new(CustomWords::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CustomWords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing only ever asks for unused words, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_custom_words_is_used_created_at")
                    .table(CustomWords::Table)
                    .col(CustomWords::IsUsed)
                    .col(CustomWords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomWords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CustomWords {
    Table,
    Id,
    Word,
    CreatorName,
    Category,
    IsUsed,
    CreatedAt,
}
