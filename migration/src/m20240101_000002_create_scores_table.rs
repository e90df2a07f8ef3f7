use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Scores::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Scores::Player).string().not_null())
                    .col(ColumnDef::new(Scores::Word).string().not_null())
                    .col(ColumnDef::new(Scores::Score).integer().not_null())
                    .col(ColumnDef::new(Scores::TimeTaken).integer().not_null())
                    .col(
                        ColumnDef::new(Scores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scores_score")
                    .table(Scores::Table)
                    .col(Scores::Score)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scores_time_taken")
                    .table(Scores::Table)
                    .col(Scores::TimeTaken)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Scores {
    Table,
    Id,
    Player,
    Word,
    Score,
    TimeTaken,
    CreatedAt,
}
