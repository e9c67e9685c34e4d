use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recipients::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recipients::AwardEventId).uuid().not_null())
                    .col(ColumnDef::new(Recipients::Name).string().not_null())
                    .col(
                        ColumnDef::new(Recipients::FollowerCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Recipients::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Recipients::Status)
                            .string()
                            .not_null()
                            .default("generated"),
                    )
                    .col(ColumnDef::new(Recipients::RedeemedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Recipients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Recipients::Table, Recipients::AwardEventId)
                            .to(AwardEvents::Table, AwardEvents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Recipients::Table)
                    .col(Recipients::AwardEventId)
                    .name("idx_recipients_award_event_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recipients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Recipients {
    Table,
    Id,
    AwardEventId,
    Name,
    FollowerCount,
    Token,
    Status,
    RedeemedAt,
    CreatedAt,
}

#[derive(Iden)]
enum AwardEvents {
    Table,
    Id,
}
