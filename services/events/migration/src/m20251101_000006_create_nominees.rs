use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Nominees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Nominees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Nominees::AwardEventId).uuid().not_null())
                    .col(ColumnDef::new(Nominees::CategoryId).uuid())
                    .col(ColumnDef::new(Nominees::Name).string().not_null())
                    .col(
                        ColumnDef::new(Nominees::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Nominees::ImageUrl).string())
                    .col(
                        ColumnDef::new(Nominees::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Nominees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Nominees::Table, Nominees::AwardEventId)
                            .to(AwardEvents::Table, AwardEvents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Nominees::Table, Nominees::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Nominees::Table)
                    .col(Nominees::AwardEventId)
                    .col(Nominees::CategoryId)
                    .name("idx_nominees_award_event_id_category_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Nominees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Nominees {
    Table,
    Id,
    AwardEventId,
    CategoryId,
    Name,
    Description,
    ImageUrl,
    Position,
    CreatedAt,
}

#[derive(Iden)]
enum AwardEvents {
    Table,
    Id,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
}
