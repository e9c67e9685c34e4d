use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AwardEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AwardEvents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AwardEvents::Name).string().not_null())
                    .col(
                        ColumnDef::new(AwardEvents::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(AwardEvents::HeaderImage).string())
                    .col(
                        ColumnDef::new(AwardEvents::SponsorImages)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(AwardEvents::DigitalMediaSponsorIndex).integer())
                    .col(
                        ColumnDef::new(AwardEvents::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AwardEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AwardEvents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AwardEvents {
    Table,
    Id,
    Name,
    Description,
    HeaderImage,
    SponsorImages,
    DigitalMediaSponsorIndex,
    IsActive,
    CreatedAt,
}
