use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Votes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Votes::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Votes::EventId).uuid().not_null())
                    .col(ColumnDef::new(Votes::NomineeId).uuid().not_null())
                    .col(ColumnDef::new(Votes::VoterPhone).string().not_null())
                    .col(ColumnDef::new(Votes::VoterName).string())
                    .col(ColumnDef::new(Votes::Weight).integer())
                    .col(ColumnDef::new(Votes::UniquenessKey).string().not_null())
                    .col(
                        ColumnDef::new(Votes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Votes::Table, Votes::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One vote per phone per scope; the insert path relies on this index.
        manager
            .create_index(
                Index::create()
                    .table(Votes::Table)
                    .col(Votes::UniquenessKey)
                    .col(Votes::VoterPhone)
                    .unique()
                    .name("uq_votes_uniqueness_key_voter_phone")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Votes::Table)
                    .col(Votes::CategoryId)
                    .col(Votes::NomineeId)
                    .name("idx_votes_category_id_nominee_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Votes {
    Table,
    Id,
    CategoryId,
    EventId,
    NomineeId,
    VoterPhone,
    VoterName,
    Weight,
    UniquenessKey,
    CreatedAt,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
}
