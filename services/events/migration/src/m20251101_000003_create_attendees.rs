use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendees::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendees::EventId).uuid().not_null())
                    .col(ColumnDef::new(Attendees::Name).string().not_null())
                    .col(ColumnDef::new(Attendees::Email).string())
                    .col(ColumnDef::new(Attendees::Phone).string())
                    .col(ColumnDef::new(Attendees::Category).string())
                    .col(ColumnDef::new(Attendees::GuestNames).text())
                    .col(ColumnDef::new(Attendees::MealPreference).string())
                    .col(
                        ColumnDef::new(Attendees::Status)
                            .string()
                            .not_null()
                            .default("registered"),
                    )
                    .col(ColumnDef::new(Attendees::CheckedInAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Attendees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendees::Table, Attendees::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Attendees::Table)
                    .col(Attendees::EventId)
                    .name("idx_attendees_event_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Attendees {
    Table,
    Id,
    EventId,
    Name,
    Email,
    Phone,
    Category,
    GuestNames,
    MealPreference,
    Status,
    CheckedInAt,
    CreatedAt,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
}
