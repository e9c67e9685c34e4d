pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_events;
mod m20251101_000002_create_award_events;
mod m20251101_000003_create_attendees;
mod m20251101_000004_create_invite_codes;
mod m20251101_000005_create_categories;
mod m20251101_000006_create_nominees;
mod m20251101_000007_create_votes;
mod m20251101_000008_create_recipients;
mod m20251101_000009_create_otps;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_events::Migration),
            Box::new(m20251101_000002_create_award_events::Migration),
            Box::new(m20251101_000003_create_attendees::Migration),
            Box::new(m20251101_000004_create_invite_codes::Migration),
            Box::new(m20251101_000005_create_categories::Migration),
            Box::new(m20251101_000006_create_nominees::Migration),
            Box::new(m20251101_000007_create_votes::Migration),
            Box::new(m20251101_000008_create_recipients::Migration),
            Box::new(m20251101_000009_create_otps::Migration),
        ]
    }
}
