use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(ovation_events_migration::Migrator).await;
}
