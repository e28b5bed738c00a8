use sea_orm_migration::prelude::*;

use cackalacky_badge_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
