use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

const USAGE: &str = "Usage: cargo run -p migration -- [up|down|fresh|refresh|reset|status]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./expense_tracker.db?mode=rwc".to_string());

    let db = Database::connect(&db_url).await?;

    match command.as_str() {
        "up" => Migrator::up(&db, None).await?,
        // Only the last applied migration.
        "down" => Migrator::down(&db, Some(1)).await?,
        "fresh" => Migrator::fresh(&db).await?,
        "refresh" => Migrator::refresh(&db).await?,
        "reset" => Migrator::reset(&db).await?,
        "status" => Migrator::status(&db).await?,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
