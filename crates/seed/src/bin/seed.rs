//! Seed script - creates one user with three written posts
//!
//! Run with:
//! ```
//! cargo run -p seed --bin seed
//! ```

use blog::database::Database;
use seed::config::SeedConfig;
use seed::db::Seeder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries only the created user
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SeedConfig::from_env()?;

    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Connected to database");

    let mut stdout = std::io::stdout().lock();
    Seeder::new(db)
        .with_migrations(config.run_migrations)
        .run(&mut stdout)
        .await?;

    tracing::info!("Seed completed!");

    Ok(())
}
