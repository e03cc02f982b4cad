//! Default seed script - wipes the marketplace tables and fills them with fake data
//!
//! Run with:
//! ```
//! DATABASE_URL=postgres://... cargo run -p market-seed --bin seed
//! ```
//!
//! `SEED_CONFIG` may point at a JSON file overriding counts or fixing the RNG seed.

use market_seed::config::{DatabaseConfig, SeedConfig};
use market_seed::db::PgStore;
use market_seed::seeder::Seeder;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;
    let database = DatabaseConfig::from_env()?;

    // One connection: every stage runs sequentially on it
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(database.connect_options()?)
        .await?;

    tracing::info!("Connected to database at {}", database.describe());

    let mut rng = config.rng();
    let store = PgStore::new(pool).with_batch_size(config.batch_size);
    let summary = Seeder::new(store, config).run(&mut rng).await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Categories: {}", summary.categories);
    tracing::info!("  Users: {}", summary.users);
    tracing::info!("  Listings: {}", summary.listings);
    tracing::info!("  Transactions: {}", summary.transactions);
    tracing::info!("  Reviews: {}", summary.reviews);
    tracing::info!("  Messages: {}", summary.messages);
    tracing::info!("  Reports: {}", summary.reports);
    tracing::info!("  Shipping: {}", summary.shipping);

    Ok(())
}
