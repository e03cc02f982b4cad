//! Integration test running the full seeder against PostgreSQL.
//!
//! Seeding truncates every marketplace table, so this only runs against a
//! database named by `TEST_DATABASE_URL`. The test creates the tables it needs
//! if they are missing.
//!
//! Run with: `TEST_DATABASE_URL=postgres://... cargo nextest run -p market-seed postgres`

use std::env;

use market_seed::config::SeedConfig;
use market_seed::db::{MarketStore, PgStore};
use market_seed::seeder::Seeder;
use sqlx::{PgPool, postgres::PgPoolOptions};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL
);
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(100) NOT NULL UNIQUE,
    email VARCHAR(255) NOT NULL UNIQUE,
    join_date DATE NOT NULL,
    status VARCHAR(20) NOT NULL
);
CREATE TABLE IF NOT EXISTS listings (
    id SERIAL PRIMARY KEY,
    user_id INT NOT NULL REFERENCES users(id),
    title VARCHAR(255) NOT NULL,
    price NUMERIC(10, 2) NOT NULL,
    brand VARCHAR(255),
    condition VARCHAR(20) NOT NULL,
    category_id INT NOT NULL REFERENCES categories(id),
    created_at TIMESTAMP NOT NULL,
    status VARCHAR(20) NOT NULL
);
CREATE TABLE IF NOT EXISTS transactions (
    id SERIAL PRIMARY KEY,
    buyer_id INT NOT NULL REFERENCES users(id),
    seller_id INT NOT NULL REFERENCES users(id),
    listing_id INT NOT NULL REFERENCES listings(id),
    transacted_at TIMESTAMP NOT NULL,
    total_amount NUMERIC(10, 2) NOT NULL,
    CHECK (buyer_id <> seller_id)
);
CREATE TABLE IF NOT EXISTS reviews (
    id SERIAL PRIMARY KEY,
    transaction_id INT NOT NULL REFERENCES transactions(id),
    rated_user_id INT NOT NULL REFERENCES users(id),
    rating INT NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comment TEXT,
    created_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS messages (
    id SERIAL PRIMARY KEY,
    sender_id INT NOT NULL REFERENCES users(id),
    receiver_id INT NOT NULL REFERENCES users(id),
    listing_id INT NOT NULL REFERENCES listings(id),
    message_text TEXT NOT NULL,
    sent_at TIMESTAMP NOT NULL,
    read BOOLEAN NOT NULL,
    CHECK (sender_id <> receiver_id)
);
CREATE TABLE IF NOT EXISTS reports (
    id SERIAL PRIMARY KEY,
    reporter_id INT NOT NULL REFERENCES users(id),
    reported_user_id INT NOT NULL REFERENCES users(id),
    listing_id INT NOT NULL REFERENCES listings(id),
    reason VARCHAR(100) NOT NULL,
    created_at TIMESTAMP NOT NULL,
    CHECK (reporter_id <> reported_user_id)
);
CREATE TABLE IF NOT EXISTS shipping (
    id SERIAL PRIMARY KEY,
    transaction_id INT NOT NULL UNIQUE REFERENCES transactions(id),
    ship_date DATE NOT NULL,
    delivery_date DATE NOT NULL,
    shipping_cost NUMERIC(10, 2) NOT NULL,
    status VARCHAR(20) NOT NULL
);
"#;

/// Get database pool, skipping tests if TEST_DATABASE_URL is not set.
async fn get_test_pool() -> Option<PgPool> {
    let database_url = match env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: TEST_DATABASE_URL not set");
            return None;
        }
    };

    match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            None
        }
    }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

#[tokio::test]
async fn test_postgres_seed_twice_keeps_second_run() {
    let Some(pool) = get_test_pool().await else {
        return;
    };

    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to create schema");

    let config = SeedConfig {
        user_count: 30,
        listing_count: 60,
        transaction_count: 40,
        review_count: 50,
        message_count: 45,
        report_count: 20,
        seed: Some(1),
        ..Default::default()
    };

    let seeder = Seeder::new(PgStore::new(pool.clone()), config.clone());
    seeder
        .run(&mut config.rng())
        .await
        .expect("First run failed");

    let second = SeedConfig {
        seed: Some(2),
        ..config
    };
    let summary = seeder
        .run(&mut second.rng())
        .await
        .expect("Second run failed");

    assert_eq!(count(&pool, "users").await, 30);
    assert_eq!(count(&pool, "listings").await, 60);
    assert_eq!(count(&pool, "transactions").await, 40);
    assert_eq!(count(&pool, "reviews").await, summary.reviews as i64);
    assert_eq!(count(&pool, "shipping").await, 40);

    // Identifiers restart after the reset
    let ids = seeder.store().transaction_ids().await.unwrap();
    assert_eq!(ids, (1..=40).collect::<Vec<i64>>());

    let orphans: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM transactions t
        LEFT JOIN shipping s ON s.transaction_id = t.id
        WHERE s.id IS NULL
        "#,
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphans, 0);

    let bad_transit: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM shipping WHERE delivery_date - ship_date NOT BETWEEN 1 AND 10",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(bad_transit, 0);

    let mismatched_reviews: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM reviews r
        JOIN transactions t ON t.id = r.transaction_id
        WHERE r.rated_user_id <> t.seller_id
        "#,
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(mismatched_reviews, 0);
}
