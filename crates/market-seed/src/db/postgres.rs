//! PostgreSQL storage via sqlx.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::store::MarketStore;
use crate::error::SeedError;
use crate::generators::{
    GeneratedListing, GeneratedMessage, GeneratedReport, GeneratedReview, GeneratedShipping,
    GeneratedTransaction, GeneratedUser,
};
use crate::models::Id;

/// Writes seeded rows into PostgreSQL, one database transaction per batch.
pub struct PgStore {
    pool: PgPool,
    batch_size: usize,
}

impl PgStore {
    /// Creates a new store over the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            batch_size: 50,
        }
    }

    /// Sets how many rows pass between progress log lines.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn log_progress(&self, table: &str, done: usize, total: usize) {
        if done % self.batch_size == 0 {
            info!("  Inserted {}/{} {}", done, total, table);
        }
    }
}

#[async_trait]
impl MarketStore for PgStore {
    /// Clears all marketplace tables.
    ///
    /// **WARNING**: This deletes all data from the tables. Use with caution.
    async fn reset(&self) -> Result<(), SeedError> {
        info!("Truncating marketplace tables...");

        sqlx::query(
            r#"
            TRUNCATE TABLE shipping, reviews, reports, messages,
                transactions, listings, users, categories
            RESTART IDENTITY CASCADE
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_categories(&self, names: &[String]) -> Result<Vec<Id>, SeedError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(names.len());

        for name in names {
            let id: Id =
                sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id::BIGINT")
                    .bind(name)
                    .fetch_one(&mut *tx)
                    .await?;
            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn insert_users(&self, users: &[GeneratedUser]) -> Result<Vec<Id>, SeedError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(users.len());

        for (i, user) in users.iter().enumerate() {
            let id: Id = sqlx::query_scalar(
                r#"
                INSERT INTO users (username, email, join_date, status)
                VALUES ($1, $2, $3, $4)
                RETURNING id::BIGINT
                "#,
            )
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.join_date)
            .bind(user.status.as_str())
            .fetch_one(&mut *tx)
            .await?;

            ids.push(id);
            self.log_progress("users", i + 1, users.len());
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn insert_listings(&self, listings: &[GeneratedListing]) -> Result<Vec<Id>, SeedError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(listings.len());

        for (i, listing) in listings.iter().enumerate() {
            let id: Id = sqlx::query_scalar(
                r#"
                INSERT INTO listings (
                    user_id, title, price, brand, condition,
                    category_id, created_at, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id::BIGINT
                "#,
            )
            .bind(listing.user_id)
            .bind(&listing.title)
            .bind(listing.price)
            .bind(&listing.brand)
            .bind(listing.condition.as_str())
            .bind(listing.category_id)
            .bind(listing.created_at)
            .bind(listing.status.as_str())
            .fetch_one(&mut *tx)
            .await?;

            ids.push(id);
            self.log_progress("listings", i + 1, listings.len());
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn insert_transactions(
        &self,
        transactions: &[GeneratedTransaction],
    ) -> Result<Vec<Id>, SeedError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(transactions.len());

        for (i, t) in transactions.iter().enumerate() {
            let id: Id = sqlx::query_scalar(
                r#"
                INSERT INTO transactions (buyer_id, seller_id, listing_id, transacted_at, total_amount)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id::BIGINT
                "#,
            )
            .bind(t.buyer_id)
            .bind(t.seller_id)
            .bind(t.listing_id)
            .bind(t.transacted_at)
            .bind(t.total_amount)
            .fetch_one(&mut *tx)
            .await?;

            ids.push(id);
            self.log_progress("transactions", i + 1, transactions.len());
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn insert_reviews(&self, reviews: &[GeneratedReview]) -> Result<usize, SeedError> {
        let mut tx = self.pool.begin().await?;

        for (i, review) in reviews.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO reviews (transaction_id, rated_user_id, rating, comment, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(review.transaction_id)
            .bind(review.rated_user_id)
            .bind(review.rating)
            .bind(&review.comment)
            .bind(review.created_at)
            .execute(&mut *tx)
            .await?;

            self.log_progress("reviews", i + 1, reviews.len());
        }

        tx.commit().await?;
        Ok(reviews.len())
    }

    async fn insert_messages(&self, messages: &[GeneratedMessage]) -> Result<usize, SeedError> {
        let mut tx = self.pool.begin().await?;

        for (i, message) in messages.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO messages (sender_id, receiver_id, listing_id, message_text, sent_at, read)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(message.sender_id)
            .bind(message.receiver_id)
            .bind(message.listing_id)
            .bind(&message.message_text)
            .bind(message.sent_at)
            .bind(message.read)
            .execute(&mut *tx)
            .await?;

            self.log_progress("messages", i + 1, messages.len());
        }

        tx.commit().await?;
        Ok(messages.len())
    }

    async fn insert_reports(&self, reports: &[GeneratedReport]) -> Result<usize, SeedError> {
        let mut tx = self.pool.begin().await?;

        for (i, report) in reports.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO reports (reporter_id, reported_user_id, listing_id, reason, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(report.reporter_id)
            .bind(report.reported_user_id)
            .bind(report.listing_id)
            .bind(report.reason)
            .bind(report.created_at)
            .execute(&mut *tx)
            .await?;

            self.log_progress("reports", i + 1, reports.len());
        }

        tx.commit().await?;
        Ok(reports.len())
    }

    async fn insert_shipping(&self, shipping: &[GeneratedShipping]) -> Result<usize, SeedError> {
        let mut tx = self.pool.begin().await?;

        for (i, s) in shipping.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO shipping (transaction_id, ship_date, delivery_date, shipping_cost, status)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(s.transaction_id)
            .bind(s.ship_date)
            .bind(s.delivery_date)
            .bind(s.shipping_cost)
            .bind(s.status.as_str())
            .execute(&mut *tx)
            .await?;

            self.log_progress("shipping records", i + 1, shipping.len());
        }

        tx.commit().await?;
        Ok(shipping.len())
    }

    async fn transaction_ids(&self) -> Result<Vec<Id>, SeedError> {
        let ids: Vec<Id> = sqlx::query_scalar("SELECT id::BIGINT FROM transactions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }
}
