//! Stage-by-stage seeding of the marketplace.

use std::time::Instant;

use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

use crate::config::SeedConfig;
use crate::db::MarketStore;
use crate::error::SeedError;
use crate::generators::{
    IssuedIdentities, ListingGenerator, MessageGenerator, ReportGenerator, ReviewGenerator,
    ShippingGenerator, TransactionGenerator, UserGenerator,
};
use crate::models::{Id, TransactionRef};

/// Row counts and timing from a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub users: usize,
    pub listings: usize,
    pub transactions: usize,
    pub reviews: usize,
    pub messages: usize,
    pub reports: usize,
    pub shipping: usize,
    /// Wall time of the whole run (milliseconds).
    pub elapsed_ms: u64,
}

/// Runs the eight seeding stages against a [`MarketStore`].
///
/// Each stage takes the identifiers produced by earlier stages and returns its
/// own, so nothing is shared between stages except what is passed in.
/// Every timestamp is drawn relative to one reference instant.
///
/// # Example
///
/// ```rust,ignore
/// let seeder = Seeder::new(PgStore::new(pool), SeedConfig::default());
/// let summary = seeder.run(&mut rng).await?;
/// ```
pub struct Seeder<S> {
    store: S,
    config: SeedConfig,
    now: OffsetDateTime,
}

impl<S: MarketStore> Seeder<S> {
    pub fn new(store: S, config: SeedConfig) -> Self {
        Self {
            store,
            config,
            now: OffsetDateTime::now_utc(),
        }
    }

    /// Overrides the reference instant that all time windows end at.
    pub fn with_now(mut self, now: OffsetDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Empties every collection and restarts identifiers at 1.
    pub async fn reset_storage(&self) -> Result<(), SeedError> {
        self.store.reset().await?;
        info!("Storage reset");
        Ok(())
    }

    /// Inserts one category per name, in order.
    pub async fn generate_categories(&self, names: &[String]) -> Result<Vec<Id>, SeedError> {
        info!("Inserting {} categories...", names.len());
        let ids = self.store.insert_categories(names).await?;
        info!("Inserted {} categories", ids.len());
        Ok(ids)
    }

    /// Inserts `count` users with unique usernames and emails.
    pub async fn generate_users(
        &self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<Id>, SeedError> {
        info!("Inserting {} users...", count);

        let mut issued = IssuedIdentities::new(self.config.max_unique_attempts);
        let users =
            UserGenerator::new().generate_batch(count, &mut issued, self.now.date(), rng)?;
        let ids = self.store.insert_users(&users).await?;

        info!("Inserted {} users", ids.len());
        Ok(ids)
    }

    pub async fn generate_listings(
        &self,
        count: usize,
        user_ids: &[Id],
        category_ids: &[Id],
        rng: &mut impl Rng,
    ) -> Result<Vec<Id>, SeedError> {
        info!("Inserting {} listings...", count);

        let listings =
            ListingGenerator::new().generate_batch(count, user_ids, category_ids, self.now, rng)?;
        let ids = self.store.insert_listings(&listings).await?;

        info!("Inserted {} listings", ids.len());
        Ok(ids)
    }

    /// Inserts `count` transactions and returns each one's id and seller.
    pub async fn generate_transactions(
        &self,
        count: usize,
        user_ids: &[Id],
        listing_ids: &[Id],
        rng: &mut impl Rng,
    ) -> Result<Vec<TransactionRef>, SeedError> {
        info!("Inserting {} transactions...", count);

        let transactions =
            TransactionGenerator::new().generate_batch(count, user_ids, listing_ids, self.now, rng)?;
        let ids = self.store.insert_transactions(&transactions).await?;

        info!("Inserted {} transactions", ids.len());
        Ok(ids
            .into_iter()
            .zip(&transactions)
            .map(|(id, t)| TransactionRef {
                id,
                seller_id: t.seller_id,
            })
            .collect())
    }

    /// Inserts up to `target_count` reviews of transactions from this run.
    ///
    /// With no transactions the stage inserts nothing and succeeds.
    pub async fn generate_reviews(
        &self,
        target_count: usize,
        transactions: &[TransactionRef],
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Inserting reviews...");

        if transactions.is_empty() && target_count > 0 {
            info!("No transactions to review, skipping {} reviews", target_count);
        }

        let reviews =
            ReviewGenerator::new().generate_batch(target_count, transactions, self.now, rng);
        let inserted = self.store.insert_reviews(&reviews).await?;

        info!("Inserted {} reviews", inserted);
        Ok(inserted)
    }

    pub async fn generate_messages(
        &self,
        count: usize,
        user_ids: &[Id],
        listing_ids: &[Id],
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Inserting {} messages...", count);

        let messages =
            MessageGenerator::new().generate_batch(count, user_ids, listing_ids, self.now, rng)?;
        let inserted = self.store.insert_messages(&messages).await?;

        info!("Inserted {} messages", inserted);
        Ok(inserted)
    }

    pub async fn generate_reports(
        &self,
        count: usize,
        user_ids: &[Id],
        listing_ids: &[Id],
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Inserting {} reports...", count);

        let reports =
            ReportGenerator::new().generate_batch(count, user_ids, listing_ids, self.now, rng)?;
        let inserted = self.store.insert_reports(&reports).await?;

        info!("Inserted {} reports", inserted);
        Ok(inserted)
    }

    /// Inserts exactly one shipping record per transaction id.
    pub async fn generate_shipping(
        &self,
        transaction_ids: &[Id],
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Inserting {} shipping records...", transaction_ids.len());

        let shipping = ShippingGenerator::new().generate_for(transaction_ids, self.now.date(), rng);
        let inserted = self.store.insert_shipping(&shipping).await?;

        info!("Inserted {} shipping records", inserted);
        Ok(inserted)
    }

    /// Resets storage and runs every stage in dependency order.
    ///
    /// A failing stage aborts the run; stages committed before it stay committed.
    pub async fn run(&self, rng: &mut impl Rng) -> Result<SeedSummary, SeedError> {
        let start = Instant::now();
        let config = &self.config;
        config.validate()?;

        self.reset_storage().await?;

        let category_ids = self.generate_categories(&config.categories).await?;
        let user_ids = self.generate_users(config.user_count, rng).await?;
        let listing_ids = self
            .generate_listings(config.listing_count, &user_ids, &category_ids, rng)
            .await?;
        let transactions = self
            .generate_transactions(config.transaction_count, &user_ids, &listing_ids, rng)
            .await?;
        let reviews = self
            .generate_reviews(config.review_count, &transactions, rng)
            .await?;
        let messages = self
            .generate_messages(config.message_count, &user_ids, &listing_ids, rng)
            .await?;
        let reports = self
            .generate_reports(config.report_count, &user_ids, &listing_ids, rng)
            .await?;

        // Shipping covers what was committed, not what was generated
        let committed = self.store.transaction_ids().await?;
        let shipping = self.generate_shipping(&committed, rng).await?;

        let summary = SeedSummary {
            categories: category_ids.len(),
            users: user_ids.len(),
            listings: listing_ids.len(),
            transactions: transactions.len(),
            reviews,
            messages,
            reports,
            shipping,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        info!("Data inserted successfully in {} ms", summary.elapsed_ms);
        Ok(summary)
    }
}
