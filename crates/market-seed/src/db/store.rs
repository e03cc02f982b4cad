use async_trait::async_trait;

use crate::error::SeedError;
use crate::generators::{
    GeneratedListing, GeneratedMessage, GeneratedReport, GeneratedReview, GeneratedShipping,
    GeneratedTransaction, GeneratedUser,
};
use crate::models::Id;

/// A relational store holding the eight marketplace collections.
///
/// Every insert method writes its whole batch as one commit and returns the
/// identifiers assigned, in input order, or the row count where no later
/// stage needs them.
#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Empties every collection and restarts identifiers at 1.
    async fn reset(&self) -> Result<(), SeedError>;

    async fn insert_categories(&self, names: &[String]) -> Result<Vec<Id>, SeedError>;

    async fn insert_users(&self, users: &[GeneratedUser]) -> Result<Vec<Id>, SeedError>;

    async fn insert_listings(&self, listings: &[GeneratedListing]) -> Result<Vec<Id>, SeedError>;

    async fn insert_transactions(
        &self,
        transactions: &[GeneratedTransaction],
    ) -> Result<Vec<Id>, SeedError>;

    async fn insert_reviews(&self, reviews: &[GeneratedReview]) -> Result<usize, SeedError>;

    async fn insert_messages(&self, messages: &[GeneratedMessage]) -> Result<usize, SeedError>;

    async fn insert_reports(&self, reports: &[GeneratedReport]) -> Result<usize, SeedError>;

    async fn insert_shipping(&self, shipping: &[GeneratedShipping]) -> Result<usize, SeedError>;

    /// Identifiers of every committed transaction, ascending.
    async fn transaction_ids(&self) -> Result<Vec<Id>, SeedError>;
}
