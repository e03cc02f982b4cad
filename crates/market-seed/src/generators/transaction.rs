//! Purchase transaction generation.

use std::ops::RangeInclusive;

use rand::Rng;
use time::OffsetDateTime;

use super::sampling::{money, pick, pick_other, timestamp_within};
use crate::error::SeedError;
use crate::models::Id;

const STAGE: &str = "transactions";

/// Generated transaction data ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTransaction {
    pub buyer_id: Id,
    pub seller_id: Id,
    pub listing_id: Id,
    pub transacted_at: OffsetDateTime,
    pub total_amount: f64,
}

/// Generates purchases between two distinct users.
pub struct TransactionGenerator {
    amount_range: RangeInclusive<f64>,
    window_days: i64,
}

impl TransactionGenerator {
    pub fn new() -> Self {
        Self {
            amount_range: 10.0..=250.0,
            window_days: 180,
        }
    }

    /// Generates a single transaction.
    ///
    /// The seller is drawn from all users, the buyer from the rest.
    pub fn generate(
        &self,
        user_ids: &[Id],
        listing_ids: &[Id],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<GeneratedTransaction, SeedError> {
        let not_enough = || SeedError::NotEnoughUsers {
            stage: STAGE,
            available: user_ids.len(),
        };

        let listing_id = pick(listing_ids, rng).ok_or(SeedError::MissingReferences {
            stage: STAGE,
            reference: "listing",
        })?;
        let seller_id = pick(user_ids, rng).ok_or_else(not_enough)?;
        let buyer_id = pick_other(user_ids, seller_id, rng).ok_or_else(not_enough)?;

        Ok(GeneratedTransaction {
            buyer_id,
            seller_id,
            listing_id,
            transacted_at: timestamp_within(now, self.window_days, rng),
            total_amount: money(self.amount_range.clone(), rng),
        })
    }

    /// Generates multiple transactions.
    pub fn generate_batch(
        &self,
        count: usize,
        user_ids: &[Id],
        listing_ids: &[Id],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedTransaction>, SeedError> {
        (0..count)
            .map(|_| self.generate(user_ids, listing_ids, now, rng))
            .collect()
    }
}

impl Default for TransactionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_buyer_differs_from_seller_with_two_users() {
        let tx_gen = TransactionGenerator::new();
        let mut rng = StdRng::seed_from_u64(12345);

        let txs = tx_gen
            .generate_batch(500, &[1, 2], &[7], OffsetDateTime::now_utc(), &mut rng)
            .unwrap();

        assert_eq!(txs.len(), 500);
        for tx in &txs {
            assert_ne!(tx.buyer_id, tx.seller_id);
            assert_eq!(tx.listing_id, 7);
            assert!((10.0..=250.0).contains(&tx.total_amount));
        }
        // Both users appear as sellers
        assert!(txs.iter().any(|t| t.seller_id == 1));
        assert!(txs.iter().any(|t| t.seller_id == 2));
    }

    #[test]
    fn test_single_user_rejected() {
        let tx_gen = TransactionGenerator::new();
        let mut rng = rand::thread_rng();

        let err = tx_gen
            .generate(&[1], &[1], OffsetDateTime::now_utc(), &mut rng)
            .unwrap_err();

        assert!(matches!(err, SeedError::NotEnoughUsers { available: 1, .. }));
    }
}
