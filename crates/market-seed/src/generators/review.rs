//! Review generation.

use fake::{Fake, faker::lorem::en::Sentence};
use rand::Rng;
use rand::seq::SliceRandom;
use time::OffsetDateTime;

use super::sampling::timestamp_within;
use crate::models::{Id, TransactionRef};

/// Generated review data ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReview {
    pub transaction_id: Id,
    pub rated_user_id: Id,
    pub rating: i32,
    pub comment: String,
    pub created_at: OffsetDateTime,
}

/// Generates reviews of the seller of a committed transaction.
pub struct ReviewGenerator {
    window_days: i64,
}

impl ReviewGenerator {
    pub fn new() -> Self {
        Self { window_days: 180 }
    }

    /// Generates a review for a uniformly chosen transaction.
    ///
    /// Returns `None` when there is nothing to review.
    pub fn generate(
        &self,
        transactions: &[TransactionRef],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Option<GeneratedReview> {
        let target = transactions.choose(rng)?;

        Some(GeneratedReview {
            transaction_id: target.id,
            rated_user_id: target.seller_id,
            rating: rng.gen_range(1..=5),
            comment: Sentence(4..10).fake_with_rng(rng),
            created_at: timestamp_within(now, self.window_days, rng),
        })
    }

    /// Attempts `target_count` reviews, skipping attempts with no transaction to review.
    pub fn generate_batch(
        &self,
        target_count: usize,
        transactions: &[TransactionRef],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedReview> {
        (0..target_count)
            .filter_map(|_| self.generate(transactions, now, rng))
            .collect()
    }
}

impl Default for ReviewGenerator {
    fn default() -> Self {
        Self::new()
    }
}
