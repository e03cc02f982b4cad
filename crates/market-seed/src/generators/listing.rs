//! Listing generation.

use std::ops::RangeInclusive;

use fake::{
    Fake,
    faker::{company::en::CompanyName, lorem::en::Sentence},
};
use rand::Rng;
use time::OffsetDateTime;

use super::sampling::{money, pick, timestamp_within};
use crate::error::SeedError;
use crate::models::{Id, ItemCondition, ListingStatus};

const STAGE: &str = "listings";

/// Generated listing data ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedListing {
    pub user_id: Id,
    pub title: String,
    pub price: f64,
    pub brand: String,
    pub condition: ItemCondition,
    pub category_id: Id,
    pub created_at: OffsetDateTime,
    pub status: ListingStatus,
}

/// Generates listings owned by existing users in existing categories.
pub struct ListingGenerator {
    price_range: RangeInclusive<f64>,
    window_days: i64,
}

impl ListingGenerator {
    pub fn new() -> Self {
        Self {
            price_range: 5.0..=200.0,
            window_days: 365,
        }
    }

    /// Generates a single listing.
    pub fn generate(
        &self,
        user_ids: &[Id],
        category_ids: &[Id],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<GeneratedListing, SeedError> {
        let user_id = pick(user_ids, rng).ok_or(SeedError::MissingReferences {
            stage: STAGE,
            reference: "user",
        })?;
        let category_id = pick(category_ids, rng).ok_or(SeedError::MissingReferences {
            stage: STAGE,
            reference: "category",
        })?;

        Ok(GeneratedListing {
            user_id,
            title: Sentence(3..4).fake_with_rng(rng),
            price: money(self.price_range.clone(), rng),
            brand: CompanyName().fake_with_rng(rng),
            condition: ItemCondition::ALL[rng.gen_range(0..ItemCondition::ALL.len())],
            category_id,
            created_at: timestamp_within(now, self.window_days, rng),
            status: ListingStatus::ALL[rng.gen_range(0..ListingStatus::ALL.len())],
        })
    }

    /// Generates multiple listings.
    pub fn generate_batch(
        &self,
        count: usize,
        user_ids: &[Id],
        category_ids: &[Id],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedListing>, SeedError> {
        (0..count)
            .map(|_| self.generate(user_ids, category_ids, now, rng))
            .collect()
    }
}

impl Default for ListingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
