//! Shipping record generation, one per transaction.

use std::ops::RangeInclusive;

use rand::Rng;
use time::{Date, Duration};

use super::sampling::{date_between, money};
use crate::models::{Id, ShippingStatus};

/// Generated shipping data ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedShipping {
    pub transaction_id: Id,
    pub ship_date: Date,
    pub delivery_date: Date,
    pub shipping_cost: f64,
    pub status: ShippingStatus,
}

/// Generates shipping records.
pub struct ShippingGenerator {
    /// Oldest ship date, in days before today.
    earliest_days_ago: i64,
    /// Most recent ship date, in days before today.
    latest_days_ago: i64,
    transit_days: RangeInclusive<i64>,
    cost_range: RangeInclusive<f64>,
}

impl ShippingGenerator {
    pub fn new() -> Self {
        Self {
            earliest_days_ago: 180,
            latest_days_ago: 3,
            transit_days: 1..=10,
            cost_range: 1.5..=7.0,
        }
    }

    /// Generates the shipping record for one transaction.
    pub fn generate(
        &self,
        transaction_id: Id,
        today: Date,
        rng: &mut impl Rng,
    ) -> GeneratedShipping {
        let ship_date = date_between(
            today - Duration::days(self.earliest_days_ago),
            today - Duration::days(self.latest_days_ago),
            rng,
        );
        let delivery_date =
            ship_date + Duration::days(rng.gen_range(self.transit_days.clone()));

        GeneratedShipping {
            transaction_id,
            ship_date,
            delivery_date,
            shipping_cost: money(self.cost_range.clone(), rng),
            status: ShippingStatus::ALL[rng.gen_range(0..ShippingStatus::ALL.len())],
        }
    }

    /// Generates exactly one record per transaction id, in input order.
    pub fn generate_for(
        &self,
        transaction_ids: &[Id],
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedShipping> {
        transaction_ids
            .iter()
            .map(|&id| self.generate(id, today, rng))
            .collect()
    }
}

impl Default for ShippingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
