//! Synthetic data seeding for the fashion marketplace.
//!
//! This crate fills the marketplace schema (categories, users, listings,
//! transactions, reviews, messages, reports, shipping) with fake but
//! referentially valid data, one committed stage at a time.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use market_seed::prelude::*;
//!
//! let config = SeedConfig::default();
//! let mut rng = config.rng();
//! let seeder = Seeder::new(PgStore::new(pool), config);
//! let summary = seeder.run(&mut rng).await?;
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod generators;
pub mod models;
pub mod seeder;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DatabaseConfig, SeedConfig};
    pub use crate::db::{MarketStore, MemoryStore, PgStore};
    pub use crate::error::SeedError;
    pub use crate::generators::{
        ListingGenerator, MessageGenerator, ReportGenerator, ReviewGenerator, ShippingGenerator,
        TransactionGenerator, UserGenerator,
    };
    pub use crate::models::{
        Id, ItemCondition, ListingStatus, ShippingStatus, TransactionRef, UserStatus,
    };
    pub use crate::seeder::{SeedSummary, Seeder};
}
