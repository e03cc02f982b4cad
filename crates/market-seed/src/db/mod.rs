//! Storage boundary for seeded data.
//!
//! [`MarketStore`] is what the seeder writes through. [`PgStore`] targets
//! PostgreSQL; [`MemoryStore`] keeps everything in process and enforces the
//! same referential rules, which is what the tests run against.

mod memory;
mod postgres;
mod store;

pub use memory::{MemorySnapshot, MemoryStore};
pub use postgres::PgStore;
pub use store::MarketStore;
