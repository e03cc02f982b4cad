//! Entity generators for marketplace data.
//!
//! Generators are pure: they draw from an RNG and the identifier lists they
//! are given, and never touch storage.
//! - [`UserGenerator`]: users with run-wide unique usernames and emails
//! - [`ListingGenerator`]: listings owned by users, filed under categories
//! - [`TransactionGenerator`]: purchases between distinct buyers and sellers
//! - [`ReviewGenerator`]: reviews of a transaction's seller
//! - [`MessageGenerator`]: messages between distinct users about a listing
//! - [`ReportGenerator`]: reports of one user by another
//! - [`ShippingGenerator`]: one shipping record per transaction

pub mod listing;
pub mod message;
pub mod report;
pub mod review;
pub mod sampling;
pub mod shipping;
pub mod transaction;
pub mod user;

pub use listing::{GeneratedListing, ListingGenerator};
pub use message::{GeneratedMessage, MessageGenerator};
pub use report::{GeneratedReport, ReportGenerator};
pub use review::{GeneratedReview, ReviewGenerator};
pub use shipping::{GeneratedShipping, ShippingGenerator};
pub use transaction::{GeneratedTransaction, TransactionGenerator};
pub use user::{GeneratedUser, IssuedIdentities, UserGenerator};
