//! In-process storage with the same referential rules as the SQL schema.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::store::MarketStore;
use crate::error::SeedError;
use crate::generators::{
    GeneratedListing, GeneratedMessage, GeneratedReport, GeneratedReview, GeneratedShipping,
    GeneratedTransaction, GeneratedUser,
};
use crate::models::Id;

/// A copy of every table, each row paired with its identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySnapshot {
    pub categories: Vec<(Id, String)>,
    pub users: Vec<(Id, GeneratedUser)>,
    pub listings: Vec<(Id, GeneratedListing)>,
    pub transactions: Vec<(Id, GeneratedTransaction)>,
    pub reviews: Vec<(Id, GeneratedReview)>,
    pub messages: Vec<(Id, GeneratedMessage)>,
    pub reports: Vec<(Id, GeneratedReport)>,
    pub shipping: Vec<(Id, GeneratedShipping)>,
}

/// Storage kept entirely in memory.
///
/// Identifiers are assigned sequentially from 1 per table. A batch that
/// breaks a rule is rejected whole with [`SeedError::Constraint`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<MemorySnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current contents of every table.
    pub fn snapshot(&self) -> MemorySnapshot {
        self.tables().clone()
    }

    fn tables(&self) -> MutexGuard<'_, MemorySnapshot> {
        // Batches are validated before any row is appended.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn next_id(len: usize) -> Id {
    len as Id + 1
}

fn exists<T>(table: &[(Id, T)], id: Id) -> bool {
    id >= 1 && (id as usize) <= table.len()
}

fn require(ok: bool, message: impl FnOnce() -> String) -> Result<(), SeedError> {
    if ok {
        Ok(())
    } else {
        Err(SeedError::Constraint(message()))
    }
}

fn append<T: Clone>(table: &mut Vec<(Id, T)>, rows: &[T]) -> Vec<Id> {
    rows.iter()
        .map(|row| {
            let id = next_id(table.len());
            table.push((id, row.clone()));
            id
        })
        .collect()
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn reset(&self) -> Result<(), SeedError> {
        *self.tables() = MemorySnapshot::default();
        Ok(())
    }

    async fn insert_categories(&self, names: &[String]) -> Result<Vec<Id>, SeedError> {
        Ok(append(&mut self.tables().categories, names))
    }

    async fn insert_users(&self, users: &[GeneratedUser]) -> Result<Vec<Id>, SeedError> {
        let mut tables = self.tables();

        {
            let mut usernames: HashSet<&str> =
                tables.users.iter().map(|(_, u)| u.username.as_str()).collect();
            let mut emails: HashSet<&str> =
                tables.users.iter().map(|(_, u)| u.email.as_str()).collect();

            for user in users {
                require(usernames.insert(&user.username), || {
                    format!("duplicate username {}", user.username)
                })?;
                require(emails.insert(&user.email), || {
                    format!("duplicate email {}", user.email)
                })?;
            }
        }

        Ok(append(&mut tables.users, users))
    }

    async fn insert_listings(&self, listings: &[GeneratedListing]) -> Result<Vec<Id>, SeedError> {
        let mut tables = self.tables();

        for l in listings {
            require(exists(&tables.users, l.user_id), || {
                format!("listing references missing user {}", l.user_id)
            })?;
            require(exists(&tables.categories, l.category_id), || {
                format!("listing references missing category {}", l.category_id)
            })?;
        }

        Ok(append(&mut tables.listings, listings))
    }

    async fn insert_transactions(
        &self,
        transactions: &[GeneratedTransaction],
    ) -> Result<Vec<Id>, SeedError> {
        let mut tables = self.tables();

        for t in transactions {
            require(
                exists(&tables.users, t.buyer_id) && exists(&tables.users, t.seller_id),
                || format!("transaction references missing user {}/{}", t.buyer_id, t.seller_id),
            )?;
            require(exists(&tables.listings, t.listing_id), || {
                format!("transaction references missing listing {}", t.listing_id)
            })?;
            require(t.buyer_id != t.seller_id, || {
                format!("user {} cannot buy from themselves", t.buyer_id)
            })?;
        }

        Ok(append(&mut tables.transactions, transactions))
    }

    async fn insert_reviews(&self, reviews: &[GeneratedReview]) -> Result<usize, SeedError> {
        let mut tables = self.tables();

        for r in reviews {
            require(exists(&tables.transactions, r.transaction_id), || {
                format!("review references missing transaction {}", r.transaction_id)
            })?;
            require(exists(&tables.users, r.rated_user_id), || {
                format!("review references missing user {}", r.rated_user_id)
            })?;
        }

        Ok(append(&mut tables.reviews, reviews).len())
    }

    async fn insert_messages(&self, messages: &[GeneratedMessage]) -> Result<usize, SeedError> {
        let mut tables = self.tables();

        for m in messages {
            require(
                exists(&tables.users, m.sender_id) && exists(&tables.users, m.receiver_id),
                || format!("message references missing user {}/{}", m.sender_id, m.receiver_id),
            )?;
            require(exists(&tables.listings, m.listing_id), || {
                format!("message references missing listing {}", m.listing_id)
            })?;
            require(m.sender_id != m.receiver_id, || {
                format!("user {} cannot message themselves", m.sender_id)
            })?;
        }

        Ok(append(&mut tables.messages, messages).len())
    }

    async fn insert_reports(&self, reports: &[GeneratedReport]) -> Result<usize, SeedError> {
        let mut tables = self.tables();

        for r in reports {
            require(
                exists(&tables.users, r.reporter_id) && exists(&tables.users, r.reported_user_id),
                || {
                    format!(
                        "report references missing user {}/{}",
                        r.reporter_id, r.reported_user_id
                    )
                },
            )?;
            require(exists(&tables.listings, r.listing_id), || {
                format!("report references missing listing {}", r.listing_id)
            })?;
            require(r.reporter_id != r.reported_user_id, || {
                format!("user {} cannot report themselves", r.reporter_id)
            })?;
        }

        Ok(append(&mut tables.reports, reports).len())
    }

    async fn insert_shipping(&self, shipping: &[GeneratedShipping]) -> Result<usize, SeedError> {
        let mut tables = self.tables();

        let mut shipped: HashSet<Id> =
            tables.shipping.iter().map(|(_, s)| s.transaction_id).collect();
        for s in shipping {
            require(exists(&tables.transactions, s.transaction_id), || {
                format!("shipping references missing transaction {}", s.transaction_id)
            })?;
            require(shipped.insert(s.transaction_id), || {
                format!("transaction {} already has a shipping record", s.transaction_id)
            })?;
            require(s.delivery_date > s.ship_date, || {
                format!("transaction {} delivered before it shipped", s.transaction_id)
            })?;
        }

        Ok(append(&mut tables.shipping, shipping).len())
    }

    async fn transaction_ids(&self) -> Result<Vec<Id>, SeedError> {
        Ok(self.tables().transactions.iter().map(|(id, _)| *id).collect())
    }
}
