//! Direct message generation between users about a listing.

use fake::{Fake, faker::lorem::en::Sentence};
use rand::Rng;
use time::OffsetDateTime;

use super::sampling::{pick, pick_other, timestamp_within};
use crate::error::SeedError;
use crate::models::Id;

const STAGE: &str = "messages";

/// Generated message data ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMessage {
    pub sender_id: Id,
    pub receiver_id: Id,
    pub listing_id: Id,
    pub message_text: String,
    pub sent_at: OffsetDateTime,
    pub read: bool,
}

/// Generates messages. Users never message themselves.
pub struct MessageGenerator {
    window_days: i64,
}

impl MessageGenerator {
    pub fn new() -> Self {
        Self { window_days: 180 }
    }

    /// Generates a single message.
    pub fn generate(
        &self,
        user_ids: &[Id],
        listing_ids: &[Id],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<GeneratedMessage, SeedError> {
        let not_enough = || SeedError::NotEnoughUsers {
            stage: STAGE,
            available: user_ids.len(),
        };

        let sender_id = pick(user_ids, rng).ok_or_else(not_enough)?;
        let receiver_id = pick_other(user_ids, sender_id, rng).ok_or_else(not_enough)?;
        let listing_id = pick(listing_ids, rng).ok_or(SeedError::MissingReferences {
            stage: STAGE,
            reference: "listing",
        })?;

        Ok(GeneratedMessage {
            sender_id,
            receiver_id,
            listing_id,
            message_text: Sentence(4..10).fake_with_rng(rng),
            sent_at: timestamp_within(now, self.window_days, rng),
            read: rng.r#gen(),
        })
    }

    /// Generates multiple messages.
    pub fn generate_batch(
        &self,
        count: usize,
        user_ids: &[Id],
        listing_ids: &[Id],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedMessage>, SeedError> {
        (0..count)
            .map(|_| self.generate(user_ids, listing_ids, now, rng))
            .collect()
    }
}

impl Default for MessageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_self_messages() {
        let message_gen = MessageGenerator::new();
        let mut rng = rand::thread_rng();
        let users: Vec<Id> = (1..=5).collect();

        let messages = message_gen
            .generate_batch(300, &users, &[1, 2], OffsetDateTime::now_utc(), &mut rng)
            .unwrap();

        for m in &messages {
            assert_ne!(m.sender_id, m.receiver_id);
            assert!(!m.message_text.is_empty());
        }
        // Both read states show up
        assert!(messages.iter().any(|m| m.read));
        assert!(messages.iter().any(|m| !m.read));
    }
}
