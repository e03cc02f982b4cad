//! User generation with run-wide unique usernames and emails.

use std::collections::HashSet;

use fake::{
    Fake,
    faker::internet::en::{FreeEmail, Username},
};
use rand::Rng;
use time::{Date, Duration};

use crate::error::SeedError;
use crate::models::UserStatus;

/// Generated user data ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUser {
    pub username: String,
    pub email: String,
    pub join_date: Date,
    pub status: UserStatus,
}

/// Usernames and emails already handed out in this run.
///
/// Owned by the user stage and passed explicitly to every draw.
#[derive(Debug, Clone)]
pub struct IssuedIdentities {
    usernames: HashSet<String>,
    emails: HashSet<String>,
    max_attempts: usize,
}

impl IssuedIdentities {
    /// Creates an empty set that gives up after `max_attempts` colliding draws.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            usernames: HashSet::new(),
            emails: HashSet::new(),
            max_attempts,
        }
    }

    /// Draws usernames until one is unused, then records it.
    pub fn claim_username(
        &mut self,
        draw: impl FnMut() -> String,
    ) -> Result<String, SeedError> {
        claim(&mut self.usernames, "username", self.max_attempts, draw)
    }

    /// Draws emails until one is unused, then records it.
    pub fn claim_email(&mut self, draw: impl FnMut() -> String) -> Result<String, SeedError> {
        claim(&mut self.emails, "email", self.max_attempts, draw)
    }

    /// Number of users issued so far.
    pub fn len(&self) -> usize {
        self.usernames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty()
    }
}

fn claim(
    issued: &mut HashSet<String>,
    field: &'static str,
    max_attempts: usize,
    mut draw: impl FnMut() -> String,
) -> Result<String, SeedError> {
    for _ in 0..max_attempts {
        let candidate = draw();
        if !issued.contains(&candidate) {
            issued.insert(candidate.clone());
            return Ok(candidate);
        }
    }

    Err(SeedError::UniqueExhausted {
        field,
        attempts: max_attempts,
    })
}

/// Generates marketplace users.
pub struct UserGenerator {
    /// How far back join dates may go.
    join_window_days: i64,
}

impl UserGenerator {
    pub fn new() -> Self {
        Self {
            join_window_days: 730,
        }
    }

    /// Generates a single user, claiming its username and email in `issued`.
    pub fn generate(
        &self,
        issued: &mut IssuedIdentities,
        today: Date,
        rng: &mut impl Rng,
    ) -> Result<GeneratedUser, SeedError> {
        let username = issued.claim_username(|| Username().fake_with_rng(&mut *rng))?;
        let email = issued.claim_email(|| FreeEmail().fake_with_rng(&mut *rng))?;

        let join_date = today - Duration::days(rng.gen_range(0..=self.join_window_days));
        let status = UserStatus::ALL[rng.gen_range(0..UserStatus::ALL.len())];

        Ok(GeneratedUser {
            username,
            email,
            join_date,
            status,
        })
    }

    /// Generates `count` users sharing one set of issued identities.
    pub fn generate_batch(
        &self,
        count: usize,
        issued: &mut IssuedIdentities,
        today: Date,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedUser>, SeedError> {
        (0..count)
            .map(|_| self.generate(issued, today, rng))
            .collect()
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    #[test]
    fn test_generate_user() {
        let user_gen = UserGenerator::new();
        let mut issued = IssuedIdentities::new(100);
        let mut rng = rand::thread_rng();
        let today = date!(2025 - 06 - 01);

        let user = user_gen.generate(&mut issued, today, &mut rng).unwrap();

        assert!(!user.username.is_empty());
        assert!(user.email.contains('@'));
        assert!(user.join_date <= today);
        assert!(user.join_date >= today - Duration::days(730));
        assert_eq!(issued.len(), 1);
    }

    #[test]
    fn test_batch_usernames_and_emails_unique() {
        let user_gen = UserGenerator::new();
        let mut issued = IssuedIdentities::new(1000);
        let mut rng = StdRng::seed_from_u64(12345);

        let users = user_gen
            .generate_batch(300, &mut issued, date!(2025 - 06 - 01), &mut rng)
            .unwrap();

        let usernames: HashSet<_> = users.iter().map(|u| u.username.as_str()).collect();
        let emails: HashSet<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(usernames.len(), 300);
        assert_eq!(emails.len(), 300);
    }

    #[test]
    fn test_claim_retries_past_collisions() {
        let mut issued = IssuedIdentities::new(10);
        issued.claim_username(|| "taken".to_string()).unwrap();

        let mut draws = vec!["fresh".to_string(), "taken".to_string(), "taken".to_string()];
        let name = issued.claim_username(|| draws.pop().unwrap()).unwrap();

        assert_eq!(name, "fresh");
        assert!(draws.is_empty());
    }

    #[test]
    fn test_claim_gives_up_after_bound() {
        let mut issued = IssuedIdentities::new(5);
        issued.claim_email(|| "a@example.com".to_string()).unwrap();

        let mut calls = 0;
        let err = issued
            .claim_email(|| {
                calls += 1;
                "a@example.com".to_string()
            })
            .unwrap_err();

        assert_eq!(calls, 5);
        assert!(matches!(
            err,
            SeedError::UniqueExhausted {
                field: "email",
                attempts: 5
            }
        ));
    }
}
