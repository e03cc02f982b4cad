//! Configuration types for seeding.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

use crate::error::SeedError;
use crate::models::DEFAULT_CATEGORIES;

/// Configuration for a seeding run.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Category names, inserted in order.
    pub categories: Vec<String>,

    /// Number of users to generate.
    pub user_count: usize,

    /// Number of listings to generate.
    pub listing_count: usize,

    /// Number of transactions to generate.
    pub transaction_count: usize,

    /// Number of reviews to attempt. Skipped entirely when there are no transactions.
    pub review_count: usize,

    /// Number of messages to generate.
    pub message_count: usize,

    /// Number of reports to generate.
    pub report_count: usize,

    /// Upper bound on redraws when a username or email collides.
    pub max_unique_attempts: usize,

    /// Rows between progress log lines.
    pub batch_size: usize,

    /// RNG seed for reproducible data. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            user_count: 100,
            listing_count: 500,
            transaction_count: 200,
            review_count: 300,
            message_count: 500,
            report_count: 200,
            max_unique_attempts: 100,
            batch_size: 50,
            seed: None,
        }
    }
}

impl SeedConfig {
    /// Loads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses a config from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let config: SeedConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `SEED_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> Result<Self, SeedError> {
        match std::env::var("SEED_CONFIG") {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Builds the run's RNG from `seed`, or from entropy when unset.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Rejects settings no run can succeed with.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.max_unique_attempts == 0 {
            return Err(SeedError::Config(
                "max_unique_attempts must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(SeedError::Config("batch_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Connection parameters for the target database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// A full `postgres://` URL.
    Url(String),
    /// Discrete connection parameters.
    Params {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL`, falling back to the libpq-style `PG*` variables.
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SeedError> {
        if let Some(url) = lookup("DATABASE_URL") {
            return Ok(Self::Url(url));
        }

        let port = match lookup("PGPORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| SeedError::Config(format!("PGPORT is not a valid port: {raw}")))?,
            None => 5432,
        };

        Ok(Self::Params {
            host: lookup("PGHOST").unwrap_or_else(|| "localhost".to_string()),
            port,
            user: lookup("PGUSER").unwrap_or_else(|| "postgres".to_string()),
            password: lookup("PGPASSWORD").unwrap_or_default(),
            database: lookup("PGDATABASE").unwrap_or_else(|| "fashion_marketplace".to_string()),
        })
    }

    /// Converts into sqlx connect options.
    pub fn connect_options(&self) -> Result<PgConnectOptions, SeedError> {
        match self {
            Self::Url(url) => Ok(url.parse::<PgConnectOptions>()?),
            Self::Params {
                host,
                port,
                user,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database)),
        }
    }

    /// Describes the target without exposing credentials.
    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => match url.rsplit_once('@') {
                Some((_, target)) => target.to_string(),
                None => url.clone(),
            },
            Self::Params {
                host,
                port,
                database,
                ..
            } => format!("{host}:{port}/{database}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_counts() {
        let config = SeedConfig::default();
        assert_eq!(config.categories.len(), 10);
        assert_eq!(config.user_count, 100);
        assert_eq!(config.listing_count, 500);
        assert_eq!(config.transaction_count, 200);
        assert_eq!(config.review_count, 300);
        assert_eq!(config.message_count, 500);
        assert_eq!(config.report_count, 200);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SeedConfig::from_json(r#"{"user_count": 5, "seed": 7}"#).unwrap();
        assert_eq!(config.user_count, 5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.listing_count, 500);
        assert_eq!(config.categories[0], "Shoes");
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = SeedConfig::from_json(r#"{"max_unique_attempts": 0}"#).unwrap_err();
        assert!(matches!(err, SeedError::Config(_)));
    }

    #[test]
    fn test_database_url_wins() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://u:p@db:5433/market"),
            ("PGHOST", "ignored"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            DatabaseConfig::Url("postgres://u:p@db:5433/market".to_string())
        );
        assert_eq!(config.describe(), "db:5433/market");
    }

    #[test]
    fn test_params_defaults() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[("PGPASSWORD", "secret")])).unwrap();

        assert_eq!(
            config,
            DatabaseConfig::Params {
                host: "localhost".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: "secret".to_string(),
                database: "fashion_marketplace".to_string(),
            }
        );
        assert!(!config.describe().contains("secret"));
    }

    #[test]
    fn test_invalid_port() {
        let err = DatabaseConfig::from_lookup(lookup_from(&[("PGPORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, SeedError::Config(_)));
    }
}
