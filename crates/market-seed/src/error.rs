use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Could not draw a unique {field} after {attempts} attempts")]
    UniqueExhausted { field: &'static str, attempts: usize },

    #[error("Stage {stage} needs at least 2 users, got {available}")]
    NotEnoughUsers { stage: &'static str, available: usize },

    #[error("Stage {stage} needs at least one {reference} id")]
    MissingReferences {
        stage: &'static str,
        reference: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}
