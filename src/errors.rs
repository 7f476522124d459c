use thiserror::Error;

/// Error type that captures I/O, serialization and configuration failures.
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Configuration problems detected while loading promotions, bands and plans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("promotion `{id}` ends before it starts")]
    PromotionWindow { id: String },
    #[error("promotion `{id}` has discount {percent}% outside 0..=100")]
    DiscountOutOfRange { id: String, percent: String },
    #[error("promotion `{id}` applies to no products")]
    EmptyProductSet { id: String },
    #[error("promotion id `{0}` is declared more than once")]
    DuplicatePromotion(String),
    #[error("odds band `{label}` is invalid: {reason}")]
    InvalidOddsBand { label: String, reason: String },
    #[error("plan `{0}` is declared more than once")]
    DuplicatePlan(String),
}
