use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("stock entry has an empty ticker")]
    EmptyTicker,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),

    #[error("ticker {ticker} has invalid priority {priority}, expected >= 1")]
    InvalidPriority { ticker: String, priority: u32 },
}

/// Failure of a single headline inside an ingestion batch. These are logged
/// and skipped; they never abort the batch.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TagError {
    #[error("news item '{title}' has no source link")]
    MissingLink { title: String },

    #[error("news item {link} has unparseable timestamp '{value}'")]
    InvalidTimestamp { link: String, value: String },
}
