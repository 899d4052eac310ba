use thiserror::Error;

use crate::model::day::Day;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no day stored for {0}")]
    NotFound(String),

    #[error("key {key} does not match day {date}")]
    KeyMismatch { key: String, date: String },

    #[error("stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Persists whole days keyed by their `YYYY-MM-DD` date string.
pub trait DayRepository {
    fn load(&self, key: &str) -> Result<Day, StoreError>;
    fn save(&self, key: &str, day: &Day) -> Result<(), StoreError>;
    /// Sorted ascending.
    fn list_keys(&self) -> Result<Vec<String>, StoreError>;
}
