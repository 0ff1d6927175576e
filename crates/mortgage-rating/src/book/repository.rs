use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rating::domain::{MortgageId, MortgageRecord, RatingBand};

/// Stored mortgage together with the rating it received when last written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortgageEntry {
    pub id: MortgageId,
    /// Stored without its own `id`; the entry id is authoritative.
    #[serde(flatten)]
    pub mortgage: MortgageRecord,
    pub rating: RatingBand,
    pub risk_score: f64,
    pub recorded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MortgageEntry {
    /// The stored record with its id filled in, ready for portfolio rating.
    pub fn record(&self) -> MortgageRecord {
        MortgageRecord {
            id: Some(self.id.clone()),
            ..self.mortgage.clone()
        }
    }
}

/// Storage abstraction so the book can be exercised without a database.
pub trait MortgageRepository: Send + Sync {
    fn insert(&self, entry: MortgageEntry) -> Result<MortgageEntry, RepositoryError>;
    fn update(&self, entry: MortgageEntry) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &MortgageId) -> Result<Option<MortgageEntry>, RepositoryError>;
    fn list(&self) -> Result<Vec<MortgageEntry>, RepositoryError>;
    fn remove(&self, id: &MortgageId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
