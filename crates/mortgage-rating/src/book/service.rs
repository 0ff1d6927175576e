use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::repository::{MortgageEntry, MortgageRepository, RepositoryError};
use super::validation::validate_submission;
use crate::rating::domain::{MortgageId, MortgageRecord};
use crate::rating::service::{AssessmentError, PortfolioSubmission, RatingResponse, RatingService};
use crate::rating::RatingError;

/// Service composing the repository with the rating engine.
pub struct MortgageBook<R> {
    repository: Arc<R>,
    ratings: Arc<RatingService>,
    sequence: AtomicU64,
}

impl<R> MortgageBook<R>
where
    R: MortgageRepository + 'static,
{
    pub fn new(repository: Arc<R>, ratings: Arc<RatingService>) -> Self {
        Self {
            repository,
            ratings,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_mortgage_id(&self) -> MortgageId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        MortgageId(format!("mtg-{id:06}"))
    }

    /// Validate, rate and store a new mortgage.
    pub fn create(&self, submission: MortgageRecord) -> Result<MortgageEntry, BookError> {
        let mortgage = self.checked(submission)?;
        let assessment = self.ratings.assess(&mortgage)?;
        let now = Utc::now();

        let entry = MortgageEntry {
            id: self.next_mortgage_id(),
            mortgage,
            rating: assessment.rating,
            risk_score: assessment.risk_score,
            recorded_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(entry)?;
        info!(mortgage_id = %stored.id, rating = %stored.rating, "mortgage recorded");
        Ok(stored)
    }

    /// Replace a stored mortgage and re-rate it.
    pub fn update(
        &self,
        id: &MortgageId,
        submission: MortgageRecord,
    ) -> Result<MortgageEntry, BookError> {
        let existing = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        let mortgage = self.checked(submission)?;
        let assessment = self.ratings.assess(&mortgage)?;

        let entry = MortgageEntry {
            id: existing.id,
            mortgage,
            rating: assessment.rating,
            risk_score: assessment.risk_score,
            recorded_at: existing.recorded_at,
            updated_at: Utc::now(),
        };

        self.repository.update(entry.clone())?;
        info!(mortgage_id = %entry.id, rating = %entry.rating, "mortgage updated");
        Ok(entry)
    }

    pub fn get(&self, id: &MortgageId) -> Result<MortgageEntry, BookError> {
        let entry = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(entry)
    }

    /// All stored mortgages ordered by id.
    pub fn list(&self) -> Result<Vec<MortgageEntry>, BookError> {
        let mut entries = self.repository.list()?;
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }

    pub fn delete(&self, id: &MortgageId) -> Result<(), BookError> {
        self.repository.remove(id)?;
        info!(mortgage_id = %id, "mortgage deleted");
        Ok(())
    }

    /// Rate every stored mortgage as one portfolio.
    pub fn rate_book(&self) -> Result<RatingResponse, BookError> {
        let mortgages = self.list()?.iter().map(MortgageEntry::record).collect();
        let response = self.ratings.rate(&PortfolioSubmission { mortgages })?;
        Ok(response)
    }

    fn checked(&self, mut submission: MortgageRecord) -> Result<MortgageRecord, BookError> {
        validate_submission(&submission).map_err(BookError::Invalid)?;
        submission.id = None;
        Ok(submission)
    }
}

/// Error raised by the mortgage book.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("invalid mortgage: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("mortgage cannot be rated: {0}")]
    Unratable(#[from] AssessmentError),
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
