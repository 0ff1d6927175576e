use super::aggregator::PortfolioAggregator;
use super::domain::{
    MortgageId, MortgageRecord, PortfolioSummary, RatingBand, RecordExclusion, RiskFactors,
};
use super::errors::{RatingError, RecordError};
use super::factors::RiskFactorCalculator;
use super::policy::{PolicyError, RatingPolicy};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Batch of mortgages submitted together for one aggregate rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSubmission {
    pub mortgages: Vec<MortgageRecord>,
}

/// Response contract for a portfolio rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingResponse {
    pub rating: RatingBand,
    pub risk_score: f64,
    pub mortgages_count: usize,
    pub average_credit_score: f64,
    /// Records left out of the rating, in submission order.
    pub diagnostics: Vec<RecordDiagnostic>,
}

impl From<PortfolioSummary> for RatingResponse {
    fn from(summary: PortfolioSummary) -> Self {
        Self {
            rating: summary.rating,
            risk_score: summary.weighted_risk_score,
            mortgages_count: summary.mortgages_count,
            average_credit_score: summary.average_credit_score,
            diagnostics: summary
                .exclusions
                .iter()
                .map(RecordDiagnostic::from)
                .collect(),
        }
    }
}

/// Serializable view of a [`RecordExclusion`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDiagnostic {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortgage_id: Option<MortgageId>,
    pub kind: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl From<&RecordExclusion> for RecordDiagnostic {
    fn from(exclusion: &RecordExclusion) -> Self {
        Self {
            index: exclusion.index,
            mortgage_id: exclusion.mortgage_id.clone(),
            kind: exclusion.error.kind(),
            field: exclusion.error.field(),
            message: exclusion.error.to_string(),
        }
    }
}

/// Rating of a single mortgage, used when a record is stored or updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MortgageAssessment {
    pub factors: RiskFactors,
    pub risk_score: f64,
    pub rating: RatingBand,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Rating(#[from] RatingError),
}

/// Boundary facade: portfolio in, rating response out. Holds no mutable state, so one
/// instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct RatingService {
    aggregator: PortfolioAggregator,
}

impl RatingService {
    pub fn new(policy: RatingPolicy) -> Result<Self, PolicyError> {
        policy.validate().map_err(PolicyError::Invalid)?;
        Ok(Self {
            aggregator: PortfolioAggregator::new(policy),
        })
    }

    pub fn policy(&self) -> &RatingPolicy {
        self.aggregator.policy()
    }

    /// Rates a portfolio. Fails as a whole on `EmptyPortfolio` or `InvalidScore`.
    pub fn rate(&self, submission: &PortfolioSubmission) -> Result<RatingResponse, RatingError> {
        let summary = self.summarize(&submission.mortgages)?;
        info!(
            rating = %summary.rating,
            mortgages = summary.mortgages_count,
            excluded = summary.excluded_count(),
            "portfolio rated"
        );
        Ok(RatingResponse::from(summary))
    }

    pub fn summarize(&self, records: &[MortgageRecord]) -> Result<PortfolioSummary, RatingError> {
        self.aggregator.aggregate(records)
    }

    pub fn assess(&self, record: &MortgageRecord) -> Result<MortgageAssessment, AssessmentError> {
        let factors = RiskFactorCalculator::compute(record)?;
        let risk_score = self.aggregator.record_risk(record, &factors);
        let rating = self.aggregator.classifier().classify(risk_score)?;
        Ok(MortgageAssessment {
            factors,
            risk_score,
            rating,
        })
    }
}

impl Default for RatingService {
    fn default() -> Self {
        Self {
            aggregator: PortfolioAggregator::default(),
        }
    }
}
