//! Portfolio credit rating engine.
//!
//! Records flow through [`RiskFactorCalculator`] one at a time, are folded by
//! [`PortfolioAggregator`] and classified by [`RatingClassifier`]. [`RatingService`] is the
//! call/response boundary used by the HTTP router and the CLI. Every component is a pure
//! function of its input and the [`RatingPolicy`] it was built with.

pub mod aggregator;
pub mod classifier;
pub mod domain;
mod errors;
pub mod factors;
pub mod import;
pub mod policy;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregator::PortfolioAggregator;
pub use classifier::RatingClassifier;
pub use domain::{
    CreditTier, LoanType, MortgageId, MortgageRecord, PortfolioSummary, PropertyType, RatingBand,
    RecordExclusion, RiskFactors,
};
pub use errors::{RatingError, RecordError};
pub use factors::RiskFactorCalculator;
pub use import::{PortfolioImportError, PortfolioImporter};
pub use policy::{
    BandThreshold, FactorWeights, PolicyError, RatingPolicy, RiskAdjustments, TierRisk,
};
pub use router::rating_router;
pub use service::{
    AssessmentError, MortgageAssessment, PortfolioSubmission, RatingResponse, RecordDiagnostic,
    RatingService,
};
