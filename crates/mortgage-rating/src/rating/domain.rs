use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MortgageId(pub String);

impl fmt::Display for MortgageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Fixed,
    Adjustable,
}

impl LoanType {
    pub fn label(&self) -> &'static str {
        match self {
            LoanType::Fixed => "fixed",
            LoanType::Adjustable => "adjustable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    Condo,
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "single_family",
            PropertyType::Condo => "condo",
        }
    }
}

/// A single mortgage as submitted by the data-entry collaborator.
///
/// Field ranges are validated upstream; the engine still refuses values outside
/// their declared domain so a validation gap cannot poison a portfolio rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MortgageId>,
    pub credit_score: i32,
    pub loan_amount: f64,
    pub property_value: f64,
    pub annual_income: f64,
    pub debt_amount: f64,
    pub loan_type: LoanType,
    pub property_type: PropertyType,
}

/// Credit score band used as the credit component of the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CreditTier {
    pub const MIN_SCORE: i32 = 300;
    pub const MAX_SCORE: i32 = 850;

    /// Bands a score already known to be inside `[MIN_SCORE, MAX_SCORE]`.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s < 620 => CreditTier::Poor,
            s if s < 680 => CreditTier::Fair,
            s if s < 740 => CreditTier::Good,
            _ => CreditTier::Excellent,
        }
    }

    pub fn ordered() -> [CreditTier; 4] {
        [
            CreditTier::Poor,
            CreditTier::Fair,
            CreditTier::Good,
            CreditTier::Excellent,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditTier::Poor => "poor",
            CreditTier::Fair => "fair",
            CreditTier::Good => "good",
            CreditTier::Excellent => "excellent",
        }
    }
}

/// Per-mortgage risk metrics. Always derived from a record, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskFactors {
    pub loan_to_value: f64,
    pub debt_to_income: f64,
    pub credit_tier: CreditTier,
}

/// Discrete rating, ordered from lowest to highest risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatingBand {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "CCC")]
    Ccc,
}

impl RatingBand {
    pub fn ordered() -> [RatingBand; 7] {
        [
            RatingBand::Aaa,
            RatingBand::Aa,
            RatingBand::A,
            RatingBand::Bbb,
            RatingBand::Bb,
            RatingBand::B,
            RatingBand::Ccc,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingBand::Aaa => "AAA",
            RatingBand::Aa => "AA",
            RatingBand::A => "A",
            RatingBand::Bbb => "BBB",
            RatingBand::Bb => "BB",
            RatingBand::B => "B",
            RatingBand::Ccc => "CCC",
        }
    }
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record left out of a portfolio rating, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordExclusion {
    /// Position of the record in the submitted sequence.
    pub index: usize,
    pub mortgage_id: Option<MortgageId>,
    pub error: super::RecordError,
}

/// Portfolio-level statistics produced by a single aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub mortgages_count: usize,
    pub average_credit_score: f64,
    pub weighted_risk_score: f64,
    pub rating: RatingBand,
    /// Excluded records in input order.
    pub exclusions: Vec<RecordExclusion>,
}

impl PortfolioSummary {
    pub fn excluded_count(&self) -> usize {
        self.exclusions.len()
    }
}
