use super::domain::{CreditTier, LoanType, PropertyType, RatingBand};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Table-driven rating rules. Every constant the engine uses lives here so that a
/// business-rule change is a configuration change.
///
/// Example JSON:
/// ```json
/// {
///   "weights": { "loan_to_value": 0.4, "debt_to_income": 0.35, "credit_tier": 0.25 },
///   "ratio_cap": 100.0,
///   "tier_risk": { "poor": 100.0, "fair": 60.0, "good": 30.0, "excellent": 0.0 },
///   "bands": [{ "band": "AAA", "upper_bound": 10.0 }, { "band": "CCC", "upper_bound": 100.0 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingPolicy {
    pub weights: FactorWeights,
    /// Ceiling applied to a ratio expressed in percent before weighting.
    #[serde(default = "default_ratio_cap")]
    pub ratio_cap: f64,
    pub tier_risk: TierRisk,
    #[serde(default)]
    pub adjustments: RiskAdjustments,
    /// Ordered safest first. Upper bounds are exclusive except for the last band.
    pub bands: Vec<BandThreshold>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorWeights {
    pub loan_to_value: f64,
    pub debt_to_income: f64,
    pub credit_tier: f64,
}

impl FactorWeights {
    pub fn total(&self) -> f64 {
        self.loan_to_value + self.debt_to_income + self.credit_tier
    }
}

/// Risk points (0 to 100) contributed by each credit tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierRisk {
    pub poor: f64,
    pub fair: f64,
    pub good: f64,
    pub excellent: f64,
}

impl TierRisk {
    pub fn for_tier(&self, tier: CreditTier) -> f64 {
        match tier {
            CreditTier::Poor => self.poor,
            CreditTier::Fair => self.fair,
            CreditTier::Good => self.good,
            CreditTier::Excellent => self.excellent,
        }
    }
}

/// Additive risk points per loan and property type, applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskAdjustments {
    #[serde(default)]
    pub adjustable_rate: f64,
    #[serde(default)]
    pub fixed_rate: f64,
    #[serde(default)]
    pub condo: f64,
    #[serde(default)]
    pub single_family: f64,
}

impl RiskAdjustments {
    pub fn for_record(&self, loan_type: LoanType, property_type: PropertyType) -> f64 {
        let loan = match loan_type {
            LoanType::Adjustable => self.adjustable_rate,
            LoanType::Fixed => self.fixed_rate,
        };
        let property = match property_type {
            PropertyType::Condo => self.condo,
            PropertyType::SingleFamily => self.single_family,
        };
        loan + property
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BandThreshold {
    pub band: RatingBand,
    pub upper_bound: f64,
}

fn default_ratio_cap() -> f64 {
    100.0
}

impl Default for RatingPolicy {
    fn default() -> Self {
        let bands = [
            (RatingBand::Aaa, 10.0),
            (RatingBand::Aa, 20.0),
            (RatingBand::A, 35.0),
            (RatingBand::Bbb, 50.0),
            (RatingBand::Bb, 65.0),
            (RatingBand::B, 80.0),
            (RatingBand::Ccc, 100.0),
        ]
        .into_iter()
        .map(|(band, upper_bound)| BandThreshold { band, upper_bound })
        .collect();

        Self {
            weights: FactorWeights {
                loan_to_value: 0.4,
                debt_to_income: 0.35,
                credit_tier: 0.25,
            },
            ratio_cap: default_ratio_cap(),
            tier_risk: TierRisk {
                poor: 100.0,
                fair: 60.0,
                good: 30.0,
                excellent: 0.0,
            },
            adjustments: RiskAdjustments::default(),
            bands,
        }
    }
}

impl RatingPolicy {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PolicyError> {
        let policy: RatingPolicy = serde_json::from_reader(reader)?;
        policy.validate().map_err(PolicyError::Invalid)?;
        Ok(policy)
    }

    /// Checks the policy and returns every problem found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let weights = [
            ("weights.loan_to_value", self.weights.loan_to_value),
            ("weights.debt_to_income", self.weights.debt_to_income),
            ("weights.credit_tier", self.weights.credit_tier),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                errors.push(format!("{name}: must be a non-negative number, got {weight}"));
            }
        }
        let total = self.weights.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            errors.push(format!("weights: must sum to 1.0, got {total}"));
        }

        if !self.ratio_cap.is_finite() || self.ratio_cap <= 0.0 || self.ratio_cap > 100.0 {
            errors.push(format!(
                "ratio_cap: must be in (0, 100], got {}",
                self.ratio_cap
            ));
        }

        for tier in CreditTier::ordered() {
            let risk = self.tier_risk.for_tier(tier);
            if !(0.0..=100.0).contains(&risk) {
                errors.push(format!(
                    "tier_risk.{}: must be in [0, 100], got {risk}",
                    tier.label()
                ));
            }
        }

        let adjustments = [
            ("adjustments.adjustable_rate", self.adjustments.adjustable_rate),
            ("adjustments.fixed_rate", self.adjustments.fixed_rate),
            ("adjustments.condo", self.adjustments.condo),
            ("adjustments.single_family", self.adjustments.single_family),
        ];
        for (name, points) in adjustments {
            if !points.is_finite() {
                errors.push(format!("{name}: must be finite, got {points}"));
            }
        }

        if self.bands.is_empty() {
            errors.push("bands: at least one band is required".to_string());
        }
        let mut previous_bound = 0.0;
        let mut previous_band: Option<RatingBand> = None;
        for (i, threshold) in self.bands.iter().enumerate() {
            if !threshold.upper_bound.is_finite() || threshold.upper_bound <= previous_bound {
                errors.push(format!(
                    "bands[{i}].upper_bound: must increase strictly, got {} after {}",
                    threshold.upper_bound, previous_bound
                ));
            }
            if let Some(previous) = previous_band {
                if threshold.band <= previous {
                    errors.push(format!(
                        "bands[{i}].band: {} must be riskier than {}",
                        threshold.band, previous
                    ));
                }
            }
            previous_bound = threshold.upper_bound;
            previous_band = Some(threshold.band);
        }
        if let Some(last) = self.bands.last() {
            if last.upper_bound != 100.0 {
                errors.push(format!(
                    "bands[{}].upper_bound: final band must close at 100, got {}",
                    self.bands.len() - 1,
                    last.upper_bound
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read rating policy: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rating policy JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rating policy rejected: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
