use super::classifier::{RatingClassifier, MAX_SCORE, MIN_SCORE};
use super::domain::{MortgageRecord, PortfolioSummary, RecordExclusion, RiskFactors};
use super::errors::RatingError;
use super::factors::RiskFactorCalculator;
use super::policy::RatingPolicy;
use tracing::{debug, warn};

/// Folds per-record risk factors into a portfolio summary and classifies it.
///
/// Every mortgage carries equal weight regardless of loan size.
#[derive(Debug, Clone)]
pub struct PortfolioAggregator {
    policy: RatingPolicy,
    classifier: RatingClassifier,
}

impl PortfolioAggregator {
    /// Expects a policy that already passed `RatingPolicy::validate`.
    pub fn new(policy: RatingPolicy) -> Self {
        let classifier = RatingClassifier::new(policy.bands.clone());
        Self { policy, classifier }
    }

    pub fn policy(&self) -> &RatingPolicy {
        &self.policy
    }

    pub fn classifier(&self) -> &RatingClassifier {
        &self.classifier
    }

    /// Risk points in `[0, 100]` for a single record's factors.
    pub fn record_risk(&self, record: &MortgageRecord, factors: &RiskFactors) -> f64 {
        let weights = &self.policy.weights;
        let ltv_points = self.capped_percent(factors.loan_to_value);
        let dti_points = self.capped_percent(factors.debt_to_income);
        let tier_points = self.policy.tier_risk.for_tier(factors.credit_tier);

        let weighted = weights.loan_to_value * ltv_points
            + weights.debt_to_income * dti_points
            + weights.credit_tier * tier_points;
        let adjusted = weighted
            + self
                .policy
                .adjustments
                .for_record(record.loan_type, record.property_type);

        adjusted.clamp(MIN_SCORE, MAX_SCORE)
    }

    pub fn aggregate(&self, records: &[MortgageRecord]) -> Result<PortfolioSummary, RatingError> {
        let mut exclusions = Vec::new();
        let mut count = 0usize;
        let mut credit_total = 0f64;
        let mut risk_total = 0f64;

        for (index, record) in records.iter().enumerate() {
            match RiskFactorCalculator::compute(record) {
                Ok(factors) => {
                    count += 1;
                    credit_total += f64::from(record.credit_score);
                    risk_total += self.record_risk(record, &factors);
                }
                Err(error) => {
                    warn!(
                        index,
                        mortgage_id = record.id.as_ref().map(|id| id.0.as_str()),
                        kind = error.kind(),
                        %error,
                        "excluding mortgage from portfolio rating"
                    );
                    exclusions.push(RecordExclusion {
                        index,
                        mortgage_id: record.id.clone(),
                        error,
                    });
                }
            }
        }

        if count == 0 {
            return Err(RatingError::EmptyPortfolio {
                excluded: exclusions.len(),
            });
        }

        let average_credit_score = credit_total / count as f64;
        let weighted_risk_score = risk_total / count as f64;
        let rating = self.classifier.classify(weighted_risk_score)?;

        debug!(
            mortgages = count,
            excluded = exclusions.len(),
            weighted_risk_score,
            %rating,
            "portfolio aggregated"
        );

        Ok(PortfolioSummary {
            mortgages_count: count,
            average_credit_score,
            weighted_risk_score,
            rating,
            exclusions,
        })
    }

    fn capped_percent(&self, ratio: f64) -> f64 {
        (ratio * 100.0).min(self.policy.ratio_cap)
    }
}

impl Default for PortfolioAggregator {
    fn default() -> Self {
        Self::new(RatingPolicy::default())
    }
}
