use super::domain::{CreditTier, MortgageRecord, RiskFactors};
use super::errors::RecordError;

const CREDIT_SCORE_DOMAIN: &str = "[300, 850]";
const POSITIVE_DOMAIN: &str = "(0, inf)";
const NON_NEGATIVE_DOMAIN: &str = "[0, inf)";

/// Derives loan-to-value, debt-to-income and the credit tier for one mortgage.
///
/// Checks run in a fixed order (credit score, loan amount, property value, annual
/// income, debt amount) so a record with several problems always reports the same one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskFactorCalculator;

impl RiskFactorCalculator {
    pub fn compute(record: &MortgageRecord) -> Result<RiskFactors, RecordError> {
        let credit_tier = credit_tier(record.credit_score)?;

        let loan_amount = positive("loan_amount", record.loan_amount)?;
        let property_value = denominator("property_value", record.property_value)?;
        let annual_income = denominator("annual_income", record.annual_income)?;
        let debt_amount = non_negative("debt_amount", record.debt_amount)?;

        Ok(RiskFactors {
            loan_to_value: loan_amount / property_value,
            debt_to_income: debt_amount / annual_income,
            credit_tier,
        })
    }
}

fn credit_tier(score: i32) -> Result<CreditTier, RecordError> {
    if !(CreditTier::MIN_SCORE..=CreditTier::MAX_SCORE).contains(&score) {
        return Err(RecordError::OutOfRange {
            field: "credit_score",
            value: f64::from(score),
            domain: CREDIT_SCORE_DOMAIN,
        });
    }
    Ok(CreditTier::from_score(score))
}

fn positive(field: &'static str, value: f64) -> Result<f64, RecordError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RecordError::OutOfRange {
            field,
            value,
            domain: POSITIVE_DOMAIN,
        })
    }
}

fn denominator(field: &'static str, value: f64) -> Result<f64, RecordError> {
    if value == 0.0 {
        return Err(RecordError::DivisionByZero { field });
    }
    positive(field, value)
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, RecordError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RecordError::OutOfRange {
            field,
            value,
            domain: NON_NEGATIVE_DOMAIN,
        })
    }
}
