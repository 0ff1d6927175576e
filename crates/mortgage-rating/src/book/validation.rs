use crate::rating::domain::{CreditTier, MortgageRecord};

/// Field checks applied before a mortgage is stored. Reports every problem at once so the
/// caller can show all of them next to the form.
pub fn validate_submission(record: &MortgageRecord) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !(CreditTier::MIN_SCORE..=CreditTier::MAX_SCORE).contains(&record.credit_score) {
        errors.push(format!(
            "credit_score: must be between {} and {}, got {}",
            CreditTier::MIN_SCORE,
            CreditTier::MAX_SCORE,
            record.credit_score
        ));
    }

    let positive = [
        ("loan_amount", record.loan_amount),
        ("property_value", record.property_value),
        ("annual_income", record.annual_income),
    ];
    for (field, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!("{field}: must be positive, got {value}"));
        }
    }

    if !(record.debt_amount.is_finite() && record.debt_amount >= 0.0) {
        errors.push(format!(
            "debt_amount: cannot be negative, got {}",
            record.debt_amount
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
