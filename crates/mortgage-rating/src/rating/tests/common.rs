use axum::response::Response;
use serde_json::Value;

use crate::rating::domain::{LoanType, MortgageId, MortgageRecord, PropertyType};
use crate::rating::{PortfolioAggregator, RatingClassifier, RatingPolicy, RatingService};

pub(super) fn record(
    credit_score: i32,
    loan_amount: f64,
    property_value: f64,
    annual_income: f64,
    debt_amount: f64,
) -> MortgageRecord {
    MortgageRecord {
        id: None,
        credit_score,
        loan_amount,
        property_value,
        annual_income,
        debt_amount,
        loan_type: LoanType::Fixed,
        property_type: PropertyType::SingleFamily,
    }
}

pub(super) fn with_id(mut record: MortgageRecord, id: &str) -> MortgageRecord {
    record.id = Some(MortgageId(id.to_string()));
    record
}

/// Low-risk borrower: LTV 80%, DTI 20%, excellent credit.
pub(super) fn prime_record() -> MortgageRecord {
    record(750, 200_000.0, 250_000.0, 100_000.0, 20_000.0)
}

/// Higher-risk borrower: LTV 90%, DTI 50%, poor credit.
pub(super) fn subprime_record() -> MortgageRecord {
    record(600, 180_000.0, 200_000.0, 50_000.0, 25_000.0)
}

pub(super) fn sample_portfolio() -> Vec<MortgageRecord> {
    vec![prime_record(), subprime_record()]
}

pub(super) fn aggregator() -> PortfolioAggregator {
    PortfolioAggregator::new(RatingPolicy::default())
}

pub(super) fn classifier() -> RatingClassifier {
    RatingClassifier::new(RatingPolicy::default().bands)
}

pub(super) fn service() -> RatingService {
    RatingService::new(RatingPolicy::default()).expect("default policy is valid")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
