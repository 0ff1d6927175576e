//! End-to-end scenarios for portfolio rating through the public service facade and the
//! HTTP routers, without reaching into private modules.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use mortgage_rating::book::{
    book_router, MortgageBook, MortgageEntry, MortgageRepository, RepositoryError,
};
use mortgage_rating::rating::{
    rating_router, LoanType, MortgageId, MortgageRecord, PortfolioImporter, PortfolioSubmission,
    PropertyType, RatingBand, RatingError, RatingPolicy, RatingService,
};

#[derive(Default)]
struct SharedRepository {
    entries: Mutex<HashMap<MortgageId, MortgageEntry>>,
}

impl MortgageRepository for SharedRepository {
    fn insert(&self, entry: MortgageEntry) -> Result<MortgageEntry, RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        if guard.contains_key(&entry.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    fn update(&self, entry: MortgageEntry) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        if guard.contains_key(&entry.id) {
            guard.insert(entry.id.clone(), entry);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &MortgageId) -> Result<Option<MortgageEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<MortgageEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &MortgageId) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

fn mortgage(
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

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[test]
fn reference_portfolio_rates_reproducibly() {
    let service = RatingService::new(RatingPolicy::default()).expect("policy valid");
    let submission = PortfolioSubmission {
        mortgages: vec![
            mortgage(750, 200_000.0, 250_000.0, 100_000.0, 20_000.0),
            mortgage(600, 180_000.0, 200_000.0, 50_000.0, 25_000.0),
        ],
    };

    let first = service.rate(&submission).expect("portfolio rates");
    let second = service.rate(&submission).expect("portfolio rates");

    assert_eq!(first, second);
    assert_eq!(first.mortgages_count, 2);
    assert_eq!(first.average_credit_score, 675.0);
    assert_eq!(first.rating, RatingBand::Bb);
    assert!((first.risk_score - 58.75).abs() < 1e-9);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn degenerate_records_are_reported_not_swallowed() {
    let service = RatingService::default();
    let submission = PortfolioSubmission {
        mortgages: vec![
            mortgage(750, 200_000.0, 250_000.0, 0.0, 20_000.0),
            mortgage(600, 180_000.0, 200_000.0, 50_000.0, 25_000.0),
            mortgage(900, 180_000.0, 200_000.0, 50_000.0, 25_000.0),
        ],
    };

    let response = service.rate(&submission).expect("portfolio rates");

    assert_eq!(response.mortgages_count, 1);
    assert_eq!(response.average_credit_score, 600.0);
    let kinds: Vec<_> = response.diagnostics.iter().map(|d| (d.index, d.kind)).collect();
    assert_eq!(kinds, vec![(0, "division_by_zero"), (2, "out_of_range")]);
}

#[test]
fn empty_submission_fails_without_partial_response() {
    let service = RatingService::default();

    let result = service.rate(&PortfolioSubmission { mortgages: vec![] });

    assert_eq!(result, Err(RatingError::EmptyPortfolio { excluded: 0 }));
}

#[test]
fn imported_csv_portfolio_matches_typed_submission() {
    let csv = "credit_score,loan_amount,property_value,annual_income,debt_amount,loan_type,property_type\n\
        750,200000,250000,100000,20000,fixed,single_family\n\
        600,180000,200000,50000,25000,fixed,single_family\n";
    let records = PortfolioImporter::from_csv_reader(csv.as_bytes()).expect("csv parses");
    let service = RatingService::default();

    let summary = service.summarize(&records).expect("portfolio rates");

    assert_eq!(summary.mortgages_count, 2);
    assert_eq!(summary.rating, RatingBand::Bb);
}

#[tokio::test]
async fn stored_mortgages_and_direct_submissions_share_the_engine() {
    let ratings = Arc::new(RatingService::default());
    let book = Arc::new(MortgageBook::new(
        Arc::new(SharedRepository::default()),
        ratings.clone(),
    ));
    let app = book_router(book).merge(rating_router(ratings));

    for record in [
        json!({
            "credit_score": 750, "loan_amount": 200000, "property_value": 250000,
            "annual_income": 100000, "debt_amount": 20000,
            "loan_type": "fixed", "property_type": "single_family"
        }),
        json!({
            "credit_score": 600, "loan_amount": 180000, "property_value": 200000,
            "annual_income": 50000, "debt_amount": 25000,
            "loan_type": "fixed", "property_type": "single_family"
        }),
    ] {
        let response = app
            .clone()
            .oneshot(
                axum::http::Request::post("/api/v1/mortgages")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(serde_json::to_vec(&record).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("create executes");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let book_rating = app
        .clone()
        .oneshot(
            axum::http::Request::get("/api/v1/ratings/book")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("book rating executes");
    assert_eq!(book_rating.status(), StatusCode::OK);
    let book_rating = read_json_body(book_rating).await;

    let listed = app
        .clone()
        .oneshot(
            axum::http::Request::get("/api/v1/mortgages")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("list executes");
    let listed = read_json_body(listed).await;
    let direct = app
        .oneshot(
            axum::http::Request::post("/api/v1/ratings")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({ "mortgages": listed })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("direct rating executes");
    assert_eq!(direct.status(), StatusCode::OK);
    let direct = read_json_body(direct).await;

    assert_eq!(book_rating["rating"], "BB");
    assert_eq!(book_rating, direct);
}
