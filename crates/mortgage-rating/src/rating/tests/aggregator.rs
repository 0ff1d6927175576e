use super::common::*;
use crate::rating::domain::{LoanType, MortgageId, PropertyType, RatingBand};
use crate::rating::policy::RiskAdjustments;
use crate::rating::{PortfolioAggregator, RatingError, RatingPolicy, RecordError};

#[test]
fn two_record_portfolio_matches_reference_values() {
    let summary = aggregator()
        .aggregate(&sample_portfolio())
        .expect("portfolio rates");

    assert_eq!(summary.mortgages_count, 2);
    assert_eq!(summary.average_credit_score, 675.0);
    // (0.4*80 + 0.35*20 + 0.25*0 + 0.4*90 + 0.35*50 + 0.25*100) / 2
    assert_close(summary.weighted_risk_score, 58.75);
    assert_eq!(summary.rating, RatingBand::Bb);
    assert!(summary.exclusions.is_empty());
}

#[test]
fn single_record_portfolio_reports_its_own_credit_score() {
    for record in [prime_record(), subprime_record(), record(812, 1.0, 9.0, 5.0, 0.0)] {
        let summary = aggregator()
            .aggregate(std::slice::from_ref(&record))
            .expect("portfolio rates");

        assert_eq!(summary.mortgages_count, 1);
        assert_eq!(summary.average_credit_score, f64::from(record.credit_score));
    }
}

#[test]
fn empty_portfolio_is_a_hard_error() {
    assert_eq!(
        aggregator().aggregate(&[]),
        Err(RatingError::EmptyPortfolio { excluded: 0 })
    );
}

#[test]
fn portfolio_with_only_excluded_records_is_empty() {
    let records = vec![record(700, 1.0, 2.0, 0.0, 1.0), record(900, 1.0, 2.0, 3.0, 1.0)];

    assert_eq!(
        aggregator().aggregate(&records),
        Err(RatingError::EmptyPortfolio { excluded: 2 })
    );
}

#[test]
fn zero_income_record_is_excluded_and_rest_still_rates() {
    let mut records = sample_portfolio();
    records.insert(
        1,
        with_id(record(700, 150_000.0, 200_000.0, 0.0, 10_000.0), "mtg-zero"),
    );

    let summary = aggregator().aggregate(&records).expect("portfolio rates");

    assert_eq!(summary.mortgages_count, 2);
    assert_eq!(summary.average_credit_score, 675.0);
    assert_eq!(summary.rating, RatingBand::Bb);
    assert_eq!(summary.exclusions.len(), 1);
    let exclusion = &summary.exclusions[0];
    assert_eq!(exclusion.index, 1);
    assert_eq!(exclusion.mortgage_id, Some(MortgageId("mtg-zero".to_string())));
    assert_eq!(
        exclusion.error,
        RecordError::DivisionByZero {
            field: "annual_income"
        }
    );
}

#[test]
fn exclusions_are_reported_in_input_order() {
    let records = vec![
        record(200, 1.0, 2.0, 3.0, 1.0),
        prime_record(),
        record(700, 1.0, 0.0, 3.0, 1.0),
        record(700, 1.0, 2.0, 3.0, -1.0),
    ];

    let summary = aggregator().aggregate(&records).expect("portfolio rates");

    let indices: Vec<usize> = summary.exclusions.iter().map(|e| e.index).collect();
    let kinds: Vec<&str> = summary.exclusions.iter().map(|e| e.error.kind()).collect();
    assert_eq!(indices, vec![0, 2, 3]);
    assert_eq!(kinds, vec!["out_of_range", "division_by_zero", "out_of_range"]);
    assert_eq!(summary.excluded_count(), 3);
}

#[test]
fn ratios_are_capped_before_weighting() {
    // LTV 300% and DTI 400% both cap at 100 points; poor credit adds 100 points.
    let summary = aggregator()
        .aggregate(&[record(500, 600_000.0, 200_000.0, 10_000.0, 40_000.0)])
        .expect("portfolio rates");

    assert_close(summary.weighted_risk_score, 100.0);
    assert_eq!(summary.rating, RatingBand::Ccc);
}

#[test]
fn lowest_risk_record_scores_zero() {
    let summary = aggregator()
        .aggregate(&[record(800, 0.000_001, 1_000_000.0, 100_000.0, 0.0)])
        .expect("portfolio rates");

    assert!(summary.weighted_risk_score < 1e-6);
    assert_eq!(summary.rating, RatingBand::Aaa);
}

#[test]
fn mortgages_are_weighted_equally_regardless_of_size() {
    let small = record(750, 80.0, 100.0, 100.0, 20.0);
    let large = subprime_record();

    let summary = aggregator()
        .aggregate(&[small, large])
        .expect("portfolio rates");

    assert_close(summary.weighted_risk_score, 58.75);
}

#[test]
fn adjustments_shift_record_risk_and_clamp() {
    let policy = RatingPolicy {
        adjustments: RiskAdjustments {
            adjustable_rate: 10.0,
            condo: 5.0,
            ..RiskAdjustments::default()
        },
        ..RatingPolicy::default()
    };
    let aggregator = PortfolioAggregator::new(policy);

    let mut adjustable_condo = prime_record();
    adjustable_condo.loan_type = LoanType::Adjustable;
    adjustable_condo.property_type = PropertyType::Condo;
    let summary = aggregator
        .aggregate(&[adjustable_condo])
        .expect("portfolio rates");
    assert_close(summary.weighted_risk_score, 54.0);

    let mut worst = record(500, 600_000.0, 200_000.0, 10_000.0, 40_000.0);
    worst.loan_type = LoanType::Adjustable;
    let summary = aggregator.aggregate(&[worst]).expect("portfolio rates");
    assert_close(summary.weighted_risk_score, 100.0);
}

#[test]
fn aggregate_is_idempotent() {
    let records = sample_portfolio();
    let aggregator = aggregator();

    let first = aggregator.aggregate(&records);
    let second = aggregator.aggregate(&records);

    assert_eq!(first, second);
}

#[test]
fn independent_portfolios_rate_concurrently() {
    let aggregator = aggregator();
    let portfolios = vec![
        sample_portfolio(),
        vec![prime_record()],
        vec![subprime_record()],
        vec![],
    ];
    let expected: Vec<_> = portfolios
        .iter()
        .map(|records| aggregator.aggregate(records))
        .collect();

    let shared = &aggregator;
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = portfolios
            .iter()
            .map(|records| scope.spawn(move || shared.aggregate(records)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .collect()
    });

    assert_eq!(results, expected);
}
