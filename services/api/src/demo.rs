use clap::Args;
use mortgage_rating::config::{AppConfig, RatingConfig};
use mortgage_rating::error::AppError;
use mortgage_rating::rating::{
    LoanType, MortgageId, MortgageRecord, PortfolioImporter, PortfolioSummary, PropertyType,
    RatingService,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RateArgs {
    /// Portfolio export to rate (`.json` or CSV with a header row)
    #[arg(long)]
    pub(crate) portfolio: PathBuf,
    /// Rating policy JSON overriding RATING_POLICY_PATH
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Print the factors and rating of every mortgage
    #[arg(long)]
    pub(crate) per_mortgage: bool,
}

pub(crate) fn run_rate(args: RateArgs) -> Result<(), AppError> {
    let RateArgs {
        portfolio,
        policy,
        per_mortgage,
    } = args;

    let rating_config = match policy {
        Some(policy_path) => RatingConfig {
            policy_path: Some(policy_path),
        },
        None => AppConfig::load()?.rating,
    };
    let service = RatingService::new(rating_config.policy()?)?;
    let records = PortfolioImporter::from_path(&portfolio)?;

    println!(
        "Rating {} mortgage(s) from {}",
        records.len(),
        portfolio.display()
    );
    if per_mortgage {
        render_mortgages(&service, &records);
    }
    let summary = service.summarize(&records)?;
    render_summary(&summary);

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let service = RatingService::default();
    let records = sample_portfolio();

    println!("Mortgage credit rating demo");
    render_mortgages(&service, &records);
    let summary = service.summarize(&records)?;
    render_summary(&summary);

    Ok(())
}

fn render_mortgages(service: &RatingService, records: &[MortgageRecord]) {
    println!("\nMortgages");
    for (index, record) in records.iter().enumerate() {
        let label = record
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("#{index}"));
        match service.assess(record) {
            Ok(assessment) => println!(
                "- {label}: {} {} | LTV {:.1}% | DTI {:.1}% | credit {} ({}) | risk {:.2} -> {}",
                record.loan_type.label(),
                record.property_type.label(),
                assessment.factors.loan_to_value * 100.0,
                assessment.factors.debt_to_income * 100.0,
                record.credit_score,
                assessment.factors.credit_tier.label(),
                assessment.risk_score,
                assessment.rating
            ),
            Err(err) => println!("- {label}: not rated ({err})"),
        }
    }
}

fn render_summary(summary: &PortfolioSummary) {
    println!("\nPortfolio");
    println!("- Rating: {}", summary.rating);
    println!("- Weighted risk score: {:.2}", summary.weighted_risk_score);
    println!("- Mortgages rated: {}", summary.mortgages_count);
    println!(
        "- Average credit score: {:.1}",
        summary.average_credit_score
    );

    if summary.exclusions.is_empty() {
        return;
    }

    println!("Excluded ({}):", summary.excluded_count());
    for exclusion in &summary.exclusions {
        let id = exclusion
            .mortgage_id
            .as_ref()
            .map(|id| format!(" [{id}]"))
            .unwrap_or_default();
        println!(
            "  - record {}{}: {} ({})",
            exclusion.index,
            id,
            exclusion.error,
            exclusion.error.kind()
        );
    }
}

fn sample_portfolio() -> Vec<MortgageRecord> {
    vec![
        sample(
            "demo-001",
            750,
            [200_000.0, 250_000.0, 100_000.0, 20_000.0],
            LoanType::Fixed,
            PropertyType::SingleFamily,
        ),
        sample(
            "demo-002",
            600,
            [180_000.0, 200_000.0, 50_000.0, 25_000.0],
            LoanType::Adjustable,
            PropertyType::Condo,
        ),
        sample(
            "demo-003",
            705,
            [320_000.0, 400_000.0, 120_000.0, 42_000.0],
            LoanType::Fixed,
            PropertyType::Condo,
        ),
        sample(
            "demo-004",
            664,
            [260_000.0, 250_000.0, 72_000.0, 30_000.0],
            LoanType::Adjustable,
            PropertyType::SingleFamily,
        ),
        // Missing income: excluded with a division-by-zero diagnostic.
        sample(
            "demo-005",
            790,
            [150_000.0, 200_000.0, 0.0, 5_000.0],
            LoanType::Fixed,
            PropertyType::SingleFamily,
        ),
    ]
}

/// `amounts` is loan amount, property value, annual income, debt amount.
fn sample(
    id: &str,
    credit_score: i32,
    amounts: [f64; 4],
    loan_type: LoanType,
    property_type: PropertyType,
) -> MortgageRecord {
    let [loan_amount, property_value, annual_income, debt_amount] = amounts;
    MortgageRecord {
        id: Some(MortgageId(id.to_string())),
        credit_score,
        loan_amount,
        property_value,
        annual_income,
        debt_amount,
        loan_type,
        property_type,
    }
}
