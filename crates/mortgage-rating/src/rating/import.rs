use super::domain::{LoanType, MortgageId, MortgageRecord, PropertyType};
use super::service::PortfolioSubmission;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PortfolioImportError {
    #[error("failed to read portfolio: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid portfolio CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid portfolio JSON data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads portfolios exported from the data-entry system.
pub struct PortfolioImporter;

impl PortfolioImporter {
    /// Chooses JSON for a `.json` extension and CSV for everything else.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MortgageRecord>, PortfolioImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_csv_reader(file)
        }
    }

    /// Accepts either a bare array of mortgages or a `{ "mortgages": [...] }` submission.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<MortgageRecord>, PortfolioImportError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum JsonPortfolio {
            Submission(PortfolioSubmission),
            Records(Vec<MortgageRecord>),
        }

        let portfolio: JsonPortfolio = serde_json::from_reader(reader)?;
        Ok(match portfolio {
            JsonPortfolio::Submission(submission) => submission.mortgages,
            JsonPortfolio::Records(records) => records,
        })
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<MortgageRecord>, PortfolioImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for row in csv_reader.deserialize::<MortgageRow>() {
            records.push(row?.into_record());
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct MortgageRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    credit_score: i32,
    loan_amount: f64,
    property_value: f64,
    annual_income: f64,
    debt_amount: f64,
    loan_type: LoanType,
    property_type: PropertyType,
}

impl MortgageRow {
    fn into_record(self) -> MortgageRecord {
        MortgageRecord {
            id: self.id.map(MortgageId),
            credit_score: self.credit_score,
            loan_amount: self.loan_amount,
            property_value: self.property_value,
            annual_income: self.annual_income,
            debt_amount: self.debt_amount,
            loan_type: self.loan_type,
            property_type: self.property_type,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
