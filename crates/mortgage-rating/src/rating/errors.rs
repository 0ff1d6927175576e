/// Failure to derive risk factors for one record. Recoverable: the record is
/// excluded and the rest of the portfolio is still rated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("{field} value {value} is outside the allowed domain {domain}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        domain: &'static str,
    },
    #[error("{field} is zero, ratio cannot be computed")]
    DivisionByZero { field: &'static str },
}

impl RecordError {
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::OutOfRange { .. } => "out_of_range",
            RecordError::DivisionByZero { .. } => "division_by_zero",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            RecordError::OutOfRange { field, .. } | RecordError::DivisionByZero { field } => field,
        }
    }
}

/// Failure of a whole rating request. Never replaced with a placeholder rating.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("risk score {0} is outside [0, 100]")]
    InvalidScore(f64),
    #[error("portfolio has no ratable mortgages ({excluded} excluded)")]
    EmptyPortfolio { excluded: usize },
}
