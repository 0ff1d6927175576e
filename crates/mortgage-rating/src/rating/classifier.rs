use super::domain::RatingBand;
use super::errors::RatingError;
use super::policy::BandThreshold;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Maps a weighted risk score to a rating band using an ordered threshold table.
///
/// A score belongs to the first band whose upper bound it does not reach, so a score
/// sitting exactly on a boundary lands in the riskier band. The final band is closed
/// at 100.
#[derive(Debug, Clone)]
pub struct RatingClassifier {
    bands: Vec<BandThreshold>,
}

impl RatingClassifier {
    /// Expects a table that already passed `RatingPolicy::validate`.
    pub fn new(bands: Vec<BandThreshold>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[BandThreshold] {
        &self.bands
    }

    pub fn classify(&self, score: f64) -> Result<RatingBand, RatingError> {
        if score.is_nan() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(RatingError::InvalidScore(score));
        }

        let (last, rest) = self
            .bands
            .split_last()
            .ok_or(RatingError::InvalidScore(score))?;

        Ok(rest
            .iter()
            .find(|threshold| score < threshold.upper_bound)
            .map(|threshold| threshold.band)
            .unwrap_or(last.band))
    }
}
