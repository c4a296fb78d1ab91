use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Finite, non-degenerate linear domain shared by both axis translators.
///
/// The scale only maps between domain values and the normalized 0..=1 range;
/// pixel spans and axis orientation belong to the owning translator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps a domain value to its normalized 0..=1 offset within the domain.
    pub fn normalize(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        Ok((value - self.domain_start) / span)
    }

    /// Maps a normalized 0..=1 offset back to a domain value.
    pub fn denormalize(self, normalized: f64) -> ChartResult<f64> {
        if !normalized.is_finite() {
            return Err(ChartError::InvalidData(
                "normalized offset must be finite".to_owned(),
            ));
        }

        let span = self.domain_end - self.domain_start;
        Ok(self.domain_start + normalized * span)
    }
}
