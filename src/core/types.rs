use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Raw series sample: a domain position plus an optional value.
///
/// `value: None` models an explicit gap in the series. Samples are immutable
/// series-owned input; all derived per-pass state lives on [`AreaPoint`].
///
/// [`AreaPoint`]: crate::core::AreaPoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub position: f64,
    pub value: Option<f64>,
}

impl Sample {
    #[must_use]
    pub fn new(position: f64, value: f64) -> Self {
        Self {
            position,
            value: Some(value),
        }
    }

    /// A sample that marks a gap at `position`.
    #[must_use]
    pub fn null_at(position: f64) -> Self {
        Self {
            position,
            value: None,
        }
    }

    #[must_use]
    pub fn is_null(self) -> bool {
        self.value.is_none()
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            position: datetime_to_unix_seconds(time),
            value: Some(decimal_to_f64(value, "value")?),
        })
    }
}

/// Checks that samples are ordered by position with unique, finite positions.
///
/// Duplicate or unordered positions are a caller bug for the geometry entry
/// points, so this surfaces them as configuration errors instead of guessing.
pub fn validate_samples(samples: &[Sample]) -> ChartResult<()> {
    for pair in samples.windows(2) {
        if !pair[0].position.is_finite() || !pair[1].position.is_finite() {
            return Err(ChartError::InvalidData(
                "sample positions must be finite".to_owned(),
            ));
        }
        match pair[0].position.total_cmp(&pair[1].position) {
            Ordering::Less => {}
            Ordering::Equal => {
                return Err(ChartError::InvalidData(format!(
                    "duplicate sample position {}",
                    pair[0].position
                )));
            }
            Ordering::Greater => {
                return Err(ChartError::InvalidData(
                    "samples must be ordered by position".to_owned(),
                ));
            }
        }
    }
    if let Some(sample) = samples.iter().find(|s| !s.position.is_finite()) {
        return Err(ChartError::InvalidData(format!(
            "sample position {} must be finite",
            sample.position
        )));
    }
    if let Some(sample) = samples
        .iter()
        .find(|s| s.value.is_some_and(|v| !v.is_finite()))
    {
        return Err(ChartError::InvalidData(format!(
            "sample value at position {} must be finite",
            sample.position
        )));
    }
    Ok(())
}

/// Sorts samples by position and keeps the last sample per duplicate position.
///
/// Non-finite positions and values are dropped. For callers that prefer
/// recovery over the strict [`validate_samples`] error.
#[must_use]
pub fn canonicalize_samples(mut samples: Vec<Sample>) -> Vec<Sample> {
    let original_len = samples.len();
    samples.retain(|sample| {
        sample.position.is_finite() && sample.value.is_none_or(f64::is_finite)
    });
    samples.sort_by(|a, b| a.position.total_cmp(&b.position));

    let mut deduped: Vec<Sample> = Vec::with_capacity(samples.len());
    let mut duplicate_count = 0_usize;
    for sample in samples {
        if let Some(last) = deduped.last_mut() {
            if sample.position.total_cmp(&last.position) == Ordering::Equal {
                *last = sample;
                duplicate_count += 1;
                continue;
            }
        }
        deduped.push(sample);
    }

    let filtered_count = original_len.saturating_sub(deduped.len() + duplicate_count);
    if filtered_count > 0 || duplicate_count > 0 {
        warn!(
            filtered_count,
            duplicate_count,
            canonical_count = deduped.len(),
            "canonicalized samples"
        );
    }
    deduped
}
