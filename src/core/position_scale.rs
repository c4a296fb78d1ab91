use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, Sample, Viewport};
use crate::error::{ChartError, ChartResult};

/// Position (x) axis translator mapping domain positions across the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionScale {
    linear: LinearScale,
}

impl PositionScale {
    pub fn new(position_start: f64, position_end: f64) -> ChartResult<Self> {
        Ok(Self {
            linear: LinearScale::new(position_start, position_end)?,
        })
    }

    /// Fits the scale to the position extent of the given samples.
    pub fn from_samples(samples: &[Sample]) -> ChartResult<Self> {
        if samples.is_empty() {
            return Err(ChartError::InvalidData(
                "position scale cannot be built from empty data".to_owned(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for sample in samples {
            if !sample.position.is_finite() {
                return Err(ChartError::InvalidData(
                    "sample positions must be finite".to_owned(),
                ));
            }
            min = min.min(sample.position);
            max = max.max(sample.position);
        }
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        Self::new(min, max)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    pub fn position_to_pixel(self, position: f64, viewport: Viewport) -> ChartResult<f64> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let normalized = self.linear.normalize(position)?;
        Ok(normalized * f64::from(viewport.width))
    }

    pub fn pixel_to_position(self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        self.linear.denormalize(pixel / f64::from(viewport.width))
    }
}
