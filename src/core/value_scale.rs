use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, Viewport};
use crate::error::{ChartError, ChartResult};

/// Value (y) axis translator mapped to an inverted pixel axis.
///
/// Pixel 0 is the top of the viewport and corresponds to the domain maximum.
/// Translation rounds to whole pixels; all upstream cliff arithmetic stays in
/// value space so rounding never compounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    linear: LinearScale,
}

impl ValueScale {
    pub fn new(value_min: f64, value_max: f64) -> ChartResult<Self> {
        if !value_min.is_finite() || !value_max.is_finite() || value_min == value_max {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            linear: LinearScale::new(value_min.min(value_max), value_min.max(value_max))?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    /// Maps a value to pixel Y, rounded to the nearest whole pixel.
    ///
    /// Infinite values clamp to the corresponding domain extreme instead of
    /// producing an infinite pixel; NaN is rejected.
    pub fn translate(self, value: f64, viewport: Viewport) -> ChartResult<f64> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if value.is_nan() {
            return Err(ChartError::InvalidData("value must not be NaN".to_owned()));
        }

        let (domain_min, domain_max) = self.linear.domain();
        let value = if value == f64::NEG_INFINITY {
            domain_min
        } else if value == f64::INFINITY {
            domain_max
        } else {
            value
        };

        let normalized = self.linear.normalize(value)?;
        Ok(((1.0 - normalized) * f64::from(viewport.height)).round())
    }

    /// Maps pixel Y back to a value. The inverse is exact up to the whole-pixel
    /// rounding applied by [`ValueScale::translate`].
    pub fn to_value(self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        self.linear
            .denormalize(1.0 - pixel / f64::from(viewport.height))
    }

    /// Resolves a fill threshold to pixel Y.
    ///
    /// `None` anchors the baseline at the axis minimum. `-inf`/`+inf` anchor at
    /// the corresponding axis extreme, and finite thresholds clamp into the
    /// axis domain before translation.
    pub fn threshold_pixel(self, threshold: Option<f64>, viewport: Viewport) -> ChartResult<f64> {
        let (domain_min, domain_max) = self.linear.domain();
        let anchored = match threshold {
            None => domain_min,
            Some(value) if value.is_nan() => {
                return Err(ChartError::InvalidData(
                    "threshold must not be NaN".to_owned(),
                ));
            }
            Some(value) => value.clamp(domain_min, domain_max),
        };
        self.translate(anchored, viewport)
    }
}
