use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::policy::Side;
use crate::core::{PositionScale, Sample, StackSnapshot, ValueScale, Viewport, validate_samples};
use crate::error::{ChartError, ChartResult};

/// Where a pass-scoped point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointOrigin {
    /// Backed by a real series sample.
    Sample,
    /// Synthesized at a stack position where this series has no value.
    StackFill,
    /// Synthesized by the path builder to step across a stack cliff.
    Cliff,
}

/// Pass-scoped point consumed by the boundary path builder.
///
/// Points are rebuilt from scratch on every geometry pass; the cliff and gap
/// fields start at their defaults so no state can leak from a pass that ran
/// under a different stacking mode. `plot_y` is NaN for a null sample that no
/// synthesis pass has assigned a stand-in value to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaPoint {
    pub position: f64,
    pub plot_x: f64,
    pub plot_y: f64,
    pub is_null: bool,
    /// Pixel bottom of this point's stack span, when stacking resolved one.
    pub y_bottom: Option<f64>,
    /// Value-space compensation for stack holes in the previous column.
    pub left_cliff: f64,
    /// Value-space compensation for stack holes in the next column.
    pub right_cliff: f64,
    /// This series itself is missing in the previous column.
    pub left_gap: bool,
    /// This series itself is missing in the next column.
    pub right_gap: bool,
    pub origin: PointOrigin,
}

impl AreaPoint {
    #[must_use]
    pub fn new(position: f64, plot_x: f64, plot_y: f64, is_null: bool, origin: PointOrigin) -> Self {
        Self {
            position,
            plot_x,
            plot_y,
            is_null,
            y_bottom: None,
            left_cliff: 0.0,
            right_cliff: 0.0,
            left_gap: false,
            right_gap: false,
            origin,
        }
    }

    #[must_use]
    pub fn cliff(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_cliff,
            Side::Right => self.right_cliff,
        }
    }

    #[must_use]
    pub fn gap(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_gap,
            Side::Right => self.right_gap,
        }
    }

    fn set_cliff(&mut self, side: Side, cliff: f64) {
        match side {
            Side::Left => self.left_cliff = cliff,
            Side::Right => self.right_cliff = cliff,
        }
    }

    fn set_gap(&mut self, side: Side) {
        match side {
            Side::Left => self.left_gap = true,
            Side::Right => self.right_gap = true,
        }
    }
}

/// Reconciles one series' samples against its axis stack.
///
/// Emits one point per live stack position, in numeric position order:
/// real samples carry their stacked top/bottom pixels plus cliff and gap
/// marks for holes sibling series leave in the neighboring columns; positions
/// where this series has no value are filled with synthesized null points that
/// ride on the nearest sibling below (or above, for reversed stacks).
pub fn synthesize_stack_points(
    samples: &[Sample],
    snapshot: StackSnapshot<'_>,
    position_scale: PositionScale,
    value_scale: ValueScale,
    viewport: Viewport,
) -> ChartResult<Vec<AreaPoint>> {
    validate_samples(samples)?;

    let registry = snapshot.registry();
    let ordering = registry.series();
    // The gap/cliff walk and the fill walk both advance by this signed step:
    // reversed stacks scan toward higher ordinals, normal stacks toward lower.
    let step: isize = if registry.reversed() { 1 } else { -1 };

    let mut sample_at: IndexMap<OrderedFloat<f64>, Sample> =
        IndexMap::with_capacity(samples.len());
    for sample in samples {
        sample_at.insert(OrderedFloat(sample.position), *sample);
    }

    let positions = registry.sorted_positions();
    let mut points = Vec::with_capacity(positions.len());

    for (idx, &x) in positions.iter().enumerate() {
        let own_sample = sample_at.get(&OrderedFloat(x)).copied();

        if let Some(sample) = own_sample.filter(|sample| !sample.is_null()) {
            let Some(entry) = snapshot.own_span(x) else {
                return Err(ChartError::MissingStack(format!(
                    "series key {} has no accumulated span at position {x}",
                    snapshot.series_key()
                )));
            };

            let plot_x = position_scale.position_to_pixel(x, viewport)?;
            let plot_y = value_scale.translate(entry.top, viewport)?;
            let mut point =
                AreaPoint::new(sample.position, plot_x, plot_y, false, PointOrigin::Sample);
            point.y_bottom = Some(value_scale.translate(entry.bottom, viewport)?);

            for side in [Side::Left, Side::Right] {
                let neighbor_idx = idx as isize + side.key_step();
                let Some(&neighbor_x) = usize::try_from(neighbor_idx)
                    .ok()
                    .and_then(|i| positions.get(i))
                else {
                    continue;
                };
                let Some(neighbor_column) = registry.column(neighbor_x) else {
                    continue;
                };
                let Some(current_column) = registry.column(x) else {
                    continue;
                };

                let mut cliff = 0.0;
                let mut ordinal = snapshot.ordinal() as isize;
                while ordinal >= 0 && (ordinal as usize) < ordering.len() {
                    let info = ordering[ordinal as usize];
                    if neighbor_column.span(info.key).is_none() {
                        if info.key == snapshot.series_key() {
                            // This series itself is missing next door; the
                            // boundary must break there even when it bridges
                            // its own nulls.
                            point.set_gap(side);
                        } else if info.visible {
                            // A sibling below leaves a hole in the neighbor
                            // column; subtract its span here so the boundary
                            // does not double-count the missing contribution.
                            if let Some(sibling) = current_column.span(info.key) {
                                cliff -= sibling.span();
                            }
                        }
                    }
                    ordinal += step;
                }
                point.set_cliff(side, cliff);
            }

            points.push(point);
        } else {
            // No value for this series here: ride on the nearest series in
            // scan order that has one, so the region's edge follows the stack
            // instead of collapsing to the baseline.
            let Some(column) = registry.column(x) else {
                continue;
            };
            let mut stand_in = 0.0;
            let mut ordinal = snapshot.ordinal() as isize;
            while ordinal >= 0 && (ordinal as usize) < ordering.len() {
                if let Some(entry) = column.span(ordering[ordinal as usize].key) {
                    stand_in = entry.top;
                    break;
                }
                ordinal += step;
            }

            let plot_x = position_scale.position_to_pixel(x, viewport)?;
            let plot_y = value_scale.translate(stand_in, viewport)?;
            let mut point = AreaPoint::new(x, plot_x, plot_y, true, PointOrigin::StackFill);
            point.y_bottom = Some(plot_y);
            points.push(point);
        }
    }

    debug!(
        sample_count = samples.len(),
        position_count = positions.len(),
        point_count = points.len(),
        series_key = snapshot.series_key(),
        "synthesized stack points"
    );
    Ok(points)
}
