use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::policy::{
    self, Side, cliff_breaks_boundary, includes_point, skips_bridged_null,
};
use crate::core::stack_points::{AreaPoint, PointOrigin, synthesize_stack_points};
use crate::core::{
    PositionScale, Sample, StackSnapshot, Stacking, ValueScale, Viewport, validate_samples,
};
use crate::error::{ChartError, ChartResult};

/// Drawing command in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
}

impl PathCommand {
    #[must_use]
    pub fn is_move_to(self) -> bool {
        matches!(self, PathCommand::MoveTo { .. })
    }
}

/// Ordered drawing commands plus the map from emitted command index back to
/// the domain position that produced it.
///
/// `x_map` covers the line-tracing commands only, never a trailing
/// `ClosePath`; for the area polygon it covers the top boundary, which is what
/// partial-redraw logic needs to locate a pixel back in the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPath {
    pub commands: Vec<PathCommand>,
    pub x_map: Vec<f64>,
}

impl BoundaryPath {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
            x_map: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of disjoint polyline runs (one per `MoveTo`).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| command.is_move_to())
            .count()
    }
}

/// Stroke and fill boundaries for one area series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaPaths {
    /// Open polyline for the stroke.
    pub graph: BoundaryPath,
    /// Closed contour for the fill: top boundary joined to the reversed
    /// bottom boundary.
    pub area: BoundaryPath,
}

/// Options governing area boundary construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaPathOptions {
    pub stacking: Option<Stacking>,
    /// Bridge across missing samples instead of breaking the boundary.
    /// `None` defers to the stacking-mode default.
    pub connect_nulls: Option<bool>,
    /// Baseline the fill is anchored to. `None` anchors at the axis minimum;
    /// `-inf`/`+inf` anchor at the corresponding axis extreme.
    pub threshold: Option<f64>,
}

impl Default for AreaPathOptions {
    fn default() -> Self {
        Self {
            stacking: None,
            connect_nulls: None,
            threshold: Some(0.0),
        }
    }
}

impl AreaPathOptions {
    fn validate(self) -> ChartResult<Self> {
        if self.threshold.is_some_and(f64::is_nan) {
            return Err(ChartError::InvalidData(
                "threshold must not be NaN".to_owned(),
            ));
        }
        Ok(self)
    }
}

struct BuildContext<'a> {
    stacked: bool,
    connect_nulls: bool,
    threshold: Option<f64>,
    translated_threshold: f64,
    stack: Option<StackSnapshot<'a>>,
    value_scale: ValueScale,
    viewport: Viewport,
}

/// Computes stroke and fill boundaries for one series in a single pass.
///
/// This is the one-call entry point: it validates the samples, runs stack
/// synthesis when stacking is requested, and builds both paths.
pub fn project_area_paths(
    samples: &[Sample],
    options: AreaPathOptions,
    stack: Option<StackSnapshot<'_>>,
    position_scale: PositionScale,
    value_scale: ValueScale,
    viewport: Viewport,
) -> ChartResult<AreaPaths> {
    let options = options.validate()?;
    validate_samples(samples)?;

    let points = if options.stacking.is_some() {
        let Some(snapshot) = stack else {
            return Err(ChartError::MissingStack(
                "stacking requested without a stack registry snapshot".to_owned(),
            ));
        };
        synthesize_stack_points(samples, snapshot, position_scale, value_scale, viewport)?
    } else {
        let mut points = Vec::with_capacity(samples.len());
        for sample in samples {
            let plot_x = position_scale.position_to_pixel(sample.position, viewport)?;
            let plot_y = match sample.value {
                Some(value) => value_scale.translate(value, viewport)?,
                None => f64::NAN,
            };
            points.push(AreaPoint::new(
                sample.position,
                plot_x,
                plot_y,
                sample.is_null(),
                PointOrigin::Sample,
            ));
        }
        points
    };

    build_area_paths(&points, options, stack, value_scale, viewport)
}

/// Builds the stroke polyline and closed fill polygon from a dense point
/// sequence (already synthesized if stacking is active).
pub fn build_area_paths(
    points: &[AreaPoint],
    options: AreaPathOptions,
    stack: Option<StackSnapshot<'_>>,
    value_scale: ValueScale,
    viewport: Viewport,
) -> ChartResult<AreaPaths> {
    let options = options.validate()?;
    let stacked = options.stacking.is_some();
    if stacked && stack.is_none() {
        return Err(ChartError::MissingStack(
            "stacking requested without a stack registry snapshot".to_owned(),
        ));
    }

    let context = BuildContext {
        stacked,
        connect_nulls: policy::resolve_connect_nulls(options.connect_nulls, options.stacking),
        threshold: options.threshold,
        translated_threshold: value_scale.threshold_pixel(options.threshold, viewport)?,
        stack,
        value_scale,
        viewport,
    };

    let mut graph_points: Vec<AreaPoint> = Vec::with_capacity(points.len());
    let mut bottom_points: Vec<AreaPoint> = Vec::with_capacity(points.len());

    for index in 0..points.len() {
        let point = points[index];
        if !includes_point(point.is_null, context.connect_nulls) {
            continue;
        }

        let mut top_additions: SmallVec<[AreaPoint; 3]> = SmallVec::new();
        let mut bottom_additions: SmallVec<[AreaPoint; 3]> = SmallVec::new();

        if !context.connect_nulls {
            if let Some((top, bottom)) =
                synthesize_side_points(points, index, Side::Left, &context)?
            {
                top_additions.push(top);
                bottom_additions.push(bottom);
            }
        }

        if !skips_bridged_null(point.is_null, context.stacked, context.connect_nulls) {
            let y_bottom = if context.stacked {
                point.y_bottom.unwrap_or(context.translated_threshold)
            } else {
                context.translated_threshold
            };
            top_additions.push(point);
            bottom_additions.push(AreaPoint::new(
                point.position,
                point.plot_x,
                y_bottom,
                false,
                point.origin,
            ));
        }

        if !context.connect_nulls {
            if let Some((top, bottom)) =
                synthesize_side_points(points, index, Side::Right, &context)?
            {
                top_additions.push(top);
                bottom_additions.push(bottom);
            }
        }

        graph_points.extend(top_additions);
        bottom_points.extend(bottom_additions);
    }

    let top_path = trace_boundary(&graph_points, true, true);

    bottom_points.reverse();
    let bottom_path = trace_boundary(&bottom_points, true, true);

    let mut area_commands = top_path.commands.clone();
    let mut closing = bottom_path.commands;
    if let Some(first) = closing.first_mut() {
        // The reversed bottom boundary continues the top contour, so its
        // opening move becomes a line.
        if let PathCommand::MoveTo { x, y } = *first {
            *first = PathCommand::LineTo { x, y };
        }
    }
    area_commands.extend(closing);
    if !area_commands.is_empty() {
        area_commands.push(PathCommand::ClosePath);
    }

    let area = BoundaryPath {
        commands: area_commands,
        x_map: top_path.x_map,
    };
    let graph = trace_boundary(&graph_points, false, context.connect_nulls);

    debug!(
        point_count = points.len(),
        graph_commands = graph.commands.len(),
        area_commands = area.commands.len(),
        stacked = context.stacked,
        connect_nulls = context.connect_nulls,
        "built area boundary paths"
    );
    Ok(AreaPaths { graph, area })
}

/// Synthesizes the top/bottom step points that carry the boundary across a
/// stack cliff or down to the threshold at the edge of a null run.
fn synthesize_side_points(
    points: &[AreaPoint],
    index: usize,
    side: Side,
    context: &BuildContext<'_>,
) -> ChartResult<Option<(AreaPoint, AreaPoint)>> {
    let point = &points[index];
    let cliff = point.cliff(side);
    let gap = point.gap(side);

    // `None` for top/bottom means "sit exactly on the translated threshold".
    let (top, bottom, is_null) = if cliff != 0.0 || gap {
        let Some(snapshot) = context.stack.filter(|_| context.stacked) else {
            return Err(ChartError::MissingStack(
                "cliff-marked points require a stack registry snapshot".to_owned(),
            ));
        };
        let Some(entry) = snapshot.own_span(point.position) else {
            return Err(ChartError::MissingStack(format!(
                "series key {} has no accumulated span at position {}",
                snapshot.series_key(),
                point.position
            )));
        };
        let top = if gap { entry.bottom } else { entry.top } + cliff;
        (Some(top), Some(entry.bottom + cliff), gap)
    } else {
        let neighbor = match side {
            Side::Left => index.checked_sub(1).and_then(|i| points.get(i)),
            Side::Right => points.get(index + 1),
        };
        if !context.stacked && neighbor.is_some_and(|other| other.is_null) {
            (context.threshold, context.threshold, true)
        } else {
            return Ok(None);
        }
    };

    let top_y = match top {
        Some(value) => context
            .value_scale
            .threshold_pixel(Some(value), context.viewport)?,
        None => context.translated_threshold,
    };
    let bottom_y = match bottom {
        Some(value) => context
            .value_scale
            .threshold_pixel(Some(value), context.viewport)?,
        None => context.translated_threshold,
    };

    let top_point = AreaPoint::new(
        point.position,
        point.plot_x,
        top_y,
        is_null,
        PointOrigin::Cliff,
    );
    let bottom_point = AreaPoint::new(
        point.position,
        point.plot_x,
        bottom_y,
        false,
        PointOrigin::Cliff,
    );
    Ok(Some((top_point, bottom_point)))
}

/// Traces one boundary through the shared break policy.
///
/// Both area boundaries and the stroke run through this single routine so
/// they can never disagree on where a break falls.
fn trace_boundary(points: &[AreaPoint], include_nulls: bool, connect_cliffs: bool) -> BoundaryPath {
    let mut commands = Vec::with_capacity(points.len());
    let mut x_map = Vec::with_capacity(points.len());
    let mut gap = false;
    let mut previous: Option<&AreaPoint> = None;

    for point in points {
        let is_null = point.is_null || !point.plot_y.is_finite();

        if cliff_breaks_boundary(
            point.left_cliff,
            previous.map_or(0.0, |last| last.right_cliff),
            connect_cliffs,
        ) {
            gap = true;
        }

        if is_null && !include_nulls {
            gap = true;
        } else {
            let command = if commands.is_empty() || gap {
                PathCommand::MoveTo {
                    x: point.plot_x,
                    y: point.plot_y,
                }
            } else {
                PathCommand::LineTo {
                    x: point.plot_x,
                    y: point.plot_y,
                }
            };
            commands.push(command);
            x_map.push(point.position);
            gap = false;
        }

        previous = Some(point);
    }

    BoundaryPath { commands, x_map }
}
