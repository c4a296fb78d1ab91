//! area-path-rs: boundary-path geometry core for stacked area series.
//!
//! This crate turns ordered samples, possibly stacked with sibling series on
//! a shared value axis, into two deterministic boundary polylines: an open
//! "graph" path for the stroke and a closed "area" path for the fill.
//! Rendering, axis ticks, and interaction are out of scope; consumers feed
//! the emitted commands to whatever surface they draw on.

pub mod core;
pub mod error;
pub mod telemetry;

pub use crate::core::{
    AreaPathOptions, AreaPaths, BoundaryPath, PathCommand, Sample, StackRegistry, StackSnapshot,
    Stacking, Viewport, project_area_paths,
};
pub use error::{ChartError, ChartResult};
