pub mod area_path;
pub mod policy;
pub mod position_scale;
pub mod primitives;
pub mod scale;
pub mod stack;
pub mod stack_points;
pub mod types;
pub mod value_scale;

pub use area_path::{
    AreaPathOptions, AreaPaths, BoundaryPath, PathCommand, build_area_paths, project_area_paths,
};
pub use policy::Side;
pub use position_scale::PositionScale;
pub use scale::LinearScale;
pub use stack::{
    StackColumn, StackEntry, StackRegistry, StackSeriesInfo, StackSnapshot, Stacking,
};
pub use stack_points::{AreaPoint, PointOrigin, synthesize_stack_points};
pub use types::{Sample, Viewport, canonicalize_samples, validate_samples};
pub use value_scale::ValueScale;
