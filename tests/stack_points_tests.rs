use area_path_rs::core::{
    PointOrigin, PositionScale, Sample, StackRegistry, StackSnapshot, ValueScale, Viewport,
    synthesize_stack_points,
};
use area_path_rs::error::ChartError;

fn scales() -> (PositionScale, ValueScale, Viewport) {
    let position_scale = PositionScale::new(0.0, 4.0).expect("position scale");
    let value_scale = ValueScale::new(0.0, 100.0).expect("value scale");
    (position_scale, value_scale, Viewport::new(800, 400))
}

fn series_a() -> Vec<Sample> {
    vec![
        Sample::new(1.0, 10.0),
        Sample::new(2.0, 10.0),
        Sample::new(3.0, 10.0),
    ]
}

fn series_b() -> Vec<Sample> {
    vec![Sample::new(1.0, 5.0), Sample::new(3.0, 5.0)]
}

/// Registry with B accumulated below A, so A's scan (toward lower ordinals)
/// sees the hole B leaves at position 2.
fn registry_b_below_a() -> StackRegistry {
    let mut registry = StackRegistry::new(false);
    registry.push_series(0, true, &series_b()).expect("push b");
    registry.push_series(1, true, &series_a()).expect("push a");
    registry
}

#[test]
fn sibling_hole_yields_cliffs_on_the_flanking_points() {
    let (position_scale, value_scale, viewport) = scales();
    let registry = registry_b_below_a();
    let snapshot = StackSnapshot::new(&registry, 1).expect("snapshot");

    let points = synthesize_stack_points(
        &series_a(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");

    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|point| !point.is_null));
    assert!(points.iter().all(|point| point.origin == PointOrigin::Sample));
    assert!(points.iter().all(|point| !point.left_gap && !point.right_gap));

    // B's span at the flanking columns is 5, subtracted toward the hole.
    assert_eq!(points[0].right_cliff, -5.0);
    assert_eq!(points[0].left_cliff, 0.0);
    assert_eq!(points[1].left_cliff, 0.0);
    assert_eq!(points[1].right_cliff, 0.0);
    assert_eq!(points[2].left_cliff, -5.0);
    assert_eq!(points[2].right_cliff, 0.0);

    // Stacked tops/bottoms: A rides on B where B exists.
    assert_eq!(points[0].plot_y, 340.0);
    assert_eq!(points[0].y_bottom, Some(380.0));
    assert_eq!(points[1].plot_y, 360.0);
    assert_eq!(points[1].y_bottom, Some(400.0));
}

#[test]
fn own_missing_value_sets_gap_flags_not_cliffs() {
    let (position_scale, value_scale, viewport) = scales();
    let registry = registry_b_below_a();
    let snapshot = StackSnapshot::new(&registry, 0).expect("snapshot");

    let points = synthesize_stack_points(
        &series_b(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");

    assert_eq!(points.len(), 3);
    assert!(points[0].right_gap);
    assert!(!points[0].left_gap);
    assert_eq!(points[0].right_cliff, 0.0);
    assert!(points[2].left_gap);
    assert_eq!(points[2].left_cliff, 0.0);

    // The middle position is filled with a synthesized null point.
    assert!(points[1].is_null);
    assert_eq!(points[1].origin, PointOrigin::StackFill);
}

#[test]
fn fill_point_rides_on_the_nearest_series_with_a_value() {
    let (position_scale, value_scale, viewport) = scales();
    let mut registry = StackRegistry::new(false);
    registry.push_series(0, true, &series_a()).expect("push a");
    registry.push_series(1, true, &series_b()).expect("push b");
    let snapshot = StackSnapshot::new(&registry, 1).expect("snapshot");

    let points = synthesize_stack_points(
        &series_b(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");

    // B has no value at position 2; its fill point adopts A's top (10).
    assert!(points[1].is_null);
    assert_eq!(points[1].plot_y, 360.0);
    assert_eq!(points[1].y_bottom, Some(360.0));
}

#[test]
fn fill_point_falls_to_zero_when_no_sibling_has_a_value() {
    let (position_scale, value_scale, viewport) = scales();
    let registry = registry_b_below_a();
    let snapshot = StackSnapshot::new(&registry, 0).expect("snapshot");

    let points = synthesize_stack_points(
        &series_b(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");

    // B is the bottom of the scan order; nothing below it has a value at 2.
    assert!(points[1].is_null);
    assert_eq!(points[1].plot_y, 400.0);
}

#[test]
fn reversed_stacks_scan_toward_higher_ordinals() {
    let (position_scale, value_scale, viewport) = scales();
    let mut registry = StackRegistry::new(true);
    registry.push_series(0, true, &series_a()).expect("push a");
    registry.push_series(1, true, &series_b()).expect("push b");
    let snapshot = StackSnapshot::new(&registry, 0).expect("snapshot");

    let points = synthesize_stack_points(
        &series_a(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");

    // With reversed stacks, A (ordinal 0) scans upward and sees B's hole.
    assert_eq!(points[0].right_cliff, -5.0);
    assert_eq!(points[2].left_cliff, -5.0);
    assert!(points.iter().all(|point| !point.left_gap && !point.right_gap));
}

#[test]
fn hidden_siblings_do_not_contribute_cliffs() {
    let (position_scale, value_scale, viewport) = scales();
    let mut registry = StackRegistry::new(false);
    registry.push_series(0, false, &series_b()).expect("push b");
    registry.push_series(1, true, &series_a()).expect("push a");
    let snapshot = StackSnapshot::new(&registry, 1).expect("snapshot");

    let points = synthesize_stack_points(
        &series_a(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");

    assert_eq!(points[0].right_cliff, 0.0);
    assert_eq!(points[2].left_cliff, 0.0);
}

#[test]
fn synthesis_is_deterministic_for_identical_input() {
    let (position_scale, value_scale, viewport) = scales();
    let registry = registry_b_below_a();
    let snapshot = StackSnapshot::new(&registry, 1).expect("snapshot");

    let first = synthesize_stack_points(
        &series_a(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");
    let second = synthesize_stack_points(
        &series_a(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");

    assert_eq!(first, second);
}

#[test]
fn excluded_positions_are_left_out_of_the_point_sequence() {
    let (position_scale, value_scale, viewport) = scales();
    let mut registry = registry_b_below_a();
    registry.exclude_position(2.0);
    let snapshot = StackSnapshot::new(&registry, 1).expect("snapshot");

    let points = synthesize_stack_points(
        &series_a(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    )
    .expect("synthesize");

    let positions: Vec<f64> = points.iter().map(|point| point.position).collect();
    assert_eq!(positions, vec![1.0, 3.0]);
}

#[test]
fn unknown_series_key_is_a_missing_stack_error() {
    let registry = registry_b_below_a();
    let result = StackSnapshot::new(&registry, 9);
    assert!(matches!(result, Err(ChartError::MissingStack(_))));
}

#[test]
fn empty_registry_is_a_missing_stack_error() {
    let registry = StackRegistry::new(false);
    let result = StackSnapshot::new(&registry, 0);
    assert!(matches!(result, Err(ChartError::MissingStack(_))));
}

#[test]
fn sample_without_an_accumulated_span_is_a_missing_stack_error() {
    let (position_scale, value_scale, viewport) = scales();
    let mut registry = StackRegistry::new(false);
    // Registry built from B only; A's samples were never accumulated.
    registry.push_series(0, true, &series_b()).expect("push b");
    registry.push_series(1, true, &[]).expect("push empty");
    let snapshot = StackSnapshot::new(&registry, 1).expect("snapshot");

    let result = synthesize_stack_points(
        &series_a(),
        snapshot,
        position_scale,
        value_scale,
        viewport,
    );
    assert!(matches!(result, Err(ChartError::MissingStack(_))));
}
