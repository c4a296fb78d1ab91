use crate::core::Stacking;

/// Side of a point when scanning for gaps and cliffs in position order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Step applied to a sorted-position index to reach the neighbor column.
    #[must_use]
    pub fn key_step(self) -> isize {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

/// Resolves the effective bridge-across-nulls flag.
///
/// An explicit option always wins; otherwise only percent stacking bridges
/// by default.
#[must_use]
pub fn resolve_connect_nulls(connect_nulls: Option<bool>, stacking: Option<Stacking>) -> bool {
    connect_nulls.unwrap_or(matches!(stacking, Some(Stacking::Percent)))
}

/// Whether a point takes part in boundary construction at all.
#[must_use]
pub fn includes_point(is_null: bool, connect_nulls: bool) -> bool {
    !is_null || connect_nulls
}

/// Whether a bridged null is dropped from the emitted boundary.
///
/// Non-stacked bridging skips the null sample entirely so the boundary runs
/// straight between its non-null neighbors; stacked bridging keeps the
/// synthesized fill point so the region tracks the rest of the stack.
#[must_use]
pub fn skips_bridged_null(is_null: bool, stacked: bool, connect_nulls: bool) -> bool {
    is_null && !stacked && connect_nulls
}

/// Whether a cliff mark forces a stroke break between two adjacent points.
#[must_use]
pub fn cliff_breaks_boundary(
    left_cliff: f64,
    previous_right_cliff: f64,
    connect_cliffs: bool,
) -> bool {
    !connect_cliffs && (left_cliff != 0.0 || previous_right_cliff != 0.0)
}

#[cfg(test)]
mod tests {
    use super::{
        cliff_breaks_boundary, includes_point, resolve_connect_nulls, skips_bridged_null,
    };
    use crate::core::Stacking;

    #[test]
    fn connect_nulls_defaults_follow_stacking_mode() {
        assert!(!resolve_connect_nulls(None, None));
        assert!(!resolve_connect_nulls(None, Some(Stacking::Normal)));
        assert!(resolve_connect_nulls(None, Some(Stacking::Percent)));
    }

    #[test]
    fn explicit_connect_nulls_overrides_percent_default() {
        assert!(!resolve_connect_nulls(Some(false), Some(Stacking::Percent)));
        assert!(resolve_connect_nulls(Some(true), None));
    }

    #[test]
    fn null_points_only_participate_when_bridging() {
        assert!(includes_point(false, false));
        assert!(!includes_point(true, false));
        assert!(includes_point(true, true));
    }

    #[test]
    fn bridged_nulls_are_skipped_only_when_unstacked() {
        assert!(skips_bridged_null(true, false, true));
        assert!(!skips_bridged_null(true, true, true));
        assert!(!skips_bridged_null(false, false, true));
        assert!(!skips_bridged_null(true, false, false));
    }

    #[test]
    fn cliff_marks_break_only_when_not_bridging() {
        assert!(cliff_breaks_boundary(-3.0, 0.0, false));
        assert!(cliff_breaks_boundary(0.0, 2.0, false));
        assert!(!cliff_breaks_boundary(0.0, 0.0, false));
        assert!(!cliff_breaks_boundary(-3.0, 2.0, true));
    }
}
