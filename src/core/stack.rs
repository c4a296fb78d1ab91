use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Sample;
use crate::error::{ChartError, ChartResult};

/// Stacking mode for series sharing a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stacking {
    /// Values accumulate additively in series order.
    Normal,
    /// Accumulated values are normalized so every column totals 100.
    Percent,
}

/// One series' accumulated contribution at a stack position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    pub bottom: f64,
    pub top: f64,
}

impl StackEntry {
    #[must_use]
    pub fn span(self) -> f64 {
        self.top - self.bottom
    }
}

/// Per-position stack column: spans keyed by series key, plus the column total.
///
/// `total: None` marks a position explicitly excluded from path construction,
/// e.g. after a stacking-mode toggle left a stale column behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackColumn {
    spans: IndexMap<usize, StackEntry>,
    total: Option<f64>,
}

impl StackColumn {
    fn new() -> Self {
        Self {
            spans: IndexMap::new(),
            total: Some(0.0),
        }
    }

    #[must_use]
    pub fn span(&self, series_key: usize) -> Option<StackEntry> {
        self.spans.get(&series_key).copied()
    }

    #[must_use]
    pub fn total(&self) -> Option<f64> {
        self.total
    }
}

/// Identity and visibility of one series within an axis's stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSeriesInfo {
    pub key: usize,
    pub visible: bool,
}

/// Shared per-axis stack state: accumulated columns plus the series ordering.
///
/// The registry is built fully for all series on an axis before any series'
/// synthesis runs, and is read-only from the synthesis side. The `reversed`
/// flag controls the direction of the gap/cliff scans, not the accumulation
/// order (accumulation follows `push_series` order).
#[derive(Debug, Clone, PartialEq)]
pub struct StackRegistry {
    columns: IndexMap<OrderedFloat<f64>, StackColumn>,
    series: Vec<StackSeriesInfo>,
    reversed: bool,
}

impl StackRegistry {
    #[must_use]
    pub fn new(reversed: bool) -> Self {
        Self {
            columns: IndexMap::new(),
            series: Vec::new(),
            reversed,
        }
    }

    #[must_use]
    pub fn reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub fn series(&self) -> &[StackSeriesInfo] {
        &self.series
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Ordinal of a series key within the axis ordering.
    #[must_use]
    pub fn ordinal_of(&self, series_key: usize) -> Option<usize> {
        self.series.iter().position(|info| info.key == series_key)
    }

    #[must_use]
    pub fn column(&self, position: f64) -> Option<&StackColumn> {
        self.columns.get(&OrderedFloat(position))
    }

    /// Accumulates one series' samples on top of the running column totals.
    ///
    /// Null samples contribute nothing; a position whose every series is null
    /// never materializes a column.
    pub fn push_series(
        &mut self,
        series_key: usize,
        visible: bool,
        samples: &[Sample],
    ) -> ChartResult<()> {
        if self.ordinal_of(series_key).is_some() {
            return Err(ChartError::InvalidData(format!(
                "series key {series_key} already registered in stack"
            )));
        }
        if samples.iter().any(|sample| {
            !sample.position.is_finite() || sample.value.is_some_and(|value| !value.is_finite())
        }) {
            return Err(ChartError::InvalidData(
                "stacked samples must be finite".to_owned(),
            ));
        }

        self.series.push(StackSeriesInfo {
            key: series_key,
            visible,
        });

        for sample in samples {
            let Some(value) = sample.value else {
                continue;
            };

            let column = self
                .columns
                .entry(OrderedFloat(sample.position))
                .or_insert_with(StackColumn::new);
            let bottom = column.total.unwrap_or(0.0);
            column.spans.insert(
                series_key,
                StackEntry {
                    bottom,
                    top: bottom + value,
                },
            );
            column.total = Some(bottom + value);
        }

        trace!(
            series_key,
            visible,
            column_count = self.columns.len(),
            "accumulated series into stack registry"
        );
        Ok(())
    }

    /// Rescales every column so accumulated values span 0..=100.
    ///
    /// Columns with a zero or excluded total are left untouched.
    pub fn normalize_percent(&mut self) {
        for column in self.columns.values_mut() {
            let Some(total) = column.total else { continue };
            if total == 0.0 {
                continue;
            }
            let factor = 100.0 / total;
            for entry in column.spans.values_mut() {
                entry.bottom *= factor;
                entry.top *= factor;
            }
            column.total = Some(100.0);
        }
    }

    /// Marks a position as excluded from path construction (total becomes `None`).
    pub fn exclude_position(&mut self, position: f64) {
        if let Some(column) = self.columns.get_mut(&OrderedFloat(position)) {
            column.total = None;
        }
    }

    /// Known stack positions with a live total, sorted numerically.
    ///
    /// Positions are compared as numbers via `total_cmp`; the registry never
    /// falls back to insertion or lexical key order here.
    #[must_use]
    pub fn sorted_positions(&self) -> Vec<f64> {
        let mut positions: Vec<f64> = self
            .columns
            .iter()
            .filter(|(_, column)| column.total.is_some())
            .map(|(position, _)| position.into_inner())
            .collect();
        positions.sort_by(|a, b| a.total_cmp(b));
        positions
    }
}

/// Read-only view of the registry scoped to one series' synthesis pass.
#[derive(Debug, Clone, Copy)]
pub struct StackSnapshot<'a> {
    registry: &'a StackRegistry,
    ordinal: usize,
    series_key: usize,
}

impl<'a> StackSnapshot<'a> {
    /// Scopes the registry to `series_key`.
    ///
    /// An unknown key or an empty registry is a configuration error: stacked
    /// geometry must only be requested once the axis stack is fully built.
    pub fn new(registry: &'a StackRegistry, series_key: usize) -> ChartResult<Self> {
        if registry.is_empty() && registry.series.is_empty() {
            return Err(ChartError::MissingStack(
                "stack registry has no accumulated series".to_owned(),
            ));
        }
        let Some(ordinal) = registry.ordinal_of(series_key) else {
            return Err(ChartError::MissingStack(format!(
                "series key {series_key} is not part of the stack ordering"
            )));
        };
        Ok(Self {
            registry,
            ordinal,
            series_key,
        })
    }

    #[must_use]
    pub fn registry(&self) -> &'a StackRegistry {
        self.registry
    }

    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    #[must_use]
    pub fn series_key(&self) -> usize {
        self.series_key
    }

    /// This series' accumulated span at `position`, if recorded.
    #[must_use]
    pub fn own_span(&self, position: f64) -> Option<StackEntry> {
        self.registry
            .column(position)
            .and_then(|column| column.span(self.series_key))
    }
}
