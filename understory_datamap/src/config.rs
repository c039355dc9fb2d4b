// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapper configuration.

use crate::types::{Axis, SortOrder};

/// Default margin added around the data bounds.
pub const DEFAULT_EXTENTS_DELTA: f64 = 0.1;

/// Default target population of a grid cell.
pub const DEFAULT_POINTS_PER_CELL: usize = 100;

/// Settings shared by all data mappers.
///
/// Built with `with_*` methods starting from [`MapperConfig::default`]:
///
/// ```rust
/// use understory_datamap::{Axis, MapperConfig, SortOrder};
///
/// let config = MapperConfig::default()
///     .with_sort_order(SortOrder::Descending)
///     .with_sort_axis(Axis::Y)
///     .with_points_per_cell(32);
/// assert_eq!(config.points_per_cell, 32);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapperConfig {
    /// Order the point set is kept in.
    pub sort_order: SortOrder,
    /// Coordinate the point set is sorted by.
    pub sort_axis: Axis,
    /// Margin added on every side of the data bounds.
    pub extents_delta: f64,
    /// Number of points per cell the grid is sized for. Never zero.
    pub points_per_cell: usize,
}

impl MapperConfig {
    /// Sets the sort order.
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Sets the sort axis.
    #[must_use]
    pub const fn with_sort_axis(mut self, sort_axis: Axis) -> Self {
        self.sort_axis = sort_axis;
        self
    }

    /// Sets the extents margin. Negative and NaN values are treated as zero.
    #[must_use]
    pub fn with_extents_delta(mut self, delta: f64) -> Self {
        self.extents_delta = if delta > 0.0 { delta } else { 0.0 };
        self
    }

    /// Sets the target cell population, clamped to at least 1.
    #[must_use]
    pub const fn with_points_per_cell(mut self, points_per_cell: usize) -> Self {
        self.points_per_cell = if points_per_cell == 0 {
            1
        } else {
            points_per_cell
        };
        self
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::Ascending,
            sort_axis: Axis::X,
            extents_delta: DEFAULT_EXTENTS_DELTA,
            points_per_cell: DEFAULT_POINTS_PER_CELL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = MapperConfig::default();
        assert_eq!(c.sort_order, SortOrder::Ascending);
        assert_eq!(c.sort_axis, Axis::X);
        assert_eq!(c.points_per_cell, 100);
        assert_eq!(c.extents_delta, 0.1);
    }

    #[test]
    fn clamps_degenerate_values() {
        let c = MapperConfig::default()
            .with_points_per_cell(0)
            .with_extents_delta(-3.0);
        assert_eq!(c.points_per_cell, 1);
        assert_eq!(c.extents_delta, 0.0);
        let c = MapperConfig::default().with_extents_delta(f64::NAN);
        assert_eq!(c.extents_delta, 0.0);
    }
}
