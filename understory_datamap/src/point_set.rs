// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The point set a mapper is built over.

use alloc::vec::Vec;

use kurbo::Point;

use crate::config::MapperConfig;
use crate::error::MapperError;
use crate::runs::sort_points;
use crate::types::{Axis, DataSorting, Extents, PointArray, SortOrder};

/// Points held by a data mapper, in canonical one-point-per-row form.
///
/// The points are kept sorted by [`PointSet::sort_axis`] in
/// [`PointSet::sort_order`]. The orientation of the caller's original array is
/// remembered so [`PointSet::to_array`] can hand data back the way it came in.
#[derive(Clone, Debug)]
pub struct PointSet {
    points: Vec<Point>,
    transposed: bool,
    extents: Extents,
    sort_order: SortOrder,
    sort_axis: Axis,
    extents_delta: f64,
}

impl PointSet {
    /// Creates an empty point set using the ordering and margin from `config`.
    #[must_use]
    pub fn new(config: &MapperConfig) -> Self {
        Self {
            points: Vec::new(),
            transposed: false,
            extents: Extents::ZERO,
            sort_order: config.sort_order,
            sort_axis: config.sort_axis,
            extents_delta: config.extents_delta,
        }
    }

    /// The points, in sorted order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounds of the points, widened by the configured margin.
    #[must_use]
    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Order the points are kept in.
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Coordinate the points are sorted by.
    #[must_use]
    pub fn sort_axis(&self) -> Axis {
        self.sort_axis
    }

    /// Whether the last array assigned was `2×N`.
    #[must_use]
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// The points as an array in the caller's original orientation.
    #[must_use]
    pub fn to_array(&self) -> PointArray {
        let rows = PointArray::from_points(&self.points);
        if self.transposed {
            rows.transpose()
        } else {
            rows
        }
    }

    /// Replaces the points with the contents of `data`.
    ///
    /// `sorting` is the caller's claim about the order of `data`. With
    /// [`DataSorting::None`] the points are fully sorted; a claim that differs
    /// from the configured order is honored with a single reversal; a
    /// matching claim leaves the points as given.
    ///
    /// The shape is validated before anything changes. An array with no rows
    /// clears the set.
    pub(crate) fn assign(
        &mut self,
        data: &PointArray,
        sorting: DataSorting,
    ) -> Result<(), MapperError> {
        if data.rows() == 0 {
            self.clear();
            return Ok(());
        }
        let (points, transposed) = data.to_points()?;
        self.points = points;
        self.transposed = transposed;

        match sorting.order() {
            None => self.sort(),
            Some(order) if order != self.sort_order => self.points.reverse(),
            Some(_) => {}
        }
        self.extents = Extents::from_points(&self.points, self.extents_delta);
        Ok(())
    }

    /// Empties the set and zeroes the extents.
    pub(crate) fn clear(&mut self) {
        self.points.clear();
        self.transposed = false;
        self.extents = Extents::ZERO;
    }

    /// Sorts the points fully by the sort axis in the sort order.
    pub(crate) fn sort(&mut self) {
        sort_points(&mut self.points, self.sort_axis);
        if self.sort_order == SortOrder::Descending {
            self.points.reverse();
        }
    }

    /// Records a new sort order and reverses the points to match.
    ///
    /// Returns `false` without touching the points when `order` is already
    /// current.
    pub(crate) fn reverse_to(&mut self, order: SortOrder) -> bool {
        if order == self.sort_order {
            return false;
        }
        self.sort_order = order;
        self.points.reverse();
        true
    }

    /// Records a new sort order and fully re-sorts the points.
    pub(crate) fn resort_to(&mut self, order: SortOrder) {
        self.sort_order = order;
        self.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn unsorted() -> PointArray {
        PointArray::from_points(&[
            Point::new(3.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 3.0),
        ])
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let mut set = PointSet::new(&MapperConfig::default());
        set.assign(&unsorted(), DataSorting::None).unwrap();
        let xs: Vec<f64> = set.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn descending_config_sorts_descending() {
        let config = MapperConfig::default().with_sort_order(SortOrder::Descending);
        let mut set = PointSet::new(&config);
        set.assign(&unsorted(), DataSorting::None).unwrap();
        let xs: Vec<f64> = set.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn mismatched_claim_reverses_without_sorting() {
        let mut set = PointSet::new(&MapperConfig::default());
        let claimed_desc = PointArray::from_points(&[
            Point::new(9.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(7.0, 0.0),
        ]);
        set.assign(&claimed_desc, DataSorting::Descending).unwrap();
        let xs: Vec<f64> = set.points().iter().map(|p| p.x).collect();
        // Trusted claim: reversed, not re-sorted.
        assert_eq!(xs, vec![7.0, 5.0, 9.0]);
    }

    #[test]
    fn transposed_input_round_trips() {
        let mut set = PointSet::new(&MapperConfig::default());
        let cols = PointArray::from_columns(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0]).unwrap();
        set.assign(&cols, DataSorting::Ascending).unwrap();
        assert!(set.is_transposed());
        assert_eq!(set.to_array(), cols);
    }

    #[test]
    fn bad_shape_leaves_set_untouched() {
        let mut set = PointSet::new(&MapperConfig::default());
        set.assign(&unsorted(), DataSorting::None).unwrap();
        let bad = PointArray::new(3, 3, vec![0.0; 9]).unwrap();
        assert_eq!(
            set.assign(&bad, DataSorting::None),
            Err(MapperError::Shape { rows: 3, cols: 3 })
        );
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn rows_without_columns_is_a_shape_error() {
        let mut set = PointSet::new(&MapperConfig::default());
        set.assign(&unsorted(), DataSorting::None).unwrap();
        let hollow = PointArray::new(3, 0, Vec::new()).unwrap();
        assert_eq!(
            set.assign(&hollow, DataSorting::None),
            Err(MapperError::Shape { rows: 3, cols: 0 })
        );
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn empty_columns_assign_no_points() {
        let mut set = PointSet::new(&MapperConfig::default());
        set.assign(&unsorted(), DataSorting::None).unwrap();
        let cols = PointArray::from_columns(&[], &[]).unwrap();
        set.assign(&cols, DataSorting::None).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.extents(), Extents::ZERO);
    }

    #[test]
    fn empty_input_clears() {
        let mut set = PointSet::new(&MapperConfig::default());
        set.assign(&unsorted(), DataSorting::None).unwrap();
        set.assign(&PointArray::default(), DataSorting::None).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.extents(), Extents::ZERO);
    }

    #[test]
    fn reverse_to_is_a_no_op_for_the_current_order() {
        let mut set = PointSet::new(&MapperConfig::default());
        set.assign(&unsorted(), DataSorting::None).unwrap();
        assert!(!set.reverse_to(SortOrder::Ascending));
        assert!(set.reverse_to(SortOrder::Descending));
        assert_eq!(set.points()[0].x, 3.0);
    }
}
