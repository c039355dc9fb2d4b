// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cell point index storage.
//!
//! A grid cell owns the indices of the points (into its mapper's point set)
//! that fall inside it. Two interchangeable representations are provided:
//!
//! - [`IndexCell`]: an explicit list of indices. Cheap to append to and makes
//!   no assumptions about the data.
//! - [`RangedCell`]: a list of half-open index ranges. Much smaller when
//!   spatially-local points are also index-contiguous, as with sorted line or
//!   path data.
//!
//! Cells keep no reference to the point set; callers pass the point slice
//! (or its length) to the operations that need it. Stored indices are only
//! valid against the point set in its current order, so every whole-set
//! reversal must be matched by exactly one [`CellStorage::reverse_indices`]
//! call on every cell.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use kurbo::Point;
use smallvec::SmallVec;

use crate::error::MapperError;
use crate::runs::{RunOrder, arg_find_runs};

/// Storage for the point indices of a single grid cell.
pub trait CellStorage: Default + Debug {
    /// Appends `indices` to the stored set. Duplicates are not detected.
    fn add_indices(&mut self, indices: &[usize]);

    /// Appends the contiguous index range `range`.
    ///
    /// The default expands the range and calls [`CellStorage::add_indices`].
    fn add_range(&mut self, range: Range<usize>) {
        let indices: Vec<usize> = range.collect();
        self.add_indices(&indices);
    }

    /// Returns every stored index, in storage order.
    fn indices(&self) -> Vec<usize>;

    /// Replaces the stored set with `indices`.
    fn set_indices(&mut self, indices: &[usize]);

    /// Renumbers the stored indices for a point set of `len` points that has
    /// been reversed end to end: index `i` becomes `len - i - 1`.
    ///
    /// Calling this without a matching reversal, or twice for one reversal,
    /// silently points the cell at the wrong data.
    fn reverse_indices(&mut self, len: usize);

    /// Number of stored indices.
    fn len(&self) -> usize;

    /// Whether the cell holds no indices.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the points this cell refers to onto `out`.
    fn extend_points(&self, data: &[Point], out: &mut Vec<Point>);

    /// Returns the points this cell refers to.
    fn points(&self, data: &[Point]) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.len());
        self.extend_points(data, &mut out);
        out
    }

    /// The stored ranges, for range-based variants.
    ///
    /// Variants that do not store ranges fail with
    /// [`MapperError::Unsupported`].
    fn ranges(&self) -> Result<&[Range<usize>], MapperError> {
        Err(MapperError::Unsupported {
            operation: "ranges",
        })
    }
}

/// A cell storing each point index explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexCell {
    indices: Vec<usize>,
}

impl IndexCell {
    /// Creates an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored indices, without copying.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

impl CellStorage for IndexCell {
    fn add_indices(&mut self, indices: &[usize]) {
        self.indices.extend_from_slice(indices);
    }

    fn add_range(&mut self, range: Range<usize>) {
        self.indices.extend(range);
    }

    fn indices(&self) -> Vec<usize> {
        self.indices.clone()
    }

    fn set_indices(&mut self, indices: &[usize]) {
        self.indices.clear();
        self.indices.extend_from_slice(indices);
    }

    fn reverse_indices(&mut self, len: usize) {
        for i in &mut self.indices {
            debug_assert!(*i < len, "cell index {i} out of bounds for {len} points");
            *i = len - *i - 1;
        }
    }

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn extend_points(&self, data: &[Point], out: &mut Vec<Point>) {
        out.extend(self.indices.iter().map(|&i| data[i]));
    }
}

/// Inline capacity for a [`RangedCell`]'s range list.
///
/// Sorted data usually crosses a cell a handful of times at most.
const INLINE_RANGES: usize = 4;

/// A cell storing its point indices as half-open ranges.
///
/// Ranges are appended as given; overlapping or adjacent ranges are not
/// merged. Populating a cell once per grid rebuild from per-cell index runs
/// keeps them disjoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangedCell {
    ranges: SmallVec<[Range<usize>; INLINE_RANGES]>,
}

impl RangedCell {
    /// Creates an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends several ranges at once.
    pub fn add_ranges<I>(&mut self, ranges: I)
    where
        I: IntoIterator<Item = Range<usize>>,
    {
        self.ranges
            .extend(ranges.into_iter().filter(|r| !r.is_empty()));
    }

    fn compress(indices: &[usize]) -> impl Iterator<Item = Range<usize>> + '_ {
        arg_find_runs(indices, RunOrder::Ascending)
            .into_iter()
            .map(|run| indices[run.start]..indices[run.end - 1] + 1)
    }
}

impl CellStorage for RangedCell {
    fn add_indices(&mut self, indices: &[usize]) {
        let ranges: SmallVec<[Range<usize>; INLINE_RANGES]> = Self::compress(indices).collect();
        self.ranges.extend(ranges);
    }

    fn add_range(&mut self, range: Range<usize>) {
        if !range.is_empty() {
            self.ranges.push(range);
        }
    }

    fn indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.len());
        for r in &self.ranges {
            out.extend(r.clone());
        }
        out
    }

    fn set_indices(&mut self, indices: &[usize]) {
        let ranges: SmallVec<[Range<usize>; INLINE_RANGES]> = Self::compress(indices).collect();
        self.ranges = ranges;
    }

    fn reverse_indices(&mut self, len: usize) {
        for r in &mut self.ranges {
            debug_assert!(r.end <= len, "cell range {r:?} out of bounds for {len} points");
            *r = (len - r.end)..(len - r.start);
        }
    }

    fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).sum()
    }

    fn extend_points(&self, data: &[Point], out: &mut Vec<Point>) {
        for r in &self.ranges {
            out.extend_from_slice(&data[r.clone()]);
        }
    }

    fn ranges(&self) -> Result<&[Range<usize>], MapperError> {
        Ok(self.ranges.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn data(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    fn double_reverse_is_identity<C: CellStorage>() {
        let mut cell = C::default();
        cell.add_indices(&[2, 3, 4]);
        cell.add_range(7..9);
        let before = cell.indices();
        cell.reverse_indices(10);
        assert_ne!(cell.indices(), before);
        cell.reverse_indices(10);
        assert_eq!(cell.indices(), before);
    }

    #[test]
    fn index_cell_double_reverse() {
        double_reverse_is_identity::<IndexCell>();
    }

    #[test]
    fn ranged_cell_double_reverse() {
        double_reverse_is_identity::<RangedCell>();
    }

    #[test]
    fn index_cell_appends_and_reads_points() {
        let pts = data(6);
        let mut cell = IndexCell::new();
        cell.add_indices(&[4, 1]);
        cell.add_range(2..3);
        assert_eq!(cell.as_slice(), &[4, 1, 2]);
        assert_eq!(
            cell.points(&pts),
            vec![pts[4], pts[1], pts[2]]
        );
        assert!(cell.ranges().is_err());
    }

    #[test]
    fn index_cell_reverse_maps_to_mirror() {
        let mut cell = IndexCell::new();
        cell.add_indices(&[0, 3, 9]);
        cell.reverse_indices(10);
        assert_eq!(cell.indices(), vec![9, 6, 0]);
    }

    #[test]
    fn ranged_cell_compresses_batches() {
        let mut cell = RangedCell::new();
        cell.add_indices(&[3, 4, 5, 9, 10, 20]);
        assert_eq!(cell.ranges().unwrap(), &[3..6, 9..11, 20..21]);
        assert_eq!(cell.len(), 6);
        assert_eq!(cell.indices(), vec![3, 4, 5, 9, 10, 20]);
    }

    #[test]
    fn ranged_cell_reverse_keeps_the_same_points() {
        let mut pts = data(10);
        let mut cell = RangedCell::new();
        cell.add_ranges([1..4, 6..7]);
        let mut before = cell.points(&pts);

        pts.reverse();
        cell.reverse_indices(pts.len());
        assert_eq!(cell.ranges().unwrap(), &[6..9, 3..4]);

        let mut after = cell.points(&pts);
        before.sort_by(|a, b| a.x.total_cmp(&b.x));
        after.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(before, after);
    }

    #[test]
    fn ranged_cell_set_indices_replaces() {
        let mut cell = RangedCell::new();
        cell.add_range(0..100);
        cell.set_indices(&[7, 8]);
        assert_eq!(cell.ranges().unwrap(), &[7..9]);
        cell.add_range(5..5);
        assert_eq!(cell.len(), 2);
    }

    #[test]
    fn empty_cells() {
        let pts = data(3);
        assert!(IndexCell::new().is_empty());
        assert!(RangedCell::new().points(&pts).is_empty());
        let mut cell = RangedCell::new();
        cell.add_indices(&[]);
        assert!(cell.is_empty());
    }
}
