// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point arrays, sort orders, extents, and query results.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::error::MapperError;

/// Order in which a mapper keeps its point set.
///
/// Points are ordered by the configured [`Axis`] coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest coordinate first.
    #[default]
    Ascending,
    /// Largest coordinate first.
    Descending,
}

impl SortOrder {
    /// Returns the opposite order.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Caller-asserted ordering of a point array handed to `set_data`.
///
/// The claim is trusted: when it names an order, the mapper never checks it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataSorting {
    /// No known order; the mapper performs a full sort.
    #[default]
    None,
    /// Already sorted ascending along the mapper's sort axis.
    Ascending,
    /// Already sorted descending along the mapper's sort axis.
    Descending,
}

impl DataSorting {
    /// The sort order this claim corresponds to, if any.
    #[must_use]
    pub const fn order(self) -> Option<SortOrder> {
        match self {
            Self::None => None,
            Self::Ascending => Some(SortOrder::Ascending),
            Self::Descending => Some(SortOrder::Descending),
        }
    }
}

impl From<SortOrder> for DataSorting {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => Self::Ascending,
            SortOrder::Descending => Self::Descending,
        }
    }
}

/// Coordinate axis used for sorting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The domain (x) coordinate.
    #[default]
    X,
    /// The value (y) coordinate.
    Y,
}

impl Axis {
    /// Reads this axis' coordinate from a point.
    #[inline]
    #[must_use]
    pub fn coord(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }
}

/// Axis-aligned bounds of a point set, widened by a small margin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extents {
    /// Lower-left corner.
    pub origin: Point,
    /// Width and height.
    pub size: Size,
}

impl Extents {
    /// Zero-sized extents at the origin; used for empty point sets.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Computes the bounds of `points`, widened by `delta` on every side.
    ///
    /// Returns [`Extents::ZERO`] for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point], delta: f64) -> Self {
        let Some(first) = points.first() else {
            return Self::ZERO;
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let origin = Point::new(min_x - delta, min_y - delta);
        let size = Size::new(max_x + delta - origin.x, max_y + delta - origin.y);
        Self { origin, size }
    }

    /// The extents as a rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Whether the extents have no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.size.width > 0.0 && self.size.height > 0.0)
    }

    /// Whether `p` lies inside the extents, edges included.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x <= self.origin.x + self.size.width
            && p.y <= self.origin.y + self.size.height
    }
}

impl Default for Extents {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A dense, row-major 2-D array of coordinates.
///
/// Data mappers accept either `N×2` arrays (one point per row) or `2×N`
/// arrays (x values in row 0, y values in row 1), and hand data back in
/// whichever orientation they were given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointArray {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl PointArray {
    /// Wraps `values` as a `rows × cols` array.
    ///
    /// Fails with [`MapperError::Shape`] if `values.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, MapperError> {
        if rows.checked_mul(cols) != Some(values.len()) {
            return Err(MapperError::Shape { rows, cols });
        }
        Ok(Self { rows, cols, values })
    }

    /// Builds an `N×2` array from points.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let mut values = Vec::with_capacity(points.len() * 2);
        for p in points {
            values.push(p.x);
            values.push(p.y);
        }
        Self {
            rows: points.len(),
            cols: 2,
            values,
        }
    }

    /// Builds a `2×N` array from separate x and y columns.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self, MapperError> {
        if xs.len() != ys.len() {
            return Err(MapperError::Shape {
                rows: 2,
                cols: xs.len().max(ys.len()),
            });
        }
        let mut values = Vec::with_capacity(xs.len() * 2);
        values.extend_from_slice(xs);
        values.extend_from_slice(ys);
        Ok(Self {
            rows: 2,
            cols: xs.len(),
            values,
        })
    }

    /// `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The row-major value buffer.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Whether the array holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `(row, col)`, if in bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            self.values.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Returns the transposed array.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                values.push(self.values[r * self.cols + c]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            values,
        }
    }

    /// Reads the array as points, detecting its orientation.
    ///
    /// A first axis of length 2 means `2×N` (this includes the ambiguous
    /// `2×2` case); otherwise a second axis of length 2 means `N×2`. The
    /// returned flag is `true` for `2×N` input.
    pub(crate) fn to_points(&self) -> Result<(Vec<Point>, bool), MapperError> {
        if self.rows == 2 {
            let (xs, ys) = self.values.split_at(self.cols);
            let points = xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect();
            Ok((points, true))
        } else if self.cols == 2 {
            let points = self
                .values
                .chunks_exact(2)
                .map(|xy| Point::new(xy[0], xy[1]))
                .collect();
            Ok((points, false))
        } else {
            Err(MapperError::Shape {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

/// Candidate points returned by a query, with the data-space region consulted.
///
/// `points` is a conservative superset: it contains every point that
/// satisfies the query's geometric predicate, and may contain more from the
/// same grid cells. Callers filter exactly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult {
    /// Candidate points.
    pub points: Vec<Point>,
    /// Disjoint rectangles covering every cell the query touched.
    pub region: Vec<Rect>,
}

impl QueryResult {
    /// An empty result with no region.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of candidate points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no candidates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn extents_include_margin() {
        let pts = [Point::new(1.0, 2.0), Point::new(3.0, -1.0)];
        let e = Extents::from_points(&pts, 0.1);
        assert!((e.origin.x - 0.9).abs() < 1e-12);
        assert!((e.origin.y - -1.1).abs() < 1e-12);
        assert!((e.size.width - 2.2).abs() < 1e-12);
        assert!((e.size.height - 3.2).abs() < 1e-12);
        assert!(pts.iter().all(|&p| e.contains(p)));
    }

    #[test]
    fn empty_extents_are_zero() {
        assert_eq!(Extents::from_points(&[], 0.1), Extents::ZERO);
        assert!(Extents::ZERO.is_empty());
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        assert_eq!(
            PointArray::new(3, 2, vec![0.0; 5]),
            Err(MapperError::Shape { rows: 3, cols: 2 })
        );
        assert!(PointArray::from_columns(&[0.0, 1.0], &[0.0]).is_err());
    }

    #[test]
    fn orientation_detection() {
        let rows = PointArray::new(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let (pts, transposed) = rows.to_points().unwrap();
        assert!(!transposed);
        assert_eq!(pts[1], Point::new(2.0, 3.0));

        let cols = rows.transpose();
        assert_eq!(cols.shape(), (2, 3));
        let (pts2, transposed) = cols.to_points().unwrap();
        assert!(transposed);
        assert_eq!(pts, pts2);

        let bad = PointArray::new(3, 3, vec![0.0; 9]).unwrap();
        assert_eq!(
            bad.to_points(),
            Err(MapperError::Shape { rows: 3, cols: 3 })
        );
    }

    #[test]
    fn transpose_round_trips() {
        let a = PointArray::from_columns(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert_eq!(a.get(1, 2), Some(6.0));
        assert_eq!(a.transpose().get(2, 1), Some(6.0));
        assert_eq!(a.transpose().transpose(), a);
    }
}
