// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data mapper contract shared by all backends.

use kurbo::{Point, Rect};

use crate::error::MapperError;
use crate::point_set::PointSet;
use crate::types::{DataSorting, Extents, PointArray, QueryResult, SortOrder};

/// Maps from data-space locations to the data points near them.
///
/// A mapper owns a [`PointSet`] and answers spatial queries over it. Query
/// results are conservative supersets: every point satisfying the query is
/// returned, possibly along with extra candidates, and callers do the exact
/// geometric filtering. Each query also reports the region of data space it
/// consulted; the most recent region stays available through
/// [`DataMapper::last_region`].
///
/// The trait is object safe, so mappers can be selected at runtime:
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use understory_datamap::{
///     BruteForceMapper, DataMapper, DataSorting, MapperConfig, PointArray,
///     SubdivisionDataMapper,
/// };
///
/// let data = PointArray::from_points(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
/// let mut mappers: Vec<Box<dyn DataMapper>> = vec![
///     Box::new(BruteForceMapper::new(MapperConfig::default())),
///     Box::new(SubdivisionDataMapper::new(MapperConfig::default())),
/// ];
/// for m in &mut mappers {
///     m.set_data(&data, DataSorting::None).unwrap();
///     let hits = m.points_in_rect(Rect::new(-1.0, -1.0, 1.0, 1.0));
///     assert!(hits.points.contains(&Point::new(0.0, 0.0)));
/// }
/// ```
pub trait DataMapper {
    /// Replaces the mapper's data and rebuilds its index.
    ///
    /// `data` may be `N×2` or `2×N`; `sorting` is the caller's claim about its
    /// order along the sort axis. An array with no rows clears the mapper. Shape
    /// errors are reported before any state changes.
    fn set_data(&mut self, data: &PointArray, sorting: DataSorting) -> Result<(), MapperError>;

    /// The point set the mapper is built over.
    fn point_set(&self) -> &PointSet;

    /// The data in the caller's original orientation.
    fn data(&self) -> PointArray {
        self.point_set().to_array()
    }

    /// The sorted points.
    fn points(&self) -> &[Point] {
        self.point_set().points()
    }

    /// Bounds of the data, widened by the configured margin.
    fn extents(&self) -> Extents {
        self.point_set().extents()
    }

    /// Order the data is kept in.
    fn sort_order(&self) -> SortOrder {
        self.point_set().sort_order()
    }

    /// Changes the order the data is kept in, reordering data and index.
    fn set_sort_order(&mut self, order: SortOrder);

    /// Drops all data and index state. Idempotent.
    fn clear(&mut self);

    /// Candidate points near any of `points`.
    ///
    /// With `radius == 0`, candidates are the points sharing an index cell
    /// with a query point. Otherwise each query point is expanded to a square
    /// of side `2 * |radius|`; exact distance filtering is up to the caller.
    fn points_near(&mut self, points: &[Point], radius: f64) -> QueryResult;

    /// Candidate points inside `rect`.
    fn points_in_rect(&mut self, rect: Rect) -> QueryResult;

    /// Candidate points on the polyline through `line`.
    ///
    /// Fails with [`MapperError::TooFewVertices`] for fewer than two vertices.
    /// The default is [`MapperError::Unsupported`].
    fn points_near_polyline(&mut self, line: &[Point]) -> Result<QueryResult, MapperError> {
        let _ = line;
        Err(MapperError::Unsupported {
            operation: "points_near_polyline",
        })
    }

    /// Candidate points inside the polygon with vertices `poly`.
    ///
    /// Fails with [`MapperError::TooFewVertices`] for fewer than three
    /// vertices. The default is [`MapperError::Unsupported`].
    fn points_in_poly(&mut self, poly: &[Point]) -> Result<QueryResult, MapperError> {
        let _ = poly;
        Err(MapperError::Unsupported {
            operation: "points_in_poly",
        })
    }

    /// Region consulted by the most recent query, as disjoint rectangles.
    fn last_region(&self) -> &[Rect];
}

pub(crate) const POLYLINE_MIN_VERTICES: usize = 2;
pub(crate) const POLYGON_MIN_VERTICES: usize = 3;

pub(crate) fn check_vertices(vertices: &[Point], required: usize) -> Result<(), MapperError> {
    if vertices.len() < required {
        return Err(MapperError::TooFewVertices {
            required,
            actual: vertices.len(),
        });
    }
    Ok(())
}

/// Smallest rectangle containing every vertex. `vertices` must be non-empty.
pub(crate) fn bounding_rect(vertices: &[Point]) -> Rect {
    let first = Rect::from_points(vertices[0], vertices[0]);
    vertices[1..]
        .iter()
        .fold(first, |r, &p| r.union_pt(p))
}
