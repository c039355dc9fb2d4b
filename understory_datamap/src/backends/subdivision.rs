// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid mapper.
//!
//! The data extents are split into `columns × rows` equally sized cells, sized
//! so that each cell holds roughly [`MapperConfig::points_per_cell`] points.
//! Every point is stored in exactly one cell. Queries locate the covered cells
//! with binary searches over the cell edges and return the union of their
//! points.
//!
//! The cell storage is pluggable through [`CellStorage`]:
//! [`SubdivisionDataMapper`] stores explicit indices and makes no assumption
//! about the data, while [`SubdivisionLineDataMapper`] stores index ranges and
//! is much more compact for sorted line or path data.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::RangeInclusive;

use hashbrown::HashSet;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt` and `floor`
use kurbo::{Point, Rect, Size};

use crate::cells::{CellStorage, IndexCell, RangedCell};
use crate::config::MapperConfig;
use crate::error::MapperError;
use crate::mapper::{
    DataMapper, POLYGON_MIN_VERTICES, POLYLINE_MIN_VERTICES, bounding_rect, check_vertices,
};
use crate::point_set::PointSet;
use crate::runs::{RunOrder, arg_find_runs, array_zip, find_runs};
use crate::types::{DataSorting, PointArray, QueryResult, SortOrder};

/// Grid mapper storing explicit point indices per cell.
pub type SubdivisionDataMapper = SubdivisionMapper<IndexCell>;

/// Grid mapper storing index ranges per cell, for sorted line-like data.
pub type SubdivisionLineDataMapper = SubdivisionMapper<RangedCell>;

type CellCoord = (usize, usize);

/// Uniform grid mapper over a pluggable cell storage `C`.
///
/// Cells are addressed by `(column, row)`, with column 0 at the left edge of
/// the extents and row 0 at the bottom. The grid is rebuilt from scratch
/// whenever the data is replaced; a sort order flip renumbers the cells in
/// place instead.
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use understory_datamap::{
///     DataMapper, DataSorting, MapperConfig, PointArray, SubdivisionDataMapper,
/// };
///
/// let pts: Vec<Point> = (0..1000)
///     .map(|i| Point::new(f64::from(i % 40), f64::from(i / 40)))
///     .collect();
/// let mut grid = SubdivisionDataMapper::from_data(
///     &PointArray::from_points(&pts),
///     DataSorting::None,
///     MapperConfig::default(),
/// )
/// .unwrap();
///
/// let query = Rect::new(10.0, 10.0, 12.0, 12.0);
/// let hits = grid.points_in_rect(query);
/// // A superset: exact filtering is up to the caller.
/// let exact: Vec<Point> = hits.points.into_iter().filter(|p| query.contains(*p)).collect();
/// assert_eq!(exact.len(), 4);
/// assert!(hits.region[0].contains(Point::new(11.0, 11.0)));
/// ```
pub struct SubdivisionMapper<C: CellStorage> {
    data: PointSet,
    points_per_cell: usize,
    // Column-major: cell (i, j) lives at `i * rows + j`.
    cells: Vec<C>,
    columns: usize,
    rows: usize,
    cell_lefts: Vec<f64>,
    cell_bottoms: Vec<f64>,
    cell_size: Size,
    last_region: Vec<Rect>,
}

impl<C: CellStorage> SubdivisionMapper<C> {
    /// Creates an empty mapper.
    #[must_use]
    pub fn new(config: MapperConfig) -> Self {
        Self {
            data: PointSet::new(&config),
            points_per_cell: config.points_per_cell.max(1),
            cells: Vec::new(),
            columns: 0,
            rows: 0,
            cell_lefts: Vec::new(),
            cell_bottoms: Vec::new(),
            cell_size: Size::ZERO,
            last_region: Vec::new(),
        }
    }

    /// Creates a mapper holding `data`.
    pub fn from_data(
        data: &PointArray,
        sorting: DataSorting,
        config: MapperConfig,
    ) -> Result<Self, MapperError> {
        let mut mapper = Self::new(config);
        mapper.set_data(data, sorting)?;
        Ok(mapper)
    }

    /// Target number of points per cell.
    #[must_use]
    pub fn points_per_cell(&self) -> usize {
        self.points_per_cell
    }

    /// `(columns, rows)` of the grid; `(0, 0)` when empty.
    #[must_use]
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// The cell at `(column, row)`.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<&C> {
        if column < self.columns && row < self.rows {
            self.cells.get(self.slot(column, row))
        } else {
            None
        }
    }

    /// All cells, column-major.
    #[must_use]
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// Width and height of one cell.
    #[must_use]
    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Left edge of each column.
    #[must_use]
    pub fn cell_lefts(&self) -> &[f64] {
        &self.cell_lefts
    }

    /// Bottom edge of each row.
    #[must_use]
    pub fn cell_bottoms(&self) -> &[f64] {
        &self.cell_bottoms
    }

    /// Data-space rectangle of the cell at `(column, row)`.
    #[must_use]
    pub fn cell_rect(&self, column: usize, row: usize) -> Option<Rect> {
        let x = *self.cell_lefts.get(column)?;
        let y = *self.cell_bottoms.get(row)?;
        Some(Rect::from_origin_size((x, y), self.cell_size))
    }

    #[inline]
    fn slot(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }

    fn update_datamap(&mut self) {
        self.last_region.clear();
        if self.data.is_empty() {
            self.clear_grid();
            return;
        }
        let extents = self.data.extents();
        let (columns, rows) =
            grid_dimensions(self.data.len(), self.points_per_cell, extents.size);
        let cell_size = Size::new(
            extents.size.width / columns as f64,
            extents.size.height / rows as f64,
        );

        self.columns = columns;
        self.rows = rows;
        self.cell_size = cell_size;
        self.cell_lefts = (0..columns)
            .map(|i| extents.origin.x + i as f64 * cell_size.width)
            .collect();
        self.cell_bottoms = (0..rows)
            .map(|j| extents.origin.y + j as f64 * cell_size.height)
            .collect();
        self.cells = (0..columns * rows).map(|_| C::default()).collect();
        self.basic_insertion();

        tracing::debug!(
            points = self.data.len(),
            columns,
            rows,
            cell_width = cell_size.width,
            cell_height = cell_size.height,
            "rebuilt subdivision grid"
        );
    }

    fn clear_grid(&mut self) {
        self.cells = Vec::new();
        self.columns = 0;
        self.rows = 0;
        self.cell_lefts = Vec::new();
        self.cell_bottoms = Vec::new();
        self.cell_size = Size::ZERO;
        self.last_region.clear();
    }

    /// Inserts every point, one range per run of index-adjacent points that
    /// share a cell. Sorted data keeps these runs long.
    fn basic_insertion(&mut self) {
        let points = self.data.points();
        let columns: Vec<usize> = points.iter().map(|p| self.column_of(p.x)).collect();
        let rows: Vec<usize> = points.iter().map(|p| self.row_of(p.y)).collect();
        let slots: Vec<usize> = array_zip(&columns, &rows)
            .into_iter()
            .map(|(i, j)| self.slot(i, j))
            .collect();

        for run in arg_find_runs(&slots, RunOrder::Flat) {
            let slot = slots[run.start];
            self.cells[slot].add_range(run);
        }
    }

    #[inline]
    fn column_of(&self, x: f64) -> usize {
        edge_index(&self.cell_lefts, x)
    }

    #[inline]
    fn row_of(&self, y: f64) -> usize {
        edge_index(&self.cell_bottoms, y)
    }

    /// Inclusive column and row spans of the cells `rect` overlaps, or `None`
    /// if it misses the extents entirely.
    fn covered_span(&self, rect: Rect) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        if self.cells.is_empty() {
            return None;
        }
        let rect = rect.abs();
        let bounds = self.data.extents().rect();
        let overlaps = rect.x0 <= bounds.x1
            && rect.x1 >= bounds.x0
            && rect.y0 <= bounds.y1
            && rect.y1 >= bounds.y0;
        if !overlaps {
            return None;
        }
        Some((
            self.column_of(rect.x0)..=self.column_of(rect.x1),
            self.row_of(rect.y0)..=self.row_of(rect.y1),
        ))
    }

    fn gather(&self, cells: &[CellCoord]) -> Vec<Point> {
        let data = self.data.points();
        let mut out = Vec::new();
        for &(i, j) in cells {
            self.cells[self.slot(i, j)].extend_points(data, &mut out);
        }
        out
    }

    /// Converts distinct cell coordinates into disjoint rectangles, merging
    /// horizontal runs within each row.
    fn cells_to_rects(&self, cells: &[CellCoord]) -> Vec<Rect> {
        let mut by_row: Vec<(usize, usize)> = cells.iter().map(|&(i, j)| (j, i)).collect();
        by_row.sort_unstable();
        let rows: Vec<usize> = by_row.iter().map(|&(j, _)| j).collect();
        let columns: Vec<usize> = by_row.iter().map(|&(_, i)| i).collect();

        let mut rects = Vec::new();
        for row_run in arg_find_runs(&rows, RunOrder::Flat) {
            let y = self.cell_bottoms[rows[row_run.start]];
            for span in find_runs(&columns[row_run], RunOrder::Ascending) {
                let x = self.cell_lefts[span[0]];
                let width = span.len() as f64 * self.cell_size.width;
                rects.push(Rect::from_origin_size(
                    (x, y),
                    (width, self.cell_size.height),
                ));
            }
        }
        rects
    }

    fn finish(&mut self, touched: HashSet<CellCoord>, kind: &'static str) -> QueryResult {
        let mut cells: Vec<CellCoord> = touched.into_iter().collect();
        cells.sort_unstable();
        let points = self.gather(&cells);
        self.last_region = self.cells_to_rects(&cells);
        tracing::trace!(
            kind,
            cells = cells.len(),
            candidates = points.len(),
            "subdivision query"
        );
        QueryResult {
            points,
            region: self.last_region.clone(),
        }
    }

    fn touch_rect(&self, rect: Rect, touched: &mut HashSet<CellCoord>) {
        if let Some((columns, rows)) = self.covered_span(rect) {
            for i in columns {
                for j in rows.clone() {
                    touched.insert((i, j));
                }
            }
        }
    }
}

impl<C: CellStorage> Default for SubdivisionMapper<C> {
    fn default() -> Self {
        Self::new(MapperConfig::default())
    }
}

impl<C: CellStorage> Debug for SubdivisionMapper<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.cells.iter().filter(|c| !c.is_empty()).count();
        f.debug_struct("SubdivisionMapper")
            .field("points", &self.data.len())
            .field("points_per_cell", &self.points_per_cell)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("occupied_cells", &occupied)
            .field("cell_size", &self.cell_size)
            .field("sort_order", &self.data.sort_order())
            .finish_non_exhaustive()
    }
}

impl<C: CellStorage> DataMapper for SubdivisionMapper<C> {
    fn set_data(&mut self, data: &PointArray, sorting: DataSorting) -> Result<(), MapperError> {
        self.data.assign(data, sorting)?;
        self.update_datamap();
        Ok(())
    }

    fn point_set(&self) -> &PointSet {
        &self.data
    }

    fn set_sort_order(&mut self, order: SortOrder) {
        // Cell membership is unchanged by a global reversal; only the index
        // numbering inside each cell flips.
        if self.data.reverse_to(order) {
            let len = self.data.len();
            for cell in &mut self.cells {
                cell.reverse_indices(len);
            }
            tracing::debug!(?order, points = len, "reversed subdivision grid");
        }
    }

    fn clear(&mut self) {
        self.data.clear();
        self.clear_grid();
        tracing::debug!("cleared subdivision grid");
    }

    fn points_near(&mut self, points: &[Point], radius: f64) -> QueryResult {
        let mut touched = HashSet::new();
        if radius == 0.0 {
            let extents = self.data.extents();
            if !self.cells.is_empty() {
                for &p in points.iter().filter(|&&p| extents.contains(p)) {
                    touched.insert((self.column_of(p.x), self.row_of(p.y)));
                }
            }
        } else {
            let r = radius.abs();
            for p in points {
                self.touch_rect(Rect::new(p.x - r, p.y - r, p.x + r, p.y + r), &mut touched);
            }
        }
        self.finish(touched, "near")
    }

    fn points_in_rect(&mut self, rect: Rect) -> QueryResult {
        let Some((columns, rows)) = self.covered_span(rect) else {
            self.last_region.clear();
            tracing::trace!(kind = "rect", "query misses the grid");
            return QueryResult::empty();
        };
        let data = self.data.points();
        let mut points = Vec::new();
        for i in columns.clone() {
            for j in rows.clone() {
                self.cells[self.slot(i, j)].extend_points(data, &mut points);
            }
        }
        let (min_i, max_i) = (*columns.start(), *columns.end());
        let (min_j, max_j) = (*rows.start(), *rows.end());
        let region = Rect::from_origin_size(
            (self.cell_lefts[min_i], self.cell_bottoms[min_j]),
            (
                (max_i - min_i + 1) as f64 * self.cell_size.width,
                (max_j - min_j + 1) as f64 * self.cell_size.height,
            ),
        );
        self.last_region = vec![region];
        tracing::trace!(
            kind = "rect",
            cells = (max_i - min_i + 1) * (max_j - min_j + 1),
            candidates = points.len(),
            "subdivision query"
        );
        QueryResult {
            points,
            region: self.last_region.clone(),
        }
    }

    fn points_near_polyline(&mut self, line: &[Point]) -> Result<QueryResult, MapperError> {
        check_vertices(line, POLYLINE_MIN_VERTICES)?;
        let mut touched = HashSet::new();
        for segment in line.windows(2) {
            self.touch_rect(Rect::from_points(segment[0], segment[1]), &mut touched);
        }
        Ok(self.finish(touched, "polyline"))
    }

    fn points_in_poly(&mut self, poly: &[Point]) -> Result<QueryResult, MapperError> {
        check_vertices(poly, POLYGON_MIN_VERTICES)?;
        Ok(self.points_in_rect(bounding_rect(poly)))
    }

    fn last_region(&self) -> &[Rect] {
        &self.last_region
    }
}

/// `searchsorted(edges, v) - 1`, clamped into `0..edges.len()`.
///
/// A value exactly on an interior edge belongs to the cell on its left (or
/// below).
#[inline]
fn edge_index(edges: &[f64], v: f64) -> usize {
    let last = edges.len().saturating_sub(1);
    edges
        .partition_point(|&e| e < v)
        .saturating_sub(1)
        .min(last)
}

/// Upper bound on the row count, reached only by near-zero aspect ratios.
const MAX_GRID_ROWS: usize = 1 << 20;

/// Chooses `(columns, rows)` so cells hold about `points_per_cell` points and
/// roughly follow the aspect ratio of `size`.
///
/// `rows = floor(sqrt(cells / aspect))` and `columns = floor(aspect * rows)`,
/// then `rows` is raised to at least 1 and one column is added if the grid
/// would be under-provisioned.
fn grid_dimensions(num_points: usize, points_per_cell: usize, size: Size) -> (usize, usize) {
    let num_cells = num_points / points_per_cell;
    let aspect = size.width / size.height;
    if !(aspect.is_finite() && aspect > 0.0) {
        // Zero-width or zero-height extents: lay the cells along the long side.
        let n = num_cells.max(1);
        return if size.width >= size.height {
            (n, 1)
        } else {
            (1, n)
        };
    }
    let mut rows = floor_to_count((num_cells as f64 / aspect).sqrt()).min(MAX_GRID_ROWS);
    let mut columns = floor_to_count(aspect * rows as f64);
    if rows == 0 {
        rows = 1;
    }
    if columns.saturating_mul(rows).saturating_mul(points_per_cell) < num_points {
        columns += 1;
    }
    (columns, rows)
}

#[inline]
fn floor_to_count(v: f64) -> usize {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "grid counts are small, non-negative, and saturate on overflow"
    )]
    let n = v.floor() as usize;
    n
}
