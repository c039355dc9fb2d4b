// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Datamap: spatial subdivision index for 2D point data.
//!
//! Plot interaction needs to answer "which data points are near this cursor,
//! inside this box, or along this line" quickly, even for large data sets.
//! This crate builds a uniform grid over the data extents and hands back
//! conservative candidate sets; the caller does the exact geometric test on
//! the (small) candidate set.
//!
//! - [`DataMapper`]: the shared query contract. Object safe, so mappers can be
//!   chosen at runtime.
//! - [`BruteForceMapper`]: returns everything. Reference and fallback.
//! - [`SubdivisionDataMapper`]: uniform grid with explicit per-cell indices.
//! - [`SubdivisionLineDataMapper`]: uniform grid with per-cell index ranges,
//!   compact for sorted line or path data.
//! - [`find_runs`] / [`arg_find_runs`]: run-length helpers used to build the
//!   grid, exposed for reuse.
//!
//! ## Quick Start
//!
//! ```rust
//! use kurbo::Point;
//! use understory_datamap::{
//!     DataMapper, DataSorting, MapperConfig, PointArray, SubdivisionLineDataMapper,
//! };
//!
//! // A sampled curve, already sorted by x.
//! let curve: Vec<Point> = (0..5000)
//!     .map(|i| Point::new(f64::from(i) * 0.01, f64::from(i % 100)))
//!     .collect();
//!
//! let mut mapper = SubdivisionLineDataMapper::from_data(
//!     &PointArray::from_points(&curve),
//!     DataSorting::Ascending,
//!     MapperConfig::default().with_points_per_cell(50),
//! )
//! .unwrap();
//!
//! let cursor = Point::new(12.0, 40.0);
//! let near = mapper.points_near(&[cursor], 0.5);
//! let exact: Vec<Point> = near
//!     .points
//!     .iter()
//!     .copied()
//!     .filter(|p| p.distance(cursor) <= 0.5)
//!     .collect();
//! assert!(!exact.is_empty());
//! assert!(near.len() < curve.len());
//!
//! // The grid cells consulted, for debug overlays.
//! assert!(!mapper.last_region().is_empty());
//! ```
//!
//! ## Sort order
//!
//! Points are kept sorted along [`MapperConfig::sort_axis`]. Flipping the order
//! with [`DataMapper::set_sort_order`] reverses the data and renumbers the grid
//! cells in place, without a rebuild.
//!
//! ## Logging
//!
//! Grid rebuilds, clears, and order flips are reported through [`tracing`] at
//! `debug` level; individual queries at `trace` level.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Disable default features and
//! enable `libm` to build without `std`.

#![no_std]

extern crate alloc;

mod backends;
mod cells;
mod config;
mod error;
mod mapper;
mod point_set;
pub mod runs;
mod types;

pub use backends::{
    BruteForceMapper, SubdivisionDataMapper, SubdivisionLineDataMapper, SubdivisionMapper,
};
pub use cells::{CellStorage, IndexCell, RangedCell};
pub use config::{DEFAULT_EXTENTS_DELTA, DEFAULT_POINTS_PER_CELL, MapperConfig};
pub use error::MapperError;
pub use mapper::DataMapper;
pub use point_set::PointSet;
pub use runs::{RunOrder, RunValue, arg_find_runs, find_runs};
pub use types::{Axis, DataSorting, Extents, PointArray, QueryResult, SortOrder};
