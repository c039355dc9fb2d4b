// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brute-force mapper: every query returns every point. Baseline and fallback.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::config::MapperConfig;
use crate::error::MapperError;
use crate::mapper::{
    DataMapper, POLYGON_MIN_VERTICES, POLYLINE_MIN_VERTICES, check_vertices,
};
use crate::point_set::PointSet;
use crate::types::{DataSorting, PointArray, QueryResult, SortOrder};

/// Mapper that returns the whole point set for every query.
///
/// This is the same as having no spatial index at all. It is useful as a
/// reference when checking other mappers, and when data sets are small enough
/// that indexing does not pay off. The reported region is always the full
/// extents.
pub struct BruteForceMapper {
    data: PointSet,
    last_region: Vec<Rect>,
}

impl BruteForceMapper {
    /// Creates an empty mapper.
    #[must_use]
    pub fn new(config: MapperConfig) -> Self {
        Self {
            data: PointSet::new(&config),
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

    fn everything(&mut self) -> QueryResult {
        self.last_region = if self.data.is_empty() {
            Vec::new()
        } else {
            vec![self.data.extents().rect()]
        };
        QueryResult {
            points: self.data.points().to_vec(),
            region: self.last_region.clone(),
        }
    }
}

impl Default for BruteForceMapper {
    fn default() -> Self {
        Self::new(MapperConfig::default())
    }
}

impl Debug for BruteForceMapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BruteForceMapper")
            .field("points", &self.data.len())
            .field("extents", &self.data.extents())
            .field("sort_order", &self.data.sort_order())
            .finish_non_exhaustive()
    }
}

impl DataMapper for BruteForceMapper {
    fn set_data(&mut self, data: &PointArray, sorting: DataSorting) -> Result<(), MapperError> {
        self.data.assign(data, sorting)?;
        self.last_region.clear();
        Ok(())
    }

    fn point_set(&self) -> &PointSet {
        &self.data
    }

    fn set_sort_order(&mut self, order: SortOrder) {
        if order != self.data.sort_order() {
            self.data.resort_to(order);
        }
    }

    fn clear(&mut self) {
        self.data.clear();
        self.last_region.clear();
    }

    fn points_near(&mut self, _points: &[Point], _radius: f64) -> QueryResult {
        self.everything()
    }

    fn points_in_rect(&mut self, _rect: Rect) -> QueryResult {
        self.everything()
    }

    fn points_near_polyline(&mut self, line: &[Point]) -> Result<QueryResult, MapperError> {
        check_vertices(line, POLYLINE_MIN_VERTICES)?;
        Ok(self.everything())
    }

    fn points_in_poly(&mut self, poly: &[Point]) -> Result<QueryResult, MapperError> {
        check_vertices(poly, POLYGON_MIN_VERTICES)?;
        Ok(self.everything())
    }

    fn last_region(&self) -> &[Rect] {
        &self.last_region
    }
}
