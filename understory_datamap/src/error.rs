// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by data mappers and cell storage.

use core::fmt;

/// Error returned by data mapper and cell operations.
///
/// All variants describe integration errors (bad input shape, calling a
/// capability the chosen variant does not provide). None of them are
/// transient; retrying the same call fails the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapperError {
    /// A point array was neither `N×2` nor `2×N`, or its value buffer did not
    /// match the declared shape.
    Shape {
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
    },
    /// A polyline or polygon query had too few vertices to describe its geometry.
    TooFewVertices {
        /// Minimum vertex count for the query kind.
        required: usize,
        /// Vertex count supplied by the caller.
        actual: usize,
    },
    /// The operation is not provided by this mapper or cell variant.
    Unsupported {
        /// Name of the operation that was requested.
        operation: &'static str,
    },
}

impl fmt::Display for MapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { rows, cols } => write!(
                f,
                "point array of shape {rows}x{cols} is neither Nx2 nor 2xN"
            ),
            Self::TooFewVertices { required, actual } => write!(
                f,
                "query geometry needs at least {required} vertices, got {actual}"
            ),
            Self::Unsupported { operation } => {
                write!(f, "operation `{operation}` is not supported by this variant")
            }
        }
    }
}

impl core::error::Error for MapperError {}
