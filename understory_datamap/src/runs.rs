// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run detection over sorted integer sequences, plus small array helpers.
//!
//! [`arg_find_runs`] splits a sequence that is sorted ascending, descending,
//! or flat into maximal runs whose consecutive elements differ by exactly
//! `+1`, `-1`, or `0`:
//!
//! ```rust
//! use understory_datamap::runs::{RunOrder, arg_find_runs, find_runs};
//!
//! let values = [1, 2, 3, 6, 7, 8, 9, 10, 11, 15];
//! assert_eq!(
//!     arg_find_runs(&values, RunOrder::Ascending),
//!     [0..3, 3..9, 9..10],
//! );
//!
//! let flat = [0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0];
//! let runs = find_runs(&flat, RunOrder::Flat);
//! assert_eq!(runs, [&[0, 0, 0][..], &[1, 1, 1, 1], &[0, 0, 0, 0]]);
//! ```
//!
//! Run boundaries are found with one shifted comparison pass, O(n) in time
//! and auxiliary space.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::Point;

use crate::types::{Axis, SortOrder};

/// Expected step between consecutive elements of a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunOrder {
    /// Each element is one more than the previous.
    #[default]
    Ascending,
    /// Each element is one less than the previous.
    Descending,
    /// Each element equals the previous.
    Flat,
}

impl RunOrder {
    #[inline]
    const fn increment(self) -> i128 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
            Self::Flat => 0,
        }
    }
}

impl From<SortOrder> for RunOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => Self::Ascending,
            SortOrder::Descending => Self::Descending,
        }
    }
}

/// Integer types [`arg_find_runs`] can operate on.
pub trait RunValue: Copy {
    /// Widens the value so differences never overflow.
    fn widen(self) -> i128;
}

macro_rules! impl_run_value {
    ($($t:ty),*) => {
        $(
            impl RunValue for $t {
                #[inline]
                fn widen(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_run_value!(i32, i64, isize, u32, u64, usize);

/// Returns the half-open index ranges of the maximal runs in `values`.
///
/// Within each returned range, consecutive elements differ by the step
/// `order` calls for. Empty input yields no runs; otherwise the ranges are
/// contiguous and cover `0..values.len()`.
#[must_use]
pub fn arg_find_runs<T: RunValue>(values: &[T], order: RunOrder) -> Vec<Range<usize>> {
    let Some(first) = values.first() else {
        return Vec::new();
    };
    let increment = order.increment();
    let wide: Vec<i128> = values.iter().map(|v| v.widen()).collect();
    let shifted = right_shift(&wide, first.widen() - increment);

    let mut starts = Vec::new();
    starts.push(0);
    starts.extend(
        wide.iter()
            .zip(&shifted)
            .enumerate()
            .filter(|(_, (v, s))| **v != **s + increment)
            .map(|(i, _)| i),
    );
    let ends = left_shift(&starts, values.len());
    starts.into_iter().zip(ends).map(|(s, e)| s..e).collect()
}

/// Like [`arg_find_runs`], but returns the runs as sub-slices of `values`.
#[must_use]
pub fn find_runs<T: RunValue>(values: &[T], order: RunOrder) -> Vec<&[T]> {
    arg_find_runs(values, order)
        .into_iter()
        .map(|r| &values[r])
        .collect()
}

/// Returns `values` shifted one place right, with `fill` inserted on the left.
///
/// The result has the same length as `values`.
#[must_use]
pub fn right_shift<T: Copy>(values: &[T], fill: T) -> Vec<T> {
    let Some((_, init)) = values.split_last() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(values.len());
    out.push(fill);
    out.extend_from_slice(init);
    out
}

/// Returns `values` shifted one place left, with `fill` inserted on the right.
///
/// The result has the same length as `values`.
#[must_use]
pub fn left_shift<T: Copy>(values: &[T], fill: T) -> Vec<T> {
    let Some((_, tail)) = values.split_first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(values.len());
    out.extend_from_slice(tail);
    out.push(fill);
    out
}

/// Pairs up two columns element-wise.
///
/// Both columns are expected to have the same length; extra elements of the
/// longer one are dropped.
#[must_use]
pub fn array_zip<A: Copy, B: Copy>(a: &[A], b: &[B]) -> Vec<(A, B)> {
    debug_assert_eq!(a.len(), b.len(), "array_zip columns differ in length");
    a.iter().copied().zip(b.iter().copied()).collect()
}

/// Stable-sorts points ascending by one coordinate.
///
/// Uses IEEE total ordering, so NaN coordinates sort after every number.
pub fn sort_points(points: &mut [Point], axis: Axis) {
    points.sort_by(|a, b| axis.coord(*a).total_cmp(&axis.coord(*b)));
}
