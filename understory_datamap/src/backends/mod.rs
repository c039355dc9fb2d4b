// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapper implementations.

mod brute_force;
mod subdivision;

pub use brute_force::BruteForceMapper;
pub use subdivision::{SubdivisionDataMapper, SubdivisionLineDataMapper, SubdivisionMapper};
