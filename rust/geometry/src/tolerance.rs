// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide numerical tolerances.
//!
//! Every tolerance-sensitive predicate in this crate reads these constants
//! instead of taking a per-call epsilon. They are read-only at runtime; any
//! tuning must happen before geometry objects are constructed.

/// Absolute tolerance for point equality, plane membership and barycentric
/// containment checks.
pub const ATOL: f64 = 1e-6;

/// Relative tolerance for comparing unit normals and areas.
pub const RTOL: f64 = 1e-4;

/// Returns `true` if two scalars are equal within [`ATOL`].
#[inline]
pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < ATOL
}
