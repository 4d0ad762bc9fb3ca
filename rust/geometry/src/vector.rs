// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normal vectors and direction predicates.
//!
//! Degenerate geometry (collinear triples, zero-length crosses) is reported
//! through a NaN-filled sentinel vector instead of an error, because it arises
//! routinely during triangulation and must not abort otherwise-valid
//! operations.

use nalgebra::{Point3, Vector3};

use crate::tolerance::{ATOL, RTOL};

/// Unit normal of the triangle `(p0, p1, p2)` via the right-hand rule.
///
/// Returns the NaN sentinel (see [`is_undefined`]) when the points are
/// collinear within tolerance.
pub fn normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    let n = (p1 - p0).cross(&(p2 - p0));
    let len = n.norm();
    if len < ATOL {
        undefined()
    } else {
        n / len
    }
}

/// The NaN-filled sentinel for an undefined direction.
#[inline]
pub fn undefined() -> Vector3<f64> {
    Vector3::new(f64::NAN, f64::NAN, f64::NAN)
}

/// Returns `true` if `v` is the NaN sentinel produced by degenerate input.
#[inline]
pub fn is_undefined(v: &Vector3<f64>) -> bool {
    v.x.is_nan() || v.y.is_nan() || v.z.is_nan()
}

/// Returns `true` if two unit vectors point the same way within [`RTOL`](crate::tolerance::RTOL).
#[inline]
pub fn are_vectors_parallel(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    (a - b).norm() < RTOL
}

/// Returns `true` if two unit vectors point opposite ways within [`RTOL`](crate::tolerance::RTOL).
#[inline]
pub fn are_vectors_antiparallel(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    (a + b).norm() < RTOL
}

/// Normal from the first non-degenerate consecutive triple of a point loop.
///
/// Triples wrap around the end of the loop. Returns the normal and the index
/// of the triple's first point (the plane anchor), or `None` if every triple
/// is collinear.
pub fn first_nondegenerate_normal(points: &[Point3<f64>]) -> Option<(Vector3<f64>, usize)> {
    let n = points.len();
    if n < 3 {
        return None;
    }

    for i in 0..n {
        let candidate = normal(&points[i], &points[(i + 1) % n], &points[(i + 2) % n]);
        if !is_undefined(&candidate) {
            return Some((candidate, i));
        }
    }
    None
}

/// Loop normal by Newell's method.
///
/// Robust for any planar polygon, convex or concave; the direction follows
/// the right-hand rule relative to the winding order. Returns the NaN
/// sentinel for degenerate loops.
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    if n < 3 {
        return undefined();
    }

    let mut normal = Vector3::<f64>::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }

    let len = normal.norm();
    if len < ATOL {
        undefined()
    } else {
        normal / len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_of_xy_triangle() {
        let n = normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normal_of_collinear_triple_is_undefined() {
        let n = normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
        );
        assert!(is_undefined(&n));
    }

    #[test]
    fn parallel_and_antiparallel() {
        let z = Vector3::new(0.0, 0.0, 1.0);
        let minus_z = Vector3::new(0.0, 0.0, -1.0);
        assert!(are_vectors_parallel(&z, &z));
        assert!(are_vectors_antiparallel(&z, &minus_z));
        assert!(!are_vectors_antiparallel(&z, &z));
        assert!(!are_vectors_parallel(&z, &Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn first_triple_skips_collinear_prefix() {
        // Points 0,1,2 are collinear; the normal must come from triple 1.
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let (n, anchor) = first_nondegenerate_normal(&pts).unwrap();
        assert_eq!(anchor, 1);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn newell_matches_winding() {
        let ccw = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let n = newell_normal(&ccw);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);

        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        let n = newell_normal(&cw);
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn newell_concave_loop() {
        // L-shape, counter-clockwise
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let n = newell_normal(&pts);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
    }
}
