// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Predicates and helpers over raw point sets.
//!
//! Points are plain `nalgebra::Point3<f64>` values with no identity beyond
//! their coordinates; equality is tolerance-based.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::tolerance::ATOL;
use crate::vector::first_nondegenerate_normal;

/// Returns `true` if two points are equal component-wise within [`ATOL`](crate::tolerance::ATOL).
#[inline]
pub fn points_equal(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    (a.x - b.x).abs() < ATOL && (a.y - b.y).abs() < ATOL && (a.z - b.z).abs() < ATOL
}

/// Tests whether all points lie on a single line.
///
/// Unit vectors from the first point to every other point must be pairwise
/// parallel or anti-parallel. Needs at least 3 points.
pub fn are_points_collinear(points: &[Point3<f64>]) -> Result<bool> {
    if points.len() < 3 {
        return Err(Error::TooFewPoints(points.len()));
    }

    let mut directions: Vec<Vector3<f64>> = Vec::with_capacity(points.len() - 1);
    for p in &points[1..] {
        let v = p - points[0];
        let len = v.norm();
        if len < ATOL {
            continue; // coincident with the reference point
        }
        directions.push(v / len);
    }

    // All coincident points degenerate to a single location, which is
    // trivially collinear.
    let Some(first) = directions.first() else {
        return Ok(true);
    };

    Ok(directions
        .iter()
        .all(|d| d.cross(first).norm() < ATOL))
}

/// Tests whether all points lie on a single plane.
///
/// Up to 3 points are trivially coplanar, as is any collinear set. Otherwise
/// a plane is built from the first non-degenerate consecutive triple and every
/// point must satisfy its equation within tolerance.
pub fn are_points_coplanar(points: &[Point3<f64>]) -> Result<bool> {
    if points.len() <= 3 {
        return Ok(true);
    }
    if are_points_collinear(points)? {
        return Ok(true);
    }

    // Non-collinear sets always contain a non-degenerate triple; failure here
    // is an internal invariant violation, not bad input.
    let (normal, anchor) =
        first_nondegenerate_normal(points).ok_or(Error::NoNondegenerateTriple)?;
    let d = -normal.dot(&points[anchor].coords);

    Ok(points
        .iter()
        .all(|p| (normal.dot(&p.coords) + d).abs() < ATOL))
}

/// Axis-aligned bounding box of a point set as `(min, max)`.
pub fn bounding_box(points: &[Point3<f64>]) -> (Point3<f64>, Point3<f64>) {
    let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
    let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    (min, max)
}

/// Distance from a point to the segment `a`-`b`.
///
/// The projection parameter is clamped to the segment, so points past either
/// endpoint measure to the nearest endpoint.
pub fn distance_point_to_edge(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 < ATOL * ATOL {
        return (p - a).norm(); // degenerate segment
    }

    let t = (p - a).dot(&ab) / len2;
    if t <= 0.0 {
        (p - a).norm()
    } else if t >= 1.0 {
        (p - b).norm()
    } else {
        (p - (a + ab * t)).norm()
    }
}

/// Returns `true` if `p` lies on the segment `a`-`b` within tolerance.
#[inline]
pub fn is_point_on_segment(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> bool {
    distance_point_to_edge(p, a, b) < ATOL
}

/// Rotates a point loop left by `k` positions, keeping the same winding.
pub fn roll_points(points: &[Point3<f64>], k: usize) -> Vec<Point3<f64>> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }
    let k = k % n;
    points[k..].iter().chain(points[..k].iter()).copied().collect()
}
