// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle primitives: area, centroid, containment, corner convexity.

use nalgebra::{Point3, Vector3};

use crate::tolerance::ATOL;

/// Area of the triangle `(p0, p1, p2)`.
#[inline]
pub fn triangle_area(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p1 - p0).cross(&(p2 - p0)).norm() * 0.5
}

/// Centroid (vertex mean) of the triangle `(p0, p1, p2)`.
#[inline]
pub fn triangle_centroid(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Point3<f64> {
    Point3::from((p0.coords + p1.coords + p2.coords) / 3.0)
}

/// Barycentric point-in-triangle test, boundary inclusive.
///
/// The point must lie on the triangle's plane within tolerance; edges and
/// vertices count as inside.
pub fn is_point_inside_triangle(
    pt: &Point3<f64>,
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
) -> bool {
    let v0 = p1 - p0;
    let v1 = p2 - p0;
    let v2 = pt - p0;

    // Off-plane points are never inside.
    let plane_normal = v0.cross(&v1);
    let area2 = plane_normal.norm();
    if area2 < ATOL {
        return false; // degenerate triangle
    }
    if v2.dot(&plane_normal).abs() / area2 > ATOL {
        return false;
    }

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    u >= -ATOL && v >= -ATOL && w >= -ATOL
}

/// Tests whether the corner `prev → cur → next` is convex with respect to the
/// polygon normal (right-hand rule). Collinear corners are not convex.
#[inline]
pub fn is_corner_convex(
    prev: &Point3<f64>,
    cur: &Point3<f64>,
    next: &Point3<f64>,
    normal: &Vector3<f64>,
) -> bool {
    (cur - prev).cross(&(next - cur)).dot(normal) > ATOL
}
