// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ear-clipping triangulation of coplanar point loops.
//!
//! Works directly on 3D loops: convexity is judged against the supplied
//! polygon normal, so no 2D projection step is needed and emitted triangles
//! always wind consistently with that normal. Ear selection is deterministic
//! (lowest active vertex index among valid ears) so fixtures are reproducible.

use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::point::points_equal;
use crate::triangle::{is_corner_convex, is_point_inside_triangle};

/// Index ring of the vertices still part of the loop. Stays sorted in loop
/// order, which for an ordered input loop is ascending original index.
type ActiveRing = SmallVec<[usize; 16]>;

/// Triangulates an ordered, coplanar, simple point loop.
///
/// Returns index triples into `points`, each triangle wound consistently with
/// `normal`. Non-convex (L/U/C-shaped) loops are handled. Loops that collapse
/// to fewer than 3 effective points, or that are entirely collinear, yield
/// zero triangles rather than an error.
pub fn triangulate(points: &[Point3<f64>], normal: &Vector3<f64>) -> Result<Vec<[usize; 3]>> {
    let mut active: ActiveRing = SmallVec::new();

    // Drop consecutive coincident points (including the wrap-around pair).
    for (i, p) in points.iter().enumerate() {
        if let Some(&last) = active.last() {
            if points_equal(&points[last], p) {
                continue;
            }
        }
        active.push(i);
    }
    while active.len() > 1 {
        let (&first, &last) = (&active[0], &active[active.len() - 1]);
        if points_equal(&points[first], &points[last]) {
            active.pop();
        } else {
            break;
        }
    }

    if active.len() < 3 || is_ring_collinear(points, &active) {
        return Ok(Vec::new());
    }

    let mut triangles = Vec::with_capacity(active.len() - 2);

    while active.len() > 3 {
        let ear = find_ear(points, &active, normal).ok_or(Error::NoEarFound(active.len()))?;

        let len = active.len();
        let prev = active[(ear + len - 1) % len];
        let cur = active[ear];
        let next = active[(ear + 1) % len];
        triangles.push([prev, cur, next]);
        active.remove(ear);
    }

    // Final triangle, unless the remainder is collinear (zero area).
    let (a, b, c) = (active[0], active[1], active[2]);
    if is_corner_convex(&points[a], &points[b], &points[c], normal) {
        triangles.push([a, b, c]);
    } else if !is_ring_collinear(points, &active) {
        // A simple loop's last triangle can only oppose the normal if the
        // winding was inconsistent with it all along.
        return Err(Error::NoEarFound(3));
    }

    Ok(triangles)
}

/// Position (in the active ring) of the lowest-index valid ear, or `None`.
fn find_ear(points: &[Point3<f64>], active: &ActiveRing, normal: &Vector3<f64>) -> Option<usize> {
    let len = active.len();

    for k in 0..len {
        let prev = active[(k + len - 1) % len];
        let cur = active[k];
        let next = active[(k + 1) % len];

        if !is_corner_convex(&points[prev], &points[cur], &points[next], normal) {
            continue;
        }

        // The candidate triangle must not contain any other active vertex
        // (boundary counts as containment, which safely rejects grazing ears).
        let blocked = active.iter().any(|&i| {
            i != prev
                && i != cur
                && i != next
                && is_point_inside_triangle(
                    &points[i],
                    &points[prev],
                    &points[cur],
                    &points[next],
                )
        });

        if !blocked {
            return Some(k);
        }
    }
    None
}

/// Returns `true` if the active vertices have no non-collinear corner left.
fn is_ring_collinear(points: &[Point3<f64>], active: &ActiveRing) -> bool {
    let len = active.len();
    (0..len).all(|k| {
        let prev = &points[active[(k + len - 1) % len]];
        let cur = &points[active[k]];
        let next = &points[active[(k + 1) % len]];
        (cur - prev).cross(&(next - cur)).norm() < crate::tolerance::ATOL
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::roll_points;
    use crate::triangle::triangle_area;
    use crate::vector::normal as triple_normal;
    use approx::assert_relative_eq;

    fn z_up() -> Vector3<f64> {
        Vector3::new(0.0, 0.0, 1.0)
    }

    fn covered_area(points: &[Point3<f64>], triangles: &[[usize; 3]]) -> f64 {
        triangles
            .iter()
            .map(|t| triangle_area(&points[t[0]], &points[t[1]], &points[t[2]]))
            .sum()
    }

    #[test]
    fn triangle_passes_through() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let tri = triangulate(&pts, &z_up()).unwrap();
        assert_eq!(tri, vec![[0, 1, 2]]);
    }

    #[test]
    fn square_splits_into_two() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let tri = triangulate(&pts, &z_up()).unwrap();
        assert_eq!(tri.len(), 2);
        assert_relative_eq!(covered_area(&pts, &tri), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn l_shape_covers_area() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let tri = triangulate(&pts, &z_up()).unwrap();
        assert_eq!(tri.len(), 4);
        assert_relative_eq!(covered_area(&pts, &tri), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn u_shape_covers_area() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let tri = triangulate(&pts, &z_up()).unwrap();
        assert_eq!(tri.len(), 6);
        assert_relative_eq!(covered_area(&pts, &tri), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn c_shape_covers_area() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(2.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        let tri = triangulate(&pts, &z_up()).unwrap();
        assert_eq!(tri.len(), 6);
        assert_relative_eq!(covered_area(&pts, &tri), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_invariance() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let reference = triangulate(&pts, &z_up()).unwrap();
        let reference_area = covered_area(&pts, &reference);

        for k in 1..pts.len() {
            let rolled = roll_points(&pts, k);
            let tri = triangulate(&rolled, &z_up()).unwrap();
            assert_eq!(tri.len(), reference.len(), "rotation {k}");
            assert_relative_eq!(
                covered_area(&rolled, &tri),
                reference_area,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn triangles_match_supplied_normal() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let tri = triangulate(&pts, &z_up()).unwrap();
        for t in &tri {
            let n = triple_normal(&pts[t[0]], &pts[t[1]], &pts[t[2]]);
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn collinear_midpoint_is_skipped_as_ear() {
        // Square with a redundant midpoint on the bottom edge.
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let tri = triangulate(&pts, &z_up()).unwrap();
        assert_eq!(tri.len(), 3);
        assert_relative_eq!(covered_area(&pts, &tri), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_loops_have_no_triangles() {
        // Fewer than 3 effective points
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        assert!(triangulate(&pts, &z_up()).unwrap().is_empty());

        // Collinear loop has zero area
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        assert!(triangulate(&pts, &z_up()).unwrap().is_empty());
    }

    #[test]
    fn deterministic_ear_order() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let a = triangulate(&pts, &z_up()).unwrap();
        let b = triangulate(&pts, &z_up()).unwrap();
        assert_eq!(a, b);
    }
}
