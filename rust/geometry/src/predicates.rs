// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relational predicates between polygons: facing, touching, crossing,
//! plus segment intersection and mutual-visibility helpers.

use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::point::{are_points_coplanar, points_equal};
use crate::polygon::Polygon;
use crate::tolerance::{ATOL, RTOL};
use crate::vector::are_vectors_antiparallel;

/// Returns `true` if every point of `a` matches a unique point of `b`.
pub fn vertex_sets_match(a: &Polygon, b: &Polygon) -> bool {
    if a.points().len() != b.points().len() {
        return false;
    }

    let mut used = vec![false; b.points().len()];
    'outer: for p in a.points() {
        for (j, q) in b.points().iter().enumerate() {
            if !used[j] && points_equal(p, q) {
                used[j] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}

/// Tests whether two polygons face each other.
///
/// Normals must be anti-parallel within relative tolerance. With `exact`,
/// the vertex sets must match bijectively and the areas must agree; this
/// models a wall shared exactly between two volumes. Without `exact`,
/// coplanar polygons whose interiors partially overlap also qualify.
/// Symmetric in its arguments.
pub fn are_polygons_facing(a: &Polygon, b: &Polygon, exact: bool) -> bool {
    if !are_vectors_antiparallel(&a.normal(), &b.normal()) {
        return false;
    }

    let areas_equal = (a.area() - b.area()).abs() < ATOL + RTOL * a.area().abs();
    let exact_match = areas_equal && vertex_sets_match(a, b);
    if exact {
        return exact_match;
    }
    if exact_match {
        return true;
    }

    // Partial adjacency: both loops on one plane with overlapping interiors.
    let mut combined: Vec<Point3<f64>> = a.points().to_vec();
    combined.extend_from_slice(b.points());
    if !matches!(are_points_coplanar(&combined), Ok(true)) {
        return false;
    }

    interiors_overlap(a, b)
}

/// Overlap of coplanar interiors: crossing edges, or any vertex, edge
/// midpoint or representative interior point of one strictly inside the
/// other. The extra samples catch loops whose vertices all sit on the other
/// polygon's boundary.
fn interiors_overlap(a: &Polygon, b: &Polygon) -> bool {
    are_polygons_crossing(a, b)
        || boundary_samples(b).any(|p| a.is_point_inside(&p, false))
        || boundary_samples(a).any(|p| b.is_point_inside(&p, false))
        || a.is_point_inside(&b.centroid(), false)
        || b.is_point_inside(&a.centroid(), false)
}

/// Tests whether two polygons touch: boundary-only contact, no interior
/// overlap, and not simply the same loop.
pub fn are_polygons_touching(a: &Polygon, b: &Polygon) -> bool {
    if vertex_sets_match(a, b) {
        return false;
    }

    let contact = boundary_samples(a).any(|p| b.is_point_on_boundary(&p))
        || boundary_samples(b).any(|p| a.is_point_on_boundary(&p));
    if !contact {
        return false;
    }

    // Touching excludes overlapping/crossing.
    !interiors_overlap(a, b)
}

/// Vertices plus edge midpoints, the sample set used for contact tests.
fn boundary_samples(p: &Polygon) -> impl Iterator<Item = Point3<f64>> + '_ {
    p.points()
        .iter()
        .copied()
        .chain(p.edges().map(|(a, b)| Point3::from((a.coords + b.coords) / 2.0)))
}

/// Tests whether two polygons cross: a pair of non-shared edges intersects
/// strictly inside both segments, and points sampled beside the intersection
/// confirm genuine interior overlap (ruling out edge-on-edge coincidence).
pub fn are_polygons_crossing(a: &Polygon, b: &Polygon) -> bool {
    for (a0, a1) in a.edges() {
        for (b0, b1) in b.edges() {
            if edges_shared(&a0, &a1, &b0, &b1) {
                continue;
            }
            let Some(x) = segment_intersection(&a0, &a1, &b0, &b1) else {
                continue;
            };
            if interior_overlap_confirmed(a, b, &x, &a0, &a1, &b0, &b1) {
                return true;
            }
        }
    }
    false
}

/// Returns `true` if two edges have the same endpoints (in either order).
fn edges_shared(
    a0: &Point3<f64>,
    a1: &Point3<f64>,
    b0: &Point3<f64>,
    b1: &Point3<f64>,
) -> bool {
    (points_equal(a0, b0) && points_equal(a1, b1))
        || (points_equal(a0, b1) && points_equal(a1, b0))
}

/// Intersection of two 3D segments, strictly interior to both.
///
/// Parallel (and collinear-overlapping) segments yield `None`, as do pairs
/// whose lines pass each other with a gap larger than tolerance or whose
/// intersection lies at a segment endpoint.
pub fn segment_intersection(
    a0: &Point3<f64>,
    a1: &Point3<f64>,
    b0: &Point3<f64>,
    b1: &Point3<f64>,
) -> Option<Point3<f64>> {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let r = b0 - a0;

    let cross = d1.cross(&d2);
    let denom = cross.norm_squared();
    if denom < ATOL * ATOL {
        return None; // parallel or degenerate
    }

    let t = r.cross(&d2).dot(&cross) / denom;
    let u = r.cross(&d1).dot(&cross) / denom;

    let pa = a0 + d1 * t;
    let pb = b0 + d2 * u;
    if (pa - pb).norm() > ATOL {
        return None; // skew lines
    }

    // Strict interior of both segments, measured in absolute distance.
    let len1 = d1.norm();
    let len2 = d2.norm();
    if t * len1 <= ATOL || (1.0 - t) * len1 <= ATOL {
        return None;
    }
    if u * len2 <= ATOL || (1.0 - u) * len2 <= ATOL {
        return None;
    }

    Some(pa)
}

/// Samples points on both edges just beside the intersection and checks that
/// at least one lies strictly inside the other polygon.
fn interior_overlap_confirmed(
    a: &Polygon,
    b: &Polygon,
    x: &Point3<f64>,
    a0: &Point3<f64>,
    a1: &Point3<f64>,
    b0: &Point3<f64>,
    b1: &Point3<f64>,
) -> bool {
    let probe = |from: &Point3<f64>, to: &Point3<f64>, other: &Polygon| -> bool {
        for end in [from, to] {
            let v = end - x;
            if v.norm() < ATOL {
                continue;
            }
            // Halfway between the intersection and the edge endpoint
            let sample = x + v * 0.5;
            if other.is_point_inside(&sample, false) {
                return true;
            }
        }
        false
    };

    probe(a0, a1, b) || probe(b0, b1, a)
}

/// The `count` closest mutually-visible vertex pairs between two polygons.
///
/// A pair is mutually visible when the open segment between the two vertices
/// properly crosses no edge of either polygon. Selected pairs use distinct
/// vertices on both sides, closest first. Fails with
/// [`Error::NotEnoughVisiblePairs`] when fewer than `count` exist.
pub fn find_closest_visible_pairs(
    a: &Polygon,
    b: &Polygon,
    count: usize,
) -> Result<Vec<(usize, usize)>> {
    let mut candidates: Vec<(f64, usize, usize)> = Vec::new();

    for (i, pa) in a.points().iter().enumerate() {
        for (j, pb) in b.points().iter().enumerate() {
            if points_equal(pa, pb) {
                continue;
            }
            if !segment_is_clear(pa, pb, a) || !segment_is_clear(pa, pb, b) {
                continue;
            }
            candidates.push(((pa - pb).norm(), i, j));
        }
    }

    candidates.sort_by(|x, y| {
        x.0.total_cmp(&y.0)
            .then(x.1.cmp(&y.1))
            .then(x.2.cmp(&y.2))
    });

    let mut used_a = vec![false; a.points().len()];
    let mut used_b = vec![false; b.points().len()];
    let mut selected = Vec::with_capacity(count);

    for (_, i, j) in candidates {
        if used_a[i] || used_b[j] {
            continue;
        }
        used_a[i] = true;
        used_b[j] = true;
        selected.push((i, j));
        if selected.len() == count {
            return Ok(selected);
        }
    }

    Err(Error::NotEnoughVisiblePairs {
        requested: count,
        found: selected.len(),
    })
}

/// Returns `true` if the open segment crosses no edge of the polygon.
fn segment_is_clear(from: &Point3<f64>, to: &Point3<f64>, polygon: &Polygon) -> bool {
    polygon
        .edges()
        .all(|(e0, e1)| segment_intersection(from, to, &e0, &e1).is_none())
}
