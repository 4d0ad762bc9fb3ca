// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid stitching: slice adjacent solids' boundary polygons until every
//! shared interface is an exactly-facing polygon pair.
//!
//! The driver is an explicit worklist over candidate polygon pairs, not a
//! recursion: pop a pair, skip it if it is already exact (or no longer
//! overlaps, or one side was replaced meanwhile), otherwise slice each
//! polygon by the other's boundary-respecting point chain, swap the slices
//! into the owning wall, and enqueue the new sub-polygons against the other
//! side. Every successful slice strictly refines the boundary, so the queue
//! drains.

use std::collections::VecDeque;

use b3d_geometry::{
    are_polygons_facing, find_closest_visible_pairs, roll_points, segment_intersection,
    slice_polygon, Error as GeometryError, Point3, Polygon,
};
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::solid::Solid;
use crate::zone::Zone;

/// `(wall name, polygon name)` inside one solid.
type PolygonRef = (String, String);

/// Stitches two solids of a zone, addressed by name.
pub fn stitch_adjacent_solids(zone: &mut Zone, name_a: &str, name_b: &str) -> Result<()> {
    let mut a = zone.take_solid(name_a)?;
    let result = match zone.solid_mut(name_b) {
        Some(b) => stitch_solids(&mut a, b),
        None => Err(Error::NotFound(name_b.to_string())),
    };
    zone.restore_solid(a);
    result
}

/// Stitches two solids in place.
///
/// Recoverable slicing failures (`TooFewSlicingPoints`, `SlicingPointOutside`)
/// mean "nothing to do for this pair" and are skipped;
/// `UnsupportedSliceTopology` propagates after the offending inputs are
/// logged.
pub fn stitch_solids(a: &mut Solid, b: &mut Solid) -> Result<()> {
    let mut queue: VecDeque<(PolygonRef, PolygonRef)> = VecDeque::new();

    for (wa, pa) in a.polygons() {
        for (wb, pb) in b.polygons() {
            if are_polygons_facing(pa, pb, false) && !are_polygons_facing(pa, pb, true) {
                queue.push_back((
                    (wa.to_string(), pa.name().to_string()),
                    (wb.to_string(), pb.name().to_string()),
                ));
            }
        }
    }

    // Each successful slice strictly refines the boundary, so the queue
    // drains; the budget guards against tolerance-level livelock.
    let budget = 256 + 64 * queue.len();
    let mut iterations = 0usize;

    while let Some(((wa, pa), (wb, pb))) = queue.pop_front() {
        iterations += 1;
        if iterations > budget {
            warn!(
                solid_a = a.name(),
                solid_b = b.name(),
                "stitching stopped after {budget} iterations without draining the queue"
            );
            break;
        }

        let Some(poly_a) = a.wall(&wa).and_then(|w| w.polygon(&pa)).cloned() else {
            continue; // replaced by a later slice
        };
        let Some(poly_b) = b.wall(&wb).and_then(|w| w.polygon(&pb)).cloned() else {
            continue;
        };

        if are_polygons_facing(&poly_a, &poly_b, true) {
            debug!(
                polygon_a = pa.as_str(),
                polygon_b = pb.as_str(),
                "pair already matches exactly"
            );
            continue;
        }
        if !are_polygons_facing(&poly_a, &poly_b, false) {
            continue;
        }

        // A footprint fully enclosed in the other polygon cannot be separated
        // by one cut; route through the two-step support cut.
        if is_enclosed(&poly_b, &poly_a) {
            let replacements = slice_enclosed(&poly_a, &poly_b)?;
            let names: Vec<String> =
                replacements.iter().map(|p| p.name().to_string()).collect();
            wall_replace(a, &wa, &pa, replacements)?;
            for name in names {
                queue.push_back(((wa.clone(), name), (wb.clone(), pb.clone())));
            }
            continue;
        }
        if is_enclosed(&poly_a, &poly_b) {
            let replacements = slice_enclosed(&poly_b, &poly_a)?;
            let names: Vec<String> =
                replacements.iter().map(|p| p.name().to_string()).collect();
            wall_replace(b, &wb, &pb, replacements)?;
            for name in names {
                queue.push_back(((wa.clone(), pa.clone()), (wb.clone(), name)));
            }
            continue;
        }

        let sliced_a = try_slice(&poly_a, &poly_b)?;
        let sliced_b = try_slice(&poly_b, &poly_a)?;
        if sliced_a.is_none() && sliced_b.is_none() {
            debug!(
                polygon_a = pa.as_str(),
                polygon_b = pb.as_str(),
                "no usable cut chain for pair"
            );
            continue;
        }

        let names_a = apply_slices(a, &wa, &pa, sliced_a)?;
        let names_b = apply_slices(b, &wb, &pb, sliced_b)?;

        for na in &names_a {
            for nb in &names_b {
                if na != &pa || nb != &pb {
                    queue.push_back(((wa.clone(), na.clone()), (wb.clone(), nb.clone())));
                }
            }
        }
    }

    Ok(())
}

/// Returns `true` if every vertex of `inner` is strictly inside `outer`.
fn is_enclosed(inner: &Polygon, outer: &Polygon) -> bool {
    inner
        .points()
        .iter()
        .all(|p| outer.is_point_inside(p, false))
}

/// Slices `target` by the cutter-derived chain, mapping the recoverable
/// failures to `None`.
fn try_slice(target: &Polygon, cutter: &Polygon) -> Result<Option<(Polygon, Polygon)>> {
    let chain = slicing_chain(target, cutter);
    if chain.len() < 2 {
        return Ok(None);
    }

    match slice_polygon(target, &chain, None) {
        Ok(pair) => Ok(Some(pair)),
        Err(
            GeometryError::TooFewSlicingPoints(_) | GeometryError::SlicingPointOutside(_),
        ) => {
            debug!(
                polygon = target.name(),
                cutter = cutter.name(),
                "slice not possible"
            );
            Ok(None)
        }
        Err(e) => {
            if matches!(e, GeometryError::UnsupportedSliceTopology { .. }) {
                error!(
                    polygon = target.name(),
                    cutter = cutter.name(),
                    chain = ?chain,
                    "unsupported slice topology during stitching"
                );
            }
            Err(e.into())
        }
    }
}

/// The cutter's boundary points that can cut the target: the contiguous run
/// of cutter vertices lying inside or on the target, extended with the
/// boundary-crossing points of the two run-adjacent cutter edges.
///
/// When the whole cutter loop lies on or inside the target, the loop is
/// rotated to start with an interior-crossing edge so that chain cleanup can
/// trim the boundary-hugging remainder.
fn slicing_chain(target: &Polygon, cutter: &Polygon) -> Vec<Point3<f64>> {
    let pts = cutter.points();
    let n = pts.len();
    let inside: Vec<bool> = pts
        .iter()
        .map(|p| target.is_point_inside(p, true))
        .collect();

    if inside.iter().all(|&i| i) {
        for i in 0..n {
            let mid = Point3::from((pts[i].coords + pts[(i + 1) % n].coords) / 2.0);
            if target.is_point_inside(&mid, false) {
                return roll_points(pts, i);
            }
        }
        return Vec::new(); // boundary fully shared, nothing to cut
    }
    if !inside.iter().any(|&i| i) {
        return Vec::new();
    }

    let Some(start) = (0..n).find(|&i| inside[i] && !inside[(i + n - 1) % n]) else {
        return Vec::new();
    };
    let mut run = vec![start];
    let mut i = (start + 1) % n;
    while inside[i] && i != start {
        run.push(i);
        i = (i + 1) % n;
    }
    let last = run[run.len() - 1];

    let mut chain = Vec::with_capacity(run.len() + 2);
    if let Some(x) = boundary_crossing(target, &pts[(start + n - 1) % n], &pts[start]) {
        chain.push(x);
    }
    chain.extend(run.iter().map(|&k| pts[k]));
    if let Some(x) = boundary_crossing(target, &pts[(last + 1) % n], &pts[last]) {
        chain.push(x);
    }
    chain
}

/// Where the segment from an outside point to an inside point crosses the
/// target's boundary, if it does so cleanly.
fn boundary_crossing(
    target: &Polygon,
    outside: &Point3<f64>,
    inside: &Point3<f64>,
) -> Option<Point3<f64>> {
    target
        .edges()
        .find_map(|(e0, e1)| segment_intersection(outside, inside, &e0, &e1))
}

/// Two-step slice for a footprint fully enclosed in `outer`.
///
/// First cut `outer` along a support chain built from the two closest
/// mutually-visible vertex pairs (outer vertex → inner arc → outer vertex),
/// then cut the piece holding the footprint along the inner boundary's
/// remaining arc. Known-fragile: enclosures with boundary tangency are
/// rejected, not guessed at.
fn slice_enclosed(outer: &Polygon, inner: &Polygon) -> Result<Vec<Polygon>> {
    warn!(
        outer = outer.name(),
        inner = inner.name(),
        "enclosed footprint: taking the two-step support cut"
    );

    let pairs = find_closest_visible_pairs(outer, inner, 2)?;
    let (i1, j1) = pairs[0];
    let (i2, j2) = pairs[1];

    let inner_pts = inner.points();
    let n = inner_pts.len();

    // Support chain: outer vertex, the inner arc from j1 forward to j2, and
    // back out to the second outer vertex.
    let mut chain = vec![outer.points()[i1]];
    let mut j = j1;
    loop {
        chain.push(inner_pts[j]);
        if j == j2 {
            break;
        }
        j = (j + 1) % n;
    }
    chain.push(outer.points()[i2]);

    let (first, second) = slice_polygon(outer, &chain, None)?;

    // The piece holding the enclosed footprint takes the second cut.
    let probe = inner.centroid();
    let (host, other) = if first.is_point_inside(&probe, false) {
        (first, second)
    } else if second.is_point_inside(&probe, false) {
        (second, first)
    } else {
        error!(
            outer = outer.name(),
            inner = inner.name(),
            "support cut left the enclosed footprint on neither side"
        );
        return Err(GeometryError::UnsupportedSliceTopology {
            vertices: 2,
            edges: 0,
        }
        .into());
    };

    // Remaining inner arc, from j2 forward back to j1; its endpoints are now
    // vertices of the host piece.
    let mut second_chain = Vec::new();
    let mut j = j2;
    loop {
        second_chain.push(inner_pts[j]);
        if j == j1 {
            break;
        }
        j = (j + 1) % n;
    }

    let (x, y) = slice_polygon(&host, &second_chain, None)?;
    Ok(vec![other, x, y])
}

/// Swaps a sliced polygon for its two halves inside the owning wall.
fn apply_slices(
    solid: &mut Solid,
    wall_name: &str,
    old_name: &str,
    pair: Option<(Polygon, Polygon)>,
) -> Result<Vec<String>> {
    let Some((x, y)) = pair else {
        return Ok(vec![old_name.to_string()]);
    };
    let names = vec![x.name().to_string(), y.name().to_string()];
    wall_replace(solid, wall_name, old_name, vec![x, y])?;
    Ok(names)
}

fn wall_replace(
    solid: &mut Solid,
    wall_name: &str,
    old_name: &str,
    new_polygons: Vec<Polygon>,
) -> Result<()> {
    solid
        .wall_mut(wall_name)
        .ok_or_else(|| Error::NotFound(wall_name.to_string()))?
        .replace(old_name, new_polygons)
}
