// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon slicing: partition a polygon into two simple polygons along an
//! ordered chain of boundary-respecting cut points.
//!
//! The pipeline is: locate every cut point against the polygon's
//! vertex/edge/interior structure, strip redundant leading/trailing boundary
//! points, classify the chain into one of four supported topological cases,
//! walk the polygon's vertex loop to assemble the two resulting loops, and
//! construct fresh polygons from them. Both results preserve the parent's
//! orientation, and together they reconstruct its boundary plus the chain.

use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::point::{distance_point_to_edge, points_equal};
use crate::polygon::Polygon;
use crate::tolerance::ATOL;
use crate::vector::newell_normal;

/// Where a cut point sits relative to a polygon's boundary structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    /// Strictly outside the polygon: invalid as a cut point.
    Exterior,
    /// Strictly inside, touching no edge or vertex.
    Interior,
    /// Coincides with polygon vertex `i`.
    Vertex(usize),
    /// Lies on edge `i` (from vertex `i` to vertex `i + 1`), not at an endpoint.
    Edge(usize),
}

/// Names and reference points for the two slice results.
///
/// Each name goes to whichever result contains the corresponding reference
/// point.
#[derive(Debug, Clone, Copy)]
pub struct SliceNames<'a> {
    pub name1: &'a str,
    pub ref1: Point3<f64>,
    pub name2: &'a str,
    pub ref2: Point3<f64>,
}

/// The four supported chain topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SliceCase {
    /// Case 1: the chain enters and exits through two distinct edges.
    EdgeToEdge { first: usize, last: usize },
    /// Case 2: the chain enters and exits the same edge (a "bite" cut).
    SameEdge { edge: usize },
    /// Case 3: one end at a vertex, the other on an edge. `reversed` means
    /// the chain as given starts at the edge.
    VertexToEdge {
        vertex: usize,
        edge: usize,
        reversed: bool,
    },
    /// Case 4: the chain runs corner to corner.
    VertexToVertex { first: usize, last: usize },
}

/// Classifies one cut point against the polygon.
///
/// Vertex coincidence wins over edge membership; both win over interior.
pub fn locate_slicing_point(polygon: &Polygon, pt: &Point3<f64>) -> PointLocation {
    if !polygon.is_point_inside(pt, true) {
        return PointLocation::Exterior;
    }

    for (i, v) in polygon.points().iter().enumerate() {
        if points_equal(v, pt) {
            return PointLocation::Vertex(i);
        }
    }

    let pts = polygon.points();
    let n = pts.len();
    for i in 0..n {
        if distance_point_to_edge(pt, &pts[i], &pts[(i + 1) % n]) < ATOL {
            return PointLocation::Edge(i);
        }
    }

    PointLocation::Interior
}

/// Classifies a whole chain, dropping consecutive duplicate points.
///
/// Fails with [`Error::SlicingPointOutside`] on the first exterior point.
pub fn locate_slicing_points(
    polygon: &Polygon,
    points: &[Point3<f64>],
) -> Result<Vec<(Point3<f64>, PointLocation)>> {
    let mut located: Vec<(Point3<f64>, PointLocation)> = Vec::with_capacity(points.len());

    for pt in points {
        if let Some((prev, _)) = located.last() {
            if points_equal(prev, pt) {
                continue;
            }
        }
        let location = locate_slicing_point(polygon, pt);
        if location == PointLocation::Exterior {
            return Err(Error::SlicingPointOutside([pt.x, pt.y, pt.z]));
        }
        located.push((*pt, location));
    }

    Ok(located)
}

/// Strips redundant leading and trailing boundary points from a chain.
///
/// Chains sourced from another polygon's boundary may carry extra
/// vertex/edge-touching points before the cut actually enters the interior.
/// An end point is dropped while the segment to its inner neighbour runs
/// along the polygon boundary rather than through the interior.
pub fn remove_redundant_points(
    mut chain: Vec<(Point3<f64>, PointLocation)>,
    loop_len: usize,
) -> Vec<(Point3<f64>, PointLocation)> {
    loop {
        if chain.len() < 2 {
            return chain;
        }
        if is_redundant_pair(chain[0].1, chain[1].1, loop_len) {
            chain.remove(0);
            continue;
        }
        let last = chain.len() - 1;
        if is_redundant_pair(chain[last].1, chain[last - 1].1, loop_len) {
            chain.pop();
            continue;
        }
        return chain;
    }
}

/// `outer` is droppable when the segment to `inner` runs along the boundary:
/// repeated or adjacent vertices, two points on one edge, or a vertex paired
/// with a point on one of its own edges.
fn is_redundant_pair(outer: PointLocation, inner: PointLocation, n: usize) -> bool {
    use PointLocation::*;
    match (outer, inner) {
        (Vertex(a), Vertex(b)) => a == b || (a + 1) % n == b || (b + 1) % n == a,
        (Edge(a), Edge(b)) => a == b,
        (Vertex(v), Edge(e)) | (Edge(e), Vertex(v)) => v == e || v == (e + 1) % n,
        _ => false,
    }
}

/// Step 3: decide which of the four topologies the cleaned chain forms.
fn classify(chain: &[(Point3<f64>, PointLocation)]) -> Result<SliceCase> {
    let mut vertices: Vec<usize> = Vec::new();
    let mut edges: Vec<usize> = Vec::new();

    for (_, location) in chain {
        match location {
            PointLocation::Vertex(i) if !vertices.contains(i) => vertices.push(*i),
            PointLocation::Edge(i) if !edges.contains(i) => edges.push(*i),
            _ => {}
        }
    }

    let unsupported = Error::UnsupportedSliceTopology {
        vertices: vertices.len(),
        edges: edges.len(),
    };

    let first = chain[0].1;
    let last = chain[chain.len() - 1].1;

    match (first, last) {
        (PointLocation::Edge(a), PointLocation::Edge(b)) if vertices.is_empty() => {
            if a == b && edges.len() == 1 {
                Ok(SliceCase::SameEdge { edge: a })
            } else if a != b && edges.len() == 2 {
                Ok(SliceCase::EdgeToEdge { first: a, last: b })
            } else {
                Err(unsupported)
            }
        }
        (PointLocation::Vertex(v), PointLocation::Edge(e))
            if vertices.len() == 1 && edges.len() == 1 =>
        {
            Ok(SliceCase::VertexToEdge {
                vertex: v,
                edge: e,
                reversed: false,
            })
        }
        (PointLocation::Edge(e), PointLocation::Vertex(v))
            if vertices.len() == 1 && edges.len() == 1 =>
        {
            Ok(SliceCase::VertexToEdge {
                vertex: v,
                edge: e,
                reversed: true,
            })
        }
        (PointLocation::Vertex(u), PointLocation::Vertex(w))
            if u != w && vertices.len() == 2 && edges.is_empty() =>
        {
            Ok(SliceCase::VertexToVertex { first: u, last: w })
        }
        _ => Err(unsupported),
    }
}

/// Forward walk of the vertex loop from `from` to `to`, inclusive.
fn arc(points: &[Point3<f64>], from: usize, to: usize) -> Vec<Point3<f64>> {
    let n = points.len();
    let mut out = Vec::new();
    let mut i = from;
    loop {
        out.push(points[i]);
        if i == to {
            break;
        }
        i = (i + 1) % n;
    }
    out
}

/// Step 4: assemble the two result loops.
///
/// Both loops traverse the parent's boundary arcs in the original winding
/// direction, so their normals match the parent's.
fn partition(
    polygon: &Polygon,
    chain: &[Point3<f64>],
    case: SliceCase,
) -> (Vec<Point3<f64>>, Vec<Point3<f64>>) {
    let pts = polygon.points();
    let n = pts.len();

    match case {
        SliceCase::EdgeToEdge { first: a, last: b } => {
            let mut loop_a = chain.to_vec();
            loop_a.extend(arc(pts, (b + 1) % n, a));

            let mut loop_b: Vec<Point3<f64>> = chain.iter().rev().copied().collect();
            loop_b.extend(arc(pts, (a + 1) % n, b));

            (loop_a, loop_b)
        }
        SliceCase::SameEdge { edge } => {
            // Orient the chain so that, closed along the shared edge, its
            // normal matches the parent's.
            let aligned: Vec<Point3<f64>> =
                if newell_normal(chain).dot(&polygon.normal()) > 0.0 {
                    chain.to_vec()
                } else {
                    chain.iter().rev().copied().collect()
                };

            // The bite region is the chain alone; the remainder is the parent
            // loop with the reversed chain spliced in place of the edge run.
            let mut loop_b = arc(pts, 0, edge);
            loop_b.extend(aligned.iter().rev());
            if edge + 1 < n {
                loop_b.extend_from_slice(&pts[edge + 1..]);
            }

            (aligned, loop_b)
        }
        SliceCase::VertexToEdge {
            vertex: u,
            edge: b,
            reversed,
        } => {
            let forward: Vec<Point3<f64>> = if reversed {
                chain.iter().rev().copied().collect()
            } else {
                chain.to_vec()
            };

            let mut loop_a = forward.clone();
            if (b + 1) % n != u {
                loop_a.extend(arc(pts, (b + 1) % n, (u + n - 1) % n));
            }

            let mut loop_b: Vec<Point3<f64>> = forward.into_iter().rev().collect();
            if b != u {
                loop_b.extend(arc(pts, (u + 1) % n, b));
            }

            (loop_a, loop_b)
        }
        SliceCase::VertexToVertex { first: u, last: w } => {
            let inner = &chain[1..chain.len() - 1];

            let mut loop_a = arc(pts, u, w);
            loop_a.extend(inner.iter().rev());

            let mut loop_b = arc(pts, w, u);
            loop_b.extend_from_slice(inner);

            (loop_a, loop_b)
        }
    }
}

/// Slices a polygon into two along a chain of cut points.
///
/// The chain must lie inside or on the polygon, and after cleanup must start
/// and end on the boundary (vertex or edge) with at least 2 points remaining.
/// Returns the two resulting polygons; with `names`, each is named after the
/// reference point it contains (the result containing `ref1` comes first),
/// otherwise the children are named `{parent}-0` and `{parent}-1`.
///
/// # Errors
///
/// - [`Error::SlicingPointOutside`]: a cut point lies strictly outside.
/// - [`Error::TooFewSlicingPoints`]: fewer than 2 usable points remain
///   after cleanup; callers driving stitching treat this as "slice not
///   possible".
/// - [`Error::UnsupportedSliceTopology`]: the chain touches the boundary in
///   a configuration outside the four supported cases (for example three or
///   more separate boundary touches). Fatal: do not guess a resolution.
/// - [`Error::ReferencePointNotContained`]: a reference point matched
///   neither result.
pub fn slice_polygon(
    polygon: &Polygon,
    slicing_points: &[Point3<f64>],
    names: Option<&SliceNames<'_>>,
) -> Result<(Polygon, Polygon)> {
    let located = locate_slicing_points(polygon, slicing_points)?;
    let chain = remove_redundant_points(located, polygon.points().len());
    if chain.len() < 2 {
        return Err(Error::TooFewSlicingPoints(chain.len()));
    }

    let case = classify(&chain)?;
    let chain_points: Vec<Point3<f64>> = chain.iter().map(|(p, _)| *p).collect();
    let (loop_a, loop_b) = partition(polygon, &chain_points, case);

    let poly_a = Polygon::new(format!("{}-0", polygon.name()), loop_a)?;
    let poly_b = Polygon::new(format!("{}-1", polygon.name()), loop_b)?;

    let Some(names) = names else {
        return Ok((poly_a, poly_b));
    };

    let (first, second) = if poly_a.contains_point(&names.ref1) {
        (poly_a, poly_b)
    } else if poly_b.contains_point(&names.ref1) {
        (poly_b, poly_a)
    } else {
        let r = names.ref1;
        return Err(Error::ReferencePointNotContained([r.x, r.y, r.z]));
    };

    if !second.contains_point(&names.ref2) {
        let r = names.ref2;
        return Err(Error::ReferencePointNotContained([r.x, r.y, r.z]));
    }

    Ok((first.renamed(names.name1), second.renamed(names.name2)))
}
