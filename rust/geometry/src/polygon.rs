// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The polygon value type: an ordered, simple, coplanar loop of at least 3
//! points, together with its derived normal, triangulation, plane equation
//! and area.
//!
//! Polygons are immutable after construction; operations that "modify" a
//! polygon (flip, slice) return new instances.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::point::{
    are_points_coplanar, bounding_box, distance_point_to_edge, points_equal,
};
use crate::tolerance::ATOL;
use crate::triangle::{is_point_inside_triangle, triangle_centroid};
use crate::triangulation::triangulate;
use crate::vector::{first_nondegenerate_normal, is_undefined, newell_normal};

/// A named, immutable, coplanar polygon.
#[derive(Debug, Clone)]
pub struct Polygon {
    name: String,
    points: Vec<Point3<f64>>,
    triangles: Vec<[usize; 3]>,
    normal: Vector3<f64>,
    /// Coefficients `(a, b, c, d)` of the plane `ax + by + cz + d = 0`.
    plane: [f64; 4],
    area: f64,
}

impl Polygon {
    /// Builds a polygon from an ordered point loop.
    ///
    /// The normal comes from the first non-degenerate consecutive triple
    /// (right-hand rule with respect to the winding order); the triangulation
    /// is computed by ear clipping. Fails on fewer than 3 points, non-coplanar
    /// points, or a fully collinear loop.
    pub fn new(name: impl Into<String>, points: Vec<Point3<f64>>) -> Result<Self> {
        Self::build(name.into(), points, None)
    }

    /// Builds a polygon from a point loop and a precomputed triangulation.
    ///
    /// This is the deserialization path: ear clipping is skipped entirely, so
    /// a stored `{points, triangles}` pair reconstructs an identical polygon.
    pub fn with_triangles(
        name: impl Into<String>,
        points: Vec<Point3<f64>>,
        triangles: Vec<[usize; 3]>,
    ) -> Result<Self> {
        Self::build(name.into(), points, Some(triangles))
    }

    fn build(
        name: String,
        points: Vec<Point3<f64>>,
        triangles: Option<Vec<[usize; 3]>>,
    ) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::TooFewPoints(points.len()));
        }
        if !are_points_coplanar(&points)? {
            return Err(Error::PointsNotCoplanar);
        }

        let (mut normal, anchor) =
            first_nondegenerate_normal(&points).ok_or(Error::NoNondegenerateTriple)?;

        // A triple anchored at a reflex corner points against the winding;
        // Newell's method over the whole loop disambiguates the sign.
        let newell = newell_normal(&points);
        if !is_undefined(&newell) && normal.dot(&newell) < 0.0 {
            normal = -normal;
        }

        let triangles = match triangles {
            Some(triangles) => {
                for t in &triangles {
                    if let Some(&index) = t.iter().find(|&&i| i >= points.len()) {
                        return Err(Error::TriangleIndexOutOfRange {
                            index,
                            points: points.len(),
                        });
                    }
                }
                triangles
            }
            None => triangulate(&points, &normal)?,
        };

        let area = loop_area(&points);
        let d = -normal.dot(&points[anchor].coords);
        let plane = [normal.x, normal.y, normal.z, d];

        Ok(Self {
            name,
            points,
            triangles,
            normal,
            plane,
            area,
        })
    }

    /// The polygon's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered point loop.
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Triangulation as index triples into [`points`](Self::points).
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Unit normal, consistent with the winding order.
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Plane coefficients `(a, b, c, d)` of `ax + by + cz + d = 0`.
    pub fn plane(&self) -> [f64; 4] {
        self.plane
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// A representative interior point: the centroid of the first triangle.
    ///
    /// This is "some point inside", not the polygon's center of mass.
    pub fn centroid(&self) -> Point3<f64> {
        if let Some(t) = self.triangles.first() {
            triangle_centroid(&self.points[t[0]], &self.points[t[1]], &self.points[t[2]])
        } else {
            let mut sum = Vector3::zeros();
            for p in &self.points {
                sum += p.coords;
            }
            Point3::from(sum / self.points.len() as f64)
        }
    }

    /// Signed distance from a point to the polygon's plane.
    #[inline]
    pub fn plane_distance(&self, pt: &Point3<f64>) -> f64 {
        let [a, b, c, d] = self.plane;
        a * pt.x + b * pt.y + c * pt.z + d
    }

    /// Returns `true` if the point lies on the polygon's plane within tolerance.
    #[inline]
    pub fn is_point_coplanar(&self, pt: &Point3<f64>) -> bool {
        self.plane_distance(pt).abs() < ATOL
    }

    /// Point-in-polygon test.
    ///
    /// The point must lie on the polygon's plane; membership is then tested
    /// against the triangulation. With `boundary_in = false`, points exactly
    /// on an edge or vertex count as outside.
    pub fn is_point_inside(&self, pt: &Point3<f64>, boundary_in: bool) -> bool {
        if !self.is_point_coplanar(pt) {
            return false;
        }

        let inside = self.triangles.iter().any(|t| {
            is_point_inside_triangle(
                pt,
                &self.points[t[0]],
                &self.points[t[1]],
                &self.points[t[2]],
            )
        });

        if !inside {
            return false;
        }
        if boundary_in {
            return true;
        }
        !self.is_point_on_boundary(pt)
    }

    /// Boundary-inclusive containment shorthand.
    #[inline]
    pub fn contains_point(&self, pt: &Point3<f64>) -> bool {
        self.is_point_inside(pt, true)
    }

    /// Returns `true` if the point is inside and at least `margin` away from
    /// every edge.
    pub fn is_point_inside_margin(&self, pt: &Point3<f64>, margin: f64) -> bool {
        if !self.is_point_inside(pt, true) {
            return false;
        }
        self.edges()
            .all(|(a, b)| distance_point_to_edge(pt, &a, &b) >= margin)
    }

    /// Returns `true` if the point lies on any boundary edge or vertex.
    pub fn is_point_on_boundary(&self, pt: &Point3<f64>) -> bool {
        self.edges()
            .any(|(a, b)| distance_point_to_edge(pt, &a, &b) < ATOL)
    }

    /// Distance from a point to the polygon.
    ///
    /// If the point's orthogonal projection lands inside the polygon, this is
    /// the absolute plane offset; otherwise the minimum distance to any edge.
    pub fn distance_to_point(&self, pt: &Point3<f64>) -> f64 {
        let offset = self.plane_distance(pt);
        let projected = pt - self.normal * offset;

        let projected_inside = self.triangles.iter().any(|t| {
            is_point_inside_triangle(
                &projected,
                &self.points[t[0]],
                &self.points[t[1]],
                &self.points[t[2]],
            )
        });

        if projected_inside {
            offset.abs()
        } else {
            self.edges()
                .map(|(a, b)| distance_point_to_edge(pt, &a, &b))
                .fold(f64::MAX, f64::min)
        }
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> (Point3<f64>, Point3<f64>) {
        bounding_box(&self.points)
    }

    /// Iterates boundary edges as point pairs, in winding order.
    pub fn edges(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Returns `true` if the loop contains a vertex equal to `pt`.
    pub fn has_vertex(&self, pt: &Point3<f64>) -> bool {
        self.points.iter().any(|p| points_equal(p, pt))
    }

    /// A copy with reversed winding and negated normal.
    ///
    /// The triangulation is remapped rather than recomputed, so flipping twice
    /// restores the original point order exactly.
    pub fn flip(&self, name: Option<&str>) -> Self {
        let n = self.points.len();
        let points: Vec<Point3<f64>> = self.points.iter().rev().copied().collect();
        let triangles: Vec<[usize; 3]> = self
            .triangles
            .iter()
            .map(|t| [n - 1 - t[2], n - 1 - t[1], n - 1 - t[0]])
            .collect();

        let [a, b, c, d] = self.plane;
        Self {
            name: name.unwrap_or(&self.name).to_string(),
            points,
            triangles,
            normal: -self.normal,
            plane: [-a, -b, -c, -d],
            area: self.area,
        }
    }

    /// A copy carrying a different name; all geometry is shared as-is.
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Vertices and triangle indices for rendering or serialization.
    pub fn mesh(&self) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        (self.points.clone(), self.triangles.clone())
    }

    /// Returns `true` if the other polygon is coplanar with this one and all
    /// of its vertices lie inside or on this polygon's boundary.
    pub fn contains_polygon(&self, other: &Polygon) -> bool {
        other.points.iter().all(|p| self.is_point_inside(p, true))
    }

    /// See [`are_polygons_facing`](crate::predicates::are_polygons_facing).
    pub fn is_facing(&self, other: &Polygon, exact: bool) -> bool {
        crate::predicates::are_polygons_facing(self, other, exact)
    }

    /// See [`are_polygons_touching`](crate::predicates::are_polygons_touching).
    pub fn is_touching(&self, other: &Polygon) -> bool {
        crate::predicates::are_polygons_touching(self, other)
    }

    /// See [`are_polygons_crossing`](crate::predicates::are_polygons_crossing).
    pub fn is_crossing(&self, other: &Polygon) -> bool {
        crate::predicates::are_polygons_crossing(self, other)
    }

    /// See [`slice_polygon`](crate::slice::slice_polygon).
    pub fn slice(
        &self,
        slicing_points: &[Point3<f64>],
        names: Option<&crate::slice::SliceNames<'_>>,
    ) -> Result<(Polygon, Polygon)> {
        crate::slice::slice_polygon(self, slicing_points, names)
    }
}

/// Area of a planar loop via the cross-product fan (Stokes' theorem).
///
/// Correct for non-convex planar loops: the partial cross products cancel
/// outside the loop and the final magnitude is twice the enclosed area.
fn loop_area(points: &[Point3<f64>]) -> f64 {
    let p0 = &points[0];
    let mut total = Vector3::zeros();
    for i in 1..points.len() - 1 {
        let v1 = points[i] - p0;
        let v2 = points[i + 1] - p0;
        total += v1.cross(&v2);
    }
    total.norm() / 2.0
}
