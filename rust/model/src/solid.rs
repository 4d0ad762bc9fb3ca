// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid: a closed volume bounded by walls.
//!
//! Volume and containment use standard computational geometry over the
//! boundary triangulation: the signed-tetrahedron sum and perturbed-ray
//! casting with Möller–Trumbore intersection.

use b3d_geometry::{are_polygons_facing, bounding_box, Polygon};
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::wall::Wall;

/// A named, ordered collection of walls forming a watertight volume.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    name: String,
    order: Vec<String>,
    walls: FxHashMap<String, Wall>,
}

impl Solid {
    /// Creates an empty solid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Axis-aligned box solid with six outward-facing walls, named
    /// `floor`, `ceiling`, `front`, `back`, `left` and `right`; each wall
    /// carries a single polygon of the same name.
    pub fn box_solid(
        name: impl Into<String>,
        min: Point3<f64>,
        max: Point3<f64>,
    ) -> Result<Self> {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);

        let faces: [(&str, [Point3<f64>; 4]); 6] = [
            (
                "floor",
                [p(x0, y0, z0), p(x0, y1, z0), p(x1, y1, z0), p(x1, y0, z0)],
            ),
            (
                "ceiling",
                [p(x0, y0, z1), p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1)],
            ),
            (
                "front",
                [p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)],
            ),
            (
                "back",
                [p(x1, y1, z0), p(x0, y1, z0), p(x0, y1, z1), p(x1, y1, z1)],
            ),
            (
                "left",
                [p(x0, y1, z0), p(x0, y0, z0), p(x0, y0, z1), p(x0, y1, z1)],
            ),
            (
                "right",
                [p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)],
            ),
        ];

        let mut solid = Self::new(name);
        for (face_name, corners) in faces {
            let polygon = Polygon::new(face_name, corners.to_vec())?;
            solid.add_wall(Wall::with_polygons(face_name, vec![polygon])?)?;
        }
        Ok(solid)
    }

    /// The solid's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a wall, keyed by its name.
    pub fn add_wall(&mut self, wall: Wall) -> Result<()> {
        let name = wall.name().to_string();
        if self.walls.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.order.push(name.clone());
        self.walls.insert(name, wall);
        Ok(())
    }

    /// Looks up a wall by name.
    pub fn wall(&self, name: &str) -> Option<&Wall> {
        self.walls.get(name)
    }

    /// Looks up a wall mutably by name.
    pub fn wall_mut(&mut self, name: &str) -> Option<&mut Wall> {
        self.walls.get_mut(name)
    }

    /// Walls in insertion order.
    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.order.iter().filter_map(|n| self.walls.get(n))
    }

    /// Wall names in insertion order.
    pub fn wall_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// All main boundary polygons with their wall names, in order.
    pub fn polygons(&self) -> impl Iterator<Item = (&str, &Polygon)> {
        self.walls()
            .flat_map(|w| w.polygons().map(move |p| (w.name(), p)))
    }

    /// Finds a main polygon by name across all walls.
    pub fn find_polygon(&self, name: &str) -> Option<(&str, &Polygon)> {
        self.polygons().find(|(_, p)| p.name() == name)
    }

    /// Volume by the signed-tetrahedron sum over boundary triangles.
    ///
    /// Correct for any closed polyhedral boundary with consistently outward
    /// polygon normals.
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;

        for (_, polygon) in self.polygons() {
            let pts = polygon.points();
            for t in polygon.triangles() {
                let (p0, p1, p2) = (&pts[t[0]], &pts[t[1]], &pts[t[2]]);
                volume += p0.coords.dot(&p1.coords.cross(&p2.coords));
            }
        }

        (volume / 6.0).abs()
    }

    /// Axis-aligned bounding box over all boundary polygons.
    pub fn bounding_box(&self) -> (Point3<f64>, Point3<f64>) {
        let all: Vec<Point3<f64>> = self
            .polygons()
            .flat_map(|(_, p)| p.points().iter().copied())
            .collect();
        bounding_box(&all)
    }

    /// Tests if a point is inside the solid using ray casting.
    ///
    /// Casts a ray in a slightly perturbed direction and counts boundary
    /// triangle intersections; odd means inside. The perturbation avoids
    /// degenerate hits on edges and vertices.
    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        let dir = Vector3::new(1.0, 1e-7, 1e-8);
        let mut crossings = 0usize;

        for (_, polygon) in self.polygons() {
            let pts = polygon.points();
            for t in polygon.triangles() {
                if ray_intersects_triangle(point, &dir, &pts[t[0]], &pts[t[1]], &pts[t[2]]) {
                    crossings += 1;
                }
            }
        }

        crossings % 2 == 1
    }

    /// Returns `true` if some polygon of this solid faces some polygon of the
    /// other solid (exactly, or merely overlapping when `exact` is false).
    pub fn is_adjacent_to(&self, other: &Solid, exact: bool) -> bool {
        self.polygons().any(|(_, p)| {
            other
                .polygons()
                .any(|(_, q)| are_polygons_facing(p, q, exact))
        })
    }

    /// Render mesh of all walls.
    pub fn mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        for wall in self.walls() {
            mesh.merge(&wall.mesh());
        }
        mesh
    }
}

/// Möller–Trumbore ray-triangle intersection test.
fn ray_intersects_triangle(
    origin: &Point3<f64>,
    dir: &Vector3<f64>,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> bool {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = dir.cross(&edge2);
    let a = edge1.dot(&h);

    if a.abs() < 1e-12 {
        return false; // ray parallel to triangle
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(&h);

    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = s.cross(&edge1);
    let v = f * dir.dot(&q);

    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    let t = f * edge2.dot(&q);
    t > 1e-12 // intersection is in front of the origin
}
