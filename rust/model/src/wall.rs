// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall: a name-keyed, insertion-ordered polygon container.
//!
//! A wall owns main polygons plus optional subpolygons (windows, doors) that
//! need not be coplanar with their parents. Stitching replaces one polygon
//! with several via [`Wall::replace`], preserving the original position.

use b3d_geometry::Polygon;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::mesh::Mesh;

/// A named, ordered collection of polygons.
#[derive(Debug, Clone, Default)]
pub struct Wall {
    name: String,
    order: Vec<String>,
    polygons: FxHashMap<String, Polygon>,
    suborder: Vec<String>,
    subpolygons: FxHashMap<String, Polygon>,
}

impl Wall {
    /// Creates an empty wall.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a wall from a list of polygons.
    pub fn with_polygons(name: impl Into<String>, polygons: Vec<Polygon>) -> Result<Self> {
        let mut wall = Self::new(name);
        for p in polygons {
            wall.add_polygon(p)?;
        }
        Ok(wall)
    }

    /// The wall's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a main polygon, keyed by its name.
    pub fn add_polygon(&mut self, polygon: Polygon) -> Result<()> {
        let name = polygon.name().to_string();
        if self.polygons.contains_key(&name) || self.subpolygons.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.order.push(name.clone());
        self.polygons.insert(name, polygon);
        Ok(())
    }

    /// Adds a subpolygon (window, door); it may be non-coplanar with the
    /// wall's main polygons.
    pub fn add_subpolygon(&mut self, polygon: Polygon) -> Result<()> {
        let name = polygon.name().to_string();
        if self.polygons.contains_key(&name) || self.subpolygons.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.suborder.push(name.clone());
        self.subpolygons.insert(name, polygon);
        Ok(())
    }

    /// Looks up a main polygon or subpolygon by name.
    pub fn polygon(&self, name: &str) -> Option<&Polygon> {
        self.polygons.get(name).or_else(|| self.subpolygons.get(name))
    }

    /// Main polygon names, in insertion order.
    pub fn polygon_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Main polygons, in insertion order.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.order.iter().filter_map(|n| self.polygons.get(n))
    }

    /// Subpolygons, in insertion order.
    pub fn subpolygons(&self) -> impl Iterator<Item = &Polygon> {
        self.suborder.iter().filter_map(|n| self.subpolygons.get(n))
    }

    /// Number of main polygons.
    pub fn polygon_count(&self) -> usize {
        self.order.len()
    }

    /// Replaces one main polygon with one or more new ones, at the same
    /// position in the wall's order. This is how stitching swaps a polygon
    /// for its slice results.
    pub fn replace(&mut self, old_name: &str, new_polygons: Vec<Polygon>) -> Result<()> {
        let position = self
            .order
            .iter()
            .position(|n| n == old_name)
            .ok_or_else(|| Error::NotFound(old_name.to_string()))?;

        for p in &new_polygons {
            let taken = (self.polygons.contains_key(p.name()) && p.name() != old_name)
                || self.subpolygons.contains_key(p.name());
            if taken {
                return Err(Error::DuplicateName(p.name().to_string()));
            }
        }

        self.order.remove(position);
        self.polygons.remove(old_name);

        for (offset, p) in new_polygons.into_iter().enumerate() {
            let name = p.name().to_string();
            self.order.insert(position + offset, name.clone());
            self.polygons.insert(name, p);
        }
        Ok(())
    }

    /// Total area of the main polygons.
    pub fn area(&self) -> f64 {
        self.polygons().map(Polygon::area).sum()
    }

    /// Render mesh of all polygons, subpolygons included.
    pub fn mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        for p in self.polygons().chain(self.subpolygons()) {
            mesh.add_polygon(p);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn square(name: &str, x0: f64, x1: f64) -> Polygon {
        Polygon::new(
            name,
            vec![
                Point3::new(x0, 0.0, 0.0),
                Point3::new(x1, 0.0, 0.0),
                Point3::new(x1, 1.0, 0.0),
                Point3::new(x0, 1.0, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn add_and_lookup() {
        let mut wall = Wall::new("w");
        wall.add_polygon(square("a", 0.0, 1.0)).unwrap();
        wall.add_polygon(square("b", 1.0, 2.0)).unwrap();

        assert_eq!(wall.polygon_count(), 2);
        assert!(wall.polygon("a").is_some());
        assert!(wall.polygon("missing").is_none());
        let names: Vec<_> = wall.polygon_names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut wall = Wall::new("w");
        wall.add_polygon(square("a", 0.0, 1.0)).unwrap();
        assert!(matches!(
            wall.add_polygon(square("a", 1.0, 2.0)),
            Err(Error::DuplicateName(_))
        ));
    }

    #[test]
    fn replace_expands_in_place() {
        let mut wall = Wall::new("w");
        wall.add_polygon(square("a", 0.0, 1.0)).unwrap();
        wall.add_polygon(square("b", 1.0, 2.0)).unwrap();

        wall.replace(
            "a",
            vec![square("a-0", 0.0, 0.5), square("a-1", 0.5, 1.0)],
        )
        .unwrap();

        let names: Vec<_> = wall.polygon_names().collect();
        assert_eq!(names, vec!["a-0", "a-1", "b"]);
        assert!(wall.polygon("a").is_none());
        assert_relative_eq!(wall.area(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn replace_missing_polygon_fails() {
        let mut wall = Wall::new("w");
        assert!(matches!(
            wall.replace("ghost", vec![square("x", 0.0, 1.0)]),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn subpolygons_are_separate() {
        let mut wall = Wall::new("w");
        wall.add_polygon(square("wall", 0.0, 2.0)).unwrap();
        wall.add_subpolygon(square("window", 0.5, 1.0)).unwrap();

        assert_eq!(wall.polygon_count(), 1);
        assert!(wall.polygon("window").is_some());
        // Subpolygons do not count toward wall area
        assert_relative_eq!(wall.area(), 2.0, epsilon = 1e-9);
        // But they do render
        assert_eq!(wall.mesh().triangle_count(), 4);
    }
}
