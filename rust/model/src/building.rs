// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building: the root of the containment hierarchy, with path-based lookup
//! and parallel mesh extraction.

use b3d_geometry::Polygon;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::solid::Solid;
use crate::wall::Wall;
use crate::zone::Zone;

/// A named group of zones.
#[derive(Debug, Clone, Default)]
pub struct Building {
    name: String,
    order: Vec<String>,
    zones: FxHashMap<String, Zone>,
}

/// What a hierarchy path resolves to.
#[derive(Debug, Clone, Copy)]
pub enum PathTarget<'a> {
    Zone(&'a Zone),
    Solid(&'a Solid),
    Wall(&'a Wall),
    Polygon(&'a Polygon),
}

impl Building {
    /// Creates an empty building.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The building's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a zone, keyed by its name.
    pub fn add_zone(&mut self, zone: Zone) -> Result<()> {
        let name = zone.name().to_string();
        if self.zones.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.order.push(name.clone());
        self.zones.insert(name, zone);
        Ok(())
    }

    /// Looks up a zone by name.
    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.get(name)
    }

    /// Looks up a zone mutably by name.
    pub fn zone_mut(&mut self, name: &str) -> Option<&mut Zone> {
        self.zones.get_mut(name)
    }

    /// Zones in insertion order.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.order.iter().filter_map(|n| self.zones.get(n))
    }

    /// Zone names in insertion order.
    pub fn zone_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Resolves a `"zone/solid/wall/polygon"` path; prefixes are allowed and
    /// resolve to the corresponding container.
    pub fn get(&self, path: &str) -> Result<PathTarget<'_>> {
        let invalid = || Error::InvalidPath(path.to_string());
        let mut parts = path.split('/');

        let zone = parts
            .next()
            .filter(|s| !s.is_empty())
            .and_then(|n| self.zones.get(n))
            .ok_or_else(invalid)?;
        let Some(solid_name) = parts.next() else {
            return Ok(PathTarget::Zone(zone));
        };

        let solid = zone.solid(solid_name).ok_or_else(invalid)?;
        let Some(wall_name) = parts.next() else {
            return Ok(PathTarget::Solid(solid));
        };

        let wall = solid.wall(wall_name).ok_or_else(invalid)?;
        let Some(polygon_name) = parts.next() else {
            return Ok(PathTarget::Wall(wall));
        };

        if parts.next().is_some() {
            return Err(invalid());
        }
        let polygon = wall.polygon(polygon_name).ok_or_else(invalid)?;
        Ok(PathTarget::Polygon(polygon))
    }

    /// Pairs of adjacent solids, as `"zone/solid"` paths.
    ///
    /// Only pairs within a zone are reported; adjacency means some polygon of
    /// one solid faces some polygon of the other (not necessarily exactly).
    pub fn find_adjacent_solids(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for zone in self.zones() {
            let solids: Vec<&Solid> = zone.solids().collect();
            for i in 0..solids.len() {
                for j in i + 1..solids.len() {
                    if solids[i].is_adjacent_to(solids[j], false) {
                        pairs.push((
                            format!("{}/{}", zone.name(), solids[i].name()),
                            format!("{}/{}", zone.name(), solids[j].name()),
                        ));
                    }
                }
            }
        }
        pairs
    }

    /// Total volume of all zones.
    pub fn volume(&self) -> f64 {
        self.zones().map(Zone::volume).sum()
    }

    /// Render mesh of the whole building.
    ///
    /// Solids are meshed in parallel; each solid owns its own point data, so
    /// the batch units share nothing.
    pub fn mesh(&self) -> Mesh {
        let solids: Vec<&Solid> = self.zones().flat_map(|z| z.solids()).collect();
        let meshes: Vec<Mesh> = solids.par_iter().map(|s| s.mesh()).collect();

        let mut mesh = Mesh::new();
        mesh.merge_all(&meshes);
        mesh
    }
}
