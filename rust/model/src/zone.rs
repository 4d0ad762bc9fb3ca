// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone: a name-keyed, insertion-ordered collection of solids.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::solid::Solid;

/// A named group of solids (e.g. the rooms of one apartment).
#[derive(Debug, Clone, Default)]
pub struct Zone {
    name: String,
    order: Vec<String>,
    solids: FxHashMap<String, Solid>,
}

impl Zone {
    /// Creates an empty zone.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The zone's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a solid, keyed by its name.
    pub fn add_solid(&mut self, solid: Solid) -> Result<()> {
        let name = solid.name().to_string();
        if self.solids.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.order.push(name.clone());
        self.solids.insert(name, solid);
        Ok(())
    }

    /// Looks up a solid by name.
    pub fn solid(&self, name: &str) -> Option<&Solid> {
        self.solids.get(name)
    }

    /// Looks up a solid mutably by name.
    pub fn solid_mut(&mut self, name: &str) -> Option<&mut Solid> {
        self.solids.get_mut(name)
    }

    /// Solids in insertion order.
    pub fn solids(&self) -> impl Iterator<Item = &Solid> {
        self.order.iter().filter_map(|n| self.solids.get(n))
    }

    /// Solid names in insertion order.
    pub fn solid_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of solids.
    pub fn solid_count(&self) -> usize {
        self.order.len()
    }

    /// Temporarily removes a solid so it can be mutated alongside another.
    /// The position in the zone's order is kept; put it back with
    /// [`restore_solid`](Self::restore_solid).
    pub(crate) fn take_solid(&mut self, name: &str) -> Result<Solid> {
        self.solids
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Returns a solid taken with [`take_solid`](Self::take_solid).
    pub(crate) fn restore_solid(&mut self, solid: Solid) {
        self.solids.insert(solid.name().to_string(), solid);
    }

    /// Total volume of all solids.
    pub fn volume(&self) -> f64 {
        self.solids().map(Solid::volume).sum()
    }

    /// Render mesh of all solids.
    pub fn mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        for solid in self.solids() {
            mesh.merge(&solid.mesh());
        }
        mesh
    }
}
