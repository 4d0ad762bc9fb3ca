// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transparent polygons: exactly-facing interfaces between two solids of the
//! same zone. A ray simulation treats these as pass-through surfaces.
//!
//! Discovery is a pure function of the building; the cache is owned by the
//! caller and keyed by building name, with explicit invalidation whenever the
//! building's topology changes (stitching, adding solids). It is never keyed
//! by object identity.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::building::Building;

/// Paths (`"zone/solid/wall/polygon"`) of all polygons that form an
/// exactly-facing pair between two solids of the same zone.
pub fn find_transparent_polygons(building: &Building) -> Vec<String> {
    let mut paths = Vec::new();

    for zone in building.zones() {
        let solids: Vec<_> = zone.solids().collect();
        for i in 0..solids.len() {
            for j in i + 1..solids.len() {
                for (wall_i, poly_i) in solids[i].polygons() {
                    for (wall_j, poly_j) in solids[j].polygons() {
                        if poly_i.is_facing(poly_j, true) {
                            paths.push(format!(
                                "{}/{}/{}/{}",
                                zone.name(),
                                solids[i].name(),
                                wall_i,
                                poly_i.name()
                            ));
                            paths.push(format!(
                                "{}/{}/{}/{}",
                                zone.name(),
                                solids[j].name(),
                                wall_j,
                                poly_j.name()
                            ));
                        }
                    }
                }
            }
        }
    }

    debug!(
        building = building.name(),
        count = paths.len(),
        "transparent polygons discovered"
    );
    paths
}

/// Caller-owned cache of transparent-polygon sets, keyed by building name.
#[derive(Debug, Default)]
pub struct TransparentCache {
    cache: FxHashMap<String, Vec<String>>,
}

impl TransparentCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached set for this building, computing it on first use.
    pub fn get_or_compute(&mut self, building: &Building) -> &[String] {
        self.cache
            .entry(building.name().to_string())
            .or_insert_with(|| find_transparent_polygons(building))
    }

    /// Drops the cached set for one building. Call after any topology change.
    pub fn invalidate(&mut self, building_name: &str) {
        self.cache.remove(building_name);
    }

    /// Drops all cached sets.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
