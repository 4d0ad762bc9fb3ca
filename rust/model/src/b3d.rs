// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! B3D persistence: JSON snapshots of the building hierarchy.
//!
//! A polygon persists as its `{points, triangles}` pair and is reconstructed
//! through the precomputed-triangulation constructor, so ear clipping never
//! re-runs on load and a save → load → save round trip is stable.

use std::path::Path;

use b3d_geometry::{Point3, Polygon};
use serde::{Deserialize, Serialize};

use crate::building::Building;
use crate::error::{Error, Result};
use crate::solid::Solid;
use crate::wall::Wall;
use crate::zone::Zone;

/// Serializable form of one polygon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonSnapshot {
    pub name: String,
    pub points: Vec<[f64; 3]>,
    pub triangles: Vec<[usize; 3]>,
}

/// Serializable form of one wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSnapshot {
    pub name: String,
    pub polygons: Vec<PolygonSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subpolygons: Vec<PolygonSnapshot>,
}

/// Serializable form of one solid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidSnapshot {
    pub name: String,
    pub walls: Vec<WallSnapshot>,
}

/// Serializable form of one zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub name: String,
    pub solids: Vec<SolidSnapshot>,
}

/// Serializable form of a whole building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSnapshot {
    pub name: String,
    pub zones: Vec<ZoneSnapshot>,
}

fn polygon_snapshot(polygon: &Polygon) -> PolygonSnapshot {
    PolygonSnapshot {
        name: polygon.name().to_string(),
        points: polygon.points().iter().map(|p| [p.x, p.y, p.z]).collect(),
        triangles: polygon.triangles().to_vec(),
    }
}

fn restore_polygon(snapshot: PolygonSnapshot) -> Result<Polygon> {
    let points: Vec<Point3<f64>> = snapshot
        .points
        .into_iter()
        .map(|[x, y, z]| Point3::new(x, y, z))
        .collect();
    Ok(Polygon::with_triangles(
        snapshot.name,
        points,
        snapshot.triangles,
    )?)
}

/// Snapshots a building.
pub fn snapshot(building: &Building) -> BuildingSnapshot {
    BuildingSnapshot {
        name: building.name().to_string(),
        zones: building
            .zones()
            .map(|zone| ZoneSnapshot {
                name: zone.name().to_string(),
                solids: zone
                    .solids()
                    .map(|solid| SolidSnapshot {
                        name: solid.name().to_string(),
                        walls: solid
                            .walls()
                            .map(|wall| WallSnapshot {
                                name: wall.name().to_string(),
                                polygons: wall.polygons().map(polygon_snapshot).collect(),
                                subpolygons: wall
                                    .subpolygons()
                                    .map(polygon_snapshot)
                                    .collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Rebuilds a building from a snapshot.
pub fn restore(snapshot: BuildingSnapshot) -> Result<Building> {
    let mut building = Building::new(snapshot.name);

    for zone_snap in snapshot.zones {
        let mut zone = Zone::new(zone_snap.name);
        for solid_snap in zone_snap.solids {
            let mut solid = Solid::new(solid_snap.name);
            for wall_snap in solid_snap.walls {
                let mut wall = Wall::new(wall_snap.name);
                for p in wall_snap.polygons {
                    wall.add_polygon(restore_polygon(p)?)?;
                }
                for p in wall_snap.subpolygons {
                    wall.add_subpolygon(restore_polygon(p)?)?;
                }
                solid.add_wall(wall)?;
            }
            zone.add_solid(solid)?;
        }
        building.add_zone(zone)?;
    }
    Ok(building)
}

/// Serializes a building to a B3D JSON string.
pub fn to_b3d_string(building: &Building) -> Result<String> {
    serde_json::to_string_pretty(&snapshot(building))
        .map_err(|e| Error::Serialization(e.to_string()))
}

/// Parses a building from a B3D JSON string.
pub fn from_b3d_string(json: &str) -> Result<Building> {
    let snapshot: BuildingSnapshot =
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
    restore(snapshot)
}

/// Writes a building to a `.b3d` file.
pub fn save_b3d(building: &Building, path: impl AsRef<Path>) -> Result<()> {
    let json = to_b3d_string(building)?;
    std::fs::write(path, json).map_err(|e| Error::Serialization(e.to_string()))
}

/// Reads a building from a `.b3d` file.
pub fn load_b3d(path: impl AsRef<Path>) -> Result<Building> {
    let json =
        std::fs::read_to_string(path).map_err(|e| Error::Serialization(e.to_string()))?;
    from_b3d_string(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_building() -> Building {
        let mut zone = Zone::new("z");
        zone.add_solid(
            Solid::box_solid(
                "room",
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 1.0),
            )
            .unwrap(),
        )
        .unwrap();
        let mut building = Building::new("house");
        building.add_zone(zone).unwrap();
        building
    }

    #[test]
    fn round_trip_preserves_geometry() {
        let original = sample_building();
        let json = to_b3d_string(&original).unwrap();
        let restored = from_b3d_string(&json).unwrap();

        assert_eq!(restored.name(), original.name());
        assert_relative_eq!(restored.volume(), original.volume(), epsilon = 1e-12);

        let solid = restored.zone("z").unwrap().solid("room").unwrap();
        let (_, polygon) = solid.find_polygon("ceiling").unwrap();
        let (_, original_polygon) = original
            .zone("z")
            .unwrap()
            .solid("room")
            .unwrap()
            .find_polygon("ceiling")
            .unwrap();
        assert_eq!(polygon.points(), original_polygon.points());
        assert_eq!(polygon.triangles(), original_polygon.triangles());
    }

    #[test]
    fn second_round_trip_is_stable() {
        let original = sample_building();
        let json = to_b3d_string(&original).unwrap();
        let json_again = to_b3d_string(&from_b3d_string(&json).unwrap()).unwrap();
        assert_eq!(json, json_again);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            from_b3d_string("{not json"),
            Err(Error::Serialization(_))
        ));
    }
}
