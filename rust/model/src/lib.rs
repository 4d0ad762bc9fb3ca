// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # B3D Model
//!
//! The building containment hierarchy (Building → Zone → Solid → Wall →
//! Polygon) on top of the `b3d-geometry` kernel: name-keyed ordered
//! containers with path lookup, solid-level geometry queries (volume,
//! containment, adjacency), the stitching driver that makes adjacent solids
//! share exact boundaries, transparent-interface discovery with an explicit
//! caller-owned cache, render-mesh extraction, and the B3D JSON format.

pub mod b3d;
pub mod building;
pub mod error;
pub mod mesh;
pub mod solid;
pub mod stitch;
pub mod transparent;
pub mod wall;
pub mod zone;

pub use b3d::{from_b3d_string, load_b3d, save_b3d, to_b3d_string, BuildingSnapshot};
pub use building::{Building, PathTarget};
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use solid::Solid;
pub use stitch::{stitch_adjacent_solids, stitch_solids};
pub use transparent::{find_transparent_polygons, TransparentCache};
pub use wall::Wall;
pub use zone::Zone;
