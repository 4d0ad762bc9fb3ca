// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # B3D Geometry
//!
//! Polygon geometry engine for 3D building models: tolerance-based point and
//! vector predicates, ear-clipping triangulation, an immutable polygon type
//! with containment and distance queries, relational predicates between
//! polygons (facing, touching, crossing), and the polygon slicing engine that
//! partitions a polygon along a chain of boundary-respecting cut points.
//!
//! The crate is purely functional over immutable inputs: every operation is
//! synchronous, single-threaded and bounded by polygon vertex counts.

pub mod error;
pub mod point;
pub mod polygon;
pub mod predicates;
pub mod slice;
pub mod tolerance;
pub mod triangle;
pub mod triangulation;
pub mod vector;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use point::{
    are_points_collinear, are_points_coplanar, bounding_box, distance_point_to_edge,
    is_point_on_segment, points_equal, roll_points,
};
pub use polygon::Polygon;
pub use predicates::{
    are_polygons_crossing, are_polygons_facing, are_polygons_touching,
    find_closest_visible_pairs, segment_intersection, vertex_sets_match,
};
pub use slice::{
    locate_slicing_point, locate_slicing_points, remove_redundant_points, slice_polygon,
    PointLocation, SliceNames,
};
pub use tolerance::{ATOL, RTOL};
pub use triangle::{is_corner_convex, is_point_inside_triangle, triangle_area, triangle_centroid};
pub use triangulation::triangulate;
pub use vector::{
    are_vectors_antiparallel, are_vectors_parallel, is_undefined, newell_normal, normal,
};
