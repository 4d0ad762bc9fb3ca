// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry operations.

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry operations.
///
/// Invalid-input variants (`TooFewPoints`, `PointsNotCoplanar`,
/// `TooFewSlicingPoints`, `SlicingPointOutside`) are recoverable: callers
/// driving stitching treat them as "operation skipped".
/// `UnsupportedSliceTopology` signals a gap in the slicing case dispatch and
/// must never be swallowed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation needs more points than it was given.
    #[error("at least 3 points required, got {0}")]
    TooFewPoints(usize),

    /// Polygon construction received points that do not share a plane.
    #[error("points are not coplanar")]
    PointsNotCoplanar,

    /// All point triples in a loop are collinear, so no normal exists.
    #[error("no non-degenerate point triple in the loop")]
    NoNondegenerateTriple,

    /// Ear clipping got stuck with vertices remaining.
    #[error("no valid ear found with {0} vertices remaining")]
    NoEarFound(usize),

    /// A supplied triangulation references a vertex index out of range.
    #[error("triangle index {index} out of range for {points} points")]
    TriangleIndexOutOfRange { index: usize, points: usize },

    /// Fewer than 2 usable slicing points remained after cleanup.
    #[error("at least 2 slicing points required, got {0}")]
    TooFewSlicingPoints(usize),

    /// A slicing point lies strictly outside the polygon.
    #[error("slicing point {0:?} lies outside the polygon")]
    SlicingPointOutside([f64; 3]),

    /// The slicing chain touches the boundary in a configuration the case
    /// dispatch does not cover. Fatal: indicates malformed input or missing
    /// algorithm coverage, not bad data to skip.
    #[error("unsupported slice topology: {vertices} vertices and {edges} edges touched")]
    UnsupportedSliceTopology { vertices: usize, edges: usize },

    /// A reference point used for naming slice results matched neither result.
    #[error("reference point {0:?} is contained in neither slice result")]
    ReferencePointNotContained([f64; 3]),

    /// Not enough mutually-visible point pairs exist between two polygons.
    #[error("{requested} mutually-visible point pairs requested, only {found} exist")]
    NotEnoughVisiblePairs { requested: usize, found: usize },
}
