// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model operations.

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating the building hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A geometry-kernel error.
    #[error(transparent)]
    Geometry(#[from] b3d_geometry::Error),

    /// A member name is already taken inside its container.
    #[error("name already used: {0}")]
    DuplicateName(String),

    /// A named member does not exist.
    #[error("no such member: {0}")]
    NotFound(String),

    /// A path did not resolve to a zone, solid, wall or polygon.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
