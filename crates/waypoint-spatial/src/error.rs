//! Error types for spatial operations.

use crate::world::ColliderId;

/// Errors that can occur during spatial operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// No collider with this id exists in the world.
    #[error("collider {0:?} does not exist")]
    UnknownCollider(ColliderId),

    /// A shape was given a non-finite coordinate or size.
    #[error("shape has non-finite geometry")]
    NonFiniteShape,

    /// A layer index outside `0..32` was used.
    #[error("layer {0} is out of range (expected 0..32)")]
    InvalidLayer(u8),
}
