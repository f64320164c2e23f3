//! Spatial primitives and collision queries for waypoint navigation.
//!
//! This crate provides the geometry layer beneath the waypoint graph:
//!
//! - [`Segment`], [`Aabb`] and [`Sphere`] - primitives with segment-entry and
//!   overlap tests
//! - [`LayerMask`] and [`TriggerPolicy`] - query filters
//! - [`Collider`] and [`ColliderWorld`] - a tagged, layered set of obstacles
//! - [`CollisionOracle`] - the read-only query trait consumed by graph
//!   construction and path search
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. A game engine
//! integration implements [`CollisionOracle`] over its own physics scene;
//! [`ColliderWorld`] is the in-memory implementation used by tools and tests.
//!
//! # Coordinate Systems
//!
//! Right-handed, Z up:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! # Example
//!
//! ```
//! use waypoint_spatial::{
//!     Aabb, Collider, ColliderWorld, CollisionOracle, LayerMask, TriggerPolicy, MAX_SEGMENT_HITS,
//! };
//! use nalgebra::{Point3, Vector3};
//!
//! let mut world = ColliderWorld::new();
//! world.insert(Collider::aabb(Aabb::from_center(
//!     Point3::new(5.0, 0.0, 0.0),
//!     Vector3::new(0.5, 5.0, 5.0),
//! ))).unwrap();
//!
//! let a = Point3::origin();
//! let b = Point3::new(10.0, 0.0, 0.0);
//!
//! let hits = world.segment_hits(&a, &b, LayerMask::ALL, TriggerPolicy::Ignore, MAX_SEGMENT_HITS);
//! assert_eq!(hits.len(), 1);
//! assert!((hits[0].distance - 4.5).abs() < 1e-10);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod layer;
mod oracle;
mod shape;
mod world;

pub use error::SpatialError;
pub use layer::{LAYER_COUNT, LayerMask, TriggerPolicy};
pub use oracle::{ColliderHit, CollisionOracle, MAX_SEGMENT_HITS};
pub use shape::{Aabb, Segment, Sphere};
pub use world::{Collider, ColliderId, ColliderShape, ColliderWorld};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
