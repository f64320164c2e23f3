//! Waypoint graph construction, endpoint resolution and path search.
//!
//! This crate turns a set of hand-placed or bulk-placed waypoints into a
//! navigable graph and answers "how do I get from here to there" queries
//! against it, using the `waypoint-spatial` collision queries and the
//! `waypoint-types` data model.
//!
//! # Overview
//!
//! - **Graph owner** ([`WaypointGraph`]): editing, rebuild, queries and
//!   persistence over a bound [`GraphStore`]
//! - **Connectivity** ([`builder::ConnectivityBuilder`]): full `O(N²)`
//!   rebuild classifying each pair as open, conditional or blocked
//! - **Endpoint resolution** ([`resolver::ClosestNodeResolver`]): nearest
//!   node with line of sight to a world position
//! - **Path search** ([`search::DepthFirstSearch`]): depth-first search with
//!   children ordered by `cost + distance to goal`
//! - **Editing** ([`EditSession`], [`BulkRegion`]): automatic rebuild after
//!   edits, lattice placement
//! - **Registry** ([`GraphRegistry`]): several graphs addressed by label
//!
//! # Quick Start
//!
//! ```
//! use waypoint_graph::WaypointGraph;
//! use waypoint_spatial::{Aabb, Collider, ColliderWorld};
//! use waypoint_types::{ConnectionKind, WaypointConfig};
//! use nalgebra::{Point3, Vector3};
//!
//! // A door sits between the first two nodes
//! let mut world = ColliderWorld::new();
//! world.insert(
//!     Collider::aabb(Aabb::from_center(
//!         Point3::new(1.5, 0.0, 0.0),
//!         Vector3::new(0.1, 1.0, 1.0),
//!     ))
//!     .with_tag("Door"),
//! ).unwrap();
//!
//! let config = WaypointConfig::default()
//!     .with_max_connection_distance(5.0)
//!     .with_vertical_offset(0.0)
//!     .with_moving_obstacle_tag("Door");
//!
//! let mut graph = WaypointGraph::new(config);
//! graph.add_node(Point3::new(0.0, 0.0, 0.0)).unwrap();
//! graph.add_node(Point3::new(3.0, 0.0, 0.0)).unwrap();
//! graph.rebuild(&world).unwrap();
//!
//! let path = graph
//!     .query_path(&world, &Point3::new(-1.0, 0.0, 0.0), &Point3::new(4.0, 0.0, 0.0))
//!     .unwrap();
//! assert_eq!(path.len(), 1);
//! assert_eq!(path[0].kind, ConnectionKind::Conditional);
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: rebuild summaries at `info`, per-node
//! and per-query detail at `debug`, rejected edits at `warn`. No subscriber
//! is installed.

#![doc(html_root_url = "https://docs.rs/waypoint-graph/0.7.0")]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod builder;
pub mod bulk;
pub mod editor;
pub mod graph;
pub mod heuristics;
pub mod registry;
pub mod resolver;
pub mod search;
pub mod store;

// Re-export main types for convenience
pub use builder::ConnectivityBuilder;
pub use bulk::BulkRegion;
pub use editor::EditSession;
pub use graph::WaypointGraph;
pub use registry::GraphRegistry;
pub use resolver::ClosestNodeResolver;
pub use search::DepthFirstSearch;
pub use store::GraphStore;
