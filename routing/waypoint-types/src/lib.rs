//! Core types for waypoint navigation graphs.
//!
//! This crate provides the data model shared by graph construction, editing
//! and path queries:
//!
//! - **Nodes and connections**: [`Node`], [`Connection`], [`ConnectionKind`]
//! - **Configuration**: [`WaypointConfig`]
//! - **Errors**: [`WaypointError`]
//! - **Persistence**: [`GraphLayout`], a flat index-addressed adjacency list
//! - **Statistics**: [`BuildStats`], [`SearchStats`]
//!
//! # Example
//!
//! ```
//! use waypoint_types::{Connection, ConnectionKind, GraphLayout, Node, WaypointConfig};
//! use nalgebra::Point3;
//!
//! let config = WaypointConfig::default()
//!     .with_label("ground")
//!     .with_max_connection_distance(6.0)
//!     .with_moving_obstacle_tag("Door");
//! assert!(config.validate().is_empty());
//!
//! let nodes = vec![
//!     Node::new(Point3::origin())
//!         .with_connections(vec![Connection::new(0, 1, 5.0, ConnectionKind::Open)]),
//!     Node::new(Point3::new(5.0, 0.0, 0.0))
//!         .with_connections(vec![Connection::new(1, 0, 5.0, ConnectionKind::Open)]),
//! ];
//!
//! let layout = GraphLayout::from_nodes(&nodes);
//! assert_eq!(layout.len(), 2);
//! ```
//!
//! # Feature Flags
//!
//! - `serde` (default): serialization for all types, including the layout

#![doc(html_root_url = "https://docs.rs/waypoint-types/0.7.0")]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod config;
pub mod connection;
pub mod error;
pub mod layout;
pub mod node;
pub mod stats;

// Re-export main types at crate root for convenience
pub use config::WaypointConfig;
pub use connection::{Connection, ConnectionKind};
pub use error::WaypointError;
pub use layout::{ConnectionLayout, GraphLayout, NodeLayout};
pub use node::Node;
pub use stats::{BuildStats, SearchStats};
