//! Distance heuristic used to order children during path search.
//!
//! The search is depth-first, so the heuristic never prunes anything. It
//! only decides which neighbour is tried first.
//!
//! # Example
//!
//! ```
//! use waypoint_graph::heuristics::{euclidean_distance, ordering_key};
//! use waypoint_types::{Connection, ConnectionKind};
//! use nalgebra::Point3;
//!
//! let target = Point3::new(3.0, 0.0, 0.0);
//! let goal = Point3::new(3.0, 4.0, 0.0);
//! assert!((euclidean_distance(&target, &goal) - 4.0).abs() < 1e-10);
//!
//! let edge = Connection::new(0, 1, 3.0, ConnectionKind::Open);
//! assert!((ordering_key(&edge, &target, &goal) - 7.0).abs() < 1e-10);
//! ```

use nalgebra::Point3;
use waypoint_types::Connection;

/// Straight-line distance between two points.
#[must_use]
pub fn euclidean_distance(from: &Point3<f64>, to: &Point3<f64>) -> f64 {
    nalgebra::distance(from, to)
}

/// Sort key for a child connection: edge cost plus the straight-line
/// distance from the child's node to the goal.
#[must_use]
pub fn ordering_key(connection: &Connection, target: &Point3<f64>, goal: &Point3<f64>) -> f64 {
    connection.cost + euclidean_distance(target, goal)
}
