//! Waypoint nodes.

use nalgebra::Point3;

use crate::connection::Connection;

/// A placed point usable as a path waypoint, with its outgoing connections.
///
/// A node has no identity of its own: it is addressed by its index in the
/// owning graph.
///
/// # Example
///
/// ```
/// use waypoint_types::{Connection, ConnectionKind, Node};
/// use nalgebra::Point3;
///
/// let node = Node::new(Point3::new(1.0, 2.0, 0.3))
///     .with_connections(vec![Connection::new(0, 1, 2.5, ConnectionKind::Open)]);
///
/// assert_eq!(node.connections.len(), 1);
/// assert!(node.connection_to(1).is_some());
/// assert!(node.connection_to(2).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// World position.
    pub position: Point3<f64>,
    /// Outgoing connections, as produced by the last rebuild.
    pub connections: Vec<Connection>,
}

impl Node {
    /// Creates an unconnected node.
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            connections: Vec::new(),
        }
    }

    /// Replaces the connection set.
    #[must_use]
    pub fn with_connections(mut self, connections: Vec<Connection>) -> Self {
        self.connections = connections;
        self
    }

    /// Returns the outgoing connection leading to `end_index`, if any.
    #[must_use]
    pub fn connection_to(&self, end_index: usize) -> Option<&Connection> {
        self.connections.iter().find(|c| c.end_index == end_index)
    }

    /// Returns the Euclidean distance from this node to `point`.
    #[must_use]
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        nalgebra::distance(&self.position, point)
    }

    /// Returns `true` if the node has no outgoing connections.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.connections.is_empty()
    }
}
