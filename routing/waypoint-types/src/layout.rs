//! Flat, index-addressed persisted form of a waypoint graph.
//!
//! The layout is an ordered list of nodes, each carrying its position and
//! its outgoing connections as `{ end_index, cost, kind }`. There is no
//! separate edge table; the start of each connection is implied by the node
//! that owns it.
//!
//! # Example
//!
//! ```
//! use waypoint_types::{Connection, ConnectionKind, GraphLayout, Node};
//! use nalgebra::Point3;
//!
//! let nodes = vec![
//!     Node::new(Point3::origin())
//!         .with_connections(vec![Connection::new(0, 1, 2.0, ConnectionKind::Open)]),
//!     Node::new(Point3::new(2.0, 0.0, 0.0)),
//! ];
//!
//! let layout = GraphLayout::from_nodes(&nodes);
//! assert_eq!(layout.nodes[0].connections[0].end_index, 1);
//!
//! let restored = layout.into_nodes().unwrap();
//! assert_eq!(restored, nodes);
//! ```

use nalgebra::Point3;

use crate::connection::{Connection, ConnectionKind};
use crate::error::WaypointError;
use crate::node::Node;

/// A stored outgoing connection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionLayout {
    /// Index of the target node.
    pub end_index: usize,
    /// Edge cost.
    pub cost: f64,
    /// Traversability class.
    pub kind: ConnectionKind,
}

/// A stored node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeLayout {
    /// World position.
    pub position: Point3<f64>,
    /// Outgoing connections.
    #[cfg_attr(feature = "serde", serde(default))]
    pub connections: Vec<ConnectionLayout>,
}

/// A complete stored graph.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphLayout {
    /// Nodes in index order.
    pub nodes: Vec<NodeLayout>,
}

impl GraphLayout {
    /// Captures a node list.
    #[must_use]
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let nodes = nodes
            .iter()
            .map(|node| NodeLayout {
                position: node.position,
                connections: node
                    .connections
                    .iter()
                    .map(|c| ConnectionLayout {
                        end_index: c.end_index,
                        cost: c.cost,
                        kind: c.kind,
                    })
                    .collect(),
            })
            .collect();
        Self { nodes }
    }

    /// Returns the number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Restores the node list, re-deriving each connection's start index.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidLayout`] if a position is not finite,
    /// or a connection points outside the node list, at its own node, has a
    /// negative or non-finite cost, or is [`ConnectionKind::Blocked`].
    pub fn into_nodes(self) -> Result<Vec<Node>, WaypointError> {
        let len = self.nodes.len();

        self.nodes
            .into_iter()
            .enumerate()
            .map(|(index, stored)| {
                if !stored.position.iter().all(|v| v.is_finite()) {
                    return Err(WaypointError::invalid_layout(format!(
                        "node {index} has a non-finite position"
                    )));
                }

                let connections = stored
                    .connections
                    .into_iter()
                    .map(|c| restore_connection(index, len, c))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Node::new(stored.position).with_connections(connections))
            })
            .collect()
    }
}

fn restore_connection(
    start: usize,
    len: usize,
    stored: ConnectionLayout,
) -> Result<Connection, WaypointError> {
    if stored.end_index >= len {
        return Err(WaypointError::invalid_layout(format!(
            "node {start} connects to index {} but only {len} nodes exist",
            stored.end_index
        )));
    }
    if stored.end_index == start {
        return Err(WaypointError::invalid_layout(format!(
            "node {start} connects to itself"
        )));
    }
    if !stored.cost.is_finite() || stored.cost < 0.0 {
        return Err(WaypointError::invalid_layout(format!(
            "node {start} has invalid cost {}",
            stored.cost
        )));
    }
    if !stored.kind.is_traversable() {
        return Err(WaypointError::invalid_layout(format!(
            "node {start} stores a blocked connection"
        )));
    }
    Ok(Connection::new(start, stored.end_index, stored.cost, stored.kind))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn two_nodes() -> GraphLayout {
        GraphLayout {
            nodes: vec![
                NodeLayout {
                    position: Point3::origin(),
                    connections: vec![ConnectionLayout {
                        end_index: 1,
                        cost: 1.0,
                        kind: ConnectionKind::Conditional,
                    }],
                },
                NodeLayout {
                    position: Point3::new(1.0, 0.0, 0.0),
                    connections: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn test_restore_sets_start_index() {
        let nodes = two_nodes().into_nodes().unwrap();
        assert_eq!(nodes[0].connections[0].start_index, 0);
        assert_eq!(nodes[0].connections[0].end_index, 1);
        assert!(nodes[0].connections[0].is_conditional());
    }

    #[test]
    fn test_rejects_dangling_index() {
        let mut layout = two_nodes();
        layout.nodes[0].connections[0].end_index = 5;
        let err = layout.into_nodes().unwrap_err();
        assert!(matches!(err, WaypointError::InvalidLayout(_)));
        assert!(err.to_string().contains("index 5"));
    }

    #[test]
    fn test_rejects_self_loop() {
        let mut layout = two_nodes();
        layout.nodes[0].connections[0].end_index = 0;
        assert!(layout.into_nodes().is_err());
    }

    #[test]
    fn test_rejects_blocked_kind() {
        let mut layout = two_nodes();
        layout.nodes[0].connections[0].kind = ConnectionKind::Blocked;
        assert!(layout.into_nodes().is_err());
    }

    #[test]
    fn test_rejects_bad_cost() {
        let mut layout = two_nodes();
        layout.nodes[0].connections[0].cost = f64::NAN;
        assert!(layout.into_nodes().is_err());
    }

    #[test]
    fn test_rejects_non_finite_position() {
        let mut layout = two_nodes();
        layout.nodes[1].position.x = f64::INFINITY;
        assert!(layout.into_nodes().is_err());
    }

    #[test]
    fn test_empty_layout() {
        let layout = GraphLayout::default();
        assert!(layout.is_empty());
        assert!(layout.into_nodes().unwrap().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&two_nodes()).unwrap();
        assert!(json.contains("\"end_index\":1"));
        assert!(json.contains("\"Conditional\""));

        let parsed: GraphLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, two_nodes());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_missing_connections_defaults_empty() {
        let parsed: GraphLayout =
            serde_json::from_str(r#"{"nodes":[{"position":[1.0,2.0,3.0]}]}"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed.nodes[0].connections.is_empty());
    }
}
