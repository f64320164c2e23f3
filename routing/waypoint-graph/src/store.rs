//! The node store: the only mutable state of a waypoint graph.
//!
//! Nodes are addressed by index. Every structural edit (insert, remove,
//! clear) and every move marks the store dirty, because stored connection
//! indices and costs no longer describe the node set. Only a rebuild (or
//! loading a trusted layout) makes the store clean again.
//!
//! # Example
//!
//! ```
//! use waypoint_graph::GraphStore;
//! use nalgebra::Point3;
//!
//! let mut store = GraphStore::new();
//! store.push(Point3::origin());
//! store.push(Point3::new(5.0, 0.0, 0.0));
//! assert!(store.is_dirty());
//!
//! // Out-of-range lookups are not errors
//! assert!(store.get(1).is_some());
//! assert!(store.get(7).is_none());
//! ```

use nalgebra::{Point3, Vector3};
use tracing::warn;
use waypoint_types::{Node, WaypointError};

/// Ordered node collection with a staleness flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    nodes: Vec<Node>,
    dirty: bool,
}

impl GraphStore {
    /// Creates an empty, clean store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clean store from nodes whose connections are trusted.
    #[must_use]
    pub const fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            dirty: false,
        }
    }

    /// Returns the node at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns all nodes in index order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the store holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if nodes changed since connections were last computed.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Appends an unconnected node exactly at `position` and returns its index.
    pub fn push(&mut self, position: Point3<f64>) -> usize {
        self.nodes.push(Node::new(position));
        self.dirty = true;
        self.nodes.len() - 1
    }

    /// Removes the node at `index`, shifting later nodes down by one.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NodeOutOfRange`] if `index` does not exist.
    pub fn remove(&mut self, index: usize) -> Result<Node, WaypointError> {
        if self.nodes.is_empty() {
            warn!(index, "No nodes to remove");
        }
        self.check_index(index)?;
        self.dirty = true;
        Ok(self.nodes.remove(index))
    }

    /// Removes every node within `radius` (inclusive) of `center`.
    ///
    /// Returns the number of nodes removed.
    pub fn remove_within_radius(&mut self, center: &Point3<f64>, radius: f64) -> usize {
        if self.nodes.is_empty() {
            warn!("No nodes to remove");
            return 0;
        }

        let before = self.nodes.len();
        self.nodes.retain(|n| n.distance_to(center) > radius);
        let removed = before - self.nodes.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.dirty = true;
    }

    /// Moves a node to a new position.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NodeOutOfRange`] if `index` does not exist.
    pub fn set_position(
        &mut self,
        index: usize,
        position: Point3<f64>,
    ) -> Result<(), WaypointError> {
        self.check_index(index)?;
        self.nodes[index].position = position;
        self.dirty = true;
        Ok(())
    }

    /// Moves every listed node by `offset`.
    ///
    /// Indices are validated before anything moves; duplicates move once.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NodeOutOfRange`] for the first invalid index.
    pub fn translate(
        &mut self,
        indices: &[usize],
        offset: &Vector3<f64>,
    ) -> Result<(), WaypointError> {
        for &index in indices {
            self.check_index(index)?;
        }

        let mut moved = vec![false; self.nodes.len()];
        for &index in indices {
            if !std::mem::replace(&mut moved[index], true) {
                self.nodes[index].position += *offset;
            }
        }

        if !indices.is_empty() {
            self.dirty = true;
        }
        Ok(())
    }

    /// Returns the indices of nodes within `radius` (inclusive) of `center`.
    #[must_use]
    pub fn indices_within_radius(&self, center: &Point3<f64>, radius: f64) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.distance_to(center) <= radius)
            .map(|(i, _)| i)
            .collect()
    }

    /// Gives the rebuild mutable access to connection sets.
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn check_index(&self, index: usize) -> Result<(), WaypointError> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(WaypointError::NodeOutOfRange {
                index,
                len: self.nodes.len(),
            })
        }
    }
}
