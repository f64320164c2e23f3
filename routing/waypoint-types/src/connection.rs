//! Directed, classified edges between waypoint nodes.

/// Traversability class of a candidate connection.
///
/// # Example
///
/// ```
/// use waypoint_types::ConnectionKind;
///
/// assert!(ConnectionKind::Open.is_traversable());
/// assert!(ConnectionKind::Conditional.is_traversable());
/// assert!(!ConnectionKind::Blocked.is_traversable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionKind {
    /// Obstructed by something that is not a moving obstacle.
    ///
    /// Blocked candidates are discarded during rebuild and never stored.
    Blocked,
    /// Free to move: nothing solid lies between the nodes.
    Open,
    /// Obstructed only by moving obstacles (doors, platforms), so the edge
    /// may become traversable later.
    Conditional,
}

impl ConnectionKind {
    /// Returns `true` for kinds that are stored in the graph.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

/// A directed edge from one node to another.
///
/// Indices refer to positions in the graph's node list as of the last
/// rebuild. For traversal, two connections are the same edge when they
/// share an [`end_index`](Self::end_index); `start_index` is informational.
///
/// # Example
///
/// ```
/// use waypoint_types::{Connection, ConnectionKind};
///
/// let a = Connection::new(0, 2, 4.0, ConnectionKind::Open);
/// let b = Connection::new(1, 2, 3.0, ConnectionKind::Conditional);
/// assert!(a.same_target(&b));
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    /// Index of the node the edge leaves from.
    pub start_index: usize,
    /// Index of the node the edge arrives at.
    pub end_index: usize,
    /// Euclidean distance between the endpoints at rebuild time.
    pub cost: f64,
    /// Traversability class.
    pub kind: ConnectionKind,
}

impl Connection {
    /// Creates a new connection.
    #[must_use]
    pub const fn new(
        start_index: usize,
        end_index: usize,
        cost: f64,
        kind: ConnectionKind,
    ) -> Self {
        Self {
            start_index,
            end_index,
            cost,
            kind,
        }
    }

    /// Creates the zero-cost stub used to enter the graph at `node`.
    ///
    /// Both endpoints refer to `node`.
    #[must_use]
    pub const fn entry(node: usize) -> Self {
        Self::new(node, node, 0.0, ConnectionKind::Open)
    }

    /// Returns `true` if both connections lead to the same node.
    #[must_use]
    pub const fn same_target(&self, other: &Self) -> bool {
        self.end_index == other.end_index
    }

    /// Returns `true` if this edge may be blocked by a moving obstacle.
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        matches!(self.kind, ConnectionKind::Conditional)
    }
}
