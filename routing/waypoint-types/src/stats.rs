//! Statistics reported by rebuild and path search.

use std::fmt;
use std::time::Duration;

/// Summary of one connectivity rebuild.
///
/// # Example
///
/// ```
/// use waypoint_types::BuildStats;
///
/// let stats = BuildStats { nodes: 3, open: 4, ..BuildStats::default() };
/// assert_eq!(stats.stored_connections(), 4);
/// println!("{stats}");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildStats {
    /// Nodes processed.
    pub nodes: usize,
    /// Nodes whose position overlapped solid geometry (left unconnected).
    pub overlapped: usize,
    /// Candidate pairs skipped for being too far apart.
    pub out_of_range: usize,
    /// Open connections stored.
    pub open: usize,
    /// Conditional connections stored.
    pub conditional: usize,
    /// Blocked candidates discarded.
    pub blocked: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl BuildStats {
    /// Returns the number of connections stored across all nodes.
    #[must_use]
    pub const fn stored_connections(&self) -> usize {
        self.open + self.conditional
    }
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rebuilt {} nodes: {} open, {} conditional, {} blocked, {} overlapped ({:?})",
            self.nodes, self.open, self.conditional, self.blocked, self.overlapped, self.elapsed
        )
    }
}

/// Summary of one path search.
///
/// # Example
///
/// ```
/// use waypoint_types::SearchStats;
///
/// let stats = SearchStats::default();
/// assert!(!stats.found);
/// assert_eq!(stats.nodes_expanded, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes entered by the depth-first search.
    pub nodes_expanded: usize,
    /// Outgoing connections examined.
    pub edges_examined: usize,
    /// Connections skipped because their target index no longer resolves.
    pub dangling_edges: usize,
    /// Whether a path to the goal was found.
    pub found: bool,
    /// Wall-clock time spent, including endpoint resolution.
    pub elapsed: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Search {}: {} nodes expanded, {} edges examined ({:?})",
            if self.found { "found a path" } else { "found no path" },
            self.nodes_expanded,
            self.edges_examined,
            self.elapsed
        )
    }
}
