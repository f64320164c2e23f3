//! Heuristic-ordered depth-first path search.
//!
//! The search walks the graph depth-first from the start node. At every
//! node the outgoing connections are tried in ascending order of
//! `cost + straight-line distance to the goal`, so the first branch explored
//! tends to head towards the goal. A node is entered at most once per query.
//!
//! This finds *a* path whenever the goal is reachable, but not necessarily
//! the shortest one.
//!
//! # Path shape
//!
//! The returned path is a list of [`Connection`]s from the start node to the
//! goal node. When start and goal are the same node the path is the single
//! entry connection [`Connection::entry`] for that node.

use std::time::Instant;
use std::vec;

use waypoint_types::{Connection, Node, SearchStats};

use crate::heuristics::ordering_key;

/// One level of the explicit DFS stack.
struct Frame {
    children: vec::IntoIter<Connection>,
}

/// Depth-first search over a slice of connected nodes.
///
/// # Example
///
/// ```
/// use waypoint_graph::search::DepthFirstSearch;
/// use waypoint_types::{Connection, ConnectionKind, Node};
/// use nalgebra::Point3;
///
/// let nodes = vec![
///     Node::new(Point3::origin())
///         .with_connections(vec![Connection::new(0, 1, 5.0, ConnectionKind::Open)]),
///     Node::new(Point3::new(5.0, 0.0, 0.0)).with_connections(vec![
///         Connection::new(1, 0, 5.0, ConnectionKind::Open),
///         Connection::new(1, 2, 5.0, ConnectionKind::Open),
///     ]),
///     Node::new(Point3::new(10.0, 0.0, 0.0))
///         .with_connections(vec![Connection::new(2, 1, 5.0, ConnectionKind::Open)]),
/// ];
///
/// let (path, stats) = DepthFirstSearch::new(&nodes).search(0, 2);
/// assert!(stats.found);
/// assert_eq!(path.len(), 2);
/// assert_eq!(path[0].end_index, 1);
/// assert_eq!(path[1].end_index, 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DepthFirstSearch<'a> {
    nodes: &'a [Node],
}

impl<'a> DepthFirstSearch<'a> {
    /// Creates a search over `nodes`.
    #[must_use]
    pub const fn new(nodes: &'a [Node]) -> Self {
        Self { nodes }
    }

    /// Searches for a path from node `start` to node `goal`.
    ///
    /// Returns an empty path if either index is out of range or the goal is
    /// unreachable.
    #[must_use]
    pub fn search(&self, start: usize, goal: usize) -> (Vec<Connection>, SearchStats) {
        let start_time = Instant::now();
        let mut stats = SearchStats::default();

        if start >= self.nodes.len() || goal >= self.nodes.len() {
            stats.elapsed = start_time.elapsed();
            return (Vec::new(), stats);
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut path = vec![Connection::entry(start)];
        let mut stack = vec![self.enter(start, goal, &mut visited, &mut stats)];

        while !stack.is_empty() {
            if path.last().is_some_and(|c| c.end_index == goal) {
                stats.found = true;
                break;
            }

            let next = stack
                .last_mut()
                .and_then(|frame| frame.children.by_ref().find(|c| !visited[c.end_index]));

            if let Some(child) = next {
                path.push(child);
                let frame = self.enter(child.end_index, goal, &mut visited, &mut stats);
                stack.push(frame);
            } else {
                stack.pop();
                path.pop();
            }
        }

        // The entry connection only marks where the walk began
        if path.len() > 1 {
            path.remove(0);
        }

        stats.elapsed = start_time.elapsed();
        (path, stats)
    }

    /// Marks `index` visited and returns its children in search order.
    fn enter(
        &self,
        index: usize,
        goal: usize,
        visited: &mut [bool],
        stats: &mut SearchStats,
    ) -> Frame {
        visited[index] = true;
        stats.nodes_expanded += 1;

        let goal_position = self.nodes[goal].position;
        let mut children: Vec<(Connection, f64)> = Vec::new();

        for connection in &self.nodes[index].connections {
            stats.edges_examined += 1;
            match self.nodes.get(connection.end_index) {
                Some(target) => {
                    let key = ordering_key(connection, &target.position, &goal_position);
                    children.push((*connection, key));
                }
                None => stats.dangling_edges += 1,
            }
        }

        children.sort_by(|a, b| a.1.total_cmp(&b.1));

        Frame {
            children: children
                .into_iter()
                .map(|(c, _)| c)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}
