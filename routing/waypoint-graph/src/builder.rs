//! Full connectivity rebuild.
//!
//! Every node is checked against every other node (`O(N²)` candidate pairs,
//! one segment query per pair within range). The result replaces each
//! node's connection set wholesale; nothing is patched incrementally.
//!
//! A node whose overlap sphere touches solid geometry gets no outgoing
//! connections. Edges from *other* nodes pointing at it are left alone, so
//! connectivity can be asymmetric around such a node.

use std::time::Instant;

use nalgebra::Point3;
use tracing::{debug, info};
use waypoint_spatial::{CollisionOracle, MAX_SEGMENT_HITS};
use waypoint_types::{BuildStats, Connection, ConnectionKind, Node, WaypointConfig};

/// Recomputes connection sets from node positions and world geometry.
///
/// # Example
///
/// ```
/// use waypoint_graph::builder::ConnectivityBuilder;
/// use waypoint_spatial::ColliderWorld;
/// use waypoint_types::{ConnectionKind, Node, WaypointConfig};
/// use nalgebra::Point3;
///
/// let world = ColliderWorld::new();
/// let config = WaypointConfig::default().with_max_connection_distance(6.0);
/// let mut nodes = vec![
///     Node::new(Point3::origin()),
///     Node::new(Point3::new(5.0, 0.0, 0.0)),
///     Node::new(Point3::new(10.0, 0.0, 0.0)),
/// ];
///
/// let stats = ConnectivityBuilder::new(&config, &world).build(&mut nodes);
/// assert_eq!(stats.open, 4);
/// assert!(nodes[0].connection_to(2).is_none());
/// assert_eq!(nodes[1].connections[0].kind, ConnectionKind::Open);
/// ```
pub struct ConnectivityBuilder<'a, O: ?Sized> {
    config: &'a WaypointConfig,
    oracle: &'a O,
}

impl<'a, O: CollisionOracle + ?Sized> ConnectivityBuilder<'a, O> {
    /// Creates a builder over the given settings and oracle.
    #[must_use]
    pub const fn new(config: &'a WaypointConfig, oracle: &'a O) -> Self {
        Self { config, oracle }
    }

    /// Returns `true` if solid geometry overlaps the node sphere at `position`.
    #[must_use]
    pub fn is_overlapped(&self, position: &Point3<f64>) -> bool {
        !self
            .oracle
            .region_occupied(
                position,
                self.config.node_radius(),
                self.config.solidity_mask(),
                self.config.trigger_policy(),
            )
            .is_empty()
    }

    /// Classifies the straight segment between two positions.
    ///
    /// - nothing in the way: [`ConnectionKind::Open`]
    /// - only moving obstacles in the way: [`ConnectionKind::Conditional`]
    /// - anything else in the way: [`ConnectionKind::Blocked`]
    ///
    /// At most [`MAX_SEGMENT_HITS`] obstructions are examined.
    #[must_use]
    pub fn classify(&self, from: &Point3<f64>, to: &Point3<f64>) -> ConnectionKind {
        let hits = self.oracle.segment_hits(
            from,
            to,
            self.config.solidity_mask(),
            self.config.trigger_policy(),
            MAX_SEGMENT_HITS,
        );

        if hits.is_empty() {
            return ConnectionKind::Open;
        }

        match self.config.moving_obstacle_tag() {
            Some(tag) if hits.iter().all(|h| h.has_tag(tag)) => ConnectionKind::Conditional,
            _ => ConnectionKind::Blocked,
        }
    }

    /// Replaces every node's connection set.
    ///
    /// Connections are stored in ascending target index order. Running the
    /// build twice over unchanged geometry yields identical connections.
    pub fn build(&self, nodes: &mut [Node]) -> BuildStats {
        let start_time = Instant::now();
        let positions: Vec<Point3<f64>> = nodes.iter().map(|n| n.position).collect();
        let max_distance = self.config.max_connection_distance();

        let mut stats = BuildStats {
            nodes: nodes.len(),
            ..BuildStats::default()
        };

        for (i, node) in nodes.iter_mut().enumerate() {
            let origin = positions[i];

            if self.is_overlapped(&origin) {
                debug!(node = i, "Node overlaps solid geometry, leaving it unconnected");
                node.connections.clear();
                stats.overlapped += 1;
                continue;
            }

            let mut connections = Vec::new();
            for (j, target) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }

                let distance = nalgebra::distance(&origin, target);
                // NaN limit connects nothing
                let in_range = distance < max_distance;
                if !in_range {
                    stats.out_of_range += 1;
                    continue;
                }

                match self.classify(&origin, target) {
                    ConnectionKind::Blocked => stats.blocked += 1,
                    kind => {
                        if kind == ConnectionKind::Open {
                            stats.open += 1;
                        } else {
                            stats.conditional += 1;
                        }
                        connections.push(Connection::new(i, j, distance, kind));
                    }
                }
            }

            node.connections = connections;
        }

        stats.elapsed = start_time.elapsed();

        info!(
            nodes = stats.nodes,
            open = stats.open,
            conditional = stats.conditional,
            blocked = stats.blocked,
            overlapped = stats.overlapped,
            "Rebuilt waypoint connectivity"
        );

        stats
    }
}
