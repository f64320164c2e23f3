//! The waypoint graph owner: configuration plus an optional node store.
//!
//! [`WaypointGraph`] is the entry point for editing, rebuilding and
//! querying. Edits and queries on a graph with no bound store fail with
//! [`WaypointError::NoGraphBound`] and change nothing.
//!
//! # Staleness
//!
//! Removing a node shifts the index of every later node, so connections
//! computed before the removal may point at the wrong node. Any structural
//! edit or move marks the graph dirty, and [`WaypointGraph::resolve`] and
//! [`WaypointGraph::query_path`] refuse to run with
//! [`WaypointError::GraphDirty`] until [`WaypointGraph::rebuild`] is called.
//! [`WaypointGraph::to_layout`] refuses a dirty graph too, since a reloaded
//! layout starts clean.
//! An empty graph is never refused: queries on it return empty results.

use std::ops::Range;
use std::time::Instant;

use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};
use waypoint_spatial::CollisionOracle;
use waypoint_types::{
    BuildStats, Connection, GraphLayout, Node, SearchStats, WaypointConfig, WaypointError,
};

use crate::builder::ConnectivityBuilder;
use crate::bulk::BulkRegion;
use crate::resolver::ClosestNodeResolver;
use crate::search::DepthFirstSearch;
use crate::store::GraphStore;

/// A navigable waypoint graph.
///
/// # Example
///
/// ```
/// use waypoint_graph::WaypointGraph;
/// use waypoint_spatial::ColliderWorld;
/// use waypoint_types::WaypointConfig;
/// use nalgebra::Point3;
///
/// let world = ColliderWorld::new();
/// let config = WaypointConfig::default()
///     .with_max_connection_distance(6.0)
///     .with_vertical_offset(0.0);
///
/// let mut graph = WaypointGraph::new(config);
/// graph.add_node(Point3::new(0.0, 0.0, 0.0)).unwrap();
/// graph.add_node(Point3::new(5.0, 0.0, 0.0)).unwrap();
/// graph.add_node(Point3::new(10.0, 0.0, 0.0)).unwrap();
/// graph.rebuild(&world).unwrap();
///
/// let path = graph
///     .query_path(&world, &Point3::new(0.0, 0.0, 0.0), &Point3::new(10.0, 0.0, 0.0))
///     .unwrap();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path[1].end_index, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointGraph {
    config: WaypointConfig,
    store: Option<GraphStore>,
}

impl WaypointGraph {
    /// Creates a graph with an empty bound store.
    #[must_use]
    pub fn new(config: WaypointConfig) -> Self {
        Self {
            config,
            store: Some(GraphStore::new()),
        }
    }

    /// Creates a graph with no bound store.
    #[must_use]
    pub const fn unbound(config: WaypointConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Loads a persisted layout.
    ///
    /// The stored connections are trusted as-is, so the graph starts clean.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidLayout`] if the layout is malformed.
    pub fn from_layout(config: WaypointConfig, layout: GraphLayout) -> Result<Self, WaypointError> {
        let nodes = layout.into_nodes()?;
        debug!(nodes = nodes.len(), "Loaded waypoint layout");
        Ok(Self {
            config,
            store: Some(GraphStore::from_nodes(nodes)),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WaypointConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Existing connections keep the old settings until the next rebuild.
    pub fn set_config(&mut self, config: WaypointConfig) {
        self.config = config;
    }

    /// Binds a node store, returning the previously bound one.
    pub fn bind(&mut self, store: GraphStore) -> Option<GraphStore> {
        self.store.replace(store)
    }

    /// Detaches and returns the bound node store.
    pub fn unbind(&mut self) -> Option<GraphStore> {
        self.store.take()
    }

    /// Returns `true` if a node store is bound.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the bound node store.
    #[must_use]
    pub const fn store(&self) -> Option<&GraphStore> {
        self.store.as_ref()
    }

    /// Returns the node at `index`, or `None` if unbound or out of range.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.store.as_ref().and_then(|s| s.get(index))
    }

    /// Returns all nodes in index order (empty if unbound).
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        match &self.store {
            Some(store) => store.nodes(),
            None => &[],
        }
    }

    /// Returns the number of nodes (zero if unbound).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    /// Returns `true` if the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// Returns `true` if the graph was edited since the last rebuild.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.store.as_ref().is_some_and(GraphStore::is_dirty)
    }

    // ---------------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------------

    /// Adds a node at `position` raised by the configured vertical offset.
    ///
    /// Returns the index of the new node.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound.
    pub fn add_node(&mut self, position: Point3<f64>) -> Result<usize, WaypointError> {
        let raised = position + Vector3::z() * self.config.vertical_offset();
        let index = self.store_mut()?.push(raised);
        debug!(index, x = raised.x, y = raised.y, z = raised.z, "Added waypoint node");
        Ok(index)
    }

    /// Removes the node at `index`. Later nodes shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound, or
    /// [`WaypointError::NodeOutOfRange`] if `index` does not exist.
    pub fn remove_node(&mut self, index: usize) -> Result<Node, WaypointError> {
        self.store_mut()?.remove(index).inspect_err(|e| {
            warn!(index, error = %e, "Node removal failed");
        })
    }

    /// Removes every node within `radius` (inclusive) of `center`.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound.
    pub fn remove_nodes_within_radius(
        &mut self,
        center: &Point3<f64>,
        radius: f64,
    ) -> Result<usize, WaypointError> {
        let removed = self.store_mut()?.remove_within_radius(center, radius);
        debug!(removed, radius, "Removed waypoint nodes");
        Ok(removed)
    }

    /// Removes every node within the configured removal brush radius.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound.
    pub fn remove_nodes_within_brush(
        &mut self,
        center: &Point3<f64>,
    ) -> Result<usize, WaypointError> {
        let radius = self.config.removal_brush_radius();
        self.remove_nodes_within_radius(center, radius)
    }

    /// Removes every node.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound.
    pub fn clear(&mut self) -> Result<(), WaypointError> {
        self.store_mut()?.clear();
        Ok(())
    }

    /// Moves a node to exactly `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound, or
    /// [`WaypointError::NodeOutOfRange`] if `index` does not exist.
    pub fn move_node(&mut self, index: usize, position: Point3<f64>) -> Result<(), WaypointError> {
        self.store_mut()?.set_position(index, position)
    }

    /// Moves every listed node by `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound, or
    /// [`WaypointError::NodeOutOfRange`] if any index does not exist (in
    /// which case nothing moves).
    pub fn translate_nodes(
        &mut self,
        indices: &[usize],
        offset: &Vector3<f64>,
    ) -> Result<(), WaypointError> {
        self.store_mut()?.translate(indices, offset)
    }

    /// Adds a node on every lattice point of `region`, spaced by the
    /// configured bulk spacing.
    ///
    /// Nodes are placed exactly on the lattice points. Returns the index
    /// range of the new nodes.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound.
    pub fn bulk_fill(&mut self, region: &BulkRegion) -> Result<Range<usize>, WaypointError> {
        let points = region.lattice_points(self.config.bulk_spacing());
        let store = self.store_mut()?;
        let first = store.len();
        for point in points {
            store.push(point);
        }
        let range = first..store.len();
        debug!(added = range.len(), "Bulk placed waypoint nodes");
        Ok(range)
    }

    /// Returns the indices of nodes within `radius` (inclusive) of `center`.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound.
    pub fn nodes_within_radius(
        &self,
        center: &Point3<f64>,
        radius: f64,
    ) -> Result<Vec<usize>, WaypointError> {
        Ok(self.store_ref()?.indices_within_radius(center, radius))
    }

    // ---------------------------------------------------------------------
    // Connectivity
    // ---------------------------------------------------------------------

    /// Recomputes every node's connections against `oracle` and clears the
    /// dirty flag.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound.
    pub fn rebuild<O: CollisionOracle + ?Sized>(
        &mut self,
        oracle: &O,
    ) -> Result<BuildStats, WaypointError> {
        let store = self.store.as_mut().ok_or(WaypointError::NoGraphBound)?;
        let stats = ConnectivityBuilder::new(&self.config, oracle).build(store.nodes_mut());
        store.mark_clean();
        Ok(stats)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Returns the closest node with line of sight to `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound, or
    /// [`WaypointError::GraphDirty`] if a non-empty graph needs a rebuild.
    pub fn resolve<O: CollisionOracle + ?Sized>(
        &self,
        oracle: &O,
        position: &Point3<f64>,
    ) -> Result<Option<usize>, WaypointError> {
        let nodes = self.queryable_nodes()?;
        Ok(ClosestNodeResolver::new(nodes, oracle, &self.config).resolve(position))
    }

    /// Finds a path between the nodes closest to `start` and `end`.
    ///
    /// Returns an empty path if the graph is empty, either endpoint has no
    /// visible node, or the goal is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound, or
    /// [`WaypointError::GraphDirty`] if a non-empty graph needs a rebuild.
    pub fn query_path<O: CollisionOracle + ?Sized>(
        &self,
        oracle: &O,
        start: &Point3<f64>,
        end: &Point3<f64>,
    ) -> Result<Vec<Connection>, WaypointError> {
        self.query_path_with_stats(oracle, start, end).map(|(path, _)| path)
    }

    /// Like [`query_path`](Self::query_path), also returning search statistics.
    ///
    /// # Errors
    ///
    /// Same as [`query_path`](Self::query_path).
    pub fn query_path_with_stats<O: CollisionOracle + ?Sized>(
        &self,
        oracle: &O,
        start: &Point3<f64>,
        end: &Point3<f64>,
    ) -> Result<(Vec<Connection>, SearchStats), WaypointError> {
        let start_time = Instant::now();
        let nodes = self.queryable_nodes()?;

        let resolver = ClosestNodeResolver::new(nodes, oracle, &self.config);
        let endpoints = resolver.resolve(start).zip(resolver.resolve(end));

        let (path, mut stats) = match endpoints {
            Some((from, to)) => DepthFirstSearch::new(nodes).search(from, to),
            None => (Vec::new(), SearchStats::default()),
        };

        stats.elapsed = start_time.elapsed();
        debug!(
            path_len = path.len(),
            nodes_expanded = stats.nodes_expanded,
            elapsed_us = stats.elapsed.as_micros(),
            "Path query finished"
        );

        Ok((path, stats))
    }

    /// Returns the node positions an agent should visit along `path`.
    ///
    /// Connections whose target no longer exists are skipped.
    #[must_use]
    pub fn path_points(&self, path: &[Connection]) -> Vec<Point3<f64>> {
        path.iter()
            .filter_map(|c| self.node(c.end_index))
            .map(|n| n.position)
            .collect()
    }

    /// Returns the summed connection cost of `path`.
    #[must_use]
    pub fn path_cost(path: &[Connection]) -> f64 {
        path.iter().map(|c| c.cost).sum()
    }

    /// Captures the nodes and connections for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound, or
    /// [`WaypointError::GraphDirty`] if a non-empty graph needs a rebuild.
    pub fn to_layout(&self) -> Result<GraphLayout, WaypointError> {
        Ok(GraphLayout::from_nodes(self.queryable_nodes()?))
    }

    fn store_ref(&self) -> Result<&GraphStore, WaypointError> {
        self.store.as_ref().ok_or(WaypointError::NoGraphBound)
    }

    fn store_mut(&mut self) -> Result<&mut GraphStore, WaypointError> {
        self.store.as_mut().ok_or(WaypointError::NoGraphBound)
    }

    /// Nodes safe to query or persist: bound, and clean unless empty.
    fn queryable_nodes(&self) -> Result<&[Node], WaypointError> {
        let store = self.store_ref()?;
        if store.is_dirty() && !store.is_empty() {
            return Err(WaypointError::GraphDirty);
        }
        Ok(store.nodes())
    }
}
