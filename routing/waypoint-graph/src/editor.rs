//! Interactive editing with optional automatic rebuild.

use std::ops::Range;

use nalgebra::{Point3, Vector3};
use tracing::debug;
use waypoint_spatial::CollisionOracle;
use waypoint_types::{BuildStats, Node, WaypointError};

use crate::bulk::BulkRegion;
use crate::graph::WaypointGraph;

/// Pairs a graph with the world geometry it is edited against.
///
/// When the graph's configuration enables `auto_rebuild`, every successful
/// edit is followed by a full rebuild, so the graph is always queryable
/// between edits. With `auto_rebuild` off the session behaves like editing
/// the graph directly and [`EditSession::rebuild`] must be called by hand.
///
/// # Example
///
/// ```
/// use waypoint_graph::{EditSession, WaypointGraph};
/// use waypoint_spatial::ColliderWorld;
/// use waypoint_types::WaypointConfig;
/// use nalgebra::Point3;
///
/// let world = ColliderWorld::new();
/// let mut graph = WaypointGraph::new(WaypointConfig::default().with_auto_rebuild(true));
///
/// let mut session = EditSession::new(&mut graph, &world);
/// session.add_node(Point3::origin()).unwrap();
/// session.add_node(Point3::new(2.0, 0.0, 0.0)).unwrap();
///
/// assert!(!graph.is_dirty());
/// assert!(graph.node(0).unwrap().connection_to(1).is_some());
/// ```
pub struct EditSession<'g, O> {
    graph: &'g mut WaypointGraph,
    oracle: O,
    last_build: Option<BuildStats>,
}

impl<'g, O: CollisionOracle> EditSession<'g, O> {
    /// Starts a session editing `graph` against `oracle`.
    pub const fn new(graph: &'g mut WaypointGraph, oracle: O) -> Self {
        Self {
            graph,
            oracle,
            last_build: None,
        }
    }

    /// Returns the graph being edited.
    #[must_use]
    pub fn graph(&self) -> &WaypointGraph {
        self.graph
    }

    /// Returns statistics from the most recent rebuild in this session.
    #[must_use]
    pub const fn last_build(&self) -> Option<&BuildStats> {
        self.last_build.as_ref()
    }

    /// Rebuilds connectivity now.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoGraphBound`] if no store is bound.
    pub fn rebuild(&mut self) -> Result<BuildStats, WaypointError> {
        let stats = self.graph.rebuild(&self.oracle)?;
        self.last_build = Some(stats);
        Ok(stats)
    }

    /// See [`WaypointGraph::add_node`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the edit and the automatic rebuild.
    pub fn add_node(&mut self, position: Point3<f64>) -> Result<usize, WaypointError> {
        let index = self.graph.add_node(position)?;
        self.after_edit()?;
        Ok(index)
    }

    /// See [`WaypointGraph::remove_node`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the edit and the automatic rebuild.
    pub fn remove_node(&mut self, index: usize) -> Result<Node, WaypointError> {
        let node = self.graph.remove_node(index)?;
        self.after_edit()?;
        Ok(node)
    }

    /// See [`WaypointGraph::remove_nodes_within_brush`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the edit and the automatic rebuild.
    pub fn remove_nodes_within_brush(
        &mut self,
        center: &Point3<f64>,
    ) -> Result<usize, WaypointError> {
        let removed = self.graph.remove_nodes_within_brush(center)?;
        self.after_edit()?;
        Ok(removed)
    }

    /// See [`WaypointGraph::clear`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the edit and the automatic rebuild.
    pub fn clear(&mut self) -> Result<(), WaypointError> {
        self.graph.clear()?;
        self.after_edit()
    }

    /// See [`WaypointGraph::move_node`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the edit and the automatic rebuild.
    pub fn move_node(&mut self, index: usize, position: Point3<f64>) -> Result<(), WaypointError> {
        self.graph.move_node(index, position)?;
        self.after_edit()
    }

    /// See [`WaypointGraph::translate_nodes`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the edit and the automatic rebuild.
    pub fn translate_nodes(
        &mut self,
        indices: &[usize],
        offset: &Vector3<f64>,
    ) -> Result<(), WaypointError> {
        self.graph.translate_nodes(indices, offset)?;
        self.after_edit()
    }

    /// See [`WaypointGraph::bulk_fill`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the edit and the automatic rebuild.
    pub fn bulk_fill(&mut self, region: &BulkRegion) -> Result<Range<usize>, WaypointError> {
        let range = self.graph.bulk_fill(region)?;
        self.after_edit()?;
        Ok(range)
    }

    fn after_edit(&mut self) -> Result<(), WaypointError> {
        if self.graph.config().auto_rebuild() && self.graph.is_dirty() {
            debug!("Auto-rebuilding after edit");
            self.rebuild()?;
        }
        Ok(())
    }
}
