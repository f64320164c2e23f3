//! Label-addressed collection of graphs.
//!
//! A scene may hold several independent graphs (ground units, flyers, ...).
//! The registry owns them and hands them out by the label set in each
//! graph's [`WaypointConfig`](waypoint_types::WaypointConfig).

use hashbrown::HashMap;
use tracing::debug;
use waypoint_types::WaypointError;

use crate::graph::WaypointGraph;

/// Owns graphs keyed by label.
///
/// # Example
///
/// ```
/// use waypoint_graph::{GraphRegistry, WaypointGraph};
/// use waypoint_types::WaypointConfig;
///
/// let mut registry = GraphRegistry::new();
/// registry
///     .register(WaypointGraph::new(WaypointConfig::default().with_label("ground")))
///     .unwrap();
///
/// assert!(registry.get("ground").is_some());
/// assert!(registry.get("air").is_none());
///
/// let graph = registry.unregister("ground").unwrap();
/// assert_eq!(graph.config().label(), "ground");
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphRegistry {
    graphs: HashMap<String, WaypointGraph>,
}

impl GraphRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a graph under its configured label.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::DuplicateLabel`] if the label is taken. The
    /// existing graph is left in place.
    pub fn register(&mut self, graph: WaypointGraph) -> Result<(), WaypointError> {
        let label = graph.config().label().to_owned();
        if self.graphs.contains_key(&label) {
            return Err(WaypointError::DuplicateLabel(label));
        }
        debug!(label = %label, "Registered waypoint graph");
        self.graphs.insert(label, graph);
        Ok(())
    }

    /// Removes and returns the graph with `label`.
    pub fn unregister(&mut self, label: &str) -> Option<WaypointGraph> {
        self.graphs.remove(label)
    }

    /// Returns the graph with `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&WaypointGraph> {
        self.graphs.get(label)
    }

    /// Returns the graph with `label` for editing.
    pub fn get_mut(&mut self, label: &str) -> Option<&mut WaypointGraph> {
        self.graphs.get_mut(label)
    }

    /// Returns `true` if a graph with `label` is registered.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.graphs.contains_key(label)
    }

    /// Returns the number of registered graphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Returns `true` if no graphs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Returns the registered labels in sorted order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.graphs.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use waypoint_types::WaypointConfig;

    fn graph(label: &str) -> WaypointGraph {
        WaypointGraph::new(WaypointConfig::default().with_label(label))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = GraphRegistry::new();
        registry.register(graph("ground")).unwrap();
        registry.register(graph("air")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("air"));
        assert_eq!(registry.labels(), vec!["air", "ground"]);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut registry = GraphRegistry::new();
        registry.register(graph("ground")).unwrap();
        registry
            .get_mut("ground")
            .unwrap()
            .add_node(Point3::origin())
            .unwrap();

        let err = registry.register(graph("ground")).unwrap_err();
        assert!(matches!(err, WaypointError::DuplicateLabel(ref l) if l == "ground"));
        // Original graph untouched
        assert_eq!(registry.get("ground").unwrap().len(), 1);
    }

    #[test]
    fn test_unregister() {
        let mut registry = GraphRegistry::new();
        registry.register(graph("ground")).unwrap();

        assert!(registry.unregister("ground").is_some());
        assert!(registry.unregister("ground").is_none());
        assert!(registry.get("ground").is_none());
    }

    #[test]
    fn test_empty_label_is_a_label() {
        let mut registry = GraphRegistry::new();
        registry.register(graph("")).unwrap();
        assert!(registry.contains(""));
        assert!(registry.register(graph("")).is_err());
    }
}
