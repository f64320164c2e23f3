//! Error types for waypoint graph operations.
//!
//! This module defines the [`WaypointError`] enum. Note that an empty graph
//! or a query endpoint with no visible node are *not* errors: those produce
//! empty results.

/// Errors that can occur while editing or querying a waypoint graph.
///
/// # Example
///
/// ```
/// use waypoint_types::WaypointError;
///
/// let error = WaypointError::NodeOutOfRange { index: 7, len: 3 };
/// assert!(error.to_string().contains("out of range"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WaypointError {
    /// An operation was invoked on an owner with no backing node store.
    ///
    /// Bind a graph before editing or querying.
    #[error("no graph is bound")]
    NoGraphBound,

    /// The node set changed since the last rebuild.
    ///
    /// Stored connection indices may point at the wrong nodes until the
    /// connectivity is rebuilt.
    #[error("graph was edited since the last rebuild; rebuild before querying")]
    GraphDirty,

    /// A node index does not exist.
    #[error("node index {index} is out of range for {len} nodes")]
    NodeOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of nodes in the graph.
        len: usize,
    },

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A persisted layout could not be loaded.
    #[error("invalid graph layout: {0}")]
    InvalidLayout(String),

    /// A graph with this label is already registered.
    #[error("a graph labelled {0:?} is already registered")]
    DuplicateLabel(String),
}

impl WaypointError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint_types::WaypointError;
    ///
    /// let error = WaypointError::invalid_config("node radius must be positive");
    /// assert!(error.to_string().contains("node radius"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Creates an invalid layout error with the given message.
    #[must_use]
    pub fn invalid_layout(message: impl Into<String>) -> Self {
        Self::InvalidLayout(message.into())
    }

    /// Returns `true` if this is a [`WaypointError::NoGraphBound`] error.
    #[must_use]
    pub const fn is_no_graph_bound(&self) -> bool {
        matches!(self, Self::NoGraphBound)
    }

    /// Returns `true` if this is a [`WaypointError::GraphDirty`] error.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint_types::WaypointError;
    ///
    /// assert!(WaypointError::GraphDirty.is_graph_dirty());
    /// assert!(!WaypointError::NoGraphBound.is_graph_dirty());
    /// ```
    #[must_use]
    pub const fn is_graph_dirty(&self) -> bool {
        matches!(self, Self::GraphDirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_graph_bound_display() {
        let error = WaypointError::NoGraphBound;
        assert_eq!(error.to_string(), "no graph is bound");
        assert!(error.is_no_graph_bound());
    }

    #[test]
    fn test_graph_dirty_display() {
        let error = WaypointError::GraphDirty;
        assert!(error.to_string().contains("rebuild"));
        assert!(error.is_graph_dirty());
        assert!(!error.is_no_graph_bound());
    }

    #[test]
    fn test_out_of_range_display() {
        let msg = WaypointError::NodeOutOfRange { index: 4, len: 2 }.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_helpers() {
        let error = WaypointError::invalid_config("bad distance");
        assert!(matches!(error, WaypointError::InvalidConfig(msg) if msg == "bad distance"));

        let error = WaypointError::invalid_layout("dangling index");
        assert!(error.to_string().contains("dangling index"));
    }

    #[test]
    fn test_duplicate_label_display() {
        let error = WaypointError::DuplicateLabel("ground".to_string());
        assert!(error.to_string().contains("\"ground\""));
    }
}
