//! Configuration for waypoint graph construction, editing and queries.
//!
//! # Example
//!
//! ```
//! use waypoint_types::WaypointConfig;
//! use waypoint_spatial::{LayerMask, TriggerPolicy};
//!
//! let config = WaypointConfig::default()
//!     .with_max_connection_distance(6.0)
//!     .with_moving_obstacle_tag("Door")
//!     .with_solidity_mask(LayerMask::layer(0) | LayerMask::layer(4))
//!     .with_trigger_policy(TriggerPolicy::Ignore);
//!
//! assert!(config.validate().is_empty());
//! ```

use waypoint_spatial::{LayerMask, TriggerPolicy};

use crate::error::WaypointError;

/// Settings shared by rebuild, resolver, search and the editing operations.
///
/// # Example
///
/// ```
/// use waypoint_types::WaypointConfig;
///
/// let config = WaypointConfig::default();
/// assert!((config.max_connection_distance() - 3.0).abs() < 1e-10);
/// assert!(config.auto_rebuild());
/// assert!(config.moving_obstacle_tag().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WaypointConfig {
    /// Label under which the graph is registered.
    label: String,
    /// Node pairs at or beyond this distance are never connected.
    max_connection_distance: f64,
    /// Radius of the overlap sphere checked around each node at rebuild time.
    node_radius: f64,
    /// Radius used by brush removal.
    removal_brush_radius: f64,
    /// Tag identifying moving obstacles (doors, platforms).
    moving_obstacle_tag: Option<String>,
    /// Layers considered solid.
    solidity_mask: LayerMask,
    /// Whether trigger volumes count as solid.
    trigger_policy: TriggerPolicy,
    /// Upward bias applied to newly placed nodes.
    vertical_offset: f64,
    /// Whether edits trigger an immediate rebuild.
    auto_rebuild: bool,
    /// Lattice spacing used by bulk placement.
    bulk_spacing: f64,
}

impl WaypointConfig {
    /// Creates a configuration with default settings.
    ///
    /// Defaults:
    /// - Label: empty
    /// - Max connection distance: 3.0
    /// - Node radius: 0.25
    /// - Removal brush radius: 3.0
    /// - Moving obstacle tag: none
    /// - Solidity mask: all layers
    /// - Triggers: ignored
    /// - Vertical offset: 0.3
    /// - Auto rebuild: enabled
    /// - Bulk spacing: 3.0
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: String::new(),
            max_connection_distance: 3.0,
            node_radius: 0.25,
            removal_brush_radius: 3.0,
            moving_obstacle_tag: None,
            solidity_mask: LayerMask::ALL,
            trigger_policy: TriggerPolicy::Ignore,
            vertical_offset: 0.3,
            auto_rebuild: true,
            bulk_spacing: 3.0,
        }
    }

    /// Sets the registry label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the maximum connection distance (exclusive).
    #[must_use]
    pub const fn with_max_connection_distance(mut self, distance: f64) -> Self {
        self.max_connection_distance = distance;
        self
    }

    /// Sets the node overlap sphere radius.
    #[must_use]
    pub const fn with_node_radius(mut self, radius: f64) -> Self {
        self.node_radius = radius;
        self
    }

    /// Sets the brush radius used for area removal.
    #[must_use]
    pub const fn with_removal_brush_radius(mut self, radius: f64) -> Self {
        self.removal_brush_radius = radius;
        self
    }

    /// Sets the tag identifying moving obstacles.
    #[must_use]
    pub fn with_moving_obstacle_tag(mut self, tag: impl Into<String>) -> Self {
        self.moving_obstacle_tag = Some(tag.into());
        self
    }

    /// Clears the moving obstacle tag; every obstruction then blocks.
    #[must_use]
    pub fn without_moving_obstacle_tag(mut self) -> Self {
        self.moving_obstacle_tag = None;
        self
    }

    /// Sets the layers considered solid.
    #[must_use]
    pub const fn with_solidity_mask(mut self, mask: LayerMask) -> Self {
        self.solidity_mask = mask;
        self
    }

    /// Sets whether trigger volumes count as solid.
    #[must_use]
    pub const fn with_trigger_policy(mut self, policy: TriggerPolicy) -> Self {
        self.trigger_policy = policy;
        self
    }

    /// Sets the upward bias applied to newly placed nodes.
    #[must_use]
    pub const fn with_vertical_offset(mut self, offset: f64) -> Self {
        self.vertical_offset = offset;
        self
    }

    /// Sets whether edits trigger an immediate rebuild.
    #[must_use]
    pub const fn with_auto_rebuild(mut self, enable: bool) -> Self {
        self.auto_rebuild = enable;
        self
    }

    /// Sets the lattice spacing used by bulk placement.
    #[must_use]
    pub const fn with_bulk_spacing(mut self, spacing: f64) -> Self {
        self.bulk_spacing = spacing;
        self
    }

    /// Returns the registry label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the maximum connection distance.
    #[must_use]
    pub const fn max_connection_distance(&self) -> f64 {
        self.max_connection_distance
    }

    /// Returns the node overlap sphere radius.
    #[must_use]
    pub const fn node_radius(&self) -> f64 {
        self.node_radius
    }

    /// Returns the removal brush radius.
    #[must_use]
    pub const fn removal_brush_radius(&self) -> f64 {
        self.removal_brush_radius
    }

    /// Returns the moving obstacle tag, if one is set.
    #[must_use]
    pub fn moving_obstacle_tag(&self) -> Option<&str> {
        self.moving_obstacle_tag.as_deref()
    }

    /// Returns the layers considered solid.
    #[must_use]
    pub const fn solidity_mask(&self) -> LayerMask {
        self.solidity_mask
    }

    /// Returns the trigger policy.
    #[must_use]
    pub const fn trigger_policy(&self) -> TriggerPolicy {
        self.trigger_policy
    }

    /// Returns the vertical placement offset.
    #[must_use]
    pub const fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    /// Returns whether edits trigger an immediate rebuild.
    #[must_use]
    pub const fn auto_rebuild(&self) -> bool {
        self.auto_rebuild
    }

    /// Returns the bulk placement spacing.
    #[must_use]
    pub const fn bulk_spacing(&self) -> f64 {
        self.bulk_spacing
    }

    /// Validates the configuration and returns any issues.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint_types::WaypointConfig;
    ///
    /// let config = WaypointConfig::default().with_node_radius(-1.0);
    /// let issues = config.validate();
    /// assert_eq!(issues.len(), 1);
    /// assert!(issues[0].contains("node_radius"));
    /// ```
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let positive = [
            ("max_connection_distance", self.max_connection_distance),
            ("removal_brush_radius", self.removal_brush_radius),
            ("bulk_spacing", self.bulk_spacing),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                issues.push(format!("{name} must be positive and finite, got {value}"));
            }
        }

        if !self.node_radius.is_finite() || self.node_radius < 0.0 {
            issues.push(format!(
                "node_radius must be non-negative and finite, got {}",
                self.node_radius
            ));
        }

        if !self.vertical_offset.is_finite() {
            issues.push(format!(
                "vertical_offset must be finite, got {}",
                self.vertical_offset
            ));
        }

        if self.moving_obstacle_tag.as_deref() == Some("") {
            issues.push("moving_obstacle_tag must not be empty".to_string());
        }

        issues
    }

    /// Returns the configuration if it has no issues.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidConfig`] listing every issue found by
    /// [`validate`](Self::validate).
    pub fn validated(self) -> Result<Self, WaypointError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(self)
        } else {
            Err(WaypointError::invalid_config(issues.join("; ")))
        }
    }
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self::new()
    }
}
