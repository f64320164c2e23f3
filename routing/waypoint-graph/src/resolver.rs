//! Maps arbitrary world positions to graph nodes.

use nalgebra::Point3;
use waypoint_spatial::{CollisionOracle, LayerMask, TriggerPolicy};
use waypoint_types::{Node, WaypointConfig};

/// Finds the nearest node with an unobstructed line of sight to a position.
///
/// There is no distance cap: a node across the map is accepted as long as
/// nothing solid lies between it and the query position. Equidistant
/// candidates resolve to the lowest index.
///
/// # Example
///
/// ```
/// use waypoint_graph::resolver::ClosestNodeResolver;
/// use waypoint_spatial::{Aabb, Collider, ColliderWorld};
/// use waypoint_types::{Node, WaypointConfig};
/// use nalgebra::{Point3, Vector3};
///
/// let mut world = ColliderWorld::new();
/// // Wall between the query point and the nearest node
/// world.insert(Collider::aabb(Aabb::from_center(
///     Point3::new(0.5, 0.0, 0.0),
///     Vector3::new(0.1, 1.0, 1.0),
/// ))).unwrap();
///
/// let nodes = vec![
///     Node::new(Point3::new(1.0, 0.0, 0.0)),
///     Node::new(Point3::new(-4.0, 0.0, 0.0)),
/// ];
///
/// let config = WaypointConfig::default();
/// let resolver = ClosestNodeResolver::new(&nodes, &world, &config);
/// assert_eq!(resolver.resolve(&Point3::origin()), Some(1));
/// ```
pub struct ClosestNodeResolver<'a, O: ?Sized> {
    nodes: &'a [Node],
    oracle: &'a O,
    mask: LayerMask,
    triggers: TriggerPolicy,
}

impl<'a, O: CollisionOracle + ?Sized> ClosestNodeResolver<'a, O> {
    /// Creates a resolver using the solidity filters from `config`.
    #[must_use]
    pub const fn new(nodes: &'a [Node], oracle: &'a O, config: &WaypointConfig) -> Self {
        Self {
            nodes,
            oracle,
            mask: config.solidity_mask(),
            triggers: config.trigger_policy(),
        }
    }

    /// Returns the index of the closest visible node, or `None` if every node
    /// is occluded (or there are no nodes).
    #[must_use]
    pub fn resolve(&self, position: &Point3<f64>) -> Option<usize> {
        let mut candidates: Vec<(usize, f64)> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.distance_to(position)))
            .collect();

        // Nearest first, so the first visible candidate wins and most
        // segment queries are skipped.
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        candidates
            .into_iter()
            .find(|&(i, _)| {
                !self.oracle.segment_obstructed(
                    position,
                    &self.nodes[i].position,
                    self.mask,
                    self.triggers,
                )
            })
            .map(|(i, _)| i)
    }
}
