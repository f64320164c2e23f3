//! The collision query interface consumed by graph construction and search.

use nalgebra::Point3;

use crate::layer::{LayerMask, TriggerPolicy};
use crate::world::ColliderId;

/// Upper bound on obstructions examined along one segment.
pub const MAX_SEGMENT_HITS: usize = 8;

/// One collider reported by a collision query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderHit<'a> {
    /// The collider that was hit.
    pub id: ColliderId,
    /// The collider's tag, if any.
    pub tag: Option<&'a str>,
    /// Distance from the query origin to the first contact.
    ///
    /// Always `0.0` for region queries.
    pub distance: f64,
}

impl<'a> ColliderHit<'a> {
    /// Creates a hit record.
    #[must_use]
    pub const fn new(id: ColliderId, tag: Option<&'a str>, distance: f64) -> Self {
        Self { id, tag, distance }
    }

    /// Returns `true` if the hit collider carries exactly this tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == Some(tag)
    }
}

/// Read-only geometry queries against solid world geometry.
///
/// Implementations must be free of side effects: answering the same query
/// twice against unchanged geometry gives the same answer.
///
/// # Example
///
/// ```
/// use waypoint_spatial::{Aabb, Collider, ColliderWorld, CollisionOracle, LayerMask, TriggerPolicy};
/// use nalgebra::Point3;
///
/// fn visible(oracle: &impl CollisionOracle, a: &Point3<f64>, b: &Point3<f64>) -> bool {
///     !oracle.segment_obstructed(a, b, LayerMask::ALL, TriggerPolicy::Ignore)
/// }
///
/// let mut world = ColliderWorld::new();
/// world.insert(Collider::aabb(Aabb::new(
///     Point3::new(1.0, -1.0, -1.0),
///     Point3::new(2.0, 1.0, 1.0),
/// ))).unwrap();
///
/// assert!(!visible(&world, &Point3::origin(), &Point3::new(3.0, 0.0, 0.0)));
/// assert!(visible(&world, &Point3::origin(), &Point3::new(0.0, 3.0, 0.0)));
/// ```
pub trait CollisionOracle {
    /// Returns `true` if anything passing the filters intersects segment `a -> b`.
    fn segment_obstructed(
        &self,
        a: &Point3<f64>,
        b: &Point3<f64>,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> bool {
        !self.segment_hits(a, b, mask, triggers, 1).is_empty()
    }

    /// Returns up to `max_hits` colliders intersecting segment `a -> b`,
    /// nearest first.
    fn segment_hits(
        &self,
        a: &Point3<f64>,
        b: &Point3<f64>,
        mask: LayerMask,
        triggers: TriggerPolicy,
        max_hits: usize,
    ) -> Vec<ColliderHit<'_>>;

    /// Returns every collider overlapping the sphere at `center` with `radius`.
    fn region_occupied(
        &self,
        center: &Point3<f64>,
        radius: f64,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> Vec<ColliderHit<'_>>;
}

impl<T: CollisionOracle + ?Sized> CollisionOracle for &T {
    fn segment_obstructed(
        &self,
        a: &Point3<f64>,
        b: &Point3<f64>,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> bool {
        (**self).segment_obstructed(a, b, mask, triggers)
    }

    fn segment_hits(
        &self,
        a: &Point3<f64>,
        b: &Point3<f64>,
        mask: LayerMask,
        triggers: TriggerPolicy,
        max_hits: usize,
    ) -> Vec<ColliderHit<'_>> {
        (**self).segment_hits(a, b, mask, triggers, max_hits)
    }

    fn region_occupied(
        &self,
        center: &Point3<f64>,
        radius: f64,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> Vec<ColliderHit<'_>> {
        (**self).region_occupied(center, radius, mask, triggers)
    }
}
