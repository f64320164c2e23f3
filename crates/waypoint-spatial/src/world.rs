//! An in-memory world of tagged colliders.
//!
//! [`ColliderWorld`] is the reference [`CollisionOracle`](crate::CollisionOracle):
//! a flat set of boxes and spheres, each on a layer, optionally tagged and
//! optionally a trigger. Moving obstacles are modelled by moving their
//! collider between queries.
//!
//! # Example
//!
//! ```
//! use waypoint_spatial::{Aabb, Collider, ColliderWorld, CollisionOracle, LayerMask, TriggerPolicy};
//! use nalgebra::{Point3, Vector3};
//!
//! let mut world = ColliderWorld::new();
//! let door = world
//!     .insert(Collider::aabb(Aabb::from_center(Point3::new(2.0, 0.0, 0.0), Vector3::repeat(0.5)))
//!         .with_tag("Door"))
//!     .unwrap();
//!
//! let a = Point3::origin();
//! let b = Point3::new(4.0, 0.0, 0.0);
//! assert!(world.segment_obstructed(&a, &b, LayerMask::ALL, TriggerPolicy::Ignore));
//!
//! // Slide the door out of the way
//! world.translate(door, &Vector3::new(0.0, 5.0, 0.0)).unwrap();
//! assert!(!world.segment_obstructed(&a, &b, LayerMask::ALL, TriggerPolicy::Ignore));
//! ```

use std::cmp::Ordering;

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

use crate::error::SpatialError;
use crate::layer::{LAYER_COUNT, LayerMask, TriggerPolicy};
use crate::oracle::{ColliderHit, CollisionOracle};
use crate::shape::{Aabb, Segment, Sphere};

/// Identifier of a collider inside a [`ColliderWorld`].
///
/// Ids are never reused within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColliderId(u64);

impl ColliderId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Geometry of a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColliderShape {
    /// Axis-aligned box.
    Aabb(Aabb),
    /// Sphere.
    Sphere(Sphere),
}

impl ColliderShape {
    /// Returns the segment parameter at which `segment` enters the shape.
    #[must_use]
    pub fn segment_entry(&self, segment: &Segment) -> Option<f64> {
        match self {
            Self::Aabb(aabb) => aabb.segment_entry(segment),
            Self::Sphere(sphere) => sphere.segment_entry(segment),
        }
    }

    /// Checks if the shape overlaps a query sphere.
    #[must_use]
    pub fn intersects_sphere(&self, query: &Sphere) -> bool {
        match self {
            Self::Aabb(aabb) => aabb.intersects_sphere(query),
            Self::Sphere(sphere) => sphere.intersects(query),
        }
    }

    /// Returns a copy of the shape moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        match self {
            Self::Aabb(aabb) => Self::Aabb(aabb.translated(offset)),
            Self::Sphere(sphere) => Self::Sphere(sphere.translated(offset)),
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            Self::Aabb(aabb) => aabb.is_finite(),
            Self::Sphere(sphere) => sphere.is_finite(),
        }
    }
}

/// A solid (or trigger) object in the world.
///
/// # Example
///
/// ```
/// use waypoint_spatial::{Collider, Sphere};
/// use nalgebra::Point3;
///
/// let platform = Collider::sphere(Sphere::new(Point3::origin(), 1.0))
///     .with_layer(2)
///     .with_tag("MovingPlatform");
///
/// assert_eq!(platform.layer(), 2);
/// assert!(platform.has_tag("MovingPlatform"));
/// assert!(!platform.is_trigger());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collider {
    shape: ColliderShape,
    layer: u8,
    tag: Option<String>,
    is_trigger: bool,
}

impl Collider {
    /// Creates an untagged, solid collider on layer 0.
    #[must_use]
    pub const fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            layer: 0,
            tag: None,
            is_trigger: false,
        }
    }

    /// Creates a box collider.
    #[must_use]
    pub const fn aabb(aabb: Aabb) -> Self {
        Self::new(ColliderShape::Aabb(aabb))
    }

    /// Creates a sphere collider.
    #[must_use]
    pub const fn sphere(sphere: Sphere) -> Self {
        Self::new(ColliderShape::Sphere(sphere))
    }

    /// Sets the collision layer.
    #[must_use]
    pub const fn with_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    /// Sets the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Marks the collider as a trigger volume.
    #[must_use]
    pub const fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Returns the shape.
    #[must_use]
    pub const fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Returns the layer.
    #[must_use]
    pub const fn layer(&self) -> u8 {
        self.layer
    }

    /// Returns the tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns `true` if the collider carries exactly this tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    /// Returns `true` if this is a trigger volume.
    #[must_use]
    pub const fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    fn passes(&self, mask: LayerMask, triggers: TriggerPolicy) -> bool {
        mask.contains(self.layer) && triggers.admits(self.is_trigger)
    }

    fn validate(&self) -> Result<(), SpatialError> {
        if self.layer >= LAYER_COUNT {
            return Err(SpatialError::InvalidLayer(self.layer));
        }
        if !self.shape.is_finite() {
            return Err(SpatialError::NonFiniteShape);
        }
        Ok(())
    }
}

/// A flat collection of colliders answering collision queries.
#[derive(Debug, Clone, Default)]
pub struct ColliderWorld {
    colliders: HashMap<ColliderId, Collider>,
    next_id: u64,
}

impl ColliderWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collider and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidLayer`] for layers outside `0..32` and
    /// [`SpatialError::NonFiniteShape`] for NaN or infinite geometry.
    pub fn insert(&mut self, collider: Collider) -> Result<ColliderId, SpatialError> {
        collider.validate()?;
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.insert(id, collider);
        Ok(id)
    }

    /// Removes a collider, returning it if it existed.
    pub fn remove(&mut self, id: ColliderId) -> Option<Collider> {
        self.colliders.remove(&id)
    }

    /// Returns a collider by id.
    #[must_use]
    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(&id)
    }

    /// Replaces the shape of an existing collider.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::UnknownCollider`] if `id` is not in the world
    /// and [`SpatialError::NonFiniteShape`] for invalid geometry.
    pub fn set_shape(&mut self, id: ColliderId, shape: ColliderShape) -> Result<(), SpatialError> {
        if !shape.is_finite() {
            return Err(SpatialError::NonFiniteShape);
        }
        let collider = self
            .colliders
            .get_mut(&id)
            .ok_or(SpatialError::UnknownCollider(id))?;
        collider.shape = shape;
        Ok(())
    }

    /// Moves an existing collider by `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::UnknownCollider`] if `id` is not in the world.
    pub fn translate(&mut self, id: ColliderId, offset: &Vector3<f64>) -> Result<(), SpatialError> {
        let shape = self
            .colliders
            .get(&id)
            .ok_or(SpatialError::UnknownCollider(id))?
            .shape
            .translated(offset);
        self.set_shape(id, shape)
    }

    /// Returns the number of colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns `true` if the world holds no colliders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Removes every collider. Ids keep increasing.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Iterates over all colliders in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderId, &Collider)> {
        self.colliders.iter().map(|(id, c)| (*id, c))
    }

    fn filtered(
        &self,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> impl Iterator<Item = (ColliderId, &Collider)> {
        self.iter().filter(move |(_, c)| c.passes(mask, triggers))
    }
}

impl CollisionOracle for ColliderWorld {
    fn segment_obstructed(
        &self,
        a: &Point3<f64>,
        b: &Point3<f64>,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> bool {
        let segment = Segment::new(*a, *b);
        self.filtered(mask, triggers)
            .any(|(_, c)| c.shape.segment_entry(&segment).is_some())
    }

    fn segment_hits(
        &self,
        a: &Point3<f64>,
        b: &Point3<f64>,
        mask: LayerMask,
        triggers: TriggerPolicy,
        max_hits: usize,
    ) -> Vec<ColliderHit<'_>> {
        let segment = Segment::new(*a, *b);
        let length = segment.length();

        let mut hits: Vec<ColliderHit<'_>> = self
            .filtered(mask, triggers)
            .filter_map(|(id, c)| {
                c.shape
                    .segment_entry(&segment)
                    .map(|t| ColliderHit::new(id, c.tag(), t * length))
            })
            .collect();

        hits.sort_by(|x, y| {
            x.distance
                .partial_cmp(&y.distance)
                .unwrap_or(Ordering::Equal)
                .then(x.id.cmp(&y.id))
        });
        hits.truncate(max_hits);
        hits
    }

    fn region_occupied(
        &self,
        center: &Point3<f64>,
        radius: f64,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> Vec<ColliderHit<'_>> {
        let query = Sphere::new(*center, radius);

        let mut hits: Vec<ColliderHit<'_>> = self
            .filtered(mask, triggers)
            .filter(|(_, c)| c.shape.intersects_sphere(&query))
            .map(|(id, c)| ColliderHit::new(id, c.tag(), 0.0))
            .collect();
        hits.sort_by_key(|h| h.id);
        hits
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube(x: f64, y: f64) -> Collider {
        Collider::aabb(Aabb::from_center(
            Point3::new(x, y, 0.0),
            Vector3::repeat(0.5),
        ))
    }

    fn line() -> (Point3<f64>, Point3<f64>) {
        (Point3::origin(), Point3::new(10.0, 0.0, 0.0))
    }

    #[test]
    fn test_empty_world_never_obstructs() {
        let world = ColliderWorld::new();
        let (a, b) = line();
        assert!(world.is_empty());
        assert!(!world.segment_obstructed(&a, &b, LayerMask::ALL, TriggerPolicy::Collide));
        assert!(
            world
                .region_occupied(&a, 10.0, LayerMask::ALL, TriggerPolicy::Collide)
                .is_empty()
        );
    }

    #[test]
    fn test_hits_sorted_nearest_first() {
        let mut world = ColliderWorld::new();
        let far = world.insert(cube(8.0, 0.0).with_tag("Far")).unwrap();
        let near = world.insert(cube(2.0, 0.0).with_tag("Near")).unwrap();
        world.insert(cube(5.0, 5.0)).unwrap();

        let (a, b) = line();
        let hits = world.segment_hits(&a, &b, LayerMask::ALL, TriggerPolicy::Ignore, 8);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, near);
        assert_eq!(hits[0].tag, Some("Near"));
        assert_relative_eq!(hits[0].distance, 1.5, epsilon = 1e-10);
        assert_eq!(hits[1].id, far);
    }

    #[test]
    fn test_hits_truncated_to_max() {
        let mut world = ColliderWorld::new();
        for i in 1..=9 {
            world.insert(cube(f64::from(i), 0.0)).unwrap();
        }
        let (a, b) = line();
        let hits = world.segment_hits(&a, &b, LayerMask::ALL, TriggerPolicy::Ignore, 8);
        assert_eq!(hits.len(), 8);
        assert_relative_eq!(hits[0].distance, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_layer_mask_filters() {
        let mut world = ColliderWorld::new();
        world.insert(cube(5.0, 0.0).with_layer(3)).unwrap();
        let (a, b) = line();

        assert!(world.segment_obstructed(&a, &b, LayerMask::layer(3), TriggerPolicy::Ignore));
        assert!(!world.segment_obstructed(&a, &b, LayerMask::layer(0), TriggerPolicy::Ignore));
    }

    #[test]
    fn test_trigger_policy_filters() {
        let mut world = ColliderWorld::new();
        world.insert(cube(5.0, 0.0).as_trigger()).unwrap();
        let (a, b) = line();

        assert!(!world.segment_obstructed(&a, &b, LayerMask::ALL, TriggerPolicy::Ignore));
        assert!(world.segment_obstructed(&a, &b, LayerMask::ALL, TriggerPolicy::Collide));
    }

    #[test]
    fn test_region_occupied() {
        let mut world = ColliderWorld::new();
        let id = world.insert(cube(0.0, 0.0).with_tag("Wall")).unwrap();
        world
            .insert(Collider::sphere(Sphere::new(Point3::new(5.0, 0.0, 0.0), 1.0)))
            .unwrap();

        let hits = world.region_occupied(
            &Point3::new(0.6, 0.0, 0.0),
            0.25,
            LayerMask::ALL,
            TriggerPolicy::Ignore,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, id);
        assert!(hits[0].has_tag("Wall"));
    }

    #[test]
    fn test_insert_rejects_bad_layer() {
        let mut world = ColliderWorld::new();
        let result = world.insert(cube(0.0, 0.0).with_layer(32));
        assert!(matches!(result, Err(SpatialError::InvalidLayer(32))));
    }

    #[test]
    fn test_insert_rejects_non_finite() {
        let mut world = ColliderWorld::new();
        let result = world.insert(Collider::sphere(Sphere::new(Point3::origin(), f64::NAN)));
        assert!(matches!(result, Err(SpatialError::NonFiniteShape)));
    }

    #[test]
    fn test_translate_and_remove() {
        let mut world = ColliderWorld::new();
        let id = world.insert(cube(5.0, 0.0)).unwrap();
        let (a, b) = line();

        world.translate(id, &Vector3::new(0.0, 0.0, 3.0)).unwrap();
        assert!(!world.segment_obstructed(&a, &b, LayerMask::ALL, TriggerPolicy::Ignore));

        assert!(world.remove(id).is_some());
        assert!(world.remove(id).is_none());
        assert!(matches!(
            world.translate(id, &Vector3::zeros()),
            Err(SpatialError::UnknownCollider(_))
        ));
    }

    #[test]
    fn test_ids_not_reused() {
        let mut world = ColliderWorld::new();
        let first = world.insert(cube(0.0, 0.0)).unwrap();
        world.clear();
        let second = world.insert(cube(0.0, 0.0)).unwrap();
        assert_ne!(first, second);
        assert_eq!(world.len(), 1);
        assert!(world.get(first).is_none());
    }
}
