//! Geometric primitives used as collider shapes.
//!
//! All primitives answer two questions: does a straight segment enter
//! the shape (and at what parameter), and does a query sphere overlap it.
//!
//! # Example
//!
//! ```
//! use waypoint_spatial::{Aabb, Segment, Sphere};
//! use nalgebra::Point3;
//!
//! let wall = Aabb::new(Point3::new(1.0, -1.0, -1.0), Point3::new(2.0, 1.0, 1.0));
//! let segment = Segment::new(Point3::origin(), Point3::new(4.0, 0.0, 0.0));
//!
//! // Enters the wall a quarter of the way along
//! let t = wall.segment_entry(&segment).unwrap();
//! assert!((t - 0.25).abs() < 1e-10);
//!
//! let query = Sphere::new(Point3::new(1.5, 0.0, 0.0), 0.1);
//! assert!(wall.intersects_sphere(&query));
//! ```

use nalgebra::{Point3, Vector3};

/// A straight line segment between two points.
///
/// Parameters along the segment run from `0.0` at `start` to `1.0` at `end`.
///
/// # Example
///
/// ```
/// use waypoint_spatial::Segment;
/// use nalgebra::Point3;
///
/// let segment = Segment::new(Point3::origin(), Point3::new(0.0, 3.0, 4.0));
/// assert!((segment.length() - 5.0).abs() < 1e-10);
///
/// let mid = segment.point_at(0.5);
/// assert!((mid.z - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Starting point.
    pub start: Point3<f64>,
    /// End point.
    pub end: Point3<f64>,
}

impl Segment {
    /// Creates a new segment from `start` to `end`.
    #[must_use]
    pub const fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Returns the (unnormalized) direction `end - start`.
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Returns the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Returns the point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.start + self.direction() * t
    }

    /// Returns `true` if the segment has (near) zero length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.direction().norm_squared() < f64::EPSILON
    }
}

/// An axis-aligned bounding box in world coordinates.
///
/// # Example
///
/// ```
/// use waypoint_spatial::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// assert!(!aabb.contains(&Point3::new(15.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3<f64>,
    /// Maximum corner of the bounding box.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a new AABB from two opposite corners.
    ///
    /// The corners are automatically reordered if necessary.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint_spatial::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::new(
    ///     Point3::new(10.0, 10.0, 10.0),
    ///     Point3::new(0.0, 0.0, 0.0),
    /// );
    /// assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(10.0, 10.0, 10.0));
    /// ```
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates an AABB centered at a point with the given half-extents.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint_spatial::Aabb;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let aabb = Aabb::from_center(
    ///     Point3::new(5.0, 5.0, 5.0),
    ///     Vector3::new(2.0, 2.0, 2.0),
    /// );
    /// assert_eq!(aabb.min, Point3::new(3.0, 3.0, 3.0));
    /// assert_eq!(aabb.max, Point3::new(7.0, 7.0, 7.0));
    /// ```
    #[must_use]
    pub fn from_center(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the center point of the AABB.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the half-extents (half-size) of the AABB.
    #[must_use]
    pub fn half_extents(&self) -> Vector3<f64> {
        (self.max - self.min) * 0.5
    }

    /// Checks if a point is inside the AABB.
    ///
    /// Points on the boundary are considered inside.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Checks if this AABB intersects another AABB.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Checks if this AABB intersects a sphere.
    #[must_use]
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        sphere.intersects_aabb(self)
    }

    /// Returns a copy of this box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Returns the segment parameter at which the segment enters the box.
    ///
    /// Uses the slab method. A segment starting inside the box enters at
    /// `0.0`. Returns `None` if the segment misses the box entirely.
    #[must_use]
    pub fn segment_entry(&self, segment: &Segment) -> Option<f64> {
        let direction = segment.direction();
        let mut t_enter = 0.0_f64;
        let mut t_exit = 1.0_f64;

        for axis in 0..3 {
            let origin = segment.start[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f64::EPSILON {
                // Parallel to this slab
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = d.recip();
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Point3::origin(), Point3::origin())
    }
}

/// A sphere in world coordinates.
///
/// # Example
///
/// ```
/// use waypoint_spatial::Sphere;
/// use nalgebra::Point3;
///
/// let sphere = Sphere::new(Point3::new(5.0, 5.0, 5.0), 2.0);
///
/// assert!(sphere.contains(&Point3::new(5.0, 5.0, 5.0)));
/// assert!(sphere.contains(&Point3::new(6.0, 5.0, 5.0)));
/// assert!(!sphere.contains(&Point3::new(8.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    /// The center of the sphere.
    pub center: Point3<f64>,
    /// The radius of the sphere.
    pub radius: f64,
}

impl Sphere {
    /// Creates a new sphere with the given center and radius.
    ///
    /// The radius is clamped to be non-negative.
    #[must_use]
    pub const fn new(center: Point3<f64>, radius: f64) -> Self {
        Self {
            center,
            radius: if radius < 0.0 { -radius } else { radius },
        }
    }

    /// Checks if a point is inside or on the sphere.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        nalgebra::distance_squared(point, &self.center) <= self.radius * self.radius
    }

    /// Checks if this sphere intersects another sphere.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let radius_sum = self.radius + other.radius;
        nalgebra::distance_squared(&self.center, &other.center) <= radius_sum * radius_sum
    }

    /// Checks if this sphere intersects an AABB.
    ///
    /// Uses the closest point on the AABB to the sphere center.
    #[must_use]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let closest = Point3::new(
            self.center.x.clamp(aabb.min.x, aabb.max.x),
            self.center.y.clamp(aabb.min.y, aabb.max.y),
            self.center.z.clamp(aabb.min.z, aabb.max.z),
        );
        self.contains(&closest)
    }

    /// Returns a copy of this sphere moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self::new(self.center + offset, self.radius)
    }

    /// Returns the segment parameter at which the segment enters the sphere.
    ///
    /// A segment starting inside the sphere enters at `0.0`.
    #[must_use]
    pub fn segment_entry(&self, segment: &Segment) -> Option<f64> {
        let d = segment.direction();
        let m = segment.start - self.center;
        let c = m.norm_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return Some(0.0);
        }

        let a = d.norm_squared();
        if a < f64::EPSILON {
            return None;
        }

        let b = m.dot(&d);
        let discriminant = b.mul_add(b, -(a * c));
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / a;
        (0.0..=1.0).contains(&t).then_some(t)
    }

    /// Returns the bounding AABB of this sphere.
    #[must_use]
    pub fn bounding_aabb(&self) -> Aabb {
        Aabb::from_center(self.center, Vector3::repeat(self.radius))
    }

    /// Returns `true` if the center and radius are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.radius.is_finite() && self.center.iter().all(|v| v.is_finite())
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Point3::origin(), 1.0)
    }
}
