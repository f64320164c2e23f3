//! Lattice placement of many nodes at once.

use nalgebra::{Point3, Vector3};

/// A box region to fill with evenly spaced nodes.
///
/// The extension along each axis is `floor(scale / 2)`. Lattice offsets
/// run from `-extension` up to (but excluding) `+extension` in steps of the
/// spacing, so a region with scale below `2` along any axis yields nothing.
///
/// # Example
///
/// ```
/// use waypoint_graph::BulkRegion;
/// use nalgebra::{Point3, Vector3};
///
/// let region = BulkRegion::new(Point3::origin()).with_scale(Vector3::new(6.0, 6.0, 2.0));
/// assert_eq!(region.extension(), Vector3::new(3.0, 3.0, 1.0));
///
/// // x, y in {-3, 0}, z in {-1}
/// let points = region.lattice_points(3.0);
/// assert_eq!(points.len(), 4);
/// assert_eq!(points[0], Point3::new(-3.0, -3.0, -1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulkRegion {
    /// Center of the region.
    pub center: Point3<f64>,
    /// Full size of the region along each axis.
    pub scale: Vector3<f64>,
}

impl BulkRegion {
    /// Creates a unit-scale region at `center`.
    #[must_use]
    pub fn new(center: Point3<f64>) -> Self {
        Self {
            center,
            scale: Vector3::repeat(1.0),
        }
    }

    /// Sets the region size.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vector3<f64>) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the per-axis half extent, rounded down to whole units.
    #[must_use]
    pub fn extension(&self) -> Vector3<f64> {
        self.scale.map(|s| (s / 2.0).floor())
    }

    /// Returns every lattice point in the region, x-major then y then z.
    ///
    /// Returns nothing if `spacing` is not a positive finite number or the
    /// scale is not finite.
    #[must_use]
    pub fn lattice_points(&self, spacing: f64) -> Vec<Point3<f64>> {
        if !(spacing.is_finite() && spacing > 0.0) || !self.scale.iter().all(|s| s.is_finite()) {
            return Vec::new();
        }

        let ext = self.extension();
        let xs = axis_offsets(ext.x, spacing);
        let ys = axis_offsets(ext.y, spacing);
        let zs = axis_offsets(ext.z, spacing);

        let mut points = Vec::with_capacity(xs.len() * ys.len() * zs.len());
        for &x in &xs {
            for &y in &ys {
                for &z in &zs {
                    points.push(self.center + Vector3::new(x, y, z));
                }
            }
        }
        points
    }
}

#[allow(clippy::cast_precision_loss)]
fn axis_offsets(extension: f64, spacing: f64) -> Vec<f64> {
    let mut offsets = Vec::new();
    let mut step = 0_usize;
    loop {
        let offset = (step as f64).mul_add(spacing, -extension);
        if offset >= extension {
            break;
        }
        offsets.push(offset);
        step += 1;
    }
    offsets
}
