//! Rays and the intervals along which they cross volumes.

use crate::math::{Matrix, Point, Real, Vector, WORLD_INFINITY};

/// A ray that can be cast against volumes.
///
/// Points along the ray are `origin + dir * t`. Unless stated otherwise, the volumes of this
/// crate test the whole supporting line, i.e., `t` may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray. It does not need to be normalized.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray starting from `origin` and with the direction `dir`.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// Expresses this ray in the frame with the given origin and axes (one per column).
    #[inline]
    pub fn localized_in(&self, origin: &Point<Real>, axis: &Matrix<Real>) -> Self {
        Self::new(
            axis.tr_mul(&(self.origin - origin)).into(),
            axis.tr_mul(&self.dir),
        )
    }

    /// Computes the point at the given parameter on this ray.
    ///
    /// The point is `self.origin + self.dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// The parameters at which a line enters and exits a volume.
///
/// `scale1` is the smallest and `scale2` the largest parameter, along the line, of the points
/// where the line crosses the boundary of the volume. If the line misses the volume,
/// `scale1 > scale2` (both keep their initial values `WORLD_INFINITY` and `-WORLD_INFINITY`
/// when no boundary crossing is found at all).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RayInterval {
    /// Is the origin of the ray inside the volume?
    pub start_inside: bool,
    /// The smallest parameter of a boundary crossing.
    pub scale1: Real,
    /// The largest parameter of a boundary crossing.
    pub scale2: Real,
}

impl RayInterval {
    /// An interval without any boundary crossing yet.
    #[inline]
    pub fn empty(start_inside: bool) -> Self {
        Self {
            start_inside,
            scale1: WORLD_INFINITY,
            scale2: -WORLD_INFINITY,
        }
    }

    /// Records a boundary crossing at the parameter `t`.
    #[inline]
    pub fn take(&mut self, t: Real) {
        self.scale1 = self.scale1.min(t);
        self.scale2 = self.scale2.max(t);
    }

    /// Does the line cross the boundary of the volume?
    #[inline]
    pub fn crosses(&self) -> bool {
        self.scale1 <= self.scale2
    }

    /// The `(scale1, scale2)` pair if the line hits the volume, either by starting inside or
    /// by crossing its boundary.
    #[inline]
    pub fn hit(&self) -> Option<(Real, Real)> {
        if self.start_inside || self.crosses() {
            Some((self.scale1, self.scale2))
        } else {
            None
        }
    }
}
