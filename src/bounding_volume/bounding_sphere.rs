//! Bounding sphere.

use crate::math::{Point, Real, Vector};
use na;

/// A Bounding Sphere.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingSphere {
    /// The sphere center.
    pub center: Point<Real>,
    /// The sphere radius.
    pub radius: Real,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    pub fn new(center: Point<Real>, radius: Real) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// The bounding sphere center.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The bounding sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Does this sphere contain the given point?
    #[inline]
    pub fn contains_point(&self, point: &Point<Real>) -> bool {
        na::distance_squared(&self.center, point) <= self.radius * self.radius
    }

    /// Projects this sphere on the direction `dir`, which does not need to be normalized.
    #[inline]
    pub fn project_on_axis(&self, dir: &Vector<Real>) -> (Real, Real) {
        let center = self.center.coords.dot(dir);
        let shift = self.radius * dir.norm();
        (center - shift, center + shift)
    }
}
