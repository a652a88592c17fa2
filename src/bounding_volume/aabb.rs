//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};
use na;
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners. Its edges are always parallel to
/// the coordinate axes, which makes it the cheapest volume to test and to grow.
///
/// # Structure
///
/// - **mins**: The point with the smallest coordinates on each axis
/// - **maxs**: The point with the largest coordinates on each axis
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z` for a
///   non-empty AABB
///
/// An AABB with `mins > maxs` on any axis is empty. [`Aabb::new_invalid`] returns the
/// canonical empty AABB, which grows to exactly the first point added to it.
///
/// Besides bounding world-space geometry, AABBs are used by the view frustum to describe
/// projection bounds: `x` is then a depth along the view direction and `y`, `z` are the
/// normalized horizontal and vertical coordinates in `[-1, 1]`.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use frusta3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let mut aabb = Aabb::new_invalid();
/// aabb.take_point(Point3::new(1.0, 2.0, 3.0));
/// aabb.take_point(Point3::new(-1.0, 4.0, 2.0));
///
/// assert_eq!(aabb.mins, Point3::new(-1.0, 2.0, 2.0));
/// assert_eq!(aabb.maxs, Point3::new(1.0, 4.0, 3.0));
/// assert!(aabb.contains_local_point(&Point3::new(0.0, 3.0, 2.5)));
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::max_values` and `maxs`
    /// components set to `-Real::max_values`.
    ///
    /// This is often used as the initial values of some AABB merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Creates a new AABB from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new AABB that tightly encloses a set of points.
    ///
    /// The result is empty if the iterator yields no point.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();
        for pt in pts {
            result.take_point(pt);
        }
        result
    }

    /// Returns `true` if `mins` exceeds `maxs` along at least one axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..DIM).any(|i| self.mins[i] > self.maxs[i])
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half-extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        let half: Real = na::convert::<f64, Real>(0.5);
        (self.maxs - self.mins) * half
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this AABB, or zero if it is empty.
    #[inline]
    pub fn volume(&self) -> Real {
        if self.is_empty() {
            return 0.0;
        }

        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Does this AABB contains a point expressed in the same coordinate frame as `self`?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Computes the vertices of this `Aabb`.
    ///
    /// Vertex `k` takes `maxs` along `x` when `k` is `1`, `2`, `5` or `6`, along `y` when
    /// `k` is `2`, `3`, `6` or `7`, and along `z` when `k >= 4`. This is the corner labeling
    /// shared by every box of this crate.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        [
            Point::new(self.mins.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
    }

    /// Projects every point of this `Aabb` on the direction `dir`.
    ///
    /// `dir` does not need to be normalized: the returned interval is expressed in
    /// multiples of its length.
    pub fn project_on_axis(&self, dir: &Vector<Real>) -> (Real, Real) {
        let center = self.center().coords.dot(dir);
        let shift = self.half_extents().dot(&dir.abs());
        (center - shift, center + shift)
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }
}
