//! Oriented Bounding Box.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Matrix, Point, Real, Vector, DIM};
use crate::shape::{Plane, PlaneSide};
use approx::{AbsDiffEq, RelativeEq};
use na::Unit;

/// An Oriented Bounding Box (OBB).
///
/// The box is described by its center, its half-extents along each of its local axes, and an
/// orthonormal frame whose **columns** are the local axes expressed in world-space. A point `p`
/// is expressed in the box local frame as `axis.tr_mul(&(p - center))`.
///
/// A box with a negative first half-extent is empty (see [`OrientedBox::new_empty`]). Growing
/// an empty box with [`OrientedBox::add_point`] or [`OrientedBox::add_box`] initializes it.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use frusta3d::bounding_volume::OrientedBox;
/// use nalgebra::{Matrix3, Point3, Vector3};
///
/// let obb = OrientedBox::new(Point3::origin(), Vector3::new(1.0, 2.0, 3.0), Matrix3::identity());
/// assert!(obb.contains_point(&Point3::new(0.5, -1.5, 2.0)));
/// assert_eq!(obb.volume(), 48.0);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct OrientedBox {
    /// The center of the box.
    pub center: Point<Real>,
    /// The half-extents of the box along each of its local axes.
    pub half_extents: Vector<Real>,
    /// The local axes of the box, one per column.
    pub axis: Matrix<Real>,
}

impl Default for OrientedBox {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl OrientedBox {
    /// Creates a new oriented box.
    #[inline]
    pub fn new(center: Point<Real>, half_extents: Vector<Real>, axis: Matrix<Real>) -> Self {
        Self {
            center,
            half_extents,
            axis,
        }
    }

    /// Creates an empty box, ready to be grown with `add_point` or `add_box`.
    #[inline]
    pub fn new_empty() -> Self {
        Self::new(Point::origin(), Vector::repeat(-1.0), Matrix::identity())
    }

    /// Creates the box covering `aabb` once `aabb` is placed in world-space by `origin` and
    /// `axis`.
    #[inline]
    pub fn from_aabb(aabb: &Aabb, origin: &Point<Real>, axis: &Matrix<Real>) -> Self {
        Self::new(
            origin + axis * aabb.center().coords,
            aabb.half_extents(),
            *axis,
        )
    }

    /// Is this box empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.half_extents.x < 0.0
    }

    /// The volume of this box, or zero if it is empty.
    #[inline]
    pub fn volume(&self) -> Real {
        if self.is_empty() {
            return 0.0;
        }

        let extents = self.half_extents * 2.0;
        extents.x * extents.y * extents.z
    }

    /// The world-space AABB of this box.
    pub fn aabb(&self) -> Aabb {
        if self.is_empty() {
            return Aabb::new_invalid();
        }

        let ws_half_extents = self.axis.abs() * self.half_extents;
        Aabb::from_half_extents(self.center, ws_half_extents)
    }

    /// The bounds of this box in its own frame, i.e., with the center expressed along the box
    /// axes.
    #[inline]
    pub(crate) fn local_bounds(&self) -> Aabb {
        Aabb::from_half_extents(self.axis.tr_mul(&self.center.coords).into(), self.half_extents)
    }

    /// Expresses a world-space point in the local frame of this box, relative to its center.
    #[inline]
    pub fn to_local_point(&self, point: &Point<Real>) -> Point<Real> {
        self.axis.tr_mul(&(point - self.center)).into()
    }

    /// Does this box contain the given world-space point?
    #[inline]
    pub fn contains_point(&self, point: &Point<Real>) -> bool {
        let local = self.to_local_point(point);
        (0..DIM).all(|i| local[i].abs() <= self.half_extents[i])
    }

    /// This box translated by `translation`.
    #[inline]
    #[must_use]
    pub fn translated(mut self, translation: &Vector<Real>) -> Self {
        self.center += translation;
        self
    }

    /// This box rotated by `rotation` around the world origin.
    #[inline]
    #[must_use]
    pub fn rotated(&self, rotation: &Matrix<Real>) -> Self {
        Self::new(
            (rotation * self.center.coords).into(),
            self.half_extents,
            rotation * self.axis,
        )
    }

    /// This box with each half-extent enlarged by `amount`.
    #[inline]
    #[must_use]
    pub fn expanded(&self, amount: Real) -> Self {
        Self::new(
            self.center,
            self.half_extents.add_scalar(amount),
            self.axis,
        )
    }

    /// Projects this box on `dir`, which does not need to be normalized.
    ///
    /// Returns the `(min, max)` interval of the projection.
    #[inline]
    pub fn project_on_axis(&self, dir: &Vector<Real>) -> (Real, Real) {
        let center = self.center.coords.dot(dir);
        let shift = self.axis.tr_mul(dir).abs().dot(&self.half_extents);
        (center - shift, center + shift)
    }

    /// Projects this box on each column of `axis`.
    ///
    /// This is the tightest AABB enclosing the box, expressed in the frame `axis` (without any
    /// translation).
    pub fn axis_projection(&self, axis: &Matrix<Real>) -> Aabb {
        let mut result = Aabb::new_invalid();

        for i in 0..DIM {
            let (min, max) = self.project_on_axis(&axis.column(i).into_owned());
            result.mins[i] = min;
            result.maxs[i] = max;
        }

        result
    }

    /// The signed distance from this box to `plane`.
    ///
    /// This is zero if the box crosses the plane, positive if it lies entirely in front of it,
    /// and negative if it lies entirely behind it.
    pub fn plane_distance(&self, plane: &Plane) -> Real {
        let d1 = plane.signed_distance(&self.center);
        let d2 = self
            .axis
            .tr_mul(plane.normal.as_ref())
            .abs()
            .dot(&self.half_extents);

        if d1 - d2 > 0.0 {
            d1 - d2
        } else if d1 + d2 < 0.0 {
            d1 + d2
        } else {
            0.0
        }
    }

    /// Classifies this box against `plane`, with a tolerance band of `epsilon`.
    pub fn plane_side(&self, plane: &Plane, epsilon: Real) -> PlaneSide {
        let d1 = plane.signed_distance(&self.center);
        let d2 = self
            .axis
            .tr_mul(plane.normal.as_ref())
            .abs()
            .dot(&self.half_extents);

        if d1 - d2 > epsilon {
            PlaneSide::Front
        } else if d1 + d2 < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::Cross
        }
    }

    /// The eight corners of this box.
    ///
    /// Corner `k` lies on the positive side of the first axis when `k` is `1`, `2`, `5` or `6`,
    /// of the second axis when `k` is `2`, `3`, `6` or `7`, and of the third axis when `k >= 4`.
    #[inline]
    pub fn to_points(&self) -> [Point<Real>; 8] {
        box_corners(&self.center, &self.half_extents, &self.axis)
    }

    /// The six planes bounding this box, with their normals pointing outward.
    ///
    /// The planes are ordered `+a0`, `+a1`, `+a2`, `-a0`, `-a1`, `-a2`.
    pub fn to_planes(&self) -> [Plane; 6] {
        let face = |i: usize, sign: Real| {
            let normal = self.axis.column(i) * sign;
            let point = self.center + normal * self.half_extents[i];
            Plane::from_normal_and_point(Unit::new_unchecked(normal), &point)
        };

        [
            face(0, 1.0),
            face(1, 1.0),
            face(2, 1.0),
            face(0, -1.0),
            face(1, -1.0),
            face(2, -1.0),
        ]
    }
}

/// The eight corners of the box with the given center, half-extents, and axes (one per
/// column).
///
/// The corners follow the labeling of [`OrientedBox::to_points`]. This also works for a box
/// expressed in the frame of another volume, which is how the frustum queries use it.
#[inline]
pub fn box_corners(
    center: &Point<Real>,
    half_extents: &Vector<Real>,
    axis: &Matrix<Real>,
) -> [Point<Real>; 8] {
    let ax0 = axis.column(0) * half_extents.x;
    let ax1 = axis.column(1) * half_extents.y;
    let ax2 = axis.column(2) * half_extents.z;

    let lo0 = center - ax0;
    let hi0 = center + ax0;
    let diag = ax1 + ax2;
    let anti = ax1 - ax2;

    [
        lo0 - diag,
        hi0 - diag,
        hi0 + anti,
        lo0 + anti,
        lo0 - anti,
        hi0 - anti,
        hi0 + diag,
        lo0 + diag,
    ]
}

impl BoundingVolume for OrientedBox {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center
    }

    #[inline]
    fn intersects(&self, other: &OrientedBox) -> bool {
        self.intersects_box(other)
    }

    fn contains(&self, other: &OrientedBox) -> bool {
        if other.is_empty() {
            return true;
        }
        if self.is_empty() {
            return false;
        }

        self.local_bounds()
            .contains(&other.axis_projection(&self.axis))
    }

    #[inline]
    fn merge(&mut self, other: &OrientedBox) {
        let _ = self.add_box(other);
    }

    #[inline]
    fn merged(&self, other: &OrientedBox) -> OrientedBox {
        let mut res = *self;
        res.merge(other);
        res
    }
}

impl AbsDiffEq for OrientedBox {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self.half_extents.abs_diff_eq(&other.half_extents, epsilon)
            && self.axis.abs_diff_eq(&other.axis, epsilon)
    }
}

impl RelativeEq for OrientedBox {
    fn default_max_relative() -> Real {
        Real::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
        self.center.relative_eq(&other.center, epsilon, max_relative)
            && self
                .half_extents
                .relative_eq(&other.half_extents, epsilon, max_relative)
            && self.axis.relative_eq(&other.axis, epsilon, max_relative)
    }
}
