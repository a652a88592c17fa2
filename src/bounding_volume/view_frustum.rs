//! View frustum.

use crate::bounding_volume::Aabb;
use crate::math::{Matrix, Point, Real, Vector, DIM};
use crate::shape::{Plane, PlaneSide};
use crate::utils::sign_bit;
use approx::{AbsDiffEq, RelativeEq};
use na::Unit;

#[cfg(not(feature = "std"))]
use na::ComplexField;

/// A view frustum: the truncated pyramid seen by a perspective camera.
///
/// The frustum has its apex at `origin` and is oriented by the orthonormal frame `axis`, whose
/// columns are, in this order, the view direction, the left direction, and the up direction.
/// Its cross-section at the depth `x` along the view direction is the rectangle
/// `[-far_left * x / far, far_left * x / far] × [-far_up * x / far, far_up * x / far]`, and it
/// is bounded by the near plane at depth `near` and the far plane at depth `far`.
///
/// # Frames
///
/// Many queries work in the local frame of the frustum, where the apex is at the origin, the
/// view direction is `+x`, left is `+y`, and up is `+z`. A world-space point `p` is expressed in
/// that frame as `axis.tr_mul(&(p - origin))`.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use frusta3d::bounding_volume::ViewFrustum;
/// use nalgebra::{Matrix3, Point3};
///
/// let frustum = ViewFrustum::new(Point3::origin(), Matrix3::identity(), 1.0, 10.0, 5.0, 5.0);
/// assert!(frustum.contains_point(&Point3::new(5.0, 2.0, -2.0)));
/// assert!(!frustum.contains_point(&Point3::new(5.0, 3.0, 0.0)));
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct ViewFrustum {
    pub(crate) origin: Point<Real>,
    pub(crate) axis: Matrix<Real>,
    pub(crate) near: Real,
    pub(crate) far: Real,
    pub(crate) far_left: Real,
    pub(crate) far_up: Real,
    pub(crate) inv_far: Real,
}

impl Default for ViewFrustum {
    /// The zero frustum: apex at the origin, identity axes, and all distances set to zero.
    fn default() -> Self {
        Self {
            origin: Point::origin(),
            axis: Matrix::identity(),
            near: 0.0,
            far: 0.0,
            far_left: 0.0,
            far_up: 0.0,
            inv_far: 0.0,
        }
    }
}

impl ViewFrustum {
    /// Creates a new view frustum.
    ///
    /// # Panics
    ///
    /// Panics if `near` is negative, if `far` is smaller than `near` or not strictly positive,
    /// or if one of the far-plane half-widths is negative.
    pub fn new(
        origin: Point<Real>,
        axis: Matrix<Real>,
        near: Real,
        far: Real,
        far_left: Real,
        far_up: Real,
    ) -> Self {
        let mut result = Self {
            origin,
            axis,
            ..Self::default()
        };
        result.set_size(near, far, far_left, far_up);
        result
    }

    /// The apex of this frustum.
    #[inline]
    pub fn origin(&self) -> &Point<Real> {
        &self.origin
    }

    /// The axes of this frustum: view direction, left, and up, one per column.
    #[inline]
    pub fn axis(&self) -> &Matrix<Real> {
        &self.axis
    }

    /// The view direction of this frustum.
    #[inline]
    pub fn view_dir(&self) -> Vector<Real> {
        self.axis.column(0).into_owned()
    }

    /// The distance from the apex to the near plane.
    #[inline]
    pub fn near(&self) -> Real {
        self.near
    }

    /// The distance from the apex to the far plane.
    #[inline]
    pub fn far(&self) -> Real {
        self.far
    }

    /// Half the width of the far plane, along the left axis.
    #[inline]
    pub fn far_left(&self) -> Real {
        self.far_left
    }

    /// Half the height of the far plane, along the up axis.
    #[inline]
    pub fn far_up(&self) -> Real {
        self.far_up
    }

    /// The inverse of the far distance, or zero for the zero frustum.
    #[inline]
    pub fn inv_far(&self) -> Real {
        self.inv_far
    }

    /// Is this frustum the zero frustum left behind by a failed fit?
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.far == 0.0
    }

    /// Sets the apex of this frustum.
    #[inline]
    pub fn set_origin(&mut self, origin: Point<Real>) {
        self.origin = origin;
    }

    /// Sets the axes of this frustum. The columns of `axis` must be orthonormal.
    #[inline]
    pub fn set_axis(&mut self, axis: Matrix<Real>) {
        self.axis = axis;
    }

    /// Sets the distances and far-plane half-extents of this frustum.
    ///
    /// # Panics
    ///
    /// Panics if `near` is negative, if `far` is smaller than `near` or not strictly positive,
    /// or if one of the far-plane half-widths is negative.
    pub fn set_size(&mut self, near: Real, far: Real, far_left: Real, far_up: Real) {
        assert!(near >= 0.0, "The near distance must be positive.");
        assert!(
            far >= near && far > 0.0,
            "The far distance must be positive and not less than the near distance."
        );
        assert!(
            far_left >= 0.0 && far_up >= 0.0,
            "The far plane extents must be positive."
        );

        self.near = near;
        self.far = far;
        self.far_left = far_left;
        self.far_up = far_up;
        self.inv_far = 1.0 / far;
    }

    /// Sets the shape of this frustum from a horizontal field of view, in degrees, and the
    /// width/height aspect ratio of the near plane.
    pub fn set_perspective_by_fovx(&mut self, fovx: Real, aspect: Real, z_near: Real, z_far: Real) {
        let width = 2.0 * z_near * (fovx * 0.5).to_radians().tan();
        let height = width / aspect;
        self.set_perspective_by_width(width, height, z_near, z_far);
    }

    /// Sets the shape of this frustum from the width and height of its near plane.
    ///
    /// # Panics
    ///
    /// Panics if `z_near` is not positive or if `z_far` is smaller than `z_near`.
    pub fn set_perspective_by_width(&mut self, width: Real, height: Real, z_near: Real, z_far: Real) {
        assert!(z_near > 0.0, "The near distance must be strictly positive.");
        let to_far = z_far / z_near;
        self.set_size(z_near, z_far, width * 0.5 * to_far, height * 0.5 * to_far);
    }

    /// Sets the shape of this frustum from a horizontal field of view, in degrees, and the
    /// dimensions of its near plane. The near distance is derived from the field of view, and
    /// the far plane lies `depth` beyond the near plane.
    pub fn set_perspective_by_fovx_width(&mut self, fovx: Real, width: Real, height: Real, depth: Real) {
        let z_near = width / (2.0 * (fovx * 0.5).to_radians().tan());
        self.set_perspective_by_width(width, height, z_near, z_near + depth);
    }

    /// Same as [`Self::set_perspective_by_fovx_width`], with the height of the near plane
    /// derived from the width/height aspect ratio.
    pub fn set_perspective_by_fovx_aspect_width(
        &mut self,
        fovx: Real,
        aspect: Real,
        width: Real,
        depth: Real,
    ) {
        self.set_perspective_by_fovx_width(fovx, width, width / aspect, depth);
    }

    /// Moves the near plane, keeping everything else unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `near` is negative or larger than the far distance.
    pub fn move_near_distance(&mut self, near: Real) {
        assert!(
            near >= 0.0 && near <= self.far,
            "The near distance must lie between zero and the far distance."
        );
        self.near = near;
    }

    /// Moves the far plane while keeping the opening angles of this frustum.
    ///
    /// # Panics
    ///
    /// Panics if `far` is smaller than the near distance or not strictly positive.
    pub fn move_far_distance(&mut self, far: Real) {
        assert!(
            far >= self.near && far > 0.0,
            "The far distance must be positive and not less than the near distance."
        );
        let scale = far * self.inv_far;
        self.far_left *= scale;
        self.far_up *= scale;
        self.far = far;
        self.inv_far = 1.0 / far;
    }

    /// Expresses this frustum in the frame with the given origin and axes (one per column).
    #[inline]
    pub fn localized_in(&self, origin: &Point<Real>, axis: &Matrix<Real>) -> Self {
        Self {
            origin: axis.tr_mul(&(self.origin - origin)).into(),
            axis: axis.tr_mul(&self.axis),
            ..*self
        }
    }

    /// Expresses a world-space point in the local frame of this frustum.
    #[inline]
    pub fn to_local_point(&self, point: &Point<Real>) -> Point<Real> {
        self.axis.tr_mul(&(point - self.origin)).into()
    }

    /// The half-extents, along the left and up axes, of the cross-section at the near plane.
    #[inline]
    fn near_scaled_sides(&self) -> (Vector<Real>, Vector<Real>) {
        let scale = self.near * self.inv_far;
        (
            self.axis.column(1) * (self.far_left * scale),
            self.axis.column(2) * (self.far_up * scale),
        )
    }

    /// The eight corners of this frustum.
    ///
    /// The four near-plane corners come first, then the four far-plane corners, each ring in
    /// the order `(+left, +up)`, `(-left, +up)`, `(-left, -up)`, `(+left, -up)`.
    pub fn to_points(&self) -> [Point<Real>; 8] {
        let near_center = self.origin + self.axis.column(0) * self.near;
        let (left, up) = self.near_scaled_sides();
        let far_center = self.origin + self.axis.column(0) * self.far;
        let far_left = self.axis.column(1) * self.far_left;
        let far_up = self.axis.column(2) * self.far_up;

        [
            near_center + left + up,
            near_center - left + up,
            near_center - left - up,
            near_center + left - up,
            far_center + far_left + far_up,
            far_center - far_left + far_up,
            far_center - far_left - far_up,
            far_center + far_left - far_up,
        ]
    }

    /// The corners of this frustum once each of its four lateral edges is cut at the fraction
    /// `fractions[i]` of its length from the apex.
    ///
    /// The near corners and the order of the corners are the same as for [`Self::to_points`].
    pub fn to_clipped_points(&self, fractions: &[Real; 4]) -> [Point<Real>; 8] {
        let mut points = self.to_points();
        let far = self.axis.column(0) * self.far;
        let far_left = self.axis.column(1) * self.far_left;
        let far_up = self.axis.column(2) * self.far_up;
        let edges = [
            far + far_left + far_up,
            far - far_left + far_up,
            far - far_left - far_up,
            far + far_left - far_up,
        ];

        for i in 0..4 {
            points[4 + i] = self.origin + edges[i] * fractions[i];
        }

        points
    }

    /// The eight corners of this frustum, indexed by their position.
    ///
    /// Bit 0 of the index selects the `+up` side, bit 1 the `+left` side, and bit 2 the far
    /// plane.
    pub fn to_index_points(&self) -> [Point<Real>; 8] {
        self.to_index_points_and_corner_vecs().0
    }

    /// The index points of this frustum (see [`Self::to_index_points`]) along with the vectors
    /// from the apex to its far corners.
    ///
    /// The corner vector `k` points toward the index point `4 + k`.
    pub fn to_index_points_and_corner_vecs(&self) -> ([Point<Real>; 8], [Vector<Real>; 4]) {
        let near_center = self.origin + self.axis.column(0) * self.near;
        let (left, up) = self.near_scaled_sides();
        let far = self.axis.column(0) * self.far;
        let far_left = self.axis.column(1) * self.far_left;
        let far_up = self.axis.column(2) * self.far_up;

        let corner_vecs = [
            far - far_left - far_up,
            far - far_left + far_up,
            far + far_left - far_up,
            far + far_left + far_up,
        ];

        let index_points = [
            near_center - left - up,
            near_center - left + up,
            near_center + left - up,
            near_center + left + up,
            self.origin + corner_vecs[0],
            self.origin + corner_vecs[1],
            self.origin + corner_vecs[2],
            self.origin + corner_vecs[3],
        ];

        (index_points, corner_vecs)
    }

    /// The index of the index point with the smallest projection on `dir`.
    ///
    /// `corner_vecs` must come from [`Self::to_index_points_and_corner_vecs`].
    #[inline]
    pub(crate) fn min_index(&self, corner_vecs: &[Vector<Real>; 4], dir: &Vector<Real>) -> usize {
        let dy = dir.dot(&self.axis.column(1));
        let dz = dir.dot(&self.axis.column(2));
        let index = (sign_bit(dy) << 1) | sign_bit(dz);
        index | (sign_bit(dir.dot(&corner_vecs[index])) << 2)
    }

    /// Projects this frustum on `dir` using precomputed index points and corner vectors.
    pub(crate) fn project_on_axis_with(
        &self,
        index_points: &[Point<Real>; 8],
        corner_vecs: &[Vector<Real>; 4],
        dir: &Vector<Real>,
    ) -> (Real, Real) {
        let min = index_points[self.min_index(corner_vecs, dir)]
            .coords
            .dot(dir);
        let max = index_points[self.min_index(corner_vecs, &-dir)]
            .coords
            .dot(dir);
        (min, max)
    }

    /// Projects this frustum on `dir`, which does not need to be normalized.
    ///
    /// Returns the `(min, max)` interval of the projection.
    pub fn project_on_axis(&self, dir: &Vector<Real>) -> (Real, Real) {
        let (index_points, corner_vecs) = self.to_index_points_and_corner_vecs();
        self.project_on_axis_with(&index_points, &corner_vecs, dir)
    }

    /// Projects this frustum on each column of `axis`.
    pub fn axis_projection(&self, axis: &Matrix<Real>) -> Aabb {
        let (index_points, corner_vecs) = self.to_index_points_and_corner_vecs();
        let mut result = Aabb::new_invalid();

        for i in 0..DIM {
            let (min, max) =
                self.project_on_axis_with(&index_points, &corner_vecs, &axis.column(i).into_owned());
            result.mins[i] = min;
            result.maxs[i] = max;
        }

        result
    }

    /// The world-space AABB of this frustum.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.axis_projection(&Matrix::identity())
    }

    /// The signed distance from this frustum to `plane`.
    ///
    /// This is zero if the frustum crosses the plane, positive if it lies entirely in front of
    /// it, and negative if it lies entirely behind it.
    pub fn plane_distance(&self, plane: &Plane) -> Real {
        let (min, max) = self.project_on_axis(&plane.normal);

        if min + plane.offset > 0.0 {
            min + plane.offset
        } else if max + plane.offset < 0.0 {
            max + plane.offset
        } else {
            0.0
        }
    }

    /// Classifies this frustum against `plane`, with a tolerance band of `epsilon`.
    pub fn plane_side(&self, plane: &Plane, epsilon: Real) -> PlaneSide {
        let (min, max) = self.project_on_axis(&plane.normal);

        if min + plane.offset > epsilon {
            PlaneSide::Front
        } else if max + plane.offset < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::Cross
        }
    }

    /// The six planes bounding this frustum in its local frame, as unnormalized
    /// `(normal, offset)` pairs.
    ///
    /// The order is near, far, left, right, up, down. The normals point outward, so
    /// `normal · p + offset` is positive for points outside of the corresponding plane.
    #[inline]
    pub(crate) fn local_planes(&self) -> [(Vector<Real>, Real); 6] {
        [
            (Vector::new(-1.0, 0.0, 0.0), self.near),
            (Vector::new(1.0, 0.0, 0.0), -self.far),
            (Vector::new(-self.far_left, self.far, 0.0), 0.0),
            (Vector::new(-self.far_left, -self.far, 0.0), 0.0),
            (Vector::new(-self.far_up, 0.0, self.far), 0.0),
            (Vector::new(-self.far_up, 0.0, -self.far), 0.0),
        ]
    }

    /// The six world-space planes bounding this frustum, with their normals pointing outward.
    ///
    /// The order is near, far, left, right, up, down.
    pub fn to_planes(&self) -> [Plane; 6] {
        self.local_planes().map(|(normal, offset)| {
            let inv_norm = 1.0 / normal.norm();
            let world_normal = self.axis * normal * inv_norm;
            Plane::new(
                Unit::new_unchecked(world_normal),
                offset * inv_norm - world_normal.dot(&self.origin.coords),
            )
        })
    }

    /// Does this frustum contain the given world-space point?
    #[inline]
    pub fn contains_point(&self, point: &Point<Real>) -> bool {
        !self.cull_point(point)
    }

    /// Projects a world-space point on the far plane of this frustum.
    ///
    /// The result holds the normalized horizontal coordinate (`-1` on the left edge, `1` on the
    /// right edge), the normalized vertical coordinate (`-1` on the bottom edge, `1` on the top
    /// edge), and the depth of the point along the view direction.
    pub fn project_point(&self, point: &Point<Real>) -> Point<Real> {
        let local = self.to_local_point(point);
        let x = local.y * self.far / (local.x * self.far_left);
        let y = local.z * self.far / (local.x * self.far_up);
        Point::new(-x, y, local.x)
    }
}

impl AbsDiffEq for ViewFrustum {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.origin.abs_diff_eq(&other.origin, epsilon)
            && self.axis.abs_diff_eq(&other.axis, epsilon)
            && self.near.abs_diff_eq(&other.near, epsilon)
            && self.far.abs_diff_eq(&other.far, epsilon)
            && self.far_left.abs_diff_eq(&other.far_left, epsilon)
            && self.far_up.abs_diff_eq(&other.far_up, epsilon)
    }
}

impl RelativeEq for ViewFrustum {
    fn default_max_relative() -> Real {
        Real::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
        self.origin.relative_eq(&other.origin, epsilon, max_relative)
            && self.axis.relative_eq(&other.axis, epsilon, max_relative)
            && self.near.relative_eq(&other.near, epsilon, max_relative)
            && self.far.relative_eq(&other.far, epsilon, max_relative)
            && self
                .far_left
                .relative_eq(&other.far_left, epsilon, max_relative)
            && self.far_up.relative_eq(&other.far_up, epsilon, max_relative)
    }
}
