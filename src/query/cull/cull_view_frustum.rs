use crate::bounding_volume::{Aabb, BoundingSphere, OrientedBox, ViewFrustum};
use crate::math::{Matrix, Point, Real, Vector, DIM};

impl ViewFrustum {
    /// Is `point` outside of this frustum?
    pub fn cull_point(&self, point: &Point<Real>) -> bool {
        let local = self.to_local_point(point);
        let scale = local.x * self.inv_far;

        local.x < self.near
            || local.x > self.far
            || local.y.abs() > self.far_left * scale
            || local.z.abs() > self.far_up * scale
    }

    /// Tests if one of the planes of this frustum separates it from a box expressed in the
    /// local frame of this frustum.
    ///
    /// `axis` holds the box axes (one per column) in the frame of this frustum.
    pub(crate) fn cull_local_box(
        &self,
        center: &Point<Real>,
        half_extents: &Vector<Real>,
        axis: &Matrix<Real>,
    ) -> bool {
        let depth_extent: Real = (0..DIM)
            .map(|j| (half_extents[j] * axis[(0, j)]).abs())
            .sum();

        if self.near - center.x - depth_extent > 0.0 || center.x - self.far - depth_extent > 0.0 {
            return true;
        }

        self.side_culls_local_box(center, half_extents, axis, 1, self.far_left)
            || self.side_culls_local_box(center, half_extents, axis, 2, self.far_up)
    }

    /// Tests the side plane along the frame axis `k` facing the box center: left or right for
    /// `k = 1`, up or down for `k = 2`.
    fn side_culls_local_box(
        &self,
        center: &Point<Real>,
        half_extents: &Vector<Real>,
        axis: &Matrix<Real>,
        k: usize,
        far_side: Real,
    ) -> bool {
        let side: Real = if center[k] < 0.0 { -1.0 } else { 1.0 };
        let d1 = self.far * center[k] * side - far_side * center.x;
        let d2: Real = (0..DIM)
            .map(|j| (half_extents[j] * (self.far * side * axis[(k, j)] - far_side * axis[(0, j)])).abs())
            .sum();

        d1 - d2 > 0.0
    }

    /// Tests if one of the planes of this frustum separates it from `aabb`.
    ///
    /// This is conservative: a `false` result does not imply an intersection.
    pub fn cull_aabb(&self, aabb: &Aabb) -> bool {
        self.cull_local_box(
            &self.to_local_point(&aabb.center()),
            &aabb.half_extents(),
            &self.axis.transpose(),
        )
    }

    /// Tests if one of the planes of this frustum separates it from `obb`.
    ///
    /// This is conservative: a `false` result does not imply an intersection.
    pub fn cull_box(&self, obb: &OrientedBox) -> bool {
        self.cull_local_box(
            &self.to_local_point(&obb.center),
            &obb.half_extents,
            &self.axis.tr_mul(&obb.axis),
        )
    }

    /// Tests if one of the planes of this frustum separates it from `sphere`.
    ///
    /// This is conservative: a `false` result does not imply an intersection.
    pub fn cull_sphere(&self, sphere: &BoundingSphere) -> bool {
        let center = self.to_local_point(&sphere.center);
        let r = sphere.radius;

        if self.near - center.x > r || center.x - self.far > r {
            return true;
        }

        let sq_r = r * r;
        let sq_far = self.far * self.far;

        // Only the side plane facing the center can separate. The distance to it is `d`
        // divided by the norm of its normal.
        let d = self.far * center.y.abs() - self.far_left * center.x;
        if d > 0.0 && d * d > sq_r * (sq_far + self.far_left * self.far_left) {
            return true;
        }

        let d = self.far * center.z.abs() - self.far_up * center.x;
        d > 0.0 && d * d > sq_r * (sq_far + self.far_up * self.far_up)
    }

    /// Tests if one of the planes of this frustum separates it from `local`, another frustum
    /// expressed in the local frame of this one.
    ///
    /// `index_points` and `corner_vecs` must come from
    /// [`ViewFrustum::to_index_points_and_corner_vecs`] called on `local`.
    pub fn cull_local_frustum(
        &self,
        local: &ViewFrustum,
        index_points: &[Point<Real>; 8],
        corner_vecs: &[Vector<Real>; 4],
    ) -> bool {
        self.local_planes().iter().any(|(normal, offset)| {
            let index = local.min_index(corner_vecs, normal);
            normal.dot(&index_points[index].coords) + offset > 0.0
        })
    }

    /// Tests if one of the planes of this frustum separates it from `other`.
    ///
    /// This is conservative: a `false` result does not imply an intersection.
    pub fn cull_frustum(&self, other: &ViewFrustum) -> bool {
        let local = other.localized_in(&self.origin, &self.axis);
        let (index_points, corner_vecs) = local.to_index_points_and_corner_vecs();
        self.cull_local_frustum(&local, &index_points, &corner_vecs)
    }
}

impl Aabb {
    /// Tests if one of the faces of this AABB separates it from the frustum `local`, expressed
    /// in the same frame as this AABB.
    ///
    /// `index_points` and `corner_vecs` must come from
    /// [`ViewFrustum::to_index_points_and_corner_vecs`] called on `local`.
    pub fn culls_local_frustum(
        &self,
        local: &ViewFrustum,
        index_points: &[Point<Real>; 8],
        corner_vecs: &[Vector<Real>; 4],
    ) -> bool {
        for i in 0..DIM {
            let lowest = index_points[local.min_index(corner_vecs, &Vector::ith(i, 1.0))];
            if lowest[i] > self.maxs[i] {
                return true;
            }

            let highest = index_points[local.min_index(corner_vecs, &Vector::ith(i, -1.0))];
            if highest[i] < self.mins[i] {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod test {
    use crate::bounding_volume::{Aabb, BoundingSphere, OrientedBox, ViewFrustum};
    use crate::math::{Matrix, Point, Vector};
    use crate::utils::orthonormal_frame;

    fn frustum() -> ViewFrustum {
        ViewFrustum::new(Point::new(-5.0, 0.0, 0.0), Matrix::identity(), 1.0, 10.0, 5.0, 5.0)
    }

    #[test]
    fn unit_box_scenario() {
        let f = frustum();
        let obb = OrientedBox::new(Point::origin(), Vector::repeat(1.0), Matrix::identity());
        assert!(!f.cull_box(&obb));
        assert!(!f.cull_aabb(&obb.aabb()));

        let moved = obb.translated(&Vector::new(0.0, 0.0, 20.0));
        assert!(f.cull_box(&moved));
        assert!(f.cull_aabb(&moved.aabb()));

        let behind = obb.translated(&Vector::new(-10.0, 0.0, 0.0));
        assert!(f.cull_box(&behind));
    }

    #[test]
    fn rotated_box_straddling_a_side_plane() {
        let f = frustum();
        // Centered just outside of the left plane, but its rotated extent reaches inside.
        let obb = OrientedBox::new(
            Point::new(0.0, 3.0, 0.0),
            Vector::new(2.0, 0.1, 0.1),
            orthonormal_frame(&Vector::new(1.0, -1.0, 0.0).normalize()),
        );
        assert!(!f.cull_box(&obb));
        assert!(f.cull_box(&obb.translated(&Vector::new(0.0, 5.0, 0.0))));
    }

    #[test]
    fn spheres() {
        let f = frustum();
        assert!(!f.cull_sphere(&BoundingSphere::new(Point::new(0.0, 0.0, 0.0), 0.1)));
        assert!(!f.cull_sphere(&BoundingSphere::new(Point::new(0.0, 3.0, 0.0), 1.0)));
        assert!(f.cull_sphere(&BoundingSphere::new(Point::new(0.0, 6.0, 0.0), 1.0)));
        assert!(f.cull_sphere(&BoundingSphere::new(Point::new(0.0, 0.0, -7.0), 1.0)));
        assert!(f.cull_sphere(&BoundingSphere::new(Point::new(-7.0, 0.0, 0.0), 1.0)));
        assert!(f.cull_sphere(&BoundingSphere::new(Point::new(8.0, 0.0, 0.0), 2.0)));
        assert!(!f.cull_sphere(&BoundingSphere::new(Point::new(6.0, 0.0, 0.0), 2.0)));
    }

    #[test]
    fn points() {
        let f = frustum();
        assert!(!f.cull_point(&Point::new(0.0, 2.0, -2.0)));
        assert!(f.cull_point(&Point::new(0.0, 3.0, 0.0)));
        assert!(f.cull_point(&Point::new(-4.5, 0.0, 0.0)));
        assert!(f.cull_point(&Point::new(5.5, 0.0, 0.0)));
    }

    #[test]
    fn frustums() {
        let f = frustum();
        let mut other = f;
        assert!(!f.cull_frustum(&other));

        other.set_origin(Point::new(-5.0, 0.0, 50.0));
        assert!(f.cull_frustum(&other));

        // Looking back at the first frustum from its far side.
        let facing = ViewFrustum::new(
            Point::new(10.0, 0.0, 0.0),
            orthonormal_frame(&-Vector::x()),
            1.0,
            10.0,
            5.0,
            5.0,
        );
        assert!(!f.cull_frustum(&facing));
        assert!(!facing.cull_frustum(&f));
    }

    #[test]
    fn aabb_culls_frustum() {
        let f = frustum();
        let (index_points, corner_vecs) = f.to_index_points_and_corner_vecs();

        let inside = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        assert!(!inside.culls_local_frustum(&f, &index_points, &corner_vecs));

        let above = Aabb::from_half_extents(Point::new(0.0, 0.0, 10.0), Vector::repeat(1.0));
        assert!(above.culls_local_frustum(&f, &index_points, &corner_vecs));

        let behind = Aabb::from_half_extents(Point::new(-10.0, 0.0, 0.0), Vector::repeat(1.0));
        assert!(behind.culls_local_frustum(&f, &index_points, &corner_vecs));
    }
}
