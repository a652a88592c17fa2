use super::SideCull;
use crate::bounding_volume::details::box_corners;
use crate::bounding_volume::{Aabb, BoundingSphere, OrientedBox, ViewFrustum};
use crate::math::{Matrix, Point, Real, Vector};
use crate::query::{Ray, RayInterval};

// The corner rays of a frustum: horizontal and vertical projection coordinates, and the side
// planes the other volume must lie outside of for the ray to be cast.
const CORNER_RAYS: [(Real, Real, SideCull); 4] = [
    (-1.0, -1.0, SideCull::RIGHT.union(SideCull::DOWN)),
    (-1.0, 1.0, SideCull::RIGHT.union(SideCull::UP)),
    (1.0, -1.0, SideCull::LEFT.union(SideCull::DOWN)),
    (1.0, 1.0, SideCull::LEFT.union(SideCull::UP)),
];

/// The projection bounds covering the whole cross-section of a frustum between two depths.
#[inline]
pub(super) fn full_cross_section(min_depth: Real, max_depth: Real) -> Aabb {
    Aabb::new(
        Point::new(min_depth, -1.0, -1.0),
        Point::new(max_depth, 1.0, 1.0),
    )
}

/// The parameters at which a corner ray enters and exits a volume, if it does so in front of
/// the apex.
#[inline]
pub(super) fn forward_hit(interval: &RayInterval) -> Option<(Real, Real)> {
    (interval.crosses() && interval.scale1 >= 0.0).then_some((interval.scale1, interval.scale2))
}

#[inline]
pub(super) fn non_empty(bounds: Aabb) -> Option<Aabb> {
    (!bounds.is_empty()).then_some(bounds)
}

impl ViewFrustum {
    /// The depth of the apex of this frustum along its view direction.
    #[inline]
    pub(super) fn apex_depth(&self) -> Real {
        self.origin.coords.dot(&self.view_dir())
    }

    /// Adds the four edges joining both rings of `points`, expressed in the local frame of this
    /// frustum, to `bounds`.
    ///
    /// Returns the side planes each point lies outside of.
    pub(super) fn add_local_lateral_edges(
        &self,
        points: &[Point<Real>; 8],
        bounds: &mut Aabb,
    ) -> [SideCull; 8] {
        let mut culls = [SideCull::empty(); 8];

        for i in 0..4 {
            let (c1, c2) = self.add_local_segment_set_cull(&points[i], &points[4 + i], bounds);
            culls[i] = c1;
            culls[4 + i] = c2;
        }

        culls
    }

    /// Adds the crossings of the edges of the ring `ring` (`0` or `1`) of `points` with the
    /// side planes of this frustum to `bounds`.
    pub(super) fn add_local_ring(
        &self,
        points: &[Point<Real>; 8],
        culls: &[SideCull; 8],
        ring: usize,
        bounds: &mut Aabb,
    ) {
        for i in 0..4 {
            let p1 = 4 * ring + i;
            let p2 = 4 * ring + (i + 1) % 4;
            self.add_local_segment_use_cull(&points[p1], &points[p2], culls[p1], culls[p2], bounds);
        }
    }

    /// Casts the corner rays of this frustum along which a volume lying outside of the side
    /// planes `outside` may still be seen.
    ///
    /// `hit` receives the world-space direction of a corner ray starting at the apex, scaled to
    /// reach the far plane at parameter `1`, and returns the parameters at which it enters and
    /// exits the volume.
    pub(super) fn add_corner_rays(
        &self,
        outside: SideCull,
        bounds: &mut Aabb,
        mut hit: impl FnMut(&Vector<Real>) -> Option<(Real, Real)>,
    ) {
        for (lateral, vertical, planes) in CORNER_RAYS {
            if !outside.contains(planes) {
                continue;
            }

            let dir = self.axis
                * Vector::new(
                    self.far,
                    self.far_left * lateral,
                    self.far_up * vertical,
                );

            if let Some((s1, s2)) = hit(&dir) {
                bounds.take_point(Point::new(s1 * self.far, lateral, vertical));
                bounds.take_point(Point::new(s2 * self.far, lateral, vertical));
            }
        }
    }

    /// Computes the bounds of `aabb` in the projection space of this frustum.
    ///
    /// See [`Self::projection_bounds_box`].
    pub fn projection_bounds_aabb(&self, aabb: &Aabb) -> Option<Aabb> {
        self.projection_bounds_box(&OrientedBox::from_aabb(
            aabb,
            &Point::origin(),
            &Matrix::identity(),
        ))
    }

    /// Computes the bounds of `obb` in the projection space of this frustum.
    ///
    /// The result holds the depth range of the visible part of the box along `x`, and the
    /// normalized horizontal and vertical coordinates, in `[-1, 1]`, of the part of the
    /// cross-section of this frustum it covers along `y` and `z`. The near and far planes are
    /// not taken into account. Returns `None` if the box is entirely outside of the side
    /// planes of this frustum.
    pub fn projection_bounds_box(&self, obb: &OrientedBox) -> Option<Aabb> {
        let box_bounds = Aabb::from_half_extents(Point::origin(), obb.half_extents);

        if box_bounds.contains_local_point(&obb.to_local_point(&self.origin)) {
            let base = self.apex_depth();
            let (min, max) = obb.project_on_axis(&self.view_dir());
            return Some(full_cross_section(min - base, max - base));
        }

        let points = box_corners(
            &self.to_local_point(&obb.center),
            &obb.half_extents,
            &self.axis.tr_mul(&obb.axis),
        );

        let mut bounds = Aabb::new_invalid();
        let culls = self.add_local_lateral_edges(&points, &mut bounds);
        let culled = culls.iter().fold(SideCull::all(), |acc, c| acc & *c);
        let outside = culls.iter().fold(SideCull::empty(), |acc, c| acc | *c);

        if !culled.is_empty() {
            return None;
        }

        if outside.is_empty() {
            return non_empty(bounds);
        }

        self.add_local_ring(&points, &culls, 0, &mut bounds);
        self.add_local_ring(&points, &culls, 1, &mut bounds);

        let ray_origin = obb.to_local_point(&self.origin);
        self.add_corner_rays(outside, &mut bounds, |dir| {
            forward_hit(&box_bounds.ray_interval(&Ray::new(ray_origin, obb.axis.tr_mul(dir))))
        });

        non_empty(bounds)
    }

    /// Computes the bounds of `sphere` in the projection space of this frustum.
    ///
    /// The sphere is only tested against the side planes: the result covers the whole
    /// cross-section of this frustum, over the depth range of the sphere clamped at the apex.
    /// Returns `None` if the sphere is outside of a side plane, or entirely behind the apex.
    pub fn projection_bounds_sphere(&self, sphere: &BoundingSphere) -> Option<Aabb> {
        let center = self.to_local_point(&sphere.center);
        let sq_r = sphere.radius * sphere.radius;
        let sq_far = self.far * self.far;

        let d = self.far * center.y.abs() - self.far_left * center.x;
        if d > 0.0 && d * d > sq_r * (sq_far + self.far_left * self.far_left) {
            return None;
        }

        let d = self.far * center.z.abs() - self.far_up * center.x;
        if d > 0.0 && d * d > sq_r * (sq_far + self.far_up * self.far_up) {
            return None;
        }

        let base = self.apex_depth();
        let (min, max) = sphere.project_on_axis(&self.view_dir());
        if max - base < 0.0 {
            return None;
        }

        Some(full_cross_section((min - base).max(0.0), max - base))
    }

    /// Computes the bounds of `other` in the projection space of this frustum.
    ///
    /// See [`Self::projection_bounds_box`].
    pub fn projection_bounds_frustum(&self, other: &ViewFrustum) -> Option<Aabb> {
        if other.contains_point(&self.origin) {
            let base = self.apex_depth();
            let (min, max) = other.project_on_axis(&self.view_dir());
            return Some(full_cross_section(min - base, max - base));
        }

        let local = other.localized_in(&self.origin, &self.axis);
        let points = local.to_points();

        let mut bounds = Aabb::new_invalid();
        let culls = self.add_local_lateral_edges(&points, &mut bounds);
        let culled = culls.iter().fold(SideCull::all(), |acc, c| acc & *c);
        let outside = culls.iter().fold(SideCull::empty(), |acc, c| acc | *c);

        if !culled.is_empty() {
            return None;
        }

        if outside.is_empty() {
            return non_empty(bounds);
        }

        if local.near > 0.0 {
            self.add_local_ring(&points, &culls, 0, &mut bounds);
        }
        self.add_local_ring(&points, &culls, 1, &mut bounds);

        let ray_origin = other.to_local_point(&self.origin);
        self.add_corner_rays(outside, &mut bounds, |dir| {
            forward_hit(&other.local_ray_intersection(&Ray::new(ray_origin, other.axis.tr_mul(dir))))
        });

        non_empty(bounds)
    }
}
