use crate::bounding_volume::ViewFrustum;
use crate::math::{Point, Real};
use crate::query::{Ray, RayInterval};
use crate::utils::sign_bit;

impl ViewFrustum {
    /// Does the point `pt`, lying on the plane `plane` of [`ViewFrustum::local_planes`], lie on
    /// the corresponding face of this frustum?
    ///
    /// Everything is expressed in the local frame of this frustum.
    fn local_face_contains(&self, plane: usize, pt: &Point<Real>) -> bool {
        let left_scale = self.far_left * self.inv_far;
        let up_scale = self.far_up * self.inv_far;

        match plane {
            0 => pt.y.abs() <= self.near * left_scale && pt.z.abs() <= self.near * up_scale,
            1 => pt.y.abs() <= self.far_left && pt.z.abs() <= self.far_up,
            2 | 3 => {
                self.near <= pt.x && pt.x <= self.far && pt.z.abs() <= pt.x * up_scale
            }
            _ => self.near <= pt.x && pt.x <= self.far && pt.y.abs() <= pt.x * left_scale,
        }
    }

    /// Tests if the segment `[start, end]`, expressed in the local frame of this frustum,
    /// intersects this frustum.
    pub fn intersects_local_segment(&self, start: &Point<Real>, end: &Point<Real>) -> bool {
        let dir = end - start;
        let mut start_inside = true;

        for (i, (normal, offset)) in self.local_planes().iter().enumerate() {
            if i == 0 && self.near <= 0.0 {
                continue;
            }

            let d1 = normal.dot(&start.coords) + offset;
            let d2 = normal.dot(&end.coords) + offset;
            start_inside &= d1 < 0.0;

            if d1 != 0.0 && sign_bit(d1) != sign_bit(d2) {
                let hit = start + dir * (d1 / (d1 - d2));
                if self.local_face_contains(i, &hit) {
                    return true;
                }
            }
        }

        start_inside
    }

    /// Tests if the world-space segment `[start, end]` intersects this frustum.
    #[inline]
    pub fn intersects_segment(&self, start: &Point<Real>, end: &Point<Real>) -> bool {
        self.intersects_local_segment(&self.to_local_point(start), &self.to_local_point(end))
    }

    /// Computes where the line supporting `ray`, expressed in the local frame of this frustum,
    /// crosses the boundary of this frustum.
    pub fn local_ray_intersection(&self, ray: &Ray) -> RayInterval {
        let end = ray.point_at(1.0);
        let mut interval = RayInterval::empty(true);

        for (i, (normal, offset)) in self.local_planes().iter().enumerate() {
            if i == 0 && self.near <= 0.0 {
                continue;
            }

            let d1 = normal.dot(&ray.origin.coords) + offset;
            let d2 = normal.dot(&end.coords) + offset;
            interval.start_inside &= d1 < 0.0;

            if d1 != d2 {
                let f = d1 / (d1 - d2);
                if self.local_face_contains(i, &ray.point_at(f)) {
                    interval.take(f);
                }
            }
        }

        interval
    }

    /// Computes the parameters at which the line supporting the world-space `ray` enters and
    /// exits this frustum.
    ///
    /// Both directions along the ray are considered. Returns `None` if the line misses the
    /// frustum.
    #[inline]
    pub fn ray_intersection(&self, ray: &Ray) -> Option<(Real, Real)> {
        self.local_ray_intersection(&ray.localized_in(&self.origin, &self.axis))
            .hit()
    }
}
