use crate::bounding_volume::Aabb;
use crate::math::DIM;
use crate::query::{Ray, RayInterval};

impl Aabb {
    /// Computes where the line supporting `ray` crosses the boundary of this AABB.
    ///
    /// Both directions along the ray are considered, so the returned parameters may be
    /// negative.
    pub fn ray_interval(&self, ray: &Ray) -> RayInterval {
        let mut interval = RayInterval::empty(self.contains_local_point(&ray.origin));
        let end = ray.origin + ray.dir;

        for i in 0..DIM {
            let j = (i + 1) % DIM;
            let k = (i + 2) % DIM;

            for bound in [self.mins[i], self.maxs[i]] {
                let d1 = ray.origin[i] - bound;
                let d2 = end[i] - bound;

                if d1 != d2 {
                    let f = d1 / (d1 - d2);
                    let pt = ray.point_at(f);

                    if self.mins[j] <= pt[j]
                        && pt[j] <= self.maxs[j]
                        && self.mins[k] <= pt[k]
                        && pt[k] <= self.maxs[k]
                    {
                        interval.take(f);
                    }
                }
            }
        }

        interval
    }
}

#[cfg(test)]
mod test {
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Vector};
    use crate::query::Ray;

    #[test]
    fn line_through_the_center() {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        let interval = aabb.ray_interval(&Ray::new(Point::new(-3.0, 0.0, 0.0), Vector::x()));

        assert!(!interval.start_inside);
        assert_relative_eq!(interval.scale1, 2.0);
        assert_relative_eq!(interval.scale2, 4.0);
    }

    #[test]
    fn line_behind_the_origin() {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        let interval = aabb.ray_interval(&Ray::new(Point::new(3.0, 0.5, 0.0), Vector::x() * 2.0));

        assert!(interval.crosses());
        assert_relative_eq!(interval.scale1, -2.0);
        assert_relative_eq!(interval.scale2, -1.0);
    }

    #[test]
    fn missed_line() {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        let interval = aabb.ray_interval(&Ray::new(Point::new(0.0, 3.0, 0.0), Vector::x()));
        assert!(!interval.crosses());
        assert_eq!(interval.hit(), None);
    }
}
