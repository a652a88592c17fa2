use crate::bounding_volume::OrientedBox;
use crate::math::{Real, DIM, WORLD_INFINITY};
use crate::query::Ray;

impl OrientedBox {
    /// Computes the parameters at which the line supporting `ray` enters and exits this box.
    ///
    /// Both directions along the ray are considered: if the ray starts inside the box, the
    /// first parameter is negative and the second one positive. Returns `None` if the line
    /// misses the box.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<(Real, Real)> {
        let local = ray.localized_in(&self.center, &self.axis);
        let mut scale0 = -WORLD_INFINITY;
        let mut scale1 = WORLD_INFINITY;

        for i in 0..DIM {
            let e = self.half_extents[i];
            let inside = clip_slab(local.dir[i], -local.origin[i] - e, &mut scale0, &mut scale1)
                && clip_slab(-local.dir[i], local.origin[i] - e, &mut scale0, &mut scale1);

            if !inside {
                return None;
            }
        }

        Some((scale0, scale1))
    }
}

/// Clips the interval `[scale0, scale1]` against the half-space `denom * t >= numer`.
///
/// Returns `false` if nothing of the interval remains.
fn clip_slab(denom: Real, numer: Real, scale0: &mut Real, scale1: &mut Real) -> bool {
    if denom > 0.0 {
        if numer > denom * *scale1 {
            return false;
        }
        if numer > denom * *scale0 {
            *scale0 = numer / denom;
        }
        true
    } else if denom < 0.0 {
        if numer > denom * *scale0 {
            return false;
        }
        if numer > denom * *scale1 {
            *scale1 = numer / denom;
        }
        true
    } else {
        numer <= 0.0
    }
}
