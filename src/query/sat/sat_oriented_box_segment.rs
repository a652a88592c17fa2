use crate::bounding_volume::{Aabb, OrientedBox};
use crate::math::{Point, Real, Vector};

/// Tests if the segment `[start, end]` overlaps the box centered at the origin with the given
/// half-extents and aligned with the coordinate axes.
///
/// Only six axes need to be tested: the three box axes and their cross products with the
/// segment direction.
pub fn local_box_segment_overlap(
    half_extents: &Vector<Real>,
    start: &Point<Real>,
    end: &Point<Real>,
) -> bool {
    let e = half_extents;
    let half_dir = (end - start) * 0.5;
    let mid = start.coords + half_dir;
    let ld = half_dir.abs();

    for i in 0..3 {
        if mid[i].abs() > e[i] + ld[i] {
            return false;
        }
    }

    let cross = half_dir.cross(&mid);

    if cross.x.abs() > e.y * ld.z + e.z * ld.y {
        return false;
    }
    if cross.y.abs() > e.x * ld.z + e.z * ld.x {
        return false;
    }
    if cross.z.abs() > e.x * ld.y + e.y * ld.x {
        return false;
    }

    true
}

impl OrientedBox {
    /// Tests if the segment `[start, end]` intersects this box.
    pub fn intersects_segment(&self, start: &Point<Real>, end: &Point<Real>) -> bool {
        local_box_segment_overlap(
            &self.half_extents,
            &self.to_local_point(start),
            &self.to_local_point(end),
        )
    }
}

impl Aabb {
    /// Tests if the segment `[start, end]` intersects this AABB.
    pub fn intersects_segment(&self, start: &Point<Real>, end: &Point<Real>) -> bool {
        let center = self.center();
        local_box_segment_overlap(
            &self.half_extents(),
            &(start - center.coords),
            &(end - center.coords),
        )
    }
}
