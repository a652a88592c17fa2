use crate::bounding_volume::details::box_corners;
use crate::bounding_volume::{Aabb, OrientedBox, ViewFrustum};
use crate::math::{Matrix, Point, Real};

/// The edges of a polyhedron given as two rings of four corners: the four edges joining both
/// rings, the first ring, then the second ring.
const RING_EDGES: [[usize; 2]; 12] = [
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
];

fn ring_edges(test_first_ring: bool) -> impl Iterator<Item = &'static [usize; 2]> {
    RING_EDGES
        .iter()
        .enumerate()
        .filter(move |(i, _)| test_first_ring || !(4..8).contains(i))
        .map(|(_, edge)| edge)
}

/// Swaps the index points of a frustum so both of its rings are stored in loop order.
#[inline]
fn index_points_to_rings(mut index_points: [Point<Real>; 8]) -> [Point<Real>; 8] {
    index_points.swap(2, 3);
    index_points.swap(6, 7);
    index_points
}

/// Tests if an edge of the polyhedron with corners `points` crosses `frustum`, or lies inside
/// of it.
///
/// `points` are expressed in the local frame of `frustum`, as two rings of four corners in loop
/// order, each corner of the first ring being joined to the corner with the same position in
/// the second ring. This fits both box corners and frustum corners. The edges of the first
/// ring are skipped unless `test_first_ring` is `true`.
pub fn local_frustum_intersects_frustum(
    frustum: &ViewFrustum,
    points: &[Point<Real>; 8],
    test_first_ring: bool,
) -> bool {
    ring_edges(test_first_ring)
        .any(|[a, b]| frustum.intersects_local_segment(&points[*a], &points[*b]))
}

/// Tests if an edge of the polyhedron with corners `points` intersects `aabb`.
///
/// `points` follow the same layout as for [`local_frustum_intersects_frustum`] and are
/// expressed in the same frame as `aabb`.
pub fn local_frustum_intersects_aabb(
    aabb: &Aabb,
    points: &[Point<Real>; 8],
    test_first_ring: bool,
) -> bool {
    ring_edges(test_first_ring).any(|[a, b]| aabb.intersects_segment(&points[*a], &points[*b]))
}

impl ViewFrustum {
    /// The copy of this frustum expressed in its own local frame.
    #[inline]
    pub(crate) fn to_local(&self) -> Self {
        Self {
            origin: Point::origin(),
            axis: Matrix::identity(),
            ..*self
        }
    }

    /// Tests if this frustum intersects `aabb`.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if self.cull_aabb(aabb) {
            return false;
        }

        let (index_points, corner_vecs) = self.to_index_points_and_corner_vecs();
        if aabb.culls_local_frustum(self, &index_points, &corner_vecs) {
            return false;
        }

        let points = index_points_to_rings(index_points);
        if local_frustum_intersects_aabb(aabb, &points, self.near > 0.0) {
            return true;
        }

        let local_corners = aabb.vertices().map(|pt| self.to_local_point(&pt));
        local_frustum_intersects_frustum(&self.to_local(), &local_corners, true)
    }

    /// Tests if this frustum intersects `obb`.
    pub fn intersects_box(&self, obb: &OrientedBox) -> bool {
        if obb.is_empty() || self.cull_box(obb) {
            return false;
        }

        let in_box = self.localized_in(&obb.center, &obb.axis);
        let box_bounds = Aabb::from_half_extents(Point::origin(), obb.half_extents);
        let (index_points, corner_vecs) = in_box.to_index_points_and_corner_vecs();
        if box_bounds.culls_local_frustum(&in_box, &index_points, &corner_vecs) {
            return false;
        }

        let points = index_points_to_rings(index_points);
        if local_frustum_intersects_aabb(&box_bounds, &points, self.near > 0.0) {
            return true;
        }

        let local_corners = box_corners(
            &self.to_local_point(&obb.center),
            &obb.half_extents,
            &self.axis.tr_mul(&obb.axis),
        );
        local_frustum_intersects_frustum(&self.to_local(), &local_corners, true)
    }

    /// Tests if this frustum intersects `other`.
    pub fn intersects_frustum(&self, other: &ViewFrustum) -> bool {
        let other_in_self = other.localized_in(&self.origin, &self.axis);
        let (points1, corner_vecs1) = other_in_self.to_index_points_and_corner_vecs();
        if self.cull_local_frustum(&other_in_self, &points1, &corner_vecs1) {
            return false;
        }

        let self_in_other = self.localized_in(&other.origin, &other.axis);
        let (points2, corner_vecs2) = self_in_other.to_index_points_and_corner_vecs();
        if other.cull_local_frustum(&self_in_other, &points2, &corner_vecs2) {
            return false;
        }

        let points1 = index_points_to_rings(points1);
        if local_frustum_intersects_frustum(&self.to_local(), &points1, other.near > 0.0) {
            return true;
        }

        let points2 = index_points_to_rings(points2);
        local_frustum_intersects_frustum(&other.to_local(), &points2, self.near > 0.0)
    }
}
