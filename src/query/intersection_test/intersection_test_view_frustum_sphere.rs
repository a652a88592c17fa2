use crate::bounding_volume::{BoundingSphere, ViewFrustum};
use crate::math::{Point, Real, Vector};
use arrayvec::ArrayVec;
use num::Zero;

/// The index points bounding each face of a frustum, in loop order.
///
/// Faces follow the plane order near, far, left, right, up, down.
const FACE_LOOPS: [[usize; 4]; 6] = [
    [0, 1, 3, 2],
    [4, 5, 7, 6],
    [2, 3, 7, 6],
    [0, 1, 5, 4],
    [1, 3, 7, 5],
    [0, 2, 6, 4],
];

/// The position of a point relative to the two planes bounding a frustum along one direction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionSide {
    /// Between both planes.
    Inside = 0,
    /// Outside of the near plane, the right plane, or the down plane.
    Lower = 1,
    /// Outside of the far plane, the left plane, or the up plane.
    Upper = 2,
}

impl RegionSide {
    fn from_digit(digit: usize) -> Self {
        match digit {
            0 => RegionSide::Inside,
            1 => RegionSide::Lower,
            _ => RegionSide::Upper,
        }
    }
}

/// The number of frustum planes a region lies outside of.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Inside of the frustum.
    Interior,
    /// Outside of a single plane.
    Face,
    /// Outside of two planes.
    Edge,
    /// Outside of three planes.
    Corner,
}

/// One of the 27 regions of space delimited by the planes of a view frustum.
///
/// Along each of the depth, lateral, and vertical directions, a point is either between both
/// bounding planes, or outside of one of them. The lateral and vertical directions only consider
/// the side plane facing the point.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrustumRegion {
    /// Position relative to the near (lower) and far (upper) planes.
    pub depth: RegionSide,
    /// Position relative to the right (lower) and left (upper) planes.
    pub lateral: RegionSide,
    /// Position relative to the down (lower) and up (upper) planes.
    pub vertical: RegionSide,
}

impl FrustumRegion {
    /// The index of this region, in `0..27`.
    #[inline]
    pub fn index(&self) -> usize {
        self.depth as usize + 3 * self.lateral as usize + 9 * self.vertical as usize
    }

    /// The region with the given index, if it is smaller than 27.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 27 {
            return None;
        }

        Some(Self {
            depth: RegionSide::from_digit(index % 3),
            lateral: RegionSide::from_digit(index / 3 % 3),
            vertical: RegionSide::from_digit(index / 9),
        })
    }

    /// The kind of this region.
    pub fn kind(&self) -> RegionKind {
        match self.faces().len() {
            0 => RegionKind::Interior,
            1 => RegionKind::Face,
            2 => RegionKind::Edge,
            _ => RegionKind::Corner,
        }
    }

    /// The frustum faces the points of this region lie outside of, in the plane order near,
    /// far, left, right, up, down.
    pub fn faces(&self) -> ArrayVec<usize, 3> {
        let mut faces = ArrayVec::new();
        let sides = [
            (self.depth, 0, 1),
            (self.lateral, 3, 2),
            (self.vertical, 5, 4),
        ];

        for (side, lower, upper) in sides {
            match side {
                RegionSide::Inside => {}
                RegionSide::Lower => faces.push(lower),
                RegionSide::Upper => faces.push(upper),
            }
        }

        faces
    }
}

/// Squared distance from `pt` to the segment `[a, b]`.
fn sq_distance_to_segment(pt: &Point<Real>, a: &Point<Real>, b: &Point<Real>) -> Real {
    let ab = b - a;
    let ap = pt - a;
    let sq_len = ab.norm_squared();

    if sq_len.is_zero() {
        return ap.norm_squared();
    }

    let t = (ap.dot(&ab) / sq_len).clamp(0.0, 1.0);
    (ap - ab * t).norm_squared()
}

/// Squared distance from `pt` to the planar convex quad `quad`, given in loop order.
fn sq_distance_to_quad(pt: &Point<Real>, quad: &[Point<Real>; 4]) -> Real {
    let normal: Vector<Real> = (quad[2] - quad[0]).cross(&(quad[3] - quad[1]));

    if !normal.is_zero() {
        let inside = (0..4).all(|i| {
            let edge = quad[(i + 1) % 4] - quad[i];
            edge.cross(&(pt - quad[i])).dot(&normal) >= 0.0
        });

        if inside {
            let dist = normal.dot(&(pt - quad[0]));
            return dist * dist / normal.norm_squared();
        }
    }

    (0..4)
        .map(|i| sq_distance_to_segment(pt, &quad[i], &quad[(i + 1) % 4]))
        .fold(Real::MAX, Real::min)
}

impl ViewFrustum {
    /// Classifies a point, expressed in the local frame of this frustum, into one of the 27
    /// regions delimited by the planes of this frustum.
    pub fn classify_local_point(&self, pt: &Point<Real>) -> FrustumRegion {
        let depth = if pt.x < self.near {
            RegionSide::Lower
        } else if pt.x > self.far {
            RegionSide::Upper
        } else {
            RegionSide::Inside
        };

        let side = |coord: Real, far_side: Real| {
            if self.far * coord.abs() - far_side * pt.x <= 0.0 {
                RegionSide::Inside
            } else if coord >= 0.0 {
                RegionSide::Upper
            } else {
                RegionSide::Lower
            }
        };

        FrustumRegion {
            depth,
            lateral: side(pt.y, self.far_left),
            vertical: side(pt.z, self.far_up),
        }
    }

    /// The smallest squared distance from a point, expressed in the local frame of this
    /// frustum, to this frustum.
    ///
    /// This is zero if the point is inside of the frustum. Otherwise, whatever the kind of the
    /// region of the point, the result is the smallest distance to the faces listed by
    /// [`FrustumRegion::faces`]: the closest edge or corner of a region is shared by these
    /// faces, so no separate point or line test is needed.
    pub fn local_sq_distance_to_point(&self, pt: &Point<Real>) -> Real {
        let region = self.classify_local_point(pt);
        if region.kind() == RegionKind::Interior {
            return 0.0;
        }

        // The closest point lies on one of the faces the point is outside of.
        let index_points = self.to_local().to_index_points();
        region
            .faces()
            .iter()
            .map(|face| sq_distance_to_quad(pt, &FACE_LOOPS[*face].map(|i| index_points[i])))
            .fold(Real::MAX, Real::min)
    }

    /// Tests if this frustum intersects `sphere`.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        if self.cull_sphere(sphere) {
            return false;
        }

        let center = self.to_local_point(&sphere.center);
        self.local_sq_distance_to_point(&center) <= sphere.radius * sphere.radius
    }
}
