//! Oriented plane.
use crate::math::{Point, Real, Vector};
use na::Unit;

/// The position of a volume relative to a plane.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// The volume lies entirely on the side the plane normal points to.
    Front,
    /// The volume lies entirely behind the plane.
    Back,
    /// The volume straddles the plane, or lies within the tolerance band around it.
    Cross,
}

/// An oriented plane: the set of points `p` such that `normal · p + offset = 0`.
///
/// Points with a positive signed distance are in front of the plane.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Plane {
    /// The plane's unit normal, pointing toward its front side.
    pub normal: Unit<Vector<Real>>,
    /// The signed distance of the world origin to the plane.
    pub offset: Real,
}

impl Plane {
    /// Builds a plane from its unit normal and its offset.
    #[inline]
    pub fn new(normal: Unit<Vector<Real>>, offset: Real) -> Plane {
        Plane { normal, offset }
    }

    /// Builds the plane with the given normal that passes through `point`.
    #[inline]
    pub fn from_normal_and_point(normal: Unit<Vector<Real>>, point: &Point<Real>) -> Plane {
        Plane {
            normal,
            offset: -normal.dot(&point.coords),
        }
    }

    /// The signed distance from `point` to this plane.
    ///
    /// Positive in front of the plane, negative behind it.
    #[inline]
    pub fn signed_distance(&self, point: &Point<Real>) -> Real {
        self.normal.dot(&point.coords) + self.offset
    }

    /// Classifies a point against this plane, with a tolerance band of `epsilon`.
    #[inline]
    pub fn point_side(&self, point: &Point<Real>, epsilon: Real) -> PlaneSide {
        let dist = self.signed_distance(point);

        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::Cross
        }
    }

    /// The same plane with its front and back sides swapped.
    #[inline]
    #[must_use]
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            offset: -self.offset,
        }
    }
}
