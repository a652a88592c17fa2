use crate::bounding_volume::OrientedBox;
use crate::math::{Real, Vector};

/// A candidate separating axis between two oriented boxes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeparatingAxis {
    /// The local axis `i` of the first box.
    First(usize),
    /// The local axis `j` of the second box.
    Second(usize),
    /// The cross product of the local axis `i` of the first box with the local axis `j` of the
    /// second box.
    Cross(usize, usize),
}

/// Finds the first axis, among the 15 candidates, onto which the projections of `box1` and
/// `box2` do not overlap.
///
/// The axes are tested in the order `A0, A1, A2, B0, B1, B2, A0×B0, A0×B1, …, A2×B2` where
/// `Ai` are the axes of `box1` and `Bj` those of `box2`. Returns `None` if the boxes
/// intersect.
pub fn oriented_box_oriented_box_find_separating_axis(
    box1: &OrientedBox,
    box2: &OrientedBox,
) -> Option<SeparatingAxis> {
    let e = &box1.half_extents;
    let b = &box2.half_extents;

    // Axes of the second box, expressed in the frame of the first one.
    let c = box1.axis.tr_mul(&box2.axis);
    let ac = c.abs();
    // Distance between the centers along the axes of the first box.
    let ad: Vector<Real> = box1.axis.tr_mul(&(box2.center - box1.center));

    for i in 0..3 {
        let d = ad[i].abs();
        let e1 = b.dot(&ac.row(i).transpose());
        if d > e[i] + e1 {
            return Some(SeparatingAxis::First(i));
        }
    }

    for j in 0..3 {
        let d = ad.dot(&c.column(j)).abs();
        let e0 = e.dot(&ac.column(j));
        if d > e0 + b[j] {
            return Some(SeparatingAxis::Second(j));
        }
    }

    for i in 0..3 {
        let i1 = (i + 1) % 3;
        let i2 = (i + 2) % 3;

        for j in 0..3 {
            let j1 = (j + 1) % 3;
            let j2 = (j + 2) % 3;

            let d = (ad[i2] * c[(i1, j)] - ad[i1] * c[(i2, j)]).abs();
            let e0 = e[i1] * ac[(i2, j)] + e[i2] * ac[(i1, j)];
            let e1 = b[j1] * ac[(i, j2)] + b[j2] * ac[(i, j1)];

            if d > e0 + e1 {
                return Some(SeparatingAxis::Cross(i, j));
            }
        }
    }

    None
}

impl OrientedBox {
    /// Tests if this box intersects `other`.
    ///
    /// Touching boxes intersect. Empty boxes never intersect anything.
    #[inline]
    pub fn intersects_box(&self, other: &OrientedBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        oriented_box_oriented_box_find_separating_axis(self, other).is_none()
    }
}

#[cfg(test)]
mod test {
    use super::{oriented_box_oriented_box_find_separating_axis, SeparatingAxis};
    use crate::bounding_volume::OrientedBox;
    use crate::math::{Matrix, Point, Real, Vector};
    use crate::utils::orthonormal_frame;

    #[test]
    fn face_separation() {
        let a = OrientedBox::new(Point::origin(), Vector::repeat(1.0), Matrix::identity());
        let b = a.translated(&Vector::new(0.0, 2.5, 0.0));

        assert_eq!(
            oriented_box_oriented_box_find_separating_axis(&a, &b),
            Some(SeparatingAxis::First(1))
        );
        assert!(!a.intersects_box(&b));
        assert!(a.intersects_box(&a.translated(&Vector::new(0.0, 2.0, 0.0))));
    }

    #[test]
    fn separation_is_symmetric() {
        let a = OrientedBox::new(
            Point::origin(),
            Vector::repeat(1.0),
            orthonormal_frame(&Vector::new(1.0, 1.0, 0.0).normalize()),
        );
        let rot = orthonormal_frame(&Vector::new(0.0, 1.0, 1.0).normalize());
        let b = OrientedBox::new(Point::new(2.0, 0.0, 2.0), Vector::repeat(1.0), rot);

        for t in 0..20 {
            let shift = -0.1 * t as Real;
            let b = b.translated(&Vector::new(shift, 0.0, shift));
            assert_eq!(a.intersects_box(&b), b.intersects_box(&a));
        }
    }

    #[test]
    fn contained_box_intersects() {
        let big = OrientedBox::new(Point::origin(), Vector::repeat(10.0), Matrix::identity());
        let small = OrientedBox::new(
            Point::new(1.0, 2.0, 3.0),
            Vector::new(0.5, 0.1, 0.2),
            orthonormal_frame(&Vector::new(1.0, -2.0, 0.5).normalize()),
        );
        assert!(big.intersects_box(&small));
        assert!(small.intersects_box(&big));
        assert!(!big.intersects_box(&OrientedBox::new_empty()));
    }
}
