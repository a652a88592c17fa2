//! Growing oriented boxes so they enclose points and other boxes.

use crate::bounding_volume::{Aabb, BoundingVolume, OrientedBox};
use crate::math::{Matrix, Point, Real, Vector};
use crate::utils::{self, least_aligned_column, orthonormal_frame_with_hint};
use num::Zero;

/// The frame selected by [`OrientedBox::add_point`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PointFit {
    CurrentAxes,
    TowardPoint,
}

/// The frame selected by [`OrientedBox::add_box`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BoxFit {
    CurrentAxes,
    OtherAxes,
    CenterLineWithCurrent,
    CenterLineWithOther,
}

impl OrientedBox {
    /// Computes an oriented box enclosing the given points.
    ///
    /// The box axes are the eigenvectors of the covariance matrix of the points. The result is
    /// not guaranteed to be the smallest enclosing box, but is a good fit for most point
    /// clouds. Returns an empty box if `pts` is empty.
    pub fn from_points(pts: &[Point<Real>]) -> Self {
        if pts.is_empty() {
            return Self::new_empty();
        }

        let (_, cov) = utils::center_cov(pts);
        let mut eigv = cov.symmetric_eigen().eigenvectors;

        if eigv.determinant() < 0.0 {
            eigv = -eigv;
        }

        let bounds = Aabb::from_points(pts.iter().map(|pt| eigv.tr_mul(&pt.coords).into()));
        Self::from_frame_bounds(&bounds, eigv)
    }

    /// Grows this box so it contains `point`.
    ///
    /// Returns `false` if the point was already inside the box, in which case the box is left
    /// unchanged. The box never shrinks.
    pub fn add_point(&mut self, point: &Point<Real>) -> bool {
        if self.is_empty() {
            *self = Self::new(*point, Vector::zeros(), Matrix::identity());
            return true;
        }

        let mut current = self.local_bounds();
        let local_point = self.axis.tr_mul(&point.coords).into();
        if current.contains_local_point(&local_point) {
            return false;
        }
        current.take_point(local_point);

        let dir = (point - self.center).normalize();
        let hint = self.axis.column(least_aligned_column(&self.axis, &dir));
        let toward = orthonormal_frame_with_hint(&dir, &hint.into_owned());
        let mut toward_bounds = self.axis_projection(&toward);
        toward_bounds.take_point(toward.tr_mul(&point.coords).into());

        let fit = if current.volume() < toward_bounds.volume() {
            PointFit::CurrentAxes
        } else {
            PointFit::TowardPoint
        };

        *self = match fit {
            PointFit::CurrentAxes => Self::from_frame_bounds(&current, self.axis),
            PointFit::TowardPoint => Self::from_frame_bounds(&toward_bounds, toward),
        };

        true
    }

    /// Grows this box so it contains `other`.
    ///
    /// Four candidate frames are tried: the axes of this box, the axes of `other`, and the line
    /// between both centers completed by the most perpendicular axis of either box. The
    /// candidate with the smallest volume is kept.
    ///
    /// Returns `false` if `other` is empty or already contained in this box, in which case
    /// this box is left unchanged.
    pub fn add_box(&mut self, other: &OrientedBox) -> bool {
        if other.is_empty() {
            return false;
        }

        if self.is_empty() {
            *self = *other;
            return true;
        }

        let mut current = self.local_bounds();
        let other_in_current = other.axis_projection(&self.axis);
        if current.contains(&other_in_current) {
            return false;
        }
        current.merge(&other_in_current);

        let mut other_bounds = other.local_bounds();
        let self_in_other = self.axis_projection(&other.axis);
        if other_bounds.contains(&self_in_other) {
            *self = *other;
            return true;
        }
        other_bounds.merge(&self_in_other);

        let mut best = (BoxFit::CurrentAxes, self.axis, current);
        if other_bounds.volume() < best.2.volume() {
            best = (BoxFit::OtherAxes, other.axis, other_bounds);
        }

        let delta = other.center - self.center;
        if delta.is_zero() {
            log::debug!("Skipping the center line frames of coincident boxes.");
        } else {
            let dir = delta.normalize();

            for (fit, source) in [
                (BoxFit::CenterLineWithCurrent, &self.axis),
                (BoxFit::CenterLineWithOther, &other.axis),
            ] {
                let hint = source.column(least_aligned_column(source, &dir));
                let frame = orthonormal_frame_with_hint(&dir, &hint.into_owned());
                let bounds = self
                    .axis_projection(&frame)
                    .merged(&other.axis_projection(&frame));

                if bounds.volume() < best.2.volume() {
                    best = (fit, frame, bounds);
                }
            }
        }

        log::trace!("Merged boxes using {:?}.", best.0);
        *self = Self::from_frame_bounds(&best.2, best.1);
        true
    }

    /// Builds the box covering `bounds`, expressed along the columns of `frame`.
    fn from_frame_bounds(bounds: &Aabb, frame: Matrix<Real>) -> Self {
        let local_center = bounds.center();
        Self::new(
            (frame * local_center.coords).into(),
            bounds.maxs - local_center,
            frame,
        )
    }
}

#[cfg(test)]
mod test {
    use crate::bounding_volume::{BoundingVolume, OrientedBox};
    use crate::math::{Matrix, Point, Real, Vector};
    use crate::utils::orthonormal_frame;

    fn contains_with_margin(obb: &OrientedBox, pt: &Point<Real>) -> bool {
        obb.to_planes()
            .iter()
            .all(|plane| plane.signed_distance(pt) <= 1.0e-4)
    }

    #[test]
    fn first_point_initializes_the_box() {
        let mut obb = OrientedBox::new_empty();
        assert!(obb.add_point(&Point::new(1.0, 2.0, 3.0)));
        assert_eq!(obb.center, Point::new(1.0, 2.0, 3.0));
        assert_eq!(obb.half_extents, Vector::zeros());
        assert_eq!(obb.axis, Matrix::identity());
    }

    #[test]
    fn contained_point_is_rejected() {
        let mut obb = OrientedBox::new(Point::origin(), Vector::repeat(1.0), Matrix::identity());
        let before = obb;
        assert!(!obb.add_point(&Point::new(0.5, -0.5, 0.9)));
        assert_eq!(obb, before);
    }

    #[test]
    fn added_points_stay_inside() {
        let pts = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(4.0, 0.0, 0.0),
            Point::new(4.0, 1.0, 0.0),
            Point::new(2.0, -1.0, 3.0),
            Point::new(-3.0, 2.0, 1.0),
        ];
        let mut obb = OrientedBox::new_empty();
        let mut volume = 0.0;

        for (i, pt) in pts.iter().enumerate() {
            let _ = obb.add_point(pt);
            assert!(obb.volume() >= volume - 1.0e-4);
            volume = obb.volume();

            for prev in &pts[..=i] {
                assert!(contains_with_margin(&obb, prev));
            }
        }
    }

    #[test]
    fn add_box_to_empty_copies_it() {
        let other = OrientedBox::new(
            Point::new(1.0, 0.0, 0.0),
            Vector::new(1.0, 2.0, 3.0),
            orthonormal_frame(&Vector::new(0.0, 1.0, 1.0).normalize()),
        );
        let mut obb = OrientedBox::new_empty();
        assert!(obb.add_box(&other));
        assert_eq!(obb, other);
        assert!(!obb.add_box(&OrientedBox::new_empty()));
    }

    #[test]
    fn add_contained_box() {
        let big = OrientedBox::new(Point::origin(), Vector::repeat(5.0), Matrix::identity());
        let small = OrientedBox::new(
            Point::new(1.0, 1.0, 1.0),
            Vector::repeat(0.5),
            orthonormal_frame(&Vector::new(1.0, 1.0, 0.0).normalize()),
        );

        let mut obb = big;
        assert!(!obb.add_box(&small));
        assert_eq!(obb, big);

        let mut obb = small;
        assert!(obb.add_box(&big));
        assert_eq!(obb, big);
    }

    #[test]
    fn merged_boxes_contain_both_inputs() {
        let a = OrientedBox::new(Point::new(-3.0, 0.0, 0.0), Vector::new(1.0, 1.0, 0.5), Matrix::identity());
        let b = OrientedBox::new(
            Point::new(3.0, 1.0, -1.0),
            Vector::new(2.0, 0.5, 0.5),
            orthonormal_frame(&Vector::new(1.0, -1.0, 2.0).normalize()),
        );

        let merged = a.merged(&b);
        assert!(merged.volume() >= a.volume().max(b.volume()));
        for pt in a.to_points().iter().chain(b.to_points().iter()) {
            assert!(contains_with_margin(&merged, pt));
        }
    }

    #[test]
    fn point_cloud_fit() {
        let axis = orthonormal_frame(&Vector::new(2.0, 1.0, 0.5).normalize());
        let center = Point::new(1.0, -4.0, 2.0);
        let pts: Vec<_> = (0..20)
            .map(|i| {
                let t = i as Real / 19.0 * 2.0 - 1.0;
                center + axis * Vector::new(t * 10.0, (t * 7.0).sin(), (t * 3.0).cos() * 0.5)
            })
            .collect();

        let obb = OrientedBox::from_points(&pts);
        assert_relative_eq!(obb.axis.determinant(), 1.0, epsilon = 1.0e-4);
        for pt in &pts {
            assert!(contains_with_margin(&obb, pt));
        }
        assert!(OrientedBox::from_points(&[]).is_empty());
    }
}
