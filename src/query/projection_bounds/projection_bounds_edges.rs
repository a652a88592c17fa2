use crate::bounding_volume::{Aabb, ViewFrustum};
use crate::math::{Point, Real, WORLD_INFINITY};
use crate::utils::sign_bit;

/// A set of side planes of a view frustum.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SideCull(u8);

bitflags::bitflags! {
    /// Flags identifying the side planes of a view frustum a point lies outside of.
    ///
    /// The plane with index `i`, in the order left, right, up, down, has the bit `i`.
    impl SideCull: u8 {
        /// Outside of the left plane.
        const LEFT = 1 << 0;
        /// Outside of the right plane.
        const RIGHT = 1 << 1;
        /// Outside of the up plane.
        const UP = 1 << 2;
        /// Outside of the down plane.
        const DOWN = 1 << 3;
    }
}

impl SideCull {
    /// The side plane with index `plane`, in the order left, right, up, down.
    #[inline]
    pub fn plane(plane: usize) -> Self {
        Self::from_bits_retain(1 << plane)
    }

    /// The planes whose value, given in the order of [`ViewFrustum::local_side_values`], is
    /// negative.
    #[inline]
    pub fn from_side_values(values: &[Real; 4]) -> Self {
        let bits = values
            .iter()
            .enumerate()
            .fold(0, |bits, (i, value)| bits | (sign_bit(*value) << i));
        Self::from_bits_retain(bits as u8)
    }
}

static_assertions::assert_eq_size!(SideCull, u8);

/// A segment clipped to the side planes of a view frustum by [`ViewFrustum::clip_local_segment`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClippedSegment {
    /// The first endpoint of the clipped segment.
    pub start: Point<Real>,
    /// The second endpoint of the clipped segment.
    pub end: Point<Real>,
    /// The side plane (left, right, up, down as `0..4`) that cut the segment at `start`, if any.
    pub start_clip: Option<usize>,
    /// The side plane that cut the segment at `end`, if any.
    pub end_clip: Option<usize>,
}

// For each side plane, the far corners (see `ViewFrustum::to_points`) lying on that plane.
const CAP_POINTS: [[usize; 2]; 4] = [[0, 3], [1, 2], [0, 1], [2, 3]];

impl ViewFrustum {
    /// Evaluates the four side planes at a point expressed in the local frame of this frustum.
    ///
    /// The values are given in the order left, right, up, down. Each one is positive on the
    /// inner side of its plane. They are scaled by the norm of the plane normals.
    #[inline]
    pub fn local_side_values(&self, pt: &Point<Real>) -> [Real; 4] {
        let lateral = self.far_left * pt.x;
        let vertical = self.far_up * pt.x;
        let y = self.far * pt.y;
        let z = self.far * pt.z;

        [lateral - y, lateral + y, vertical - z, vertical + z]
    }

    /// The side planes of this frustum a local point lies outside of.
    #[inline]
    pub fn local_side_cull(&self, pt: &Point<Real>) -> SideCull {
        SideCull::from_side_values(&self.local_side_values(pt))
    }

    /// Maps a local point with a positive depth to the projection space of this frustum.
    #[inline]
    pub(crate) fn to_projection_space(&self, pt: &Point<Real>) -> Point<Real> {
        Point::new(
            pt.x,
            pt.y * self.far / (pt.x * self.far_left),
            pt.z * self.far / (pt.x * self.far_up),
        )
    }

    /// Where the segment `[start, end]` crosses the side plane `plane`, if the crossing lies on
    /// the face of that plane (extended past the near and far planes) and not behind the apex.
    ///
    /// `d1` and `d2` are the values of the plane at both endpoints. Returns the fraction along
    /// the segment and the crossing point.
    fn side_crossing(
        &self,
        plane: usize,
        start: &Point<Real>,
        end: &Point<Real>,
        d1: Real,
        d2: Real,
    ) -> Option<(Real, Point<Real>)> {
        if d1 == 0.0 || sign_bit(d1) == sign_bit(d2) {
            return None;
        }

        let f = d1 / (d1 - d2);
        let pt = start + (end - start) * f;
        let (coord, far_side) = if plane < 2 {
            (pt.z, self.far_up)
        } else {
            (pt.y, self.far_left)
        };

        if pt.x >= 0.0 && coord.abs() <= pt.x * far_side * self.inv_far {
            Some((f, pt))
        } else {
            None
        }
    }

    fn add_local_side_crossings(
        &self,
        start: &Point<Real>,
        end: &Point<Real>,
        d1: &[Real; 4],
        d2: &[Real; 4],
        planes: SideCull,
        bounds: &mut Aabb,
    ) {
        for plane in 0..4 {
            if !planes.contains(SideCull::plane(plane)) {
                continue;
            }

            if let Some((_, pt)) = self.side_crossing(plane, start, end, d1[plane], d2[plane]) {
                if pt.x > 0.0 {
                    let mut projected = self.to_projection_space(&pt);
                    let side = if plane % 2 == 0 { 1.0 } else { -1.0 };

                    if plane < 2 {
                        projected.y = side;
                    } else {
                        projected.z = side;
                    }

                    bounds.take_point(projected);
                }
            }
        }
    }

    /// Grows the projection bounds `bounds` with the part of the local segment `[start, end]`
    /// inside of the side planes of this frustum.
    ///
    /// Returns the side planes each endpoint lies outside of. The depth range of `bounds` is
    /// also extended down to the depth of the endpoints, clamped at zero.
    pub fn add_local_segment_set_cull(
        &self,
        start: &Point<Real>,
        end: &Point<Real>,
        bounds: &mut Aabb,
    ) -> (SideCull, SideCull) {
        let d1 = self.local_side_values(start);
        let d2 = self.local_side_values(end);
        self.add_local_side_crossings(start, end, &d1, &d2, SideCull::all(), bounds);

        let start_cull = SideCull::from_side_values(&d1);
        let end_cull = SideCull::from_side_values(&d2);

        for (pt, cull) in [(start, start_cull), (end, end_cull)] {
            if cull.is_empty() && pt.x > 0.0 {
                bounds.take_point(self.to_projection_space(pt));
            }
        }

        for pt in [start, end] {
            if pt.x < bounds.mins.x {
                bounds.mins.x = pt.x.max(0.0);
            }
        }

        (start_cull, end_cull)
    }

    /// Grows the projection bounds `bounds` with the crossings of the local segment
    /// `[start, end]` with the side planes of this frustum.
    ///
    /// `start_cull` and `end_cull` are the culls computed by
    /// [`Self::add_local_segment_set_cull`] for both endpoints. Only the planes separating both
    /// endpoints are tested, and the endpoints themselves are never added.
    pub fn add_local_segment_use_cull(
        &self,
        start: &Point<Real>,
        end: &Point<Real>,
        start_cull: SideCull,
        end_cull: SideCull,
        bounds: &mut Aabb,
    ) {
        let clip = start_cull ^ end_cull;
        if clip.is_empty() {
            return;
        }

        let d1 = self.local_side_values(start);
        let d2 = self.local_side_values(end);
        self.add_local_side_crossings(start, end, &d1, &d2, clip, bounds);
    }

    /// Clips the segment `[local_points[start_index], local_points[end_index]]`, expressed in
    /// the local frame of this frustum, to the side planes of this frustum.
    ///
    /// The near and far planes are ignored. The clipped endpoints are taken from the matching
    /// segment of `points`, which describes the same points in another frame. Returns `None`
    /// if no part of the segment lies inside of the side planes.
    pub fn clip_local_segment(
        &self,
        local_points: &[Point<Real>; 8],
        points: &[Point<Real>; 8],
        start_index: usize,
        end_index: usize,
    ) -> Option<ClippedSegment> {
        let local_start = local_points[start_index];
        let local_end = local_points[end_index];
        let d1 = self.local_side_values(&local_start);
        let d2 = self.local_side_values(&local_end);

        let mut scale1 = WORLD_INFINITY;
        let mut scale2 = -WORLD_INFINITY;
        let mut start_clip = None;
        let mut end_clip = None;

        for plane in 0..4 {
            if let Some((f, _)) =
                self.side_crossing(plane, &local_start, &local_end, d1[plane], d2[plane])
            {
                if f < scale1 {
                    scale1 = f;
                    start_clip = Some(plane);
                }
                if f > scale2 {
                    scale2 = f;
                    end_clip = Some(plane);
                }
            }
        }

        let start_cull = SideCull::from_side_values(&d1);
        let end_cull = SideCull::from_side_values(&d2);
        let start = points[start_index];
        let end = points[end_index];

        if (start_cull | end_cull).is_empty() {
            return Some(ClippedSegment {
                start,
                end,
                start_clip: None,
                end_clip: None,
            });
        }

        if scale1 > scale2 {
            return None;
        }

        let dir = end - start;
        let (start, start_clip) = if start_cull.is_empty() {
            (start, None)
        } else {
            (start + dir * scale1, start_clip)
        };
        let (end, end_clip) = if end_cull.is_empty() {
            (end, None)
        } else {
            (points[start_index] + dir * scale2, end_clip)
        };

        Some(ClippedSegment {
            start,
            end,
            start_clip,
            end_clip,
        })
    }

    /// Grows the projection bounds `bounds` with the cap joining `point` to the two far corners
    /// of `clip_points` lying on the side plane `point_clip`.
    ///
    /// `clip_points` are the corners of another frustum, expressed in the local frame of this
    /// one, with their culls `clip_culls`. Returns `false` if `point_clip` is `None`.
    pub fn add_local_caps(
        &self,
        clip_points: &[Point<Real>; 8],
        clip_culls: &[SideCull; 8],
        point: &Point<Real>,
        point_cull: SideCull,
        point_clip: Option<usize>,
        bounds: &mut Aabb,
    ) -> bool {
        let Some(clip) = point_clip else {
            return false;
        };

        for corner in CAP_POINTS[clip] {
            self.add_local_segment_use_cull(
                &clip_points[4 + corner],
                point,
                clip_culls[4 + corner],
                point_cull,
                bounds,
            );
        }

        true
    }
}

#[cfg(test)]
mod test {
    use super::SideCull;
    use crate::bounding_volume::{Aabb, ViewFrustum};
    use crate::math::{Matrix, Point};

    fn frustum() -> ViewFrustum {
        ViewFrustum::new(Point::origin(), Matrix::identity(), 1.0, 10.0, 5.0, 5.0)
    }

    #[test]
    fn side_culls() {
        let f = frustum();
        assert_eq!(f.local_side_cull(&Point::new(5.0, 1.0, -1.0)), SideCull::empty());
        assert_eq!(f.local_side_cull(&Point::new(5.0, 3.0, 0.0)), SideCull::LEFT);
        assert_eq!(
            f.local_side_cull(&Point::new(5.0, -3.0, -3.0)),
            SideCull::RIGHT | SideCull::DOWN
        );
        assert_eq!(f.local_side_cull(&Point::new(-1.0, 0.0, 0.0)), SideCull::all());
    }

    #[test]
    fn segment_inside() {
        let f = frustum();
        let mut bounds = Aabb::new_invalid();
        let (c1, c2) = f.add_local_segment_set_cull(
            &Point::new(2.0, 0.5, 0.0),
            &Point::new(4.0, -1.0, 1.0),
            &mut bounds,
        );

        assert!(c1.is_empty() && c2.is_empty());
        assert_relative_eq!(bounds.mins, Point::new(2.0, -0.5, 0.0));
        assert_relative_eq!(bounds.maxs, Point::new(4.0, 0.5, 0.5));
    }

    #[test]
    fn segment_across_both_side_planes() {
        let f = frustum();
        let start = Point::new(4.0, -10.0, 0.0);
        let end = Point::new(4.0, 10.0, 0.0);
        let mut bounds = Aabb::new_invalid();
        let (c1, c2) = f.add_local_segment_set_cull(&start, &end, &mut bounds);

        assert_eq!(c1, SideCull::RIGHT);
        assert_eq!(c2, SideCull::LEFT);
        assert_relative_eq!(bounds.mins, Point::new(4.0, -1.0, 0.0));
        assert_relative_eq!(bounds.maxs, Point::new(4.0, 1.0, 0.0));

        // Only the planes separating the endpoints are tested.
        let mut bounds = Aabb::new_invalid();
        f.add_local_segment_use_cull(&start, &end, c1, c1, &mut bounds);
        assert!(bounds.is_empty());

        f.add_local_segment_use_cull(&start, &end, c1, c2, &mut bounds);
        assert_relative_eq!(bounds.mins, Point::new(4.0, -1.0, 0.0));
        assert_relative_eq!(bounds.maxs, Point::new(4.0, 1.0, 0.0));
    }

    #[test]
    fn segment_behind_the_apex() {
        let f = frustum();
        let mut bounds = Aabb::new_invalid();
        let _ = f.add_local_segment_set_cull(
            &Point::new(-2.0, -1.0, 0.0),
            &Point::new(3.0, 1.0, 0.0),
            &mut bounds,
        );

        // The depth range reaches the apex, not beyond.
        assert_eq!(bounds.mins.x, 0.0);
        assert_relative_eq!(bounds.maxs.x, 3.0);
    }

    #[test]
    fn clipped_segments() {
        let f = frustum();
        let mut points = [Point::origin(); 8];
        points[0] = Point::new(5.0, -20.0, 0.0);
        points[1] = Point::new(5.0, 20.0, 0.0);
        points[2] = Point::new(5.0, 0.5, 0.0);
        points[3] = Point::new(5.0, 10.0, 10.0);
        points[4] = Point::new(5.0, 20.0, 10.0);

        let clipped = f.clip_local_segment(&points, &points, 0, 1).unwrap();
        assert_relative_eq!(clipped.start, Point::new(5.0, -2.5, 0.0), epsilon = 1.0e-5);
        assert_relative_eq!(clipped.end, Point::new(5.0, 2.5, 0.0), epsilon = 1.0e-5);
        assert_eq!(clipped.start_clip, Some(1));
        assert_eq!(clipped.end_clip, Some(0));

        let clipped = f.clip_local_segment(&points, &points, 2, 1).unwrap();
        assert_eq!(clipped.start, points[2]);
        assert_eq!(clipped.start_clip, None);
        assert_eq!(clipped.end_clip, Some(0));

        assert_eq!(f.clip_local_segment(&points, &points, 3, 4), None);
    }

    #[test]
    fn caps_need_a_clip_plane() {
        let f = frustum();
        let points = f.to_points();
        let culls = points.map(|pt| f.local_side_cull(&pt));
        let mut bounds = Aabb::new_invalid();

        assert!(!f.add_local_caps(
            &points,
            &culls,
            &Point::new(5.0, 0.0, 0.0),
            SideCull::empty(),
            None,
            &mut bounds
        ));
        assert!(bounds.is_empty());

        // Joining a point outside of the left plane to the two far corners lying on it.
        let outside = Point::new(8.0, 6.0, 0.0);
        assert!(f.add_local_caps(
            &points,
            &culls,
            &outside,
            f.local_side_cull(&outside),
            Some(0),
            &mut bounds
        ));
    }
}
