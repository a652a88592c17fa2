//! Application of the Separating Axis Theorem (SAT) to boxes and segments.
//!
//! Two convex volumes do not intersect if and only if there exists an axis onto which their
//! projections do not overlap. For boxes, only a finite set of candidate axes needs to be
//! tested: the face normals of each box and the cross products of their edge directions.

pub use self::sat_oriented_box_oriented_box::{
    oriented_box_oriented_box_find_separating_axis, SeparatingAxis,
};
pub use self::sat_oriented_box_segment::local_box_segment_overlap;

mod sat_oriented_box_oriented_box;
mod sat_oriented_box_segment;
