//! Bounds of volumes seen through a view frustum.
//!
//! The bounds are expressed in the projection space of the frustum: `x` is the depth along the
//! view direction, `y` the horizontal coordinate (`1` on the left plane, `-1` on the right
//! plane), and `z` the vertical coordinate (`1` on the up plane, `-1` on the down plane).

pub use self::projection_bounds_edges::{ClippedSegment, SideCull};

mod clipped_projection_bounds;
mod projection_bounds_edges;
mod projection_bounds_view_frustum;
