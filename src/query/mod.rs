//! Non-persistent visibility queries.
//!
//! # General cases
//! Most queries are exposed as methods of the bounding volumes they apply to:
//!
//! * `cull_*` methods of [`ViewFrustum`](crate::bounding_volume::ViewFrustum) conservatively
//!   reject volumes lying entirely outside of a plane of the frustum.
//! * `intersects_*` methods determine exactly whether two volumes overlap.
//! * `projection_bounds_*` methods compute the screen-space rectangle and depth range covered by
//!   a volume seen through a frustum.
//! * `ray_intersection` methods compute the parametric interval of a ray inside a volume.
//!
//! # Specific cases
//! The items exported by the `details` submodule are the building blocks of the queries above,
//! working in the local frame of one of the volumes. They are less convenient to use, but let
//! callers share precomputed corners between several queries.

pub use self::error::FrustumFitError;
pub use self::projection_bounds::ClippedSegment;
pub use self::ray::{Ray, RayInterval};

mod cull;
mod error;
mod intersection_test;
mod projection_bounds;
mod ray;
pub mod sat;

/// Queries dedicated to specific pairs of volumes, in local frames.
pub mod details {
    pub use super::intersection_test::{
        local_frustum_intersects_aabb, local_frustum_intersects_frustum, FrustumRegion,
        RegionKind, RegionSide,
    };
    pub use super::projection_bounds::SideCull;
    pub use super::sat::*;
}
