//! Bounding volumes.

#[doc(inline)]
pub use crate::bounding_volume::aabb::Aabb;
#[doc(inline)]
pub use crate::bounding_volume::bounding_sphere::BoundingSphere;
#[doc(inline)]
pub use crate::bounding_volume::bounding_volume::BoundingVolume;
#[doc(inline)]
pub use crate::bounding_volume::oriented_box::OrientedBox;
#[doc(inline)]
pub use crate::bounding_volume::view_frustum::ViewFrustum;
pub use crate::bounding_volume::view_frustum_fit::{ProjectionFitOptions, MIN_DEPTH_GAP};

#[doc(hidden)]
pub mod bounding_volume;

#[doc(hidden)]
pub mod aabb;
#[doc(hidden)]
pub mod bounding_sphere;
#[doc(hidden)]
pub mod oriented_box;
mod oriented_box_fit;
mod oriented_box_silhouette;
#[doc(hidden)]
pub mod view_frustum;
mod view_frustum_fit;

/// Free functions for some special cases of bounding-volume computation.
pub mod details {
    pub use super::oriented_box::box_corners;
}
