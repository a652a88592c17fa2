//! Exact intersection tests between view frustums and bounding volumes.

pub use self::intersection_test_view_frustum::{
    local_frustum_intersects_aabb, local_frustum_intersects_frustum,
};
pub use self::intersection_test_view_frustum_sphere::{FrustumRegion, RegionKind, RegionSide};

mod intersection_test_view_frustum;
mod intersection_test_view_frustum_sphere;
