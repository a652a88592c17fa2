//! Ray-casting related definitions and implementations.

#[doc(inline)]
pub use self::ray::{Ray, RayInterval};

#[doc(hidden)]
pub mod ray;
mod ray_aabb;
mod ray_oriented_box;
mod ray_view_frustum;
