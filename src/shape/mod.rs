//! Shapes supported by the visibility queries, besides bounding volumes.

pub use self::plane::{Plane, PlaneSide};

mod plane;
