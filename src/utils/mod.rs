//! Various unsorted geometrical and logical operators.

pub use self::box_topology::{
    box_silhouette_vertices, BoxFaces, BOX_EDGES, BOX_EDGE_FACES, BOX_VERTEX_EDGES,
    BOX_VERTEX_FACES,
};
pub use self::center::center;
pub use self::cov::{center_cov, cov};
pub use self::frame::{least_aligned_column, orthonormal_frame, orthonormal_frame_with_hint};
pub use self::sign_bit::sign_bit;

mod box_topology;
mod center;
mod cov;
mod frame;
mod sign_bit;
