use crate::bounding_volume::OrientedBox;
use crate::math::{Point, Real, Vector};
use crate::utils::{box_silhouette_vertices, sign_bit, BoxFaces};
use arrayvec::ArrayVec;

impl OrientedBox {
    /// The faces of this box turned toward a viewer located at `projection_origin`.
    ///
    /// A viewer lying on the plane of a face with minimal coordinates sees that face.
    pub fn front_faces_from_point(&self, projection_origin: &Point<Real>) -> BoxFaces {
        let points = self.to_points();
        let dir_min = points[0] - projection_origin;
        let dir_max = points[6] - projection_origin;
        let mut faces = BoxFaces::empty();

        for i in 0..3 {
            let axis = self.axis.column(i);
            if dir_min.dot(&axis) >= 0.0 {
                faces |= BoxFaces::along_axis(i, 0);
            }
            if sign_bit(dir_max.dot(&axis)) == 1 {
                faces |= BoxFaces::along_axis(i, 1);
            }
        }

        faces
    }

    /// The faces of this box turned toward a viewer looking along `projection_dir`.
    pub fn front_faces_along(&self, projection_dir: &Vector<Real>) -> BoxFaces {
        let mut faces = BoxFaces::empty();

        for i in 0..3 {
            let f = projection_dir.dot(&self.axis.column(i));
            if f != 0.0 {
                faces |= BoxFaces::along_axis(i, sign_bit(f));
            }
        }

        faces
    }

    /// The silhouette of this box, as seen from `projection_origin` under a perspective
    /// projection.
    ///
    /// The corners are returned in loop order. The silhouette is empty if the projection origin
    /// is inside the box.
    pub fn projection_silhouette_vertices(
        &self,
        projection_origin: &Point<Real>,
    ) -> ArrayVec<Point<Real>, 6> {
        self.silhouette_corners(self.front_faces_from_point(projection_origin))
    }

    /// The silhouette of this box, as seen along `projection_dir` under a parallel projection.
    ///
    /// The corners are returned in loop order.
    pub fn parallel_projection_silhouette_vertices(
        &self,
        projection_dir: &Vector<Real>,
    ) -> ArrayVec<Point<Real>, 6> {
        self.silhouette_corners(self.front_faces_along(projection_dir))
    }

    fn silhouette_corners(&self, front_faces: BoxFaces) -> ArrayVec<Point<Real>, 6> {
        let points = self.to_points();
        box_silhouette_vertices(front_faces)
            .iter()
            .map(|i| points[*i as usize])
            .collect()
    }
}
