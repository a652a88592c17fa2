use frusta3d::bounding_volume::{BoundingSphere, OrientedBox, ViewFrustum};
use frusta3d::math::{Matrix, Point, Real, Vector};
use frusta3d::na;
use oorandom::Rand32;

pub fn rand_range(rng: &mut Rand32, min: Real, max: Real) -> Real {
    min + (max - min) * rng.rand_float() as Real
}

pub fn rand_vector(rng: &mut Rand32, half_extent: Real) -> Vector<Real> {
    Vector::from_fn(|_, _| rand_range(rng, -half_extent, half_extent))
}

pub fn rand_point(rng: &mut Rand32, half_extent: Real) -> Point<Real> {
    rand_vector(rng, half_extent).into()
}

pub fn rand_frame(rng: &mut Rand32) -> Matrix<Real> {
    na::Rotation3::new(rand_vector(rng, 3.0)).into_inner()
}

pub fn rand_box(rng: &mut Rand32) -> OrientedBox {
    let half_extents = Vector::from_fn(|_, _| rand_range(rng, 0.2, 3.0));
    OrientedBox::new(rand_point(rng, 8.0), half_extents, rand_frame(rng))
}

pub fn rand_sphere(rng: &mut Rand32) -> BoundingSphere {
    BoundingSphere::new(rand_point(rng, 8.0), rand_range(rng, 0.2, 3.0))
}

pub fn rand_frustum(rng: &mut Rand32) -> ViewFrustum {
    let near = rand_range(rng, 0.5, 2.0);
    let far = near + rand_range(rng, 2.0, 15.0);
    ViewFrustum::new(
        rand_point(rng, 5.0),
        rand_frame(rng),
        near,
        far,
        rand_range(rng, 0.5, 8.0),
        rand_range(rng, 0.5, 8.0),
    )
}

/// A random point inside of `obb`.
pub fn point_in_box(rng: &mut Rand32, obb: &OrientedBox) -> Point<Real> {
    let local = Vector::from_fn(|i, _| rand_range(rng, -1.0, 1.0) * obb.half_extents[i]);
    obb.center + obb.axis * local
}

/// A random point inside of `frustum`.
pub fn point_in_frustum(rng: &mut Rand32, frustum: &ViewFrustum) -> Point<Real> {
    let depth = rand_range(rng, frustum.near(), frustum.far());
    let scale = depth * frustum.inv_far();
    let local = Vector::new(
        depth,
        rand_range(rng, -1.0, 1.0) * frustum.far_left() * scale,
        rand_range(rng, -1.0, 1.0) * frustum.far_up() * scale,
    );
    *frustum.origin() + *frustum.axis() * local
}
