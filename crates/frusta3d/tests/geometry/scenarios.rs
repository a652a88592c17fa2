use frusta3d::bounding_volume::{OrientedBox, ViewFrustum};
use frusta3d::math::{Matrix, Point, Vector};
use frusta3d::query::Ray;

fn camera() -> ViewFrustum {
    ViewFrustum::new(Point::new(-5.0, 0.0, 0.0), Matrix::identity(), 1.0, 10.0, 5.0, 5.0)
}

fn unit_box() -> OrientedBox {
    OrientedBox::new(Point::origin(), Vector::repeat(1.0), Matrix::identity())
}

#[test]
fn box_in_front_of_the_camera() {
    let camera = camera();
    let obb = unit_box();

    assert!(!camera.cull_box(&obb));
    assert!(camera.intersects_box(&obb));

    let bounds = camera.projection_bounds_box(&obb).unwrap();
    assert_relative_eq!(bounds.mins, Point::new(4.0, -0.5, -0.5), epsilon = 1.0e-5);
    assert_relative_eq!(bounds.maxs, Point::new(6.0, 0.5, 0.5), epsilon = 1.0e-5);
}

#[test]
fn box_above_the_camera() {
    let camera = camera();
    let obb = unit_box().translated(&Vector::new(0.0, 0.0, 20.0));

    assert!(camera.cull_box(&obb));
    assert!(!camera.intersects_box(&obb));
    assert_eq!(camera.projection_bounds_box(&obb), None);
}

#[test]
fn ray_through_the_box() {
    let obb = unit_box();
    let ray = Ray::new(Point::origin(), Vector::x());
    let (s1, s2) = obb.ray_intersection(&ray).unwrap();

    assert_relative_eq!(s1, -1.0);
    assert_relative_eq!(s2, 1.0);
}
