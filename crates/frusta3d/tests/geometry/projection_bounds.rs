use crate::util::{point_in_box, point_in_frustum, rand_box, rand_frustum, rand_sphere, rand_vector};
use frusta3d::bounding_volume::{Aabb, ViewFrustum};
use frusta3d::math::{Point, Real};

/// The point of projection space seen at `pt`, if it lies past the apex and inside of the side
/// planes of `frustum`.
fn projected(frustum: &ViewFrustum, pt: &Point<Real>) -> Option<Point<Real>> {
    let local = frustum.to_local_point(pt);
    let y = local.y * frustum.far() / (local.x * frustum.far_left());
    let z = local.z * frustum.far() / (local.x * frustum.far_up());

    (local.x > 0.5 && y.abs() <= 1.0 && z.abs() <= 1.0).then(|| Point::new(local.x, y, z))
}

fn assert_within(bounds: &Option<Aabb>, pt: &Point<Real>) {
    let Some(bounds) = bounds else {
        panic!("{pt:?} is visible but no bounds were computed");
    };

    let tolerance = 1.0e-3 * (1.0 + pt.x.abs());
    for i in 0..3 {
        assert!(pt[i] >= bounds.mins[i] - tolerance, "{bounds:?} {pt:?}");
        assert!(pt[i] <= bounds.maxs[i] + tolerance, "{bounds:?} {pt:?}");
    }
}

#[test]
fn box_bounds_contain_visible_points() {
    let mut rng = oorandom::Rand32::new(42);
    let mut visible = 0;

    for _ in 0..500 {
        let frustum = rand_frustum(&mut rng);
        let obb = rand_box(&mut rng);
        let bounds = frustum.projection_bounds_box(&obb);
        let aabb = obb.aabb();
        let aabb_bounds = frustum.projection_bounds_aabb(&aabb);

        for _ in 0..50 {
            if let Some(pt) = projected(&frustum, &point_in_box(&mut rng, &obb)) {
                visible += 1;
                assert_within(&bounds, &pt);
            }

            let pt = aabb.center() + aabb.extents().component_mul(&rand_vector(&mut rng, 0.5));
            if let Some(pt) = projected(&frustum, &pt) {
                assert_within(&aabb_bounds, &pt);
            }
        }
    }

    assert!(visible > 0);
}

#[test]
fn frustum_bounds_contain_visible_points() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..500 {
        let frustum = rand_frustum(&mut rng);
        let other = rand_frustum(&mut rng);
        let bounds = frustum.projection_bounds_frustum(&other);

        for _ in 0..50 {
            if let Some(pt) = projected(&frustum, &point_in_frustum(&mut rng, &other)) {
                assert_within(&bounds, &pt);
            }
        }
    }
}

#[test]
fn sphere_bounds_contain_visible_centers() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..500 {
        let frustum = rand_frustum(&mut rng);
        let sphere = rand_sphere(&mut rng);

        if let Some(pt) = projected(&frustum, &sphere.center) {
            assert_within(&frustum.projection_bounds_sphere(&sphere), &pt);
        }
    }
}
