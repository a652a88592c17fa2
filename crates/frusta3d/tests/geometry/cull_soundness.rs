use crate::util::{point_in_box, point_in_frustum, rand_box, rand_frustum, rand_sphere};

#[test]
fn culled_volumes_never_intersect() {
    let mut rng = oorandom::Rand32::new(42);
    let mut culled = 0;

    for _ in 0..1000 {
        let frustum = rand_frustum(&mut rng);
        let obb = rand_box(&mut rng);
        let aabb = rand_box(&mut rng).aabb();
        let sphere = rand_sphere(&mut rng);
        let other = rand_frustum(&mut rng);

        if frustum.cull_box(&obb) {
            culled += 1;
            assert!(!frustum.intersects_box(&obb), "{frustum:?} {obb:?}");
        }

        if frustum.cull_aabb(&aabb) {
            assert!(!frustum.intersects_aabb(&aabb), "{frustum:?} {aabb:?}");
        }

        if frustum.cull_sphere(&sphere) {
            assert!(!frustum.intersects_sphere(&sphere), "{frustum:?} {sphere:?}");
        }

        if frustum.cull_frustum(&other) {
            assert!(!frustum.intersects_frustum(&other), "{frustum:?} {other:?}");
        }
    }

    // Both branches are exercised.
    assert!(culled > 10);
}

#[test]
fn shared_points_imply_intersections() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..300 {
        let frustum = rand_frustum(&mut rng);
        let obb = rand_box(&mut rng);
        let sphere = rand_sphere(&mut rng);
        let other = rand_frustum(&mut rng);

        for _ in 0..20 {
            let pt = point_in_box(&mut rng, &obb);
            if frustum.contains_point(&pt) {
                assert!(!frustum.cull_box(&obb));
                assert!(frustum.intersects_box(&obb), "{frustum:?} {obb:?} {pt:?}");
            }

            let pt = point_in_frustum(&mut rng, &other);
            if frustum.contains_point(&pt) {
                assert!(!frustum.cull_frustum(&other));
                assert!(frustum.intersects_frustum(&other), "{frustum:?} {other:?}");
                assert!(other.intersects_frustum(&frustum), "{other:?} {frustum:?}");
            }

            let pt = point_in_frustum(&mut rng, &frustum);
            if sphere.contains_point(&pt) {
                assert!(frustum.intersects_sphere(&sphere), "{frustum:?} {sphere:?}");
            }
        }
    }
}

#[test]
fn box_box_intersection_is_symmetric() {
    let mut rng = oorandom::Rand32::new(42);
    let mut hits = 0;

    for _ in 0..2000 {
        let a = rand_box(&mut rng);
        let b = rand_box(&mut rng);
        let ab = a.intersects_box(&b);
        assert_eq!(ab, b.intersects_box(&a), "{a:?} {b:?}");
        hits += ab as usize;

        // The center of a box inside of the other one always overlaps.
        if a.contains_point(&b.center) {
            assert!(ab);
        }
    }

    assert!(hits > 0);
}

#[test]
fn segments_inside_of_frustums() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..500 {
        let frustum = rand_frustum(&mut rng);
        let start = point_in_frustum(&mut rng, &frustum);
        let end = point_in_frustum(&mut rng, &frustum);
        assert!(frustum.intersects_segment(&start, &end));

        // The segment leaves the frustum on both sides.
        let dir = end - start;
        let far = frustum.far() * 10.0;
        if dir.norm() > 1.0e-2 {
            let dir = dir.normalize() * far;
            assert!(frustum.intersects_segment(&(start - dir), &(end + dir)));
        }
    }
}
