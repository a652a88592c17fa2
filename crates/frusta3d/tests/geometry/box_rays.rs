use crate::util::{rand_box, rand_frustum, rand_point, rand_vector};
use frusta3d::query::Ray;

#[test]
fn box_rays_agree_with_segments() {
    let mut rng = oorandom::Rand32::new(42);
    let mut hits = 0;

    for _ in 0..2000 {
        let obb = rand_box(&mut rng);
        let dir = rand_vector(&mut rng, 1.0);
        if dir.norm() < 0.1 {
            continue;
        }

        let ray = Ray::new(rand_point(&mut rng, 10.0), dir);
        let eps = 1.0e-2;

        match obb.ray_intersection(&ray) {
            Some((s1, s2)) if s2 - s1 > 3.0 * eps => {
                hits += 1;
                let inside = obb.intersects_segment(&ray.point_at(s1 + eps), &ray.point_at(s2 - eps));
                let before = obb.intersects_segment(&ray.point_at(s1 - 100.0), &ray.point_at(s1 - eps));
                let after = obb.intersects_segment(&ray.point_at(s2 + eps), &ray.point_at(s2 + 100.0));

                assert!(inside, "{obb:?} {ray:?}");
                assert!(!before, "{obb:?} {ray:?}");
                assert!(!after, "{obb:?} {ray:?}");
            }
            Some(_) => {}
            None => {
                assert!(
                    !obb.intersects_segment(&ray.point_at(-100.0), &ray.point_at(100.0)),
                    "{obb:?} {ray:?}"
                );
            }
        }
    }

    assert!(hits > 0);
}

#[test]
fn frustum_rays_agree_with_segments() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..2000 {
        let frustum = rand_frustum(&mut rng);
        let dir = rand_vector(&mut rng, 1.0);
        if dir.norm() < 0.1 {
            continue;
        }

        let ray = Ray::new(rand_point(&mut rng, 10.0), dir);
        let eps = 1.0e-2;

        match frustum.ray_intersection(&ray) {
            Some((s1, s2)) if s2 - s1 > 3.0 * eps => {
                let inside =
                    frustum.intersects_segment(&ray.point_at(s1 + eps), &ray.point_at(s2 - eps));
                let before =
                    frustum.intersects_segment(&ray.point_at(s1 - 100.0), &ray.point_at(s1 - eps));
                let after =
                    frustum.intersects_segment(&ray.point_at(s2 + eps), &ray.point_at(s2 + 100.0));

                assert!(inside, "{frustum:?} {ray:?}");
                assert!(!before, "{frustum:?} {ray:?}");
                assert!(!after, "{frustum:?} {ray:?}");
            }
            Some(_) => {}
            None => {
                assert!(
                    !frustum.intersects_segment(&ray.point_at(-100.0), &ray.point_at(100.0)),
                    "{frustum:?} {ray:?}"
                );
            }
        }
    }
}
