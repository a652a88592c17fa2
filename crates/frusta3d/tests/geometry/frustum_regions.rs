use crate::util::{rand_frustum, rand_point, rand_range};
use frusta3d::bounding_volume::ViewFrustum;
use frusta3d::math::{Matrix, Point, Real};

const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
];

/// Approximates the distance to the boundary of `frustum` by sampling a grid on each face.
fn sampled_distance(frustum: &ViewFrustum, pt: &Point<Real>) -> Real {
    const STEPS: usize = 40;
    let points = frustum.to_points();
    let mut best = Real::MAX;

    for face in FACES {
        let [a, b, c, d] = face.map(|i| points[i].coords);

        for i in 0..=STEPS {
            let u = i as Real / STEPS as Real;
            let ab = a.lerp(&b, u);
            let dc = d.lerp(&c, u);

            for j in 0..=STEPS {
                let v = j as Real / STEPS as Real;
                let sample = ab.lerp(&dc, v);
                best = best.min((sample - pt.coords).norm());
            }
        }
    }

    best
}

fn local(frustum: &ViewFrustum) -> ViewFrustum {
    ViewFrustum::new(
        Point::origin(),
        Matrix::identity(),
        frustum.near(),
        frustum.far(),
        frustum.far_left(),
        frustum.far_up(),
    )
}

#[test]
fn distances_match_sampled_faces() {
    let mut rng = oorandom::Rand32::new(42);
    let mut outside = 0;

    for _ in 0..100 {
        let frustum = local(&rand_frustum(&mut rng));

        for _ in 0..5 {
            let pt = rand_point(&mut rng, 25.0);
            let exact = frustum.local_sq_distance_to_point(&pt).sqrt();

            if frustum.classify_local_point(&pt).index() == 0 {
                assert_eq!(exact, 0.0);
                continue;
            }

            outside += 1;
            let sampled = sampled_distance(&frustum, &pt);
            assert!(exact <= sampled + 1.0e-3, "{frustum:?} {pt:?}: {exact} > {sampled}");
            assert!(sampled <= exact + 0.5, "{frustum:?} {pt:?}: {sampled} >> {exact}");
        }
    }

    assert!(outside > 0);
}

#[test]
fn distances_bound_plane_distances() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..500 {
        let frustum = local(&rand_frustum(&mut rng));
        let pt = rand_point(&mut rng, 25.0);
        let exact = frustum.local_sq_distance_to_point(&pt).sqrt();

        // The distance to a convex volume is at least the distance to any of its planes.
        let plane_dist = frustum
            .to_planes()
            .iter()
            .map(|plane| plane.signed_distance(&pt))
            .fold(0.0, Real::max);
        assert!(plane_dist <= exact + 1.0e-3, "{frustum:?} {pt:?}");
    }
}

#[test]
fn interior_points_are_at_zero_distance() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..500 {
        let frustum = local(&rand_frustum(&mut rng));
        let depth = rand_range(&mut rng, frustum.near(), frustum.far());
        let scale = depth * frustum.inv_far() * 0.99;
        let pt = Point::new(
            depth,
            rand_range(&mut rng, -1.0, 1.0) * frustum.far_left() * scale,
            rand_range(&mut rng, -1.0, 1.0) * frustum.far_up() * scale,
        );

        assert_eq!(frustum.local_sq_distance_to_point(&pt), 0.0);
        assert!(frustum.contains_point(&pt));
    }
}
