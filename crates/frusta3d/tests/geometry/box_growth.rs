use crate::util::{rand_box, rand_point};
use frusta3d::bounding_volume::OrientedBox;
use frusta3d::math::{Point, Real, Vector, DIM};

fn inside_planes(obb: &OrientedBox, pt: &Point<Real>) -> bool {
    let tolerance = 1.0e-3 * (1.0 + obb.half_extents.max());
    obb.to_planes()
        .iter()
        .all(|plane| plane.signed_distance(pt) <= tolerance)
}

#[test]
fn added_points_are_contained() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..50 {
        let mut obb = OrientedBox::new_empty();
        let mut points = Vec::new();
        let mut volume = 0.0;

        for _ in 0..30 {
            let pt = rand_point(&mut rng, 10.0);
            let _ = obb.add_point(&pt);
            points.push(pt);

            assert!(inside_planes(&obb, &pt), "{obb:?} {pt:?}");
            assert!(obb.volume() >= volume * (1.0 - 1.0e-4));
            volume = obb.volume();
        }

        for pt in &points {
            assert!(inside_planes(&obb, pt), "{obb:?} {pt:?}");
        }
    }
}

#[test]
fn merged_boxes_contain_their_corners() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..200 {
        let mut obb = rand_box(&mut rng);
        let other = rand_box(&mut rng);
        let corners = [obb.to_points(), other.to_points()];
        let volume = obb.volume();

        let _ = obb.add_box(&other);
        assert!(obb.volume() >= volume * (1.0 - 1.0e-4));

        for pt in corners.iter().flatten() {
            assert!(inside_planes(&obb, pt), "{obb:?} {pt:?}");
        }
    }
}

#[test]
fn corners_round_trip() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..200 {
        let obb = rand_box(&mut rng);
        let points = obb.to_points();
        let center = points.iter().fold(Vector::zeros(), |acc, pt| acc + pt.coords) / 8.0;
        assert_relative_eq!(obb.center.coords, center, epsilon = 1.0e-4);

        for i in 0..DIM {
            let axis = obb.axis.column(i);
            let (min, max) = points.iter().fold((Real::MAX, -Real::MAX), |(min, max), pt| {
                let proj = pt.coords.dot(&axis);
                (min.min(proj), max.max(proj))
            });
            assert_relative_eq!((max - min) / 2.0, obb.half_extents[i], epsilon = 1.0e-4);
        }
    }
}
