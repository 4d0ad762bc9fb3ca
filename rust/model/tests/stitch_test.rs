// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end stitching scenarios: partially overlapping walls, fully shared
//! walls, and the enclosed-footprint support cut.

use approx::assert_relative_eq;
use b3d_geometry::Point3;
use b3d_model::{stitch_adjacent_solids, stitch_solids, Solid, Zone};

#[test]
fn partially_overlapping_walls_get_sliced() {
    let mut a = Solid::box_solid(
        "a",
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
    )
    .unwrap();
    // Shares only the lower half of a's right wall.
    let mut b = Solid::box_solid(
        "b",
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.5, 1.0),
    )
    .unwrap();

    let volume_a = a.volume();
    let volume_b = b.volume();

    stitch_solids(&mut a, &mut b).unwrap();

    // a's right wall was split in two; b's left wall is already the shared
    // region and stays whole.
    let right = a.wall("right").unwrap();
    assert_eq!(right.polygon_count(), 2);
    assert_relative_eq!(right.area(), 1.0, epsilon = 1e-9);
    let mut areas: Vec<f64> = right.polygons().map(|p| p.area()).collect();
    areas.sort_by(f64::total_cmp);
    assert_relative_eq!(areas[0], 0.5, epsilon = 1e-9);
    assert_relative_eq!(areas[1], 0.5, epsilon = 1e-9);

    assert_eq!(b.wall("left").unwrap().polygon_count(), 1);

    // One of the new pieces is now the exact counterpart of b's wall.
    let (_, b_left) = b.find_polygon("left").unwrap();
    let exact_matches = right
        .polygons()
        .filter(|p| p.is_facing(b_left, true))
        .count();
    assert_eq!(exact_matches, 1);

    // Slicing must not change the volumes.
    assert_relative_eq!(a.volume(), volume_a, epsilon = 1e-9);
    assert_relative_eq!(b.volume(), volume_b, epsilon = 1e-9);
}

#[test]
fn fully_shared_wall_needs_no_slicing() {
    let mut a = Solid::box_solid(
        "a",
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
    )
    .unwrap();
    let mut b = Solid::box_solid(
        "b",
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 1.0, 1.0),
    )
    .unwrap();

    stitch_solids(&mut a, &mut b).unwrap();

    for solid in [&a, &b] {
        for wall in solid.walls() {
            assert_eq!(wall.polygon_count(), 1, "{}", wall.name());
        }
    }
}

#[test]
fn enclosed_footprint_uses_support_cut() {
    let mut a = Solid::box_solid(
        "a",
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(3.0, 3.0, 3.0),
    )
    .unwrap();
    // b's left wall sits strictly inside a's right wall.
    let mut b = Solid::box_solid(
        "b",
        Point3::new(3.0, 1.0, 1.0),
        Point3::new(4.0, 2.0, 2.0),
    )
    .unwrap();

    let volume_a = a.volume();

    stitch_solids(&mut a, &mut b).unwrap();

    let right = a.wall("right").unwrap();
    assert_eq!(right.polygon_count(), 3);
    assert_relative_eq!(right.area(), 9.0, epsilon = 1e-9);

    // One piece is the exact counterpart of b's enclosed wall.
    let (_, b_left) = b.find_polygon("left").unwrap();
    let exact: Vec<_> = right
        .polygons()
        .filter(|p| p.is_facing(b_left, true))
        .collect();
    assert_eq!(exact.len(), 1);
    assert_relative_eq!(exact[0].area(), 1.0, epsilon = 1e-9);

    assert_relative_eq!(a.volume(), volume_a, epsilon = 1e-9);
}

#[test]
fn stitching_through_the_zone() {
    let mut zone = Zone::new("z");
    zone.add_solid(
        Solid::box_solid(
            "a",
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 2.0),
        )
        .unwrap(),
    )
    .unwrap();
    zone.add_solid(
        Solid::box_solid(
            "b",
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(4.0, 1.0, 2.0),
        )
        .unwrap(),
    )
    .unwrap();

    stitch_adjacent_solids(&mut zone, "a", "b").unwrap();

    // Order and membership survive the take/restore dance.
    let names: Vec<_> = zone.solid_names().collect();
    assert_eq!(names, vec!["a", "b"]);

    let right = zone.solid("a").unwrap().wall("right").unwrap();
    assert_eq!(right.polygon_count(), 2);
    assert_relative_eq!(right.area(), 4.0, epsilon = 1e-9);
}

#[test]
fn stitching_missing_solid_fails() {
    let mut zone = Zone::new("z");
    zone.add_solid(
        Solid::box_solid(
            "a",
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        )
        .unwrap(),
    )
    .unwrap();

    assert!(stitch_adjacent_solids(&mut zone, "a", "ghost").is_err());
    // The taken solid was restored despite the failure.
    assert!(zone.solid("a").is_some());
}
