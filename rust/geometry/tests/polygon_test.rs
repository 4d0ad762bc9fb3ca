// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-module polygon properties: triangulation coverage on awkward
//! shapes, rotation invariance, facing symmetry, and the serialization
//! reconstruction contract.

use approx::assert_relative_eq;
use b3d_geometry::{
    are_polygons_facing, roll_points, triangle_area, Point3, Polygon,
};

fn shape(name: &str, coords: &[(f64, f64)]) -> Polygon {
    Polygon::new(
        name,
        coords
            .iter()
            .map(|&(x, y)| Point3::new(x, y, 0.0))
            .collect(),
    )
    .unwrap()
}

fn covered_area(p: &Polygon) -> f64 {
    p.triangles()
        .iter()
        .map(|t| triangle_area(&p.points()[t[0]], &p.points()[t[1]], &p.points()[t[2]]))
        .sum()
}

#[test]
fn triangulation_covers_reference_shapes() {
    let cases: [(&str, &[(f64, f64)], f64, usize); 4] = [
        ("square", &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], 1.0, 2),
        (
            "l",
            &[
                (0.0, 0.0),
                (2.0, 0.0),
                (2.0, 1.0),
                (1.0, 1.0),
                (1.0, 2.0),
                (0.0, 2.0),
            ],
            3.0,
            4,
        ),
        (
            "u",
            &[
                (0.0, 0.0),
                (3.0, 0.0),
                (3.0, 2.0),
                (2.0, 2.0),
                (2.0, 1.0),
                (1.0, 1.0),
                (1.0, 2.0),
                (0.0, 2.0),
            ],
            5.0,
            6,
        ),
        (
            "c",
            &[
                (0.0, 0.0),
                (2.0, 0.0),
                (2.0, 1.0),
                (1.0, 1.0),
                (1.0, 2.0),
                (2.0, 2.0),
                (2.0, 3.0),
                (0.0, 3.0),
            ],
            5.0,
            6,
        ),
    ];

    for (name, coords, area, triangle_count) in cases {
        let p = shape(name, coords);
        assert_eq!(p.triangles().len(), triangle_count, "{name}");
        assert_relative_eq!(p.area(), area, epsilon = 1e-9);
        assert_relative_eq!(covered_area(&p), area, epsilon = 1e-9);
    }
}

#[test]
fn triangulation_is_rotation_invariant() {
    let coords = [
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ];
    let base = shape("l", &coords);

    for k in 1..coords.len() {
        let rolled = Polygon::new("rolled", roll_points(base.points(), k)).unwrap();
        assert_eq!(rolled.triangles().len(), base.triangles().len(), "roll {k}");
        assert_relative_eq!(covered_area(&rolled), covered_area(&base), epsilon = 1e-9);
    }
}

#[test]
fn facing_is_symmetric() {
    let a = shape("a", &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let identical = a.flip(Some("identical"));
    let double = shape("double", &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)])
        .flip(Some("double-flipped"));
    let apart = shape("apart", &[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 6.0)])
        .flip(Some("apart-flipped"));
    let same_normal = shape("same", &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);

    for other in [&identical, &double, &apart, &same_normal] {
        for exact in [true, false] {
            assert_eq!(
                are_polygons_facing(&a, other, exact),
                are_polygons_facing(other, &a, exact),
                "symmetry vs {} (exact={exact})",
                other.name()
            );
        }
    }

    assert!(are_polygons_facing(&a, &identical, true));
    assert!(!are_polygons_facing(&a, &double, true));
    assert!(are_polygons_facing(&a, &double, false));
    assert!(!are_polygons_facing(&a, &apart, false));
    assert!(!are_polygons_facing(&a, &same_normal, false));
}

#[test]
fn mesh_reconstructs_an_identical_polygon() {
    let original = shape(
        "wall",
        &[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 2.0),
            (2.0, 2.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ],
    );

    let (points, triangles) = original.mesh();
    let restored = Polygon::with_triangles("wall", points, triangles).unwrap();

    assert_eq!(restored.points(), original.points());
    assert_eq!(restored.triangles(), original.triangles());
    assert_relative_eq!(restored.area(), original.area(), epsilon = 1e-12);
    assert_eq!(restored.normal(), original.normal());
}

#[test]
fn flip_round_trip_restores_points() {
    let p = shape("p", &[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
    let back = p.flip(None).flip(None);
    assert_eq!(back.points(), p.points());
    assert_eq!(back.normal(), p.normal());
}
