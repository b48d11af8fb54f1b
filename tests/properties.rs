// SPDX-License-Identifier: AGPL-3.0-or-later

//! Property-based tests: area identities of the set operations on random
//! simple polygons, plus randomized point-membership checks.

use proptest::prelude::*;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use polygon_booleanop::{boolean_op, Operation, Point, Polygon};

/// Star-shaped polygon around `center`: one vertex per equally spaced angle,
/// each at its own radius. Star-shaped implies simple.
fn star_polygon(center: (f64, f64), radii: &[f64]) -> Polygon<f64> {
    let n = radii.len();
    let points: Vec<(f64, f64)> = radii
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
            (center.0 + r * angle.cos(), center.1 + r * angle.sin())
        })
        .collect();
    Polygon::from(points)
}

fn radii_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.5f64..3.0, 3..12)
}

fn center_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-1.5f64..1.5, -1.5f64..1.5)
}

fn area(polygon: &Polygon<f64>) -> f64 {
    polygon.signed_area()
}

/// Distance of `p` to the segment (a, b).
fn distance_to_segment(p: Point<f64>, a: Point<f64>, b: Point<f64>) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

fn near_any_edge(p: Point<f64>, polygons: &[&Polygon<f64>], tolerance: f64) -> bool {
    polygons.iter().any(|polygon| {
        polygon.iter().any(|contour| {
            contour
                .edges()
                .any(|e| distance_to_segment(p, e.start, e.end) < tolerance)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn area_identities(
        radii_a in radii_strategy(),
        radii_b in radii_strategy(),
        center_b in center_strategy(),
    ) {
        let a = star_polygon((0.0, 0.0), &radii_a);
        let b = star_polygon(center_b, &radii_b);

        let intersection = boolean_op(&a, &b, Operation::Intersection);
        let union = boolean_op(&a, &b, Operation::Union);
        let difference = boolean_op(&a, &b, Operation::Difference);
        let xor = boolean_op(&a, &b, Operation::Xor);

        let area_a = area(&a);
        let area_b = area(&b);
        let i = area(&intersection);
        let u = area(&union);
        let d = area(&difference);
        let x = area(&xor);

        let tolerance = 1e-6;

        prop_assert!((u - (area_a + area_b - i)).abs() < tolerance,
            "union area {} != {} + {} - {}", u, area_a, area_b, i);
        prop_assert!((d - (area_a - i)).abs() < tolerance,
            "difference area {} != {} - {}", d, area_a, i);
        prop_assert!((x - (u - i)).abs() < tolerance,
            "xor area {} != {} - {}", x, u, i);

        prop_assert!(i >= -tolerance);
        prop_assert!(u + tolerance >= area_a.max(area_b));
    }

    #[test]
    fn results_are_structurally_valid(
        radii_a in radii_strategy(),
        radii_b in radii_strategy(),
        center_b in center_strategy(),
    ) {
        let a = star_polygon((0.0, 0.0), &radii_a);
        let b = star_polygon(center_b, &radii_b);

        for operation in [
            Operation::Intersection,
            Operation::Union,
            Operation::Difference,
            Operation::Xor,
        ] {
            let result = boolean_op(&a, &b, operation);
            prop_assert!(result.validate().is_ok(),
                "{:?} produced an invalid polygon: {:?}", operation, result.validate());
        }
    }

    #[test]
    fn idempotence(radii in radii_strategy()) {
        let a = star_polygon((0.0, 0.0), &radii);
        let area_a = area(&a);

        let tolerance = 1e-6;
        prop_assert!((area(&boolean_op(&a, &a, Operation::Intersection)) - area_a).abs() < tolerance);
        prop_assert!((area(&boolean_op(&a, &a, Operation::Union)) - area_a).abs() < tolerance);
        prop_assert!(boolean_op(&a, &a, Operation::Difference).is_empty());
        prop_assert!(boolean_op(&a, &a, Operation::Xor).is_empty());
    }

    #[test]
    fn commutative_operations(
        radii_a in radii_strategy(),
        radii_b in radii_strategy(),
        center_b in center_strategy(),
    ) {
        let a = star_polygon((0.0, 0.0), &radii_a);
        let b = star_polygon(center_b, &radii_b);

        let tolerance = 1e-6;
        for operation in [Operation::Intersection, Operation::Union, Operation::Xor] {
            let ab = area(&boolean_op(&a, &b, operation));
            let ba = area(&boolean_op(&b, &a, operation));
            prop_assert!((ab - ba).abs() < tolerance,
                "{:?} not commutative: {} vs {}", operation, ab, ba);
        }
    }
}

/// Probe random points and compare the membership in the result with the
/// boolean combination of the memberships in the inputs. Points close to an
/// input edge are skipped; membership on the boundary is not defined.
#[test]
fn test_random_membership_probes() {
    let seed = 3u8;
    let mut rng = StdRng::from_seed([seed; 32]);
    let radius = Uniform::from(0.5f64..3.0);
    let vertex_count = Uniform::from(4usize..10);
    let offset = Uniform::from(-1.0f64..1.0);
    let probe = Uniform::from(-4.0f64..4.0);

    for _ in 0..50 {
        let n_a = vertex_count.sample(&mut rng);
        let n_b = vertex_count.sample(&mut rng);
        let radii_a: Vec<f64> = (0..n_a).map(|_| radius.sample(&mut rng)).collect();
        let radii_b: Vec<f64> = (0..n_b).map(|_| radius.sample(&mut rng)).collect();
        let center_b = (offset.sample(&mut rng), offset.sample(&mut rng));

        let a = star_polygon((0.0, 0.0), &radii_a);
        let b = star_polygon(center_b, &radii_b);

        let results: Vec<_> = [
            Operation::Intersection,
            Operation::Union,
            Operation::Difference,
            Operation::Xor,
        ]
        .into_iter()
        .map(|operation| boolean_op(&a, &b, operation))
        .collect();

        let mut checks = 0;
        for _ in 0..40 {
            let p = Point::new(probe.sample(&mut rng), probe.sample(&mut rng));
            if near_any_edge(p, &[&a, &b], 1e-6) {
                continue;
            }

            let in_a = a.contains_point(p);
            let in_b = b.contains_point(p);
            let expected = [in_a & in_b, in_a | in_b, in_a & !in_b, in_a ^ in_b];

            for (result, expected) in results.iter().zip(expected) {
                assert_eq!(
                    result.contains_point(p),
                    expected,
                    "probe {:?} against a = {:?}, b = {:?}",
                    p,
                    a,
                    b
                );
            }
            checks += 1;
        }
        assert!(checks >= 20);
    }
}
