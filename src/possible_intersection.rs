// SPDX-License-Identifier: AGPL-3.0-or-later

//! Check neighboring scan line entries for intersection, subdivide edges at
//! crossing points, and classify collinear overlaps between the two input
//! polygons.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use log::warn;

use crate::edge::EdgeIntersection;
use crate::point::Point;
use crate::sweep_event::{compare_event_order, EdgeType, SweepEvent};
use crate::CoordinateType;

/// Split the edge of `event` in two at the interior point `p` and push the
/// two new events onto the queue.
///
/// The head keeps `event` as its left event; the tail is processed when its
/// new left event pops from the queue. Both halves inherit polygon label and
/// edge type from the endpoint they replace.
pub fn divide_segment<T: CoordinateType>(
    event: &Rc<SweepEvent<T>>,
    p: Point<T>,
    queue: &mut BinaryHeap<Rc<SweepEvent<T>>>,
) {
    debug_assert!(event.is_left_event());

    let other = match event.get_other_event() {
        Some(other) => other,
        None => return,
    };

    debug_assert!(
        event.p != p && other.p != p,
        "Division point must not lie on an endpoint."
    );

    let r = SweepEvent::new_rc(
        event.get_edge_id(),
        p,
        false,
        Rc::downgrade(event),
        event.polygon_type,
        event.get_edge_type(),
    );
    let l = SweepEvent::new_rc(
        event.get_edge_id(),
        p,
        true,
        Rc::downgrade(&other),
        event.polygon_type,
        other.get_edge_type(),
    );

    if compare_event_order(&l, &other) == Ordering::Greater {
        // Rounding pushed the new left endpoint of the tail behind its right
        // endpoint. Swap the endpoint roles to keep the pair invariant.
        warn!(
            "division point {:?} ordered past the right endpoint; swapping endpoint roles",
            p
        );
        other.set_left_event(true);
        l.set_left_event(false);
    }
    if compare_event_order(event, &r) == Ordering::Greater {
        warn!("division point {:?} ordered before the left endpoint", p);
    }

    other.set_other_event(&l);
    event.set_other_event(&r);

    debug_assert!(!l.get_edge().unwrap().is_degenerate());
    debug_assert!(!r.get_edge().unwrap().is_degenerate());

    queue.push(l);
    queue.push(r);
}

/// Check two neighboring events for intersection and make the necessary
/// modifications to them and the queue.
///
/// `event1` must sit directly below `event2` in the scan line. Every computed
/// intersection point is recorded in `intersections`.
pub fn possible_intersection<T: CoordinateType>(
    event1: &Rc<SweepEvent<T>>,
    event2: &Rc<SweepEvent<T>>,
    queue: &mut BinaryHeap<Rc<SweepEvent<T>>>,
    intersections: &mut Vec<Point<T>>,
) {
    debug_assert!(event1.is_left_event());
    debug_assert!(event2.is_left_event());

    let edge1 = event1.get_edge().unwrap();
    let edge2 = event2.get_edge().unwrap();

    match edge1.intersection_approx(&edge2) {
        EdgeIntersection::None => (),
        EdgeIntersection::EndPoint(p) => {
            intersections.push(p);

            // The contact point is an endpoint of at least one of the two
            // edges; only an edge it is interior to gets divided.
            if p != edge1.start && p != edge1.end {
                divide_segment(event1, p, queue);
            } else if p != edge2.start && p != edge2.end {
                divide_segment(event2, p, queue);
            }
        }
        EdgeIntersection::Point(p) => {
            intersections.push(p);

            // Interior to both edges.
            divide_segment(event1, p, queue);
            divide_segment(event2, p, queue);
        }
        EdgeIntersection::Overlap(overlap) => {
            intersections.push(overlap.start);
            intersections.push(overlap.end);

            if event1.polygon_type == event2.polygon_type {
                // Overlapping edges of the same polygon are left alone; the
                // input is assumed to be free of self-overlaps.
                return;
            }
            handle_overlap(event1, event2, queue);
        }
    }
}

/// Edge type given to the surviving edge of a collinear overlap.
fn overlap_edge_type<T: CoordinateType>(
    event1: &Rc<SweepEvent<T>>,
    event2: &Rc<SweepEvent<T>>,
) -> EdgeType {
    if event1.transition() == event2.transition() {
        EdgeType::SameTransition
    } else {
        EdgeType::DifferentTransition
    }
}

/// Collinear overlap of two edges from different polygons.
///
/// The overlapping piece survives only once: one copy is marked
/// non-contributing, the other carries the combined transition information.
/// Non-shared endpoints subdivide the longer edge so that afterwards all
/// active pieces either coincide or are disjoint.
fn handle_overlap<T: CoordinateType>(
    event1: &Rc<SweepEvent<T>>,
    event2: &Rc<SweepEvent<T>>,
    queue: &mut BinaryHeap<Rc<SweepEvent<T>>>,
) {
    let other1 = event1.get_other_event().unwrap();
    let other2 = event2.get_other_event().unwrap();

    let left_coincide = event1.p == event2.p;
    let right_coincide = other1.p == other2.p;

    let overlap_type = overlap_edge_type(event1, event2);

    if left_coincide && right_coincide {
        // The edges are equal. The lower one is silenced, the upper one
        // represents both.
        event1.set_edge_type(EdgeType::NonContributing);
        other1.set_edge_type(EdgeType::NonContributing);
        event2.set_edge_type(overlap_type);
        other2.set_edge_type(overlap_type);
        return;
    }

    if left_coincide {
        // Shared left endpoint: the shorter edge is covered completely; the
        // head of the longer edge keeps the overlap type after division.
        let (short, short_other, long) = if compare_event_order(&other1, &other2) == Ordering::Less
        {
            (event1, &other1, event2)
        } else {
            (event2, &other2, event1)
        };
        short.set_edge_type(EdgeType::NonContributing);
        short_other.set_edge_type(EdgeType::NonContributing);
        long.set_edge_type(overlap_type);
        divide_segment(long, short_other.p, queue);
        return;
    }

    if right_coincide {
        // Shared right endpoint: the edge entering later is covered
        // completely; the tail of the earlier edge inherits the overlap type
        // from its right event on division.
        let (short, short_other, long, long_other) =
            if compare_event_order(event1, event2) == Ordering::Less {
                (event2, &other2, event1, &other1)
            } else {
                (event1, &other1, event2, &other2)
            };
        short.set_edge_type(EdgeType::NonContributing);
        short_other.set_edge_type(EdgeType::NonContributing);
        long_other.set_edge_type(overlap_type);
        divide_segment(long, short.p, queue);
        return;
    }

    // No shared endpoints. Order the four events along the common line.
    let (first_left, second_left) = if compare_event_order(event1, event2) == Ordering::Less {
        (event1, event2)
    } else {
        (event2, event1)
    };
    let (first_right, second_right) = if compare_event_order(&other1, &other2) == Ordering::Less {
        (&other1, &other2)
    } else {
        (&other2, &other1)
    };

    let contained = Rc::ptr_eq(&second_right.get_other_event().unwrap(), first_left);

    if !contained {
        // Partial overlap: the middle pieces coincide; one of them is
        // silenced, the other typed by the combined transitions.
        second_left.set_edge_type(EdgeType::NonContributing);
        first_right.set_edge_type(overlap_type);
        divide_segment(first_left, second_left.p, queue);
        divide_segment(second_left, first_right.p, queue);
        return;
    }

    // One edge contains the other. The contained edge is silenced entirely;
    // the containing edge is divided at both endpoints of the contained one
    // and its middle piece carries the overlap type.
    second_left.set_edge_type(EdgeType::NonContributing);
    first_right.set_edge_type(EdgeType::NonContributing);
    divide_segment(first_left, second_left.p, queue);

    let middle_left = second_right.get_other_event().unwrap();
    middle_left.set_edge_type(overlap_type);
    divide_segment(&middle_left, first_right.p, queue);
}
