// SPDX-License-Identifier: AGPL-3.0-or-later

//! Compute the ordering among edges. This is used to keep sweep events in the
//! right ordering in the scan line.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::edge::{signed_area, Edge, Side};
use crate::sweep_event::{compare_event_order, SweepEvent};
use crate::CoordinateType;

/// Compare two edges whose left endpoints differ, with `first` starting at
/// the smaller x.
///
/// Returns `Less` if the starting point of `second` is above `first` and
/// `Greater` if it is below. If the starting point of `second` lies on the
/// line through `first` then the end point is used to break the tie.
pub(crate) fn compare_edges<T: CoordinateType>(first: &Edge<T>, second: &Edge<T>) -> Ordering {
    debug_assert!(first.start != second.start);
    debug_assert!(first.start.x <= second.start.x);

    // Check that it makes sense to compare those two edges.
    debug_assert!(
        !(first.start.x > second.end.x || second.start.x > first.end.x),
        "The edges must overlap in their x-coordinates to be in the scan line at the same time."
    );

    match first.side_of(second.start) {
        Side::Left => Ordering::Less,
        Side::Right => Ordering::Greater,
        Side::Center => match first.side_of(second.end) {
            Side::Left => Ordering::Less,
            Side::Right => Ordering::Greater,
            Side::Center => Ordering::Equal,
        },
    }
}

/// Compute the ordering of two sweep events in the scan line: `Less` means
/// the segment of `le1` sits below the segment of `le2` at the current sweep
/// position.
///
/// The two sweep events MUST be left events. Also the two edges defined by
/// the sweep events must overlap when projected on the x-axis, otherwise they
/// would not both intersect the scan line.
pub fn compare_events_by_segments<T: CoordinateType>(
    le1: &Rc<SweepEvent<T>>,
    le2: &Rc<SweepEvent<T>>,
) -> Ordering {
    if Rc::ptr_eq(le1, le2) {
        return Ordering::Equal;
    }

    debug_assert!(le1.is_left_event());
    debug_assert!(le2.is_left_event());

    let edge1 = le1.get_edge().unwrap();
    let edge2 = le2.get_edge().unwrap();

    debug_assert!(!edge1.is_degenerate());
    debug_assert!(!edge2.is_degenerate());

    let a1 = signed_area(edge1.start, edge1.end, edge2.start);
    let a2 = signed_area(edge1.start, edge1.end, edge2.end);

    if a1 != T::zero() || a2 != T::zero() {
        // Segments are not collinear.

        if edge1.start == edge2.start {
            // If they share their left endpoint use the right endpoint to
            // sort.
            return if a2 > T::zero() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        if compare_event_order(le1, le2) == Ordering::Greater {
            // The segment of `le2` entered the scan line first; its line
            // decides.
            let above = signed_area(edge2.start, edge2.end, edge1.start) <= T::zero();
            if above {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        } else {
            // The segment of `le1` entered the scan line first.
            if a1 > T::zero() {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    } else {
        // Segments are collinear and intersect the scan line in the same
        // point. Break the tie by a stable criterion.
        if le1.p == le2.p {
            le1.get_edge_id().cmp(&le2.get_edge_id())
        } else if compare_event_order(le1, le2) == Ordering::Greater {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}
