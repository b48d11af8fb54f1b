// SPDX-License-Identifier: AGPL-3.0-or-later

//! Sweep events.
//!
//! Every edge is represented by two events, one per endpoint, cross-linked as
//! twins. Events are shared via `Rc`; the fields that change during the sweep
//! live behind a `RefCell` so borrow checking happens at runtime.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use crate::edge::{signed_area, Edge};
use crate::point::Point;
use crate::CoordinateType;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum PolygonType {
    Subject,
    Clipping,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EdgeType {
    Normal,
    NonContributing,
    SameTransition,
    DifferentTransition,
}

#[derive(Debug)]
struct MutablePart<T: CoordinateType> {
    /// Reference to the event associated with the other endpoint of the edge.
    other_event: Weak<SweepEvent<T>>,
    /// Is p the left endpoint of the edge (p, other.p)?
    is_left_event: bool,
    edge_type: EdgeType,
    /// True if the polygon interior lies below the edge, i.e. an upward
    /// crossing of the edge leaves the polygon it belongs to.
    transition: bool,
    /// True if the edge lies inside the other input polygon. Only meaningful
    /// on left events after they entered the scan line.
    inside_other: bool,
    /// Unique ID of the edge. Used to break ties and guarantee an ordering
    /// for collinear edges.
    edge_id: usize,
}

#[derive(Debug)]
pub struct SweepEvent<T: CoordinateType> {
    /// Mutable part of the sweep event.
    mutable: RefCell<MutablePart<T>>,
    /// Point associated with the event.
    pub p: Point<T>,
    /// Type of polygon the edge belongs to: either SUBJECT or CLIPPING.
    pub polygon_type: PolygonType,
}

impl<T: CoordinateType> SweepEvent<T> {
    pub fn new_rc(
        edge_id: usize,
        point: Point<T>,
        is_left_event: bool,
        other_event: Weak<SweepEvent<T>>,
        polygon_type: PolygonType,
        edge_type: EdgeType,
    ) -> Rc<SweepEvent<T>> {
        Rc::new(SweepEvent {
            mutable: RefCell::new(MutablePart {
                other_event,
                is_left_event,
                edge_type,
                transition: false,
                inside_other: false,
                edge_id,
            }),
            p: point,
            polygon_type,
        })
    }

    pub fn is_left_event(&self) -> bool {
        self.mutable.borrow().is_left_event
    }

    pub fn set_left_event(&self, left: bool) {
        self.mutable.borrow_mut().is_left_event = left
    }

    pub fn get_other_event(&self) -> Option<Rc<SweepEvent<T>>> {
        self.mutable.borrow().other_event.upgrade()
    }

    pub fn set_other_event(&self, other_event: &Rc<SweepEvent<T>>) {
        debug_assert_ne!(self.is_left_event(), other_event.is_left_event());
        self.mutable.borrow_mut().other_event = Rc::downgrade(other_event);
    }

    /// Get the edge associated with the event. `start` is the point of this
    /// event, `end` the point of its twin.
    pub fn get_edge(&self) -> Option<Edge<T>> {
        self.get_other_event()
            .map(|other| Edge::new(self.p, other.p))
    }

    pub fn get_edge_type(&self) -> EdgeType {
        self.mutable.borrow().edge_type
    }

    pub fn set_edge_type(&self, edge_type: EdgeType) {
        self.mutable.borrow_mut().edge_type = edge_type
    }

    pub fn transition(&self) -> bool {
        self.mutable.borrow().transition
    }

    pub fn inside_other(&self) -> bool {
        self.mutable.borrow().inside_other
    }

    pub fn set_fields(&self, transition: bool, inside_other: bool) {
        let mut mutable = self.mutable.borrow_mut();
        mutable.transition = transition;
        mutable.inside_other = inside_other;
    }

    pub fn get_edge_id(&self) -> usize {
        self.mutable.borrow().edge_id
    }

    /// Check if the corresponding line segment is vertical.
    pub fn is_vertical(&self) -> bool {
        match self.get_other_event() {
            Some(ref other_event) => self.p.x == other_event.p.x,
            None => false,
        }
    }
}

/// Processing order of two events: `Less` means `a` is popped from the queue
/// first.
///
/// Events are ordered by x, then y; at a shared point right endpoints come
/// before left endpoints, and of two events on the same side the one whose
/// segment is below the other's far endpoint goes first. Collinear leftovers
/// fall back to the edge ID.
pub fn compare_event_order<T: CoordinateType>(a: &SweepEvent<T>, b: &SweepEvent<T>) -> Ordering {
    match a.p.partial_cmp(&b.p).unwrap() {
        Ordering::Equal => {
            if a.is_left_event() != b.is_left_event() {
                // Right events are processed first. This is needed to
                // efficiently connect the edges later on.
                if a.is_left_event() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            } else {
                let a_other = a.get_other_event().unwrap();
                let b_other = b.get_other_event().unwrap();

                let area = if a.is_left_event() {
                    signed_area(a.p, a_other.p, b_other.p)
                } else {
                    signed_area(a_other.p, a.p, b_other.p)
                };
                if area > T::zero() {
                    Ordering::Less
                } else if area < T::zero() {
                    Ordering::Greater
                } else {
                    // Collinear; break the tie by the edge ID.
                    a.get_edge_id().cmp(&b.get_edge_id())
                }
            }
        }
        less_or_greater => less_or_greater,
    }
}

impl<T: CoordinateType> PartialEq for SweepEvent<T> {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p
    }
}

impl<T: CoordinateType> Eq for SweepEvent<T> {}

impl<T: CoordinateType> PartialOrd for SweepEvent<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: CoordinateType> Ord for SweepEvent<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the queue is a max-heap but must pop the earliest event.
        compare_event_order(self, other).reverse()
    }
}
