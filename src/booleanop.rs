// SPDX-License-Identifier: AGPL-3.0-or-later

//! The plane sweep: event queue setup, scan line maintenance, flag
//! computation and the public clipping interface.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::{Deref, RangeFrom};
use std::rc::{Rc, Weak};

use crate::compare_segments::compare_events_by_segments;
use crate::connector::Connector;
use crate::edge::Edge;
use crate::point::Point;
use crate::polygon::{Contour, Polygon};
use crate::possible_intersection::possible_intersection;
use crate::scanline::ScanLine;
use crate::sweep_event::{EdgeType, PolygonType, SweepEvent};
use crate::{CoordinateType, Operation};

/// Wrap a sweep event so the scan line orders by vertical position instead of
/// the queue order.
#[derive(Clone)]
struct ScanlineElement<T: CoordinateType>(Rc<SweepEvent<T>>);

impl<T: CoordinateType> Deref for ScanlineElement<T> {
    type Target = Rc<SweepEvent<T>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: CoordinateType> PartialEq for ScanlineElement<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: CoordinateType> Eq for ScanlineElement<T> {}

impl<T: CoordinateType> PartialOrd for ScanlineElement<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: CoordinateType> Ord for ScanlineElement<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_events_by_segments(&self.0, &other.0)
    }
}

/// Insert the edges of both polygons into the event queue.
fn fill_queue<T: CoordinateType>(
    subject: &Polygon<T>,
    clipping: &Polygon<T>,
) -> BinaryHeap<Rc<SweepEvent<T>>> {
    let mut event_queue = BinaryHeap::new();
    let mut edge_ids = 1..;

    /// Add the edges of one contour to the event queue.
    fn process_contour<T: CoordinateType>(
        event_queue: &mut BinaryHeap<Rc<SweepEvent<T>>>,
        contour: &Contour<T>,
        polygon_type: PolygonType,
        edge_ids: &mut RangeFrom<usize>,
    ) {
        for edge in contour.edges() {
            // Skip degenerate edges.
            if edge.is_degenerate() {
                continue;
            }
            let edge_id = edge_ids.next().unwrap();
            let start_is_left = edge.start < edge.end;

            let event_a = SweepEvent::new_rc(
                edge_id,
                edge.start,
                start_is_left,
                Weak::new(),
                polygon_type,
                EdgeType::Normal,
            );
            let event_b = SweepEvent::new_rc(
                edge_id,
                edge.end,
                !start_is_left,
                Rc::downgrade(&event_a),
                polygon_type,
                EdgeType::Normal,
            );
            event_a.set_other_event(&event_b);

            event_queue.push(event_a);
            event_queue.push(event_b);
        }
    }

    for contour in subject.iter() {
        process_contour(&mut event_queue, contour, PolygonType::Subject, &mut edge_ids);
    }
    for contour in clipping.iter() {
        process_contour(&mut event_queue, contour, PolygonType::Clipping, &mut edge_ids);
    }

    event_queue
}

/// Compute the transition and inside-other flags of a freshly inserted left
/// event from its predecessors in the scan line.
fn compute_fields<T: CoordinateType>(
    event: &Rc<SweepEvent<T>>,
    maybe_prev: Option<&ScanlineElement<T>>,
    maybe_prev_prev: Option<&ScanlineElement<T>>,
) {
    let (transition, inside_other) = match maybe_prev {
        None => {
            // First segment in the scan line: below it is the outside of
            // both polygons.
            (false, false)
        }
        Some(prev) if prev.get_edge_type() != EdgeType::Normal => {
            // The predecessor is one copy of a collinear overlap; the flags
            // of the segment two below bridge over it.
            match maybe_prev_prev {
                None => (false, true),
                Some(prev_prev) => {
                    if prev.polygon_type == event.polygon_type {
                        (!prev.transition(), !prev_prev.transition())
                    } else {
                        (!prev_prev.transition(), !prev.transition())
                    }
                }
            }
        }
        Some(prev) if prev.polygon_type == event.polygon_type => {
            (!prev.transition(), prev.inside_other())
        }
        Some(prev) => (prev.inside_other(), !prev.transition()),
    };

    event.set_fields(transition, inside_other);
}

/// Does the edge of this left event appear in the result of the operation?
fn contributes_to_result<T: CoordinateType>(event: &SweepEvent<T>, operation: Operation) -> bool {
    match event.get_edge_type() {
        EdgeType::Normal => match operation {
            Operation::Intersection => event.inside_other(),
            Operation::Union => !event.inside_other(),
            Operation::Difference => {
                (event.polygon_type == PolygonType::Subject) != event.inside_other()
            }
            Operation::Xor => true,
        },
        EdgeType::SameTransition => {
            matches!(operation, Operation::Intersection | Operation::Union)
        }
        EdgeType::DifferentTransition => operation == Operation::Difference,
        EdgeType::NonContributing => false,
    }
}

/// Side of the result interior relative to an emitted edge. This is the
/// hierarchy metadata the connector uses to tell holes from boundaries.
fn result_interior_above<T: CoordinateType>(event: &SweepEvent<T>, operation: Operation) -> bool {
    let own_above = !event.transition();
    match event.get_edge_type() {
        EdgeType::Normal => {
            let other_above = event.inside_other();
            match operation {
                Operation::Intersection => own_above && other_above,
                Operation::Union => own_above || other_above,
                Operation::Difference => {
                    if event.polygon_type == PolygonType::Subject {
                        own_above && !other_above
                    } else {
                        other_above && !own_above
                    }
                }
                Operation::Xor => own_above != other_above,
            }
        }
        // Coinciding boundaries of both polygons with matching transitions.
        EdgeType::SameTransition => own_above,
        // Coinciding boundaries with opposite transitions; the subject side
        // decides where the difference lies.
        EdgeType::DifferentTransition => {
            if event.polygon_type == PolygonType::Subject {
                own_above
            } else {
                !own_above
            }
        }
        EdgeType::NonContributing => false,
    }
}

/// Shortcut results for inputs that do not require a sweep.
fn trivial_result<T: CoordinateType>(
    subject: &Polygon<T>,
    clipping: &Polygon<T>,
    operation: Operation,
) -> Option<Polygon<T>> {
    let subject_box = subject.bounding_box();
    let clipping_box = clipping.bounding_box();

    let (subject_box, clipping_box) = match (subject_box, clipping_box) {
        (Some(s), Some(c)) => (s, c),
        // At least one operand has no vertices at all.
        _ => {
            return Some(match operation {
                Operation::Intersection => Polygon::new(),
                Operation::Difference => subject.clone(),
                Operation::Union | Operation::Xor => {
                    if subject.bounding_box().is_some() {
                        subject.clone()
                    } else {
                        clipping.clone()
                    }
                }
            });
        }
    };

    if !subject_box.overlaps(&clipping_box) {
        return Some(match operation {
            Operation::Intersection => Polygon::new(),
            Operation::Difference => subject.clone(),
            Operation::Union | Operation::Xor => {
                let mut result = subject.clone();
                result.join(clipping);
                result
            }
        });
    }

    None
}

/// Run the sweep and assemble the result.
fn sweep<T: CoordinateType>(
    subject: &Polygon<T>,
    clipping: &Polygon<T>,
    operation: Operation,
    intersections: &mut Vec<Point<T>>,
) -> Polygon<T> {
    if let Some(result) = trivial_result(subject, clipping, operation) {
        return result;
    }

    let subject_max_x = subject.bounding_box().unwrap().max.x;
    let clipping_max_x = clipping.bounding_box().unwrap().max.x;
    // Beyond this x no new output can start for intersection-like results.
    let min_max_x = subject_max_x.min(clipping_max_x);

    let mut event_queue = fill_queue(subject, clipping);
    let mut scan_line: ScanLine<ScanlineElement<T>> = ScanLine::new();
    let mut connector = Connector::new();
    // Left events skipped after the early-termination point; they must stay
    // alive until their right events have been flushed.
    let mut flushed = Vec::new();

    while let Some(event) = event_queue.pop() {
        match operation {
            Operation::Intersection if event.p.x > min_max_x => break,
            Operation::Difference if event.p.x > subject_max_x => break,
            Operation::Union if event.p.x > min_max_x => {
                // The remaining segments cannot touch the other polygon any
                // more; their right events flush straight to the connector.
                if event.is_left_event() {
                    flushed.push(event);
                } else {
                    let left = event.get_other_event().unwrap();
                    connector.add(
                        Edge::new(left.p, event.p),
                        result_interior_above(&left, operation),
                    );
                }
                continue;
            }
            _ => {}
        }

        if event.is_left_event() {
            let element = ScanlineElement(event.clone());
            scan_line.insert(element.clone());

            let maybe_prev = scan_line.prev(&element).cloned();
            let maybe_next = scan_line.next(&element).cloned();
            let maybe_prev_prev = maybe_prev
                .as_ref()
                .and_then(|prev| scan_line.prev(prev))
                .cloned();

            compute_fields(&event, maybe_prev.as_ref(), maybe_prev_prev.as_ref());

            if let Some(next) = &maybe_next {
                debug_assert_ne!(
                    compare_events_by_segments(&event, next),
                    Ordering::Greater,
                    "scan line ordering is inconsistent"
                );
                possible_intersection(&event, next, &mut event_queue, intersections);
            }
            if let Some(prev) = &maybe_prev {
                debug_assert_ne!(
                    compare_events_by_segments(&event, prev),
                    Ordering::Less,
                    "scan line ordering is inconsistent"
                );
                possible_intersection(prev, &event, &mut event_queue, intersections);
            }
        } else {
            let left = event.get_other_event().unwrap();
            let element = ScanlineElement(left.clone());

            if !scan_line.contains(&element) {
                continue;
            }

            let maybe_prev = scan_line.prev(&element).cloned();
            let maybe_next = scan_line.next(&element).cloned();

            if contributes_to_result(&left, operation) {
                connector.add(
                    Edge::new(left.p, event.p),
                    result_interior_above(&left, operation),
                );
            }

            scan_line.remove(&element);

            // The neighbors just became adjacent; check them against each
            // other.
            if let (Some(prev), Some(next)) = (maybe_prev, maybe_next) {
                possible_intersection(&prev, &next, &mut event_queue, intersections);
            }
        }
    }

    connector.into_polygon()
}

/// A clipping operation on two polygons.
///
/// The instance keeps the intersection points computed by the most recent
/// [`compute`](Clipper::compute) call.
pub struct Clipper<'a, T: CoordinateType> {
    subject: &'a Polygon<T>,
    clipping: &'a Polygon<T>,
    intersections: Vec<Point<T>>,
}

/// Result of [`Clipper::compute_with_intersections`].
#[derive(Clone, Debug)]
pub struct ClipResult<T: CoordinateType> {
    pub polygon: Polygon<T>,
    /// Every intersection point computed during the sweep, in discovery
    /// order and without deduplication.
    pub intersections: Vec<Point<T>>,
}

impl<'a, T: CoordinateType> Clipper<'a, T> {
    pub fn new(subject: &'a Polygon<T>, clipping: &'a Polygon<T>) -> Self {
        Clipper {
            subject,
            clipping,
            intersections: Vec::new(),
        }
    }

    /// Compute the given boolean operation between subject and clipping
    /// polygon.
    ///
    /// The result is always a polygon; an impossible request (such as the
    /// intersection of disjoint inputs) yields a polygon with zero contours.
    pub fn compute(&mut self, operation: Operation) -> Polygon<T> {
        self.intersections.clear();
        sweep(
            self.subject,
            self.clipping,
            operation,
            &mut self.intersections,
        )
    }

    /// Like [`compute`](Clipper::compute), but also hand out the intersection
    /// points found during the sweep.
    pub fn compute_with_intersections(&mut self, operation: Operation) -> ClipResult<T> {
        let polygon = self.compute(operation);
        ClipResult {
            polygon,
            intersections: self.intersections.clone(),
        }
    }

    /// Number of intersection points computed by the most recent operation.
    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }
}

/// Perform a boolean operation between two polygons.
///
/// # Example
/// ```
/// use polygon_booleanop::{boolean_op, Operation, Polygon};
///
/// let a = Polygon::from(vec![(0.0f64, 0.0), (2., 0.), (2., 2.), (0., 2.)]);
/// let b = Polygon::from(vec![(1.0f64, 1.0), (3., 1.), (3., 3.), (1., 3.)]);
///
/// let union = boolean_op(&a, &b, Operation::Union);
///
/// assert_eq!(union.len(), 1);
/// assert_eq!(union.contours()[0].len(), 8);
/// assert!((union.signed_area() - 7.0).abs() < 1e-9);
/// ```
pub fn boolean_op<T: CoordinateType>(
    subject: &Polygon<T>,
    clipping: &Polygon<T>,
    operation: Operation,
) -> Polygon<T> {
    Clipper::new(subject, clipping).compute(operation)
}
