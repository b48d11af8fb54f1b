// SPDX-License-Identifier: AGPL-3.0-or-later

//! Assemble the segments surviving the sweep into closed contours and
//! classify the contours into outer boundaries and holes.
//!
//! Segments arrive one by one and are linked onto open point chains; a chain
//! whose two ends meet becomes a closed contour. Once all chains are closed,
//! a second, much simpler sweep over the result segments determines for each
//! contour the nearest result edge below its leftmost vertex, which tells
//! whether the contour bounds a hole and under which parent.

use std::cmp::Ordering;
use std::collections::VecDeque;

use log::{debug, warn};

use crate::compare_segments::compare_edges;
use crate::edge::{signed_area, Edge};
use crate::point::Point;
use crate::polygon::{Contour, Polygon};
use crate::scanline::ScanLine;
use crate::CoordinateType;

/// An output segment together with the side the result interior lies on.
#[derive(Copy, Clone, Debug)]
struct OutputSegment<T: CoordinateType> {
    edge: Edge<T>,
    /// True if the interior of the result lies above the segment.
    interior_above: bool,
}

/// A sequence of points that is still growing at both ends.
#[derive(Debug)]
struct PointChain<T: CoordinateType> {
    points: VecDeque<Point<T>>,
    segments: Vec<OutputSegment<T>>,
    closed: bool,
}

impl<T: CoordinateType> PointChain<T> {
    fn new(segment: OutputSegment<T>) -> Self {
        let mut points = VecDeque::new();
        points.push_back(segment.edge.start);
        points.push_back(segment.edge.end);
        PointChain {
            points,
            segments: vec![segment],
            closed: false,
        }
    }

    fn front(&self) -> Point<T> {
        *self.points.front().unwrap()
    }

    fn back(&self) -> Point<T> {
        *self.points.back().unwrap()
    }

    /// Attach a segment to either end of the chain. Returns false if neither
    /// segment endpoint matches a chain end.
    fn link_segment(&mut self, segment: &OutputSegment<T>) -> bool {
        let s = segment.edge.start;
        let e = segment.edge.end;

        let linked = if s == self.front() {
            if e == self.back() {
                self.closed = true;
            } else {
                self.points.push_front(e);
            }
            true
        } else if e == self.back() {
            if s == self.front() {
                self.closed = true;
            } else {
                self.points.push_back(s);
            }
            true
        } else if e == self.front() {
            if s == self.back() {
                self.closed = true;
            } else {
                self.points.push_front(s);
            }
            true
        } else if s == self.back() {
            if e == self.front() {
                self.closed = true;
            } else {
                self.points.push_back(e);
            }
            true
        } else {
            false
        };

        if linked {
            self.segments.push(*segment);
        }
        linked
    }

    /// Merge another chain into this one if their ends meet, reversing it if
    /// necessary. Returns false if the chains do not connect.
    fn link_chain(&mut self, other: &mut PointChain<T>) -> bool {
        let linked = if other.front() == self.back() {
            other.points.pop_front();
            self.points.extend(other.points.drain(..));
            true
        } else if other.back() == self.front() {
            self.points.pop_front();
            for p in other.points.drain(..).rev() {
                self.points.push_front(p);
            }
            true
        } else if other.front() == self.front() {
            self.points.pop_front();
            for p in other.points.drain(..) {
                self.points.push_front(p);
            }
            true
        } else if other.back() == self.back() {
            self.points.pop_back();
            for p in other.points.drain(..).rev() {
                self.points.push_back(p);
            }
            true
        } else {
            false
        };

        if linked {
            self.segments.append(&mut other.segments);
        }
        linked
    }
}

/// Accumulates output segments into contours.
#[derive(Debug)]
pub struct Connector<T: CoordinateType> {
    open: Vec<PointChain<T>>,
    closed: Vec<PointChain<T>>,
}

impl<T: CoordinateType> Connector<T> {
    pub fn new() -> Self {
        Connector {
            open: Vec::new(),
            closed: Vec::new(),
        }
    }

    /// Feed one output segment into the chains.
    pub fn add(&mut self, edge: Edge<T>, interior_above: bool) {
        let segment = OutputSegment {
            edge,
            interior_above,
        };

        for j in 0..self.open.len() {
            if self.open[j].link_segment(&segment) {
                if self.open[j].closed {
                    let chain = self.open.remove(j);
                    self.closed.push(chain);
                } else {
                    // The extended chain may now connect to another open one.
                    let mut k = j + 1;
                    while k < self.open.len() {
                        let (head, tail) = self.open.split_at_mut(k);
                        if head[j].link_chain(&mut tail[0]) {
                            self.open.remove(k);
                            break;
                        }
                        k += 1;
                    }
                }
                return;
            }
        }

        self.open.push(PointChain::new(segment));
    }

    /// Turn the closed chains into a polygon with hole classification and
    /// canonical orientation (boundaries counter-clockwise, holes clockwise).
    pub fn into_polygon(self) -> Polygon<T> {
        if !self.open.is_empty() {
            warn!("{} segment chains did not close", self.open.len());
        }

        let mut contours: Vec<Contour<T>> = Vec::with_capacity(self.closed.len());
        let mut edges: Vec<ResultEdge<T>> = Vec::new();

        for chain in self.closed {
            if chain.points.len() < 3 {
                debug!("dropping a contour with {} points", chain.points.len());
                continue;
            }
            let contour = contours.len();
            contours.push(Contour::from(
                chain.points.into_iter().collect::<Vec<_>>(),
            ));
            for segment in chain.segments {
                let (start, end) = if segment.edge.start <= segment.edge.end {
                    (segment.edge.start, segment.edge.end)
                } else {
                    (segment.edge.end, segment.edge.start)
                };
                edges.push(ResultEdge {
                    edge: Edge::new(start, end),
                    interior_above: segment.interior_above,
                    contour,
                    seq: edges.len(),
                });
            }
        }

        classify_contours(&mut contours, &edges);

        for contour in &mut contours {
            if contour.is_hole() == contour.is_counter_clockwise() {
                contour.reverse();
            }
        }

        Polygon::from(contours)
    }
}

/// A result segment prepared for the classification sweep: oriented left to
/// right and tagged with the contour it belongs to.
#[derive(Copy, Clone, Debug)]
struct ResultEdge<T: CoordinateType> {
    edge: Edge<T>,
    interior_above: bool,
    contour: usize,
    seq: usize,
}

impl<T: CoordinateType> PartialEq for ResultEdge<T> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<T: CoordinateType> Eq for ResultEdge<T> {}

impl<T: CoordinateType> PartialOrd for ResultEdge<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Order by vertical position. Result segments never cross, so ordering two
/// of them by the side their endpoints lie on is stable over the x-range they
/// share.
impl<T: CoordinateType> Ord for ResultEdge<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.seq == other.seq {
            return Ordering::Equal;
        }
        let ord = if self.edge.start == other.edge.start {
            let area = signed_area(self.edge.start, self.edge.end, other.edge.end);
            if area > T::zero() {
                Ordering::Less
            } else if area < T::zero() {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        } else if self.edge.start < other.edge.start {
            compare_edges(&self.edge, &other.edge)
        } else {
            compare_edges(&other.edge, &self.edge).reverse()
        };
        ord.then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Assign hole/boundary status, parents and depths.
///
/// The result edges are swept left to right. When the first edge of a contour
/// enters the active set, the nearest non-vertical edge below decides: no
/// edge below means an outermost boundary; an edge with the result interior
/// above it means this contour closes off a hole in the contour below (or a
/// sibling hole of it, if the contour below is itself a hole); otherwise the
/// contour is a boundary at the same depth as the one below.
fn classify_contours<T: CoordinateType>(contours: &mut [Contour<T>], edges: &[ResultEdge<T>]) {
    let mut endpoints = Vec::with_capacity(edges.len() * 2);
    for (i, re) in edges.iter().enumerate() {
        endpoints.push((re.edge.start, true, i));
        endpoints.push((re.edge.end, false, i));
    }
    // Removals are handled before insertions at a shared point.
    endpoints.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap().then(a.1.cmp(&b.1)));

    let mut active: ScanLine<ResultEdge<T>> = ScanLine::new();
    let mut classified = vec![false; contours.len()];

    for (_p, is_left, i) in endpoints {
        let key = edges[i];
        if !is_left {
            active.remove(&key);
            continue;
        }
        active.insert(key);

        let contour = key.contour;
        if classified[contour] {
            continue;
        }
        classified[contour] = true;

        let mut below = active.prev(&key);
        while let Some(b) = below {
            if !b.edge.is_vertical() {
                break;
            }
            below = active.prev(b);
        }

        match below {
            None => {
                contours[contour].hole_of = None;
                contours[contour].depth = 0;
            }
            Some(b) => {
                let lower = b.contour;
                if b.interior_above {
                    let (parent, depth) = match contours[lower].hole_of {
                        Some(grand_parent) => (grand_parent, contours[lower].depth),
                        None => (lower, contours[lower].depth + 1),
                    };
                    contours[contour].hole_of = Some(parent);
                    contours[contour].depth = depth;
                    contours[parent].holes.push(contour);
                } else {
                    contours[contour].hole_of = None;
                    contours[contour].depth = contours[lower].depth;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn edge(a: (f64, f64), b: (f64, f64)) -> Edge<f64> {
        Edge::new(a.into(), b.into())
    }

    #[test]
    fn single_square_closes() {
        let mut connector = Connector::new();
        connector.add(edge((0.0, 0.0), (0.0, 1.0)), false);
        connector.add(edge((0.0, 0.0), (1.0, 0.0)), true);
        connector.add(edge((0.0, 1.0), (1.0, 1.0)), false);
        connector.add(edge((1.0, 0.0), (1.0, 1.0)), false);

        let polygon = connector.into_polygon();

        assert_eq!(polygon.len(), 1);
        let contour = &polygon.contours()[0];
        assert_eq!(contour.len(), 4);
        assert!(!contour.is_hole());
        assert_eq!(contour.depth(), 0);
        assert!(contour.is_counter_clockwise());
    }

    #[test]
    fn segments_fed_out_of_adjacency_merge_chains() {
        let mut connector = Connector::new();
        // Two disconnected chains that a third segment bridges.
        connector.add(edge((0.0, 0.0), (1.0, 0.0)), true);
        connector.add(edge((1.0, 1.0), (0.0, 1.0)), false);
        connector.add(edge((1.0, 0.0), (1.0, 1.0)), false);
        connector.add(edge((0.0, 1.0), (0.0, 0.0)), false);

        let polygon = connector.into_polygon();

        assert_eq!(polygon.len(), 1);
        assert_eq!(polygon.contours()[0].len(), 4);
    }

    #[test]
    fn hole_is_attributed_to_enclosing_contour() {
        let mut connector = Connector::new();
        // Outer square.
        connector.add(edge((0.0, 0.0), (4.0, 0.0)), true);
        connector.add(edge((0.0, 0.0), (0.0, 4.0)), false);
        connector.add(edge((4.0, 0.0), (4.0, 4.0)), false);
        connector.add(edge((0.0, 4.0), (4.0, 4.0)), false);
        // Inner square bounding a hole: the result interior lies outside of
        // it, i.e. below its bottom edge and above its top edge.
        connector.add(edge((1.0, 1.0), (3.0, 1.0)), false);
        connector.add(edge((1.0, 1.0), (1.0, 3.0)), false);
        connector.add(edge((3.0, 1.0), (3.0, 3.0)), false);
        connector.add(edge((1.0, 3.0), (3.0, 3.0)), true);

        let polygon = connector.into_polygon();

        assert_eq!(polygon.len(), 2);
        let outer = &polygon.contours()[0];
        let hole = &polygon.contours()[1];

        assert!(!outer.is_hole());
        assert_eq!(outer.depth(), 0);
        assert_eq!(outer.hole_indices(), &[1]);

        assert!(hole.is_hole());
        assert_eq!(hole.parent(), Some(0));
        assert_eq!(hole.depth(), 1);
        assert!(!hole.is_counter_clockwise());

        assert!(polygon.validate().is_ok());
    }

    #[test]
    fn unclosed_chains_are_dropped() {
        let mut connector = Connector::new();
        connector.add(edge((0.0, 0.0), (1.0, 0.0)), true);
        connector.add(edge((1.0, 0.0), (1.0, 1.0)), false);

        let polygon = connector.into_polygon();
        assert!(polygon.is_empty());
    }
}
