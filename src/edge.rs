// SPDX-License-Identifier: AGPL-3.0-or-later

//! Line segments and the segment-segment intersection kernel.
//!
//! The kernel classifies a pair of segments as disjoint, crossing in a single
//! point (interior or endpoint), or collinear with a shared interval. Computed
//! crossing points are snapped onto nearby segment endpoints so that rounding
//! errors cannot spawn infinitesimal segments during subdivision.

use crate::point::{Point, Vector};
use crate::CoordinateType;

/// Relative tolerance of the parallelism test in [`Edge::intersection_approx`].
const PARALLEL_TOLERANCE: f64 = 1e-7;

/// Per-coordinate distance below which a computed intersection point is
/// replaced by a segment endpoint.
const SNAP_TOLERANCE: f64 = 1e-8;

/// Side of a directed line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Center,
    Right,
}

/// Twice the signed area of the triangle (a, b, c).
///
/// Positive iff a → b → c is a counter-clockwise turn.
pub fn signed_area<T: CoordinateType>(a: Point<T>, b: Point<T>, c: Point<T>) -> T {
    (a.x - c.x) * (b.y - c.y) - (b.x - c.x) * (a.y - c.y)
}

/// A directed line segment.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Edge<T> {
    pub start: Point<T>,
    pub end: Point<T>,
}

/// Result of intersecting two segments.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EdgeIntersection<T> {
    /// The segments do not touch.
    None,
    /// A single crossing point interior to both segments.
    Point(Point<T>),
    /// A single contact point which is an endpoint of at least one segment.
    EndPoint(Point<T>),
    /// The segments are collinear and share the given interval.
    Overlap(Edge<T>),
}

impl<T: CoordinateType> Edge<T> {
    pub fn new(start: Point<T>, end: Point<T>) -> Self {
        Edge { start, end }
    }

    pub fn vector(&self) -> Vector<T> {
        self.end - self.start
    }

    /// An edge with coinciding endpoints has no direction and is skipped by
    /// the sweep.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    /// On which side of the directed line through this edge does `p` lie?
    pub fn side_of(&self, p: Point<T>) -> Side {
        let area = signed_area(self.start, self.end, p);
        if area > T::zero() {
            Side::Left
        } else if area < T::zero() {
            Side::Right
        } else {
            Side::Center
        }
    }

    /// Check whether `p` lies on the segment, endpoints included.
    pub fn contains_point(&self, p: Point<T>) -> bool {
        if signed_area(self.start, self.end, p) != T::zero() {
            return false;
        }
        let (xmin, xmax) = minmax(self.start.x, self.end.x);
        let (ymin, ymax) = minmax(self.start.y, self.end.y);
        xmin <= p.x && p.x <= xmax && ymin <= p.y && p.y <= ymax
    }

    /// Compute the intersection of two segments in floating point coordinates.
    ///
    /// Both segments are assumed to be non-degenerate. Crossing points closer
    /// than the snap tolerance to a segment endpoint are replaced by that
    /// endpoint exactly.
    pub fn intersection_approx(&self, other: &Edge<T>) -> EdgeIntersection<T> {
        debug_assert!(!self.is_degenerate());
        debug_assert!(!other.is_degenerate());

        let zero = T::zero();
        let one = T::one();
        let eps = T::from(PARALLEL_TOLERANCE).unwrap();

        let d0 = self.vector();
        let d1 = other.vector();
        let e = other.start - self.start;

        let sqr_len0 = d0.norm2_squared();
        let sqr_len1 = d1.norm2_squared();
        let kross = d0.cross_prod(d1);

        if kross * kross > eps * sqr_len0 * sqr_len1 {
            // The lines are not parallel: intersect them and check that the
            // crossing lies on both segments.
            let s = e.cross_prod(d1) / kross;
            if s < zero || s > one {
                return EdgeIntersection::None;
            }
            let t = e.cross_prod(d0) / kross;
            if t < zero || t > one {
                return EdgeIntersection::None;
            }
            let p = snap_to_endpoints(self.start + d0 * s, self, other);
            return if p == self.start || p == self.end || p == other.start || p == other.end {
                EdgeIntersection::EndPoint(p)
            } else {
                EdgeIntersection::Point(p)
            };
        }

        let sqr_len_e = e.norm2_squared();
        let kross2 = e.cross_prod(d0);
        if kross2 * kross2 > eps * sqr_len0 * sqr_len_e {
            // Parallel but on distinct lines.
            return EdgeIntersection::None;
        }

        // Collinear: project `other` onto this edge's direction and intersect
        // the parameter intervals.
        let s0 = d0.dot(e) / sqr_len0;
        let s1 = s0 + d0.dot(d1) / sqr_len0;
        let (smin, smax) = minmax(s0, s1);
        if smin > one || smax < zero {
            return EdgeIntersection::None;
        }
        let w0 = if smin > zero { smin } else { zero };
        let w1 = if smax < one { smax } else { one };

        let p0 = snap_to_endpoints(self.start + d0 * w0, self, other);
        if w0 == w1 {
            // The intervals touch in a single point, necessarily a segment
            // endpoint.
            return EdgeIntersection::EndPoint(p0);
        }
        let p1 = snap_to_endpoints(self.start + d0 * w1, self, other);
        EdgeIntersection::Overlap(Edge::new(p0, p1))
    }
}

fn minmax<T: CoordinateType>(a: T, b: T) -> (T, T) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn snap_to_endpoints<T: CoordinateType>(p: Point<T>, e1: &Edge<T>, e2: &Edge<T>) -> Point<T> {
    let delta = T::from(SNAP_TOLERANCE).unwrap();
    let mut p = p;
    for q in [e1.start, e1.end, e2.start, e2.end] {
        if (p.x - q.x).abs() < delta && (p.y - q.y).abs() < delta {
            p = q;
        }
    }
    p
}
