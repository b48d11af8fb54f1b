// SPDX-License-Identifier: AGPL-3.0-or-later

//! Contours and polygons.
//!
//! A contour is an implicitly closed vertex loop. A polygon is an ordered list
//! of contours; contours of a clipping result additionally carry their
//! hole/boundary classification and nesting depth.

use itertools::Itertools;

use crate::booleanop::boolean_op;
use crate::edge::Edge;
use crate::error::ValidationError;
use crate::point::Point;
use crate::{CoordinateType, Operation};

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl<T: CoordinateType> Rect<T> {
    pub fn new(min: Point<T>, max: Point<T>) -> Self {
        Rect { min, max }
    }

    /// Check whether the two boxes share at least one point.
    pub fn overlaps(&self, other: &Rect<T>) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    fn include(&mut self, p: Point<T>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }
}

/// An implicitly closed sequence of vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour<T> {
    points: Vec<Point<T>>,
    pub(crate) hole_of: Option<usize>,
    pub(crate) holes: Vec<usize>,
    pub(crate) depth: usize,
}

impl<T: CoordinateType> Contour<T> {
    pub fn new() -> Self {
        Contour {
            points: Vec::new(),
            hole_of: None,
            holes: Vec::new(),
            depth: 0,
        }
    }

    pub fn push(&mut self, p: Point<T>) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the edges of the contour, including the implicit closing
    /// edge from the last vertex back to the first.
    pub fn edges(&self) -> impl Iterator<Item = Edge<T>> + '_ {
        self.points
            .iter()
            .copied()
            .circular_tuple_windows()
            .map(|(a, b)| Edge::new(a, b))
    }

    /// Shoelace area; positive for counter-clockwise orientation.
    pub fn signed_area(&self) -> T {
        let two = T::one() + T::one();
        let sum = self
            .edges()
            .fold(T::zero(), |acc, e| acc + e.start.x * e.end.y - e.end.x * e.start.y);
        sum / two
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > T::zero()
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn bounding_box(&self) -> Option<Rect<T>> {
        let mut points = self.points.iter();
        let first = *points.next()?;
        let mut rect = Rect::new(first, first);
        for &p in points {
            rect.include(p);
        }
        Some(rect)
    }

    /// Nesting depth: 0 for outermost boundaries, `parent depth + 1` for
    /// holes.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Index of the boundary contour this contour is a hole of.
    pub fn parent(&self) -> Option<usize> {
        self.hole_of
    }

    pub fn is_hole(&self) -> bool {
        self.hole_of.is_some()
    }

    /// Indices of the immediate holes of this boundary contour.
    pub fn hole_indices(&self) -> &[usize] {
        &self.holes
    }
}

impl<T: CoordinateType> From<Vec<Point<T>>> for Contour<T> {
    fn from(points: Vec<Point<T>>) -> Self {
        Contour {
            points,
            hole_of: None,
            holes: Vec::new(),
            depth: 0,
        }
    }
}

impl<T: CoordinateType> From<Vec<(T, T)>> for Contour<T> {
    fn from(points: Vec<(T, T)>) -> Self {
        Contour::from(points.into_iter().map(Point::from).collect::<Vec<_>>())
    }
}

/// An ordered list of contours.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon<T> {
    contours: Vec<Contour<T>>,
}

impl<T: CoordinateType> Polygon<T> {
    pub fn new() -> Self {
        Polygon {
            contours: Vec::new(),
        }
    }

    pub fn push(&mut self, contour: Contour<T>) {
        self.contours.push(contour);
    }

    pub fn contours(&self) -> &[Contour<T>] {
        &self.contours
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contour<T>> {
        self.contours.iter()
    }

    pub fn bounding_box(&self) -> Option<Rect<T>> {
        let mut boxes = self.contours.iter().filter_map(Contour::bounding_box);
        let mut rect = boxes.next()?;
        for b in boxes {
            rect.include(b.min);
            rect.include(b.max);
        }
        Some(rect)
    }

    /// Append all contours of `other`, shifting their parent and hole indices
    /// past the contours already present.
    pub fn join(&mut self, other: &Polygon<T>) {
        let offset = self.contours.len();
        for contour in &other.contours {
            let mut contour = contour.clone();
            contour.hole_of = contour.hole_of.map(|i| i + offset);
            for h in &mut contour.holes {
                *h += offset;
            }
            self.contours.push(contour);
        }
    }

    /// Even-odd membership test over all contours.
    pub fn contains_point(&self, p: Point<T>) -> bool {
        let mut inside = false;
        for contour in &self.contours {
            for edge in contour.edges() {
                let (a, b) = (edge.start, edge.end);
                if (a.y > p.y) != (b.y > p.y) {
                    let x_cross = a.x + (b.x - a.x) * (p.y - a.y) / (b.y - a.y);
                    if p.x < x_cross {
                        inside = !inside;
                    }
                }
            }
        }
        inside
    }

    /// Check the structural invariants of the polygon: every contour has at
    /// least three vertices and no repeated consecutive vertex, every hole
    /// points to an existing boundary contour, and hole depths are one more
    /// than their parent's.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (index, contour) in self.contours.iter().enumerate() {
            if contour.points.len() < 3 {
                return Err(ValidationError::TooFewVertices { contour: index });
            }
            for (vertex, edge) in contour.edges().enumerate() {
                if edge.is_degenerate() {
                    return Err(ValidationError::DuplicateVertex {
                        contour: index,
                        vertex,
                    });
                }
            }
            if let Some(parent) = contour.hole_of {
                if parent >= self.contours.len() {
                    return Err(ValidationError::ParentOutOfRange {
                        contour: index,
                        parent,
                    });
                }
                let parent_contour = &self.contours[parent];
                if parent_contour.hole_of.is_some() {
                    return Err(ValidationError::ParentNotBoundary {
                        contour: index,
                        parent,
                    });
                }
                let expected = parent_contour.depth + 1;
                if contour.depth != expected {
                    return Err(ValidationError::DepthMismatch {
                        contour: index,
                        depth: contour.depth,
                        expected,
                    });
                }
            }
        }
        Ok(())
    }

    /// Total signed area of the polygon. Holes are clockwise in clipping
    /// results, so their area subtracts from their parent's.
    pub fn signed_area(&self) -> T {
        self.contours
            .iter()
            .fold(T::zero(), |acc, c| acc + c.signed_area())
    }

    pub fn union(&self, other: &Polygon<T>) -> Polygon<T> {
        boolean_op(self, other, Operation::Union)
    }

    pub fn intersection(&self, other: &Polygon<T>) -> Polygon<T> {
        boolean_op(self, other, Operation::Intersection)
    }

    pub fn difference(&self, other: &Polygon<T>) -> Polygon<T> {
        boolean_op(self, other, Operation::Difference)
    }

    pub fn symmetric_difference(&self, other: &Polygon<T>) -> Polygon<T> {
        boolean_op(self, other, Operation::Xor)
    }
}

impl<T: CoordinateType> From<Vec<Contour<T>>> for Polygon<T> {
    fn from(contours: Vec<Contour<T>>) -> Self {
        Polygon { contours }
    }
}

/// Build a polygon with a single contour.
impl<T: CoordinateType> From<Vec<(T, T)>> for Polygon<T> {
    fn from(points: Vec<(T, T)>) -> Self {
        Polygon {
            contours: vec![Contour::from(points)],
        }
    }
}
