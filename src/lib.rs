// SPDX-License-Identifier: AGPL-3.0-or-later

//! Boolean set operations on planar polygons.
//!
//! The crate implements the Martinez-Rueda-Feito plane sweep: the edges of
//! both input polygons are processed left to right by an event queue, a scan
//! line keeps the active edges ordered vertically, pairwise intersections
//! subdivide edges on the fly, and the surviving edges are stitched back into
//! closed contours with a hole/boundary hierarchy.
//!
//! Inputs are collections of implicitly closed contours over floating point
//! coordinates, in any winding order. Self-intersecting inputs are accepted
//! but produce undefined results.
//!
//! ```
//! use polygon_booleanop::{boolean_op, Operation, Polygon};
//!
//! let a = Polygon::from(vec![(0.0f64, 0.0), (2., 0.), (2., 2.), (0., 2.)]);
//! let b = Polygon::from(vec![(1.0f64, 1.0), (3., 1.), (3., 3.), (1., 3.)]);
//!
//! let intersection = boolean_op(&a, &b, Operation::Intersection);
//!
//! assert_eq!(intersection.len(), 1);
//! assert!((intersection.signed_area() - 1.0).abs() < 1e-9);
//! ```

use std::fmt::Debug;

use num_traits::Float;

mod booleanop;
mod compare_segments;
mod connector;
mod edge;
mod error;
mod point;
mod polygon;
mod possible_intersection;
mod scanline;
mod sweep_event;

// API exports.
pub use booleanop::{boolean_op, ClipResult, Clipper};
pub use edge::{signed_area, Edge, EdgeIntersection, Side};
pub use error::ValidationError;
pub use point::{Point, Vector};
pub use polygon::{Contour, Polygon, Rect};

/// Trait bound for coordinate scalars. Blanket-implemented for all floating
/// point types with a debug representation.
pub trait CoordinateType: Float + Debug {}

impl<T: Float + Debug> CoordinateType for T {}

/// Type of boolean operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Intersection = 0,
    Union = 1,
    Difference = 2,
    Xor = 3,
}
