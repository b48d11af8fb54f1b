// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

/// Violations reported by [`crate::Polygon::validate`].
///
/// The clipping core itself never fails; validation is a separate check that
/// callers (and the test suite) can run on inputs or results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("contour {contour} has fewer than three vertices")]
    TooFewVertices { contour: usize },

    #[error("contour {contour} repeats vertex {vertex} consecutively")]
    DuplicateVertex { contour: usize, vertex: usize },

    #[error("contour {contour} references out-of-range parent {parent}")]
    ParentOutOfRange { contour: usize, parent: usize },

    #[error("contour {contour} is a hole of contour {parent} which is itself a hole")]
    ParentNotBoundary { contour: usize, parent: usize },

    #[error("contour {contour} has depth {depth}, expected {expected}")]
    DepthMismatch {
        contour: usize,
        depth: usize,
        expected: usize,
    },
}
