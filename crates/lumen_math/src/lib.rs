//! Lumen Math - vector algebra for the Lumen ray tracer.
//!
//! Points, vectors, colors and rays in double precision. Storage is
//! `glam::DVec3`; the wrapper types add the invariants the renderer
//! relies on (a `Vector` is never zero, a `Color` is never negative,
//! a `Ray` direction is always unit length).

use thiserror::Error;

mod coefficient;
mod color;
mod interval;
mod point;
mod ray;
mod util;
mod vector;

pub use coefficient::Coefficient;
pub use color::Color;
pub use interval::Interval;
pub use point::Point;
pub use ray::Ray;
pub use util::{align_zero, is_zero, EPSILON};
pub use vector::Vector;

// Re-export glam's double precision vector for geometry internals
pub use glam::DVec3;

/// Errors raised when constructing math values from invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("zero vector is not a valid direction")]
    ZeroVector,

    #[error("vector components must be finite")]
    NonFiniteVector,

    #[error("color components must be non-negative, got ({r}, {g}, {b})")]
    NegativeColor { r: f64, g: f64, b: f64 },
}
