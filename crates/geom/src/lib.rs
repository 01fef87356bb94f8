//! Geometry primitives used across trellis.
//!
//! All coordinates are integers in app space. Rectangles are stored as
//! min/max corners and are half-open: a point on the max edge is outside.

/// Per-edge padding.
mod insets;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;

pub use insets::Insets;
pub use point::Point;
pub use rect::Rect;
pub use size::Size;
