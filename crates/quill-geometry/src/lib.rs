//! Quill Geometry - path, transform and paint state
//!
//! This crate provides:
//! - The segment codec between the tag/operand wire encoding and typed segments
//! - Paths with capability checks, generation counters and interpretation into
//!   absolute geometry (with lyon conversion for tessellators)
//! - Arc re-parameterization under affine maps
//! - Per-mode matrix stacks with camera push/pop
//! - Paints (solid, linear and radial gradients) and stroke/fill attributes
//! - Shape helpers (lines, polygons, rectangles, ellipses, arcs)
//!
//! # Example
//!
//! ```
//! use quill_geometry::*;
//! use glam::Vec2;
//!
//! let mut path = Path::default();
//! // move 0,0; relative line +10,0; close
//! path.append(&[2, 5, 0], &[0.0, 0.0, 10.0, 0.0]).unwrap();
//!
//! let mut stack = TransformStack::new();
//! stack.translate(5.0, 5.0);
//!
//! let mut moved = Path::default();
//! moved.transform_from(&path, &stack.current()).unwrap();
//! assert_eq!(moved.bounds(), Some((Vec2::new(5.0, 5.0), Vec2::new(15.0, 5.0))));
//! ```

// Core primitives
pub mod arc;
mod error;
mod path;
mod resolved;
pub mod segment;
mod transform;
mod transform_stack;

// Styling
mod color;
mod fill;
mod paint;
mod stroke;

// Utilities
pub mod shape;

pub use error::{GeometryError, GeometryResult};
pub use path::*;
pub use resolved::*;
pub use segment::{
    ArcDirection, ArcSize, Relativity, Segment, SegmentCommand, SegmentDecoder, SegmentOp,
};
pub use transform::*;
pub use transform_stack::*;

pub use color::*;
pub use fill::*;
pub use paint::*;
pub use stroke::*;

pub use shape::ArcType;
