//! Quill - an immediate-mode 2D vector graphics state machine
//!
//! A [`Context`] holds paths, paints, images and bitmap fonts behind
//! generational handles, a matrix stack per coordinate mode, and the current
//! paint bindings. Draw calls combine that state into renderer-agnostic
//! [`DrawCommand`]s which are flushed to a [`DrawSink`].
//!
//! ## Quick Start
//!
//! ```rust
//! use quill::prelude::*;
//!
//! let mut ctx = Context::new(&ContextDescriptor::new().with_surface_size(640, 480));
//!
//! // A 100x50 rectangle in user space.
//! let path = ctx.create_path(&PathDescriptor::default())?;
//! shape::rect(ctx.path_mut(path)?, Vec2::new(10.0, 10.0), Vec2::new(100.0, 50.0))?;
//!
//! let paint = ctx.create_paint();
//! ctx.set_paint_color(paint, Color::RED)?;
//! ctx.set_paint(paint, PaintModes::FILL)?;
//!
//! ctx.push_screen_camera()?;
//! ctx.draw_path(path, PaintModes::FILL)?;
//! ctx.pop_camera()?;
//!
//! assert_eq!(ctx.take_commands().len(), 1);
//! # Ok::<(), quill::VgError>(())
//! ```
//!
//! ## Features
//!
//! - `mock`: enables [`mock::RecordingSink`] for asserting on flushed frames.

mod cache;
mod config;
mod context;
mod draw;
mod error;
mod handle;
mod image;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use cache::CacheStats;
pub use config::ContextDescriptor;
pub use context::{Context, Font, PaintModes};
pub use draw::*;
pub use error::{HandleKind, VgError, VgResult};
pub use handle::*;
pub use image::Image;

pub use quill_geometry::{
    self as geometry, ArcType, Color, FillRule, GradientStop, LineCap, LineJoin, MatrixMode,
    OrthoCamera, PaintParameter, PaintType, PathCapabilities, PathDescriptor, SpreadMode,
    StrokeAttributes, Transform2D, shape,
};
pub use quill_text::{self as text, BitmapFont, GlyphQuad, ParseError};

/// Common imports for drawing with a [`Context`].
pub mod prelude {
    pub use crate::{
        Color, Context, ContextDescriptor, DrawCommand, FillRule, MatrixMode, PaintModes,
        PaintParameter, PathDescriptor, StrokeAttributes, Transform2D, VgError, VgResult, shape,
    };
    pub use glam::Vec2;
}
