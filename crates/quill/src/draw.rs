//! Renderer-agnostic draw commands and the sink they are flushed to.
//!
//! Commands carry handles plus everything resolved at draw time (matrices,
//! clamped paints, surface-space geometry), so a renderer never has to read
//! the context's mutable state.

use crate::{FontHandle, ImageHandle, PaintHandle, PathHandle};
use quill_core::geometry::Rect;
use quill_geometry::{Color, FillRule, ResolvedPaint, ResolvedPath, StrokeAttributes, Transform2D};
use quill_text::GlyphQuad;
use std::sync::Arc;

/// Fill half of a path draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FillDraw {
    pub paint: PaintHandle,
    pub resolved: ResolvedPaint,
    /// Current fill-paint-to-user matrix.
    pub paint_transform: Transform2D,
    pub rule: FillRule,
}

/// Stroke half of a path draw.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDraw {
    pub paint: PaintHandle,
    pub resolved: ResolvedPaint,
    /// Current stroke-paint-to-user matrix.
    pub paint_transform: Transform2D,
    pub attributes: StrokeAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathDraw {
    pub path: PathHandle,
    /// Path generation the geometry was built from.
    pub generation: u64,
    /// Surface-space geometry, shared with the geometry cache.
    pub geometry: Arc<ResolvedPath>,
    /// Path-user-to-surface matrix the geometry was mapped with.
    pub transform: Transform2D,
    pub fill: Option<FillDraw>,
    pub stroke: Option<StrokeDraw>,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraw {
    pub image: ImageHandle,
    /// Image-user-to-surface matrix.
    pub transform: Transform2D,
    pub width: u32,
    pub height: u32,
}

/// A line of glyphs sampled from one atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub font: FontHandle,
    pub atlas: ImageHandle,
    /// Glyph-user-to-surface matrix. Quads are in glyph user space.
    pub transform: Transform2D,
    pub quads: Vec<GlyphQuad>,
    pub paint: PaintHandle,
    pub tint: ResolvedPaint,
    /// Pen advance of the whole run.
    pub advance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Path(PathDraw),
    Image(ImageDraw),
    Glyphs(GlyphRun),
    /// Fill a surface rectangle with the clear color, ignoring matrices.
    Clear { rect: Rect<u32>, color: Color },
}

impl DrawCommand {
    pub fn as_path(&self) -> Option<&PathDraw> {
        match self {
            DrawCommand::Path(draw) => Some(draw),
            _ => None,
        }
    }
}

/// Consumer of flushed draw commands, usually a GPU renderer.
///
/// Takes `&self` so one sink can be shared between contexts; implementations
/// needing state use interior mutability.
pub trait DrawSink: Send + Sync {
    /// Receive one frame's commands in submission order.
    fn submit(&self, commands: &[DrawCommand]);
}
