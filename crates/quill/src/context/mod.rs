//! The rendering context.
//!
//! A [`Context`] owns every path, paint, image and font it creates, the
//! per-mode matrix stacks, the current paint bindings and stroke state, and
//! the queue of draw commands produced since the last flush. It is a plain
//! owned value: all mutation goes through `&mut self`.

mod drawing;
mod paints;
mod paths;
mod resources;

pub use paints::PaintModes;
pub use resources::Font;

use crate::cache::{CacheStats, GeometryCache};
use crate::draw::DrawCommand;
use crate::{ContextDescriptor, Image, PaintHandle, VgResult};
use quill_core::alloc::SparseSet;
use quill_geometry::{
    Color, FillRule, MatrixMode, OrthoCamera, Paint, Path, StrokeAttributes, Transform2D,
    TransformStack,
};

pub struct Context {
    name: Option<String>,
    surface_size: (u32, u32),

    paths: SparseSet<Path>,
    paints: SparseSet<Paint>,
    images: SparseSet<Image>,
    fonts: SparseSet<Font>,

    transforms: TransformStack,
    fill_paint: Option<PaintHandle>,
    stroke_paint: Option<PaintHandle>,
    stroke: StrokeAttributes,
    fill_rule: FillRule,
    clear_color: Color,

    pub(crate) cache: GeometryCache,
    pub(crate) commands: Vec<DrawCommand>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(&ContextDescriptor::default())
    }
}

impl Context {
    pub fn new(descriptor: &ContextDescriptor) -> Self {
        tracing::debug!(
            name = descriptor.name.as_deref().unwrap_or("<unnamed>"),
            width = descriptor.surface_size.0,
            height = descriptor.surface_size.1,
            "creating context"
        );
        Self {
            name: descriptor.name.clone(),
            surface_size: descriptor.surface_size,
            paths: SparseSet::new(),
            paints: SparseSet::new(),
            images: SparseSet::new(),
            fonts: SparseSet::new(),
            transforms: TransformStack::new(),
            fill_paint: None,
            stroke_paint: None,
            stroke: StrokeAttributes::default().with_width(descriptor.stroke_width),
            fill_rule: descriptor.fill_rule,
            clear_color: descriptor.clear_color,
            cache: GeometryCache::new(descriptor.geometry_cache_capacity),
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    /// Change the surface size. Matrices are left alone; reinstall a camera
    /// if it depended on the old size.
    pub fn resize(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "resizing surface");
        self.surface_size = (width, height);
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ====================
    // Matrix stacks
    // ====================

    pub fn transform_stack(&self) -> &TransformStack {
        &self.transforms
    }

    pub fn set_matrix_mode(&mut self, mode: MatrixMode) {
        self.transforms.set_mode(mode);
    }

    pub fn matrix_mode(&self) -> MatrixMode {
        self.transforms.mode()
    }

    /// Current matrix of `mode`, regardless of the selected mode.
    pub fn matrix(&self, mode: MatrixMode) -> Transform2D {
        self.transforms.matrix(mode)
    }

    pub fn load_identity(&mut self) {
        self.transforms.load_identity();
    }

    pub fn load_matrix(&mut self, matrix: Transform2D) {
        self.transforms.load_matrix(matrix);
    }

    pub fn mult_matrix(&mut self, matrix: Transform2D) {
        self.transforms.multiply(matrix);
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.transforms.translate(tx, ty);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.transforms.scale(sx, sy);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.transforms.rotate(degrees);
    }

    pub fn push_camera(&mut self, camera: Option<OrthoCamera>) -> VgResult<()> {
        Ok(self.transforms.push_camera(camera)?)
    }

    /// Push a camera covering the whole surface with y pointing down.
    pub fn push_screen_camera(&mut self) -> VgResult<()> {
        let (width, height) = self.surface_size;
        self.push_camera(Some(OrthoCamera::screen(width as f32, height as f32)))
    }

    pub fn pop_camera(&mut self) -> VgResult<()> {
        Ok(self.transforms.pop_camera()?)
    }

    // ====================
    // Stroke and fill state
    // ====================

    pub fn stroke(&self) -> &StrokeAttributes {
        &self.stroke
    }

    pub fn set_stroke(&mut self, stroke: StrokeAttributes) {
        self.stroke = stroke;
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke.width = width;
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.fill_rule = rule;
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Stored as given; clamped when a clear command is built.
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }
}
