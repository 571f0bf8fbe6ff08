//! Per-mode matrix stacks.
//!
//! Each [`MatrixMode`] owns an independent stack whose top is the current
//! matrix for that mode. The bottom entry always exists, so a mode can be
//! queried at any time and popping the last entry is an underflow.

use crate::{GeometryError, GeometryResult, Transform2D};
use glam::Vec2;
use quill_core::profiling::profile_function;

/// Coordinate system a matrix maps between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixMode {
    #[default]
    PathUserToSurface,
    ImageUserToSurface,
    FillPaintToUser,
    StrokePaintToUser,
    GlyphUserToSurface,
}

impl MatrixMode {
    pub const ALL: [MatrixMode; 5] = [
        MatrixMode::PathUserToSurface,
        MatrixMode::ImageUserToSurface,
        MatrixMode::FillPaintToUser,
        MatrixMode::StrokePaintToUser,
        MatrixMode::GlyphUserToSurface,
    ];

    const fn index(self) -> usize {
        match self {
            MatrixMode::PathUserToSurface => 0,
            MatrixMode::ImageUserToSurface => 1,
            MatrixMode::FillPaintToUser => 2,
            MatrixMode::StrokePaintToUser => 3,
            MatrixMode::GlyphUserToSurface => 4,
        }
    }
}

/// Orthographic camera installed by [`TransformStack::push_camera`].
///
/// `near` and `far` are carried for renderers that need a depth range; the 2D
/// matrix only uses the horizontal and vertical extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoCamera {
    /// A camera whose origin is the top-left corner of a `width x height`
    /// surface with y pointing down.
    pub fn screen(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            right: width,
            bottom: height,
            top: 0.0,
            near: -1.0,
            far: 1.0,
        }
    }

    pub fn to_transform(&self) -> Option<Transform2D> {
        Transform2D::ortho(self.left, self.right, self.bottom, self.top)
    }
}

#[derive(Debug, Clone)]
pub struct TransformStack {
    mode: MatrixMode,
    stacks: [Vec<Transform2D>; 5],
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            mode: MatrixMode::default(),
            stacks: std::array::from_fn(|_| vec![Transform2D::IDENTITY]),
        }
    }

    /// Select the mode subsequent mutations apply to.
    pub fn set_mode(&mut self, mode: MatrixMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> MatrixMode {
        self.mode
    }

    /// Current matrix of any mode, independent of the selection.
    pub fn matrix(&self, mode: MatrixMode) -> Transform2D {
        self.stacks[mode.index()]
            .last()
            .copied()
            .unwrap_or(Transform2D::IDENTITY)
    }

    /// Current matrix of the selected mode.
    pub fn current(&self) -> Transform2D {
        self.matrix(self.mode)
    }

    /// Number of saved matrices above the base entry.
    pub fn depth(&self, mode: MatrixMode) -> usize {
        self.stacks[mode.index()].len().saturating_sub(1)
    }

    fn top_mut(&mut self) -> &mut Transform2D {
        let stack = &mut self.stacks[self.mode.index()];
        if stack.is_empty() {
            stack.push(Transform2D::IDENTITY);
        }
        let last = stack.len() - 1;
        &mut stack[last]
    }

    pub fn load_identity(&mut self) {
        *self.top_mut() = Transform2D::IDENTITY;
    }

    pub fn load_matrix(&mut self, matrix: Transform2D) {
        *self.top_mut() = matrix;
    }

    /// `current = current * matrix`
    pub fn multiply(&mut self, matrix: Transform2D) {
        *self.top_mut() *= matrix;
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.multiply(Transform2D::translate(Vec2::new(tx, ty)));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.multiply(Transform2D::scale_xy(Vec2::new(sx, sy)));
    }

    /// Counter-clockwise rotation in degrees.
    pub fn rotate(&mut self, degrees: f32) {
        self.multiply(Transform2D::rotate_degrees(degrees));
    }

    /// Save the current matrix of the selected mode.
    ///
    /// With a camera, its orthographic projection replaces the current
    /// matrix after the save. A camera with a zero-width or zero-height extent
    /// is rejected before anything is pushed.
    pub fn push_camera(&mut self, camera: Option<OrthoCamera>) -> GeometryResult<()> {
        profile_function!();
        let projection = match camera {
            Some(camera) => Some(camera.to_transform().ok_or_else(|| {
                GeometryError::invalid(format!("degenerate camera extents {:?}", camera))
            })?),
            None => None,
        };

        let current = self.current();
        self.stacks[self.mode.index()].push(current);
        if let Some(projection) = projection {
            *self.top_mut() = projection;
        }
        tracing::trace!(mode = ?self.mode, depth = self.depth(self.mode), "push camera");
        Ok(())
    }

    /// Restore the matrix saved by the matching [`push_camera`](Self::push_camera).
    pub fn pop_camera(&mut self) -> GeometryResult<()> {
        profile_function!();
        let stack = &mut self.stacks[self.mode.index()];
        if stack.len() <= 1 {
            return Err(GeometryError::StateUnderflow(self.mode));
        }
        stack.pop();
        tracing::trace!(mode = ?self.mode, depth = self.depth(self.mode), "pop camera");
        Ok(())
    }
}
