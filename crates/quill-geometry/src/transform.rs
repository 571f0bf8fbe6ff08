//! 2D affine transformations.
//!
//! Only affine maps are representable: the implied last row of the 3x3
//! matrix is always `[0, 0, 1]`.

use glam::{Affine2, Mat2, Vec2};

/// A 2D affine transformation matrix.
///
/// Multiplication follows matrix order: `a * b` applies `b` first, then `a`.
/// Right-multiplying the current matrix by an operation therefore applies the
/// operation in the local frame of everything drawn afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    affine: Affine2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// Identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        affine: Affine2::IDENTITY,
    };

    pub fn from_affine(affine: Affine2) -> Self {
        Self { affine }
    }

    /// Build from the six free entries in column order
    /// `[sx, shy, shx, sy, tx, ty]`.
    pub fn from_cols_array(m: &[f32; 6]) -> Self {
        Self {
            affine: Affine2::from_cols_array(m),
        }
    }

    /// The six free entries in column order `[sx, shy, shx, sy, tx, ty]`.
    pub fn to_cols_array(&self) -> [f32; 6] {
        self.affine.to_cols_array()
    }

    /// Row-major 3x3 form, last row `[0, 0, 1]`.
    pub fn to_rows(&self) -> [[f32; 3]; 3] {
        let [sx, shy, shx, sy, tx, ty] = self.to_cols_array();
        [[sx, shx, tx], [shy, sy, ty], [0.0, 0.0, 1.0]]
    }

    /// Create a translation transform.
    pub fn translate(offset: Vec2) -> Self {
        Self {
            affine: Affine2::from_translation(offset),
        }
    }

    /// Create a non-uniform scale transform.
    pub fn scale_xy(scale: Vec2) -> Self {
        Self {
            affine: Affine2::from_scale(scale),
        }
    }

    /// Create a counter-clockwise rotation (angle in degrees).
    pub fn rotate_degrees(degrees: f32) -> Self {
        Self {
            affine: Affine2::from_angle(degrees.to_radians()),
        }
    }

    /// Orthographic projection mapping `[left, right] x [bottom, top]` onto
    /// `[-1, 1] x [-1, 1]`.
    ///
    /// Returns `None` when either extent is zero or not finite.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32) -> Option<Self> {
        let width = right - left;
        let height = top - bottom;
        if width == 0.0 || height == 0.0 || !width.is_finite() || !height.is_finite() {
            return None;
        }
        Some(Self::from_cols_array(&[
            2.0 / width,
            0.0,
            0.0,
            2.0 / height,
            -(right + left) / width,
            -(top + bottom) / height,
        ]))
    }

    /// Transform a point.
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.affine.transform_point2(point)
    }

    /// Transform a vector (ignores translation).
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        self.affine.transform_vector2(vector)
    }

    /// The linear (non-translating) part.
    pub fn linear(&self) -> Mat2 {
        self.affine.matrix2
    }

    pub fn determinant(&self) -> f32 {
        self.affine.matrix2.determinant()
    }

    /// Get the inverse transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        if self.determinant().abs() < f32::EPSILON {
            None
        } else {
            Some(Self {
                affine: self.affine.inverse(),
            })
        }
    }

    pub fn is_identity(&self) -> bool {
        self.affine == Affine2::IDENTITY
    }

    pub fn as_affine(&self) -> &Affine2 {
        &self.affine
    }

    /// Get the translation component.
    pub fn translation(&self) -> Vec2 {
        self.affine.translation
    }
}

impl std::ops::Mul<Transform2D> for Transform2D {
    type Output = Transform2D;

    fn mul(self, rhs: Transform2D) -> Transform2D {
        Transform2D {
            affine: self.affine * rhs.affine,
        }
    }
}

impl std::ops::MulAssign<Transform2D> for Transform2D {
    fn mul_assign(&mut self, rhs: Transform2D) {
        self.affine = self.affine * rhs.affine;
    }
}

impl std::ops::Mul<Vec2> for Transform2D {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        self.transform_point(rhs)
    }
}
