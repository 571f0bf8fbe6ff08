//! Elliptical arc math.
//!
//! An affine map sends an ellipse to another ellipse, generally with different
//! radii and a rotated major axis. The endpoint parameterization of an arc
//! (radii, rotation, flags) is therefore recomputed instead of mapping the raw
//! operands.

use crate::{ArcDirection, ArcSize, Transform2D};
use glam::{Mat2, Vec2};
use lyon::geom::{ArcFlags, SvgArc};
use lyon::math::{Angle, point, vector};

/// Endpoint-parameterized radii and axis rotation of an ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseAxes {
    pub radii: Vec2,
    /// Rotation of the x axis in degrees.
    pub rotation: f32,
    pub direction: ArcDirection,
}

/// Re-parameterize an arc ellipse under `matrix`.
///
/// The unit circle maps to the ellipse through `E = R(rotation) * diag(rx, ry)`.
/// After the transform the ellipse is `A * E`, whose shape matrix
/// `(A E)(A E)^T` has the squared radii as eigenvalues and the new axes as
/// eigenvectors. A mirroring matrix reverses the sweep direction.
pub fn transform_arc(
    radii: Vec2,
    rotation: f32,
    direction: ArcDirection,
    matrix: &Transform2D,
) -> EllipseAxes {
    let linear = matrix.linear();
    let ellipse = Mat2::from_angle(rotation.to_radians()) * Mat2::from_diagonal(radii.abs());
    let mapped = linear * ellipse;
    let shape = mapped * mapped.transpose();

    let a = shape.x_axis.x;
    let b = shape.x_axis.y;
    let c = shape.y_axis.y;

    let mid = (a + c) * 0.5;
    let spread = (((a - c) * 0.5).powi(2) + b * b).sqrt();
    let major = mid + spread;
    let minor = (mid - spread).max(0.0);
    let angle = 0.5 * (2.0 * b).atan2(a - c);

    let direction = if matrix.determinant() < 0.0 {
        direction.flipped()
    } else {
        direction
    };

    EllipseAxes {
        radii: Vec2::new(major.max(0.0).sqrt(), minor.sqrt()),
        rotation: angle.to_degrees(),
        direction,
    }
}

/// The lyon arc for an endpoint-parameterized segment starting at `from`.
///
/// Counter-clockwise is the positive angle direction, which lyon calls the
/// sweep flag.
pub fn svg_arc(
    from: Vec2,
    radii: Vec2,
    rotation: f32,
    to: Vec2,
    size: ArcSize,
    direction: ArcDirection,
) -> SvgArc<f32> {
    SvgArc {
        from: point(from.x, from.y),
        to: point(to.x, to.y),
        radii: vector(radii.x.abs(), radii.y.abs()),
        x_rotation: Angle::degrees(rotation),
        flags: ArcFlags {
            large_arc: size == ArcSize::Large,
            sweep: direction == ArcDirection::CounterClockwise,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_identity_keeps_axes() {
        let axes = transform_arc(
            Vec2::new(4.0, 2.0),
            30.0,
            ArcDirection::Clockwise,
            &Transform2D::IDENTITY,
        );
        assert!(approx(axes.radii.x, 4.0));
        assert!(approx(axes.radii.y, 2.0));
        assert!(approx(axes.rotation, 30.0));
        assert_eq!(axes.direction, ArcDirection::Clockwise);
    }

    #[test]
    fn test_non_uniform_scale_changes_radii() {
        let axes = transform_arc(
            Vec2::splat(1.0),
            0.0,
            ArcDirection::CounterClockwise,
            &Transform2D::scale_xy(Vec2::new(2.0, 1.0)),
        );
        assert!(approx(axes.radii.x, 2.0));
        assert!(approx(axes.radii.y, 1.0));
        assert!(approx(axes.rotation, 0.0));
    }

    #[test]
    fn test_rotation_rotates_axes() {
        let axes = transform_arc(
            Vec2::new(2.0, 1.0),
            0.0,
            ArcDirection::CounterClockwise,
            &Transform2D::rotate_degrees(90.0),
        );
        assert!(approx(axes.radii.x, 2.0));
        assert!(approx(axes.radii.y, 1.0));
        assert!(approx(axes.rotation.abs(), 90.0));
    }

    #[test]
    fn test_mirror_flips_direction() {
        let axes = transform_arc(
            Vec2::splat(3.0),
            0.0,
            ArcDirection::CounterClockwise,
            &Transform2D::scale_xy(Vec2::new(-1.0, 1.0)),
        );
        assert_eq!(axes.direction, ArcDirection::Clockwise);
        assert!(approx(axes.radii.x, 3.0));
    }

    #[test]
    fn test_mapped_arc_lies_on_mapped_ellipse() {
        // Quarter of a circle of radius 10 around the origin.
        let from = Vec2::new(10.0, 0.0);
        let to = Vec2::new(0.0, 10.0);
        let matrix = Transform2D::translate(Vec2::new(5.0, -3.0))
            * Transform2D::rotate_degrees(30.0)
            * Transform2D::scale_xy(Vec2::new(2.0, 0.5));
        let axes = transform_arc(
            Vec2::splat(10.0),
            0.0,
            ArcDirection::CounterClockwise,
            &matrix,
        );

        let arc = svg_arc(
            matrix.transform_point(from),
            axes.radii,
            axes.rotation,
            matrix.transform_point(to),
            ArcSize::Small,
            axes.direction,
        )
        .to_arc();
        let inverse = matrix.inverse().unwrap();
        for i in 0..=8 {
            let p = arc.sample(i as f32 / 8.0);
            let local = inverse.transform_point(Vec2::new(p.x, p.y));
            assert!((local.length() - 10.0).abs() < 1e-2, "{local:?}");
            assert!(local.x >= -1e-2 && local.y >= -1e-2, "{local:?}");
        }
    }
}
