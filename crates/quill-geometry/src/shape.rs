//! Shape helpers that append standard outlines to a path.
//!
//! Coordinates are given in user space; they are stored through the path's
//! scale and bias so interpreting the path gives back the same values. Each
//! helper appends atomically.

use crate::segment::{ArcDirection, ArcSize, Segment, SegmentOp};
use crate::{GeometryError, GeometryResult, Path};
use glam::Vec2;
use std::f32::consts::PI;

/// How [`arc`] finishes the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArcType {
    /// Just the arc.
    #[default]
    Open,
    /// The arc closed by a straight chord.
    Chord,
    /// The arc closed through the ellipse center.
    Pie,
}

fn require_positive(width: f32, height: f32) -> GeometryResult<()> {
    if width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(format!(
            "shape extents must be positive, got {}x{}",
            width, height
        )))
    }
}

fn append_user(path: &mut Path, segments: &[Segment]) -> GeometryResult<()> {
    let (scale, bias) = (path.scale(), path.bias());
    if scale == 1.0 && bias == 0.0 {
        return path.append_segments(segments);
    }
    let stored: Vec<Segment> = segments
        .iter()
        .map(|segment| Segment {
            op: segment.op.map_coords(|v| (v - bias) / scale),
            relativity: segment.relativity,
        })
        .collect();
    path.append_segments(&stored)
}

fn small_arc(radii: Vec2, to: Vec2, direction: ArcDirection) -> Segment {
    Segment::absolute(SegmentOp::ArcTo {
        radii,
        rotation: 0.0,
        to,
        size: ArcSize::Small,
        direction,
    })
}

/// Open two-point line.
pub fn line(path: &mut Path, from: Vec2, to: Vec2) -> GeometryResult<()> {
    append_user(
        path,
        &[
            Segment::absolute(SegmentOp::MoveTo(from)),
            Segment::absolute(SegmentOp::LineTo(to)),
        ],
    )
}

/// Polyline through `points`, optionally closed.
pub fn polygon(path: &mut Path, points: &[Vec2], closed: bool) -> GeometryResult<()> {
    let Some((first, rest)) = points.split_first() else {
        return Err(GeometryError::invalid("polygon needs at least one point"));
    };
    let mut segments = Vec::with_capacity(points.len() + 1);
    segments.push(Segment::absolute(SegmentOp::MoveTo(*first)));
    segments.extend(
        rest.iter()
            .map(|point| Segment::absolute(SegmentOp::LineTo(*point))),
    );
    if closed {
        segments.push(Segment::absolute(SegmentOp::Close));
    }
    append_user(path, &segments)
}

/// Axis-aligned rectangle with its corner at `origin`.
pub fn rect(path: &mut Path, origin: Vec2, size: Vec2) -> GeometryResult<()> {
    require_positive(size.x, size.y)?;
    append_user(
        path,
        &[
            Segment::absolute(SegmentOp::MoveTo(origin)),
            Segment::absolute(SegmentOp::HLineTo(origin.x + size.x)),
            Segment::absolute(SegmentOp::VLineTo(origin.y + size.y)),
            Segment::absolute(SegmentOp::HLineTo(origin.x)),
            Segment::absolute(SegmentOp::Close),
        ],
    )
}

/// Rectangle with elliptical corners. `arc_size` is the full corner ellipse
/// extent and is clamped to the rectangle size.
pub fn round_rect(path: &mut Path, origin: Vec2, size: Vec2, arc_size: Vec2) -> GeometryResult<()> {
    require_positive(size.x, size.y)?;
    let arc = arc_size.clamp(Vec2::ZERO, size);
    let r = arc * 0.5;
    let Vec2 { x, y } = origin;
    let Vec2 { x: w, y: h } = size;
    let ccw = ArcDirection::CounterClockwise;

    append_user(
        path,
        &[
            Segment::absolute(SegmentOp::MoveTo(Vec2::new(x + r.x, y))),
            Segment::absolute(SegmentOp::HLineTo(x + w - r.x)),
            small_arc(r, Vec2::new(x + w, y + r.y), ccw),
            Segment::absolute(SegmentOp::VLineTo(y + h - r.y)),
            small_arc(r, Vec2::new(x + w - r.x, y + h), ccw),
            Segment::absolute(SegmentOp::HLineTo(x + r.x)),
            small_arc(r, Vec2::new(x, y + h - r.y), ccw),
            Segment::absolute(SegmentOp::VLineTo(y + r.y)),
            small_arc(r, Vec2::new(x + r.x, y), ccw),
            Segment::absolute(SegmentOp::Close),
        ],
    )
}

/// Full ellipse of the given extent around `center`, as two half arcs.
pub fn ellipse(path: &mut Path, center: Vec2, size: Vec2) -> GeometryResult<()> {
    require_positive(size.x, size.y)?;
    let r = size * 0.5;
    let ccw = ArcDirection::CounterClockwise;
    append_user(
        path,
        &[
            Segment::absolute(SegmentOp::MoveTo(Vec2::new(center.x + r.x, center.y))),
            small_arc(r, Vec2::new(center.x - r.x, center.y), ccw),
            small_arc(r, Vec2::new(center.x + r.x, center.y), ccw),
            Segment::absolute(SegmentOp::Close),
        ],
    )
}

/// Elliptical arc around `center` starting at `start` degrees and sweeping
/// `extent` degrees (positive is counter-clockwise).
///
/// The sweep is split into half turns so every emitted arc is unambiguous.
pub fn arc(
    path: &mut Path,
    center: Vec2,
    size: Vec2,
    start: f32,
    extent: f32,
    arc_type: ArcType,
) -> GeometryResult<()> {
    require_positive(size.x, size.y)?;
    if !start.is_finite() || !extent.is_finite() {
        return Err(GeometryError::invalid("arc angles must be finite"));
    }
    let r = size * 0.5;
    let at = |angle: f32| center + Vec2::new(r.x * angle.cos(), r.y * angle.sin());

    let start = start.to_radians();
    let end = start + extent.to_radians();
    let (direction, step) = if extent >= 0.0 {
        (ArcDirection::CounterClockwise, PI)
    } else {
        (ArcDirection::Clockwise, -PI)
    };

    let mut segments = vec![Segment::absolute(SegmentOp::MoveTo(at(start)))];
    let mut angle = start + step;
    while (step > 0.0 && angle < end) || (step < 0.0 && angle > end) {
        segments.push(small_arc(r, at(angle), direction));
        angle += step;
    }
    segments.push(small_arc(r, at(end), direction));

    match arc_type {
        ArcType::Open => {}
        ArcType::Chord => segments.push(Segment::absolute(SegmentOp::Close)),
        ArcType::Pie => {
            segments.push(Segment::absolute(SegmentOp::LineTo(center)));
            segments.push(Segment::absolute(SegmentOp::Close));
        }
    }
    append_user(path, &segments)
}
