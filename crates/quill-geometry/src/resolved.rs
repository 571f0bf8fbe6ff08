//! Absolute path geometry.
//!
//! A [`ResolvedPath`] is what interpreting a [`Path`](crate::Path) produces:
//! scale and bias applied, relative operands resolved against the current
//! point, smooth curves expanded to explicit control points and every
//! sub-path opened with an explicit move.

use crate::arc::{svg_arc, transform_arc};
use crate::{ArcDirection, ArcSize, Segment, SegmentOp, Transform2D};
use glam::Vec2;
use lyon::geom::CubicBezierSegment;
use lyon::math::point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo {
        control: Vec2,
        to: Vec2,
    },
    CubicTo {
        control1: Vec2,
        control2: Vec2,
        to: Vec2,
    },
    ArcTo {
        radii: Vec2,
        /// Degrees.
        rotation: f32,
        to: Vec2,
        size: ArcSize,
        direction: ArcDirection,
    },
    Close,
}

impl ResolvedSegment {
    fn end_point(&self) -> Option<Vec2> {
        match *self {
            ResolvedSegment::MoveTo(to)
            | ResolvedSegment::LineTo(to)
            | ResolvedSegment::QuadTo { to, .. }
            | ResolvedSegment::CubicTo { to, .. }
            | ResolvedSegment::ArcTo { to, .. } => Some(to),
            ResolvedSegment::Close => None,
        }
    }

    /// Every control point, in segment order. Arcs contribute their end point.
    pub fn control_points(&self) -> impl Iterator<Item = Vec2> {
        let points: [Option<Vec2>; 3] = match *self {
            ResolvedSegment::MoveTo(to)
            | ResolvedSegment::LineTo(to)
            | ResolvedSegment::ArcTo { to, .. } => [Some(to), None, None],
            ResolvedSegment::QuadTo { control, to } => [Some(control), Some(to), None],
            ResolvedSegment::CubicTo {
                control1,
                control2,
                to,
            } => [Some(control1), Some(control2), Some(to)],
            ResolvedSegment::Close => [None, None, None],
        };
        points.into_iter().flatten()
    }

    /// Express as an absolute stored segment.
    pub fn to_segment(&self) -> Segment {
        let op = match *self {
            ResolvedSegment::MoveTo(to) => SegmentOp::MoveTo(to),
            ResolvedSegment::LineTo(to) => SegmentOp::LineTo(to),
            ResolvedSegment::QuadTo { control, to } => SegmentOp::QuadTo { control, to },
            ResolvedSegment::CubicTo {
                control1,
                control2,
                to,
            } => SegmentOp::CubicTo {
                control1,
                control2,
                to,
            },
            ResolvedSegment::ArcTo {
                radii,
                rotation,
                to,
                size,
                direction,
            } => SegmentOp::ArcTo {
                radii,
                rotation,
                to,
                size,
                direction,
            },
            ResolvedSegment::Close => SegmentOp::Close,
        };
        Segment::absolute(op)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPath {
    segments: Vec<ResolvedSegment>,
}

impl ResolvedPath {
    pub fn from_segments(segments: Vec<ResolvedSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[ResolvedSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Map every control point through `matrix`; arcs are re-parameterized.
    pub fn transformed(&self, matrix: &Transform2D) -> ResolvedPath {
        let segments = self
            .segments
            .iter()
            .map(|segment| match *segment {
                ResolvedSegment::MoveTo(to) => ResolvedSegment::MoveTo(matrix.transform_point(to)),
                ResolvedSegment::LineTo(to) => ResolvedSegment::LineTo(matrix.transform_point(to)),
                ResolvedSegment::QuadTo { control, to } => ResolvedSegment::QuadTo {
                    control: matrix.transform_point(control),
                    to: matrix.transform_point(to),
                },
                ResolvedSegment::CubicTo {
                    control1,
                    control2,
                    to,
                } => ResolvedSegment::CubicTo {
                    control1: matrix.transform_point(control1),
                    control2: matrix.transform_point(control2),
                    to: matrix.transform_point(to),
                },
                ResolvedSegment::ArcTo {
                    radii,
                    rotation,
                    to,
                    size,
                    direction,
                } => {
                    let axes = transform_arc(radii, rotation, direction, matrix);
                    ResolvedSegment::ArcTo {
                        radii: axes.radii,
                        rotation: axes.rotation,
                        to: matrix.transform_point(to),
                        size,
                        direction: axes.direction,
                    }
                }
                ResolvedSegment::Close => ResolvedSegment::Close,
            })
            .collect();
        ResolvedPath { segments }
    }

    /// Conservative axis-aligned bounds as `(min, max)`.
    ///
    /// Curves contribute their control points, arcs the control points of
    /// their cubic approximation. `None` for a path without geometry.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut include = |p: Vec2| {
            min = min.min(p);
            max = max.max(p);
        };

        let mut current = Vec2::ZERO;
        let mut start = Vec2::ZERO;
        for segment in &self.segments {
            match *segment {
                ResolvedSegment::ArcTo {
                    radii,
                    rotation,
                    to,
                    size,
                    direction,
                } => {
                    let arc = svg_arc(current, radii, rotation, to, size, direction);
                    include(current);
                    include(to);
                    if !arc.is_straight_line() {
                        arc.for_each_cubic_bezier(&mut |cubic: &CubicBezierSegment<f32>| {
                            include(Vec2::new(cubic.ctrl1.x, cubic.ctrl1.y));
                            include(Vec2::new(cubic.ctrl2.x, cubic.ctrl2.y));
                        });
                    }
                }
                ResolvedSegment::MoveTo(to) => {
                    start = to;
                    include(to);
                }
                ResolvedSegment::Close => current = start,
                _ => segment.control_points().for_each(&mut include),
            }
            if let Some(end) = segment.end_point() {
                current = end;
            }
        }

        (min.is_finite() && max.is_finite()).then_some((min, max))
    }

    /// Build a lyon path ready for fill or stroke tessellation.
    ///
    /// Arcs are approximated with cubic béziers.
    pub fn to_lyon_path(&self) -> lyon::path::Path {
        let mut builder = lyon::path::Path::builder();
        let mut open = false;
        let mut current = Vec2::ZERO;
        let mut start = Vec2::ZERO;

        for segment in &self.segments {
            match *segment {
                ResolvedSegment::MoveTo(to) => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(point(to.x, to.y));
                    open = true;
                    start = to;
                }
                ResolvedSegment::LineTo(to) => {
                    builder.line_to(point(to.x, to.y));
                }
                ResolvedSegment::QuadTo { control, to } => {
                    builder.quadratic_bezier_to(point(control.x, control.y), point(to.x, to.y));
                }
                ResolvedSegment::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    builder.cubic_bezier_to(
                        point(control1.x, control1.y),
                        point(control2.x, control2.y),
                        point(to.x, to.y),
                    );
                }
                ResolvedSegment::ArcTo {
                    radii,
                    rotation,
                    to,
                    size,
                    direction,
                } => {
                    let arc = svg_arc(current, radii, rotation, to, size, direction);
                    if arc.is_straight_line() {
                        builder.line_to(point(to.x, to.y));
                    } else {
                        arc.for_each_cubic_bezier(&mut |cubic: &CubicBezierSegment<f32>| {
                            builder.cubic_bezier_to(cubic.ctrl1, cubic.ctrl2, cubic.to);
                        });
                    }
                }
                ResolvedSegment::Close => {
                    if open {
                        builder.end(true);
                        open = false;
                    }
                    current = start;
                }
            }
            if let Some(end) = segment.end_point() {
                current = end;
            }
        }

        if open {
            builder.end(false);
        }
        builder.build()
    }
}
