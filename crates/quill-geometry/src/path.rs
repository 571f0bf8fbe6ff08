//! Path store.
//!
//! A [`Path`] owns an ordered list of [`Segment`]s plus the format metadata
//! fixed at creation. Every successful mutation bumps the path generation so
//! derived geometry can be cached per `(path, generation)`.

use crate::error::try_reserve;
use crate::resolved::{ResolvedPath, ResolvedSegment};
use crate::segment::{SegmentDecoder, SegmentOp};
use crate::{GeometryError, GeometryResult, Segment, Transform2D};
use glam::Vec2;
use quill_core::profiling::profile_function;

/// Format identifier of the standard segment encoding.
pub const PATH_FORMAT_STANDARD: i32 = 0;

/// Storage type of path operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathDatatype {
    #[default]
    F32,
}

/// Which mutations a path accepts after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathCapabilities {
    /// Segments may only be appended (directly or as a transform target).
    AppendOnly,
    /// Segments may also be cleared and have their operands rewritten.
    #[default]
    Editable,
}

impl PathCapabilities {
    fn require_editable(self, operation: &str) -> GeometryResult<()> {
        match self {
            PathCapabilities::Editable => Ok(()),
            PathCapabilities::AppendOnly => Err(GeometryError::invalid(format!(
                "{} is not permitted on an append-only path",
                operation
            ))),
        }
    }
}

/// Creation parameters for a [`Path`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathDescriptor {
    pub format: i32,
    pub datatype: PathDatatype,
    /// Every coordinate is interpreted as `value * scale + bias`.
    pub scale: f32,
    pub bias: f32,
    pub capabilities: PathCapabilities,
    /// Segments to reserve up front.
    pub segment_capacity: usize,
}

impl Default for PathDescriptor {
    fn default() -> Self {
        Self {
            format: PATH_FORMAT_STANDARD,
            datatype: PathDatatype::F32,
            scale: 1.0,
            bias: 0.0,
            capabilities: PathCapabilities::Editable,
            segment_capacity: 0,
        }
    }
}

impl PathDescriptor {
    pub fn append_only() -> Self {
        Self::default().with_capabilities(PathCapabilities::AppendOnly)
    }

    pub fn with_capabilities(mut self, capabilities: PathCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_scale_bias(mut self, scale: f32, bias: f32) -> Self {
        self.scale = scale;
        self.bias = bias;
        self
    }

    pub fn with_segment_capacity(mut self, capacity: usize) -> Self {
        self.segment_capacity = capacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    format: i32,
    datatype: PathDatatype,
    scale: f32,
    bias: f32,
    capabilities: PathCapabilities,
    segments: Vec<Segment>,
    generation: u64,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            format: PATH_FORMAT_STANDARD,
            datatype: PathDatatype::F32,
            scale: 1.0,
            bias: 0.0,
            capabilities: PathCapabilities::Editable,
            segments: Vec::new(),
            generation: 0,
        }
    }
}

impl Path {
    /// Create an empty path.
    ///
    /// Fails when the format is unknown or the scale is zero or not finite.
    pub fn new(descriptor: &PathDescriptor) -> GeometryResult<Self> {
        if descriptor.format != PATH_FORMAT_STANDARD {
            return Err(GeometryError::invalid(format!(
                "unsupported path format {}",
                descriptor.format
            )));
        }
        if descriptor.scale == 0.0 || !descriptor.scale.is_finite() || !descriptor.bias.is_finite()
        {
            return Err(GeometryError::invalid(format!(
                "path scale {} / bias {} cannot be used",
                descriptor.scale, descriptor.bias
            )));
        }

        let mut segments = Vec::new();
        try_reserve(&mut segments, descriptor.segment_capacity)?;
        Ok(Self {
            format: descriptor.format,
            datatype: descriptor.datatype,
            scale: descriptor.scale,
            bias: descriptor.bias,
            capabilities: descriptor.capabilities,
            segments,
            generation: 0,
        })
    }

    pub fn format(&self) -> i32 {
        self.format
    }

    pub fn datatype(&self) -> PathDatatype {
        self.datatype
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn capabilities(&self) -> PathCapabilities {
        self.capabilities
    }

    /// Incremented by every successful mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of operands stored.
    pub fn operand_count(&self) -> usize {
        self.segments.iter().map(Segment::arity).sum()
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Decode and append a tag/operand stream.
    ///
    /// The path is left untouched unless the whole stream decodes.
    pub fn append(&mut self, tags: &[u8], operands: &[f32]) -> GeometryResult<()> {
        profile_function!();
        let mut decoder = SegmentDecoder::new(tags, operands);
        let mut staged = Vec::new();
        try_reserve(&mut staged, tags.len())?;
        for segment in decoder.by_ref() {
            staged.push(segment?);
        }
        decoder.finish()?;
        self.append_segments(&staged)
    }

    /// Append already decoded segments.
    pub fn append_segments(&mut self, segments: &[Segment]) -> GeometryResult<()> {
        if segments.is_empty() {
            return Ok(());
        }
        try_reserve(&mut self.segments, segments.len())?;
        self.segments.extend_from_slice(segments);
        self.bump();
        Ok(())
    }

    /// Remove every segment. Capabilities are kept.
    pub fn clear(&mut self) -> GeometryResult<()> {
        self.capabilities.require_editable("clear")?;
        self.segments.clear();
        self.bump();
        Ok(())
    }

    /// Overwrite the operands of `count` segments starting at `start`.
    ///
    /// Commands and relativity flags stay as they are; `operands` must hold
    /// exactly the operands those commands consume.
    pub fn modify_operands(
        &mut self,
        start: usize,
        count: usize,
        operands: &[f32],
    ) -> GeometryResult<()> {
        self.capabilities.require_editable("modifying operands")?;
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.segments.len())
            .ok_or_else(|| {
                GeometryError::invalid(format!(
                    "segment range {}..{} exceeds path length {}",
                    start,
                    start.saturating_add(count),
                    self.segments.len()
                ))
            })?;

        let tags: Vec<u8> = self.segments[start..end].iter().map(Segment::tag).collect();
        let mut decoder = SegmentDecoder::new(&tags, operands);
        let mut staged = Vec::with_capacity(count);
        for segment in decoder.by_ref() {
            staged.push(segment?);
        }
        decoder.finish()?;

        self.segments[start..end].copy_from_slice(&staged);
        self.bump();
        Ok(())
    }

    /// Append `source` mapped through `matrix` as absolute segments.
    ///
    /// Operands are stored so that interpreting this path with its own scale
    /// and bias reproduces the mapped coordinates.
    pub fn append_transformed(
        &mut self,
        source: &ResolvedPath,
        matrix: &Transform2D,
    ) -> GeometryResult<()> {
        profile_function!();
        let (scale, bias) = (self.scale, self.bias);
        let mapped: Vec<Segment> = source
            .transformed(matrix)
            .segments()
            .iter()
            .map(|segment| {
                let mut segment = segment.to_segment();
                segment.op = segment.op.map_coords(|v| (v - bias) / scale);
                segment
            })
            .collect();
        self.append_segments(&mapped)
    }

    /// Append the segments of `source` mapped through `matrix`.
    pub fn transform_from(&mut self, source: &Path, matrix: &Transform2D) -> GeometryResult<()> {
        let resolved = source.resolve();
        self.append_transformed(&resolved, matrix)
    }

    /// Conservative bounds of the interpreted geometry.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        self.resolve().bounds()
    }

    /// Interpret the segments into absolute geometry.
    pub fn resolve(&self) -> ResolvedPath {
        profile_function!();
        let mut resolver = Resolver::new(self.segments.len());
        let (scale, bias) = (self.scale, self.bias);
        for segment in &self.segments {
            let op = if scale == 1.0 && bias == 0.0 {
                segment.op
            } else {
                segment.op.map_coords(|v| v * scale + bias)
            };
            resolver.push(op, segment.relativity == crate::Relativity::Relative);
        }
        ResolvedPath::from_segments(resolver.out)
    }
}

/// Interpretation state: current point, sub-path start and the last curve
/// control points used for smooth reflections.
struct Resolver {
    out: Vec<ResolvedSegment>,
    current: Vec2,
    start: Vec2,
    last_quad_control: Option<Vec2>,
    last_cubic_control: Option<Vec2>,
    needs_move: bool,
}

impl Resolver {
    fn new(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity + 1),
            current: Vec2::ZERO,
            start: Vec2::ZERO,
            last_quad_control: None,
            last_cubic_control: None,
            needs_move: true,
        }
    }

    fn open_subpath(&mut self) {
        if self.needs_move {
            self.out.push(ResolvedSegment::MoveTo(self.current));
            self.start = self.current;
            self.needs_move = false;
        }
    }

    fn push(&mut self, op: SegmentOp, relative: bool) {
        let base = if relative { self.current } else { Vec2::ZERO };
        let abs = |p: Vec2| p + base;

        let mut quad_control = None;
        let mut cubic_control = None;

        match op {
            SegmentOp::Close => {
                if !self.needs_move {
                    self.out.push(ResolvedSegment::Close);
                    self.current = self.start;
                    self.needs_move = true;
                }
            }
            SegmentOp::MoveTo(to) => {
                let to = abs(to);
                self.out.push(ResolvedSegment::MoveTo(to));
                self.current = to;
                self.start = to;
                self.needs_move = false;
            }
            SegmentOp::LineTo(to) => self.line_to(abs(to)),
            SegmentOp::HLineTo(x) => {
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Vec2::new(x, self.current.y));
            }
            SegmentOp::VLineTo(y) => {
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Vec2::new(self.current.x, y));
            }
            SegmentOp::QuadTo { control, to } => {
                let control = abs(control);
                self.curve(ResolvedSegment::QuadTo {
                    control,
                    to: abs(to),
                });
                quad_control = Some(control);
            }
            SegmentOp::SQuadTo(to) => {
                let control = self.reflect(self.last_quad_control);
                self.curve(ResolvedSegment::QuadTo {
                    control,
                    to: abs(to),
                });
                quad_control = Some(control);
            }
            SegmentOp::CubicTo {
                control1,
                control2,
                to,
            } => {
                let control2 = abs(control2);
                self.curve(ResolvedSegment::CubicTo {
                    control1: abs(control1),
                    control2,
                    to: abs(to),
                });
                cubic_control = Some(control2);
            }
            SegmentOp::SCubicTo { control2, to } => {
                let control1 = self.reflect(self.last_cubic_control);
                let control2 = abs(control2);
                self.curve(ResolvedSegment::CubicTo {
                    control1,
                    control2,
                    to: abs(to),
                });
                cubic_control = Some(control2);
            }
            SegmentOp::ArcTo {
                radii,
                rotation,
                to,
                size,
                direction,
            } => {
                self.curve(ResolvedSegment::ArcTo {
                    radii: radii.abs(),
                    rotation,
                    to: abs(to),
                    size,
                    direction,
                });
            }
        }

        self.last_quad_control = quad_control;
        self.last_cubic_control = cubic_control;
    }

    /// Reflect the previous control point about the current point, or use the
    /// current point when the previous segment was not of the same family.
    fn reflect(&self, previous: Option<Vec2>) -> Vec2 {
        previous
            .map(|control| self.current * 2.0 - control)
            .unwrap_or(self.current)
    }

    fn line_to(&mut self, to: Vec2) {
        self.curve(ResolvedSegment::LineTo(to));
    }

    fn curve(&mut self, segment: ResolvedSegment) {
        self.open_subpath();
        if let ResolvedSegment::LineTo(to)
        | ResolvedSegment::QuadTo { to, .. }
        | ResolvedSegment::CubicTo { to, .. }
        | ResolvedSegment::ArcTo { to, .. } = segment
        {
            self.current = to;
        }
        self.out.push(segment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::encode;

    fn path_from(tags: &[u8], operands: &[f32]) -> Path {
        let mut path = Path::default();
        path.append(tags, operands).unwrap();
        path
    }

    #[test]
    fn test_implicit_move_at_origin() {
        let path = path_from(&[4], &[5.0, 5.0]);
        assert_eq!(
            path.resolve().segments(),
            &[
                ResolvedSegment::MoveTo(Vec2::ZERO),
                ResolvedSegment::LineTo(Vec2::new(5.0, 5.0)),
            ]
        );
    }

    #[test]
    fn test_relative_resolves_against_current_point() {
        // move 10,10; rel line +5,0; rel hline +5; rel vline +5
        let path = path_from(&[2, 5, 7, 9], &[10.0, 10.0, 5.0, 0.0, 5.0, 5.0]);
        let resolved = path.resolve();
        assert_eq!(
            resolved.segments()[1..],
            [
                ResolvedSegment::LineTo(Vec2::new(15.0, 10.0)),
                ResolvedSegment::LineTo(Vec2::new(20.0, 10.0)),
                ResolvedSegment::LineTo(Vec2::new(20.0, 15.0)),
            ]
        );
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        // move 10,10; line 20,10; close; rel line +1,+1
        let path = path_from(&[2, 4, 0, 5], &[10.0, 10.0, 20.0, 10.0, 1.0, 1.0]);
        let resolved = path.resolve();
        assert_eq!(
            resolved.segments()[2..],
            [
                ResolvedSegment::Close,
                ResolvedSegment::MoveTo(Vec2::new(10.0, 10.0)),
                ResolvedSegment::LineTo(Vec2::new(11.0, 11.0)),
            ]
        );
    }

    #[test]
    fn test_smooth_quad_reflects_previous_control() {
        // move 0,0; quad (5,10) -> (10,0); squad -> (20,0)
        let path = path_from(&[2, 10, 14], &[0.0, 0.0, 5.0, 10.0, 10.0, 0.0, 20.0, 0.0]);
        assert_eq!(
            path.resolve().segments()[2],
            ResolvedSegment::QuadTo {
                control: Vec2::new(15.0, -10.0),
                to: Vec2::new(20.0, 0.0),
            }
        );
    }

    #[test]
    fn test_smooth_cubic_without_previous_cubic_uses_current_point() {
        // move 0,0; line 10,0; scubic c2 (15,5) -> (20,0)
        let path = path_from(&[2, 4, 16], &[0.0, 0.0, 10.0, 0.0, 15.0, 5.0, 20.0, 0.0]);
        assert_eq!(
            path.resolve().segments()[2],
            ResolvedSegment::CubicTo {
                control1: Vec2::new(10.0, 0.0),
                control2: Vec2::new(15.0, 5.0),
                to: Vec2::new(20.0, 0.0),
            }
        );
    }

    #[test]
    fn test_scale_and_bias_applied() {
        let mut path = Path::new(&PathDescriptor::default().with_scale_bias(2.0, 1.0)).unwrap();
        path.append(&[2], &[1.0, 2.0]).unwrap();
        assert_eq!(
            path.resolve().segments(),
            &[ResolvedSegment::MoveTo(Vec2::new(3.0, 5.0))]
        );
    }

    #[test]
    fn test_append_is_atomic() {
        let mut path = path_from(&[2, 4], &[0.0, 0.0, 1.0, 1.0]);
        let before = path.clone();

        assert!(path.append(&[4, 12], &[1.0, 2.0, 3.0]).is_err());
        assert!(path.append(&[4, 99], &[1.0, 2.0]).is_err());
        assert_eq!(path, before);
    }

    #[test]
    fn test_generation_bumps_on_mutation() {
        let mut path = Path::default();
        assert_eq!(path.generation(), 0);
        path.append(&[2], &[0.0, 0.0]).unwrap();
        assert_eq!(path.generation(), 1);
        path.modify_operands(0, 1, &[4.0, 4.0]).unwrap();
        assert_eq!(path.generation(), 2);
        path.clear().unwrap();
        assert_eq!(path.generation(), 3);
        assert!(path.is_empty());
    }

    #[test]
    fn test_append_only_rejects_edits() {
        let mut path = Path::new(&PathDescriptor::append_only()).unwrap();
        path.append(&[2, 4], &[0.0, 0.0, 1.0, 1.0]).unwrap();

        assert!(matches!(path.clear(), Err(GeometryError::InvalidArgument(_))));
        assert!(path.modify_operands(0, 1, &[5.0, 5.0]).is_err());
        assert_eq!(path.len(), 2);
        assert_eq!(path.capabilities(), PathCapabilities::AppendOnly);
    }

    #[test]
    fn test_modify_operands_checks_arity_and_range() {
        let mut path = path_from(&[2, 4], &[0.0, 0.0, 1.0, 1.0]);
        assert!(path.modify_operands(1, 1, &[1.0]).is_err());
        assert!(path.modify_operands(1, 2, &[1.0, 1.0]).is_err());

        path.modify_operands(1, 1, &[7.0, 8.0]).unwrap();
        let (_, operands) = encode(path.segments());
        assert_eq!(operands, vec![0.0, 0.0, 7.0, 8.0]);
    }

    #[test]
    fn test_rejects_zero_scale() {
        let descriptor = PathDescriptor::default().with_scale_bias(0.0, 0.0);
        assert!(Path::new(&descriptor).is_err());
    }

    #[test]
    fn test_transform_from_identity_matches_source() {
        let source = path_from(
            &[2, 5, 10, 14, 0],
            &[1.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 9.0, 9.0],
        );
        let mut dst = Path::default();
        dst.transform_from(&source, &Transform2D::IDENTITY).unwrap();
        assert_eq!(dst.resolve(), source.resolve());
    }

    #[test]
    fn test_transform_respects_destination_scale_bias() {
        let source = path_from(&[2, 4], &[1.0, 1.0, 3.0, 2.0]);
        let mut dst = Path::new(&PathDescriptor::default().with_scale_bias(0.5, 1.0)).unwrap();
        dst.transform_from(&source, &Transform2D::translate(Vec2::new(1.0, 0.0)))
            .unwrap();
        assert_eq!(
            dst.resolve().segments(),
            &[
                ResolvedSegment::MoveTo(Vec2::new(2.0, 1.0)),
                ResolvedSegment::LineTo(Vec2::new(4.0, 2.0)),
            ]
        );
    }
}
