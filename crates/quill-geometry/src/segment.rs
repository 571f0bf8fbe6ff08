//! Path segment codec.
//!
//! Externally a path is a pair of parallel streams: one tag byte per segment
//! and a flat `f32` operand stream. The tag's low bit is the relative flag, the
//! remaining bits select the command:
//!
//! | command   | tag | operands                         |
//! |-----------|-----|----------------------------------|
//! | close     | 0   | -                                |
//! | move      | 2   | x y                              |
//! | line      | 4   | x y                              |
//! | hline     | 6   | x                                |
//! | vline     | 8   | y                                |
//! | quad      | 10  | x1 y1 x y                        |
//! | cubic     | 12  | x1 y1 x2 y2 x y                  |
//! | squad     | 14  | x y                              |
//! | scubic    | 16  | x2 y2 x y                        |
//! | arc (4x)  | 18+ | rh rv rotation x y               |
//!
//! Internally every segment is a [`Segment`] carrying a [`SegmentOp`] with its
//! fixed operand tuple.

use crate::{GeometryError, GeometryResult};
use glam::Vec2;

/// Bit set in a tag byte when the operands are relative to the current point.
pub const RELATIVE_FLAG: u8 = 1;

/// Command portion of a segment tag.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentCommand {
    ClosePath = 0,
    MoveTo = 2,
    LineTo = 4,
    HLineTo = 6,
    VLineTo = 8,
    QuadTo = 10,
    CubicTo = 12,
    SQuadTo = 14,
    SCubicTo = 16,
    SccwArcTo = 18,
    ScwArcTo = 20,
    LccwArcTo = 22,
    LcwArcTo = 24,
}

impl SegmentCommand {
    /// Number of operands the command consumes.
    pub const fn arity(self) -> usize {
        match self {
            SegmentCommand::ClosePath => 0,
            SegmentCommand::MoveTo | SegmentCommand::LineTo | SegmentCommand::SQuadTo => 2,
            SegmentCommand::HLineTo | SegmentCommand::VLineTo => 1,
            SegmentCommand::QuadTo | SegmentCommand::SCubicTo => 4,
            SegmentCommand::CubicTo => 6,
            SegmentCommand::SccwArcTo
            | SegmentCommand::ScwArcTo
            | SegmentCommand::LccwArcTo
            | SegmentCommand::LcwArcTo => 5,
        }
    }

    /// Split a tag byte into command and relativity.
    pub fn from_tag(tag: u8) -> Option<(Self, Relativity)> {
        let command = match tag & !RELATIVE_FLAG {
            0 => SegmentCommand::ClosePath,
            2 => SegmentCommand::MoveTo,
            4 => SegmentCommand::LineTo,
            6 => SegmentCommand::HLineTo,
            8 => SegmentCommand::VLineTo,
            10 => SegmentCommand::QuadTo,
            12 => SegmentCommand::CubicTo,
            14 => SegmentCommand::SQuadTo,
            16 => SegmentCommand::SCubicTo,
            18 => SegmentCommand::SccwArcTo,
            20 => SegmentCommand::ScwArcTo,
            22 => SegmentCommand::LccwArcTo,
            24 => SegmentCommand::LcwArcTo,
            _ => return None,
        };
        let relativity = if tag & RELATIVE_FLAG != 0 {
            Relativity::Relative
        } else {
            Relativity::Absolute
        };
        Some((command, relativity))
    }

    pub const fn tag(self, relativity: Relativity) -> u8 {
        match relativity {
            Relativity::Absolute => self as u8,
            Relativity::Relative => self as u8 | RELATIVE_FLAG,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relativity {
    #[default]
    Absolute,
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcSize {
    Small,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcDirection {
    CounterClockwise,
    Clockwise,
}

impl ArcDirection {
    pub fn flipped(self) -> Self {
        match self {
            ArcDirection::CounterClockwise => ArcDirection::Clockwise,
            ArcDirection::Clockwise => ArcDirection::CounterClockwise,
        }
    }
}

/// One drawing command with its operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentOp {
    Close,
    MoveTo(Vec2),
    LineTo(Vec2),
    HLineTo(f32),
    VLineTo(f32),
    QuadTo {
        control: Vec2,
        to: Vec2,
    },
    CubicTo {
        control1: Vec2,
        control2: Vec2,
        to: Vec2,
    },
    /// Quadratic whose control point is reflected from the previous segment.
    SQuadTo(Vec2),
    /// Cubic whose first control point is reflected from the previous segment.
    SCubicTo {
        control2: Vec2,
        to: Vec2,
    },
    ArcTo {
        radii: Vec2,
        /// Ellipse x-axis rotation in degrees.
        rotation: f32,
        to: Vec2,
        size: ArcSize,
        direction: ArcDirection,
    },
}

impl SegmentOp {
    pub fn command(&self) -> SegmentCommand {
        match self {
            SegmentOp::Close => SegmentCommand::ClosePath,
            SegmentOp::MoveTo(_) => SegmentCommand::MoveTo,
            SegmentOp::LineTo(_) => SegmentCommand::LineTo,
            SegmentOp::HLineTo(_) => SegmentCommand::HLineTo,
            SegmentOp::VLineTo(_) => SegmentCommand::VLineTo,
            SegmentOp::QuadTo { .. } => SegmentCommand::QuadTo,
            SegmentOp::CubicTo { .. } => SegmentCommand::CubicTo,
            SegmentOp::SQuadTo(_) => SegmentCommand::SQuadTo,
            SegmentOp::SCubicTo { .. } => SegmentCommand::SCubicTo,
            SegmentOp::ArcTo {
                size, direction, ..
            } => match (size, direction) {
                (ArcSize::Small, ArcDirection::CounterClockwise) => SegmentCommand::SccwArcTo,
                (ArcSize::Small, ArcDirection::Clockwise) => SegmentCommand::ScwArcTo,
                (ArcSize::Large, ArcDirection::CounterClockwise) => SegmentCommand::LccwArcTo,
                (ArcSize::Large, ArcDirection::Clockwise) => SegmentCommand::LcwArcTo,
            },
        }
    }

    /// Build from a command and exactly `command.arity()` operands.
    fn from_operands(command: SegmentCommand, v: &[f32]) -> Self {
        let arc = |size, direction| SegmentOp::ArcTo {
            radii: Vec2::new(v[0], v[1]),
            rotation: v[2],
            to: Vec2::new(v[3], v[4]),
            size,
            direction,
        };
        match command {
            SegmentCommand::ClosePath => SegmentOp::Close,
            SegmentCommand::MoveTo => SegmentOp::MoveTo(Vec2::new(v[0], v[1])),
            SegmentCommand::LineTo => SegmentOp::LineTo(Vec2::new(v[0], v[1])),
            SegmentCommand::HLineTo => SegmentOp::HLineTo(v[0]),
            SegmentCommand::VLineTo => SegmentOp::VLineTo(v[0]),
            SegmentCommand::QuadTo => SegmentOp::QuadTo {
                control: Vec2::new(v[0], v[1]),
                to: Vec2::new(v[2], v[3]),
            },
            SegmentCommand::CubicTo => SegmentOp::CubicTo {
                control1: Vec2::new(v[0], v[1]),
                control2: Vec2::new(v[2], v[3]),
                to: Vec2::new(v[4], v[5]),
            },
            SegmentCommand::SQuadTo => SegmentOp::SQuadTo(Vec2::new(v[0], v[1])),
            SegmentCommand::SCubicTo => SegmentOp::SCubicTo {
                control2: Vec2::new(v[0], v[1]),
                to: Vec2::new(v[2], v[3]),
            },
            SegmentCommand::SccwArcTo => arc(ArcSize::Small, ArcDirection::CounterClockwise),
            SegmentCommand::ScwArcTo => arc(ArcSize::Small, ArcDirection::Clockwise),
            SegmentCommand::LccwArcTo => arc(ArcSize::Large, ArcDirection::CounterClockwise),
            SegmentCommand::LcwArcTo => arc(ArcSize::Large, ArcDirection::Clockwise),
        }
    }

    /// Append the operands in wire order.
    pub fn write_operands(&self, out: &mut Vec<f32>) {
        match *self {
            SegmentOp::Close => {}
            SegmentOp::MoveTo(p) | SegmentOp::LineTo(p) | SegmentOp::SQuadTo(p) => {
                out.extend_from_slice(&[p.x, p.y])
            }
            SegmentOp::HLineTo(v) | SegmentOp::VLineTo(v) => out.push(v),
            SegmentOp::QuadTo { control, to } => {
                out.extend_from_slice(&[control.x, control.y, to.x, to.y])
            }
            SegmentOp::CubicTo {
                control1,
                control2,
                to,
            } => out.extend_from_slice(&[
                control1.x, control1.y, control2.x, control2.y, to.x, to.y,
            ]),
            SegmentOp::SCubicTo { control2, to } => {
                out.extend_from_slice(&[control2.x, control2.y, to.x, to.y])
            }
            SegmentOp::ArcTo {
                radii,
                rotation,
                to,
                ..
            } => out.extend_from_slice(&[radii.x, radii.y, rotation, to.x, to.y]),
        }
    }

    /// Apply `f` to every coordinate operand. Arc rotation is an angle and is
    /// left untouched.
    pub(crate) fn map_coords(self, f: impl Fn(f32) -> f32) -> Self {
        let p = |v: Vec2| Vec2::new(f(v.x), f(v.y));
        match self {
            SegmentOp::Close => SegmentOp::Close,
            SegmentOp::MoveTo(to) => SegmentOp::MoveTo(p(to)),
            SegmentOp::LineTo(to) => SegmentOp::LineTo(p(to)),
            SegmentOp::HLineTo(x) => SegmentOp::HLineTo(f(x)),
            SegmentOp::VLineTo(y) => SegmentOp::VLineTo(f(y)),
            SegmentOp::QuadTo { control, to } => SegmentOp::QuadTo {
                control: p(control),
                to: p(to),
            },
            SegmentOp::CubicTo {
                control1,
                control2,
                to,
            } => SegmentOp::CubicTo {
                control1: p(control1),
                control2: p(control2),
                to: p(to),
            },
            SegmentOp::SQuadTo(to) => SegmentOp::SQuadTo(p(to)),
            SegmentOp::SCubicTo { control2, to } => SegmentOp::SCubicTo {
                control2: p(control2),
                to: p(to),
            },
            SegmentOp::ArcTo {
                radii,
                rotation,
                to,
                size,
                direction,
            } => SegmentOp::ArcTo {
                radii: p(radii),
                rotation,
                to: p(to),
                size,
                direction,
            },
        }
    }
}

/// A segment as stored in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub op: SegmentOp,
    pub relativity: Relativity,
}

impl Segment {
    pub const fn absolute(op: SegmentOp) -> Self {
        Self {
            op,
            relativity: Relativity::Absolute,
        }
    }

    pub const fn relative(op: SegmentOp) -> Self {
        Self {
            op,
            relativity: Relativity::Relative,
        }
    }

    pub fn tag(&self) -> u8 {
        self.op.command().tag(self.relativity)
    }

    pub fn arity(&self) -> usize {
        self.op.command().arity()
    }
}

/// Single forward pass over a tag stream and its operand stream.
///
/// Yields one `Result` per tag. An unknown tag or an operand stream that runs
/// out mid-segment yields an error and ends the iteration. Call
/// [`SegmentDecoder::finish`] after draining to reject trailing operands.
#[derive(Debug, Clone)]
pub struct SegmentDecoder<'a> {
    tags: std::slice::Iter<'a, u8>,
    operands: &'a [f32],
    cursor: usize,
    index: usize,
    failed: bool,
}

impl<'a> SegmentDecoder<'a> {
    pub fn new(tags: &'a [u8], operands: &'a [f32]) -> Self {
        Self {
            tags: tags.iter(),
            operands,
            cursor: 0,
            index: 0,
            failed: false,
        }
    }

    /// Number of tags not yet decoded.
    pub fn remaining(&self) -> usize {
        self.tags.len()
    }

    /// Check that every operand was consumed.
    pub fn finish(self) -> GeometryResult<()> {
        if self.cursor != self.operands.len() {
            return Err(GeometryError::invalid(format!(
                "{} operands supplied but the commands consume {}",
                self.operands.len(),
                self.cursor
            )));
        }
        Ok(())
    }
}

impl Iterator for SegmentDecoder<'_> {
    type Item = GeometryResult<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let &tag = self.tags.next()?;
        let index = self.index;
        self.index += 1;

        let Some((command, relativity)) = SegmentCommand::from_tag(tag) else {
            self.failed = true;
            return Some(Err(GeometryError::invalid(format!(
                "unknown segment tag {} at segment {}",
                tag, index
            ))));
        };

        let end = self.cursor + command.arity();
        let Some(values) = self.operands.get(self.cursor..end) else {
            self.failed = true;
            return Some(Err(GeometryError::invalid(format!(
                "segment {} ({:?}) needs {} operands but only {} remain",
                index,
                command,
                command.arity(),
                self.operands.len() - self.cursor
            ))));
        };
        self.cursor = end;

        Some(Ok(Segment {
            op: SegmentOp::from_operands(command, values),
            relativity,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.tags.len()))
        }
    }
}

/// Decode a complete stream, rejecting count mismatches.
pub fn decode(tags: &[u8], operands: &[f32]) -> GeometryResult<Vec<Segment>> {
    let mut decoder = SegmentDecoder::new(tags, operands);
    let mut segments = Vec::new();
    crate::error::try_reserve(&mut segments, tags.len())?;
    for segment in decoder.by_ref() {
        segments.push(segment?);
    }
    decoder.finish()?;
    Ok(segments)
}

/// Encode segments into the parallel tag/operand streams.
pub fn encode(segments: &[Segment]) -> (Vec<u8>, Vec<f32>) {
    let mut tags = Vec::with_capacity(segments.len());
    let mut operands = Vec::with_capacity(segments.iter().map(Segment::arity).sum());
    for segment in segments {
        tags.push(segment.tag());
        segment.op.write_operands(&mut operands);
    }
    (tags, operands)
}

/// Sum of operand arities for a tag stream.
pub fn operand_count(tags: &[u8]) -> GeometryResult<usize> {
    tags.iter().try_fold(0usize, |acc, &tag| {
        SegmentCommand::from_tag(tag)
            .map(|(command, _)| acc + command.arity())
            .ok_or_else(|| GeometryError::invalid(format!("unknown segment tag {}", tag)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_values() {
        assert_eq!(SegmentCommand::MoveTo.tag(Relativity::Absolute), 2);
        assert_eq!(SegmentCommand::MoveTo.tag(Relativity::Relative), 3);
        assert_eq!(SegmentCommand::LcwArcTo.tag(Relativity::Relative), 25);
        assert_eq!(
            SegmentCommand::from_tag(17),
            Some((SegmentCommand::SCubicTo, Relativity::Relative))
        );
        assert_eq!(SegmentCommand::from_tag(26), None);
    }

    #[test]
    fn test_decode_preserves_order_and_flags() {
        let tags = [2, 5, 7, 9, 0];
        let operands = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let segments = decode(&tags, &operands).unwrap();

        assert_eq!(
            segments,
            vec![
                Segment::absolute(SegmentOp::MoveTo(Vec2::new(1.0, 2.0))),
                Segment::relative(SegmentOp::LineTo(Vec2::new(3.0, 4.0))),
                Segment::relative(SegmentOp::HLineTo(5.0)),
                Segment::relative(SegmentOp::VLineTo(6.0)),
                Segment::absolute(SegmentOp::Close),
            ]
        );
    }

    #[test]
    fn test_decode_arc_operand_order() {
        let segments = decode(&[2, 22], &[0.0, 0.0, 10.0, 5.0, 30.0, 20.0, 0.0]).unwrap();
        assert_eq!(
            segments[1].op,
            SegmentOp::ArcTo {
                radii: Vec2::new(10.0, 5.0),
                rotation: 30.0,
                to: Vec2::new(20.0, 0.0),
                size: ArcSize::Large,
                direction: ArcDirection::CounterClockwise,
            }
        );
    }

    #[test]
    fn test_decode_rejects_short_operands() {
        let err = decode(&[2, 12], &[0.0, 0.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidArgument(_)));
    }

    #[test]
    fn test_decode_rejects_trailing_operands() {
        let err = decode(&[2], &[0.0, 0.0, 1.0]).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidArgument(_)));
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        let mut decoder = SegmentDecoder::new(&[2, 40, 4], &[0.0; 4]);
        assert!(decoder.next().unwrap().is_ok());
        assert!(decoder.next().unwrap().is_err());
        assert!(decoder.next().is_none());
    }

    #[test]
    fn test_round_trip() {
        let tags = [2, 4, 7, 9, 10, 13, 14, 17, 18, 21, 22, 25, 0, 3, 1];
        let operands: Vec<f32> = (0..operand_count(&tags).unwrap())
            .map(|i| i as f32 * 0.5 - 3.0)
            .collect();

        let segments = decode(&tags, &operands).unwrap();
        let (out_tags, out_operands) = encode(&segments);
        assert_eq!(out_tags, tags);
        assert_eq!(out_operands, operands);
    }
}
