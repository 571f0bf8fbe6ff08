//! End-to-end behavior of a context driven the way a renderer front end would.

use parking_lot::Mutex;
use quill::prelude::*;
use quill::{
    DrawSink, GradientStop, HandleKind, PaintType, PathCapabilities, SpreadMode,
    geometry::{ArcDirection, ResolvedPaint, ResolvedSegment, SegmentOp},
};
use std::io::Write;

/// Sink that only remembers how many commands each frame had.
#[derive(Default)]
struct FrameSizes(Mutex<Vec<usize>>);

impl DrawSink for FrameSizes {
    fn submit(&self, commands: &[DrawCommand]) {
        self.0.lock().push(commands.len());
    }
}

fn filled_context() -> (Context, quill::PaintHandle) {
    let mut ctx = Context::new(&ContextDescriptor::new().with_surface_size(320, 240));
    let paint = ctx.create_paint();
    ctx.set_paint(paint, PaintModes::FILL | PaintModes::STROKE)
        .unwrap();
    (ctx, paint)
}

// ====================
// Paths
// ====================

#[test]
fn test_relative_segments_resolve_at_draw_time() {
    let (mut ctx, _) = filled_context();
    let path = ctx.create_path(&PathDescriptor::default()).unwrap();
    // move 10,10; rel line +5,0; rel line +0,5
    ctx.append_path_data(path, &[2, 5, 5], &[10.0, 10.0, 5.0, 0.0, 0.0, 5.0])
        .unwrap();
    ctx.draw_path(path, PaintModes::FILL).unwrap();

    let commands = ctx.take_commands();
    let geometry = &commands[0].as_path().unwrap().geometry;
    assert_eq!(
        geometry.segments()[2],
        ResolvedSegment::LineTo(Vec2::new(15.0, 15.0))
    );
}

#[test]
fn test_mirrored_transform_flips_arcs() {
    let (mut ctx, _) = filled_context();
    let src = ctx.create_path(&PathDescriptor::default()).unwrap();
    let dst = ctx.create_path(&PathDescriptor::default()).unwrap();
    shape::ellipse(ctx.path_mut(src).unwrap(), Vec2::ZERO, Vec2::new(4.0, 2.0)).unwrap();

    ctx.scale(-1.0, 2.0);
    ctx.transform_path(dst, src).unwrap();

    let arcs: Vec<_> = ctx
        .path(dst)
        .unwrap()
        .segments()
        .iter()
        .filter_map(|segment| match segment.op {
            SegmentOp::ArcTo {
                radii, direction, ..
            } => Some((radii, direction)),
            _ => None,
        })
        .collect();
    assert_eq!(arcs.len(), 2);
    for (radii, direction) in arcs {
        assert!((radii - Vec2::new(2.0, 2.0)).length() < 1e-4, "{radii:?}");
        assert_eq!(direction, ArcDirection::Clockwise);
    }
}

#[test]
fn test_append_only_path_accepts_transform() {
    let (mut ctx, _) = filled_context();
    let src = ctx.create_path(&PathDescriptor::default()).unwrap();
    let dst = ctx.create_path(&PathDescriptor::append_only()).unwrap();
    shape::line(ctx.path_mut(src).unwrap(), Vec2::ZERO, Vec2::ONE).unwrap();

    ctx.transform_path(dst, src).unwrap();
    assert_eq!(
        ctx.path(dst).unwrap().capabilities(),
        PathCapabilities::AppendOnly
    );
    assert!(ctx.clear_path(dst).is_err());
}

#[test]
fn test_stale_path_handle_never_aliases() {
    let (mut ctx, _) = filled_context();
    let old = ctx.create_path(&PathDescriptor::default()).unwrap();
    ctx.destroy_path(old).unwrap();
    let new = ctx.create_path(&PathDescriptor::default()).unwrap();

    assert!(matches!(
        ctx.draw_path(old, PaintModes::FILL),
        Err(VgError::InvalidHandle(HandleKind::Path))
    ));
    assert!(ctx.path(new).unwrap().is_empty());
}

// ====================
// Paints
// ====================

#[test]
fn test_gradient_draw_clamps_stops() {
    let (mut ctx, paint) = filled_context();
    ctx.set_paint_type(paint, PaintType::LinearGradient).unwrap();
    ctx.set_paint_spread(paint, SpreadMode::Reflect).unwrap();
    ctx.set_paint_parameter(paint, PaintParameter::LinearGradient, &[0.0, 0.0, 10.0, 0.0])
        .unwrap();
    ctx.set_color_ramp(
        paint,
        [
            GradientStop::new(1.0, Color::rgba(0.0, 0.0, 3.0, 1.0)),
            GradientStop::new(0.0, Color::RED),
        ],
    )
    .unwrap();

    let path = ctx.create_path(&PathDescriptor::default()).unwrap();
    shape::rect(ctx.path_mut(path).unwrap(), Vec2::ZERO, Vec2::splat(10.0)).unwrap();
    ctx.draw_path(path, PaintModes::FILL).unwrap();

    let commands = ctx.take_commands();
    let fill = commands[0].as_path().unwrap().fill.as_ref().unwrap();
    let ResolvedPaint::Linear {
        start,
        end,
        stops,
        spread,
    } = &fill.resolved
    else {
        panic!("expected linear gradient, got {:?}", fill.resolved);
    };
    assert_eq!((*start, *end), (Vec2::ZERO, Vec2::new(10.0, 0.0)));
    assert_eq!(*spread, SpreadMode::Reflect);
    assert_eq!(stops[0].color, Color::RED);
    assert_eq!(stops[1].color, Color::BLUE);

    // The stored ramp is still unclamped.
    let ramp = ctx
        .paint_parameter(paint, PaintParameter::ColorRampStops)
        .unwrap();
    assert_eq!(ramp[5..], [1.0, 0.0, 0.0, 3.0, 1.0]);
}

#[test]
fn test_paint_matrix_captured_per_target() {
    let (mut ctx, _) = filled_context();
    let path = ctx.create_path(&PathDescriptor::default()).unwrap();
    shape::rect(ctx.path_mut(path).unwrap(), Vec2::ZERO, Vec2::ONE).unwrap();

    ctx.set_matrix_mode(MatrixMode::FillPaintToUser);
    ctx.translate(7.0, 0.0);
    ctx.set_matrix_mode(MatrixMode::StrokePaintToUser);
    ctx.rotate(90.0);
    ctx.draw_path(path, PaintModes::FILL | PaintModes::STROKE)
        .unwrap();

    let commands = ctx.take_commands();
    let draw = commands[0].as_path().unwrap();
    assert!(draw.transform.is_identity());
    assert_eq!(
        draw.fill.as_ref().unwrap().paint_transform.translation(),
        Vec2::new(7.0, 0.0)
    );
    let rotated = draw
        .stroke
        .as_ref()
        .unwrap()
        .paint_transform
        .transform_vector(Vec2::X);
    assert!((rotated - Vec2::Y).length() < 1e-5);
}

// ====================
// Text
// ====================

#[test]
fn test_text_from_font_file() {
    let (mut ctx, _) = filled_context();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "info face=\"Test\" size=12").unwrap();
    writeln!(file, "common lineHeight=14 base=11 scaleW=32 scaleH=32 pages=1").unwrap();
    writeln!(
        file,
        "char id=65 x=0 y=0 width=20 height=24 xoffset=0 yoffset=0 xadvance=22"
    )
    .unwrap();
    writeln!(
        file,
        "char id=86 x=20 y=0 width=20 height=24 xoffset=0 yoffset=0 xadvance=22"
    )
    .unwrap();
    writeln!(file, "kerning first=65 second=86 amount=-3").unwrap();
    writeln!(file, "char id=66 x=0").unwrap();

    let atlas = ctx.create_image(32, 32).unwrap();
    let (font, errors) = ctx.load_font(file.path(), atlas).unwrap();
    assert_eq!(errors.len(), 1);

    ctx.set_matrix_mode(MatrixMode::GlyphUserToSurface);
    ctx.translate(0.0, 100.0);
    ctx.set_matrix_mode(MatrixMode::PathUserToSurface);
    ctx.draw_text(font, "AV", 0.0, 0.0, PaintModes::FILL).unwrap();

    let commands = ctx.take_commands();
    let DrawCommand::Glyphs(run) = &commands[0] else {
        panic!("expected glyph run");
    };
    assert_eq!(run.quads[1].dest.x - run.quads[0].dest.x, 19.0);
    assert_eq!(run.advance, 41.0);
    assert_eq!(run.transform.translation(), Vec2::new(0.0, 100.0));
}

#[test]
fn test_text_with_destroyed_atlas_fails() {
    let (mut ctx, _) = filled_context();
    let atlas = ctx.create_image(8, 8).unwrap();
    let (font, _) = ctx
        .create_font_from_str(
            "char id=65 x=0 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=5",
            atlas,
        )
        .unwrap();
    ctx.destroy_image(atlas).unwrap();

    assert!(matches!(
        ctx.draw_text(font, "A", 0.0, 0.0, PaintModes::FILL),
        Err(VgError::InvalidHandle(HandleKind::Image))
    ));
    assert!(ctx.load_font("/no/such/font.fnt", atlas).is_err());
}

// ====================
// Frames
// ====================

#[test]
fn test_flush_per_frame() {
    let (mut ctx, _) = filled_context();
    let path = ctx.create_path(&PathDescriptor::default()).unwrap();
    shape::rect(ctx.path_mut(path).unwrap(), Vec2::ZERO, Vec2::ONE).unwrap();
    let sink = FrameSizes::default();

    ctx.clear(0, 0, 320, 240);
    ctx.draw_path(path, PaintModes::FILL).unwrap();
    ctx.flush(&sink);
    ctx.flush(&sink);
    ctx.draw_path(path, PaintModes::STROKE).unwrap();
    ctx.flush(&sink);

    assert_eq!(*sink.0.lock(), vec![2, 0, 1]);
    assert_eq!(ctx.cache_stats().hits, 1);
}
