use super::{Context, PaintModes};
use crate::draw::{DrawCommand, DrawSink, FillDraw, GlyphRun, ImageDraw, PathDraw, StrokeDraw};
use crate::{FontHandle, HandleKind, ImageHandle, PaintHandle, PathHandle, VgError, VgResult};
use quill_core::geometry::Rect;
use quill_core::profiling::{self, profile_function};
use quill_geometry::{MatrixMode, ResolvedPaint};

impl Context {
    /// Resolve the paint in `binding` for drawing.
    fn bound_paint(
        &self,
        binding: Option<PaintHandle>,
        target: &str,
    ) -> VgResult<(PaintHandle, ResolvedPaint)> {
        let handle =
            binding.ok_or_else(|| VgError::invalid(format!("no {} paint bound", target)))?;
        Ok((handle, self.paint(handle)?.resolve()))
    }

    /// Queue a draw of `handle` with the paints bound to `modes`.
    ///
    /// Every lookup is validated before anything is queued, so a failing draw
    /// leaves the queue untouched.
    pub fn draw_path(&mut self, handle: PathHandle, modes: PaintModes) -> VgResult<()> {
        profile_function!();
        if modes.is_empty() {
            return Err(VgError::invalid("draw needs fill or stroke"));
        }
        self.path(handle)?;

        let fill = if modes.contains(PaintModes::FILL) {
            let (paint, resolved) = self.bound_paint(self.fill_paint, "fill")?;
            Some(FillDraw {
                paint,
                resolved,
                paint_transform: self.transforms.matrix(MatrixMode::FillPaintToUser),
                rule: self.fill_rule,
            })
        } else {
            None
        };
        let stroke = if modes.contains(PaintModes::STROKE) {
            let (paint, resolved) = self.bound_paint(self.stroke_paint, "stroke")?;
            Some(StrokeDraw {
                paint,
                resolved,
                paint_transform: self.transforms.matrix(MatrixMode::StrokePaintToUser),
                attributes: self.stroke.clone(),
            })
        } else {
            None
        };

        let transform = self.transforms.matrix(MatrixMode::PathUserToSurface);
        let path = self
            .paths
            .get(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Path))?;
        let generation = path.generation();
        let geometry = self.cache.surface_geometry(handle, path, &transform);

        tracing::trace!(
            path = handle.to_bits(),
            generation,
            segments = geometry.len(),
            ?modes,
            "draw path"
        );
        self.commands.push(DrawCommand::Path(PathDraw {
            path: handle,
            generation,
            geometry,
            transform,
            fill,
            stroke,
            stroke_width: self.stroke.width,
        }));
        Ok(())
    }

    /// Queue a draw of the whole image through the image-user-to-surface
    /// matrix.
    pub fn draw_image(&mut self, handle: ImageHandle) -> VgResult<()> {
        let image = self.image(handle)?;
        let (width, height) = (image.width(), image.height());
        let transform = self.transforms.matrix(MatrixMode::ImageUserToSurface);
        tracing::trace!(image = handle.to_bits(), width, height, "draw image");
        self.commands.push(DrawCommand::Image(ImageDraw {
            image: handle,
            transform,
            width,
            height,
        }));
        Ok(())
    }

    /// Lay out `text` with the pen at `(x, y)` in glyph user space and queue
    /// it tinted by the bound fill paint.
    ///
    /// Glyph runs support filling only.
    pub fn draw_text(
        &mut self,
        font: FontHandle,
        text: &str,
        x: f32,
        y: f32,
        modes: PaintModes,
    ) -> VgResult<()> {
        profile_function!();
        if modes != PaintModes::FILL {
            return Err(VgError::invalid(format!(
                "glyph runs are fill only, got {:?}",
                modes
            )));
        }
        let entry = self.font(font)?;
        let atlas = entry.atlas();
        self.image(atlas)?;
        let (paint, tint) = self.bound_paint(self.fill_paint, "fill")?;

        let mut layout = entry.bitmap().layout(text, x, y);
        let quads: Vec<_> = layout.by_ref().collect();
        let advance = layout.pen_x() - x;

        tracing::trace!(font = font.to_bits(), glyphs = quads.len(), advance, "draw text");
        self.commands.push(DrawCommand::Glyphs(GlyphRun {
            font,
            atlas,
            transform: self.transforms.matrix(MatrixMode::GlyphUserToSurface),
            quads,
            paint,
            tint,
            advance,
        }));
        Ok(())
    }

    /// Queue a clear of a surface rectangle with the current clear color.
    ///
    /// The rectangle is clipped to the surface; nothing is queued when it
    /// falls entirely outside.
    pub fn clear(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let (surface_w, surface_h) = self.surface_size;
        let right = x.saturating_add(width).min(surface_w);
        let bottom = y.saturating_add(height).min(surface_h);
        if x >= right || y >= bottom {
            tracing::trace!(x, y, width, height, "clear outside surface");
            return;
        }
        self.commands.push(DrawCommand::Clear {
            rect: Rect::new(x, y, right - x, bottom - y),
            color: self.clear_color.clamped(),
        });
    }

    /// Commands queued since the last flush.
    pub fn pending_commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the queue without submitting it.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Submit the queued commands to `sink` and start a new frame. Returns the
    /// number of commands submitted.
    pub fn flush(&mut self, sink: &dyn DrawSink) -> usize {
        profile_function!();
        let commands = self.take_commands();
        sink.submit(&commands);
        profiling::new_frame();
        tracing::trace!(commands = commands.len(), "flushed frame");
        commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingSink;
    use crate::ContextDescriptor;
    use glam::Vec2;
    use quill_geometry::{Color, PaintParameter, PathDescriptor, shape};
    use std::sync::Arc;

    fn ctx_with_rect() -> (Context, PathHandle, PaintHandle) {
        let mut ctx = Context::new(&ContextDescriptor::new().with_surface_size(100, 100));
        let path = ctx.create_path(&PathDescriptor::default()).unwrap();
        shape::rect(ctx.path_mut(path).unwrap(), Vec2::ZERO, Vec2::splat(10.0)).unwrap();
        let paint = ctx.create_paint();
        ctx.set_paint(paint, PaintModes::FILL | PaintModes::STROKE)
            .unwrap();
        (ctx, path, paint)
    }

    #[test]
    fn test_draw_path_snapshot() {
        let (mut ctx, path, paint) = ctx_with_rect();
        ctx.set_paint_color(paint, Color::rgba(2.0, 0.5, -1.0, 1.0))
            .unwrap();
        ctx.set_stroke_width(4.0);
        ctx.translate(5.0, 0.0);
        ctx.draw_path(path, PaintModes::FILL).unwrap();

        let command = ctx.pending_commands()[0].as_path().unwrap().clone();
        assert!(command.stroke.is_none());
        assert_eq!(command.stroke_width, 4.0);
        assert_eq!(command.transform.translation(), Vec2::new(5.0, 0.0));
        assert_eq!(
            command.geometry.bounds(),
            Some((Vec2::new(5.0, 0.0), Vec2::new(15.0, 10.0)))
        );
        let fill = command.fill.unwrap();
        assert_eq!(fill.paint, paint);
        assert_eq!(
            fill.resolved,
            ResolvedPaint::Solid(Color::rgba(1.0, 0.5, 0.0, 1.0))
        );
        // Stored color is untouched by the draw.
        assert_eq!(
            ctx.paint_parameter(paint, PaintParameter::Color).unwrap(),
            vec![2.0, 0.5, -1.0, 1.0]
        );
    }

    #[test]
    fn test_draw_does_not_change_mode() {
        let (mut ctx, path, _) = ctx_with_rect();
        ctx.set_matrix_mode(MatrixMode::StrokePaintToUser);
        ctx.draw_path(path, PaintModes::STROKE).unwrap();
        assert_eq!(ctx.matrix_mode(), MatrixMode::StrokePaintToUser);
    }

    #[test]
    fn test_unbound_paint_rejected() {
        let mut ctx = Context::default();
        let path = ctx.create_path(&PathDescriptor::default()).unwrap();
        assert!(matches!(
            ctx.draw_path(path, PaintModes::FILL),
            Err(VgError::InvalidArgument(_))
        ));
        assert!(ctx.pending_commands().is_empty());
    }

    #[test]
    fn test_destroyed_bound_paint_rejected() {
        let (mut ctx, path, paint) = ctx_with_rect();
        ctx.destroy_paint(paint).unwrap();
        assert!(matches!(
            ctx.draw_path(path, PaintModes::STROKE),
            Err(VgError::InvalidHandle(HandleKind::Paint))
        ));
        assert!(ctx.pending_commands().is_empty());
    }

    #[test]
    fn test_cache_reused_until_mutation() {
        let (mut ctx, path, _) = ctx_with_rect();
        ctx.draw_path(path, PaintModes::FILL).unwrap();
        ctx.draw_path(path, PaintModes::FILL).unwrap();
        assert_eq!(ctx.cache_stats().hits, 1);

        ctx.append_path_data(path, &[2, 4], &[20.0, 20.0, 30.0, 30.0])
            .unwrap();
        ctx.draw_path(path, PaintModes::FILL).unwrap();
        assert_eq!(ctx.cache_stats().invalidations, 1);

        let commands = ctx.take_commands();
        let (first, last) = (
            commands[0].as_path().unwrap(),
            commands[2].as_path().unwrap(),
        );
        assert!(Arc::ptr_eq(&first.geometry, &commands[1].as_path().unwrap().geometry));
        assert!(last.generation > first.generation);
    }

    #[test]
    fn test_clear_clipped_to_surface() {
        let mut ctx = Context::new(
            &ContextDescriptor::new()
                .with_surface_size(50, 40)
                .with_clear_color(Color::rgba(1.5, 0.0, 0.0, 1.0)),
        );
        ctx.clear(40, 30, 100, 100);
        ctx.clear(60, 0, 10, 10);

        assert_eq!(
            ctx.take_commands(),
            vec![DrawCommand::Clear {
                rect: Rect::new(40, 30, 10, 10),
                color: Color::RED,
            }]
        );
    }

    #[test]
    fn test_flush_submits_and_drains() {
        let (mut ctx, path, _) = ctx_with_rect();
        let image = ctx.create_image(4, 4).unwrap();
        let sink = RecordingSink::new();

        ctx.clear(0, 0, 100, 100);
        ctx.draw_path(path, PaintModes::FILL | PaintModes::STROKE)
            .unwrap();
        ctx.draw_image(image).unwrap();
        assert_eq!(ctx.flush(&sink), 3);

        assert!(ctx.pending_commands().is_empty());
        assert_eq!(sink.frame_count(), 1);
        assert_eq!(sink.count_path_draws(), 1);
        assert_eq!(sink.count_image_draws(), 1);
        assert_eq!(sink.count_clears(), 1);
    }

    #[test]
    fn test_draw_text_requires_fill_only() {
        let (mut ctx, _, _) = ctx_with_rect();
        let atlas = ctx.create_image(16, 16).unwrap();
        let (font, _) = ctx
            .create_font_from_str(
                "char id=65 x=0 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=5",
                atlas,
            )
            .unwrap();

        assert!(ctx.draw_text(font, "A", 0.0, 0.0, PaintModes::STROKE).is_err());
        ctx.draw_text(font, "AA", 1.0, 2.0, PaintModes::FILL).unwrap();

        let commands = ctx.take_commands();
        let DrawCommand::Glyphs(run) = &commands[0] else {
            panic!("expected glyph run, got {:?}", commands[0]);
        };
        assert_eq!(run.quads.len(), 2);
        assert_eq!(run.quads[1].dest.x, 6.0);
        assert_eq!(run.advance, 10.0);
        assert_eq!(run.atlas, atlas);
    }
}
