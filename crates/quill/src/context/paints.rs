use super::Context;
use crate::{HandleKind, PaintHandle, VgError, VgResult};
use bitflags::bitflags;
use quill_geometry::{Color, GradientStop, Paint, PaintParameter, PaintType, SpreadMode};

bitflags! {
    /// Paint targets a draw or binding applies to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PaintModes: u8 {
        const FILL = 1 << 0;
        const STROKE = 1 << 1;
    }
}

impl Context {
    pub fn create_paint(&mut self) -> PaintHandle {
        let handle = PaintHandle(self.paints.push(Paint::new()));
        tracing::debug!(paint = handle.to_bits(), "created paint");
        handle
    }

    /// Destroy a paint. Bindings that still name it are kept, and a later
    /// draw through them fails with an invalid handle.
    pub fn destroy_paint(&mut self, handle: PaintHandle) -> VgResult<()> {
        self.paints
            .remove(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Paint))?;
        tracing::debug!(paint = handle.to_bits(), "destroyed paint");
        Ok(())
    }

    pub fn paint(&self, handle: PaintHandle) -> VgResult<&Paint> {
        self.paints
            .get(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Paint))
    }

    pub fn paint_mut(&mut self, handle: PaintHandle) -> VgResult<&mut Paint> {
        self.paints
            .get_mut(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Paint))
    }

    /// Bind `handle` as the fill and/or stroke paint.
    pub fn set_paint(&mut self, handle: PaintHandle, modes: PaintModes) -> VgResult<()> {
        if modes.is_empty() {
            return Err(VgError::invalid("paint modes must name fill or stroke"));
        }
        self.paint(handle)?;
        if modes.contains(PaintModes::FILL) {
            self.fill_paint = Some(handle);
        }
        if modes.contains(PaintModes::STROKE) {
            self.stroke_paint = Some(handle);
        }
        tracing::trace!(paint = handle.to_bits(), ?modes, "bound paint");
        Ok(())
    }

    /// Paint bound to a single target.
    pub fn paint_binding(&self, mode: PaintModes) -> VgResult<Option<PaintHandle>> {
        if mode == PaintModes::FILL {
            Ok(self.fill_paint)
        } else if mode == PaintModes::STROKE {
            Ok(self.stroke_paint)
        } else {
            Err(VgError::invalid(format!(
                "expected a single paint mode, got {:?}",
                mode
            )))
        }
    }

    pub fn set_paint_parameter(
        &mut self,
        handle: PaintHandle,
        parameter: PaintParameter,
        values: &[f32],
    ) -> VgResult<()> {
        Ok(self.paint_mut(handle)?.set_parameter(parameter, values)?)
    }

    /// Values exactly as last written, unclamped.
    pub fn paint_parameter(
        &self,
        handle: PaintHandle,
        parameter: PaintParameter,
    ) -> VgResult<Vec<f32>> {
        Ok(self.paint(handle)?.parameter(parameter))
    }

    pub fn set_paint_color(&mut self, handle: PaintHandle, color: Color) -> VgResult<()> {
        self.paint_mut(handle)?.set_color(color);
        Ok(())
    }

    pub fn set_paint_type(&mut self, handle: PaintHandle, paint_type: PaintType) -> VgResult<()> {
        self.paint_mut(handle)?.set_paint_type(paint_type);
        Ok(())
    }

    pub fn set_paint_spread(&mut self, handle: PaintHandle, spread: SpreadMode) -> VgResult<()> {
        self.paint_mut(handle)?.set_spread(spread);
        Ok(())
    }

    pub fn set_color_ramp(
        &mut self,
        handle: PaintHandle,
        stops: impl IntoIterator<Item = GradientStop>,
    ) -> VgResult<()> {
        self.paint_mut(handle)?.set_stops(stops);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_both_targets() {
        let mut ctx = Context::default();
        let paint = ctx.create_paint();
        ctx.set_paint(paint, PaintModes::FILL | PaintModes::STROKE)
            .unwrap();
        assert_eq!(ctx.paint_binding(PaintModes::FILL).unwrap(), Some(paint));
        assert_eq!(ctx.paint_binding(PaintModes::STROKE).unwrap(), Some(paint));
        assert!(ctx.paint_binding(PaintModes::all()).is_err());
    }

    #[test]
    fn test_empty_modes_rejected() {
        let mut ctx = Context::default();
        let paint = ctx.create_paint();
        assert!(matches!(
            ctx.set_paint(paint, PaintModes::empty()),
            Err(VgError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_stale_paint_handle() {
        let mut ctx = Context::default();
        let old = ctx.create_paint();
        ctx.destroy_paint(old).unwrap();
        let new = ctx.create_paint();

        assert_ne!(old, new);
        assert!(matches!(
            ctx.set_paint_color(old, Color::RED),
            Err(VgError::InvalidHandle(HandleKind::Paint))
        ));
        assert!(ctx.destroy_paint(old).is_err());
        assert!(ctx.set_paint(old, PaintModes::FILL).is_err());
        assert_eq!(ctx.paint_binding(PaintModes::FILL).unwrap(), None);
    }

    #[test]
    fn test_parameter_read_back_unclamped() {
        let mut ctx = Context::default();
        let paint = ctx.create_paint();
        ctx.set_paint_parameter(paint, PaintParameter::Color, &[1.5, -0.25, 0.5, 2.0])
            .unwrap();
        assert_eq!(
            ctx.paint_parameter(paint, PaintParameter::Color).unwrap(),
            vec![1.5, -0.25, 0.5, 2.0]
        );
        assert!(
            ctx.set_paint_parameter(paint, PaintParameter::Color, &[1.0, 0.0])
                .is_err()
        );
    }
}
