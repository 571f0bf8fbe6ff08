//! Paint state: solid colors and gradients.
//!
//! Values are stored exactly as written. Colors are not clamped and stops keep
//! their input order among equal offsets; [`Paint::resolve`] produces the
//! clamped form a renderer consumes.

use crate::{Color, GeometryError, GeometryResult};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaintType {
    #[default]
    Color,
    LinearGradient,
    RadialGradient,
}

/// How gradient offsets outside `[0, 1]` are mapped back into the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpreadMode {
    #[default]
    Pad,
    Repeat,
    Reflect,
}

impl SpreadMode {
    pub fn apply(self, offset: f32) -> f32 {
        match self {
            SpreadMode::Pad => offset.clamp(0.0, 1.0),
            SpreadMode::Repeat => offset - offset.floor(),
            SpreadMode::Reflect => {
                let t = offset.rem_euclid(2.0);
                if t > 1.0 { 2.0 - t } else { t }
            }
        }
    }
}

/// Float-array parameters accepted by [`Paint::set_parameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintParameter {
    /// `r g b a`
    Color,
    /// `x0 y0 x1 y1`
    LinearGradient,
    /// `cx cy fx fy r`
    RadialGradient,
    /// Groups of `offset r g b a`.
    ColorRampStops,
}

impl PaintParameter {
    fn check_arity(self, len: usize) -> GeometryResult<()> {
        let ok = match self {
            PaintParameter::Color | PaintParameter::LinearGradient => len == 4,
            PaintParameter::RadialGradient => len == 5,
            PaintParameter::ColorRampStops => len % 5 == 0,
        };
        if ok {
            Ok(())
        } else {
            Err(GeometryError::invalid(format!(
                "{:?} does not accept {} values",
                self, len
            )))
        }
    }
}

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Ramp used when no stops were supplied: black at 0, white at 1.
pub const DEFAULT_STOPS: [GradientStop; 2] = [
    GradientStop {
        offset: 0.0,
        color: Color::BLACK,
    },
    GradientStop {
        offset: 1.0,
        color: Color::WHITE,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    paint_type: PaintType,
    color: Color,
    linear: [f32; 4],
    radial: [f32; 5],
    stops: Vec<GradientStop>,
    spread: SpreadMode,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            paint_type: PaintType::Color,
            color: Color::BLACK,
            linear: [0.0, 0.0, 1.0, 0.0],
            radial: [0.0, 0.0, 0.0, 0.0, 1.0],
            stops: Vec::new(),
            spread: SpreadMode::Pad,
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solid(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn paint_type(&self) -> PaintType {
        self.paint_type
    }

    pub fn set_paint_type(&mut self, paint_type: PaintType) {
        self.paint_type = paint_type;
    }

    pub fn spread(&self) -> SpreadMode {
        self.spread
    }

    pub fn set_spread(&mut self, spread: SpreadMode) {
        self.spread = spread;
    }

    /// The color as written, unclamped.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Stops sorted by ascending offset, equal offsets in write order.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Replace the stop list.
    ///
    /// Stops whose offset is outside `[0, 1]` or NaN are dropped.
    pub fn set_stops(&mut self, stops: impl IntoIterator<Item = GradientStop>) {
        let mut kept: Vec<GradientStop> = Vec::new();
        for stop in stops {
            if (0.0..=1.0).contains(&stop.offset) {
                kept.push(stop);
            } else {
                tracing::warn!(offset = stop.offset, "dropping gradient stop outside [0, 1]");
            }
        }
        // Stable: the last stop written at an offset stays last.
        kept.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        self.stops = kept;
    }

    /// Set a float-array parameter.
    ///
    /// Fails with `InvalidArgument` when `values` has the wrong length for
    /// `parameter`; the paint is unchanged in that case.
    pub fn set_parameter(&mut self, parameter: PaintParameter, values: &[f32]) -> GeometryResult<()> {
        parameter.check_arity(values.len())?;
        match parameter {
            PaintParameter::Color => {
                self.color = Color::rgba(values[0], values[1], values[2], values[3]);
            }
            PaintParameter::LinearGradient => {
                self.linear.copy_from_slice(values);
            }
            PaintParameter::RadialGradient => {
                self.radial.copy_from_slice(values);
            }
            PaintParameter::ColorRampStops => {
                let stops: Vec<GradientStop> = values
                    .chunks_exact(5)
                    .map(|v| GradientStop::new(v[0], Color::rgba(v[1], v[2], v[3], v[4])))
                    .collect();
                self.set_stops(stops);
            }
        }
        Ok(())
    }

    /// Read a float-array parameter back exactly as stored.
    pub fn parameter(&self, parameter: PaintParameter) -> Vec<f32> {
        match parameter {
            PaintParameter::Color => self.color.to_array().to_vec(),
            PaintParameter::LinearGradient => self.linear.to_vec(),
            PaintParameter::RadialGradient => self.radial.to_vec(),
            PaintParameter::ColorRampStops => self
                .stops
                .iter()
                .flat_map(|stop| {
                    let [r, g, b, a] = stop.color.to_array();
                    [stop.offset, r, g, b, a]
                })
                .collect(),
        }
    }

    /// Linear gradient endpoints `(start, end)`.
    pub fn linear_gradient(&self) -> (Vec2, Vec2) {
        let [x0, y0, x1, y1] = self.linear;
        (Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    /// Radial gradient `(center, focal point, radius)`.
    pub fn radial_gradient(&self) -> (Vec2, Vec2, f32) {
        let [cx, cy, fx, fy, r] = self.radial;
        (Vec2::new(cx, cy), Vec2::new(fx, fy), r)
    }

    /// Color of the ramp at `offset` after applying the spread mode.
    ///
    /// A stop sitting exactly at the offset is returned as is; when several
    /// share the offset the last one written wins. Otherwise the two
    /// neighbouring stops are interpolated.
    pub fn sample_ramp(&self, offset: f32) -> Color {
        let stops = if self.stops.is_empty() {
            &DEFAULT_STOPS[..]
        } else {
            &self.stops[..]
        };
        ramp_color(stops, self.spread.apply(offset))
    }

    /// Gradient offset of a point in paint space, before spreading.
    ///
    /// `None` for solid paints and degenerate gradients.
    pub fn offset_at(&self, point: Vec2) -> Option<f32> {
        match self.paint_type {
            PaintType::Color => None,
            PaintType::LinearGradient => {
                let (start, end) = self.linear_gradient();
                let d = end - start;
                let len_sq = d.length_squared();
                (len_sq > f32::EPSILON).then(|| (point - start).dot(d) / len_sq)
            }
            PaintType::RadialGradient => {
                let (center, focal, radius) = self.radial_gradient();
                radial_offset(center, focal, radius, point)
            }
        }
    }

    /// Color of the paint at a point in paint space.
    ///
    /// Degenerate gradients paint with the last stop.
    pub fn sample_at(&self, point: Vec2) -> Color {
        if self.paint_type == PaintType::Color {
            return self.color;
        }
        match self.offset_at(point) {
            Some(offset) => self.sample_ramp(offset),
            None => {
                let stops = if self.stops.is_empty() {
                    &DEFAULT_STOPS[..]
                } else {
                    &self.stops[..]
                };
                stops.last().map(|stop| stop.color).unwrap_or(Color::BLACK)
            }
        }
    }

    /// Clamped, renderer-facing snapshot of this paint.
    pub fn resolve(&self) -> ResolvedPaint {
        let ramp = || -> Vec<GradientStop> {
            let stops = if self.stops.is_empty() {
                &DEFAULT_STOPS[..]
            } else {
                &self.stops[..]
            };
            stops
                .iter()
                .map(|stop| GradientStop::new(stop.offset, stop.color.clamped()))
                .collect()
        };
        match self.paint_type {
            PaintType::Color => ResolvedPaint::Solid(self.color.clamped()),
            PaintType::LinearGradient => {
                let (start, end) = self.linear_gradient();
                ResolvedPaint::Linear {
                    start,
                    end,
                    stops: ramp(),
                    spread: self.spread,
                }
            }
            PaintType::RadialGradient => {
                let (center, focal, radius) = self.radial_gradient();
                ResolvedPaint::Radial {
                    center,
                    focal,
                    radius,
                    stops: ramp(),
                    spread: self.spread,
                }
            }
        }
    }
}

/// Paint as handed to a renderer: colors clamped, default ramp filled in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPaint {
    Solid(Color),
    Linear {
        start: Vec2,
        end: Vec2,
        stops: Vec<GradientStop>,
        spread: SpreadMode,
    },
    Radial {
        center: Vec2,
        focal: Vec2,
        radius: f32,
        stops: Vec<GradientStop>,
        spread: SpreadMode,
    },
}

impl ResolvedPaint {
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            ResolvedPaint::Solid(color) => Some(*color),
            _ => None,
        }
    }
}

fn ramp_color(stops: &[GradientStop], t: f32) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::BLACK;
    };
    if t.is_nan() {
        return first.color;
    }
    if let Some(exact) = stops.iter().rev().find(|stop| stop.offset == t) {
        return exact.color;
    }
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }

    // First stop strictly above t; the one before it is strictly below since
    // exact matches were handled.
    let upper = stops.partition_point(|stop| stop.offset <= t);
    let (lo, hi) = (stops[upper - 1], stops[upper]);
    let span = hi.offset - lo.offset;
    if span <= f32::EPSILON {
        return hi.color;
    }
    lo.color.lerp(hi.color, (t - lo.offset) / span)
}

/// Offset of `point` on a focal radial gradient.
///
/// A focal point outside the circle is pulled just inside it so every ray
/// from the focal point leaves the circle exactly once.
fn radial_offset(center: Vec2, focal: Vec2, radius: f32, point: Vec2) -> Option<f32> {
    if radius <= 0.0 || !radius.is_finite() {
        return None;
    }
    let mut f = focal - center;
    let max_focal = radius * 0.999;
    if f.length() > max_focal {
        f = f.normalize_or_zero() * max_focal;
    }
    let d = point - (center + f);
    let r_sq = radius * radius;
    let denom = r_sq - f.length_squared();
    let cross = d.x * f.y - d.y * f.x;
    let root = (r_sq * d.length_squared() - cross * cross).max(0.0).sqrt();
    Some((d.dot(f) + root) / denom)
}
