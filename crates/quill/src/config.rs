//! Context configuration.

use quill_geometry::{Color, FillRule};

/// Settings a [`Context`](crate::Context) starts from.
///
/// # Example
///
/// ```
/// use quill::{Color, ContextDescriptor, FillRule};
///
/// let desc = ContextDescriptor::new()
///     .with_name("hud")
///     .with_surface_size(1280, 720)
///     .with_fill_rule(FillRule::NonZero)
///     .with_clear_color(Color::WHITE);
/// assert_eq!(desc.surface_size, (1280, 720));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ContextDescriptor {
    /// Label used in log output.
    pub name: Option<String>,
    /// Surface width and height in pixels. Clears are clipped to it.
    pub surface_size: (u32, u32),
    /// Initial stroke width.
    pub stroke_width: f32,
    pub fill_rule: FillRule,
    pub clear_color: Color,
    /// Number of paths whose interpreted geometry is kept between draws.
    pub geometry_cache_capacity: usize,
}

impl Default for ContextDescriptor {
    fn default() -> Self {
        Self {
            name: None,
            surface_size: (800, 600),
            stroke_width: 1.0,
            fill_rule: FillRule::default(),
            clear_color: Color::TRANSPARENT,
            geometry_cache_capacity: 256,
        }
    }
}

impl ContextDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_surface_size(mut self, width: u32, height: u32) -> Self {
        self.surface_size = (width, height);
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// A capacity of 0 disables caching.
    pub fn with_geometry_cache_capacity(mut self, capacity: usize) -> Self {
        self.geometry_cache_capacity = capacity;
        self
    }
}
