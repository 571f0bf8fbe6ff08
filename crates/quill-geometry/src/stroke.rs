//! Stroke attributes.
//!
//! Defines how paths are stroked: width, caps, joins, miter limit and dashes.

use lyon::lyon_tessellation::StrokeOptions;

/// Line cap style for stroke endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    /// Flat cap ending at the endpoint.
    #[default]
    Butt,
    /// Round cap extending beyond the endpoint.
    Round,
    /// Square cap extending beyond the endpoint.
    Square,
}

/// Line join style for stroke corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    /// Miter join (sharp corner).
    #[default]
    Miter,
    /// Round join (rounded corner).
    Round,
    /// Bevel join (flat corner).
    Bevel,
}

/// Dash pattern for stroked lines.
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    /// Alternating on/off lengths.
    pub pattern: Vec<f32>,
    /// Offset into the pattern to start.
    pub phase: f32,
}

impl DashPattern {
    pub fn new(pattern: Vec<f32>, phase: f32) -> Self {
        Self { pattern, phase }
    }

    pub fn dashed(dash: f32, gap: f32) -> Self {
        Self {
            pattern: vec![dash, gap],
            phase: 0.0,
        }
    }
}

/// Stroke state read by every stroked draw.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeAttributes {
    /// Stroke width in user units
    pub width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Miter length limit, in multiples of the half width
    pub miter_limit: f32,
    pub dash: Option<DashPattern>,
}

impl Default for StrokeAttributes {
    fn default() -> Self {
        Self {
            width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 4.0,
            dash: None,
        }
    }
}

impl StrokeAttributes {
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    /// Limits below 1 are raised to 1.
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit.max(1.0);
        self
    }

    pub fn with_dash(mut self, pattern: DashPattern) -> Self {
        self.dash = Some(pattern);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }

    /// Options for a lyon stroke tessellator at the given flattening tolerance.
    ///
    /// Dashes are not expressed by lyon options and must be applied to the
    /// path beforehand.
    pub fn to_lyon_options(&self, tolerance: f32) -> StrokeOptions {
        StrokeOptions::default()
            .with_tolerance(tolerance)
            .with_line_width(self.width)
            .with_line_cap(match self.line_cap {
                LineCap::Butt => lyon::lyon_tessellation::LineCap::Butt,
                LineCap::Round => lyon::lyon_tessellation::LineCap::Round,
                LineCap::Square => lyon::lyon_tessellation::LineCap::Square,
            })
            .with_line_join(match self.line_join {
                LineJoin::Miter => lyon::lyon_tessellation::LineJoin::Miter,
                LineJoin::Round => lyon::lyon_tessellation::LineJoin::Round,
                LineJoin::Bevel => lyon::lyon_tessellation::LineJoin::Bevel,
            })
            .with_miter_limit(self.miter_limit.max(StrokeOptions::MINIMUM_MITER_LIMIT))
    }
}
