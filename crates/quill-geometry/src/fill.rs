//! Fill rules.
//!
//! Fill rules determine how to decide which areas are "inside" a path.

use lyon::lyon_tessellation::FillOptions;

/// Fill rule for determining interior of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Even-odd (parity) rule, the initial context state.
    ///
    /// A point is inside if the number of crossings is odd.
    #[default]
    EvenOdd,
    /// Non-zero winding rule.
    ///
    /// A point is inside if the winding number is non-zero.
    NonZero,
}

impl FillRule {
    /// Options for a lyon fill tessellator at the given flattening tolerance.
    pub fn to_lyon_options(self, tolerance: f32) -> FillOptions {
        FillOptions::default()
            .with_tolerance(tolerance)
            .with_fill_rule(match self {
                FillRule::EvenOdd => lyon::lyon_tessellation::FillRule::EvenOdd,
                FillRule::NonZero => lyon::lyon_tessellation::FillRule::NonZero,
            })
    }
}
