//! Quill Text - bitmap font loading and glyph layout
//!
//! Reads the plain-text bitmap font descriptor format (`info`, `common`,
//! `page`, `chars`, `char` and `kerning` records) and places glyphs along a
//! single line.
//!
//! ```
//! use quill_text::BitmapFont;
//!
//! let parsed = BitmapFont::parse(
//!     "common lineHeight=32 base=26 scaleW=256 scaleH=256\n\
//!      char id=65 x=0 y=0 width=20 height=24 xoffset=0 yoffset=0 xadvance=22\n",
//! );
//! assert!(parsed.is_clean());
//! assert_eq!(parsed.font.measure("AA"), 44.0);
//! ```

mod error;
mod font;
mod layout;
mod parser;

pub use error::*;
pub use font::*;
pub use layout::*;
pub use parser::{ParsedFont, parse};
