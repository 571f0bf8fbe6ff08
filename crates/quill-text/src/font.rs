//! Bitmap font model.

use crate::error::{FontError, FontResult};
use crate::layout::TextLayout;
use crate::parser::{ParsedFont, parse};
use quill_core::alloc::HashMap;
use quill_core::geometry::Rect;
use std::path::Path;

/// One glyph cell in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    /// Character code. Negative ids (`-1` for the fallback glyph) are kept
    /// but never match a character.
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub x_advance: i32,
    /// Atlas page index.
    pub page: i32,
    /// Bitmask of atlas channels holding the glyph; 15 means all four.
    pub channel: i32,
}

impl Glyph {
    /// Atlas region of the glyph.
    pub fn source_rect(&self) -> Rect<i32> {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KerningPair {
    pub first: i32,
    pub second: i32,
    pub amount: i32,
}

/// Atlas image referenced by glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Page {
    pub id: i32,
    pub file: String,
}

/// A parsed bitmap font: metrics, glyph table and kerning table.
///
/// The atlas images named by [`pages`](Self::pages) are not loaded here.
#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    pub face: Option<String>,
    pub size: Option<i32>,
    pub line_height: i32,
    pub base: i32,
    pub scale_w: i32,
    pub scale_h: i32,
    /// Page count announced by the `common` record, if any.
    pub page_count: Option<i32>,
    pages: Vec<Page>,
    glyphs: HashMap<i32, Glyph>,
    kerning: HashMap<(i32, i32), i32>,
}

impl BitmapFont {
    /// Parse descriptor text. See [`parse`].
    pub fn parse(text: &str) -> ParsedFont {
        parse(text)
    }

    /// Read and parse a descriptor file.
    ///
    /// Only I/O failures fail the load; record errors are reported in the
    /// returned [`ParsedFont`].
    pub fn load(path: impl AsRef<Path>) -> FontResult<ParsedFont> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => FontError::FileNotFound(path.to_path_buf()),
            _ => FontError::from(err),
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loading bitmap font");
        Ok(parse(&text))
    }

    /// Glyph for a character code.
    pub fn glyph(&self, code: u32) -> Option<&Glyph> {
        i32::try_from(code).ok().and_then(|id| self.glyph_by_id(id))
    }

    /// Glyph by its raw descriptor id, including negative ids.
    pub fn glyph_by_id(&self, id: i32) -> Option<&Glyph> {
        self.glyphs.get(&id)
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.values()
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Kerning adjustment between two codes, 0 when none is defined.
    pub fn kerning(&self, first: u32, second: u32) -> i32 {
        match (i32::try_from(first), i32::try_from(second)) {
            (Ok(first), Ok(second)) => self.kerning.get(&(first, second)).copied().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn kerning_count(&self) -> usize {
        self.kerning.len()
    }

    /// Pages ordered by id.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the replaced glyph when the code was already present.
    pub fn insert_glyph(&mut self, glyph: Glyph) -> Option<Glyph> {
        self.glyphs.insert(glyph.id, glyph)
    }

    pub fn insert_kerning(&mut self, pair: KerningPair) {
        self.kerning.insert((pair.first, pair.second), pair.amount);
    }

    pub fn insert_page(&mut self, page: Page) {
        match self.pages.binary_search_by_key(&page.id, |p| p.id) {
            Ok(index) => self.pages[index] = page,
            Err(index) => self.pages.insert(index, page),
        }
    }

    /// Lay out `text` with its pen starting at `(origin_x, origin_y)`.
    pub fn layout<'a>(&'a self, text: &'a str, origin_x: f32, origin_y: f32) -> TextLayout<'a> {
        TextLayout::new(self, text, origin_x, origin_y)
    }

    /// Horizontal pen advance of `text`, kerning included.
    pub fn measure(&self, text: &str) -> f32 {
        let mut layout = self.layout(text, 0.0, 0.0);
        layout.by_ref().for_each(drop);
        layout.pen_x()
    }
}
