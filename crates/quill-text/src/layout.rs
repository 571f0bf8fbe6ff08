//! Single-line glyph placement.

use crate::font::BitmapFont;
use quill_core::geometry::Rect;
use std::str::Chars;

/// A placed glyph: where to read it from the atlas and where to draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub code: u32,
    pub page: i32,
    pub source: Rect<i32>,
    pub dest: Rect<f32>,
}

/// Lazy glyph layout over a string.
///
/// Cloning the iterator restarts from the clone point, so a caller can measure
/// a run and then place it without parsing twice. Characters the font has no
/// glyph for are skipped without moving the pen or resetting kerning.
#[derive(Debug, Clone)]
pub struct TextLayout<'a> {
    font: &'a BitmapFont,
    chars: Chars<'a>,
    pen_x: f32,
    origin_y: f32,
    previous: Option<u32>,
}

impl<'a> TextLayout<'a> {
    pub fn new(font: &'a BitmapFont, text: &'a str, origin_x: f32, origin_y: f32) -> Self {
        Self {
            font,
            chars: text.chars(),
            pen_x: origin_x,
            origin_y,
            previous: None,
        }
    }

    /// Pen position after the glyphs consumed so far.
    pub fn pen_x(&self) -> f32 {
        self.pen_x
    }
}

impl Iterator for TextLayout<'_> {
    type Item = GlyphQuad;

    fn next(&mut self) -> Option<GlyphQuad> {
        for ch in self.chars.by_ref() {
            let code = ch as u32;
            let Some(glyph) = self.font.glyph(code) else {
                tracing::trace!(code, "no glyph, skipping");
                continue;
            };

            if let Some(previous) = self.previous {
                self.pen_x += self.font.kerning(previous, code) as f32;
            }
            let dest = Rect::new(
                self.pen_x + glyph.x_offset as f32,
                self.origin_y + glyph.y_offset as f32,
                glyph.width as f32,
                glyph.height as f32,
            );
            self.pen_x += glyph.x_advance as f32;
            self.previous = Some(code);

            return Some(GlyphQuad {
                code,
                page: glyph.page,
                source: glyph.source_rect(),
                dest,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.chars.size_hint().1)
    }
}

impl std::iter::FusedIterator for TextLayout<'_> {}

#[cfg(test)]
mod tests {
    use crate::font::{BitmapFont, Glyph, KerningPair};

    fn font() -> BitmapFont {
        let mut font = BitmapFont::default();
        for (id, x) in [(65, 0), (86, 20)] {
            font.insert_glyph(Glyph {
                id,
                x,
                y: 0,
                width: 20,
                height: 24,
                x_offset: 1,
                y_offset: 2,
                x_advance: 22,
                page: 0,
                channel: 15,
            });
        }
        font.insert_kerning(KerningPair {
            first: 65,
            second: 86,
            amount: -3,
        });
        font
    }

    #[test]
    fn test_offsets_applied() {
        let font = font();
        let quads: Vec<_> = font.layout("A", 10.0, 5.0).collect();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].dest.x, 11.0);
        assert_eq!(quads[0].dest.y, 7.0);
        assert_eq!(quads[0].source.width, 20);
    }

    #[test]
    fn test_missing_glyph_keeps_kerning_chain() {
        let font = font();
        let quads: Vec<_> = font.layout("A?V", 0.0, 0.0).collect();
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[1].dest.x - quads[0].dest.x, 19.0);
    }

    #[test]
    fn test_clone_restarts() {
        let font = font();
        let layout = font.layout("AVA", 0.0, 0.0);
        let first: Vec<_> = layout.clone().collect();
        let second: Vec<_> = layout.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_measure() {
        let font = font();
        assert_eq!(font.measure(""), 0.0);
        assert_eq!(font.measure("A"), 22.0);
        assert_eq!(font.measure("AV"), 41.0);
    }
}
