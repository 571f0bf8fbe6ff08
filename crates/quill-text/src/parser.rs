//! Reader for the plain-text bitmap font descriptor.
//!
//! Every line is `recordType key=value key=value ...`. Values may be wrapped
//! in double quotes, in which case they can contain spaces. Keys appear in any
//! order and unknown keys or record types are skipped.

use crate::error::{ParseError, ParseErrorKind};
use crate::font::{BitmapFont, Glyph, KerningPair, Page};
use quill_core::profiling::profile_function;
use std::str::FromStr;

/// Outcome of parsing a descriptor: the font assembled from every record that
/// parsed, plus one error per record that did not.
#[derive(Debug, Clone, Default)]
pub struct ParsedFont {
    pub font: BitmapFont,
    pub errors: Vec<ParseError>,
}

impl ParsedFont {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Splits one line into its record type and key/value pairs.
#[derive(Debug, Clone)]
struct Tokenizer<'a> {
    rest: &'a str,
}

impl<'a> Tokenizer<'a> {
    fn new(line: &'a str) -> (Option<&'a str>, Self) {
        let line = line.trim_start();
        let end = line.find(char::is_whitespace).unwrap_or(line.len());
        let record = &line[..end];
        let tokens = Self { rest: &line[end..] };
        ((!record.is_empty()).then_some(record), tokens)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.rest = self.rest.trim_start();
            if self.rest.is_empty() {
                return None;
            }

            let key_end = self
                .rest
                .find(|c: char| c == '=' || c.is_whitespace())
                .unwrap_or(self.rest.len());
            let key = &self.rest[..key_end];
            let after_key = &self.rest[key_end..];

            // Bare words without '=' carry no data.
            let Some(after_eq) = after_key.strip_prefix('=') else {
                self.rest = after_key;
                continue;
            };

            let value;
            if let Some(quoted) = after_eq.strip_prefix('"') {
                let close = quoted.find('"').unwrap_or(quoted.len());
                value = &quoted[..close];
                self.rest = quoted.get(close + 1..).unwrap_or("");
            } else {
                let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                value = &after_eq[..end];
                self.rest = &after_eq[end..];
            }
            return Some((key, value));
        }
    }
}

/// Key/value pairs of one record with typed accessors.
struct Record<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Record<'a> {
    fn get(&self, key: &str) -> Option<&'a str> {
        // Last occurrence wins, the same as a duplicate record.
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    fn optional<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ParseErrorKind> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| ParseErrorKind::InvalidInteger {
                    key,
                    value: value.to_string(),
                }),
        }
    }

    fn required<T: FromStr>(&self, key: &'static str) -> Result<T, ParseErrorKind> {
        self.optional(key)?.ok_or(ParseErrorKind::MissingKey(key))
    }
}

enum Parsed {
    Info {
        face: Option<String>,
        size: Option<i32>,
    },
    Common {
        line_height: i32,
        base: i32,
        scale_w: i32,
        scale_h: i32,
        pages: Option<i32>,
    },
    Page(Page),
    Chars { count: Option<i32> },
    Char(Glyph),
    Kerning(KerningPair),
}

/// `Ok(None)` for record types this reader does not know.
fn parse_record(kind: &str, record: &Record<'_>) -> Result<Option<Parsed>, ParseErrorKind> {
    let parsed = match kind {
        "info" => Parsed::Info {
            face: record.get("face").map(str::to_string),
            size: record.optional("size")?,
        },
        "common" => Parsed::Common {
            line_height: record.required("lineHeight")?,
            base: record.required("base")?,
            scale_w: record.required("scaleW")?,
            scale_h: record.required("scaleH")?,
            pages: record.optional("pages")?,
        },
        "page" => Parsed::Page(Page {
            id: record.required("id")?,
            file: record
                .get("file")
                .ok_or(ParseErrorKind::MissingKey("file"))?
                .to_string(),
        }),
        "chars" => Parsed::Chars {
            count: record.optional("count")?,
        },
        "char" => Parsed::Char(Glyph {
            id: record.required("id")?,
            x: record.required("x")?,
            y: record.required("y")?,
            width: record.required("width")?,
            height: record.required("height")?,
            x_offset: record.required("xoffset")?,
            y_offset: record.required("yoffset")?,
            x_advance: record.required("xadvance")?,
            page: record.optional("page")?.unwrap_or(0),
            channel: record.optional("chnl")?.unwrap_or(15),
        }),
        "kerning" => Parsed::Kerning(KerningPair {
            first: record.required("first")?,
            second: record.required("second")?,
            amount: record.required("amount")?,
        }),
        _ => return Ok(None),
    };
    Ok(Some(parsed))
}

/// Parse a descriptor. Never fails as a whole: rejected records are listed in
/// [`ParsedFont::errors`] and skipped.
pub fn parse(text: &str) -> ParsedFont {
    profile_function!();
    let mut font = BitmapFont::default();
    let mut errors = Vec::new();
    let mut expected_chars = None;

    for (index, line) in text.lines().enumerate() {
        let (Some(kind), tokens) = Tokenizer::new(line) else {
            continue;
        };
        let record = Record {
            pairs: tokens.collect(),
        };
        let result = match parse_record(kind, &record) {
            Ok(Some(parsed)) => Ok(parsed),
            Ok(None) => {
                tracing::trace!(line = index + 1, record = kind, "skipping unknown record");
                continue;
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(Parsed::Info { face, size }) => {
                font.face = face;
                font.size = size;
            }
            Ok(Parsed::Common {
                line_height,
                base,
                scale_w,
                scale_h,
                pages,
            }) => {
                font.line_height = line_height;
                font.base = base;
                font.scale_w = scale_w;
                font.scale_h = scale_h;
                font.page_count = pages;
            }
            Ok(Parsed::Page(page)) => font.insert_page(page),
            Ok(Parsed::Chars { count }) => expected_chars = count,
            Ok(Parsed::Char(glyph)) => {
                let id = glyph.id;
                if font.insert_glyph(glyph).is_some() {
                    tracing::debug!(line = index + 1, id, "duplicate glyph replaces earlier one");
                }
            }
            Ok(Parsed::Kerning(pair)) => font.insert_kerning(pair),
            Err(kind_err) => {
                let error = ParseError {
                    line: index + 1,
                    record: kind.to_string(),
                    kind: kind_err,
                };
                tracing::warn!("{}", error);
                errors.push(error);
            }
        }
    }

    if let Some(expected) = expected_chars
        && usize::try_from(expected).ok() != Some(font.glyph_count())
    {
        tracing::debug!(
            expected,
            parsed = font.glyph_count(),
            "glyph count differs from chars record"
        );
    }
    tracing::debug!(
        glyphs = font.glyph_count(),
        kerning_pairs = font.kerning_count(),
        errors = errors.len(),
        "parsed bitmap font"
    );

    ParsedFont { font, errors }
}
