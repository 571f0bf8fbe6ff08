use quill_text::{BitmapFont, FontError, ParseErrorKind};
use std::io::Write;

const FONT: &str = r#"info face="Quill Sans" size=32 bold=0 italic=0 padding=0,0,0,0 spacing=1,1
common lineHeight=32 base=26 scaleW=256 scaleH=256 pages=1 packed=0
page id=0 file="quill sans_0.png"
chars count=2
char id=65 x=0 y=0 width=20 height=24 xoffset=0 yoffset=2 xadvance=22 page=0 chnl=15
char id=86 x=20 y=0 width=20 height=24 xoffset=0 yoffset=2 xadvance=21 page=0 chnl=15
kernings count=1
kerning first=65 second=86 amount=-3
"#;

#[test]
fn test_parses_full_descriptor() {
    let parsed = BitmapFont::parse(FONT);
    assert!(parsed.is_clean(), "{:?}", parsed.errors);

    let font = parsed.font;
    assert_eq!(font.face.as_deref(), Some("Quill Sans"));
    assert_eq!(font.size, Some(32));
    assert_eq!(font.line_height, 32);
    assert_eq!(font.base, 26);
    assert_eq!((font.scale_w, font.scale_h), (256, 256));
    assert_eq!(font.page_count, Some(1));
    assert_eq!(font.pages()[0].file, "quill sans_0.png");
    assert_eq!(font.glyph_count(), 2);
    assert_eq!(font.kerning(65, 86), -3);
}

#[test]
fn test_single_glyph_quad() {
    let font = BitmapFont::parse(FONT).font;
    let mut layout = font.layout("A", 0.0, 0.0);
    let quads: Vec<_> = layout.by_ref().collect();

    assert_eq!(quads.len(), 1);
    let quad = quads[0];
    assert_eq!(quad.code, 65);
    assert_eq!((quad.source.x, quad.source.y), (0, 0));
    assert_eq!((quad.source.width, quad.source.height), (20, 24));
    assert_eq!((quad.dest.x, quad.dest.y), (0.0, 2.0));
    assert_eq!(layout.pen_x(), 22.0);
}

#[test]
fn test_kerning_between_glyphs() {
    let font = BitmapFont::parse(FONT).font;
    let quads: Vec<_> = font.layout("AV", 0.0, 0.0).collect();
    assert_eq!(quads[1].dest.x - quads[0].dest.x, 19.0);
    assert_eq!(font.measure("AV"), 40.0);
}

#[test]
fn test_bad_record_does_not_stop_parsing() {
    let text = "char id=65 x=0\n\
                char id=66 x=0 y=0 width=8 height=8 xoffset=0 yoffset=0 xadvance=9\n";
    let parsed = BitmapFont::parse(text);

    assert_eq!(parsed.errors.len(), 1);
    let error = &parsed.errors[0];
    assert_eq!(error.line, 1);
    assert_eq!(error.record, "char");
    assert_eq!(error.kind, ParseErrorKind::MissingKey("y"));
    assert!(error.to_string().starts_with("line 1:"));

    assert!(parsed.font.glyph(65).is_none());
    assert_eq!(parsed.font.glyph(66).map(|g| g.x_advance), Some(9));
}

#[test]
fn test_duplicate_glyph_later_wins() {
    let text = "char id=65 x=0 y=0 width=8 height=8 xoffset=0 yoffset=0 xadvance=9\n\
                char id=65 x=8 y=0 width=8 height=8 xoffset=0 yoffset=0 xadvance=11\n";
    let parsed = BitmapFont::parse(text);
    assert!(parsed.is_clean());
    assert_eq!(parsed.font.glyph(65).map(|g| (g.x, g.x_advance)), Some((8, 11)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FONT.as_bytes()).unwrap();

    let parsed = BitmapFont::load(file.path()).unwrap();
    assert!(parsed.is_clean());
    assert_eq!(parsed.font.glyph_count(), 2);
}

#[test]
fn test_load_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = BitmapFont::load(dir.path().join("missing.fnt"));
    assert!(matches!(result, Err(FontError::FileNotFound(_))));
}
