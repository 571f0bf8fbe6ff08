use super::Context;
use crate::{FontHandle, HandleKind, Image, ImageHandle, VgError, VgResult};
use quill_text::{BitmapFont, ParseError};
use std::path::Path;

/// A bitmap font bound to the image holding its glyph atlas.
///
/// The atlas is referenced, not owned: destroying the image leaves the font
/// in place, and drawing text with it then fails with an invalid image handle.
#[derive(Debug, Clone)]
pub struct Font {
    bitmap: BitmapFont,
    atlas: ImageHandle,
}

impl Font {
    pub fn bitmap(&self) -> &BitmapFont {
        &self.bitmap
    }

    pub fn atlas(&self) -> ImageHandle {
        self.atlas
    }
}

impl Context {
    // ====================
    // Images
    // ====================

    /// Fully transparent image.
    pub fn create_image(&mut self, width: u32, height: u32) -> VgResult<ImageHandle> {
        let image = Image::new(width, height)?;
        Ok(self.insert_image(image))
    }

    /// Image copied from RGBA8 rows `stride` bytes apart.
    pub fn create_image_from_rgba(
        &mut self,
        width: u32,
        height: u32,
        stride: usize,
        pixels: &[u8],
    ) -> VgResult<ImageHandle> {
        let image = Image::from_rgba(width, height, stride, pixels)?;
        Ok(self.insert_image(image))
    }

    fn insert_image(&mut self, image: Image) -> ImageHandle {
        let (width, height) = (image.width(), image.height());
        let handle = ImageHandle(self.images.push(image));
        tracing::debug!(image = handle.to_bits(), width, height, "created image");
        handle
    }

    /// Write a block of pixels, clipped to the image.
    #[allow(clippy::too_many_arguments)]
    pub fn image_sub_data(
        &mut self,
        handle: ImageHandle,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        data: &[u8],
        stride: usize,
    ) -> VgResult<()> {
        self.images
            .get_mut(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Image))?
            .sub_data(x, y, width, height, data, stride)
    }

    pub fn image(&self, handle: ImageHandle) -> VgResult<&Image> {
        self.images
            .get(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Image))
    }

    pub fn destroy_image(&mut self, handle: ImageHandle) -> VgResult<()> {
        self.images
            .remove(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Image))?;
        tracing::debug!(image = handle.to_bits(), "destroyed image");
        Ok(())
    }

    // ====================
    // Fonts
    // ====================

    /// Register a parsed font with its atlas image.
    pub fn create_font(&mut self, bitmap: BitmapFont, atlas: ImageHandle) -> VgResult<FontHandle> {
        self.image(atlas)?;
        let glyphs = bitmap.glyph_count();
        let handle = FontHandle(self.fonts.push(Font { bitmap, atlas }));
        tracing::debug!(font = handle.to_bits(), glyphs, "created font");
        Ok(handle)
    }

    /// Parse descriptor text and register the result.
    ///
    /// Records that failed to parse are returned alongside the handle; the
    /// font holds everything that did parse.
    pub fn create_font_from_str(
        &mut self,
        text: &str,
        atlas: ImageHandle,
    ) -> VgResult<(FontHandle, Vec<ParseError>)> {
        self.image(atlas)?;
        let parsed = BitmapFont::parse(text);
        let handle = self.create_font(parsed.font, atlas)?;
        Ok((handle, parsed.errors))
    }

    /// Read a descriptor file and register the result. I/O failures fail the
    /// whole load.
    pub fn load_font(
        &mut self,
        path: impl AsRef<Path>,
        atlas: ImageHandle,
    ) -> VgResult<(FontHandle, Vec<ParseError>)> {
        self.image(atlas)?;
        let parsed = BitmapFont::load(path)?;
        let handle = self.create_font(parsed.font, atlas)?;
        Ok((handle, parsed.errors))
    }

    pub fn font(&self, handle: FontHandle) -> VgResult<&Font> {
        self.fonts
            .get(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Font))
    }

    pub fn destroy_font(&mut self, handle: FontHandle) -> VgResult<()> {
        self.fonts
            .remove(handle.0)
            .ok_or(VgError::InvalidHandle(HandleKind::Font))?;
        tracing::debug!(font = handle.to_bits(), "destroyed font");
        Ok(())
    }

    /// Pen advance of `text` in font units, kerning included.
    pub fn measure_text(&self, handle: FontHandle, text: &str) -> VgResult<f32> {
        Ok(self.font(handle)?.bitmap.measure(text))
    }
}
