//! RGBA8 pixel storage.

use crate::{VgError, VgResult};

const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA8 image with tightly packed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Minimum byte length of a `height`-row buffer whose rows start `stride`
/// bytes apart and hold `width` pixels.
fn required_len(width: u32, height: u32, stride: usize) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    stride * (height as usize - 1) + width as usize * BYTES_PER_PIXEL
}

fn check_source(width: u32, height: u32, stride: usize, data: &[u8]) -> VgResult<()> {
    let row = width as usize * BYTES_PER_PIXEL;
    if stride < row {
        return Err(VgError::invalid(format!(
            "stride {} is shorter than a {} pixel row",
            stride, width
        )));
    }
    let needed = required_len(width, height, stride);
    if data.len() < needed {
        return Err(VgError::invalid(format!(
            "pixel buffer holds {} bytes, {} needed",
            data.len(),
            needed
        )));
    }
    Ok(())
}

impl Image {
    /// Fully transparent image.
    pub fn new(width: u32, height: u32) -> VgResult<Self> {
        if width == 0 || height == 0 {
            return Err(VgError::invalid(format!(
                "image extents must be positive, got {}x{}",
                width, height
            )));
        }
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| VgError::OutOfMemory { requested: len })?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Copy pixels from a buffer whose rows are `stride` bytes apart.
    pub fn from_rgba(width: u32, height: u32, stride: usize, data: &[u8]) -> VgResult<Self> {
        let mut image = Self::new(width, height)?;
        check_source(width, height, stride, data)?;
        image.copy_rows(0, 0, width, height, data, stride);
        Ok(image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between row starts.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y as usize * self.stride() + x as usize * BYTES_PER_PIXEL;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[start..start + BYTES_PER_PIXEL]);
        Some(out)
    }

    /// Write a `width x height` block whose top-left pixel lands at `(x, y)`.
    ///
    /// The block is clipped to the image; the part that falls outside is
    /// ignored. `data` is validated against the full block before clipping.
    pub fn sub_data(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        data: &[u8],
        stride: usize,
    ) -> VgResult<()> {
        check_source(width, height, stride, data)?;

        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            tracing::trace!(x, y, width, height, "sub data fully clipped");
            return Ok(());
        }

        // Skip the clipped-off rows and columns of the source.
        let skip_rows = (y0 - i64::from(y)) as usize;
        let skip_cols = (x0 - i64::from(x)) as usize;
        let offset = skip_rows * stride + skip_cols * BYTES_PER_PIXEL;
        self.copy_rows(
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
            &data[offset..],
            stride,
        );
        Ok(())
    }

    /// Caller guarantees the region is inside the image and `data` is long
    /// enough.
    fn copy_rows(&mut self, x: u32, y: u32, width: u32, height: u32, data: &[u8], stride: usize) {
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let dst_stride = self.stride();
        for row in 0..height as usize {
            let src = row * stride;
            let dst = (y as usize + row) * dst_stride + x as usize * BYTES_PER_PIXEL;
            self.pixels[dst..dst + row_bytes].copy_from_slice(&data[src..src + row_bytes]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> Vec<u8> {
        vec![value; width as usize * height as usize * 4]
    }

    #[test]
    fn test_new_is_transparent() {
        let image = Image::new(3, 2).unwrap();
        assert_eq!(image.stride(), 12);
        assert!(image.pixels().iter().all(|&b| b == 0));
        assert!(Image::new(0, 2).is_err());
    }

    #[test]
    fn test_from_rgba_with_padding() {
        // 2x2 image, 12-byte stride (4 bytes of padding per row)
        let data = [
            1, 1, 1, 1, 2, 2, 2, 2, 9, 9, 9, 9, //
            3, 3, 3, 3, 4, 4, 4, 4,
        ];
        let image = Image::from_rgba(2, 2, 12, &data).unwrap();
        assert_eq!(image.pixel(1, 0), Some([2; 4]));
        assert_eq!(image.pixel(0, 1), Some([3; 4]));
        assert_eq!(image.pixel(2, 0), None);
    }

    #[test]
    fn test_from_rgba_rejects_short_input() {
        assert!(Image::from_rgba(2, 2, 4, &solid(2, 2, 0)).is_err());
        assert!(Image::from_rgba(2, 2, 8, &solid(2, 1, 0)).is_err());
    }

    #[test]
    fn test_sub_data_clips() {
        let mut image = Image::new(4, 4).unwrap();
        let block = solid(3, 3, 7);
        image.sub_data(-1, 2, 3, 3, &block, 12).unwrap();

        assert_eq!(image.pixel(0, 2), Some([7; 4]));
        assert_eq!(image.pixel(1, 3), Some([7; 4]));
        assert_eq!(image.pixel(2, 2), Some([0; 4]));
        assert_eq!(image.pixel(0, 1), Some([0; 4]));
    }

    #[test]
    fn test_sub_data_outside_is_noop() {
        let mut image = Image::new(2, 2).unwrap();
        image.sub_data(5, 5, 1, 1, &[1, 2, 3, 4], 4).unwrap();
        assert!(image.pixels().iter().all(|&b| b == 0));
    }
}
