use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::PanelResult, format::pixel_format::PixelFormat,
    surface::framebuffer::FrameBuffer,
};

/// Expand a stored pixel value to opaque RGBA8.
///
/// Monochrome maps to black/white, gray levels are scaled to the full 0..=255 range, and RGB565
/// channels are widened by replicating their high bits.
pub fn expand_to_rgba(format: PixelFormat, c: u32) -> [u8; 4] {
    let c = c & format.mask();
    let gray = match format.bits_per_pixel() {
        1 => c * 255,
        2 => c * 85,
        4 => c * 17,
        8 => c,
        _ => {
            let r = (c >> 11) & 0x1F;
            let g = (c >> 5) & 0x3F;
            let b = c & 0x1F;
            return [
                ((r << 3) | (r >> 2)) as u8,
                ((g << 2) | (g >> 4)) as u8,
                ((b << 3) | (b >> 2)) as u8,
                255,
            ];
        }
    };
    let v = gray as u8;
    [v, v, v, 255]
}

impl<B: AsRef<[u8]>> FrameBuffer<B> {
    /// Render the visible pixels as an RGBA8 image (stride padding is not included).
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let format = self.format();
        image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(expand_to_rgba(format, self.pixel(x as i32, y as i32)))
        })
    }

    #[tracing::instrument(level = "debug", skip(self), fields(format = ?self.format()))]
    pub fn save_png(&self, path: &Path) -> PanelResult<()> {
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/rgba.rs"]
mod tests;
