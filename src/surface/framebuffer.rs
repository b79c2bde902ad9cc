use crate::{
    foundation::{
        error::{PanelError, PanelResult},
        geom::Rect,
    },
    format::{codec::Layout, pixel_format::PixelFormat},
    surface::desc::FrameDesc,
};

/// A packed-pixel drawing surface over a caller-supplied byte buffer.
///
/// `B` is the backing storage: any `AsRef<[u8]>` can be read (sprite sheets, palettes, `&[u8]`
/// views of flash data), and drawing requires `AsMut<[u8]>` as well (`&mut [u8]`, `Vec<u8>`).
/// The buffer is never reallocated. Its byte layout is exactly what a display driver expects for
/// the configured [`PixelFormat`].
#[derive(Clone, Copy, Debug)]
pub struct FrameBuffer<B> {
    pub(crate) buf: B,
    pub(crate) desc: FrameDesc,
    pub(crate) layout: Layout,
}

impl FrameBuffer<Vec<u8>> {
    /// Allocate a zeroed buffer of exactly [`FrameDesc::byte_len`] bytes.
    pub fn zeroed(desc: FrameDesc) -> PanelResult<Self> {
        desc.validate()?;
        Self::from_desc(vec![0; desc.byte_len()], desc)
    }
}

impl<B: AsRef<[u8]>> FrameBuffer<B> {
    pub fn new(buf: B, width: u32, height: u32, format: PixelFormat) -> PanelResult<Self> {
        Self::from_desc(buf, FrameDesc::new(width, height, format))
    }

    pub fn with_stride(
        buf: B,
        width: u32,
        height: u32,
        format: PixelFormat,
        stride: u32,
    ) -> PanelResult<Self> {
        Self::from_desc(buf, FrameDesc::new(width, height, format).with_stride(stride))
    }

    #[tracing::instrument(level = "trace", skip(buf))]
    pub fn from_desc(buf: B, desc: FrameDesc) -> PanelResult<Self> {
        desc.validate()?;
        let need = desc.byte_len();
        let have = buf.as_ref().len();
        if have < need {
            return Err(PanelError::buffer_too_small(&desc, need, have));
        }

        let layout = Layout {
            fmt: desc.format.desc(),
            width: desc.width as usize,
            height: desc.height as usize,
            stride: desc.packed_stride() as usize,
        };
        Ok(Self { buf, desc, layout })
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    /// Addressing stride in pixels, rounded up to whole bytes for sub-byte horizontal formats.
    pub fn stride(&self) -> u32 {
        self.desc.packed_stride()
    }

    pub fn format(&self) -> PixelFormat {
        self.desc.format
    }

    pub fn desc(&self) -> FrameDesc {
        self.desc
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.desc.width as i32, self.desc.height as i32)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Borrow as a read-only framebuffer, e.g. to pass as a blit palette.
    pub fn as_view(&self) -> FrameBuffer<&[u8]> {
        FrameBuffer {
            buf: self.buf.as_ref(),
            desc: self.desc,
            layout: self.layout,
        }
    }

    pub(crate) fn coords(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.layout.width && y < self.layout.height).then_some((x, y))
    }

    /// Read the pixel at `(x, y)`; coordinates outside the buffer read as 0.
    pub fn pixel(&self, x: i32, y: i32) -> u32 {
        self.coords(x, y)
            .map_or(0, |(x, y)| self.layout.read(self.buf.as_ref(), x, y))
    }

    /// Same as [`FrameBuffer::pixel`].
    pub fn get_pixel(&self, x: i32, y: i32) -> u32 {
        self.pixel(x, y)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.buf.as_mut()
    }

    /// Write `c` (truncated to the format's bit depth) at `(x, y)`; out-of-range writes are
    /// ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, c: u32) {
        if let Some((x, y)) = self.coords(x, y) {
            self.layout.write(self.buf.as_mut(), x, y, c);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/framebuffer.rs"]
mod tests;
