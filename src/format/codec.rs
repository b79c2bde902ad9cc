use crate::{
    foundation::geom::Span,
    format::{
        bits,
        pixel_format::{BitOrder, FormatDesc, Plane},
    },
};

/// Addressing codec for one framebuffer geometry.
///
/// Built once per framebuffer from the format descriptor; every accessor below is plain
/// arithmetic over `(bits_per_pixel, order, plane, stride)` with no per-format branching beyond
/// the byte-aligned (8/16 bpp) shortcuts. Coordinates handed to these methods are already clipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) fmt: FormatDesc,
    pub(crate) width: usize,
    pub(crate) height: usize,
    /// Packed stride: pixels per row for horizontal formats (a whole number of bytes), bytes per
    /// 8-row band for vertical formats.
    pub(crate) stride: usize,
}

impl Layout {
    pub(crate) fn bpp(&self) -> usize {
        self.fmt.bits_per_pixel as usize
    }

    pub(crate) fn mask(&self) -> u32 {
        self.fmt.mask()
    }

    pub(crate) fn is_vertical(&self) -> bool {
        self.fmt.plane == Plane::Vertical
    }

    /// First byte of row `y` (horizontal formats).
    pub(crate) fn row_start(&self, y: usize) -> usize {
        y * self.stride * self.bpp() / 8
    }

    /// Number of 8-row bands (vertical formats).
    pub(crate) fn bands(&self) -> usize {
        self.height.div_ceil(8)
    }

    /// Byte index and in-byte shift of pixel `(x, y)`.
    pub(crate) fn locate(&self, x: usize, y: usize) -> (usize, u32) {
        if self.is_vertical() {
            let bit = (y & 7) as u32;
            let shift = match self.fmt.order {
                BitOrder::LsbFirst => bit,
                BitOrder::MsbFirst => 7 - bit,
            };
            return ((y >> 3) * self.stride + x, shift);
        }

        let bpp = self.bpp();
        let pos = (y * self.stride + x) * bpp;
        if bpp >= 8 {
            return (pos / 8, 0);
        }
        let off = pos % 8;
        let shift = match self.fmt.order {
            BitOrder::MsbFirst => 8 - bpp - off,
            BitOrder::LsbFirst => off,
        };
        (pos / 8, shift as u32)
    }

    fn word_bytes(&self, c: u32) -> [u8; 2] {
        match self.fmt.order {
            BitOrder::LsbFirst => (c as u16).to_le_bytes(),
            BitOrder::MsbFirst => (c as u16).to_be_bytes(),
        }
    }

    pub(crate) fn read_word(&self, bytes: &[u8]) -> u32 {
        let pair = [bytes[0], bytes[1]];
        u32::from(match self.fmt.order {
            BitOrder::LsbFirst => u16::from_le_bytes(pair),
            BitOrder::MsbFirst => u16::from_be_bytes(pair),
        })
    }

    pub(crate) fn read(&self, buf: &[u8], x: usize, y: usize) -> u32 {
        let (i, shift) = self.locate(x, y);
        match self.bpp() {
            16 => self.read_word(&buf[i..i + 2]),
            8 => u32::from(buf[i]),
            _ => (u32::from(buf[i]) >> shift) & self.mask(),
        }
    }

    pub(crate) fn write(&self, buf: &mut [u8], x: usize, y: usize, c: u32) {
        let c = c & self.mask();
        let (i, shift) = self.locate(x, y);
        match self.bpp() {
            16 => buf[i..i + 2].copy_from_slice(&self.word_bytes(c)),
            8 => buf[i] = c as u8,
            _ => {
                let m = (self.mask() << shift) as u8;
                buf[i] = (buf[i] & !m) | ((c << shift) as u8 & m);
            }
        }
    }

    /// Horizontal run of `w` pixels starting at `(x, y)`.
    pub(crate) fn hline(&self, buf: &mut [u8], x: usize, y: usize, w: usize, c: u32) {
        let c = c & self.mask();
        if self.is_vertical() {
            let (start, shift) = self.locate(x, y);
            let bit = 1u8 << shift;
            let run = &mut buf[start..start + w];
            if c != 0 {
                run.iter_mut().for_each(|b| *b |= bit);
            } else {
                run.iter_mut().for_each(|b| *b &= !bit);
            }
            return;
        }

        match self.bpp() {
            8 => {
                let start = y * self.stride + x;
                buf[start..start + w].fill(c as u8);
            }
            16 => {
                let start = (y * self.stride + x) * 2;
                let px = self.word_bytes(c);
                for chunk in buf[start..start + 2 * w].chunks_exact_mut(2) {
                    chunk.copy_from_slice(&px);
                }
            }
            bpp => {
                let row = self.row_start(y);
                bits::fill_bits(
                    &mut buf[row..],
                    x * bpp,
                    (x + w) * bpp,
                    self.fmt.pattern_byte(c),
                    self.fmt.order,
                );
            }
        }
    }

    /// Vertical run of `h` pixels starting at `(x, y)`.
    pub(crate) fn vline(&self, buf: &mut [u8], x: usize, y: usize, h: usize, c: u32) {
        let c = c & self.mask();
        if self.is_vertical() {
            self.fill_bands(buf, x, y, 1, h, c);
            return;
        }

        let step = self.stride * self.bpp() / 8;
        let (first, shift) = self.locate(x, y);
        match self.bpp() {
            8 => {
                for k in 0..h {
                    buf[first + k * step] = c as u8;
                }
            }
            16 => {
                let px = self.word_bytes(c);
                for k in 0..h {
                    let i = first + k * step;
                    buf[i..i + 2].copy_from_slice(&px);
                }
            }
            _ => {
                // Stride is a whole number of bytes, so the slot is the same on every row.
                let m = (self.mask() << shift) as u8;
                let v = (c << shift) as u8 & m;
                for k in 0..h {
                    let b = &mut buf[first + k * step];
                    *b = (*b & !m) | v;
                }
            }
        }
    }

    /// Fill a clipped rectangle.
    pub(crate) fn fill_span(&self, buf: &mut [u8], span: Span, c: u32) {
        if self.is_vertical() {
            self.fill_bands(buf, span.x, span.y, span.w, span.h, c & self.mask());
            return;
        }
        for row in span.y..span.y + span.h {
            self.hline(buf, span.x, row, span.w, c);
        }
    }

    /// Vertical formats: walk the 8-row bands covering `[y, y + h)`, mass-filling bands that are
    /// fully covered and masking the partial top and bottom bands.
    fn fill_bands(&self, buf: &mut [u8], x: usize, y: usize, w: usize, h: usize, c: u32) {
        let pattern = self.fmt.pattern_byte(c);
        let end = y + h;
        let mut row = y;
        while row < end {
            let band = row / 8;
            let m = bits::byte_mask(row % 8, (end - band * 8).min(8), self.fmt.order);
            let start = band * self.stride + x;
            let run = &mut buf[start..start + w];
            if m == 0xFF {
                run.fill(pattern);
            } else {
                run.iter_mut()
                    .for_each(|b| *b = (*b & !m) | (pattern & m));
            }
            row = (band + 1) * 8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/codec.rs"]
mod tests;
