use crate::{
    blit::scratch::Scratch,
    foundation::{
        error::{PanelError, PanelResult},
        geom::Rect,
        overlap::CopyOrder,
    },
    format::{bits, codec::Layout},
    surface::framebuffer::FrameBuffer,
};

/// Per-call blit options.
///
/// ```ignore
/// dst.blit(&glyph, 10, 4, BlitOpts::new().with_key(0).with_palette(&colors))?;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BlitOpts<'p> {
    /// Raw source value that is never written, compared before palette translation. A key
    /// outside the source's bit depth matches nothing.
    pub key: Option<u32>,
    /// One-row framebuffer in the destination format; source values index its columns.
    pub palette: Option<FrameBuffer<&'p [u8]>>,
}

impl<'p> BlitOpts<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: u32) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_palette<P: AsRef<[u8]>>(mut self, palette: &'p FrameBuffer<P>) -> Self {
        self.palette = Some(palette.as_view());
        self
    }
}

/// A clipped copy: `w x h` pixels from `(sx, sy)` in the source to `(dx, dy)` in the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Region {
    pub(crate) sx: usize,
    pub(crate) sy: usize,
    pub(crate) dx: usize,
    pub(crate) dy: usize,
    pub(crate) w: usize,
    pub(crate) h: usize,
}

impl Region {
    /// Clip `src` against the source bounds, place its top-left corner at `(x, y)` in the
    /// destination, and clip again. Returns `None` when nothing is left to copy.
    pub(crate) fn place(
        src: Rect,
        src_size: (usize, usize),
        x: i32,
        y: i32,
        dst_size: (usize, usize),
    ) -> Option<Self> {
        let s = src.clip_to(src_size.0, src_size.1)?;
        let ox = i64::from(x) + (s.x as i64 - i64::from(src.x));
        let oy = i64::from(y) + (s.y as i64 - i64::from(src.y));

        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + s.w as i64).min(dst_size.0 as i64);
        let y1 = (oy + s.h as i64).min(dst_size.1 as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            sx: s.x + (x0 - ox) as usize,
            sy: s.y + (y0 - oy) as usize,
            dx: x0 as usize,
            dy: y0 as usize,
            w: (x1 - x0) as usize,
            h: (y1 - y0) as usize,
        })
    }

    fn copy_order(self) -> CopyOrder {
        CopyOrder::between(
            (self.sx as i64, self.sy as i64),
            (self.dx as i64, self.dy as i64),
        )
    }
}

enum Lut<'p> {
    Table(Vec<u32>),
    Direct(FrameBuffer<&'p [u8]>),
}

impl<'p> Lut<'p> {
    fn new(palette: FrameBuffer<&'p [u8]>, src_bpp: usize) -> Self {
        if src_bpp > 8 {
            return Lut::Direct(palette);
        }
        Lut::Table((0..1i32 << src_bpp).map(|i| palette.pixel(i, 0)).collect())
    }

    fn get(&self, raw: u32) -> u32 {
        match self {
            Lut::Table(t) => t.get(raw as usize).copied().unwrap_or(0),
            Lut::Direct(p) => i32::try_from(raw).map_or(0, |i| p.pixel(i, 0)),
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Copy all of `src` to `(x, y)`, clipped on both sides.
    ///
    /// Returns `Ok(false)` when nothing overlaps the destination. A palette must be a single row
    /// in this buffer's format; anything else is a configuration error.
    #[tracing::instrument(
        level = "trace",
        skip(self, src, opts),
        fields(src_format = ?src.format(), dst_format = ?self.format(), key = ?opts.key)
    )]
    pub fn blit<S: AsRef<[u8]>>(
        &mut self,
        src: &FrameBuffer<S>,
        x: i32,
        y: i32,
        opts: BlitOpts<'_>,
    ) -> PanelResult<bool> {
        if let Some(p) = &opts.palette {
            if p.format() != self.format() {
                return Err(PanelError::palette_format(p.format(), self.format()));
            }
            if p.height() != 1 {
                return Err(PanelError::palette_height(p.height()));
            }
        }

        let (sl, dl) = (src.layout, self.layout);
        let Some(r) = Region::place(src.bounds(), (sl.width, sl.height), x, y, (dl.width, dl.height))
        else {
            return Ok(false);
        };
        let key = opts.key;
        let (s, d) = (src.buf.as_ref(), self.buf.as_mut());

        if let Some(palette) = opts.palette {
            tracing::trace!(path = "palette", w = r.w, h = r.h);
            let lut = Lut::new(palette, sl.bpp());
            copy_mapped(&dl, d, &sl, s, r, |raw| (Some(raw) != key).then(|| lut.get(raw)));
            return Ok(true);
        }

        if sl.fmt != dl.fmt || (key.is_some() && !dl.fmt.is_byte_aligned()) {
            tracing::trace!(path = "generic", w = r.w, h = r.h);
            copy_mapped(&dl, d, &sl, s, r, |raw| (Some(raw) != key).then_some(raw));
        } else if dl.fmt.is_byte_aligned() {
            tracing::trace!(path = "bytes", w = r.w, h = r.h);
            copy_bytes(&sl, s, &dl, d, r, key);
        } else if dl.is_vertical() {
            copy_vertical(&sl, s, &dl, d, r);
        } else {
            tracing::trace!(path = "packed", w = r.w, h = r.h);
            let mut scratch = Scratch::default();
            for j in 0..r.h {
                let off = scratch.load_row(&sl, s, r.sx, r.sy + j, r.w);
                scratch.store_row(&dl, d, r.dx, r.dy + j, r.w, off);
            }
        }
        Ok(true)
    }

    /// Copy the `src` rectangle of this buffer to `(x, y)` in the same buffer.
    ///
    /// Overlapping source and destination behave like `memmove`: every source pixel is read
    /// before it can be overwritten. Returns `false` when the clipped copy is empty.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn blit_within(&mut self, src: Rect, x: i32, y: i32, key: Option<u32>) -> bool {
        let l = self.layout;
        let Some(r) = Region::place(src, (l.width, l.height), x, y, (l.width, l.height)) else {
            return false;
        };
        move_region(&l, self.buf.as_mut(), r, key);
        true
    }
}

/// Per-pixel transfer between two buffers; `map` returns `None` to leave a pixel untouched.
pub(crate) fn copy_mapped(
    dl: &Layout,
    dst: &mut [u8],
    sl: &Layout,
    src: &[u8],
    r: Region,
    map: impl Fn(u32) -> Option<u32>,
) {
    for j in 0..r.h {
        for i in 0..r.w {
            if let Some(c) = map(sl.read(src, r.sx + i, r.sy + j)) {
                dl.write(dst, r.dx + i, r.dy + j, c);
            }
        }
    }
}

fn copy_bytes(sl: &Layout, src: &[u8], dl: &Layout, dst: &mut [u8], r: Region, key: Option<u32>) {
    let n = dl.bpp() / 8;
    let len = r.w * n;
    for j in 0..r.h {
        let (s, _) = sl.locate(r.sx, r.sy + j);
        let (d, _) = dl.locate(r.dx, r.dy + j);
        let (s, d) = (&src[s..s + len], &mut dst[d..d + len]);
        let Some(k) = key else {
            d.copy_from_slice(s);
            continue;
        };
        for (dp, sp) in d.chunks_exact_mut(n).zip(s.chunks_exact(n)) {
            let raw = if n == 2 { sl.read_word(sp) } else { u32::from(sp[0]) };
            if raw != k {
                dp.copy_from_slice(sp);
            }
        }
    }
}

/// Byte runs of a vertical-format copy whose source and destination rows share a band phase:
/// `(source start, destination start, row mask)` per destination band, top to bottom.
fn band_runs(sl: &Layout, dl: &Layout, r: Region) -> Vec<(usize, usize, u8)> {
    let end = r.dy + r.h;
    let mut runs = Vec::with_capacity(r.h.div_ceil(8) + 1);
    let mut row = r.dy;
    while row < end {
        let band = row / 8;
        let hi = (end - band * 8).min(8);
        let (s, _) = sl.locate(r.sx, row - r.dy + r.sy);
        let (d, _) = dl.locate(r.dx, row);
        runs.push((s, d, bits::byte_mask(row % 8, hi, dl.fmt.order)));
        row = (band + 1) * 8;
    }
    runs
}

fn merge_run(dst: &mut [u8], src: &[u8], mask: u8) {
    if mask == 0xFF {
        dst.copy_from_slice(src);
        return;
    }
    for (d, s) in dst.iter_mut().zip(src) {
        *d = (*d & !mask) | (s & mask);
    }
}

fn copy_vertical(sl: &Layout, src: &[u8], dl: &Layout, dst: &mut [u8], r: Region) {
    if r.sy % 8 == r.dy % 8 {
        tracing::trace!(path = "bands", w = r.w, h = r.h);
        for (s, d, mask) in band_runs(sl, dl, r) {
            merge_run(&mut dst[d..d + r.w], &src[s..s + r.w], mask);
        }
        return;
    }

    tracing::trace!(path = "columns", w = r.w, h = r.h);
    let mut scratch = Scratch::default();
    for i in 0..r.w {
        scratch.load_column(sl, src, r.sx + i);
        scratch.store_column(dl, dst, r.dx + i, r.sy, r.dy, r.h);
    }
}

/// In-place copy of `r` within one buffer, in an order that never reads an overwritten pixel.
pub(crate) fn move_region(l: &Layout, buf: &mut [u8], r: Region, key: Option<u32>) {
    let order = r.copy_order();

    if key.is_some() {
        tracing::trace!(path = "generic", w = r.w, h = r.h);
        for j in order.rows(r.h) {
            for i in order.cols(r.w) {
                let raw = l.read(buf, r.sx + i, r.sy + j);
                if Some(raw) != key {
                    l.write(buf, r.dx + i, r.dy + j, raw);
                }
            }
        }
        return;
    }

    if l.fmt.is_byte_aligned() {
        tracing::trace!(path = "bytes", w = r.w, h = r.h);
        let len = r.w * l.bpp() / 8;
        for j in order.rows(r.h) {
            let (s, _) = l.locate(r.sx, r.sy + j);
            let (d, _) = l.locate(r.dx, r.dy + j);
            buf.copy_within(s..s + len, d);
        }
        return;
    }

    let mut scratch = Scratch::default();
    if !l.is_vertical() {
        tracing::trace!(path = "packed", w = r.w, h = r.h);
        for j in order.rows(r.h) {
            let off = scratch.load_row(l, buf, r.sx, r.sy + j, r.w);
            scratch.store_row(l, buf, r.dx, r.dy + j, r.w, off);
        }
        return;
    }

    if r.sy % 8 == r.dy % 8 {
        tracing::trace!(path = "bands", w = r.w, h = r.h);
        let mut runs = band_runs(l, l, r);
        if order.rows_reversed {
            runs.reverse();
        }
        let mut staged = Vec::with_capacity(r.w);
        for (s, d, mask) in runs {
            staged.clear();
            staged.extend_from_slice(&buf[s..s + r.w]);
            merge_run(&mut buf[d..d + r.w], &staged, mask);
        }
        return;
    }

    // Whole columns are staged, so only the column order matters. With the axes swapped, the
    // helper's row order is the column order.
    tracing::trace!(path = "columns", w = r.w, h = r.h);
    let transposed = CopyOrder::between(
        (r.sy as i64, r.sx as i64),
        (r.dy as i64, r.dx as i64),
    );
    for i in transposed.rows(r.w) {
        scratch.load_column(l, buf, r.sx + i);
        scratch.store_column(l, buf, r.dx + i, r.sy, r.dy, r.h);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blit/engine.rs"]
mod tests;
