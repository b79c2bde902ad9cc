use std::ops::Range;

use crate::format::{bits, codec::Layout};

/// Bytes holding pixels `[x, x + w)` of row `y`, plus the bit offset of pixel `x` in the first.
fn row_bits(l: &Layout, x: usize, y: usize, w: usize) -> (Range<usize>, usize) {
    let start = l.row_start(y) * 8 + x * l.bpp();
    let end = start + w * l.bpp();
    (start / 8..end.div_ceil(8), start % 8)
}

/// Reusable staging buffers for bit-level row and column moves.
///
/// A row (or a whole MONO_VLSB column) is first copied out of the buffer, so the same scratch
/// serves both cross-buffer copies and in-place moves whose source and destination overlap.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    line: Vec<u8>,
    column: Vec<u8>,
    shifted: Vec<u8>,
}

impl Scratch {
    /// Stage the bytes covering pixels `[x, x + w)` of row `y`; returns the bit offset of `x`.
    pub(crate) fn load_row(&mut self, l: &Layout, buf: &[u8], x: usize, y: usize, w: usize) -> usize {
        let (bytes, off) = row_bits(l, x, y, w);
        self.line.clear();
        self.line.extend_from_slice(&buf[bytes]);
        off
    }

    /// Write the staged row (first pixel at bit `off`) to pixels `[x, x + w)` of row `y`.
    pub(crate) fn store_row(
        &mut self,
        l: &Layout,
        buf: &mut [u8],
        x: usize,
        y: usize,
        w: usize,
        off: usize,
    ) {
        let (bytes, dst_off) = row_bits(l, x, y, w);
        let n = w * l.bpp();
        let order = l.fmt.order;
        let out = &mut buf[bytes.start..];
        if dst_off == off {
            bits::splice_bits(out, &self.line, off, off + n, order);
            return;
        }

        let len = self.line.len().max(bytes.len());
        self.line.resize(len, 0);
        self.shifted.clear();
        self.shifted.resize(len, 0);
        bits::shift_bits(
            &self.line,
            &mut self.shifted,
            dst_off as isize - off as isize,
            order,
        );
        bits::splice_bits(out, &self.shifted, dst_off, dst_off + n, order);
    }

    /// Stage every band byte of column `x` (vertical formats).
    pub(crate) fn load_column(&mut self, l: &Layout, buf: &[u8], x: usize) {
        self.line.clear();
        self.line
            .extend((0..l.bands()).map(|band| buf[band * l.stride + x]));
    }

    /// Write staged column rows `[src_y, src_y + h)` to rows `[dst_y, dst_y + h)` of column `x`.
    pub(crate) fn store_column(
        &mut self,
        l: &Layout,
        buf: &mut [u8],
        x: usize,
        src_y: usize,
        dst_y: usize,
        h: usize,
    ) {
        let bands = l.bands();
        let len = self.line.len().max(bands);
        let order = l.fmt.order;

        self.line.resize(len, 0);
        self.shifted.clear();
        self.shifted.resize(len, 0);
        bits::shift_bits(
            &self.line,
            &mut self.shifted,
            dst_y as isize - src_y as isize,
            order,
        );

        self.column.clear();
        self.column
            .extend((0..bands).map(|band| buf[band * l.stride + x]));
        self.column.resize(len, 0);
        bits::splice_bits(&mut self.column, &self.shifted, dst_y, dst_y + h, order);
        for (band, &b) in self.column[..bands].iter().enumerate() {
            buf[band * l.stride + x] = b;
        }
    }
}
