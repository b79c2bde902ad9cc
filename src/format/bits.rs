//! Bit-string helpers for sub-byte formats.
//!
//! A packed run of pixels is treated as a string of bit positions: position `p` lives in byte
//! `p / 8`, at bit `7 - p % 8` for [`BitOrder::MsbFirst`] and bit `p % 8` for
//! [`BitOrder::LsbFirst`]. A pixel of `bpp` bits at index `i` covers positions
//! `[i * bpp, (i + 1) * bpp)`, which matches the per-pixel shift rules of every packed format.

use crate::format::pixel_format::BitOrder;

/// Mask selecting positions `[lo, hi)` of a single byte, `0 <= lo < hi <= 8`.
pub(crate) fn byte_mask(lo: usize, hi: usize, order: BitOrder) -> u8 {
    debug_assert!(lo < hi && hi <= 8);
    match order {
        BitOrder::MsbFirst => ((0xFFu16 >> lo) & !(0xFFu16 >> hi)) as u8,
        BitOrder::LsbFirst => (((1u16 << hi) - 1) & !((1u16 << lo) - 1)) as u8,
    }
}

#[inline]
fn merge(dst: &mut u8, src: u8, mask: u8) {
    *dst = (*dst & !mask) | (src & mask);
}

/// Set positions `[start, end)` of `bytes` from a repeating `pattern` byte.
///
/// Partial bytes at either end are read-modify-written; whole bytes in between are mass-filled.
pub(crate) fn fill_bits(bytes: &mut [u8], start: usize, end: usize, pattern: u8, order: BitOrder) {
    if start >= end {
        return;
    }
    let first = start / 8;
    let last = (end - 1) / 8;
    if first == last {
        merge(
            &mut bytes[first],
            pattern,
            byte_mask(start % 8, end - first * 8, order),
        );
        return;
    }

    let mut body_start = first;
    if start % 8 != 0 {
        merge(&mut bytes[first], pattern, byte_mask(start % 8, 8, order));
        body_start += 1;
    }
    let mut body_end = last + 1;
    if end % 8 != 0 {
        merge(&mut bytes[last], pattern, byte_mask(0, end % 8, order));
        body_end = last;
    }
    bytes[body_start..body_end].fill(pattern);
}

/// Copy positions `[start, end)` from `src` into `dst`; both slices use the same indexing.
pub(crate) fn splice_bits(dst: &mut [u8], src: &[u8], start: usize, end: usize, order: BitOrder) {
    if start >= end {
        return;
    }
    let first = start / 8;
    let last = (end - 1) / 8;
    if first == last {
        merge(
            &mut dst[first],
            src[first],
            byte_mask(start % 8, end - first * 8, order),
        );
        return;
    }

    let mut body_start = first;
    if start % 8 != 0 {
        merge(&mut dst[first], src[first], byte_mask(start % 8, 8, order));
        body_start += 1;
    }
    let mut body_end = last + 1;
    if end % 8 != 0 {
        merge(&mut dst[last], src[last], byte_mask(0, end % 8, order));
        body_end = last;
    }
    dst[body_start..body_end].copy_from_slice(&src[body_start..body_end]);
}

/// Write into `dst` the bit string of `src` moved by `shift` positions.
///
/// Positive shifts move content toward higher positions (larger x or y). Positions with no source
/// are zero. `dst` and `src` must have the same length.
pub(crate) fn shift_bits(src: &[u8], dst: &mut [u8], shift: isize, order: BitOrder) {
    debug_assert_eq!(src.len(), dst.len());
    let n = src.len() as isize;
    let at = |j: isize| -> u8 {
        if (0..n).contains(&j) {
            src[j as usize]
        } else {
            0
        }
    };

    let dist = shift.unsigned_abs();
    let q = (dist / 8) as isize;
    let r = (dist % 8) as u32;
    let toward_high = shift > 0;

    for (i, out) in dst.iter_mut().enumerate() {
        let i = i as isize;
        let (a, b) = if toward_high {
            (at(i - q), at(i - q - 1))
        } else {
            (at(i + q), at(i + q + 1))
        };
        *out = if r == 0 {
            a
        } else {
            match (order, toward_high) {
                (BitOrder::MsbFirst, true) | (BitOrder::LsbFirst, false) => {
                    (a >> r) | (b << (8 - r))
                }
                (BitOrder::MsbFirst, false) | (BitOrder::LsbFirst, true) => {
                    (a << r) | (b >> (8 - r))
                }
            }
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/bits.rs"]
mod tests;
