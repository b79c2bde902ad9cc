/// Iteration order for copying a block onto a possibly overlapping block of the same buffer.
///
/// Rows run bottom-up when the destination sits below the source. Columns run right-to-left only
/// when both blocks start on the same row and the destination sits to the right. Either way every
/// source pixel is read before it can be overwritten (`memmove` semantics).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CopyOrder {
    pub(crate) rows_reversed: bool,
    pub(crate) cols_reversed: bool,
}

impl CopyOrder {
    pub(crate) fn between(src: (i64, i64), dst: (i64, i64)) -> Self {
        let (sx, sy) = src;
        let (dx, dy) = dst;
        Self {
            rows_reversed: dy > sy,
            cols_reversed: dy == sy && dx > sx,
        }
    }

    pub(crate) fn rows(self, n: usize) -> impl Iterator<Item = usize> {
        ordered(n, self.rows_reversed)
    }

    pub(crate) fn cols(self, n: usize) -> impl Iterator<Item = usize> {
        ordered(n, self.cols_reversed)
    }
}

fn ordered(n: usize, reversed: bool) -> impl Iterator<Item = usize> {
    (0..n).map(move |i| if reversed { n - 1 - i } else { i })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/overlap.rs"]
mod tests;
