/// Axis-aligned rectangle in pixel coordinates.
///
/// A `Rect` may lie partially or fully outside a framebuffer; drawing calls clip it against the
/// buffer bounds rather than rejecting it. Zero or negative `w`/`h` describe an empty rectangle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        x >= i64::from(self.x) && x < self.right() && y >= i64::from(self.y) && y < self.bottom()
    }

    /// Exclusive right edge, widened so `x + w` never overflows.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    /// Exclusive bottom edge, widened so `y + h` never overflows.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    pub fn intersect(self, other: Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        // Both corners lie inside `self`, so every component fits back into i32.
        Some(Rect {
            x: x0 as i32,
            y: y0 as i32,
            w: (x1 - x0) as i32,
            h: (y1 - y0) as i32,
        })
    }

    /// Clip against `[0, width) x [0, height)` and convert to unsigned span coordinates.
    pub(crate) fn clip_to(self, width: usize, height: usize) -> Option<Span> {
        let bounds = Rect::new(0, 0, width as i32, height as i32);
        self.intersect(bounds).map(|r| Span {
            x: r.x as usize,
            y: r.y as usize,
            w: r.w as usize,
            h: r.h as usize,
        })
    }
}

/// A non-empty rectangle already clipped to a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) w: usize,
    pub(crate) h: usize,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geom.rs"]
mod tests;
