use crate::{
    foundation::geom::{Rect, Span},
    format::pixel_format::Plane,
    surface::framebuffer::FrameBuffer,
};

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Set every pixel to `c` (truncated to the format's bit depth).
    pub fn fill(&mut self, c: u32) {
        let l = self.layout;
        let fmt = l.fmt;
        // Rows tile the buffer exactly: one pattern fill covers everything.
        if fmt.plane == Plane::Horizontal && fmt.bits_per_pixel <= 8 && l.stride == l.width {
            let len = self.desc.byte_len();
            self.buf.as_mut()[..len].fill(fmt.pattern_byte(c));
            return;
        }
        let span = Span {
            x: 0,
            y: 0,
            w: l.width,
            h: l.height,
        };
        l.fill_span(self.buf.as_mut(), span, c);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: u32) {
        if let Some(span) = Rect::new(x, y, w, h).clip_to(self.layout.width, self.layout.height) {
            self.layout.fill_span(self.buf.as_mut(), span, c);
        }
    }

    pub fn hline(&mut self, x: i32, y: i32, w: i32, c: u32) {
        if let Some(s) = Rect::new(x, y, w, 1).clip_to(self.layout.width, self.layout.height) {
            self.layout.hline(self.buf.as_mut(), s.x, s.y, s.w, c);
        }
    }

    pub fn vline(&mut self, x: i32, y: i32, h: i32, c: u32) {
        if let Some(s) = Rect::new(x, y, 1, h).clip_to(self.layout.width, self.layout.height) {
            self.layout.vline(self.buf.as_mut(), s.x, s.y, s.h, c);
        }
    }

    /// Rectangle outline, or a filled rectangle when `fill` is set.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: u32, fill: bool) {
        if fill {
            self.fill_rect(x, y, w, h, c);
            return;
        }
        if w < 1 || h < 1 {
            return;
        }
        self.hline(x, y, w, c);
        self.hline(x, y.saturating_add(h - 1), w, c);
        self.vline(x, y, h, c);
        self.vline(x.saturating_add(w - 1), y, h, c);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/primitives.rs"]
mod tests;
