use crate::{
    blit::engine::{Region, move_region},
    surface::framebuffer::FrameBuffer,
};

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Shift the whole image by `(dx, dy)` in place.
    ///
    /// Content moved past an edge is dropped and the uncovered rows and columns are cleared to 0.
    /// A shift of at least the full width or height clears everything.
    #[tracing::instrument(level = "trace", skip(self), fields(format = ?self.format()))]
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let (w, h) = (self.desc.width, self.desc.height);
        if dx.unsigned_abs() >= w || dy.unsigned_abs() >= h {
            self.fill(0);
            return;
        }

        let l = self.layout;
        if let Some(r) = Region::place(self.bounds(), (l.width, l.height), dx, dy, (l.width, l.height))
        {
            move_region(&l, self.buf.as_mut(), r, None);
        }

        // Both shifts are smaller than the dimensions, which fit in i32.
        let (w, h) = (w as i32, h as i32);
        match dy.signum() {
            1 => self.fill_rect(0, 0, w, dy, 0),
            -1 => self.fill_rect(0, h + dy, w, -dy, 0),
            _ => {}
        }
        match dx.signum() {
            1 => self.fill_rect(0, 0, dx, h, 0),
            -1 => self.fill_rect(w + dx, 0, -dx, h, 0),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/engine.rs"]
mod tests;
