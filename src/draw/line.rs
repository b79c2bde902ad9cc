use crate::surface::framebuffer::FrameBuffer;

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Integer Bresenham line, endpoints inclusive.
    ///
    /// Horizontal and vertical lines go through [`FrameBuffer::hline`] / [`FrameBuffer::vline`].
    /// Otherwise the error accumulator steps the axis with the larger delta every iteration and
    /// the other axis when the error crosses over; equal deltas step both axes each time.
    /// Stepping starts at the first on-screen position of the driving axis, so the cost is
    /// bounded by the buffer size however far away the endpoints are.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c: u32) {
        let (w, h) = (i64::from(self.desc.width), i64::from(self.desc.height));
        let (x, y) = (i64::from(x0), i64::from(y0));
        let (x1, y1) = (i64::from(x1), i64::from(y1));

        if x.max(x1) < 0 || y.max(y1) < 0 || x.min(x1) >= w || y.min(y1) >= h {
            return;
        }

        if y == y1 {
            let (lo, hi) = (x.min(x1).max(0), x.max(x1).min(w - 1));
            // Both ends were clamped into [0, w), so the casts are lossless.
            self.hline(lo as i32, y as i32, (hi - lo + 1) as i32, c);
            return;
        }
        if x == x1 {
            let (lo, hi) = (y.min(y1).max(0), y.max(y1).min(h - 1));
            self.vline(x as i32, lo as i32, (hi - lo + 1) as i32, c);
            return;
        }

        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };

        // The driving axis advances exactly once per step, so only the steps whose driving
        // coordinate is on screen can produce pixels. Resume the accumulator at the first of them.
        let x_major = dx >= dy;
        let visible = if x_major {
            visible_steps(x, sx, dx, w)
        } else {
            visible_steps(y, sy, dy, h)
        };
        let Some((first, last)) = visible else {
            return;
        };
        let wide = |v: i64| i128::from(v);
        let (mut x, mut y, err) = if x_major {
            let m = minor_steps(first, dy, dx);
            let err = wide(dx) - wide(dy) - wide(first) * wide(dy) + wide(m) * wide(dx);
            (x + sx * first, y + sy * m, err)
        } else {
            let m = minor_steps(first, dx, dy);
            let err = wide(dx) - wide(dy) + wide(first) * wide(dx) - wide(m) * wide(dy);
            (x + sx * m, y + sy * first, err)
        };
        // After any whole number of steps the accumulator is back within a few deltas of zero.
        let mut err = err as i64;

        let buf = self.buf.as_mut();
        for _ in first..last {
            if (0..w).contains(&x) && (0..h).contains(&y) {
                self.layout.write(buf, x as usize, y as usize, c);
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
        if (0..w).contains(&x) && (0..h).contains(&y) {
            self.layout.write(buf, x as usize, y as usize, c);
        }
    }
}

/// Step indices `k` in `[0, n]` whose coordinate `start + step * k` lies in `[0, len)`.
fn visible_steps(start: i64, step: i64, n: i64, len: i64) -> Option<(i64, i64)> {
    let (lo, hi) = if step > 0 {
        (-start, len - 1 - start)
    } else {
        (start - len + 1, start)
    };
    let (lo, hi) = (lo.max(0), hi.min(n));
    (lo <= hi).then_some((lo, hi))
}

/// Minor-axis moves made during the first `k` steps of a line with driving delta `major` and
/// minor delta `minor` (`major >= minor`): `ceil((2k * minor - major) / (2 * major))`.
fn minor_steps(k: i64, minor: i64, major: i64) -> i64 {
    let num = 2 * i128::from(k) * i128::from(minor) - i128::from(major);
    let den = 2 * i128::from(major);
    // Bounded by `k`, which fits in i64.
    (-(-num).div_euclid(den)) as i64
}

#[cfg(test)]
#[path = "../../tests/unit/draw/line.rs"]
mod tests;
