//! panelbuf is a packed-pixel framebuffer for small display panels.
//!
//! A [`FrameBuffer`] draws straight into a caller-owned byte buffer laid out exactly the way a
//! display controller expects it, in one of seven [`PixelFormat`]s (1, 2, 4, 8 and 16 bits per
//! pixel, horizontally or vertically packed). The surface offers:
//!
//! - pixel access, fills, horizontal/vertical runs, rectangles and Bresenham lines
//! - [`FrameBuffer::blit`] between buffers of any format, with clipping, a transparency key and
//!   palette translation ([`BlitOpts`])
//! - overlap-safe copies inside one buffer ([`FrameBuffer::blit_within`]) and in-place scrolling
//! - RGBA previews for inspecting a buffer on a desktop ([`FrameBuffer::save_png`])
//!
//! Every bulk operation produces the same bytes as writing its pixels one at a time.
#![forbid(unsafe_code)]

mod blit;
mod draw;
mod foundation;
mod format;
mod preview;
mod scroll;
mod surface;

pub use crate::blit::engine::BlitOpts;
pub use crate::foundation::error::{PanelError, PanelResult};
pub use crate::foundation::geom::Rect;
pub use crate::format::pixel_format::{BitOrder, FormatDesc, PixelFormat, Plane, rgb565};
pub use crate::preview::rgba::expand_to_rgba;
pub use crate::surface::desc::{FrameDesc, MAX_DIMENSION};
pub use crate::surface::framebuffer::FrameBuffer;
