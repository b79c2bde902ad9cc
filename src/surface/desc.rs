use crate::{
    foundation::error::{PanelError, PanelResult},
    format::pixel_format::{PixelFormat, Plane},
};

/// Largest width, height, or stride accepted for a framebuffer.
pub const MAX_DIMENSION: u32 = 0xFFFF;

/// Geometry and encoding of a framebuffer, independent of its backing bytes.
///
/// `stride` is measured in pixels along the packed axis and defaults to `width`. It is the
/// configuration surface of the crate: descriptors can be built in code or read from JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameDesc {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stride: Option<u32>,
}

impl FrameDesc {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            stride: None,
        }
    }

    pub fn with_stride(self, stride: u32) -> Self {
        Self {
            stride: Some(stride),
            ..self
        }
    }

    pub fn from_json(s: &str) -> PanelResult<Self> {
        let desc: FrameDesc = serde_json::from_str(s)?;
        desc.validate()?;
        Ok(desc)
    }

    /// Stride as given by the caller (defaults to `width`).
    pub fn requested_stride(&self) -> u32 {
        self.stride.unwrap_or(self.width)
    }

    pub fn validate(&self) -> PanelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PanelError::config("width and height must be > 0"));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(PanelError::config(format!(
                "dimensions {}x{} exceed {MAX_DIMENSION}",
                self.width, self.height
            )));
        }
        let stride = self.requested_stride();
        if stride < self.width {
            return Err(PanelError::config(format!(
                "stride {stride} is smaller than width {}",
                self.width
            )));
        }
        if stride > MAX_DIMENSION {
            return Err(PanelError::config(format!(
                "stride {stride} exceeds {MAX_DIMENSION}"
            )));
        }
        Ok(())
    }

    /// Stride rounded up so every row of a horizontal sub-byte format starts on a byte boundary.
    pub fn packed_stride(&self) -> u32 {
        round_to_byte(self.format, self.requested_stride())
    }

    /// Minimum number of bits the backing buffer must hold.
    ///
    /// The final row (final band for MONO_VLSB) only needs `width` pixels, not a full stride.
    pub fn bits_required(&self) -> u64 {
        let fmt = self.format.desc();
        let width = u64::from(self.width);
        let height = u64::from(self.height);
        let stride = u64::from(self.packed_stride());
        match fmt.plane {
            Plane::Vertical => {
                let bands = height.div_ceil(8);
                (bands.saturating_sub(1) * stride + width) * 8
            }
            Plane::Horizontal => {
                let last_row = u64::from(round_to_byte(self.format, self.width));
                (height.saturating_sub(1) * stride + last_row) * u64::from(fmt.bits_per_pixel)
            }
        }
    }

    pub fn byte_len(&self) -> usize {
        self.bits_required().div_ceil(8) as usize
    }
}

fn round_to_byte(format: PixelFormat, pixels: u32) -> u32 {
    let fmt = format.desc();
    match fmt.plane {
        Plane::Vertical => pixels,
        Plane::Horizontal => pixels.next_multiple_of(fmt.pixels_per_byte()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/desc.rs"]
mod tests;
