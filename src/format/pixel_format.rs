use crate::foundation::error::{PanelError, PanelResult};

/// Which end of a byte holds the first pixel along the packed axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitOrder {
    /// First pixel occupies the most significant bits.
    MsbFirst,
    /// First pixel occupies the least significant bits (for 16-bit pixels: little-endian words).
    LsbFirst,
}

/// Axis along which consecutive pixels share a byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Pixels of one row are packed side by side; rows are `stride` pixels apart.
    Horizontal,
    /// Eight vertically adjacent pixels share a byte; byte rows (bands) are `stride` bytes apart.
    Vertical,
}

/// Immutable description of a packed pixel encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FormatDesc {
    pub bits_per_pixel: u32,
    pub order: BitOrder,
    pub plane: Plane,
}

impl FormatDesc {
    /// Largest storable color value; inputs are truncated to these bits.
    pub const fn mask(self) -> u32 {
        if self.bits_per_pixel >= 32 {
            u32::MAX
        } else {
            (1u32 << self.bits_per_pixel) - 1
        }
    }

    pub const fn pixels_per_byte(self) -> u32 {
        if self.bits_per_pixel >= 8 {
            1
        } else {
            8 / self.bits_per_pixel
        }
    }

    pub const fn is_byte_aligned(self) -> bool {
        self.bits_per_pixel % 8 == 0
    }

    /// Byte with every pixel slot set to `c`; only meaningful for formats of at most 8 bits.
    pub const fn pattern_byte(self, c: u32) -> u8 {
        let c = c & self.mask();
        match self.bits_per_pixel {
            1 => {
                if c != 0 {
                    0xFF
                } else {
                    0x00
                }
            }
            2 => (c * 0x55) as u8,
            4 => (c * 0x11) as u8,
            _ => c as u8,
        }
    }
}

/// The seven packed pixel encodings understood by the framebuffer.
///
/// The numeric codes (see [`PixelFormat::code`]) are the ones used by the reference display
/// module, so raw format tags coming from device configuration map one-to-one.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 1 bpp, 8 vertical pixels per byte, bit 0 is the top pixel.
    MonoVlsb,
    /// 16 bpp little-endian RGB565.
    Rgb565,
    /// 4 bpp, even x in the high nibble.
    Gs4Hmsb,
    /// 1 bpp, 8 horizontal pixels per byte, bit 7 is the leftmost pixel.
    MonoHlsb,
    /// 1 bpp, 8 horizontal pixels per byte, bit 0 is the leftmost pixel.
    MonoHmsb,
    /// 2 bpp, leftmost pixel in the top two bits.
    Gs2Hmsb,
    /// 8 bpp, one byte per pixel.
    Gs8,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 7] = [
        PixelFormat::MonoVlsb,
        PixelFormat::Rgb565,
        PixelFormat::Gs4Hmsb,
        PixelFormat::MonoHlsb,
        PixelFormat::MonoHmsb,
        PixelFormat::Gs2Hmsb,
        PixelFormat::Gs8,
    ];

    pub const fn code(self) -> u8 {
        match self {
            PixelFormat::MonoVlsb => 0,
            PixelFormat::Rgb565 => 1,
            PixelFormat::Gs4Hmsb => 2,
            PixelFormat::MonoHlsb => 3,
            PixelFormat::MonoHmsb => 4,
            PixelFormat::Gs2Hmsb => 5,
            PixelFormat::Gs8 => 6,
        }
    }

    pub fn from_code(code: u8) -> PanelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.code() == code)
            .ok_or_else(|| PanelError::unknown_format(code))
    }

    pub const fn desc(self) -> FormatDesc {
        let (bits_per_pixel, order, plane) = match self {
            PixelFormat::MonoVlsb => (1, BitOrder::LsbFirst, Plane::Vertical),
            PixelFormat::Rgb565 => (16, BitOrder::LsbFirst, Plane::Horizontal),
            PixelFormat::Gs4Hmsb => (4, BitOrder::MsbFirst, Plane::Horizontal),
            PixelFormat::MonoHlsb => (1, BitOrder::MsbFirst, Plane::Horizontal),
            PixelFormat::MonoHmsb => (1, BitOrder::LsbFirst, Plane::Horizontal),
            PixelFormat::Gs2Hmsb => (2, BitOrder::MsbFirst, Plane::Horizontal),
            PixelFormat::Gs8 => (8, BitOrder::MsbFirst, Plane::Horizontal),
        };
        FormatDesc {
            bits_per_pixel,
            order,
            plane,
        }
    }

    pub const fn bits_per_pixel(self) -> u32 {
        self.desc().bits_per_pixel
    }

    pub const fn mask(self) -> u32 {
        self.desc().mask()
    }
}

impl TryFrom<u8> for PixelFormat {
    type Error = PanelError;

    fn try_from(code: u8) -> PanelResult<Self> {
        Self::from_code(code)
    }
}

/// Pack 8-bit channels into an RGB565 color value (R in bits 15-11, G in 10-5, B in 4-0).
pub const fn rgb565(r: u8, g: u8, b: u8) -> u32 {
    (((r as u32) >> 3) << 11) | (((g as u32) >> 2) << 5) | ((b as u32) >> 3)
}

#[cfg(test)]
#[path = "../../tests/unit/format/pixel_format.rs"]
mod tests;
