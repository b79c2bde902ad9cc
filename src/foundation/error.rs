use crate::{format::pixel_format::PixelFormat, surface::desc::FrameDesc};

pub type PanelResult<T> = Result<T, PanelError>;

/// Everything that can go wrong around a framebuffer.
///
/// Drawing itself never fails; coordinates are clipped. Errors come from describing a buffer
/// (geometry, length, format code), from palette blits, from parsing descriptor JSON and from
/// the preview export.
#[derive(thiserror::Error, Debug)]
pub enum PanelError {
    /// The bytes, geometry or palette handed in cannot describe a valid surface.
    #[error("configuration error: {0}")]
    Config(String),

    /// A `FrameDesc` document that is not valid JSON or names an unknown format.
    #[error("invalid frame descriptor: {0}")]
    Serde(#[from] serde_json::Error),

    /// PNG encoding and file IO in the preview helpers.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanelError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn buffer_too_small(desc: &FrameDesc, need: usize, have: usize) -> Self {
        Self::config(format!(
            "buffer too small: {:?} {}x{} (stride {}) needs {need} bytes, got {have}",
            desc.format,
            desc.width,
            desc.height,
            desc.requested_stride()
        ))
    }

    pub(crate) fn unknown_format(code: u8) -> Self {
        Self::config(format!("unrecognized format code {code}"))
    }

    pub(crate) fn palette_format(palette: PixelFormat, dst: PixelFormat) -> Self {
        Self::config(format!(
            "palette format {palette:?} does not match destination format {dst:?}"
        ))
    }

    pub(crate) fn palette_height(height: u32) -> Self {
        Self::config(format!("palette height must be 1, got {height}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
