pub(crate) mod bits;
pub(crate) mod codec;
pub(crate) mod pixel_format;
