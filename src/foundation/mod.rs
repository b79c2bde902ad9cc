pub(crate) mod error;
pub(crate) mod geom;
pub(crate) mod overlap;
