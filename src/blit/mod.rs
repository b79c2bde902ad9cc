pub(crate) mod engine;
mod scratch;
