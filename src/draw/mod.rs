mod line;
mod primitives;
