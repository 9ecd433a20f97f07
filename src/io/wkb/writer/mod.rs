mod builder;
mod geometry;

pub use builder::ByteStreamBuilder;
pub use geometry::{ewkb_size, to_ewkb, to_ewkb_with_endianness};
