mod cursor;
mod geometry;

pub use geometry::from_ewkb;
