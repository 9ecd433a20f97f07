//! Convert geometries to and from [GeoJSON](https://geojson.org/) geometry objects.
//!
//! GeoJSON positions hold at most an altitude, so measures are dropped on write and parsed
//! geometries are either XY or XYZ.

pub use reader::{from_geojson, from_geojson_str};
pub use writer::{to_geojson, to_geojson_string, to_geojson_value};

mod reader;
mod writer;
