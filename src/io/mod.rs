//! Interchange formats: EWKB, EWKT and GeoJSON.
//!
//! Each format has free functions in its module and a generator/parser pair here that
//! implements the shared [`Generator`], [`Parser`] and [`SqlLiteral`] contracts.

pub use format::{
    GeoJsonGenerator, GeoJsonParser, Generator, Parser, SqlLiteral, WkbGenerator, WkbParser,
    WktGenerator, WktParser,
};

/// How deeply geometry collections may nest before a reader gives up.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

mod format;
pub mod geojson;
pub mod wkb;
pub mod wkt;
