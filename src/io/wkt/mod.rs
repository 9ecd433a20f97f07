//! Reading and writing PostGIS-flavored Extended WKT (EWKT).
//!
//! Text has the form `[SRID=<n>;]TYPE[ Z| M| ZM] (...)`. Numbers are written in their shortest
//! form that parses back to the same `f64`, so generation and parsing round-trip exactly.

mod reader;
mod writer;

pub use reader::from_wkt;
pub use writer::{to_ewkt, to_wkt, write_geometry};
