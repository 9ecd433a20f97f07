//! Encode and decode geometries as Extended WKB, Extended WKT and GeoJSON, and embed them
//! in PostGIS SQL.
//!
//! ```
//! use geocodec::geometry::{Geometry, LineString, Point};
//! use geocodec::io::wkb::{from_ewkb, to_ewkb};
//!
//! let line: Geometry = LineString::new(vec![Point::new(0., 1.), Point::new(1., 2.)])
//!     .with_srid(4326)
//!     .into();
//! assert_eq!(line.to_string(), "SRID=4326;LINESTRING (0.0 1.0,1.0 2.0)");
//!
//! let bytes = to_ewkb(&line).unwrap();
//! assert_eq!(from_ewkb(&bytes).unwrap(), line);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use error::{GeoCodecError, Result};
pub use geometry::{Geometry, GeometryTrait, GeometryType};

pub mod boxes;
pub mod config;
pub mod datatypes;
pub mod error;
pub mod geometry;
pub mod io;
pub mod sql;
#[cfg(test)]
pub(crate) mod test;
