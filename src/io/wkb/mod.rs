//! Reading and writing PostGIS-flavored Extended WKB (EWKB).
//!
//! The writer emits EWKB: dimension and SRID are flagged in the high bits of the type code and
//! the SRID is written once, on the outermost header. The reader also accepts ISO WKB type codes.

mod common;
pub(crate) mod reader;
pub(crate) mod writer;

pub use common::{
    Endianness, WKBType, WKBTypeCode, EWKB_M_FLAG, EWKB_SRID_FLAG, EWKB_Z_FLAG,
};
pub use reader::from_ewkb;
pub use writer::{ewkb_size, to_ewkb, to_ewkb_with_endianness, ByteStreamBuilder};
