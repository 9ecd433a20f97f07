use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::datatypes::Dimension;
use crate::geometry::GeometryType;

/// Type code bit set when coordinates carry an altitude.
pub const EWKB_Z_FLAG: u32 = 0x8000_0000;
/// Type code bit set when coordinates carry a measure.
pub const EWKB_M_FLAG: u32 = 0x4000_0000;
/// Type code bit set when an SRID follows the type code.
pub const EWKB_SRID_FLAG: u32 = 0x2000_0000;

const EWKB_FLAGS: u32 = EWKB_Z_FLAG | EWKB_M_FLAG | EWKB_SRID_FLAG;

/// The base WKB geometry types
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum WKBType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl From<GeometryType> for WKBType {
    fn from(value: GeometryType) -> Self {
        match value {
            GeometryType::Point => WKBType::Point,
            GeometryType::LineString => WKBType::LineString,
            GeometryType::Polygon => WKBType::Polygon,
            GeometryType::MultiPoint => WKBType::MultiPoint,
            GeometryType::MultiLineString => WKBType::MultiLineString,
            GeometryType::MultiPolygon => WKBType::MultiPolygon,
            GeometryType::GeometryCollection => WKBType::GeometryCollection,
        }
    }
}

/// A full type code: base type, dimension and whether an SRID follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WKBTypeCode {
    pub geometry_type: WKBType,
    pub dim: Dimension,
    pub has_srid: bool,
}

impl WKBTypeCode {
    /// The EWKB encoding of this type code.
    pub fn encode(&self) -> u32 {
        let mut code: u32 = self.geometry_type.into();
        if self.dim.has_z() {
            code |= EWKB_Z_FLAG;
        }
        if self.dim.has_m() {
            code |= EWKB_M_FLAG;
        }
        if self.has_srid {
            code |= EWKB_SRID_FLAG;
        }
        code
    }

    /// Decode either an EWKB type code or an ISO one (`1000`/`2000`/`3000` offsets for
    /// Z/M/ZM). Returns `None` for unknown codes.
    pub fn decode(code: u32) -> Option<Self> {
        let iso = code & !EWKB_FLAGS;
        let (iso_z, iso_m) = match iso / 1000 {
            0 => (false, false),
            1 => (true, false),
            2 => (false, true),
            3 => (true, true),
            _ => return None,
        };
        let geometry_type = WKBType::try_from_primitive(iso % 1000).ok()?;
        Some(Self {
            geometry_type,
            dim: Dimension::from_flags(
                iso_z || code & EWKB_Z_FLAG != 0,
                iso_m || code & EWKB_M_FLAG != 0,
            ),
            has_srid: code & EWKB_SRID_FLAG != 0,
        })
    }
}

/// Byte order of a WKB buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Endianness {
    BigEndian,
    #[default]
    LittleEndian,
}

impl TryFrom<u8> for Endianness {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Endianness::BigEndian),
            1 => Ok(Endianness::LittleEndian),
            other => Err(other),
        }
    }
}

impl From<Endianness> for u8 {
    fn from(value: Endianness) -> Self {
        use Endianness::*;
        match value {
            BigEndian => 0,
            LittleEndian => 1,
        }
    }
}
