use std::fmt::Write;

use crate::error::Result;
use crate::geometry::{Geometry, GeometryTrait};
use crate::io::geojson::{from_geojson_str, to_geojson, to_geojson_string};
use crate::io::wkb::{from_ewkb, to_ewkb_with_endianness, Endianness};
use crate::io::wkt::{from_wkt, to_ewkt};

/// Produces one interchange representation of a geometry.
pub trait Generator {
    type Output;

    fn generate(&self, geom: &Geometry) -> Result<Self::Output>;
}

/// Decodes one interchange representation back into a geometry.
pub trait Parser {
    type Input: ?Sized;

    fn parse(&self, input: &Self::Input) -> Result<Geometry>;
}

/// Embeds a geometry in a PostGIS constructor call.
///
/// `schema` is the namespace PostGIS is installed in, usually `public`. The generated text
/// never contains a single quote, so it is safe inside the quoted literal.
pub trait SqlLiteral {
    fn to_postgis_geometry_sql(&self, geom: &Geometry, schema: &str) -> Result<String>;

    fn to_postgis_geography_sql(&self, geom: &Geometry, schema: &str) -> Result<String>;
}

/// Extended WKB output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WkbGenerator {
    endianness: Endianness,
}

impl WkbGenerator {
    pub fn new(endianness: Endianness) -> Self {
        Self { endianness }
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Lowercase hex of the EWKB bytes, as PostGIS prints geometries.
    pub fn generate_hex(&self, geom: &Geometry) -> Result<String> {
        let bytes = self.generate(geom)?;
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            write!(hex, "{byte:02x}")?;
        }
        Ok(hex)
    }
}

impl Generator for WkbGenerator {
    type Output = Vec<u8>;

    fn generate(&self, geom: &Geometry) -> Result<Vec<u8>> {
        to_ewkb_with_endianness(geom, self.endianness)
    }
}

impl SqlLiteral for WkbGenerator {
    fn to_postgis_geometry_sql(&self, geom: &Geometry, schema: &str) -> Result<String> {
        let hex = self.generate_hex(geom)?;
        Ok(format!("{schema}.st_geomfromewkb(decode('{hex}', 'hex'))"))
    }

    fn to_postgis_geography_sql(&self, geom: &Geometry, schema: &str) -> Result<String> {
        Ok(format!("{}::geography", self.to_postgis_geometry_sql(geom, schema)?))
    }
}

/// Extended WKT output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WktGenerator;

impl Generator for WktGenerator {
    type Output = String;

    fn generate(&self, geom: &Geometry) -> Result<String> {
        tracing::trace!(geometry_type = %geom.geometry_type(), "encoding EWKT");
        Ok(to_ewkt(geom))
    }
}

impl SqlLiteral for WktGenerator {
    fn to_postgis_geometry_sql(&self, geom: &Geometry, schema: &str) -> Result<String> {
        Ok(format!("{schema}.st_geomfromewkt('{}')", self.generate(geom)?))
    }

    fn to_postgis_geography_sql(&self, geom: &Geometry, schema: &str) -> Result<String> {
        Ok(format!("{schema}.st_geogfromtext('{}')", self.generate(geom)?))
    }
}

/// GeoJSON output as the typed [`geojson::Geometry`] model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoJsonGenerator;

impl Generator for GeoJsonGenerator {
    type Output = geojson::Geometry;

    fn generate(&self, geom: &Geometry) -> Result<geojson::Geometry> {
        to_geojson(geom)
    }
}

impl SqlLiteral for GeoJsonGenerator {
    fn to_postgis_geometry_sql(&self, geom: &Geometry, schema: &str) -> Result<String> {
        Ok(format!("{schema}.st_geomfromgeojson('{}')", to_geojson_string(geom)?))
    }

    fn to_postgis_geography_sql(&self, geom: &Geometry, schema: &str) -> Result<String> {
        Ok(format!("{}::geography", self.to_postgis_geometry_sql(geom, schema)?))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WkbParser;

impl Parser for WkbParser {
    type Input = [u8];

    fn parse(&self, input: &[u8]) -> Result<Geometry> {
        from_ewkb(input)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WktParser;

impl Parser for WktParser {
    type Input = str;

    fn parse(&self, input: &str) -> Result<Geometry> {
        from_wkt(input)
    }
}

/// Parses GeoJSON text, optionally tagging the result with an SRID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoJsonParser {
    srid: Option<u32>,
}

impl GeoJsonParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag parsed geometries, typically with 4326 (WGS84).
    pub fn with_srid(mut self, srid: impl Into<Option<u32>>) -> Self {
        self.srid = srid.into();
        self
    }

    pub fn srid(&self) -> Option<u32> {
        self.srid
    }
}

impl Parser for GeoJsonParser {
    type Input = str;

    fn parse(&self, input: &str) -> Result<Geometry> {
        Ok(from_geojson_str(input)?.with_srid(self.srid))
    }
}
