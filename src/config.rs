//! Options for embedding geometries in SQL.

use serde::{Deserialize, Serialize};

use crate::error::{GeoCodecError, Result};
use crate::geometry::Geometry;
use crate::io::{GeoJsonGenerator, SqlLiteral, WkbGenerator, WktGenerator};

/// Which interchange format geometry literals are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlLiteralFormat {
    #[default]
    Wkt,
    Wkb,
    GeoJson,
}

/// SQL embedding configuration.
///
/// All fields have defaults, so it can be nested in a caller's own configuration file with
/// any subset of keys present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlOptions {
    /// Schema the PostGIS functions live in
    pub schema: String,
    /// Format of embedded geometry literals
    pub format: SqlLiteralFormat,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
            format: SqlLiteralFormat::default(),
        }
    }
}

impl SqlOptions {
    pub fn new(schema: impl Into<String>, format: SqlLiteralFormat) -> Self {
        Self {
            schema: schema.into(),
            format,
        }
    }

    /// The schema is interpolated into SQL unquoted, so it must be a plain identifier.
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.schema.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !valid {
            return Err(GeoCodecError::InvalidConfig {
                key: "schema".to_string(),
                reason: format!("'{}' is not a plain SQL identifier", self.schema),
            });
        }
        Ok(())
    }

    /// A geometry constructor call in the configured format.
    pub fn geometry_literal(&self, geom: &Geometry) -> Result<String> {
        self.literal_generator().to_postgis_geometry_sql(geom, &self.schema)
    }

    /// A geography constructor call in the configured format.
    pub fn geography_literal(&self, geom: &Geometry) -> Result<String> {
        self.literal_generator().to_postgis_geography_sql(geom, &self.schema)
    }

    fn literal_generator(&self) -> Box<dyn SqlLiteral> {
        match self.format {
            SqlLiteralFormat::Wkt => Box::new(WktGenerator),
            SqlLiteralFormat::Wkb => Box::new(WkbGenerator::default()),
            SqlLiteralFormat::GeoJson => Box::new(GeoJsonGenerator),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::point;

    #[test]
    fn defaults() {
        let options = SqlOptions::default();
        assert_eq!(options.schema, "public");
        assert_eq!(options.format, SqlLiteralFormat::Wkt);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn deserialize_partial() {
        let options: SqlOptions = serde_json::from_str(r#"{"format":"wkb"}"#).unwrap();
        assert_eq!(options, SqlOptions::new("public", SqlLiteralFormat::Wkb));

        let options: SqlOptions = serde_json::from_str(r#"{"schema":"gis"}"#).unwrap();
        assert_eq!(options.format, SqlLiteralFormat::Wkt);

        let options: SqlOptions = serde_json::from_str(r#"{"format":"geojson"}"#).unwrap();
        assert_eq!(options.format, SqlLiteralFormat::GeoJson);
    }

    #[test]
    fn rejects_unsafe_schema() {
        let options = SqlOptions::new("public; drop table x", SqlLiteralFormat::Wkt);
        assert!(matches!(
            options.validate(),
            Err(GeoCodecError::InvalidConfig { .. })
        ));
        assert!(SqlOptions::new("", SqlLiteralFormat::Wkt).validate().is_err());
        assert!(SqlOptions::new("my_schema2", SqlLiteralFormat::Wkt).validate().is_ok());
    }

    #[test]
    fn literal_by_format() {
        let geom = point::p0().into();
        let options = SqlOptions::new("gis", SqlLiteralFormat::Wkt);
        assert_eq!(
            options.geometry_literal(&geom).unwrap(),
            "gis.st_geomfromewkt('POINT (0.0 1.0)')"
        );
        let options = SqlOptions::new("gis", SqlLiteralFormat::Wkb);
        assert!(options
            .geography_literal(&geom)
            .unwrap()
            .starts_with("gis.st_geomfromewkb(decode('0101000000"));
    }
}
