//! Defines [`GeoCodecError`], representing all errors returned by this crate.

use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
///
/// Decoding failures carry the byte offset (WKB) or character offset (WKT) at which the
/// problem was detected. See [`GeoCodecError::offset`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoCodecError {
    /// Bad byte order flag, unrecognized geometry type code or keyword, or a header that
    /// contradicts its enclosing geometry.
    #[error("Malformed header at offset {offset}: {message}")]
    MalformedHeader { offset: usize, message: String },

    /// The input ended before an expected field.
    #[error("Truncated input at offset {offset}: expected {expected}")]
    TruncatedInput {
        offset: usize,
        expected: &'static str,
    },

    /// Coordinate count inconsistent with the declared dimension.
    #[error("Dimension mismatch at offset {offset}: {message}")]
    DimensionMismatch { offset: usize, message: String },

    /// A nested structure was opened but never closed.
    #[error("Unterminated structure at offset {offset}: {message}")]
    UnterminatedStructure { offset: usize, message: String },

    /// WKT syntax error.
    #[error("Unexpected token at offset {offset}: {message}")]
    UnexpectedToken { offset: usize, message: String },

    /// Data left over after a complete geometry was decoded.
    #[error("Trailing input at offset {offset}")]
    TrailingInput { offset: usize },

    /// GeoJSON that is well-formed JSON but not a geometry this crate can represent.
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    /// Incorrect geometry type for operation
    #[error("Incorrect geometry type for operation: {0}")]
    IncorrectGeometryType(String),

    /// A geometry the target format has no encoding for.
    #[error("Cannot encode as {format}: {message}")]
    Unrepresentable {
        format: &'static str,
        message: String,
    },

    /// A count does not fit in the 32-bit field WKB stores it in.
    #[error("Overflow: {0} elements do not fit in a WKB count")]
    Overflow(usize),

    /// Box text that is not `BOX(..)` / `BOX3D(..)`.
    #[error("Invalid box: {0}")]
    InvalidBox(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    /// [geojson::Error]
    #[error(transparent)]
    GeoJson(#[from] geojson::Error),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// [std::fmt::Error]
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

impl GeoCodecError {
    /// The position in the input at which a decoding failure was detected, if any.
    pub fn offset(&self) -> Option<usize> {
        use GeoCodecError::*;
        match self {
            MalformedHeader { offset, .. }
            | TruncatedInput { offset, .. }
            | DimensionMismatch { offset, .. }
            | UnterminatedStructure { offset, .. }
            | UnexpectedToken { offset, .. }
            | TrailingInput { offset } => Some(*offset),
            _ => None,
        }
    }
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoCodecError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn offset_of_decode_errors() {
        let err = GeoCodecError::TruncatedInput {
            offset: 17,
            expected: "f64",
        };
        assert_eq!(err.offset(), Some(17));
        assert_eq!(
            err.to_string(),
            "Truncated input at offset 17: expected f64"
        );

        let err = GeoCodecError::InvalidGeoJson("no type".to_string());
        assert_eq!(err.offset(), None);
    }
}
