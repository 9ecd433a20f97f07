//! The geometry model: a closed set of variants, each carrying a [`Dimension`] and an optional
//! spatial reference identifier (SRID).
//!
//! Composite geometries own their children. An SRID set on a composite through `with_srid`
//! applies to the whole tree.

pub use geometrycollection::GeometryCollection;
pub use linestring::LineString;
pub use multilinestring::MultiLineString;
pub use multipoint::MultiPoint;
pub use multipolygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;

mod geometrycollection;
mod linestring;
mod multilinestring;
mod multipoint;
mod multipolygon;
mod point;
mod polygon;

use std::fmt::Display;

use crate::datatypes::Dimension;
use crate::error::GeoCodecError;

/// Capabilities shared by every geometry variant.
pub trait GeometryTrait {
    /// The coordinate dimension.
    fn dimension(&self) -> Dimension;

    /// The spatial reference identifier, `None` when unspecified.
    fn srid(&self) -> Option<u32>;

    /// Which variant this is.
    fn geometry_type(&self) -> GeometryType;

    /// Whether this geometry has no coordinates.
    fn is_empty(&self) -> bool;
}

/// The closed set of geometry variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// The GeoJSON `"type"` member for this variant.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// The upper-case WKT keyword for this variant.
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Any geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Set the SRID of this geometry and all of its descendants. `0` clears it.
    pub fn with_srid(mut self, srid: impl Into<Option<u32>>) -> Self {
        self.set_srid(normalize_srid(srid.into()));
        self
    }

    pub(crate) fn set_srid(&mut self, srid: Option<u32>) {
        use Geometry::*;
        match self {
            Point(g) => g.set_srid(srid),
            LineString(g) => g.set_srid(srid),
            Polygon(g) => g.set_srid(srid),
            MultiPoint(g) => g.set_srid(srid),
            MultiLineString(g) => g.set_srid(srid),
            MultiPolygon(g) => g.set_srid(srid),
            GeometryCollection(g) => g.set_srid(srid),
        }
    }
}

impl GeometryTrait for Geometry {
    fn dimension(&self) -> Dimension {
        use Geometry::*;
        match self {
            Point(g) => g.dimension(),
            LineString(g) => g.dimension(),
            Polygon(g) => g.dimension(),
            MultiPoint(g) => g.dimension(),
            MultiLineString(g) => g.dimension(),
            MultiPolygon(g) => g.dimension(),
            GeometryCollection(g) => g.dimension(),
        }
    }

    fn srid(&self) -> Option<u32> {
        use Geometry::*;
        match self {
            Point(g) => g.srid(),
            LineString(g) => g.srid(),
            Polygon(g) => g.srid(),
            MultiPoint(g) => g.srid(),
            MultiLineString(g) => g.srid(),
            MultiPolygon(g) => g.srid(),
            GeometryCollection(g) => g.srid(),
        }
    }

    fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    fn is_empty(&self) -> bool {
        use Geometry::*;
        match self {
            Point(g) => g.is_empty(),
            LineString(g) => g.is_empty(),
            Polygon(g) => g.is_empty(),
            MultiPoint(g) => g.is_empty(),
            MultiLineString(g) => g.is_empty(),
            MultiPolygon(g) => g.is_empty(),
            GeometryCollection(g) => g.is_empty(),
        }
    }
}

macro_rules! impl_variant_conversions {
    ($variant:ident) => {
        impl From<$variant> for Geometry {
            fn from(value: $variant) -> Self {
                Geometry::$variant(value)
            }
        }

        impl TryFrom<Geometry> for $variant {
            type Error = GeoCodecError;

            fn try_from(value: Geometry) -> Result<Self, Self::Error> {
                match value {
                    Geometry::$variant(g) => Ok(g),
                    other => Err(GeoCodecError::IncorrectGeometryType(format!(
                        "expected {}, got {}",
                        stringify!($variant),
                        other.geometry_type()
                    ))),
                }
            }
        }
    };
}

impl_variant_conversions!(Point);
impl_variant_conversions!(LineString);
impl_variant_conversions!(Polygon);
impl_variant_conversions!(MultiPoint);
impl_variant_conversions!(MultiLineString);
impl_variant_conversions!(MultiPolygon);
impl_variant_conversions!(GeometryCollection);

/// SRID 0 means "unspecified".
pub(crate) fn normalize_srid(srid: Option<u32>) -> Option<u32> {
    srid.filter(|srid| *srid != 0)
}

/// Dimension and SRID of a composite built from `children`: taken from the first child,
/// XY and unspecified when there are none.
pub(crate) fn infer_attributes<'a, G: GeometryTrait + 'a>(
    children: impl IntoIterator<Item = &'a G>,
) -> (Dimension, Option<u32>) {
    children
        .into_iter()
        .next()
        .map(|first| (first.dimension(), first.srid()))
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{linestring, multipolygon, point};

    #[test]
    fn variant_round_trip_through_geometry() {
        let geom: Geometry = point::p0().into();
        assert_eq!(geom.geometry_type(), GeometryType::Point);
        let back: Point = geom.clone().try_into().unwrap();
        assert_eq!(back, point::p0());

        let err = LineString::try_from(geom).unwrap_err();
        assert!(matches!(err, GeoCodecError::IncorrectGeometryType(_)));
    }

    #[test]
    fn srid_propagates_through_tree() {
        let geom: Geometry = multipolygon::mp0().into();
        let geom = geom.with_srid(4326);
        assert_eq!(geom.srid(), Some(4326));

        let mp = MultiPolygon::try_from(geom).unwrap();
        for polygon in mp.polygons() {
            assert_eq!(polygon.srid(), Some(4326));
            for ring in polygon.rings() {
                assert!(ring.points().iter().all(|p| p.srid() == Some(4326)));
            }
        }
    }

    #[test]
    fn zero_srid_is_unspecified() {
        let geom = Geometry::from(linestring::ls0()).with_srid(0);
        assert_eq!(geom.srid(), None);
    }
}
