use crate::geometry::{Geometry, GeometryCollection};
use crate::test::{linestring, multipoint, multipolygon, point, polygon};

pub(crate) fn gc0() -> GeometryCollection {
    GeometryCollection::new(vec![
        Geometry::Point(point::p0()),
        Geometry::LineString(linestring::ls1()),
        Geometry::Polygon(polygon::p1()),
    ])
}

/// A collection nesting multi geometries and another collection.
pub(crate) fn gc_nested() -> GeometryCollection {
    GeometryCollection::new(vec![
        Geometry::MultiPoint(multipoint::mp0()),
        Geometry::MultiPolygon(multipolygon::mp1()),
        Geometry::GeometryCollection(gc0()),
    ])
}

/// Members of different dimensions.
pub(crate) fn gc_mixed() -> GeometryCollection {
    GeometryCollection::new(vec![
        Geometry::Point(point::p_z()),
        Geometry::LineString(linestring::ls0()),
        Geometry::Point(point::p2()),
    ])
}
