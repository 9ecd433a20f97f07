use std::fmt::{Display, Error, Write};

use crate::datatypes::Dimension;
use crate::geometry::*;

/// The EWKT of `geom`: the WKT prefixed with `SRID=<n>;` when the geometry has an SRID.
pub fn to_ewkt(geom: &Geometry) -> String {
    geom.to_string()
}

/// The ISO WKT of `geom`, without any SRID.
pub fn to_wkt(geom: &Geometry) -> String {
    IsoWkt(geom).to_string()
}

struct IsoWkt<'a>(&'a Geometry);

impl Display for IsoWkt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_geometry(self.0, f)
    }
}

/// Formats as EWKT.
impl Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(srid) = self.srid() {
            write!(f, "SRID={srid};")?;
        }
        write_geometry(self, f)
    }
}

/// Write the tagged WKT text of `geom`, without any SRID.
pub fn write_geometry<W: Write>(geom: &Geometry, writer: &mut W) -> Result<(), Error> {
    let dim = if is_uniform(geom) {
        geom.dimension()
    } else {
        Dimension::XY
    };
    write_tag(writer, geom.geometry_type(), dim)?;
    match geom {
        Geometry::Point(g) => write_point_text(writer, g),
        Geometry::LineString(g) => write_coord_sequence(writer, g.points()),
        Geometry::Polygon(g) => write_polygon_text(writer, g),
        Geometry::MultiPoint(g) => write_list(writer, g.points(), write_point_text),
        Geometry::MultiLineString(g) => write_list(writer, g.line_strings(), |w, ls| {
            write_coord_sequence(w, ls.points())
        }),
        Geometry::MultiPolygon(g) => write_list(writer, g.polygons(), write_polygon_text),
        Geometry::GeometryCollection(g) => {
            write_list(writer, g.geometries(), |w, member| write_geometry(member, w))
        }
    }
}

/// Whether every member of a collection, at any depth, has the collection's dimension.
///
/// A collection tag applies to untagged (XY) members when read back, so a mixed collection is
/// written untagged and each member carries its own tag.
fn is_uniform(geom: &Geometry) -> bool {
    match geom {
        Geometry::GeometryCollection(g) => g
            .geometries()
            .iter()
            .all(|member| member.dimension() == g.dimension() && is_uniform(member)),
        _ => true,
    }
}

/// `KEYWORD[ tag] ` ready for the geometry text.
fn write_tag<W: Write>(writer: &mut W, typ: GeometryType, dim: Dimension) -> Result<(), Error> {
    writer.write_str(typ.wkt_keyword())?;
    if dim != Dimension::XY {
        writer.write_char(' ')?;
        writer.write_str(dim.wkt_tag())?;
    }
    writer.write_char(' ')
}

fn write_coord<W: Write>(writer: &mut W, point: &Point) -> Result<(), Error> {
    for (idx, value) in point.coords().enumerate() {
        if idx > 0 {
            writer.write_char(' ')?;
        }
        let mut buffer = ryu::Buffer::new();
        writer.write_str(buffer.format(value))?;
    }
    Ok(())
}

fn write_point_text<W: Write>(writer: &mut W, point: &Point) -> Result<(), Error> {
    if point.is_empty() {
        return writer.write_str("EMPTY");
    }
    writer.write_char('(')?;
    write_coord(writer, point)?;
    writer.write_char(')')
}

fn write_coord_sequence<W: Write>(writer: &mut W, points: &[Point]) -> Result<(), Error> {
    write_list(writer, points, write_coord)
}

fn write_polygon_text<W: Write>(writer: &mut W, polygon: &Polygon) -> Result<(), Error> {
    write_list(writer, polygon.rings(), |w, ring| {
        write_coord_sequence(w, ring.points())
    })
}

/// `EMPTY` for no items, otherwise `(item,item,...)`.
fn write_list<W: Write, T>(
    writer: &mut W,
    items: &[T],
    mut write_item: impl FnMut(&mut W, &T) -> Result<(), Error>,
) -> Result<(), Error> {
    if items.is_empty() {
        return writer.write_str("EMPTY");
    }
    writer.write_char('(')?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            writer.write_char(',')?;
        }
        write_item(writer, item)?;
    }
    writer.write_char(')')
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{geometrycollection, linestring, multipoint, multipolygon, point, polygon};

    #[test]
    fn point() {
        assert_eq!(to_wkt(&point::p1().into()), "POINT (1.0 2.0)");
        assert_eq!(
            to_wkt(&point::p_z().into()),
            "POINT Z (13.404954 52.520008 34.0)"
        );
        assert_eq!(to_wkt(&point::p_m().into()), "POINT M (-71.060316 48.432044 10.0)");
        assert_eq!(
            to_wkt(&point::p_zm().into()),
            "POINT ZM (1.5 -2.25 3.125 0.1)"
        );
        assert_eq!(to_wkt(&Point::empty(Dimension::XY).into()), "POINT EMPTY");
    }

    #[test]
    fn srid_prefix() {
        let geom = Geometry::from(point::p0()).with_srid(4326);
        assert_eq!(to_ewkt(&geom), "SRID=4326;POINT (0.0 1.0)");
        assert_eq!(geom.to_string(), "SRID=4326;POINT (0.0 1.0)");
        assert_eq!(to_wkt(&geom), "POINT (0.0 1.0)");
    }

    #[test]
    fn nesting() {
        assert_eq!(
            to_wkt(&linestring::ls0().into()),
            "LINESTRING (0.0 1.0,1.0 2.0)"
        );
        assert_eq!(
            to_wkt(&polygon::p1().into()),
            "POLYGON ((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),(2.0 2.0,4.0 2.0,4.0 4.0,2.0 2.0))"
        );
        assert_eq!(
            to_wkt(&multipoint::mp_z().into()),
            "MULTIPOINT Z ((0.0 1.0 2.0),(3.0 4.0 5.0))"
        );
        assert_eq!(
            to_wkt(&multipolygon::mp1().into()),
            "MULTIPOLYGON (((-1.0 -1.0,-2.0 -1.0,-2.0 -2.0,-1.0 -1.0)))"
        );
        assert_eq!(
            to_wkt(&geometrycollection::gc0().into()),
            "GEOMETRYCOLLECTION (POINT (0.0 1.0),LINESTRING (3.0 4.0,5.0 6.0,7.5 -8.25),\
             POLYGON ((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),(2.0 2.0,4.0 2.0,4.0 4.0,2.0 2.0)))"
        );
    }

    #[test]
    fn mixed_collection_is_untagged() {
        assert_eq!(
            to_wkt(&geometrycollection::gc_mixed().into()),
            "GEOMETRYCOLLECTION (POINT Z (13.404954 52.520008 34.0),\
             LINESTRING (0.0 1.0,1.0 2.0),POINT (2.0 3.0))"
        );

        let nested: Geometry = GeometryCollection::new(vec![
            Geometry::Point(point::p_z()),
            Geometry::GeometryCollection(geometrycollection::gc_mixed()),
        ])
        .into();
        assert_eq!(
            to_wkt(&nested),
            "GEOMETRYCOLLECTION (POINT Z (13.404954 52.520008 34.0),\
             GEOMETRYCOLLECTION (POINT Z (13.404954 52.520008 34.0),\
             LINESTRING (0.0 1.0,1.0 2.0),POINT (2.0 3.0)))"
        );

        let uniform: Geometry = GeometryCollection::new(vec![
            Geometry::Point(point::p_z()),
            Geometry::MultiPoint(multipoint::mp_z()),
        ])
        .into();
        assert!(to_wkt(&uniform).starts_with("GEOMETRYCOLLECTION Z (POINT Z "));
    }

    #[test]
    fn empty_geometries() {
        assert_eq!(
            to_wkt(&GeometryCollection::empty(Dimension::XY).into()),
            "GEOMETRYCOLLECTION EMPTY"
        );
        assert_eq!(
            to_wkt(&LineString::empty(Dimension::XYZ).into()),
            "LINESTRING Z EMPTY"
        );
        assert_eq!(
            to_wkt(&Polygon::empty(Dimension::XYZM).into()),
            "POLYGON ZM EMPTY"
        );
    }
}
