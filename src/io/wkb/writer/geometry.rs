use crate::error::{GeoCodecError, Result};
use crate::geometry::*;
use crate::io::wkb::common::{Endianness, WKBType, WKBTypeCode};
use crate::io::wkb::writer::ByteStreamBuilder;

const HEADER_BYTES: usize = 1 + 4;
const COUNT_BYTES: usize = 4;
const SRID_BYTES: usize = 4;

/// Encode a geometry as little-endian EWKB.
///
/// The SRID, if any, is written once on the outermost header that carries one; nested
/// geometries never repeat it.
pub fn to_ewkb(geom: &Geometry) -> Result<Vec<u8>> {
    to_ewkb_with_endianness(geom, Endianness::LittleEndian)
}

/// Encode a geometry as EWKB in the given byte order.
pub fn to_ewkb_with_endianness(geom: &Geometry, endianness: Endianness) -> Result<Vec<u8>> {
    let mut encoder = EwkbEncoder::new(endianness, ewkb_size(geom));
    encoder.write_geometry(geom)?;
    let out = encoder.finish();
    tracing::trace!(
        geometry_type = %geom.geometry_type(),
        len = out.len(),
        "encoded EWKB"
    );
    Ok(out)
}

/// The exact byte length of the EWKB encoding of `geom`.
pub fn ewkb_size(geom: &Geometry) -> usize {
    let mut srid_written = false;
    geometry_size(geom, &mut srid_written)
}

fn header_size(geom: &impl GeometryTrait, srid_written: &mut bool) -> usize {
    if !*srid_written && geom.srid().is_some() {
        *srid_written = true;
        HEADER_BYTES + SRID_BYTES
    } else {
        HEADER_BYTES
    }
}

fn coord_sequence_size(points: &[Point], dim: usize) -> usize {
    COUNT_BYTES + points.len() * dim * 8
}

fn point_size(point: &Point, srid_written: &mut bool) -> usize {
    header_size(point, srid_written) + point.dimension().size() * 8
}

fn line_string_size(line_string: &LineString, srid_written: &mut bool) -> usize {
    header_size(line_string, srid_written)
        + coord_sequence_size(line_string.points(), line_string.dimension().size())
}

fn polygon_size(polygon: &Polygon, srid_written: &mut bool) -> usize {
    let dim = polygon.dimension().size();
    header_size(polygon, srid_written)
        + COUNT_BYTES
        + polygon
            .rings()
            .iter()
            .map(|ring| coord_sequence_size(ring.points(), dim))
            .sum::<usize>()
}

fn geometry_size(geom: &Geometry, srid_written: &mut bool) -> usize {
    match geom {
        Geometry::Point(g) => point_size(g, srid_written),
        Geometry::LineString(g) => line_string_size(g, srid_written),
        Geometry::Polygon(g) => polygon_size(g, srid_written),
        Geometry::MultiPoint(g) => {
            header_size(g, srid_written)
                + COUNT_BYTES
                + g.points()
                    .iter()
                    .map(|p| point_size(p, srid_written))
                    .sum::<usize>()
        }
        Geometry::MultiLineString(g) => {
            header_size(g, srid_written)
                + COUNT_BYTES
                + g.line_strings()
                    .iter()
                    .map(|ls| line_string_size(ls, srid_written))
                    .sum::<usize>()
        }
        Geometry::MultiPolygon(g) => {
            header_size(g, srid_written)
                + COUNT_BYTES
                + g.polygons()
                    .iter()
                    .map(|p| polygon_size(p, srid_written))
                    .sum::<usize>()
        }
        Geometry::GeometryCollection(g) => {
            header_size(g, srid_written)
                + COUNT_BYTES
                + g.geometries()
                    .iter()
                    .map(|inner| geometry_size(inner, srid_written))
                    .sum::<usize>()
        }
    }
}

/// Per-call EWKB encoding state.
///
/// Holds the output builder and whether an SRID has been written yet, so nested geometries
/// appended to the same buffer do not repeat it.
struct EwkbEncoder {
    builder: ByteStreamBuilder,
    srid_written: bool,
}

impl EwkbEncoder {
    fn new(endianness: Endianness, capacity: usize) -> Self {
        Self {
            builder: ByteStreamBuilder::with_capacity(endianness, capacity),
            srid_written: false,
        }
    }

    fn finish(self) -> Vec<u8> {
        self.builder.finish()
    }

    fn write_geometry(&mut self, geom: &Geometry) -> Result<()> {
        match geom {
            Geometry::Point(g) => self.write_point(g),
            Geometry::LineString(g) => self.write_line_string(g),
            Geometry::Polygon(g) => self.write_polygon(g),
            Geometry::MultiPoint(g) => self.write_multi_point(g),
            Geometry::MultiLineString(g) => self.write_multi_line_string(g),
            Geometry::MultiPolygon(g) => self.write_multi_polygon(g),
            Geometry::GeometryCollection(g) => self.write_geometry_collection(g),
        }
    }

    /// Byte order, type code with dimension and SRID flags, then the SRID if flagged.
    fn write_header(&mut self, geom: &impl GeometryTrait) {
        let srid = geom.srid().filter(|_| !self.srid_written);
        let code = WKBTypeCode {
            geometry_type: WKBType::from(geom.geometry_type()),
            dim: geom.dimension(),
            has_srid: srid.is_some(),
        };

        self.builder.add_byte_order();
        self.builder.add_u32(code.encode());
        if let Some(srid) = srid {
            self.builder.add_u32(srid);
            self.srid_written = true;
        }
    }

    fn write_count(&mut self, count: usize) -> Result<()> {
        let count = u32::try_from(count).map_err(|_| GeoCodecError::Overflow(count))?;
        self.builder.add_u32(count);
        Ok(())
    }

    fn write_point_coords(&mut self, point: &Point) {
        point.coords().for_each(|value| self.builder.add_f64(value));
    }

    /// Point count followed by bare coordinates, without per-point headers.
    fn write_coord_sequence(&mut self, points: &[Point]) -> Result<()> {
        self.write_count(points.len())?;
        points.iter().for_each(|p| self.write_point_coords(p));
        Ok(())
    }

    fn write_point(&mut self, point: &Point) -> Result<()> {
        self.write_header(point);
        self.write_point_coords(point);
        Ok(())
    }

    fn write_line_string(&mut self, line_string: &LineString) -> Result<()> {
        self.write_header(line_string);
        self.write_coord_sequence(line_string.points())
    }

    fn write_polygon(&mut self, polygon: &Polygon) -> Result<()> {
        self.write_header(polygon);
        self.write_count(polygon.num_rings())?;
        for ring in polygon.rings() {
            self.write_coord_sequence(ring.points())?;
        }
        Ok(())
    }

    fn write_multi_point(&mut self, multi_point: &MultiPoint) -> Result<()> {
        self.write_header(multi_point);
        self.write_count(multi_point.num_points())?;
        for point in multi_point.points() {
            self.write_point(point)?;
        }
        Ok(())
    }

    fn write_multi_line_string(&mut self, multi_line_string: &MultiLineString) -> Result<()> {
        self.write_header(multi_line_string);
        self.write_count(multi_line_string.num_line_strings())?;
        for line_string in multi_line_string.line_strings() {
            self.write_line_string(line_string)?;
        }
        Ok(())
    }

    fn write_multi_polygon(&mut self, multi_polygon: &MultiPolygon) -> Result<()> {
        self.write_header(multi_polygon);
        self.write_count(multi_polygon.num_polygons())?;
        for polygon in multi_polygon.polygons() {
            self.write_polygon(polygon)?;
        }
        Ok(())
    }

    fn write_geometry_collection(&mut self, collection: &GeometryCollection) -> Result<()> {
        self.write_header(collection);
        self.write_count(collection.num_geometries())?;
        for geom in collection.geometries() {
            self.write_geometry(geom)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::datatypes::Dimension;
    use crate::test::{geometrycollection, linestring, multipolygon, point, polygon};

    fn type_code(buf: &[u8]) -> u32 {
        u32::from_le_bytes(buf[1..5].try_into().unwrap())
    }

    #[test]
    fn point_2d() {
        let buf = to_ewkb(&point::p1().into()).unwrap();
        let mut expected = vec![1, 1, 0, 0, 0];
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        expected.extend_from_slice(&2.0f64.to_le_bytes());
        assert_eq!(buf, expected);
    }

    #[test]
    fn dimension_flags() {
        let buf = to_ewkb(&point::p1().into()).unwrap();
        assert_eq!(type_code(&buf) & 0xC000_0000, 0);

        let buf = to_ewkb(&point::p_z().into()).unwrap();
        assert_eq!(type_code(&buf), 0x8000_0001);
        assert_eq!(buf.len(), 5 + 3 * 8);

        let buf = to_ewkb(&point::p_m().into()).unwrap();
        assert_eq!(type_code(&buf), 0x4000_0001);

        let buf = to_ewkb(&point::p_zm().into()).unwrap();
        assert_eq!(type_code(&buf), 0xC000_0001);
        assert_eq!(buf.len(), 5 + 4 * 8);
    }

    #[test]
    fn srid_written_once() {
        let geom = Geometry::from(multipolygon::mp0()).with_srid(4326);
        let buf = to_ewkb(&geom).unwrap();

        assert_eq!(type_code(&buf), 0x2000_0006);
        assert_eq!(u32::from_le_bytes(buf[5..9].try_into().unwrap()), 4326);

        // The first nested polygon header follows the SRID and element count.
        assert_eq!(u32::from_le_bytes(buf[14..18].try_into().unwrap()), 3);

        let srid_bytes = 4326u32.to_le_bytes();
        let occurrences = buf.windows(4).filter(|w| w[..] == srid_bytes[..]).count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn srid_on_nested_member_of_unreferenced_root() {
        let gc = GeometryCollection::from_parts(
            vec![point::p0().with_srid(3857).into(), point::p1().into()],
            Dimension::XY,
            None,
        );
        let buf = to_ewkb(&gc.into()).unwrap();
        assert_eq!(type_code(&buf), 7);
        // byte order + type + count, then the first member's header
        assert_eq!(type_code(&buf[9..]), 0x2000_0001);
        assert_eq!(u32::from_le_bytes(buf[14..18].try_into().unwrap()), 3857);
    }

    #[test]
    fn polygon_rings_have_no_headers() {
        let polygon = polygon::p1();
        let buf = to_ewkb(&polygon.clone().into()).unwrap();
        let ext = polygon.exterior().unwrap().num_points();
        let hole = polygon.interiors()[0].num_points();
        assert_eq!(buf.len(), 5 + 4 + (4 + ext * 16) + (4 + hole * 16));
        assert_eq!(u32::from_le_bytes(buf[5..9].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(buf[9..13].try_into().unwrap()), ext as u32);
    }

    #[test]
    fn empty_collection() {
        let buf = to_ewkb(&GeometryCollection::empty(Dimension::XY).into()).unwrap();
        assert_eq!(buf, vec![1, 7, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn big_endian_output() {
        let buf =
            to_ewkb_with_endianness(&linestring::ls0().into(), Endianness::BigEndian).unwrap();
        assert_eq!(&buf[..5], &[0, 0, 0, 0, 2]);
        assert_eq!(&buf[5..9], &[0, 0, 0, 2]);
    }

    #[test]
    fn size_matches_output() {
        let geoms: Vec<Geometry> = vec![
            point::p_zm().with_srid(4326).into(),
            linestring::ls_z().into(),
            polygon::p_zm().into(),
            Geometry::from(multipolygon::mp0()).with_srid(2056),
            Geometry::from(geometrycollection::gc_nested()).with_srid(4326),
        ];
        for geom in geoms {
            assert_eq!(ewkb_size(&geom), to_ewkb(&geom).unwrap().len());
        }
    }
}
