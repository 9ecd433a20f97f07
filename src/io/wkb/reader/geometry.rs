use crate::datatypes::Dimension;
use crate::error::{GeoCodecError, Result};
use crate::geometry::*;
use crate::io::wkb::common::{Endianness, WKBType, WKBTypeCode};
use crate::io::wkb::reader::cursor::ByteReader;
use crate::io::MAX_NESTING_DEPTH;

/// Decode an EWKB or ISO WKB buffer.
///
/// Each nested header carries its own byte order. Nested geometries without an SRID inherit the
/// SRID of their parent. The whole buffer must be consumed.
pub fn from_ewkb(buf: &[u8]) -> Result<Geometry> {
    let mut reader = ByteReader::new(buf);
    read_geometry(&mut reader, None, 0)
        .and_then(|geom| match reader.remaining() {
            0 => Ok(geom),
            _ => Err(GeoCodecError::TrailingInput {
                offset: reader.position(),
            }),
        })
        .inspect_err(|err| {
            tracing::debug!(
                format = "wkb",
                offset = ?err.offset(),
                error = %err,
                "rejected input"
            );
        })
}

/// A decoded geometry header.
#[derive(Debug, Clone, Copy)]
struct Header {
    geometry_type: WKBType,
    dim: Dimension,
    srid: Option<u32>,
    endianness: Endianness,
    /// Offset of the byte order flag that starts this geometry.
    offset: usize,
}

fn read_header(reader: &mut ByteReader, inherited_srid: Option<u32>) -> Result<Header> {
    let offset = reader.position();
    let flag = reader.read_u8("byte order")?;
    let endianness = Endianness::try_from(flag).map_err(|flag| GeoCodecError::MalformedHeader {
        offset,
        message: format!("invalid byte order flag {flag}"),
    })?;

    let code_offset = reader.position();
    let code = reader.read_u32(endianness, "geometry type")?;
    let type_code = WKBTypeCode::decode(code).ok_or_else(|| GeoCodecError::MalformedHeader {
        offset: code_offset,
        message: format!("unknown geometry type code {code:#010x}"),
    })?;

    let srid = if type_code.has_srid {
        normalize_srid(Some(reader.read_u32(endianness, "SRID")?)).or(inherited_srid)
    } else {
        inherited_srid
    };

    Ok(Header {
        geometry_type: type_code.geometry_type,
        dim: type_code.dim,
        srid,
        endianness,
        offset,
    })
}

/// `depth` counts the collections enclosing this geometry.
fn read_geometry(
    reader: &mut ByteReader,
    inherited_srid: Option<u32>,
    depth: usize,
) -> Result<Geometry> {
    let header = read_header(reader, inherited_srid)?;
    read_body(reader, &header, depth)
}

fn read_body(reader: &mut ByteReader, header: &Header, depth: usize) -> Result<Geometry> {
    let geom = match header.geometry_type {
        WKBType::Point => Geometry::Point(read_point_coords(reader, header)?),
        WKBType::LineString => Geometry::LineString(LineString::from_parts(
            read_coord_sequence(reader, header)?,
            header.dim,
            header.srid,
        )),
        WKBType::Polygon => Geometry::Polygon(read_polygon_body(reader, header)?),
        WKBType::MultiPoint => {
            let points = read_members(reader, header, WKBType::Point, 1 + 4, Point::try_from)?;
            Geometry::MultiPoint(MultiPoint::from_parts(points, header.dim, header.srid))
        }
        WKBType::MultiLineString => {
            let line_strings =
                read_members(reader, header, WKBType::LineString, 1 + 4 + 4, LineString::try_from)?;
            Geometry::MultiLineString(MultiLineString::from_parts(
                line_strings,
                header.dim,
                header.srid,
            ))
        }
        WKBType::MultiPolygon => {
            let polygons =
                read_members(reader, header, WKBType::Polygon, 1 + 4 + 4, Polygon::try_from)?;
            Geometry::MultiPolygon(MultiPolygon::from_parts(polygons, header.dim, header.srid))
        }
        WKBType::GeometryCollection => {
            if depth >= MAX_NESTING_DEPTH {
                return Err(GeoCodecError::MalformedHeader {
                    offset: header.offset,
                    message: format!("collections nested deeper than {MAX_NESTING_DEPTH}"),
                });
            }
            let count = read_count(reader, header)?;
            let mut geometries = Vec::with_capacity(reader.capacity_for(count, 1 + 4));
            for idx in 0..count {
                check_member_present(reader, header, idx, count)?;
                geometries.push(read_geometry(reader, header.srid, depth + 1)?);
            }
            Geometry::GeometryCollection(GeometryCollection::from_parts(
                geometries,
                header.dim,
                header.srid,
            ))
        }
    };
    Ok(geom)
}

fn read_count(reader: &mut ByteReader, header: &Header) -> Result<usize> {
    Ok(reader.read_u32(header.endianness, "element count")? as usize)
}

fn read_point_coords(reader: &mut ByteReader, header: &Header) -> Result<Point> {
    let size = header.dim.size();
    let mut coords = [0.; 4];
    for value in coords.iter_mut().take(size) {
        *value = reader.read_f64(header.endianness, "coordinate")?;
    }
    let point = Point::from_coords(header.dim, &coords[..size]).ok_or_else(|| {
        GeoCodecError::DimensionMismatch {
            offset: reader.position(),
            message: format!("expected {size} ordinates for {}", header.dim),
        }
    })?;
    Ok(point.with_srid(header.srid))
}

/// A count followed by bare coordinates: a line string body or a polygon ring.
fn read_coord_sequence(reader: &mut ByteReader, header: &Header) -> Result<Vec<Point>> {
    let count = read_count(reader, header)?;
    let mut points = Vec::with_capacity(reader.capacity_for(count, header.dim.size() * 8));
    for _ in 0..count {
        points.push(read_point_coords(reader, header)?);
    }
    Ok(points)
}

fn read_polygon_body(reader: &mut ByteReader, header: &Header) -> Result<Polygon> {
    let count = read_count(reader, header)?;
    let mut rings = Vec::with_capacity(reader.capacity_for(count, 4));
    for _ in 0..count {
        let points = read_coord_sequence(reader, header)?;
        rings.push(LineString::from_parts(points, header.dim, header.srid));
    }
    Ok(Polygon::from_parts(rings, header.dim, header.srid))
}

/// A collection that runs out of input exactly where a member should start is unterminated.
fn check_member_present(
    reader: &ByteReader,
    parent: &Header,
    idx: usize,
    count: usize,
) -> Result<()> {
    if reader.remaining() == 0 {
        return Err(GeoCodecError::UnterminatedStructure {
            offset: reader.position(),
            message: format!(
                "{:?} at offset {} declares {count} members but input ends after {idx}",
                parent.geometry_type, parent.offset
            ),
        });
    }
    Ok(())
}

/// Read the members of a Multi* geometry: each is a full nested geometry whose type must be
/// `member_type` and whose dimension must match the parent.
fn read_members<T>(
    reader: &mut ByteReader,
    parent: &Header,
    member_type: WKBType,
    min_member_size: usize,
    convert: impl Fn(Geometry) -> Result<T>,
) -> Result<Vec<T>> {
    let count = read_count(reader, parent)?;
    let mut members = Vec::with_capacity(reader.capacity_for(count, min_member_size));
    for idx in 0..count {
        check_member_present(reader, parent, idx, count)?;
        let header = read_header(reader, parent.srid)?;
        if header.geometry_type != member_type {
            return Err(GeoCodecError::MalformedHeader {
                offset: header.offset,
                message: format!(
                    "expected {member_type:?} inside {:?}, found {:?}",
                    parent.geometry_type, header.geometry_type
                ),
            });
        }
        if header.dim != parent.dim {
            return Err(GeoCodecError::DimensionMismatch {
                offset: header.offset,
                message: format!("member is {} but its parent is {}", header.dim, parent.dim),
            });
        }
        members.push(convert(read_body(reader, &header, 0)?)?);
    }
    Ok(members)
}
