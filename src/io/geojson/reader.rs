use std::str::FromStr;

use geojson::{PointType, Value};

use crate::datatypes::Dimension;
use crate::error::{GeoCodecError, Result};
use crate::geometry::*;

/// Parse GeoJSON text holding a single geometry object.
pub fn from_geojson_str(input: &str) -> Result<Geometry> {
    let geometry = geojson::Geometry::from_str(input)
        .map_err(|err| match err {
            geojson::Error::PositionTooShort(len) => GeoCodecError::InvalidGeoJson(format!(
                "position has {len} members, expected at least 2"
            )),
            err => err.into(),
        })
        .inspect_err(|err| {
            tracing::debug!(format = "geojson", error = %err, "rejected input");
        })?;
    from_geojson(&geometry)
}

/// Convert a typed GeoJSON geometry object.
///
/// Two-member positions give XY geometries and longer ones XYZ, with members after the
/// altitude ignored. The offset of a [`GeoCodecError::DimensionMismatch`] is the index of
/// the offending position within its geometry.
pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Geometry> {
    convert_geometry(geometry).inspect_err(|err| {
        tracing::debug!(format = "geojson", offset = ?err.offset(), error = %err, "rejected input");
    })
}

fn convert_geometry(geometry: &geojson::Geometry) -> Result<Geometry> {
    let mut positions = PositionReader::default();
    let geom: Geometry = match &geometry.value {
        Value::Point(position) => positions.read(position)?.into(),
        Value::LineString(line) => positions.read_line_string(line)?.into(),
        Value::Polygon(rings) => positions.read_polygon(rings)?.into(),
        Value::MultiPoint(points) => {
            let points = positions.read_all(points)?;
            MultiPoint::from_parts(points, positions.dim(), None).into()
        }
        Value::MultiLineString(lines) => {
            let lines = lines
                .iter()
                .map(|line| positions.read_line_string(line))
                .collect::<Result<Vec<_>>>()?;
            MultiLineString::from_parts(lines, positions.dim(), None).into()
        }
        Value::MultiPolygon(polygons) => {
            let polygons = polygons
                .iter()
                .map(|rings| positions.read_polygon(rings))
                .collect::<Result<Vec<_>>>()?;
            MultiPolygon::from_parts(polygons, positions.dim(), None).into()
        }
        Value::GeometryCollection(members) => {
            let geometries = members
                .iter()
                .map(convert_geometry)
                .collect::<Result<Vec<_>>>()?;
            GeometryCollection::new(geometries).into()
        }
    };
    Ok(geom)
}

/// Reads the positions of one geometry, fixing its dimension at the first position.
#[derive(Default)]
struct PositionReader {
    dim: Option<Dimension>,
    index: usize,
}

impl PositionReader {
    fn dim(&self) -> Dimension {
        self.dim.unwrap_or_default()
    }

    fn read(&mut self, position: &PointType) -> Result<Point> {
        let index = self.index;
        self.index += 1;

        let dim = match position.len() {
            0 | 1 => {
                return Err(GeoCodecError::InvalidGeoJson(format!(
                    "position {index} has {} members, expected at least 2",
                    position.len()
                )))
            }
            2 => Dimension::XY,
            _ => Dimension::XYZ,
        };
        match self.dim {
            Some(expected) if expected != dim => {
                return Err(GeoCodecError::DimensionMismatch {
                    offset: index,
                    message: format!("{dim} position in a {expected} geometry"),
                })
            }
            _ => self.dim = Some(dim),
        }

        Ok(match dim {
            Dimension::XYZ => Point::new_z(position[0], position[1], position[2]),
            _ => Point::new(position[0], position[1]),
        })
    }

    fn read_all(&mut self, positions: &[PointType]) -> Result<Vec<Point>> {
        positions.iter().map(|position| self.read(position)).collect()
    }

    fn read_line_string(&mut self, positions: &[PointType]) -> Result<LineString> {
        let points = self.read_all(positions)?;
        Ok(LineString::from_parts(points, self.dim(), None))
    }

    fn read_polygon(&mut self, rings: &[Vec<PointType>]) -> Result<Polygon> {
        let rings = rings
            .iter()
            .map(|ring| self.read_line_string(ring))
            .collect::<Result<Vec<_>>>()?;
        Ok(Polygon::from_parts(rings, self.dim(), None))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::geojson::to_geojson_string;
    use crate::test::{geometrycollection, linestring, multipoint, multipolygon, point, polygon};

    fn round_trip(geom: Geometry) {
        let text = to_geojson_string(&geom).unwrap();
        assert_eq!(from_geojson_str(&text).unwrap(), geom, "{text}");
    }

    #[test]
    fn round_trip_variants() {
        round_trip(point::p0().into());
        round_trip(point::p_z().into());
        round_trip(linestring::ls_z().into());
        round_trip(polygon::p1().into());
        round_trip(multipoint::mp_z().into());
        round_trip(multipolygon::mp0().into());
        round_trip(geometrycollection::gc_nested().into());
    }

    #[test]
    fn measure_lost() {
        let text = to_geojson_string(&point::p_zm().into()).unwrap();
        let geom = from_geojson_str(&text).unwrap();
        assert_eq!(geom, Point::new_z(1.5, -2.25, 3.125).into());
    }

    #[test]
    fn extra_members_ignored() {
        let geom = from_geojson_str(r#"{"type":"Point","coordinates":[1,2,3,4]}"#).unwrap();
        assert_eq!(geom, Point::new_z(1., 2., 3.).into());
    }

    #[test]
    fn empty_geometries() {
        let geom = from_geojson_str(r#"{"type":"LineString","coordinates":[]}"#).unwrap();
        assert_eq!(geom, LineString::empty(Dimension::XY).into());

        let geom = from_geojson_str(r#"{"type":"MultiPolygon","coordinates":[]}"#).unwrap();
        assert_eq!(geom, MultiPolygon::empty(Dimension::XY).into());
    }

    #[test]
    fn mixed_arity() {
        let err = from_geojson_str(r#"{"type":"LineString","coordinates":[[0,0],[1,1,1]]}"#)
            .unwrap_err();
        assert!(matches!(err, GeoCodecError::DimensionMismatch { offset: 1, .. }));
    }

    #[test]
    fn short_position() {
        let err = from_geojson_str(r#"{"type":"Point","coordinates":[1]}"#).unwrap_err();
        assert!(matches!(err, GeoCodecError::InvalidGeoJson(_)));

        let err = from_geojson_str(r#"{"type":"Point","coordinates":[]}"#).unwrap_err();
        assert!(matches!(err, GeoCodecError::InvalidGeoJson(_)));

        let hand_built = geojson::Geometry::new(Value::LineString(vec![vec![0., 1.], vec![2.]]));
        let err = from_geojson(&hand_built).unwrap_err();
        assert!(matches!(err, GeoCodecError::InvalidGeoJson(message) if message.contains("position 1")));
    }

    #[test]
    fn not_a_geometry() {
        assert!(from_geojson_str(r#"{"type":"Circle","coordinates":[1,2]}"#).is_err());
        assert!(from_geojson_str("{").is_err());
    }
}
