use geojson::{PointType, Value};

use crate::error::{GeoCodecError, Result};
use crate::geometry::*;

/// Convert a geometry to a typed GeoJSON geometry object.
///
/// The SRID is not represented; RFC 7946 assumes WGS84. GeoJSON positions need at least two
/// members, so an empty point (on its own or inside a collection) is rejected with
/// [`GeoCodecError::Unrepresentable`]. Empty line strings, polygons and collections are fine.
pub fn to_geojson(geom: &Geometry) -> Result<geojson::Geometry> {
    Ok(geojson::Geometry::new(geometry_value(geom)?))
}

/// Convert a geometry to a JSON value.
pub fn to_geojson_value(geom: &Geometry) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(to_geojson(geom)?)?)
}

/// Convert a geometry to compact JSON text.
pub fn to_geojson_string(geom: &Geometry) -> Result<String> {
    tracing::trace!(geometry_type = %geom.geometry_type(), "encoding GeoJSON");
    Ok(serde_json::to_string(&to_geojson(geom)?)?)
}

fn geometry_value(geom: &Geometry) -> Result<Value> {
    let value = match geom {
        Geometry::Point(g) => Value::Point(position(g)?),
        Geometry::LineString(g) => Value::LineString(positions(g.points())?),
        Geometry::Polygon(g) => Value::Polygon(polygon_positions(g)?),
        Geometry::MultiPoint(g) => Value::MultiPoint(positions(g.points())?),
        Geometry::MultiLineString(g) => Value::MultiLineString(
            g.line_strings()
                .iter()
                .map(|line| positions(line.points()))
                .collect::<Result<_>>()?,
        ),
        Geometry::MultiPolygon(g) => Value::MultiPolygon(
            g.polygons()
                .iter()
                .map(polygon_positions)
                .collect::<Result<_>>()?,
        ),
        Geometry::GeometryCollection(g) => Value::GeometryCollection(
            g.geometries()
                .iter()
                .map(to_geojson)
                .collect::<Result<_>>()?,
        ),
    };
    Ok(value)
}

/// `[lon, lat]` or `[lon, lat, alt]`.
fn position(point: &Point) -> Result<PointType> {
    if point.is_empty() {
        return Err(GeoCodecError::Unrepresentable {
            format: "GeoJSON",
            message: "empty point has no position".to_string(),
        });
    }
    let mut out = vec![point.longitude(), point.latitude()];
    if let Some(altitude) = point.altitude() {
        out.push(altitude);
    }
    Ok(out)
}

fn positions(points: &[Point]) -> Result<Vec<PointType>> {
    points.iter().map(position).collect()
}

fn polygon_positions(polygon: &Polygon) -> Result<Vec<Vec<PointType>>> {
    polygon
        .rings()
        .iter()
        .map(|ring| positions(ring.points()))
        .collect()
}
