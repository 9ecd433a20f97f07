use crate::geometry::{LineString, MultiPolygon, Point, Polygon};
use crate::test::polygon::{p0, p1};

pub(crate) fn mp0() -> MultiPolygon {
    MultiPolygon::new(vec![p0(), p1()])
}

pub(crate) fn mp1() -> MultiPolygon {
    MultiPolygon::new(vec![Polygon::new(vec![LineString::new(vec![
        Point::new(-1., -1.),
        Point::new(-2., -1.),
        Point::new(-2., -2.),
        Point::new(-1., -1.),
    ])])])
}
