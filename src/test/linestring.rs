use crate::geometry::{LineString, Point};

pub(crate) fn ls0() -> LineString {
    LineString::new(vec![Point::new(0., 1.), Point::new(1., 2.)])
}

pub(crate) fn ls1() -> LineString {
    LineString::new(vec![
        Point::new(3., 4.),
        Point::new(5., 6.),
        Point::new(7.5, -8.25),
    ])
}

pub(crate) fn ls_z() -> LineString {
    LineString::new(vec![
        Point::new_z(10., 20., 1.),
        Point::new_z(11., 21., 2.),
        Point::new_z(12., 22., 3.),
    ])
}

/// A closed ring around the unit square.
pub(crate) fn ring0() -> LineString {
    LineString::new(vec![
        Point::new(0., 0.),
        Point::new(10., 0.),
        Point::new(10., 10.),
        Point::new(0., 10.),
        Point::new(0., 0.),
    ])
}

/// A closed ring inside [`ring0`].
pub(crate) fn hole0() -> LineString {
    LineString::new(vec![
        Point::new(2., 2.),
        Point::new(4., 2.),
        Point::new(4., 4.),
        Point::new(2., 2.),
    ])
}
