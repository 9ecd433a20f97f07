use crate::geometry::Point;

pub(crate) fn p0() -> Point {
    Point::new(0., 1.)
}

pub(crate) fn p1() -> Point {
    Point::new(1., 2.)
}

pub(crate) fn p2() -> Point {
    Point::new(2., 3.)
}

pub(crate) fn p_z() -> Point {
    Point::new_z(13.404954, 52.520008, 34.)
}

pub(crate) fn p_m() -> Point {
    Point::new_m(-71.060316, 48.432044, 10.)
}

pub(crate) fn p_zm() -> Point {
    Point::new_zm(1.5, -2.25, 3.125, 0.1)
}
