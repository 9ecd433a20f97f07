use crate::geometry::{MultiPoint, Point};

pub(crate) fn mp0() -> MultiPoint {
    MultiPoint::new(vec![Point::new(0., 1.), Point::new(1., 2.)])
}

pub(crate) fn mp_z() -> MultiPoint {
    MultiPoint::new(vec![Point::new_z(0., 1., 2.), Point::new_z(3., 4., 5.)])
}
