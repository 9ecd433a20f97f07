use crate::datatypes::Dimension;
use crate::geometry::{normalize_srid, GeometryTrait, GeometryType};

/// A single position.
///
/// The dimension follows from which optional ordinates are present, so a point carries an
/// altitude exactly when its dimension includes Z. An empty point stores NaN ordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    z: Option<f64>,
    m: Option<f64>,
    srid: Option<u32>,
}

impl Point {
    /// A 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
            srid: None,
        }
    }

    /// A point with altitude.
    pub fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::new(x, y)
        }
    }

    /// A 2D point with measure.
    pub fn new_m(x: f64, y: f64, m: f64) -> Self {
        Self {
            m: Some(m),
            ..Self::new(x, y)
        }
    }

    /// A point with altitude and measure.
    pub fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            z: Some(z),
            m: Some(m),
            ..Self::new(x, y)
        }
    }

    /// An empty point of the given dimension.
    pub fn empty(dim: Dimension) -> Self {
        let mut point = Self::new(f64::NAN, f64::NAN);
        if dim.has_z() {
            point.z = Some(f64::NAN);
        }
        if dim.has_m() {
            point.m = Some(f64::NAN);
        }
        point
    }

    /// Construct from ordinates laid out as `x y [z] [m]` for `dim`.
    ///
    /// Returns `None` if `coords` does not hold exactly `dim.size()` values.
    pub fn from_coords(dim: Dimension, coords: &[f64]) -> Option<Self> {
        if coords.len() != dim.size() {
            return None;
        }
        let point = match dim {
            Dimension::XY => Self::new(coords[0], coords[1]),
            Dimension::XYZ => Self::new_z(coords[0], coords[1], coords[2]),
            Dimension::XYM => Self::new_m(coords[0], coords[1], coords[2]),
            Dimension::XYZM => Self::new_zm(coords[0], coords[1], coords[2], coords[3]),
        };
        Some(point)
    }

    /// Set the SRID. `0` clears it.
    pub fn with_srid(mut self, srid: impl Into<Option<u32>>) -> Self {
        self.srid = normalize_srid(srid.into());
        self
    }

    pub(crate) fn set_srid(&mut self, srid: Option<u32>) {
        self.srid = srid;
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> Option<f64> {
        self.z
    }

    pub fn m(&self) -> Option<f64> {
        self.m
    }

    /// Alias of [`Point::x`].
    pub fn longitude(&self) -> f64 {
        self.x
    }

    /// Alias of [`Point::y`].
    pub fn latitude(&self) -> f64 {
        self.y
    }

    /// Alias of [`Point::z`].
    pub fn altitude(&self) -> Option<f64> {
        self.z
    }

    /// The ordinates in `x y [z] [m]` order.
    pub fn coords(&self) -> impl Iterator<Item = f64> {
        [Some(self.x), Some(self.y), self.z, self.m]
            .into_iter()
            .flatten()
    }
}

impl GeometryTrait for Point {
    fn dimension(&self) -> Dimension {
        Dimension::from_flags(self.z.is_some(), self.m.is_some())
    }

    fn srid(&self) -> Option<u32> {
        self.srid
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn is_empty(&self) -> bool {
        self.x.is_nan() && self.y.is_nan()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dimension_follows_ordinates() {
        assert_eq!(Point::new(1., 2.).dimension(), Dimension::XY);
        assert_eq!(Point::new_z(1., 2., 3.).dimension(), Dimension::XYZ);
        assert_eq!(Point::new_m(1., 2., 3.).dimension(), Dimension::XYM);
        assert_eq!(Point::new_zm(1., 2., 3., 4.).dimension(), Dimension::XYZM);
    }

    #[test]
    fn from_coords() {
        let point = Point::from_coords(Dimension::XYM, &[1., 2., 7.]).unwrap();
        assert_eq!(point.z(), None);
        assert_eq!(point.m(), Some(7.));
        assert_eq!(point.coords().collect::<Vec<_>>(), vec![1., 2., 7.]);

        assert!(Point::from_coords(Dimension::XYZ, &[1., 2.]).is_none());
    }

    #[test]
    fn empty_point() {
        let point = Point::empty(Dimension::XYZ);
        assert!(point.is_empty());
        assert_eq!(point.dimension(), Dimension::XYZ);
        assert!(!Point::new(0., 0.).is_empty());
    }
}
