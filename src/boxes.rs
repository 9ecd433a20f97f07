//! Axis-aligned bounding boxes in their PostGIS text form.
//!
//! A [`Box2D`] renders as `BOX(xmin ymin,xmax ymax)` and a [`Box3D`] as
//! `BOX3D(xmin ymin zmin,xmax ymax zmax)`, which is what PostGIS accepts for the `box2d` and
//! `box3d` types.

use std::fmt::{Display, Write};
use std::str::FromStr;

use crate::error::{GeoCodecError, Result};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box2D {
    lower_left: Point,
    upper_right: Point,
}

impl Box2D {
    pub fn new(lower_left: Point, upper_right: Point) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    pub fn lower_left(&self) -> &Point {
        &self.lower_left
    }

    pub fn upper_right(&self) -> &Point {
        &self.upper_right
    }
}

impl Display for Box2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BOX(")?;
        write_ordinates(f, &[self.lower_left.x(), self.lower_left.y()])?;
        f.write_char(',')?;
        write_ordinates(f, &[self.upper_right.x(), self.upper_right.y()])?;
        f.write_char(')')
    }
}

impl FromStr for Box2D {
    type Err = GeoCodecError;

    fn from_str(s: &str) -> Result<Self> {
        let [lower, upper] = parse_corners::<2>(s, "BOX")?;
        Ok(Self::new(
            Point::new(lower[0], lower[1]),
            Point::new(upper[0], upper[1]),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3D {
    lower_left_bottom: Point,
    upper_right_top: Point,
}

impl Box3D {
    /// Both corners are expected to carry an altitude; a missing one is rendered as 0.
    pub fn new(lower_left_bottom: Point, upper_right_top: Point) -> Self {
        Self {
            lower_left_bottom,
            upper_right_top,
        }
    }

    pub fn lower_left_bottom(&self) -> &Point {
        &self.lower_left_bottom
    }

    pub fn upper_right_top(&self) -> &Point {
        &self.upper_right_top
    }
}

impl Display for Box3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lower = &self.lower_left_bottom;
        let upper = &self.upper_right_top;
        f.write_str("BOX3D(")?;
        write_ordinates(f, &[lower.x(), lower.y(), lower.z().unwrap_or(0.)])?;
        f.write_char(',')?;
        write_ordinates(f, &[upper.x(), upper.y(), upper.z().unwrap_or(0.)])?;
        f.write_char(')')
    }
}

impl FromStr for Box3D {
    type Err = GeoCodecError;

    fn from_str(s: &str) -> Result<Self> {
        let [lower, upper] = parse_corners::<3>(s, "BOX3D")?;
        Ok(Self::new(
            Point::new_z(lower[0], lower[1], lower[2]),
            Point::new_z(upper[0], upper[1], upper[2]),
        ))
    }
}

fn write_ordinates(f: &mut impl Write, ordinates: &[f64]) -> std::fmt::Result {
    for (idx, value) in ordinates.iter().enumerate() {
        if idx > 0 {
            f.write_char(' ')?;
        }
        let mut buffer = ryu::Buffer::new();
        f.write_str(buffer.format(*value))?;
    }
    Ok(())
}

fn parse_corners<const D: usize>(s: &str, keyword: &str) -> Result<[[f64; D]; 2]> {
    let invalid = || GeoCodecError::InvalidBox(s.to_string());

    let s = s.trim();
    let (head, rest) = s.split_at_checked(keyword.len()).ok_or_else(invalid)?;
    if !head.eq_ignore_ascii_case(keyword) {
        return Err(invalid());
    }
    let body = rest
        .trim_start()
        .strip_prefix('(')
        .and_then(|body| body.strip_suffix(')'))
        .ok_or_else(invalid)?;

    let (lower, upper) = body.split_once(',').ok_or_else(invalid)?;
    Ok([parse_corner(lower).ok_or_else(invalid)?, parse_corner(upper).ok_or_else(invalid)?])
}

fn parse_corner<const D: usize>(s: &str) -> Option<[f64; D]> {
    let mut out = [0.; D];
    let mut parts = s.split_whitespace();
    for slot in out.iter_mut() {
        *slot = parts.next()?.parse().ok()?;
    }
    parts.next().is_none().then_some(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn box2d_text() {
        let b = Box2D::new(Point::new(1., 2.), Point::new(3.5, 4.));
        assert_eq!(b.to_string(), "BOX(1.0 2.0,3.5 4.0)");
        assert_eq!(b.to_string().parse::<Box2D>().unwrap(), b);
        assert_eq!("box( -1 -2 , 3 4 )".parse::<Box2D>().unwrap().lower_left().x(), -1.);
    }

    #[test]
    fn box3d_text() {
        let b = Box3D::new(Point::new_z(1., 2., 3.), Point::new_z(4., 5., 6.));
        assert_eq!(b.to_string(), "BOX3D(1.0 2.0 3.0,4.0 5.0 6.0)");
        assert_eq!(b.to_string().parse::<Box3D>().unwrap(), b);
    }

    #[test]
    fn rejects_malformed_boxes() {
        assert!("BOX(1 2,3)".parse::<Box2D>().is_err());
        assert!("BOX(1 2 3,4 5 6)".parse::<Box2D>().is_err());
        assert!("POLYGON(1 2,3 4)".parse::<Box2D>().is_err());
        assert!("BOX3D(1 2 3,4 5 6".parse::<Box3D>().is_err());
    }
}
