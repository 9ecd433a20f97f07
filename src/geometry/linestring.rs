use crate::datatypes::Dimension;
use crate::geometry::{infer_attributes, normalize_srid, GeometryTrait, GeometryType, Point};

/// An ordered sequence of points.
///
/// All points are expected to share one dimension. Also used as a polygon ring.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    points: Vec<Point>,
    dim: Dimension,
    srid: Option<u32>,
}

impl LineString {
    /// Construct from points, taking dimension and SRID from the first one.
    pub fn new(points: Vec<Point>) -> Self {
        let (dim, srid) = infer_attributes(&points);
        debug_assert!(points.iter().all(|p| p.dimension() == dim));
        let mut line_string = Self::from_parts(points, dim, None);
        line_string.set_srid(srid);
        line_string
    }

    /// An empty line string of the given dimension.
    pub fn empty(dim: Dimension) -> Self {
        Self::from_parts(vec![], dim, None)
    }

    pub(crate) fn from_parts(points: Vec<Point>, dim: Dimension, srid: Option<u32>) -> Self {
        Self { points, dim, srid }
    }

    /// Set the SRID of this line string and its points. `0` clears it.
    pub fn with_srid(mut self, srid: impl Into<Option<u32>>) -> Self {
        self.set_srid(normalize_srid(srid.into()));
        self
    }

    pub(crate) fn set_srid(&mut self, srid: Option<u32>) {
        self.srid = srid;
        self.points.iter_mut().for_each(|p| p.set_srid(srid));
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Whether the first and last points coincide.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.coords().eq(last.coords()),
            _ => false,
        }
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl GeometryTrait for LineString {
    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn srid(&self) -> Option<u32> {
        self.srid
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
