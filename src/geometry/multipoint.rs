use crate::datatypes::Dimension;
use crate::geometry::{infer_attributes, normalize_srid, GeometryTrait, GeometryType, Point};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPoint {
    points: Vec<Point>,
    dim: Dimension,
    srid: Option<u32>,
}

impl MultiPoint {
    pub fn new(points: Vec<Point>) -> Self {
        let (dim, srid) = infer_attributes(&points);
        let mut multi_point = Self::from_parts(points, dim, None);
        multi_point.set_srid(srid);
        multi_point
    }

    pub fn empty(dim: Dimension) -> Self {
        Self::from_parts(vec![], dim, None)
    }

    pub(crate) fn from_parts(points: Vec<Point>, dim: Dimension, srid: Option<u32>) -> Self {
        Self { points, dim, srid }
    }

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

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl GeometryTrait for MultiPoint {
    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn srid(&self) -> Option<u32> {
        self.srid
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPoint
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
