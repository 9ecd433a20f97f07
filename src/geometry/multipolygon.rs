use crate::datatypes::Dimension;
use crate::geometry::{infer_attributes, normalize_srid, GeometryTrait, GeometryType, Polygon};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    dim: Dimension,
    srid: Option<u32>,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let (dim, srid) = infer_attributes(&polygons);
        let mut multi_polygon = Self::from_parts(polygons, dim, None);
        multi_polygon.set_srid(srid);
        multi_polygon
    }

    pub fn empty(dim: Dimension) -> Self {
        Self::from_parts(vec![], dim, None)
    }

    pub(crate) fn from_parts(polygons: Vec<Polygon>, dim: Dimension, srid: Option<u32>) -> Self {
        Self {
            polygons,
            dim,
            srid,
        }
    }

    pub fn with_srid(mut self, srid: impl Into<Option<u32>>) -> Self {
        self.set_srid(normalize_srid(srid.into()));
        self
    }

    pub(crate) fn set_srid(&mut self, srid: Option<u32>) {
        self.srid = srid;
        self.polygons.iter_mut().for_each(|p| p.set_srid(srid));
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }
}

impl GeometryTrait for MultiPolygon {
    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn srid(&self) -> Option<u32> {
        self.srid
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
    }

    fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
