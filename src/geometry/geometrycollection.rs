use crate::datatypes::Dimension;
use crate::geometry::{infer_attributes, normalize_srid, Geometry, GeometryTrait, GeometryType};

/// An ordered, heterogeneous collection of geometries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    dim: Dimension,
    srid: Option<u32>,
}

impl GeometryCollection {
    /// Construct from members, taking dimension and SRID from the first one.
    pub fn new(geometries: Vec<Geometry>) -> Self {
        let (dim, srid) = infer_attributes(&geometries);
        let mut collection = Self::from_parts(geometries, dim, None);
        collection.set_srid(srid);
        collection
    }

    pub fn empty(dim: Dimension) -> Self {
        Self::from_parts(vec![], dim, None)
    }

    pub(crate) fn from_parts(geometries: Vec<Geometry>, dim: Dimension, srid: Option<u32>) -> Self {
        Self {
            geometries,
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
        self.geometries.iter_mut().for_each(|g| g.set_srid(srid));
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn num_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn into_geometries(self) -> Vec<Geometry> {
        self.geometries
    }
}

impl GeometryTrait for GeometryCollection {
    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn srid(&self) -> Option<u32> {
        self.srid
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::GeometryCollection
    }

    fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{LineString, Point};

    #[test]
    fn heterogeneous_members() {
        let gc = GeometryCollection::new(vec![
            Point::new(1., 2.).with_srid(4326).into(),
            LineString::new(vec![Point::new(0., 0.), Point::new(1., 1.)]).into(),
        ]);
        assert_eq!(gc.num_geometries(), 2);
        assert_eq!(gc.srid(), Some(4326));
        assert_eq!(gc.geometries()[1].srid(), Some(4326));
    }

    #[test]
    fn empty_keeps_dimension() {
        let gc = GeometryCollection::empty(Dimension::XYZM);
        assert!(gc.is_empty());
        assert_eq!(gc.dimension(), Dimension::XYZM);
    }
}
