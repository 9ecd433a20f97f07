use crate::datatypes::Dimension;
use crate::geometry::{infer_attributes, normalize_srid, GeometryTrait, GeometryType, LineString};

/// A polygon: an exterior ring followed by zero or more holes.
///
/// Ring closure is preserved, never checked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    rings: Vec<LineString>,
    dim: Dimension,
    srid: Option<u32>,
}

impl Polygon {
    /// Construct from rings, the first being the exterior.
    pub fn new(rings: Vec<LineString>) -> Self {
        let (dim, srid) = infer_attributes(&rings);
        let mut polygon = Self::from_parts(rings, dim, None);
        polygon.set_srid(srid);
        polygon
    }

    pub fn empty(dim: Dimension) -> Self {
        Self::from_parts(vec![], dim, None)
    }

    pub(crate) fn from_parts(rings: Vec<LineString>, dim: Dimension, srid: Option<u32>) -> Self {
        Self { rings, dim, srid }
    }

    /// Set the SRID of this polygon and its rings. `0` clears it.
    pub fn with_srid(mut self, srid: impl Into<Option<u32>>) -> Self {
        self.set_srid(normalize_srid(srid.into()));
        self
    }

    pub(crate) fn set_srid(&mut self, srid: Option<u32>) {
        self.srid = srid;
        self.rings.iter_mut().for_each(|r| r.set_srid(srid));
    }

    /// All rings, exterior first.
    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn exterior(&self) -> Option<&LineString> {
        self.rings.first()
    }

    pub fn interiors(&self) -> &[LineString] {
        self.rings.get(1..).unwrap_or_default()
    }

    pub fn into_rings(self) -> Vec<LineString> {
        self.rings
    }
}

impl GeometryTrait for Polygon {
    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn srid(&self) -> Option<u32> {
        self.srid
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
    }

    fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}
