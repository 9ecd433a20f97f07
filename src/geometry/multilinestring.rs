use crate::datatypes::Dimension;
use crate::geometry::{infer_attributes, normalize_srid, GeometryTrait, GeometryType, LineString};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLineString {
    line_strings: Vec<LineString>,
    dim: Dimension,
    srid: Option<u32>,
}

impl MultiLineString {
    pub fn new(line_strings: Vec<LineString>) -> Self {
        let (dim, srid) = infer_attributes(&line_strings);
        let mut multi_line_string = Self::from_parts(line_strings, dim, None);
        multi_line_string.set_srid(srid);
        multi_line_string
    }

    pub fn empty(dim: Dimension) -> Self {
        Self::from_parts(vec![], dim, None)
    }

    pub(crate) fn from_parts(
        line_strings: Vec<LineString>,
        dim: Dimension,
        srid: Option<u32>,
    ) -> Self {
        Self {
            line_strings,
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
        self.line_strings.iter_mut().for_each(|l| l.set_srid(srid));
    }

    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }

    pub fn num_line_strings(&self) -> usize {
        self.line_strings.len()
    }

    pub fn into_line_strings(self) -> Vec<LineString> {
        self.line_strings
    }
}

impl GeometryTrait for MultiLineString {
    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn srid(&self) -> Option<u32> {
        self.srid
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiLineString
    }

    fn is_empty(&self) -> bool {
        self.line_strings.is_empty()
    }
}
