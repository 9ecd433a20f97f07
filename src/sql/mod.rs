//! Build PostGIS function calls whose arguments mix geometries, boxes, subqueries and bound
//! values.
//!
//! ```
//! use geocodec::config::SqlOptions;
//! use geocodec::geometry::Point;
//! use geocodec::sql::PostgisFunction;
//!
//! let expr = PostgisFunction::new("ST_Distance")
//!     .cast("geography")
//!     .param(Point::new(1., 2.).with_srid(4326))
//!     .value("location")
//!     .alias("distance")
//!     .build(&SqlOptions::default())
//!     .unwrap();
//! assert_eq!(
//!     expr.sql,
//!     "ST_Distance(public.st_geomfromewkt('SRID=4326;POINT (1.0 2.0)')::geography, \
//!      location::geography) AS distance"
//! );
//! ```

use std::fmt::Display;

use crate::boxes::{Box2D, Box3D};
use crate::config::SqlOptions;
use crate::error::Result;
use crate::geometry::Geometry;

/// A value sent to the database separately from the SQL text, in place of a `?`.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

macro_rules! impl_binding_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for BindingValue {
                fn from(value: $ty) -> Self {
                    BindingValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_binding_from!(
    bool => Bool,
    i32 => Int,
    i64 => Int,
    f64 => Float,
    String => Text,
    &str => Text,
    Vec<u8> => Bytes,
);

/// SQL text with its positional bindings, in order of the `?` markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlExpression {
    pub sql: String,
    pub bindings: Vec<BindingValue>,
}

impl SqlExpression {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: vec![],
        }
    }

    pub fn with_bindings(sql: impl Into<String>, bindings: Vec<BindingValue>) -> Self {
        Self {
            sql: sql.into(),
            bindings,
        }
    }
}

impl Display for SqlExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// One argument of a [`PostgisFunction`].
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// Embedded as a constructor literal followed by the function's cast.
    Geometry(Geometry),
    /// `'BOX(..)'::box2d`
    Box2D(Box2D),
    /// `'BOX3D(..)'::box3d`
    Box3D(Box3D),
    /// Parenthesised and cast; its bindings are carried over.
    SubQuery(SqlExpression),
    /// A `?` marker.
    Binding(BindingValue),
    /// `true` / `false`
    Bool(bool),
    /// Raw SQL, emitted as is.
    Expression(String),
    /// A column or other SQL value, followed by the function's cast.
    Value(String),
}

impl From<Geometry> for SqlParam {
    fn from(value: Geometry) -> Self {
        SqlParam::Geometry(value)
    }
}

macro_rules! impl_geometry_param_from {
    ($($ty:ident),*) => {
        $(
            impl From<crate::geometry::$ty> for SqlParam {
                fn from(value: crate::geometry::$ty) -> Self {
                    SqlParam::Geometry(value.into())
                }
            }
        )*
    };
}

impl_geometry_param_from!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);

impl From<Box2D> for SqlParam {
    fn from(value: Box2D) -> Self {
        SqlParam::Box2D(value)
    }
}

impl From<Box3D> for SqlParam {
    fn from(value: Box3D) -> Self {
        SqlParam::Box3D(value)
    }
}

impl From<SqlExpression> for SqlParam {
    fn from(value: SqlExpression) -> Self {
        SqlParam::SubQuery(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

impl From<BindingValue> for SqlParam {
    fn from(value: BindingValue) -> Self {
        SqlParam::Binding(value)
    }
}

/// A call to a PostGIS function.
#[derive(Debug, Clone, PartialEq)]
pub struct PostgisFunction {
    name: String,
    cast: Option<String>,
    alias: Option<String>,
    params: Vec<SqlParam>,
}

impl PostgisFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cast: None,
            alias: None,
            params: vec![],
        }
    }

    /// Type appended as `::<cast>` to geometry, subquery and value arguments.
    pub fn cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = Some(cast.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn param(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn value(self, value: impl Into<String>) -> Self {
        self.param(SqlParam::Value(value.into()))
    }

    pub fn expression(self, expression: impl Into<String>) -> Self {
        self.param(SqlParam::Expression(expression.into()))
    }

    pub fn binding(self, value: impl Into<BindingValue>) -> Self {
        self.param(SqlParam::Binding(value.into()))
    }

    /// Adds a binding only when a value is present.
    pub fn binding_if_some<T: Into<BindingValue>>(self, value: Option<T>) -> Self {
        match value {
            Some(value) => self.binding(value),
            None => self,
        }
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    pub fn build(&self, options: &SqlOptions) -> Result<SqlExpression> {
        options.validate()?;

        let cast = self
            .cast
            .as_deref()
            .map(|cast| format!("::{cast}"))
            .unwrap_or_default();
        let mut bindings = vec![];
        let mut rendered = Vec::with_capacity(self.params.len());
        for param in &self.params {
            let sql = match param {
                SqlParam::Geometry(geom) => format!("{}{cast}", options.geometry_literal(geom)?),
                SqlParam::Box2D(b) => format!("'{b}'::box2d"),
                SqlParam::Box3D(b) => format!("'{b}'::box3d"),
                SqlParam::SubQuery(sub) => {
                    bindings.extend(sub.bindings.iter().cloned());
                    format!("({}){cast}", sub.sql)
                }
                SqlParam::Binding(value) => {
                    bindings.push(value.clone());
                    "?".to_string()
                }
                SqlParam::Bool(value) => value.to_string(),
                SqlParam::Expression(sql) => sql.clone(),
                SqlParam::Value(value) => format!("{value}{cast}"),
            };
            rendered.push(sql);
        }

        let mut sql = format!("{}({})", self.name, rendered.join(", "));
        if let Some(alias) = &self.alias {
            sql.push_str(" AS ");
            sql.push_str(alias);
        }
        tracing::trace!(function = %self.name, bindings = bindings.len(), "built PostGIS call");
        Ok(SqlExpression { sql, bindings })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::SqlLiteralFormat;
    use crate::error::GeoCodecError;
    use crate::geometry::Point;
    use crate::test::point;

    #[test]
    fn geometry_with_cast() {
        let expr = PostgisFunction::new("ST_Buffer")
            .cast("geometry")
            .param(point::p1().with_srid(4326))
            .value("10")
            .build(&SqlOptions::default())
            .unwrap();
        assert_eq!(
            expr.sql,
            "ST_Buffer(public.st_geomfromewkt('SRID=4326;POINT (1.0 2.0)')::geometry, 10::geometry)"
        );
        assert!(expr.bindings.is_empty());
    }

    #[test]
    fn boxes_ignore_cast() {
        let expr = PostgisFunction::new("ST_MakeBox2D")
            .cast("geography")
            .param(Box2D::new(Point::new(0., 0.), Point::new(1., 1.)))
            .param(Box3D::new(Point::new_z(0., 0., 0.), Point::new_z(1., 1., 1.)))
            .build(&SqlOptions::default())
            .unwrap();
        assert_eq!(
            expr.sql,
            "ST_MakeBox2D('BOX(0.0 0.0,1.0 1.0)'::box2d, 'BOX3D(0.0 0.0 0.0,1.0 1.0 1.0)'::box3d)"
        );
    }

    #[test]
    fn bindings_in_order() {
        let sub = SqlExpression::with_bindings(
            "select geom from places where id = ?",
            vec![BindingValue::Int(7)],
        );
        let expr = PostgisFunction::new("ST_DWithin")
            .cast("geography")
            .value("location")
            .param(sub)
            .binding(1500.5)
            .param(true)
            .build(&SqlOptions::default())
            .unwrap();
        assert_eq!(
            expr.sql,
            "ST_DWithin(location::geography, \
             (select geom from places where id = ?)::geography, ?, true)"
        );
        assert_eq!(
            expr.bindings,
            vec![BindingValue::Int(7), BindingValue::Float(1500.5)]
        );
    }

    #[test]
    fn optional_bindings_and_alias() {
        let expr = PostgisFunction::new("ST_Simplify")
            .expression("\"roads\".\"geom\"")
            .binding_if_some(Some(0.5))
            .binding_if_some(None::<f64>)
            .param(false)
            .alias("simplified")
            .build(&SqlOptions::default())
            .unwrap();
        assert_eq!(
            expr.to_string(),
            "ST_Simplify(\"roads\".\"geom\", ?, false) AS simplified"
        );
        assert_eq!(expr.bindings, vec![BindingValue::Float(0.5)]);
    }

    #[test]
    fn configured_literal_format() {
        let options = SqlOptions::new("gis", SqlLiteralFormat::GeoJson);
        let expr = PostgisFunction::new("ST_Area")
            .param(Point::new(1., 2.))
            .build(&options)
            .unwrap();
        assert!(expr.sql.starts_with("ST_Area(gis.st_geomfromgeojson('{"));
        assert!(expr.sql.contains(r#""coordinates":[1.0,2.0]"#));
        assert!(expr.sql.ends_with("}'))"));
    }

    #[test]
    fn invalid_schema() {
        let options = SqlOptions::new("x'y", SqlLiteralFormat::Wkt);
        let err = PostgisFunction::new("ST_Area")
            .param(Point::new(1., 2.))
            .build(&options)
            .unwrap_err();
        assert!(matches!(err, GeoCodecError::InvalidConfig { .. }));
    }
}
