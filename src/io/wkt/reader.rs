use crate::datatypes::Dimension;
use crate::error::{GeoCodecError, Result};
use crate::geometry::*;
use crate::io::MAX_NESTING_DEPTH;

/// Parse EWKT (or plain WKT) text.
///
/// Keywords are case-insensitive. The dimension tag may be separate (`POINT Z`) or fused
/// (`POINTZ`); untagged text takes its dimension from the arity of the first coordinate
/// tuple. Error offsets are byte positions in `input`.
pub fn from_wkt(input: &str) -> Result<Geometry> {
    WktReader::new(input).parse().inspect_err(|err| {
        tracing::debug!(
            format = "wkt",
            offset = ?err.offset(),
            error = %err,
            "rejected input"
        );
    })
}

impl std::str::FromStr for Geometry {
    type Err = GeoCodecError;

    fn from_str(s: &str) -> Result<Self> {
        from_wkt(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    LParen,
    RParen,
    Comma,
    Semicolon,
    Equals,
    Word(&'a str),
}

impl Token<'_> {
    fn describe(&self) -> String {
        match self {
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::Equals => "'='".to_string(),
            Token::Word(word) => format!("'{word}'"),
        }
    }

    fn number(&self) -> Option<f64> {
        match self {
            Token::Word(word) => word.parse().ok(),
            _ => None,
        }
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(word) if word.eq_ignore_ascii_case(keyword))
    }
}

struct WktReader<'a> {
    input: &'a str,
    pos: usize,
    /// Collections currently open.
    depth: usize,
}

impl<'a> WktReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<Geometry> {
        let srid = self.parse_srid()?;
        let geom = self.parse_geometry(None)?;
        if let Some((_, offset)) = self.peek() {
            return Err(GeoCodecError::TrailingInput { offset });
        }
        Ok(match srid {
            Some(srid) => geom.with_srid(srid),
            None => geom,
        })
    }

    /// The next token and its offset, without consuming it.
    fn peek(&self) -> Option<(Token<'a>, usize)> {
        let rest = &self.input[self.pos..];
        let start = self.pos + (rest.len() - rest.trim_start().len());
        let rest = &self.input[start..];
        let token = match rest.chars().next()? {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '=' => Token::Equals,
            _ => {
                let len = rest
                    .find(|c: char| c.is_whitespace() || "(),;=".contains(c))
                    .unwrap_or(rest.len());
                Token::Word(&rest[..len])
            }
        };
        Some((token, start))
    }

    fn next(&mut self) -> Option<(Token<'a>, usize)> {
        let (token, offset) = self.peek()?;
        let len = match token {
            Token::Word(word) => word.len(),
            _ => 1,
        };
        self.pos = offset + len;
        Some((token, offset))
    }

    fn unexpected(token: Token, offset: usize, expected: &str) -> GeoCodecError {
        GeoCodecError::UnexpectedToken {
            offset,
            message: format!("expected {expected}, found {}", token.describe()),
        }
    }

    fn truncated(&self, expected: &'static str) -> GeoCodecError {
        GeoCodecError::TruncatedInput {
            offset: self.input.len(),
            expected,
        }
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<usize> {
        match self.next() {
            Some((token, offset)) if token == expected => Ok(offset),
            Some((token, offset)) => Err(Self::unexpected(token, offset, description)),
            None => Err(self.truncated(description)),
        }
    }

    /// Optional `SRID=<n>;` prefix.
    fn parse_srid(&mut self) -> Result<Option<u32>> {
        match self.peek() {
            Some((token, _)) if token.is_keyword("SRID") => {
                self.next();
            }
            _ => return Ok(None),
        }
        self.expect(Token::Equals, "'='")?;
        let srid = match self.next() {
            Some((Token::Word(word), offset)) => {
                word.parse::<u32>()
                    .map_err(|_| GeoCodecError::MalformedHeader {
                        offset,
                        message: format!("invalid SRID '{word}'"),
                    })?
            }
            Some((token, offset)) => return Err(Self::unexpected(token, offset, "SRID value")),
            None => return Err(self.truncated("SRID value")),
        };
        self.expect(Token::Semicolon, "';'")?;
        Ok(normalize_srid(Some(srid)))
    }

    /// A tagged geometry. `inherited` is the dimension declared by an enclosing collection.
    fn parse_geometry(&mut self, inherited: Option<Dimension>) -> Result<Geometry> {
        let (word, offset) = match self.next() {
            Some((Token::Word(word), offset)) => (word, offset),
            Some((token, offset)) => {
                return Err(Self::unexpected(token, offset, "geometry keyword"))
            }
            None => return Err(self.truncated("geometry keyword")),
        };
        let (geometry_type, fused) =
            split_keyword(word).ok_or_else(|| GeoCodecError::MalformedHeader {
                offset,
                message: format!("unknown geometry type '{word}'"),
            })?;

        let mut tag = fused;
        if let Some((Token::Word(word), tag_offset)) = self.peek() {
            if let Some(separate) = parse_tag(word) {
                if tag.is_some() {
                    return Err(GeoCodecError::UnexpectedToken {
                        offset: tag_offset,
                        message: format!("duplicate dimension tag '{word}'"),
                    });
                }
                self.next();
                tag = Some(separate);
            }
        }

        if let (Some(tag), Some(inherited)) = (tag, inherited) {
            if tag != inherited {
                return Err(GeoCodecError::DimensionMismatch {
                    offset,
                    message: format!("{tag} member inside a {inherited} collection"),
                });
            }
        }
        let mut dim = tag.or(inherited);

        let geom = match geometry_type {
            GeometryType::Point => {
                let coords = self.parse_point_text(&mut dim)?;
                Geometry::Point(build_point(coords, resolved(dim)))
            }
            GeometryType::LineString => {
                let points = self.parse_coord_sequence(&mut dim)?;
                Geometry::LineString(build_line_string(points, resolved(dim)))
            }
            GeometryType::Polygon => {
                let rings = self.parse_polygon_text(&mut dim)?;
                Geometry::Polygon(build_polygon(rings, resolved(dim)))
            }
            GeometryType::MultiPoint => {
                let points = self.parse_multi_point_text(&mut dim)?;
                let dim = resolved(dim);
                let points = points.into_iter().map(|p| build_point(p, dim)).collect();
                Geometry::MultiPoint(MultiPoint::from_parts(points, dim, None))
            }
            GeometryType::MultiLineString => {
                let lines = self.parse_list(|p| p.parse_coord_sequence(&mut dim))?;
                let dim = resolved(dim);
                let lines = lines
                    .into_iter()
                    .map(|points| build_line_string(points, dim))
                    .collect();
                Geometry::MultiLineString(MultiLineString::from_parts(lines, dim, None))
            }
            GeometryType::MultiPolygon => {
                let polygons = self.parse_list(|p| p.parse_polygon_text(&mut dim))?;
                let dim = resolved(dim);
                let polygons = polygons
                    .into_iter()
                    .map(|rings| build_polygon(rings, dim))
                    .collect();
                Geometry::MultiPolygon(MultiPolygon::from_parts(polygons, dim, None))
            }
            GeometryType::GeometryCollection => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(GeoCodecError::UnexpectedToken {
                        offset,
                        message: format!("collections nested deeper than {MAX_NESTING_DEPTH}"),
                    });
                }
                self.depth += 1;
                let geometries = self.parse_list(|p| p.parse_geometry(tag))?;
                self.depth -= 1;
                let dim = tag
                    .or_else(|| geometries.first().map(|g| g.dimension()))
                    .unwrap_or_default();
                Geometry::GeometryCollection(GeometryCollection::from_parts(geometries, dim, None))
            }
        };
        Ok(geom)
    }

    /// Consume `EMPTY` (returning `None`) or `(` (returning its offset).
    fn parse_empty_or_open(&mut self) -> Result<Option<usize>> {
        match self.next() {
            Some((token, _)) if token.is_keyword("EMPTY") => Ok(None),
            Some((Token::LParen, offset)) => Ok(Some(offset)),
            Some((token, offset)) => Err(Self::unexpected(token, offset, "'(' or EMPTY")),
            None => Err(self.truncated("'(' or EMPTY")),
        }
    }

    /// After an item of the list opened at `open`: `true` on `,`, `false` on `)`.
    fn parse_separator(&mut self, open: usize) -> Result<bool> {
        match self.next() {
            Some((Token::Comma, _)) => Ok(true),
            Some((Token::RParen, _)) => Ok(false),
            Some((token, offset)) => Err(Self::unexpected(token, offset, "',' or ')'")),
            None => Err(GeoCodecError::UnterminatedStructure {
                offset: self.input.len(),
                message: format!("missing ')' for '(' at offset {open}"),
            }),
        }
    }

    /// `EMPTY` or a parenthesised, comma separated list of items.
    fn parse_list<T>(&mut self, mut parse_item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let mut items = vec![];
        if let Some(open) = self.parse_empty_or_open()? {
            loop {
                items.push(parse_item(self)?);
                if !self.parse_separator(open)? {
                    break;
                }
            }
        }
        Ok(items)
    }

    /// One coordinate tuple. Fixes `dim` from the tuple's arity if it is not yet known.
    fn parse_tuple(&mut self, dim: &mut Option<Dimension>) -> Result<Vec<f64>> {
        let start = match self.peek() {
            Some((token, offset)) if token.number().is_some() => offset,
            Some((token, offset)) => return Err(Self::unexpected(token, offset, "coordinate")),
            None => return Err(self.truncated("coordinate")),
        };

        let mut coords = Vec::with_capacity(4);
        while let Some(value) = self.peek().and_then(|(token, _)| token.number()) {
            self.next();
            coords.push(value);
        }

        let arity_dim = match coords.len() {
            2 => Some(Dimension::XY),
            3 => Some(Dimension::XYZ),
            4 => Some(Dimension::XYZM),
            _ => None,
        };
        match (*dim, arity_dim) {
            (Some(dim), _) if dim.size() == coords.len() => Ok(coords),
            (None, Some(arity_dim)) => {
                *dim = Some(arity_dim);
                Ok(coords)
            }
            (Some(dim), _) => Err(GeoCodecError::DimensionMismatch {
                offset: start,
                message: format!("{} ordinates for a {dim} geometry", coords.len()),
            }),
            (None, None) => Err(GeoCodecError::DimensionMismatch {
                offset: start,
                message: format!("{} ordinates in a coordinate", coords.len()),
            }),
        }
    }

    /// `EMPTY` or `(x y ...)`. `None` for an empty point.
    fn parse_point_text(&mut self, dim: &mut Option<Dimension>) -> Result<Option<Vec<f64>>> {
        match self.parse_empty_or_open()? {
            None => Ok(None),
            Some(open) => {
                let coords = self.parse_tuple(dim)?;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(Some(coords)),
                    Some((token, offset)) => Err(Self::unexpected(token, offset, "')'")),
                    None => Err(GeoCodecError::UnterminatedStructure {
                        offset: self.input.len(),
                        message: format!("missing ')' for '(' at offset {open}"),
                    }),
                }
            }
        }
    }

    fn parse_coord_sequence(&mut self, dim: &mut Option<Dimension>) -> Result<Vec<Vec<f64>>> {
        self.parse_list(|p| p.parse_tuple(dim))
    }

    fn parse_polygon_text(&mut self, dim: &mut Option<Dimension>) -> Result<Vec<Vec<Vec<f64>>>> {
        self.parse_list(|p| p.parse_coord_sequence(dim))
    }

    /// Members either parenthesised, `((1 2),(3 4))`, or bare, `(1 2,3 4)`.
    fn parse_multi_point_text(
        &mut self,
        dim: &mut Option<Dimension>,
    ) -> Result<Vec<Option<Vec<f64>>>> {
        self.parse_list(|p| match p.peek() {
            Some((token, _)) if token.number().is_some() => p.parse_tuple(dim).map(Some),
            _ => p.parse_point_text(dim),
        })
    }
}

/// Split a keyword like `POINTZM` into its geometry type and fused dimension tag.
fn split_keyword(word: &str) -> Option<(GeometryType, Option<Dimension>)> {
    let upper = word.to_ascii_uppercase();
    let (base, tag) = [("ZM", Dimension::XYZM), ("Z", Dimension::XYZ), ("M", Dimension::XYM)]
        .into_iter()
        .find_map(|(suffix, dim)| {
            upper
                .strip_suffix(suffix)
                .filter(|base| keyword_type(base).is_some())
                .map(|base| (base, Some(dim)))
        })
        .unwrap_or((upper.as_str(), None));
    Some((keyword_type(base)?, tag))
}

fn keyword_type(keyword: &str) -> Option<GeometryType> {
    [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ]
    .into_iter()
    .find(|typ| typ.wkt_keyword() == keyword)
}

fn parse_tag(word: &str) -> Option<Dimension> {
    match word.to_ascii_uppercase().as_str() {
        "Z" => Some(Dimension::XYZ),
        "M" => Some(Dimension::XYM),
        "ZM" => Some(Dimension::XYZM),
        _ => None,
    }
}

fn resolved(dim: Option<Dimension>) -> Dimension {
    dim.unwrap_or_default()
}

/// Tuples were checked against `dim` as they were read.
fn build_point(coords: Option<Vec<f64>>, dim: Dimension) -> Point {
    coords
        .and_then(|coords| Point::from_coords(dim, &coords))
        .unwrap_or_else(|| Point::empty(dim))
}

fn build_line_string(points: Vec<Vec<f64>>, dim: Dimension) -> LineString {
    let points = points
        .into_iter()
        .map(|coords| build_point(Some(coords), dim))
        .collect();
    LineString::from_parts(points, dim, None)
}

fn build_polygon(rings: Vec<Vec<Vec<f64>>>, dim: Dimension) -> Polygon {
    let rings = rings
        .into_iter()
        .map(|ring| build_line_string(ring, dim))
        .collect();
    Polygon::from_parts(rings, dim, None)
}
