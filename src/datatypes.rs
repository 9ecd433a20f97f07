use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The coordinate dimension of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dimension {
    /// Two-dimensional.
    #[default]
    XY,

    /// Three-dimensional, with altitude.
    XYZ,

    /// XYM (2D with measure).
    XYM,

    /// XYZM (3D with measure).
    XYZM,
}

impl Dimension {
    /// Construct from whether the coordinates carry an altitude and a measure.
    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dimension::XY,
            (true, false) => Dimension::XYZ,
            (false, true) => Dimension::XYM,
            (true, true) => Dimension::XYZM,
        }
    }

    /// Returns the number of dimensions.
    pub fn size(&self) -> usize {
        match self {
            Dimension::XY => 2,
            Dimension::XYZ => 3,
            Dimension::XYM => 3,
            Dimension::XYZM => 4,
        }
    }

    /// Whether coordinates of this dimension carry an altitude.
    pub fn has_z(&self) -> bool {
        matches!(self, Dimension::XYZ | Dimension::XYZM)
    }

    /// Whether coordinates of this dimension carry a measure.
    pub fn has_m(&self) -> bool {
        matches!(self, Dimension::XYM | Dimension::XYZM)
    }

    /// The WKT dimension tag, empty for XY.
    pub fn wkt_tag(&self) -> &'static str {
        match self {
            Dimension::XY => "",
            Dimension::XYZ => "Z",
            Dimension::XYM => "M",
            Dimension::XYZM => "ZM",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::XY => write!(f, "XY"),
            Dimension::XYZ => write!(f, "XYZ"),
            Dimension::XYM => write!(f, "XYM"),
            Dimension::XYZM => write!(f, "XYZM"),
        }
    }
}

/// Parses either the [Display] form (`XYZ`) or a WKT tag (`Z`, `M`, `ZM`), case-insensitively.
impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "" | "XY" => Ok(Dimension::XY),
            "Z" | "XYZ" => Ok(Dimension::XYZ),
            "M" | "XYM" => Ok(Dimension::XYM),
            "ZM" | "XYZM" => Ok(Dimension::XYZM),
            _ => Err(format!("Unknown dimension: {s}")),
        }
    }
}
