use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::FacemarkError;

/// How detected landmarks are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// One point per landmark.
    #[default]
    Points,
    /// Anatomical outline (68-point faces only).
    Face,
    /// Delaunay triangulation of the landmarks.
    Delaunay,
}

impl DisplayMode {
    pub const ALL: &[DisplayMode] = &[DisplayMode::Points, DisplayMode::Face, DisplayMode::Delaunay];

    /// Integer code used in parameter maps.
    pub fn code(self) -> i32 {
        match self {
            DisplayMode::Points => 0,
            DisplayMode::Face => 1,
            DisplayMode::Delaunay => 2,
        }
    }
}

impl TryFrom<i32> for DisplayMode {
    type Error = FacemarkError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DisplayMode::Points),
            1 => Ok(DisplayMode::Face),
            2 => Ok(DisplayMode::Delaunay),
            other => Err(FacemarkError::invalid(format!(
                "Display type must be 0 (points), 1 (face) or 2 (delaunay), got {other}"
            ))),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = FacemarkError;

    /// Accepts either the lowercase name or the integer code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "points" => Ok(DisplayMode::Points),
            "face" => Ok(DisplayMode::Face),
            "delaunay" => Ok(DisplayMode::Delaunay),
            _ => s
                .parse::<i32>()
                .map_err(|_| FacemarkError::invalid(format!("Unknown display type '{s}'")))
                .and_then(DisplayMode::try_from),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Points => write!(f, "Points"),
            DisplayMode::Face => write!(f, "Face"),
            DisplayMode::Delaunay => write!(f, "Delaunay"),
        }
    }
}
