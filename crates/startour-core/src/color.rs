//! Coarse color bands derived from the B-V color index

use crate::constants::{BLUE_WHITE_EDGE, WHITE_YELLOW_EDGE, YELLOW_RED_EDGE};
use serde::{Deserialize, Serialize};

/// One of four display bands for a star
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarColor {
    Blue,
    White,
    Yellow,
    Red,
}

impl StarColor {
    /// Classify a B-V color index.
    ///
    /// Total over all reals; NaN compares false against every edge and lands in `Red`.
    pub fn classify(color_index: f64) -> Self {
        if color_index < BLUE_WHITE_EDGE {
            StarColor::Blue
        } else if color_index < WHITE_YELLOW_EDGE {
            StarColor::White
        } else if color_index < YELLOW_RED_EDGE {
            StarColor::Yellow
        } else {
            StarColor::Red
        }
    }

    /// Linear RGBA used by the renderer
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            StarColor::Blue => [0.0, 0.0, 1.0, 1.0],
            StarColor::White => [1.0, 1.0, 1.0, 1.0],
            StarColor::Yellow => [1.0, 0.92, 0.016, 1.0],
            StarColor::Red => [1.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StarColor::Blue => "blue",
            StarColor::White => "white",
            StarColor::Yellow => "yellow",
            StarColor::Red => "red",
        }
    }

    pub fn all() -> &'static [StarColor] {
        &[StarColor::Blue, StarColor::White, StarColor::Yellow, StarColor::Red]
    }
}

impl std::fmt::Display for StarColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
