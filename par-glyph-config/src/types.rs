//! Enumerated configuration values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How glyph bitmaps are sized horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Width follows the shaped aspect ratio, cropped to the ink.
    #[default]
    Variable,
    /// Every glyph is resized to the same width and never cropped.
    Fixed,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Variable => write!(f, "variable"),
            LayoutMode::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "variable" => Ok(LayoutMode::Variable),
            "fixed" => Ok(LayoutMode::Fixed),
            other => Err(format!(
                "unknown layout '{other}' (expected 'variable' or 'fixed')"
            )),
        }
    }
}
