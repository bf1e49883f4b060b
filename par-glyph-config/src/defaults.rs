//! Default value functions for configuration.
//!
//! Each function backs a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field, so partial YAML files fill in the rest.

use std::path::PathBuf;

use crate::types::LayoutMode;

// ── Glyph geometry ─────────────────────────────────────────────────────────

pub fn glyph_height() -> u32 {
    30 // Fits a 128x64 OLED with two lines of text
}

pub fn render_size() -> f32 {
    72.0
}

pub fn canvas_height() -> u32 {
    100
}

pub fn baseline() -> u32 {
    80 // Leaves room above for stacked vowel and tone marks
}

// ── Binarization & cropping ────────────────────────────────────────────────

pub fn threshold() -> u8 {
    128
}

pub fn blank_width_ratio() -> f32 {
    0.25
}

pub fn letter_spacing_ratio() -> f32 {
    0.0
}

pub fn layout() -> LayoutMode {
    LayoutMode::Variable
}

// ── Runtime ────────────────────────────────────────────────────────────────

pub fn workers() -> usize {
    0 // 0 = use available parallelism
}

pub fn display_width() -> usize {
    80
}

// ── Outputs ────────────────────────────────────────────────────────────────

pub fn bitmap_header() -> PathBuf {
    PathBuf::from("arduino_code/glyph_bitmaps.h")
}

pub fn phrase_header() -> PathBuf {
    PathBuf::from("arduino_code/phrases_to_display.h")
}
