//! Shared integration test helpers for par-glyph.
//!
//! [`MockFont`] is a deterministic shaping + rasterizing backend, so the
//! pipeline can be exercised without any font files installed:
//!
//! - every character shapes to one glyph whose id is its code point
//! - letters rasterize to a solid block 60px tall sitting on the baseline,
//!   with a width that varies by glyph id
//! - Lao vowel/tone marks (and U+0301) have zero advance and rasterize to a
//!   small block above the preceding base glyph
//! - whitespace has an advance but no image
//! - characters listed in `missing` shape to `.notdef`
//!
//! Include it with `mod common;` at the top of each test file.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use par_glyph::PipelineOptions;
use par_glyph_config::Config;
use par_glyph_fonts::{GlyphRasterizer, NOTDEF_GLYPH, RasterizedGlyph, ShapedGlyph, Shaper};

/// Advance of a base glyph at render size
pub const BASE_ADVANCE: f32 = 40.0;
/// Advance of a space
pub const SPACE_ADVANCE: f32 = 30.0;

pub fn is_mark(c: char) -> bool {
    matches!(c, '\u{0EB1}' | '\u{0EB4}'..='\u{0EBC}' | '\u{0EC8}'..='\u{0ECD}' | '\u{0301}')
}

fn solid(width: u32, height: u32, left: i32, top: i32) -> RasterizedGlyph {
    RasterizedGlyph {
        width,
        height,
        left,
        top,
        pixels: vec![255; (width * height) as usize],
    }
}

#[derive(Debug, Default)]
pub struct MockFont {
    /// Characters the font has no glyph for
    pub missing: Vec<char>,
    shape_calls: AtomicUsize,
}

impl MockFont {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(missing: &[char]) -> Self {
        Self {
            missing: missing.to_vec(),
            ..Self::default()
        }
    }

    /// How many times `shape` has been called
    pub fn shape_calls(&self) -> usize {
        self.shape_calls.load(Ordering::SeqCst)
    }

    /// Width of a base glyph's ink block, 8..=26 px
    pub fn base_width(glyph_id: u32) -> u32 {
        8 + (glyph_id % 4) * 6
    }
}

impl Shaper for MockFont {
    fn shape(&self, text: &str) -> Vec<ShapedGlyph> {
        self.shape_calls.fetch_add(1, Ordering::SeqCst);
        text.char_indices()
            .map(|(i, c)| {
                let glyph_id = if self.missing.contains(&c) {
                    NOTDEF_GLYPH
                } else {
                    c as u32
                };
                let x_advance = if is_mark(c) {
                    0.0
                } else if c.is_whitespace() {
                    SPACE_ADVANCE
                } else {
                    BASE_ADVANCE
                };
                ShapedGlyph {
                    glyph_id,
                    cluster: i as u32,
                    x_advance,
                    y_advance: 0.0,
                    x_offset: 0.0,
                    y_offset: 0.0,
                }
            })
            .collect()
    }
}

impl GlyphRasterizer for MockFont {
    fn rasterize(&self, glyph_id: u32) -> Option<RasterizedGlyph> {
        let c = char::from_u32(glyph_id)?;
        if glyph_id == NOTDEF_GLYPH || c.is_whitespace() {
            None
        } else if is_mark(c) {
            // Drawn back over the preceding base glyph, well above its top
            Some(solid(10, 12, -20, 78))
        } else {
            Some(solid(Self::base_width(glyph_id), 60, 4, 60))
        }
    }

    fn advance_width(&self, glyph_id: u32) -> Option<f32> {
        match char::from_u32(glyph_id) {
            Some(c) if is_mark(c) => Some(0.0),
            Some(c) if c.is_whitespace() => Some(SPACE_ADVANCE),
            Some(_) => Some(BASE_ADVANCE),
            None => None,
        }
    }
}

/// Pipeline options for glyph height `height`, everything else default.
pub fn options(height: u32) -> PipelineOptions {
    PipelineOptions::from_config(&Config::default().with_glyph_height(height))
}

/// Pipeline options for glyph height `height` with a fixed worker count.
pub fn options_with_workers(height: u32, workers: usize) -> PipelineOptions {
    PipelineOptions::from_config(
        &Config::default()
            .with_glyph_height(height)
            .with_workers(workers),
    )
}

/// A batch of Lao and Latin phrases with plenty of shared clusters.
pub fn sample_phrases() -> Vec<String> {
    [
        "ສະບາຍດີ",
        "ຂອບໃຈ",
        "ກິນເຂົ້າ",
        "hello world",
        "ສະບາຍດີ ຂອບໃຈ",
        "",
        "abc cba",
        "ເຈົ້າສະບາຍດີບໍ່",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
