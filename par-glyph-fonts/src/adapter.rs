//! Boundary between the compiler and the font engines.
//!
//! The compiler only ever talks to a [`Shaper`] and a [`GlyphRasterizer`].
//! Both are synchronous, side-effect-free queries; implementations must be
//! shareable across rasterization worker threads.

/// Glyph identifier fonts use for "no glyph for this character" (`.notdef`).
pub const NOTDEF_GLYPH: u32 = 0;

/// A single shaped glyph with positioning information.
///
/// All metrics are in pixels at the rasterization size, with y pointing up
/// (font convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph ID from the font
    pub glyph_id: u32,

    /// Cluster index (byte offset of the input character this glyph came from)
    pub cluster: u32,

    /// Horizontal advance
    pub x_advance: f32,

    /// Vertical advance (usually 0 for horizontal text)
    pub y_advance: f32,

    /// Horizontal offset from the current pen position
    pub x_offset: f32,

    /// Vertical offset from the baseline
    pub y_offset: f32,
}

impl ShapedGlyph {
    /// Whether the font had no glyph for this position.
    pub fn is_missing(&self) -> bool {
        self.glyph_id == NOTDEF_GLYPH
    }
}

/// A rendered glyph coverage mask plus its placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizedGlyph {
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Distance from the pen position to the left edge of the bitmap
    pub left: i32,
    /// Distance from the baseline up to the top edge of the bitmap
    pub top: i32,
    /// Row-major 8-bit coverage, 255 = full ink
    pub pixels: Vec<u8>,
}

impl RasterizedGlyph {
    /// Coverage at `(x, y)`, or 0 outside the bitmap.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.iter().all(|&p| p == 0)
    }
}

/// Maps a string to an ordered sequence of positioned glyphs.
pub trait Shaper: Send + Sync {
    /// Shape `text` as a single run.
    fn shape(&self, text: &str) -> Vec<ShapedGlyph>;
}

/// Renders individual glyphs to grayscale coverage masks.
pub trait GlyphRasterizer: Send + Sync {
    /// Render one glyph. `None` means the glyph has no visible image
    /// (whitespace) or could not be rendered.
    fn rasterize(&self, glyph_id: u32) -> Option<RasterizedGlyph>;

    /// Horizontal advance of one glyph in pixels.
    fn advance_width(&self, glyph_id: u32) -> Option<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_out_of_bounds_is_zero() {
        let glyph = RasterizedGlyph {
            width: 2,
            height: 2,
            left: 0,
            top: 2,
            pixels: vec![255, 0, 0, 128],
        };
        assert_eq!(glyph.coverage(0, 0), 255);
        assert_eq!(glyph.coverage(1, 1), 128);
        assert_eq!(glyph.coverage(2, 0), 0);
        assert_eq!(glyph.coverage(0, 5), 0);
    }

    #[test]
    fn test_empty_glyph_detection() {
        let blank = RasterizedGlyph {
            width: 3,
            height: 1,
            left: 0,
            top: 0,
            pixels: vec![0, 0, 0],
        };
        assert!(blank.is_empty());

        let zero_sized = RasterizedGlyph {
            width: 0,
            height: 4,
            left: 0,
            top: 0,
            pixels: vec![],
        };
        assert!(zero_sized.is_empty());
    }

    #[test]
    fn test_missing_glyph_marker() {
        let glyph = ShapedGlyph {
            glyph_id: NOTDEF_GLYPH,
            cluster: 0,
            x_advance: 10.0,
            y_advance: 0.0,
            x_offset: 0.0,
            y_offset: 0.0,
        };
        assert!(glyph.is_missing());
        assert!(!ShapedGlyph { glyph_id: 7, ..glyph }.is_missing());
    }
}
