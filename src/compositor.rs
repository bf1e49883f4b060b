//! Composites the shaped glyphs of one cluster onto a grayscale canvas.
//!
//! The canvas is sized from the first glyph's advance at render size, which
//! fixes the aspect ratio the normalizer later resizes with. Marks that
//! overhang the canvas are clipped.

use image::{GrayImage, Luma};
use par_glyph_fonts::{GlyphRasterizer, RasterizedGlyph, ShapedGlyph, Shaper};

/// Canvas intensity for background (paper)
pub const BACKGROUND: u8 = 255;

/// Working-canvas geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositorParams {
    /// Canvas height at render size (H_ref)
    pub canvas_height: u32,
    /// Baseline row on the canvas
    pub baseline: u32,
    /// Final glyph height, used to size the fallback canvas
    pub glyph_height: u32,
}

/// A composited cluster ready for normalization.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// 8-bit canvas, 255 = background, 0 = full ink
    pub image: GrayImage,
    /// Width / height used for the final resize
    pub aspect_ratio: f32,
    /// What happened to each shaped glyph
    pub stats: ComposeStats,
}

/// Why a shaped glyph was not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSkip {
    /// The font has no glyph for this position (`.notdef`)
    Missing,
    /// The rasterizer produced nothing (whitespace or a render failure)
    NoImage,
    /// The glyph landed entirely outside the canvas
    OffCanvas,
}

/// Per-cluster tally of drawn and skipped glyphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    pub drawn: usize,
    pub missing: usize,
    pub no_image: usize,
    pub off_canvas: usize,
    /// The first glyph's advance was unusable and the fallback canvas was used
    pub fallback_canvas: bool,
}

impl ComposeStats {
    fn record(&mut self, outcome: Result<(), GlyphSkip>) {
        match outcome {
            Ok(()) => self.drawn += 1,
            Err(GlyphSkip::Missing) => self.missing += 1,
            Err(GlyphSkip::NoImage) => self.no_image += 1,
            Err(GlyphSkip::OffCanvas) => self.off_canvas += 1,
        }
    }

    /// Number of glyphs that were not drawn
    pub fn skipped(&self) -> usize {
        self.missing + self.no_image + self.off_canvas
    }
}

/// Shape `text` and composite its glyphs onto a fresh canvas.
pub fn compose_cluster(
    text: &str,
    shaper: &dyn Shaper,
    rasterizer: &dyn GlyphRasterizer,
    params: &CompositorParams,
) -> Canvas {
    let glyphs = shaper.shape(text);
    let mut stats = ComposeStats::default();

    // Canvas width comes from the first glyph's advance at render size
    let first_advance = glyphs
        .first()
        .and_then(|g| rasterizer.advance_width(g.glyph_id))
        .map(f32::round)
        .filter(|&w| w >= 1.0);

    let (mut image, aspect_ratio, baseline) = match first_advance {
        Some(width) => {
            let width = width as u32;
            (
                GrayImage::from_pixel(width, params.canvas_height, Luma([BACKGROUND])),
                width as f32 / params.canvas_height as f32,
                params.baseline,
            )
        }
        None => {
            log::debug!(
                "Cluster {:?}: first glyph has no usable advance, using fallback canvas",
                text
            );
            stats.fallback_canvas = true;
            let side = params.glyph_height * 2;
            (
                GrayImage::from_pixel(side, side, Luma([BACKGROUND])),
                1.0,
                params.glyph_height,
            )
        }
    };

    let mut pen_x = 0.0f32;
    let mut pen_y = baseline as f32;

    for glyph in &glyphs {
        let outcome = place_glyph(&mut image, glyph, rasterizer, pen_x, pen_y);
        if let Err(skip) = outcome {
            log::debug!(
                "Cluster {:?}: glyph {} not drawn ({:?})",
                text,
                glyph.glyph_id,
                skip
            );
        }
        stats.record(outcome);

        // The pen always advances, drawn or not
        pen_x += glyph.x_advance;
        pen_y -= glyph.y_advance;
    }

    Canvas {
        image,
        aspect_ratio,
        stats,
    }
}

/// Rasterize one glyph and darken the canvas under it.
fn place_glyph(
    image: &mut GrayImage,
    glyph: &ShapedGlyph,
    rasterizer: &dyn GlyphRasterizer,
    pen_x: f32,
    pen_y: f32,
) -> Result<(), GlyphSkip> {
    if glyph.is_missing() {
        return Err(GlyphSkip::Missing);
    }

    let raster = rasterizer
        .rasterize(glyph.glyph_id)
        .filter(|r| !r.is_empty())
        .ok_or(GlyphSkip::NoImage)?;

    // Canvas y grows downward; font offsets and bearings grow upward
    let x = pen_x.round() as i64 + glyph.x_offset.round() as i64 + raster.left as i64;
    let y = pen_y.round() as i64 - glyph.y_offset.round() as i64 - raster.top as i64;

    if blit_coverage(image, &raster, x, y) {
        Ok(())
    } else {
        Err(GlyphSkip::OffCanvas)
    }
}

/// Darken `image` by the glyph's coverage with its top-left corner at
/// `(x, y)`, clipping to the canvas. Returns false if nothing overlapped.
pub fn blit_coverage(image: &mut GrayImage, raster: &RasterizedGlyph, x: i64, y: i64) -> bool {
    let (canvas_w, canvas_h) = (image.width() as i64, image.height() as i64);

    let src_x0 = (-x).max(0);
    let src_y0 = (-y).max(0);
    let src_x1 = (raster.width as i64).min(canvas_w - x);
    let src_y1 = (raster.height as i64).min(canvas_h - y);

    if src_x1 <= src_x0 || src_y1 <= src_y0 {
        return false;
    }

    for sy in src_y0..src_y1 {
        for sx in src_x0..src_x1 {
            let coverage = raster.coverage(sx as u32, sy as u32) as u16;
            if coverage == 0 {
                continue;
            }
            let pixel = image.get_pixel_mut((x + sx) as u32, (y + sy) as u32);
            // Paste black through the coverage mask
            let value = pixel.0[0] as u16;
            pixel.0[0] = ((value * (255 - coverage) + 127) / 255) as u8;
        }
    }
    true
}
