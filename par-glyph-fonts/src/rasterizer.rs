//! Grayscale glyph rasterization with swash.

use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;

use crate::adapter::{GlyphRasterizer, RasterizedGlyph};
use crate::font_manager::FontData;

/// Renders glyphs of one face at a fixed pixel size.
///
/// A fresh `ScaleContext` is built per glyph so the rasterizer can be shared
/// across worker threads without locking.
#[derive(Debug, Clone)]
pub struct SwashRasterizer {
    font: FontData,
    px_size: f32,
}

impl SwashRasterizer {
    /// Create a rasterizer for `font` at `px_size` pixels per em.
    pub fn new(font: FontData, px_size: f32) -> Self {
        Self { font, px_size }
    }
}

impl GlyphRasterizer for SwashRasterizer {
    fn rasterize(&self, glyph_id: u32) -> Option<RasterizedGlyph> {
        let glyph_id = u16::try_from(glyph_id).ok()?;

        let mut context = ScaleContext::new();
        let mut scaler = context
            .builder(self.font.font_ref())
            .size(self.px_size)
            .hint(true)
            .build();

        // Monochrome target: outlines first, embedded bitmaps for bitmap-only fonts
        let image = Render::new(&[
            Source::Outline,
            Source::Bitmap(StrikeWith::BestFit),
            Source::ColorBitmap(StrikeWith::BestFit),
        ])
        .format(Format::Alpha)
        .render(&mut scaler, glyph_id)?;

        if image.placement.width == 0 || image.placement.height == 0 {
            return None;
        }

        let pixels = match image.content {
            Content::Mask => image.data.clone(),
            Content::Color => color_to_coverage(&image),
            Content::SubpixelMask => subpixel_to_coverage(&image),
        };

        Some(RasterizedGlyph {
            width: image.placement.width,
            height: image.placement.height,
            left: image.placement.left,
            top: image.placement.top,
            pixels,
        })
    }

    fn advance_width(&self, glyph_id: u32) -> Option<f32> {
        let glyph_id = u16::try_from(glyph_id).ok()?;
        let advance = self
            .font
            .font_ref()
            .glyph_metrics(&[])
            .scale(self.px_size)
            .advance_width(glyph_id);
        advance.is_finite().then_some(advance)
    }
}

/// Use the alpha channel of an RGBA color bitmap as coverage.
fn color_to_coverage(image: &Image) -> Vec<u8> {
    image.data.chunks_exact(4).map(|px| px[3]).collect()
}

/// Convert a swash subpixel mask into single-channel coverage.
/// Some swash builds emit 3 bytes/pixel (RGB), others 4 bytes/pixel (RGBA);
/// coverage is the luminance of RGB either way.
fn subpixel_to_coverage(image: &Image) -> Vec<u8> {
    let width = image.placement.width as usize;
    let height = image.placement.height as usize;

    let stride = if width > 0 && height > 0 {
        image.data.len() / (width * height)
    } else {
        0
    };

    match stride {
        3 | 4 => image
            .data
            .chunks_exact(stride)
            .map(|chunk| {
                let (r, g, b) = (chunk[0] as u32, chunk[1] as u32, chunk[2] as u32);
                ((r * 299 + g * 587 + b * 114) / 1000) as u8
            })
            .collect(),
        // Fallback: treat as full coverage to avoid invisibility if layout changes
        _ => vec![255; width * height],
    }
}
