//! Turns a composited canvas into a byte-aligned 1-bit glyph.
//!
//! Variable layout: resize to the target height keeping the aspect ratio,
//! threshold, crop to the inked columns, then pad on the right to a multiple
//! of 8. Fixed layout resizes straight to the fixed width and skips the crop.

use image::GrayImage;
use image::imageops::{self, FilterType};

use crate::bitmap::BinaryImage;
use crate::compositor::Canvas;

/// Horizontal sizing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Width from the aspect ratio, cropped to the ink
    Variable,
    /// Every glyph this many pixels wide, uncropped
    Fixed(u32),
}

/// Normalization settings for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeParams {
    /// Final glyph height H
    pub glyph_height: u32,
    /// Samples below this are ink
    pub threshold: u8,
    /// Content width substituted for a cluster with no ink
    pub placeholder_width: u32,
    /// Added to every recorded unpadded width
    pub spacing: u32,
    pub layout: Layout,
}

/// A binarized glyph padded to a byte-aligned width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedGlyph {
    /// `W × H` image, `W` a multiple of 8
    pub image: BinaryImage,
    /// Content width plus spacing, before padding
    pub unpadded_width: u32,
    /// The cluster had no ink and got the placeholder width
    pub blank: bool,
}

/// Round `width` up to the next multiple of 8 (minimum 8).
pub fn byte_aligned(width: u32) -> u32 {
    width.max(1).div_ceil(8) * 8
}

/// Nearest-neighbour resize; same-size input is copied unchanged.
fn resize_nearest(image: &GrayImage, width: u32, height: u32) -> GrayImage {
    if image.dimensions() == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, width, height, FilterType::Nearest)
    }
}

/// Threshold a grayscale image: darker than `threshold` is ink.
pub fn binarize(image: &GrayImage, threshold: u8) -> BinaryImage {
    BinaryImage::from_fn(image.width(), image.height(), |x, y| {
        image.get_pixel(x, y).0[0] < threshold
    })
}

/// First and last inked columns, scanning from each side.
pub fn ink_bounds(image: &BinaryImage) -> Option<(u32, u32)> {
    let first = (0..image.width()).find(|&x| image.column_has_ink(x))?;
    let last = (0..image.width())
        .rev()
        .find(|&x| image.column_has_ink(x))?;
    Some((first, last))
}

/// Normalize one composited cluster.
pub fn normalize(canvas: &Canvas, params: &NormalizeParams) -> NormalizedGlyph {
    let height = params.glyph_height;

    let (content, blank) = match params.layout {
        Layout::Variable => {
            let width = ((height as f32 * canvas.aspect_ratio).round() as u32).max(1);
            let resized = resize_nearest(&canvas.image, width, height);
            let binary = binarize(&resized, params.threshold);

            match ink_bounds(&binary) {
                Some((first, last)) => (binary.crop_columns(first, last), false),
                None => (BinaryImage::blank(params.placeholder_width, height), true),
            }
        }
        Layout::Fixed(width) => {
            let resized = resize_nearest(&canvas.image, width, height);
            let binary = binarize(&resized, params.threshold);
            let blank = binary.is_blank();
            (binary, blank)
        }
    };

    let content_width = content.width();
    let padded = content.pad_right(byte_aligned(content_width));

    NormalizedGlyph {
        image: padded,
        unpadded_width: content_width + params.spacing,
        blank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{BACKGROUND, ComposeStats};
    use image::Luma;

    fn params(layout: Layout) -> NormalizeParams {
        NormalizeParams {
            glyph_height: 4,
            threshold: 128,
            placeholder_width: 1,
            spacing: 0,
            layout,
        }
    }

    /// A canvas already at final height, so the resize is the identity.
    fn canvas_from_rows(rows: &[&str]) -> Canvas {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let image = GrayImage::from_fn(width, height, |x, y| {
            match rows[y as usize].as_bytes()[x as usize] {
                b'#' => Luma([0]),
                b'+' => Luma([100]),
                b'-' => Luma([200]),
                _ => Luma([BACKGROUND]),
            }
        });
        Canvas {
            image,
            aspect_ratio: width as f32 / height as f32,
            stats: ComposeStats::default(),
        }
    }

    #[test]
    fn test_byte_aligned() {
        assert_eq!(byte_aligned(1), 8);
        assert_eq!(byte_aligned(8), 8);
        assert_eq!(byte_aligned(9), 16);
        assert_eq!(byte_aligned(0), 8);
    }

    #[test]
    fn test_binarize_threshold_is_strict() {
        let image = GrayImage::from_fn(3, 1, |x, _| Luma([[127, 128, 129][x as usize]]));
        let binary = binarize(&image, 128);
        assert!(binary.get(0, 0));
        assert!(!binary.get(1, 0));
        assert!(!binary.get(2, 0));
    }

    #[test]
    fn test_variable_layout_crops_to_ink() {
        let canvas = canvas_from_rows(&[
            "..........",
            "...#......",
            "...+--#...",
            "..........",
        ]);
        let glyph = normalize(&canvas, &params(Layout::Variable));
        assert_eq!(glyph.unpadded_width, 4);
        assert!(!glyph.blank);
        assert_eq!(
            glyph.image,
            BinaryImage::from_rows(&["........", "#.......", "#..#....", "........"])
        );
    }

    #[test]
    fn test_variable_layout_blank_uses_placeholder() {
        let canvas = canvas_from_rows(&["------", "......", "......", "......"]);
        let p = NormalizeParams {
            placeholder_width: 3,
            ..params(Layout::Variable)
        };
        let glyph = normalize(&canvas, &p);
        assert!(glyph.blank);
        assert_eq!(glyph.unpadded_width, 3);
        assert_eq!(glyph.image.width(), 8);
        assert!(glyph.image.is_blank());
    }

    #[test]
    fn test_spacing_added_to_unpadded_width() {
        let canvas = canvas_from_rows(&["#...", "....", "....", "...#"]);
        let p = NormalizeParams {
            spacing: 2,
            ..params(Layout::Variable)
        };
        let glyph = normalize(&canvas, &p);
        assert_eq!(glyph.unpadded_width, 6);
        assert_eq!(glyph.image.width(), 8);
    }

    #[test]
    fn test_fixed_layout_keeps_margins() {
        let canvas = canvas_from_rows(&["....", ".#..", "....", "...."]);
        let glyph = normalize(&canvas, &params(Layout::Fixed(4)));
        assert_eq!(glyph.unpadded_width, 4);
        assert_eq!(glyph.image.width(), 8);
        assert!(glyph.image.get(1, 1));
        assert!(!glyph.blank);
    }

    #[test]
    fn test_resize_to_target_height() {
        // 20x40 canvas, aspect 0.5, resized to H=4 → 2 columns
        let image = GrayImage::from_pixel(20, 40, Luma([0]));
        let canvas = Canvas {
            image,
            aspect_ratio: 0.5,
            stats: ComposeStats::default(),
        };
        let glyph = normalize(&canvas, &params(Layout::Variable));
        assert_eq!(glyph.image.height(), 4);
        assert_eq!(glyph.unpadded_width, 2);
    }
}
