//! Monochrome image types shared by the normalizer, packer and atlas.

use crate::packer;

/// A 1-bit image, row-major, `true` = ink.
///
/// Being boolean, it can never carry intermediate gray values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl BinaryImage {
    /// An all-background image
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
        }
    }

    /// Build an image from a predicate over pixel coordinates
    pub fn from_fn(width: u32, height: u32, mut ink: impl FnMut(u32, u32) -> bool) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(ink(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Parse rows of `#` (ink) and `.` (background). Handy in tests.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        Self::from_fn(width, height, |x, y| {
            rows[y as usize].chars().nth(x as usize) == Some('#')
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`; out of range reads as background
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.pixels[(y * self.width + x) as usize]
    }

    /// True if any pixel in column `x` is ink
    pub fn column_has_ink(&self, x: u32) -> bool {
        (0..self.height).any(|y| self.get(x, y))
    }

    /// True if no pixel is ink
    pub fn is_blank(&self) -> bool {
        !self.pixels.iter().any(|&p| p)
    }

    /// Copy of columns `first..=last`, full height
    pub fn crop_columns(&self, first: u32, last: u32) -> Self {
        let width = last.saturating_sub(first) + 1;
        Self::from_fn(width, self.height, |x, y| self.get(first + x, y))
    }

    /// Place this image at the left edge of a background canvas `width` wide.
    ///
    /// Columns beyond `width` are dropped.
    pub fn pad_right(&self, width: u32) -> Self {
        Self::from_fn(width, self.height, |x, y| self.get(x, y))
    }

    /// One row as block-art, truncated to `columns`
    pub fn row_string(&self, y: u32, columns: u32, ink: char, background: char) -> String {
        (0..columns.min(self.width))
            .map(|x| if self.get(x, y) { ink } else { background })
            .collect()
    }
}

/// One catalog entry's packed monochrome bitmap.
///
/// `width` is byte-aligned; `unpadded_width` is the visible content width
/// (plus any configured letter spacing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Height in pixels, identical for every glyph of a run
    pub height: u32,
    /// Byte-aligned width (a multiple of 8)
    pub width: u32,
    /// Content width before byte-alignment padding
    pub unpadded_width: u32,
    /// `height` rows of `width / 8` bytes, MSB = leftmost pixel
    pub bytes: Vec<u8>,
}

impl GlyphBitmap {
    /// Bytes per packed row
    pub fn bytes_per_row(&self) -> usize {
        (self.width / 8) as usize
    }

    /// Total packed size, as implied by the geometry
    pub fn byte_len(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }

    /// Decode the packed bytes back into an image
    pub fn to_image(&self) -> BinaryImage {
        packer::unpack(&self.bytes, self.width, self.height)
    }
}
