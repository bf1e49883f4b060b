//! The glyph atlas: every catalog entry's packed bitmap in one flat buffer.
//!
//! Alongside the buffer sit three ordinal-indexed tables: byte-aligned
//! width, unpadded width and start offset. Offsets are always derived from
//! the widths and the shared height, never stored independently, so a
//! consumer can rebuild them from the width table alone.

use crate::bitmap::GlyphBitmap;
use crate::error::{CompileError, Result};

/// Packed glyph bitmaps plus their width and offset tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Atlas {
    height: u32,
    bitmaps: Vec<u8>,
    widths: Vec<u32>,
    unpadded_widths: Vec<u32>,
    start_offsets: Vec<usize>,
}

/// Borrowed view of one glyph inside an [`Atlas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasGlyph<'a> {
    pub ordinal: usize,
    pub width: u32,
    pub unpadded_width: u32,
    pub start: usize,
    pub bytes: &'a [u8],
}

/// Start offset of each glyph, from byte-aligned widths and the height.
pub fn derive_offsets(widths: &[u32], height: u32) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(widths.len());
    let mut next = 0usize;
    for &width in widths {
        offsets.push(next);
        next += (width / 8) as usize * height as usize;
    }
    offsets
}

impl Atlas {
    /// Concatenate glyphs in ordinal order.
    ///
    /// Every glyph must have the atlas height, a positive byte-aligned width
    /// and exactly `width / 8 × height` bytes. Anything else is a bug
    /// upstream and fails the run.
    pub fn build(height: u32, glyphs: &[GlyphBitmap]) -> Result<Self> {
        let mut atlas = Atlas {
            height,
            bitmaps: Vec::with_capacity(glyphs.iter().map(|g| g.bytes.len()).sum()),
            widths: Vec::with_capacity(glyphs.len()),
            unpadded_widths: Vec::with_capacity(glyphs.len()),
            start_offsets: Vec::new(),
        };

        for (ordinal, glyph) in glyphs.iter().enumerate() {
            if glyph.width == 0 || glyph.width % 8 != 0 {
                return Err(CompileError::InvalidGlyphWidth {
                    ordinal,
                    width: glyph.width,
                });
            }
            if glyph.height != height {
                return Err(CompileError::InconsistentBitmap {
                    ordinal,
                    details: format!(
                        "height {} differs from atlas height {}",
                        glyph.height, height
                    ),
                });
            }
            if glyph.bytes.len() != glyph.byte_len() {
                return Err(CompileError::InconsistentBitmap {
                    ordinal,
                    details: format!(
                        "{} packed bytes for a {}x{} bitmap (expected {})",
                        glyph.bytes.len(),
                        glyph.width,
                        glyph.height,
                        glyph.byte_len()
                    ),
                });
            }

            atlas.bitmaps.extend_from_slice(&glyph.bytes);
            atlas.widths.push(glyph.width);
            atlas.unpadded_widths.push(glyph.unpadded_width);
        }

        atlas.start_offsets = derive_offsets(&atlas.widths, height);
        Ok(atlas)
    }

    /// Glyph height shared by every entry
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// The flat packed buffer
    pub fn bitmaps(&self) -> &[u8] {
        &self.bitmaps
    }

    /// Byte-aligned width per ordinal
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// Content width per ordinal
    pub fn unpadded_widths(&self) -> &[u32] {
        &self.unpadded_widths
    }

    /// Start offset into `bitmaps()` per ordinal
    pub fn start_offsets(&self) -> &[usize] {
        &self.start_offsets
    }

    /// Size of the flat buffer in bytes
    pub fn total_bytes(&self) -> usize {
        self.bitmaps.len()
    }

    /// One glyph's entry
    pub fn glyph(&self, ordinal: usize) -> Option<AtlasGlyph<'_>> {
        let width = *self.widths.get(ordinal)?;
        let start = self.start_offsets[ordinal];
        let len = (width / 8) as usize * self.height as usize;
        Some(AtlasGlyph {
            ordinal,
            width,
            unpadded_width: self.unpadded_widths[ordinal],
            start,
            bytes: &self.bitmaps[start..start + len],
        })
    }

    /// Iterate glyphs in ordinal order
    pub fn glyphs(&self) -> impl Iterator<Item = AtlasGlyph<'_>> {
        (0..self.len()).filter_map(|ordinal| self.glyph(ordinal))
    }

    /// Copy one glyph back out as a standalone bitmap
    pub fn to_glyph_bitmap(&self, ordinal: usize) -> Option<GlyphBitmap> {
        let glyph = self.glyph(ordinal)?;
        Some(GlyphBitmap {
            height: self.height,
            width: glyph.width,
            unpadded_width: glyph.unpadded_width,
            bytes: glyph.bytes.to_vec(),
        })
    }
}
