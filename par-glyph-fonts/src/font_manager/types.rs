//! Font data types and structures for font management.

use std::sync::Arc;
use swash::{CacheKey, FontRef};

/// Stores font data with lifetime management.
///
/// This struct owns the font data bytes and hands out `FontRef`s borrowed
/// from them. Cloning is cheap: the bytes are shared through an `Arc`, and
/// the swash cache key stays the same across clones.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    /// Face index within the font data
    pub face_index: u32,
    /// Byte offset of the face's table directory
    offset: u32,
    /// Swash cache key identifying this face
    key: CacheKey,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// # Returns
    /// `Some(FontData)` if the font data is valid, `None` otherwise.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from bytes with a specific face index.
    ///
    /// This is needed for TrueType Collection (.ttc) files where multiple
    /// font faces share the same data but have different face indices.
    pub fn new_with_index(data: Vec<u8>, face_index: u32) -> Option<Self> {
        let (offset, key) = {
            let font_ref = FontRef::from_index(&data, face_index as usize)?;
            (font_ref.offset, font_ref.key)
        };

        // The shaper parses the same bytes; reject fonts it cannot read up front
        rustybuzz::Face::from_slice(&data, face_index)?;

        Some(FontData {
            data: Arc::new(data),
            face_index,
            offset,
            key,
        })
    }

    /// Swash font reference for glyph operations.
    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.as_slice(),
            offset: self.offset,
            key: self.key,
        }
    }

    /// Whether the face maps `character` to a real glyph.
    pub fn has_glyph(&self, character: char) -> bool {
        self.font_ref().charmap().map(character) != 0
    }
}
