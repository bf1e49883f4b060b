//! Font loading from files and from the system font database.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};

use super::types::FontData;

/// Load a font file from disk.
pub(crate) fn load_font_file(path: &Path) -> Result<FontData> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read font file {}", path.display()))?;
    FontData::new(data).ok_or_else(|| {
        anyhow!(
            "'{}' is not a usable TrueType/OpenType font",
            path.display()
        )
    })
}

/// Load a regular-weight face of `family_name` from the font database.
pub(crate) fn load_font_from_db(font_db: &Database, family_name: &str) -> Option<FontData> {
    let families = [Family::Name(family_name)];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = font_db.query(&query)?;
    font_db
        .with_face_data(id, |data, face_index| {
            FontData::new_with_index(data.to_vec(), face_index)
        })
        .flatten()
}
