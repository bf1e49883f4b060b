//! Terminal block-art views of packed glyphs, for checking output by eye.

use std::fmt::Write;

use crate::atlas::Atlas;
use crate::bitmap::BinaryImage;
use crate::catalog::{Catalog, PhraseIndexList};
use crate::packer;

/// Character drawn for an ink pixel
pub const INK: char = '█';
/// Character drawn for a background pixel
pub const BLANK: char = ' ';

/// Visible columns of a glyph: its unpadded width, capped at the packed width.
fn visible_columns(atlas: &Atlas, ordinal: usize) -> Option<(BinaryImage, u32)> {
    let glyph = atlas.to_glyph_bitmap(ordinal)?;
    let columns = glyph.unpadded_width.min(glyph.width);
    Some((glyph.to_image(), columns))
}

/// Every catalog entry, one after another, each with a heading.
pub fn glyph_sheet(atlas: &Atlas, catalog: &Catalog) -> String {
    let mut out = String::new();
    for (ordinal, text) in catalog.iter() {
        let Some((image, columns)) = visible_columns(atlas, ordinal) else {
            continue;
        };
        let _ = writeln!(
            out,
            "[{}] {:?} unpadded={} width={}",
            ordinal,
            text,
            atlas.unpadded_widths()[ordinal],
            atlas.widths()[ordinal]
        );
        for y in 0..image.height() {
            let _ = writeln!(out, "{}", image.row_string(y, columns, INK, BLANK));
        }
        out.push('\n');
    }
    out
}

/// Lay out a phrase's glyphs left to right, `spacing` columns apart,
/// wrapping to a new band when the next glyph would pass `display_width`.
pub fn render_line(
    atlas: &Atlas,
    ordinals: &[usize],
    display_width: usize,
    spacing: usize,
) -> String {
    let height = atlas.height() as usize;
    let mut bands: Vec<Vec<String>> = Vec::new();
    let mut band: Vec<String> = vec![String::new(); height];
    let mut band_width = 0usize;

    for &ordinal in ordinals {
        let Some((image, columns)) = visible_columns(atlas, ordinal) else {
            log::warn!("Ordinal {} is not in the atlas", ordinal);
            continue;
        };
        let glyph_width = columns as usize;

        if band_width > 0 && band_width + spacing + glyph_width > display_width {
            bands.push(std::mem::replace(&mut band, vec![String::new(); height]));
            band_width = 0;
        }
        if band_width > 0 {
            for row in band.iter_mut() {
                row.extend(std::iter::repeat_n(BLANK, spacing));
            }
            band_width += spacing;
        }
        for (y, row) in band.iter_mut().enumerate() {
            row.push_str(&image.row_string(y as u32, columns, INK, BLANK));
        }
        band_width += glyph_width;
    }
    if band_width > 0 {
        bands.push(band);
    }

    bands
        .iter()
        .map(|rows| rows.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Dump a packed buffer as rows `row_bytes` bytes wide.
pub fn render_raw(bytes: &[u8], row_bytes: usize) -> String {
    if row_bytes == 0 {
        return String::new();
    }
    let width = (row_bytes * 8) as u32;
    let height = bytes.len().div_ceil(row_bytes) as u32;
    let image = packer::unpack(bytes, width, height);
    (0..height)
        .map(|y| image.row_string(y, width, INK, BLANK))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The cluster list followed by each phrase's ordinals.
pub fn catalog_listing(catalog: &Catalog, phrase_lists: &[PhraseIndexList]) -> String {
    let mut out = String::from("Character List:\n");
    let _ = writeln!(out, "[{}]", catalog.clusters().join(" "));
    out.push_str("\nIndex List:\n");
    for (i, indices) in phrase_lists.iter().enumerate() {
        let _ = writeln!(out, "String {}: {:?}", i, indices);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::GlyphBitmap;

    fn atlas() -> Atlas {
        // Two 2-row glyphs: a 3-wide bar and a 1-wide dot
        let bar = GlyphBitmap {
            height: 2,
            width: 8,
            unpadded_width: 3,
            bytes: vec![0xE0, 0x00],
        };
        let dot = GlyphBitmap {
            height: 2,
            width: 8,
            unpadded_width: 1,
            bytes: vec![0x00, 0x80],
        };
        Atlas::build(2, &[bar, dot]).unwrap()
    }

    #[test]
    fn test_render_line_with_spacing() {
        let out = render_line(&atlas(), &[0, 1], 80, 1);
        assert_eq!(out, "███  \n    █");
    }

    #[test]
    fn test_render_line_wraps() {
        let out = render_line(&atlas(), &[0, 0, 1], 5, 0);
        assert_eq!(out, "███\n   \n\n███ \n   █");
    }

    #[test]
    fn test_render_line_empty() {
        assert_eq!(render_line(&atlas(), &[], 80, 1), "");
    }

    #[test]
    fn test_render_raw() {
        assert_eq!(render_raw(&[0x81, 0x18], 1), "█      █\n   ██   ");
        assert_eq!(render_raw(&[0xFF], 0), "");
    }

    #[test]
    fn test_catalog_listing() {
        let (catalog, lists) = crate::catalog::build_catalog(&["ab", "ba"]);
        assert_eq!(
            catalog_listing(&catalog, &lists),
            "Character List:\n[a b]\n\nIndex List:\nString 0: [0, 1]\nString 1: [1, 0]\n"
        );
    }

    #[test]
    fn test_glyph_sheet_heading_and_rows() {
        let mut catalog = Catalog::new();
        catalog.intern("a");
        catalog.intern("b");
        let sheet = glyph_sheet(&atlas(), &catalog);
        assert!(sheet.starts_with("[0] \"a\" unpadded=3 width=8\n███\n   \n"));
        assert!(sheet.contains("[1] \"b\" unpadded=1 width=8\n \n█\n"));
    }
}
