//! Block-art rendering of compiled phrases.

mod common;

use common::{MockFont, options};
use par_glyph::Compiler;
use par_glyph::preview::{INK, glyph_sheet, render_line, render_raw};

#[test]
fn test_render_line_has_one_row_per_pixel() {
    let font = MockFont::new();
    let result = Compiler::new(&font, &font, options(16))
        .compile(&["abc"])
        .unwrap();
    let ordinals = result.phrase_table.phrase(0).unwrap();

    let art = render_line(&result.atlas, ordinals, 200, 1);
    let rows: Vec<&str> = art.lines().collect();
    assert_eq!(rows.len(), 16);

    let expected_width: usize = result.atlas.unpadded_widths().iter().sum::<u32>() as usize + 2;
    assert!(rows.iter().all(|r| r.chars().count() == expected_width));
    assert!(art.contains(INK));
}

#[test]
fn test_render_line_wraps_into_bands() {
    let font = MockFont::new();
    let result = Compiler::new(&font, &font, options(16))
        .compile(&["aaaa"])
        .unwrap();
    let ordinals = result.phrase_table.phrase(0).unwrap();
    let glyph_width = result.atlas.unpadded_widths()[0] as usize;

    // Room for exactly two glyphs per band
    let art = render_line(&result.atlas, ordinals, glyph_width * 2 + 1, 1);
    let bands: Vec<&str> = art.split("\n\n").collect();
    assert_eq!(bands.len(), 2);
    assert!(bands.iter().all(|b| b.lines().count() == 16));
}

#[test]
fn test_glyph_sheet_lists_every_cluster() {
    let font = MockFont::new();
    let result = Compiler::new(&font, &font, options(16))
        .compile(&["ab", "c"])
        .unwrap();
    let sheet = glyph_sheet(&result.atlas, &result.catalog);
    assert!(sheet.contains("[0] \"a\""));
    assert!(sheet.contains("[1] \"b\""));
    assert!(sheet.contains("[2] \"c\""));
}

#[test]
fn test_render_raw_matches_atlas_rows() {
    let font = MockFont::new();
    let result = Compiler::new(&font, &font, options(16))
        .compile(&[" "])
        .unwrap();
    let raw = render_raw(result.atlas.bitmaps(), 1);
    assert_eq!(raw.lines().count(), 16);
    assert!(!raw.contains(INK));
}
