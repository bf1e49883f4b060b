//! C header generation for AVR-style targets.
//!
//! Bitmap data lives in `PROGMEM`; widths and offsets are decimal arrays.
//! Every array is wrapped 16 values per line.

use std::fmt::{self, Write};
use std::path::Path;

use crate::atlas::Atlas;
use crate::error::Result;
use crate::phrase_table::PhraseTable;

use super::write_output;

const VALUES_PER_LINE: usize = 16;

/// Unsigned C integer type for an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CType {
    U8,
    U16,
    U32,
}

impl CType {
    /// Smallest type that holds `max`
    pub fn fit(max: usize) -> Self {
        if max <= u8::MAX as usize {
            CType::U8
        } else if max <= u16::MAX as usize {
            CType::U16
        } else {
            CType::U32
        }
    }

    /// Like [`CType::fit`] but never narrower than `floor`
    pub fn fit_at_least(max: usize, floor: CType) -> Self {
        Self::fit(max).max(floor)
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CType::U8 => "uint8_t",
            CType::U16 => "uint16_t",
            CType::U32 => "uint32_t",
        })
    }
}

/// Include guard for a header path: file name upper-cased, `.` and `-` → `_`.
pub fn include_guard(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "GLYPH_DATA_H".to_string());
    name.to_uppercase().replace(['.', '-'], "_")
}

fn write_rows<T: fmt::Display>(out: &mut String, values: &[T], fmt_value: impl Fn(&T) -> String) {
    for chunk in values.chunks(VALUES_PER_LINE) {
        let line: Vec<String> = chunk.iter().map(&fmt_value).collect();
        let _ = writeln!(out, "  {},", line.join(", "));
    }
}

fn write_decimal_array<T: fmt::Display + Copy + Into<u64>>(
    out: &mut String,
    name: &str,
    values: &[T],
) {
    let max = values.iter().map(|&v| v.into()).max().unwrap_or(0);
    let ctype = CType::fit_at_least(max as usize, CType::U16);
    let _ = writeln!(out, "const {} {}[] PROGMEM = {{", ctype, name);
    write_rows(out, values, |v| v.to_string());
    out.push_str("};\n\n");
}

/// Render the bitmap header: atlas bytes plus width and offset tables.
///
/// `fixed_width` adds a `GLYPH_WIDTH` define for fixed-layout runs.
pub fn render_bitmap_header(atlas: &Atlas, guard: &str, fixed_width: Option<u32>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#ifndef {}", guard);
    let _ = writeln!(out, "#define {}\n", guard);
    let _ = writeln!(out, "#define GLYPH_HEIGHT {}", atlas.height());
    if let Some(width) = fixed_width {
        let _ = writeln!(out, "#define GLYPH_WIDTH {}", width);
    }
    out.push('\n');
    out.push_str("#include <avr/pgmspace.h>\n\n");

    out.push_str("static const uint8_t glyph_bitmaps[] PROGMEM = {\n");
    write_rows(&mut out, atlas.bitmaps(), |b| format!("0x{:02X}", b));
    out.push_str("};\n\n");

    write_decimal_array(&mut out, "glyph_widths", atlas.widths());
    write_decimal_array(&mut out, "unpadded_widths", atlas.unpadded_widths());
    let starts: Vec<u64> = atlas.start_offsets().iter().map(|&s| s as u64).collect();
    write_decimal_array(&mut out, "bitmap_starts", &starts);

    let _ = writeln!(out, "#endif // {}", guard);
    out
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the phrase header: flattened ordinals, starts, lengths and count.
pub fn render_phrase_header(table: &PhraseTable, guard: &str) -> String {
    let ctype = CType::fit(table.max_value().max(table.count()));
    let mut out = String::new();
    let _ = writeln!(out, "#ifndef {}", guard);
    let _ = writeln!(out, "#define {}\n", guard);

    let _ = writeln!(out, "const {} all_phrases[] = {{", ctype);
    for (i, phrase) in table.phrases().enumerate() {
        if phrase.is_empty() {
            let _ = writeln!(out, "    // phrase {} (empty)", i + 1);
        } else {
            let _ = writeln!(out, "    {},    // phrase {}", join(phrase), i + 1);
        }
    }
    out.push_str("};\n\n");

    let _ = writeln!(
        out,
        "const {} phrase_starts[] = {{{}}};     // starting index of each phrase",
        ctype,
        join(table.starts())
    );
    let _ = writeln!(
        out,
        "const {} phrase_lengths[] = {{{}}};    // length of each phrase",
        ctype,
        join(table.lengths())
    );
    let _ = writeln!(out, "const {} num_phrases = {};\n", ctype, table.count());

    let _ = writeln!(out, "#endif // {}", guard);
    out
}

/// Write the bitmap header, returning its size in bytes.
pub fn write_bitmap_header(path: &Path, atlas: &Atlas, fixed_width: Option<u32>) -> Result<u64> {
    write_output(
        path,
        &render_bitmap_header(atlas, &include_guard(path), fixed_width),
    )
}

/// Write the phrase header, returning its size in bytes.
pub fn write_phrase_header(path: &Path, table: &PhraseTable) -> Result<u64> {
    write_output(path, &render_phrase_header(table, &include_guard(path)))
}
