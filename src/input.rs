//! Phrase input: CSV files and interactive stdin entry.
//!
//! One phrase per non-empty row. A row with several fields becomes one phrase
//! with the fields joined by single spaces. Fields may be double-quoted to
//! carry commas or newlines, with `""` standing for a literal quote.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::error::{CompileError, Result};

/// Split CSV text into records of fields.
///
/// A newline inside a quoted field belongs to the field; outside quotes it
/// ends the record. A `\r` before a record-ending newline is dropped.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut fields));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }
    records
}

/// Parse CSV text into phrases.
///
/// The fields of a row are joined with single spaces and the result is
/// trimmed; rows that end up empty are skipped.
pub fn parse_phrases_csv(text: &str) -> Vec<String> {
    split_records(text)
        .into_iter()
        .filter_map(|fields| {
            let phrase = fields.join(" ").trim().to_string();
            (!phrase.is_empty()).then_some(phrase)
        })
        .collect()
}

/// Read phrases from a CSV file.
pub fn read_phrases_csv(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| CompileError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let phrases = parse_phrases_csv(&text);
    log::info!("Read {} phrases from {}", phrases.len(), path.display());
    Ok(phrases)
}

/// Read phrases one per line until an empty line or end of input.
pub fn read_phrases_interactive<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut phrases = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let phrase = line.trim();
        if phrase.is_empty() {
            break;
        }
        phrases.push(phrase.to_string());
    }
    Ok(phrases)
}

fn quote_field(phrase: &str) -> String {
    if phrase.contains([',', '"', '\n']) {
        format!("\"{}\"", phrase.replace('"', "\"\""))
    } else {
        phrase.to_string()
    }
}

/// Write phrases to `writer`, one row each.
pub fn write_phrases<W: Write>(mut writer: W, phrases: &[String]) -> io::Result<()> {
    for phrase in phrases {
        writeln!(writer, "{}", quote_field(phrase))?;
    }
    writer.flush()
}

/// Save phrases as a CSV file, creating parent directories.
pub fn write_phrases_csv(path: &Path, phrases: &[String]) -> Result<()> {
    let export_err = |source| CompileError::Export {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(export_err)?;
    }
    let file = fs::File::create(path).map_err(export_err)?;
    write_phrases(io::BufWriter::new(file), phrases).map_err(export_err)?;
    log::info!("Wrote {} phrases to {}", phrases.len(), path.display());
    Ok(())
}
