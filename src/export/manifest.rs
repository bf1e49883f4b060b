//! JSON manifest describing a compilation, for tooling and inspection.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pipeline::Compilation;

use super::write_output;

/// Top-level manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Version of par-glyph that wrote this manifest
    pub version: String,
    pub glyph_height: u32,
    /// Size of the packed bitmap buffer
    pub total_bytes: usize,
    pub glyphs: Vec<ManifestGlyph>,
    pub phrases: Vec<ManifestPhrase>,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestGlyph {
    pub ordinal: usize,
    pub text: String,
    /// Code points as `U+XXXX`
    pub codepoints: Vec<String>,
    pub width: u32,
    pub unpadded_width: u32,
    pub start: usize,
}

/// One input phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestPhrase {
    pub text: String,
    pub ordinals: Vec<usize>,
}

fn codepoints(text: &str) -> Vec<String> {
    text.chars().map(|c| format!("U+{:04X}", c as u32)).collect()
}

impl Manifest {
    pub fn from_compilation(compilation: &Compilation) -> Self {
        let atlas = &compilation.atlas;
        let glyphs = compilation
            .catalog
            .iter()
            .zip(atlas.glyphs())
            .map(|((ordinal, text), glyph)| ManifestGlyph {
                ordinal,
                text: text.to_string(),
                codepoints: codepoints(text),
                width: glyph.width,
                unpadded_width: glyph.unpadded_width,
                start: glyph.start,
            })
            .collect();

        let phrases = compilation
            .phrase_lists
            .iter()
            .map(|ordinals| ManifestPhrase {
                text: ordinals
                    .iter()
                    .filter_map(|&o| compilation.catalog.get(o))
                    .collect(),
                ordinals: ordinals.clone(),
            })
            .collect();

        Self {
            version: crate::VERSION.to_string(),
            glyph_height: atlas.height(),
            total_bytes: atlas.total_bytes(),
            glyphs,
            phrases,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest, returning its size in bytes.
    pub fn save(&self, path: &Path) -> Result<u64> {
        write_output(path, &self.to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codepoints() {
        assert_eq!(codepoints("ກ່"), vec!["U+0E81", "U+0EC8"]);
        assert_eq!(codepoints("a"), vec!["U+0061"]);
    }
}
