//! Font resolution for a compilation run.
//!
//! A run uses exactly one face. It is chosen in this order:
//! 1. An explicit font file path
//! 2. A named system font family
//! 3. The first installed family from [`FALLBACK_FAMILIES`]
//!
//! Failing all three is fatal: there is nothing to shape or rasterize with.

mod fallbacks;
mod loader;
mod types;

use std::path::Path;

use anyhow::{Result, bail};
use fontdb::Database;

use crate::rasterizer::SwashRasterizer;
use crate::text_shaper::{ShapingOptions, TextShaper};

pub use fallbacks::FALLBACK_FAMILIES;
pub use types::FontData;

/// Owns the font selected for a compilation run.
#[derive(Debug, Clone)]
pub struct FontManager {
    /// The face every cluster is shaped and rasterized with
    primary: FontData,

    /// Human-readable description of where the face came from
    source: String,
}

impl FontManager {
    /// Resolve the font for a run.
    ///
    /// # Arguments
    /// * `font_path` - Font file to load (takes precedence)
    /// * `family` - System font family to look up when no path is given
    pub fn new(font_path: Option<&Path>, family: Option<&str>) -> Result<Self> {
        if let Some(path) = font_path {
            log::info!("Loading font file: {}", path.display());
            let primary = loader::load_font_file(path)?;
            return Ok(Self {
                primary,
                source: path.display().to_string(),
            });
        }

        let mut font_db = Database::new();
        font_db.load_system_fonts();
        log::info!("Loaded {} system fonts", font_db.len());

        if let Some(family_name) = family {
            log::info!("Attempting to load font family: {}", family_name);
            if let Some(primary) = loader::load_font_from_db(&font_db, family_name) {
                log::info!("Successfully loaded font family: {}", family_name);
                return Ok(Self {
                    primary,
                    source: family_name.to_string(),
                });
            }
            bail!("Font family '{}' is not installed", family_name);
        }

        Self::from_fallbacks(&font_db)
    }

    /// Wrap font bytes that are already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        match FontData::new(data) {
            Some(primary) => Ok(Self {
                primary,
                source: "<memory>".to_string(),
            }),
            None => bail!("Font data is not a usable TrueType/OpenType font"),
        }
    }

    /// Pick the first installed family from the fallback chain.
    fn from_fallbacks(font_db: &Database) -> Result<Self> {
        for family_name in FALLBACK_FAMILIES {
            if let Some(primary) = loader::load_font_from_db(font_db, family_name) {
                log::info!("No font configured, using fallback family: {}", family_name);
                return Ok(Self {
                    primary,
                    source: (*family_name).to_string(),
                });
            }
            log::debug!("Fallback family not installed: {}", family_name);
        }
        bail!(
            "No font configured and none of the {} fallback families are installed; \
             pass a font file with --font",
            FALLBACK_FAMILIES.len()
        )
    }

    /// Where the face was loaded from (path or family name).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Build a shaper for this face, positions scaled to `px_size`.
    pub fn shaper(&self, px_size: f32, options: ShapingOptions) -> TextShaper {
        TextShaper::new(self.primary.clone(), px_size, options)
    }

    /// Build a rasterizer for this face at `px_size`.
    pub fn rasterizer(&self, px_size: f32) -> SwashRasterizer {
        SwashRasterizer::new(self.primary.clone(), px_size)
    }

    /// Characters of `text` the face has no glyph for.
    pub fn missing_chars(&self, text: &str) -> Vec<char> {
        text.chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .filter(|&c| !self.primary.has_glyph(c))
            .collect()
    }
}
