//! Text shaping module using HarfBuzz via rustybuzz
//!
//! Complex scripts rarely map one character to one glyph: vowels reorder,
//! marks stack above and below consonants, and some sequences form
//! ligatures. The shaper turns one grapheme cluster into the ordered,
//! positioned glyph sequence the compositor draws.
//!
//! # Usage
//!
//! ```ignore
//! let shaper = TextShaper::new(font, 72.0, ShapingOptions::default());
//! let glyphs = shaper.shape("ກໍ່");
//! ```

use rustybuzz::{Direction, Face, Feature, GlyphBuffer, Language, Script, UnicodeBuffer};
use std::str::FromStr;

use crate::adapter::{ShapedGlyph, Shaper};
use crate::font_manager::FontData;

/// Options for text shaping
#[derive(Debug, Clone)]
pub struct ShapingOptions {
    /// Enable standard ligatures
    pub enable_ligatures: bool,

    /// Enable kerning adjustments
    pub enable_kerning: bool,

    /// Script hint (e.g., "laoo" for Lao, "thai" for Thai); guessed when unset
    pub script: Option<String>,

    /// Language hint (e.g., "lo" for Lao); guessed when unset
    pub language: Option<String>,

    /// Text direction (true = RTL, false = LTR)
    pub rtl: bool,
}

impl Default for ShapingOptions {
    fn default() -> Self {
        Self {
            enable_ligatures: true,
            enable_kerning: true,
            script: None,
            language: None,
            rtl: false,
        }
    }
}

/// Text shaper using HarfBuzz via rustybuzz
#[derive(Debug, Clone)]
pub struct TextShaper {
    font: FontData,
    px_size: f32,
    options: ShapingOptions,
    features: Vec<Feature>,
}

impl TextShaper {
    /// Create a shaper whose output is scaled to `px_size` pixels per em.
    pub fn new(font: FontData, px_size: f32, options: ShapingOptions) -> Self {
        let features = build_features(&options);
        Self {
            font,
            px_size,
            options,
            features,
        }
    }

    /// Shape a text run using rustybuzz
    ///
    /// Returns an empty sequence if the face cannot be parsed.
    pub fn shape_text(&self, text: &str) -> Vec<ShapedGlyph> {
        let face = match Face::from_slice(&self.font.data, self.font.face_index) {
            Some(face) => face,
            None => {
                log::warn!("Font parsing failed while shaping '{}'", text);
                return Vec::new();
            }
        };

        let mut unicode_buffer = UnicodeBuffer::new();
        unicode_buffer.push_str(text);
        unicode_buffer.guess_segment_properties();

        if self.options.rtl {
            unicode_buffer.set_direction(Direction::RightToLeft);
        }

        // Convert 4-letter script code to Script (e.g., "laoo", "thai")
        if let Some(ref script_str) = self.options.script
            && let Ok(script) = Script::from_str(script_str)
        {
            unicode_buffer.set_script(script);
        }

        if let Some(ref lang_str) = self.options.language
            && let Ok(lang) = Language::from_str(lang_str)
        {
            unicode_buffer.set_language(lang);
        }

        let glyph_buffer = rustybuzz::shape(&face, &self.features, unicode_buffer);

        let units_per_em = face.units_per_em().max(1) as f32;
        self.extract_shaped_glyphs(&glyph_buffer, self.px_size / units_per_em)
    }

    /// Extract shaped glyphs from HarfBuzz glyph buffer, converting font
    /// units to pixels.
    fn extract_shaped_glyphs(&self, buffer: &GlyphBuffer, scale: f32) -> Vec<ShapedGlyph> {
        let glyph_infos = buffer.glyph_infos();
        let glyph_positions = buffer.glyph_positions();

        glyph_infos
            .iter()
            .zip(glyph_positions.iter())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id,
                cluster: info.cluster,
                x_advance: pos.x_advance as f32 * scale,
                y_advance: pos.y_advance as f32 * scale,
                x_offset: pos.x_offset as f32 * scale,
                y_offset: pos.y_offset as f32 * scale,
            })
            .collect()
    }
}

impl Shaper for TextShaper {
    fn shape(&self, text: &str) -> Vec<ShapedGlyph> {
        self.shape_text(text)
    }
}

/// Build the OpenType feature list for the given options.
///
/// Uses `Feature::from_str()` which parses standard feature notation.
fn build_features(options: &ShapingOptions) -> Vec<Feature> {
    let mut tags = Vec::new();

    if options.enable_ligatures {
        tags.extend(["liga", "clig"]);
    } else {
        tags.extend(["-liga", "-clig"]);
    }

    if !options.enable_kerning {
        tags.push("-kern");
    }

    // Glyph composition/decomposition is required for mark stacking
    tags.extend(["ccmp", "locl", "mark", "mkmk"]);

    tags.into_iter()
        .filter_map(|tag| Feature::from_str(tag).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ShapingOptions::default();
        assert!(options.enable_ligatures);
        assert!(options.enable_kerning);
        assert!(options.script.is_none());
        assert!(!options.rtl);
    }

    #[test]
    fn test_feature_list_parses() {
        let features = build_features(&ShapingOptions::default());
        assert_eq!(features.len(), 6);

        let features = build_features(&ShapingOptions {
            enable_ligatures: false,
            enable_kerning: false,
            ..ShapingOptions::default()
        });
        assert_eq!(features.len(), 7);
    }
}
