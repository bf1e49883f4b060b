//! Core `Config` struct and its persistence helpers.
//!
//! Covers:
//! - `load` / `load_from` / `save_to` (YAML file I/O with atomic write)
//! - XDG-compliant path helpers (`config_dir`, `config_path`)
//! - `validate` for the semantic constraints serde cannot express
//! - Builder-style overrides used by the CLI

use crate::error::ConfigError;
use crate::types::LayoutMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest glyph height accepted by `validate`.
pub const MIN_GLYPH_HEIGHT: u32 = 5;

/// Largest glyph height accepted by `validate`.
pub const MAX_GLYPH_HEIGHT: u32 = 255;

/// Configuration for one compilation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Glyph geometry
    // ========================================================================
    /// Final height H of every glyph bitmap, in pixels
    #[serde(default = "crate::defaults::glyph_height")]
    pub glyph_height: u32,

    /// Pixel size glyphs are rasterized at before the final resize
    #[serde(default = "crate::defaults::render_size")]
    pub render_size: f32,

    /// Height of the working canvas clusters are composited onto
    #[serde(default = "crate::defaults::canvas_height")]
    pub canvas_height: u32,

    /// Baseline row on the working canvas
    #[serde(default = "crate::defaults::baseline")]
    pub baseline: u32,

    // ========================================================================
    // Binarization & layout
    // ========================================================================
    /// Samples darker than this become ink
    #[serde(default = "crate::defaults::threshold")]
    pub threshold: u8,

    /// Width of a blank cluster (e.g. a space) as a fraction of the glyph height
    #[serde(default = "crate::defaults::blank_width_ratio")]
    pub blank_width_ratio: f32,

    /// Extra spacing added to every unpadded width, as a fraction of the glyph height
    #[serde(default = "crate::defaults::letter_spacing_ratio")]
    pub letter_spacing_ratio: f32,

    /// Variable-width (cropped) or fixed-width atlas
    #[serde(default = "crate::defaults::layout")]
    pub layout: LayoutMode,

    /// Glyph width in fixed layout mode (defaults to the glyph height)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_width: Option<u32>,

    // ========================================================================
    // Font selection
    // ========================================================================
    /// Path to a TrueType/OpenType font file (takes precedence over the family)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// System font family to look up when no path is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    // ========================================================================
    // Runtime
    // ========================================================================
    /// Rasterization worker threads (0 = available parallelism)
    #[serde(default = "crate::defaults::workers")]
    pub workers: usize,

    /// Column budget for the block-art preview before it wraps
    #[serde(default = "crate::defaults::display_width")]
    pub display_width: usize,

    // ========================================================================
    // Outputs
    // ========================================================================
    /// Generated glyph bitmap header
    #[serde(default = "crate::defaults::bitmap_header")]
    pub bitmap_header: PathBuf,

    /// Generated phrase table header
    #[serde(default = "crate::defaults::phrase_header")]
    pub phrase_header: PathBuf,

    /// Optional JSON manifest describing the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            glyph_height: crate::defaults::glyph_height(),
            render_size: crate::defaults::render_size(),
            canvas_height: crate::defaults::canvas_height(),
            baseline: crate::defaults::baseline(),
            threshold: crate::defaults::threshold(),
            blank_width_ratio: crate::defaults::blank_width_ratio(),
            letter_spacing_ratio: crate::defaults::letter_spacing_ratio(),
            layout: crate::defaults::layout(),
            fixed_width: None,
            font_path: None,
            font_family: None,
            workers: crate::defaults::workers(),
            display_width: crate::defaults::display_width(),
            bitmap_header: crate::defaults::bitmap_header(),
            phrase_header: crate::defaults::phrase_header(),
            manifest: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the user's config file
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("par-glyph")
    }

    /// Path of the user's config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Load the user's config file if it exists, otherwise use defaults.
    ///
    /// Unlike `load_from`, a missing file is not an error here.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::debug!("No config file at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific YAML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text. Missing fields take their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a map
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Save configuration to a YAML file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::info!("Config saved to {:?}", path);
        Ok(())
    }

    /// Check the constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GLYPH_HEIGHT..=MAX_GLYPH_HEIGHT).contains(&self.glyph_height) {
            return Err(ConfigError::Validation(format!(
                "glyph_height must be between {MIN_GLYPH_HEIGHT} and {MAX_GLYPH_HEIGHT} pixels, got {}",
                self.glyph_height
            )));
        }
        if self.threshold == 0 {
            return Err(ConfigError::Validation(
                "threshold must be at least 1, otherwise nothing is ever ink".to_string(),
            ));
        }
        if !(self.render_size.is_finite() && self.render_size > 0.0) {
            return Err(ConfigError::Validation(format!(
                "render_size must be a positive number, got {}",
                self.render_size
            )));
        }
        if self.canvas_height == 0 {
            return Err(ConfigError::Validation(
                "canvas_height must be greater than 0".to_string(),
            ));
        }
        if self.baseline >= self.canvas_height {
            return Err(ConfigError::Validation(format!(
                "baseline ({}) must be above the bottom of the canvas (height {})",
                self.baseline, self.canvas_height
            )));
        }
        if !(self.blank_width_ratio.is_finite() && self.blank_width_ratio > 0.0) {
            return Err(ConfigError::Validation(format!(
                "blank_width_ratio must be a positive number, got {}",
                self.blank_width_ratio
            )));
        }
        if !(self.letter_spacing_ratio.is_finite() && self.letter_spacing_ratio >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "letter_spacing_ratio must be zero or positive, got {}",
                self.letter_spacing_ratio
            )));
        }
        if self.fixed_width == Some(0) {
            return Err(ConfigError::Validation(
                "fixed_width must be greater than 0".to_string(),
            ));
        }
        if self.display_width == 0 {
            return Err(ConfigError::Validation(
                "display_width must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Width given to a cluster with no ink at all.
    pub fn placeholder_width(&self) -> u32 {
        ((self.glyph_height as f32 * self.blank_width_ratio).floor() as u32).max(1)
    }

    /// Spacing added to every recorded unpadded width.
    pub fn spacing_margin(&self) -> u32 {
        if self.letter_spacing_ratio <= 0.0 {
            0
        } else {
            (self.glyph_height as f32 * self.letter_spacing_ratio).ceil() as u32
        }
    }

    /// Glyph width used in fixed layout mode
    pub fn effective_fixed_width(&self) -> u32 {
        self.fixed_width.unwrap_or(self.glyph_height)
    }

    /// Set the glyph height
    pub fn with_glyph_height(mut self, height: u32) -> Self {
        self.glyph_height = height;
        self
    }

    /// Set the font file path
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Set the layout mode
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    /// Set the number of rasterization workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}
