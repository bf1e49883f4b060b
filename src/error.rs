//! Typed error types for the par-glyph compiler.
//!
//! Per-glyph rendering problems never surface here: they are routine and the
//! compositor skips the glyph. These variants are the failures that abort a
//! run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a compilation run.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A glyph reached the atlas with a width that cannot be packed.
    ///
    /// Indicates a bug in the normalizer, not bad input.
    #[error("glyph {ordinal} has invalid byte-aligned width {width} (must be a positive multiple of 8)")]
    InvalidGlyphWidth {
        /// Catalog ordinal of the offending glyph.
        ordinal: usize,
        /// The width that was rejected.
        width: u32,
    },

    /// A glyph's packed data does not match its declared geometry.
    #[error("glyph {ordinal} is inconsistent: {details}")]
    InconsistentBitmap {
        /// Catalog ordinal of the offending glyph.
        ordinal: usize,
        /// What did not line up.
        details: String,
    },

    /// The phrase input could not be read.
    #[error("failed to read phrases from '{path}': {source}")]
    Input {
        /// Input file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write '{path}': {source}")]
    Export {
        /// Output file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be serialized.
    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// The font engines could not be set up.
    #[error("font setup failed: {0}")]
    Font(String),
}

/// Result alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;
