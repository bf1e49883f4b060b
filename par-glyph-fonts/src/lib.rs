//! Font management, text shaping and glyph rasterization for par-glyph.
//!
//! This crate provides:
//! - Font loading from a file path or by system family name, with a
//!   fallback chain of fonts known to cover complex scripts
//! - HarfBuzz-based text shaping via rustybuzz
//! - Grayscale glyph rasterization via swash
//! - The [`Shaper`] and [`GlyphRasterizer`] traits the compiler consumes,
//!   so the pipeline can run against any shaping/rasterizing backend
//!
//! # Architecture
//!
//! `FontManager` resolves and owns the font bytes. `TextShaper` and
//! `SwashRasterizer` each hold a cheap clone of the same `FontData` and are
//! `Send + Sync`, so one pair can serve every rasterization worker.

pub mod adapter;
pub mod font_manager;
pub mod rasterizer;
pub mod text_shaper;

// Re-export main types for convenience
pub use adapter::{GlyphRasterizer, NOTDEF_GLYPH, RasterizedGlyph, ShapedGlyph, Shaper};
pub use font_manager::{FALLBACK_FAMILIES, FontData, FontManager};
pub use rasterizer::SwashRasterizer;
pub use text_shaper::{ShapingOptions, TextShaper};
