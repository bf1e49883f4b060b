//! Configuration system for the par-glyph bitmap font compiler.
//!
//! This crate provides configuration loading, saving, validation and default
//! values for a compilation run:
//!
//! - Glyph geometry (target height, render size, working canvas)
//! - Binarization threshold and blank-cluster placeholder width
//! - Variable-width or fixed-width atlas layout
//! - Font selection (file path or system family)
//! - Output locations for the generated headers and manifest

pub mod config;
pub mod defaults;
mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::LayoutMode;
