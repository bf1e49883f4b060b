//! par-glyph: compiles complex-script phrases into packed 1-bit glyph tables
//! for memory-constrained embedded renderers.
//!
//! Pipeline, leaves first:
//!
//! - [`catalog`]: grapheme segmentation and first-seen deduplication
//! - [`compositor`]: shaped glyphs of one cluster onto a grayscale canvas
//! - [`normalizer`]: resize, threshold, crop and byte-align
//! - [`packer`]: MSB-first bit packing
//! - [`atlas`] / [`phrase_table`]: the flat tables the target consumes
//! - [`pipeline`]: orchestration, with per-cluster rendering fanned out
//!   across threads
//!
//! Shaping and rasterization are consumed through the traits in
//! `par_glyph_fonts`, so tests can run against mock backends.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod atlas;
pub mod bitmap;
pub mod catalog;
pub mod cli;
pub mod compositor;
pub mod debug;
pub mod error;
pub mod export;
pub mod input;
pub mod normalizer;
pub mod packer;
pub mod phrase_table;
pub mod pipeline;
pub mod preview;

pub use atlas::Atlas;
pub use bitmap::{BinaryImage, GlyphBitmap};
pub use catalog::{Catalog, PhraseIndexList, build_catalog};
pub use error::{CompileError, Result};
pub use phrase_table::PhraseTable;
pub use pipeline::{Compilation, Compiler, PipelineOptions};
