//! Packaging compiled tables for the embedded target and for tooling.
//!
//! - [`header`]: C headers with the bitmap atlas and the phrase table
//! - [`manifest`]: a JSON description of the catalog and phrases

pub mod header;
pub mod manifest;

use std::fs;
use std::path::Path;

use crate::error::{CompileError, Result};

pub use header::{CType, include_guard, render_bitmap_header, render_phrase_header};
pub use manifest::{Manifest, ManifestGlyph, ManifestPhrase};

/// Write `contents` to `path`, creating parent directories.
///
/// Returns the number of bytes written.
pub(crate) fn write_output(path: &Path, contents: &str) -> Result<u64> {
    let export_err = |source| CompileError::Export {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(export_err)?;
    }
    fs::write(path, contents).map_err(export_err)?;

    let size = contents.len() as u64;
    log::info!("Wrote {} ({} bytes)", path.display(), size);
    Ok(size)
}
