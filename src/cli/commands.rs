//! Subcommand implementations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use par_glyph_config::{Config, LayoutMode};
use par_glyph_fonts::{FontManager, ShapingOptions, SwashRasterizer, TextShaper};

use crate::catalog::build_catalog;
use crate::error::CompileError;
use crate::export::header::{write_bitmap_header, write_phrase_header};
use crate::export::Manifest;
use crate::input;
use crate::pipeline::{Compilation, Compiler, PipelineOptions};
use crate::preview;

/// Options for `compile` that are not part of [`Config`].
#[derive(Debug, Clone, Default)]
pub struct CompileArgs {
    pub input: Option<PathBuf>,
    pub save_phrases: Option<PathBuf>,
    pub preview: bool,
}

/// Shaper and rasterizer built from the configured font.
struct FontEngines {
    fonts: FontManager,
    shaper: TextShaper,
    rasterizer: SwashRasterizer,
}

impl FontEngines {
    fn load(config: &Config) -> anyhow::Result<Self> {
        let fonts = FontManager::new(config.font_path.as_deref(), config.font_family.as_deref())
            .map_err(|e| CompileError::Font(format!("{e:#}")))?;
        log::info!("Rendering with {} at {}px", fonts.source(), config.render_size);
        let shaper = fonts.shaper(config.render_size, ShapingOptions::default());
        let rasterizer = fonts.rasterizer(config.render_size);
        Ok(Self {
            fonts,
            shaper,
            rasterizer,
        })
    }

    /// Warn about characters the font cannot draw.
    fn check_coverage(&self, phrases: &[String]) {
        for phrase in phrases {
            let missing = self.fonts.missing_chars(phrase);
            if !missing.is_empty() {
                log::warn!(
                    "Font {} has no glyphs for {:?} in {:?}",
                    self.fonts.source(),
                    missing,
                    phrase
                );
            }
        }
    }

    fn compile(&self, config: &Config, phrases: &[String]) -> anyhow::Result<Compilation> {
        self.check_coverage(phrases);
        let compiler = Compiler::new(
            &self.shaper,
            &self.rasterizer,
            PipelineOptions::from_config(config),
        );
        Ok(compiler.compile(phrases)?)
    }
}

fn read_interactive() -> anyhow::Result<Vec<String>> {
    println!("Enter phrases, one per line (empty line to finish):");
    io::stdout().flush()?;
    Ok(input::read_phrases_interactive(io::stdin().lock())?)
}

/// `compile`: phrases in, headers (and optionally a manifest) out.
pub fn compile(config: &Config, args: &CompileArgs) -> anyhow::Result<()> {
    let phrases = match &args.input {
        Some(path) => input::read_phrases_csv(path)?,
        None => read_interactive()?,
    };
    if phrases.is_empty() {
        bail!("no phrases to compile");
    }
    if let Some(path) = &args.save_phrases {
        input::write_phrases_csv(path, &phrases)?;
    }

    let engines = FontEngines::load(config)?;
    let compilation = engines.compile(config, &phrases)?;

    let fixed_width = match config.layout {
        LayoutMode::Fixed => Some(config.effective_fixed_width()),
        LayoutMode::Variable => None,
    };
    write_bitmap_header(&config.bitmap_header, &compilation.atlas, fixed_width)?;
    write_phrase_header(&config.phrase_header, &compilation.phrase_table)?;
    if let Some(path) = &config.manifest {
        Manifest::from_compilation(&compilation).save(path)?;
    }

    if args.preview {
        for (i, phrase) in compilation.phrase_table.phrases().enumerate() {
            println!("Phrase {}: {}", i + 1, phrases[i]);
            println!(
                "{}\n",
                preview::render_line(&compilation.atlas, phrase, config.display_width, 1)
            );
        }
    }

    println!(
        "Compiled {} phrases, {} unique clusters, {} bitmap bytes",
        compilation.report.phrases, compilation.report.clusters, compilation.report.atlas_bytes
    );
    Ok(())
}

/// `preview`: render one text and print it.
pub fn preview(
    config: &Config,
    text: &str,
    spacing: usize,
    sheet: bool,
    raw: Option<usize>,
) -> anyhow::Result<()> {
    let engines = FontEngines::load(config)?;
    let compilation = engines.compile(config, &[text.to_string()])?;

    if sheet {
        print!(
            "{}",
            preview::glyph_sheet(&compilation.atlas, &compilation.catalog)
        );
    }
    let ordinals = compilation
        .phrase_table
        .phrase(0)
        .context("compiled text has no phrase entry")?;
    println!(
        "{}",
        preview::render_line(&compilation.atlas, ordinals, config.display_width, spacing)
    );
    if let Some(row_bytes) = raw {
        println!();
        println!(
            "{}",
            preview::render_raw(compilation.atlas.bitmaps(), row_bytes)
        );
    }
    Ok(())
}

/// `catalog`: segment and deduplicate without rendering.
pub fn catalog(csv: Option<&Path>, texts: &[String]) -> anyhow::Result<()> {
    let phrases = match csv {
        Some(path) => input::read_phrases_csv(path)?,
        None if !texts.is_empty() => texts.to_vec(),
        None => read_interactive()?,
    };
    let (catalog, lists) = build_catalog(&phrases);
    print!("{}", preview::catalog_listing(&catalog, &lists));
    Ok(())
}
