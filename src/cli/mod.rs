//! Command-line interface for par-glyph.
//!
//! Argument parsing and config resolution live here; the subcommand bodies
//! are in the [`commands`] submodule.

pub mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use par_glyph_config::{Config, LayoutMode};
use std::path::PathBuf;

/// par-glyph - compile complex-script phrases into packed bitmap fonts
#[derive(Parser, Debug)]
#[command(name = "par-glyph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/par-glyph/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set log level (overrides RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Also append log records to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Font file to render with (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Installed font family to render with (overrides config)
    #[arg(long, global = true, value_name = "NAME")]
    pub family: Option<String>,

    /// Output glyph height in pixels (overrides config)
    #[arg(long, global = true, value_name = "PIXELS")]
    pub height: Option<u32>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile phrases into the bitmap and phrase headers
    Compile {
        /// CSV file of phrases (prompts on stdin when omitted)
        #[arg(short, long, value_name = "CSV")]
        input: Option<PathBuf>,

        /// Save the phrases that were compiled to this CSV file
        #[arg(long, value_name = "CSV")]
        save_phrases: Option<PathBuf>,

        /// Bitmap header output path (overrides config)
        #[arg(long, value_name = "PATH")]
        bitmap_header: Option<PathBuf>,

        /// Phrase header output path (overrides config)
        #[arg(long, value_name = "PATH")]
        phrase_header: Option<PathBuf>,

        /// Also write a JSON manifest to this path (overrides config)
        #[arg(long, value_name = "PATH")]
        manifest: Option<PathBuf>,

        /// Glyph layout (overrides config)
        #[arg(long, value_name = "MODE")]
        layout: Option<LayoutMode>,

        /// Glyph width for fixed layout (overrides config)
        #[arg(long, value_name = "PIXELS")]
        fixed_width: Option<u32>,

        /// Rendering threads, 0 = all cores (overrides config)
        #[arg(long, value_name = "N")]
        workers: Option<usize>,

        /// Print every compiled phrase as block-art
        #[arg(long)]
        preview: bool,
    },

    /// Render text and print it as block-art, without writing files
    Preview {
        /// Text to render
        #[arg(long)]
        text: String,

        /// Columns between glyphs
        #[arg(long, default_value_t = 1)]
        spacing: usize,

        /// Also print each glyph separately
        #[arg(long)]
        sheet: bool,

        /// Also dump the packed atlas bytes, this many bytes per row
        #[arg(long, value_name = "BYTES")]
        raw: Option<usize>,
    },

    /// Print the cluster catalog and phrase index lists (no font needed)
    Catalog {
        /// CSV file of phrases
        #[arg(short, long, value_name = "CSV", conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Phrases given directly
        #[arg(long)]
        text: Vec<String>,
    },
}

/// Load the config file and apply global CLI overrides.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading default config")?,
    };

    if let Some(height) = cli.height {
        config.glyph_height = height;
    }
    if let Some(font) = &cli.font {
        config.font_path = Some(font.clone());
    }
    if let Some(family) = &cli.family {
        config.font_family = Some(family.clone());
    }
    Ok(config)
}

/// Run the parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = resolve_config(&cli)?;

    match cli.command {
        Commands::Compile {
            input,
            save_phrases,
            bitmap_header,
            phrase_header,
            manifest,
            layout,
            fixed_width,
            workers,
            preview,
        } => {
            if let Some(path) = bitmap_header {
                config.bitmap_header = path;
            }
            if let Some(path) = phrase_header {
                config.phrase_header = path;
            }
            if manifest.is_some() {
                config.manifest = manifest;
            }
            if let Some(layout) = layout {
                config.layout = layout;
            }
            if fixed_width.is_some() {
                config.fixed_width = fixed_width;
            }
            if let Some(workers) = workers {
                config.workers = workers;
            }
            config.validate()?;
            commands::compile(
                &config,
                &commands::CompileArgs {
                    input,
                    save_phrases,
                    preview,
                },
            )
        }
        Commands::Preview {
            text,
            spacing,
            sheet,
            raw,
        } => {
            config.validate()?;
            commands::preview(&config, &text, spacing, sheet, raw)
        }
        Commands::Catalog { input, text } => commands::catalog(input.as_deref(), &text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compile_with_globals() {
        let cli = Cli::try_parse_from([
            "par-glyph",
            "compile",
            "--input",
            "phrases.csv",
            "--height",
            "16",
            "--layout",
            "fixed",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.height, Some(16));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        match cli.command {
            Commands::Compile { input, layout, .. } => {
                assert_eq!(input, Some(PathBuf::from("phrases.csv")));
                assert_eq!(layout, Some(LayoutMode::Fixed));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_preview_defaults() {
        let cli = Cli::try_parse_from(["par-glyph", "preview", "--text", "ສະບາຍດີ"]).unwrap();
        match cli.command {
            Commands::Preview {
                text,
                spacing,
                sheet,
                raw,
            } => {
                assert_eq!(text, "ສະບາຍດີ");
                assert_eq!(spacing, 1);
                assert!(!sheet);
                assert_eq!(raw, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_catalog_input_conflicts_with_text() {
        let result = Cli::try_parse_from([
            "par-glyph",
            "catalog",
            "--input",
            "a.csv",
            "--text",
            "ab",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevelArg::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevelArg::Off.to_level_filter(), log::LevelFilter::Off);
    }
}
