use anyhow::Result;
use clap::Parser;
use par_glyph::cli::{self, Cli, LogLevelArg};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level takes precedence over RUST_LOG
    par_glyph::debug::init_log_bridge(
        cli.log_level.map(LogLevelArg::to_level_filter),
        cli.log_file.as_deref(),
    );
    log::info!("Starting par-glyph {}", par_glyph::VERSION);

    match cli::run(cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("par-glyph: error: {e:#}");
            std::process::exit(1);
        }
    }
}
