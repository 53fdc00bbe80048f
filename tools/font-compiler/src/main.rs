//! Tool for compiling ASCII-art bitmap font sources into the packed glyph row format.

use std::io;

use anyhow::Result;
use font_compiler::cli;
use log::LevelFilter;

fn main() -> Result<()> {
    let config = cli::get_config();

    let level = match config.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let blob = font_compiler::compile(&config)?;
    if let Some(chars) = &config.preview {
        font_compiler::preview(&blob, chars, config.glyph_height, io::stdout().lock())?;
    }

    Ok(())
}
