//! Tool for compiling ASCII-art bitmap font sources into the packed glyph row format.

use std::{fs, io::Write};

use anyhow::{Context, Result};
use font::{glyph::GlyphTable, row};

use crate::cli::CompileConfig;

pub mod cli;

/// Reads the font source named by `config`, encodes it and writes the packed rows to the
/// configured output path. Returns the packed rows.
///
/// The source is fully encoded before the output is created, so an invalid glyph row leaves an
/// existing output file untouched.
///
/// # Errors
///
/// Returns [`Err`] if the source cannot be read, contains a glyph row of a width not allowed by
/// the configured policy, or if the output cannot be written.
pub fn compile(config: &CompileConfig) -> Result<Vec<u8>> {
    let font_path = config.font_path.display();
    let source = fs::read_to_string(&config.font_path)
        .with_context(|| format!("error reading font source \"{font_path}\""))?;
    log::debug!("read {} bytes from \"{font_path}\"", source.len());

    let mut blob = Vec::new();
    let row_count = row::encode_into(&source, config.policy, &mut blob)
        .with_context(|| format!("error encoding \"{font_path}\""))?;

    let output_path = config.output_path.display();
    fs::write(&config.output_path, &blob)
        .with_context(|| format!("error writing output \"{output_path}\""))?;

    let table = GlyphTable::new(&blob, config.glyph_height);
    log::info!(
        "wrote {row_count} glyph rows ({} glyphs of {} rows) to \"{output_path}\"",
        table.glyph_count(),
        table.height(),
    );
    let trailing_rows = row_count % usize::from(config.glyph_height.max(1));
    if trailing_rows != 0 {
        log::debug!("{trailing_rows} trailing rows do not form a whole glyph");
    }

    Ok(blob)
}

/// Renders the glyph of each character in `chars` from `blob` into `writer`.
///
/// Characters that have no glyph in `blob` are skipped with a warning.
///
/// # Errors
///
/// Returns [`Err`] if writing to `writer` fails.
pub fn preview<W: Write>(blob: &[u8], chars: &str, glyph_height: u8, mut writer: W) -> Result<()> {
    let table = GlyphTable::new(blob, glyph_height);
    for c in chars.chars() {
        let Some(glyph) = table.get_char(c) else {
            log::warn!(
                "no glyph for {c:?}: output holds {} glyphs",
                table.glyph_count()
            );
            continue;
        };

        writeln!(writer, "{c:?} (U+{:04X})", u32::from(c))?;
        write!(writer, "{glyph}")?;
    }

    Ok(())
}
