//! Command line parsing and [`CompileConfig`] construction.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use font::{glyph::DEFAULT_GLYPH_HEIGHT, row::RowWidthPolicy};

/// The output path used when none is given.
pub const DEFAULT_OUTPUT_PATH: &str = "font.out";

/// Description of a single font compilation.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CompileConfig {
    /// The path of the ASCII-art font source.
    pub font_path: PathBuf,
    /// The path the packed glyph blob is written to.
    pub output_path: PathBuf,
    /// The [`RowWidthPolicy`] applied to every glyph row.
    pub policy: RowWidthPolicy,
    /// Characters whose glyphs are rendered to stdout after compiling.
    pub preview: Option<String>,
    /// The number of rows in each glyph.
    pub glyph_height: u8,
    /// The number of times `-v` was given.
    pub verbosity: u8,
}

/// Parses the process arguments to construct a [`CompileConfig`].
pub fn get_config() -> CompileConfig {
    parse_arguments(&command_parser().get_matches())
}

/// Parses the arguments required to produce a valid [`CompileConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> CompileConfig {
    let font_path = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .unwrap_or_else(|| unreachable!("`font` is a required argument"));

    let output_path = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| unreachable!("`output` should have a default value"));

    let policy = if matches.get_flag("exact-width") {
        RowWidthPolicy::Exact
    } else {
        RowWidthPolicy::Lenient
    };

    let preview = matches.get_one::<String>("preview").cloned();

    let glyph_height = matches
        .get_one::<u8>("glyph-height")
        .copied()
        .unwrap_or(DEFAULT_GLYPH_HEIGHT);

    CompileConfig {
        font_path,
        output_path,
        policy,
        preview,
        glyph_height,
        verbosity: matches.get_count("verbose"),
    }
}

/// Returns the command parser for `font-compiler`.
pub fn command_parser() -> Command {
    let font = Arg::new("font")
        .value_name("FONT")
        .help("Path to the ASCII-art font source")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let output = Arg::new("output")
        .short('o')
        .value_name("PATH")
        .help("Path to the output file")
        .env("FONT_COMPILER_OUTPUT")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_OUTPUT_PATH);

    let exact_width = Arg::new("exact-width")
        .long("exact-width")
        .help("Reject glyph rows narrower than 8 pixels")
        .action(ArgAction::SetTrue);

    let preview = Arg::new("preview")
        .long("preview")
        .value_name("CHARS")
        .help("Render the glyphs of CHARS from the compiled output");

    let glyph_height = Arg::new("glyph-height")
        .long("glyph-height")
        .value_name("ROWS")
        .help(format!(
            "Number of rows in each glyph, used by --preview [default: {DEFAULT_GLYPH_HEIGHT}]"
        ))
        .value_parser(value_parser!(u8).range(1..));

    let verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Increase logging verbosity")
        .action(ArgAction::Count);

    Command::new("font-compiler")
        .about("Compiles an ASCII-art bitmap font into packed glyph rows")
        .arg(font)
        .arg(output)
        .arg(exact_width)
        .arg(preview)
        .arg(glyph_height)
        .arg(verbose)
}
