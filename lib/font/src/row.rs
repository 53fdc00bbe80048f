//! Encoding of ASCII-art glyph rows into packed bytes.
//!
//! A glyph row is a line that starts with a run of the marker characters `.` (pixel off), `*` or
//! `@` (pixel on). Each run is packed into a single byte with the first pixel in the most
//! significant bit. Lines that do not start with a marker carry no glyph data and are skipped.

use core::{error, fmt};

#[cfg(feature = "std")]
use std::io::{self, Write};

/// The number of pixels in a full glyph row.
pub const ROW_WIDTH: usize = 8;

/// Controls how glyph rows narrower than [`ROW_WIDTH`] are handled.
///
/// Rows wider than [`ROW_WIDTH`] are rejected under every policy.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum RowWidthPolicy {
    /// Narrow rows are packed as a right-aligned number, as if padded on the left with off pixels.
    #[default]
    Lenient,
    /// Every row must be exactly [`ROW_WIDTH`] pixels wide.
    Exact,
}

/// Returns `true` if `c` is one of the glyph row marker characters.
pub const fn is_marker(c: u8) -> bool {
    matches!(c, b'.' | b'*' | b'@')
}

/// A run of marker characters found at the start of a source line.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct RowToken<'text> {
    /// The 1-based number of the line the token was found on.
    line: usize,
    /// The marker characters of the token. Never empty.
    markers: &'text str,
}

impl<'text> RowToken<'text> {
    /// Returns the 1-based number of the source line this [`RowToken`] was taken from.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the marker characters that make up this [`RowToken`].
    pub const fn markers(&self) -> &'text str {
        self.markers
    }

    /// Returns the number of pixels in this [`RowToken`].
    pub const fn width(&self) -> usize {
        self.markers.len()
    }

    /// Returns an [`Iterator`] over the pixels of this [`RowToken`], leftmost pixel first.
    pub fn pixels(&self) -> impl Iterator<Item = bool> + use<'text> {
        self.markers.bytes().map(|marker| marker != b'.')
    }

    /// Packs this [`RowToken`] into a single byte, leftmost pixel in the most significant bit.
    ///
    /// # Errors
    ///
    /// Returns [`RowLengthError`] if the width of this [`RowToken`] is not allowed by `policy`.
    pub fn pack(&self, policy: RowWidthPolicy) -> Result<u8, RowLengthError> {
        let width = self.width();
        let allowed = match policy {
            RowWidthPolicy::Lenient => width <= ROW_WIDTH,
            RowWidthPolicy::Exact => width == ROW_WIDTH,
        };
        if !allowed {
            return Err(RowLengthError {
                line: self.line,
                width,
                policy,
            });
        }

        Ok(self
            .pixels()
            .fold(0, |value, pixel| (value << 1) | u8::from(pixel)))
    }
}

/// Matches the glyph row at the start of `line`, which is line number `line_number` of the source.
///
/// Returns `None` if `line` does not start with a marker character. Characters following the
/// leading run of markers are ignored.
pub fn parse_row(line_number: usize, line: &str) -> Option<RowToken<'_>> {
    let width = line.bytes().take_while(|&c| is_marker(c)).count();
    if width == 0 {
        return None;
    }

    Some(RowToken {
        line: line_number,
        markers: &line[..width],
    })
}

/// An [`Iterator`] over the packed glyph rows of a font source, in source order.
#[derive(Clone, Debug)]
pub struct GlyphRows<'text> {
    /// The lines that have not been examined yet.
    lines: SourceLines<'text>,
    /// The number of the most recently examined line.
    line_number: usize,
    /// The [`RowWidthPolicy`] applied to every row.
    policy: RowWidthPolicy,
}

impl<'text> GlyphRows<'text> {
    /// Creates a new [`GlyphRows`] over `text`.
    ///
    /// Whitespace at the very start of `text` is skipped. Line numbers reported in errors still
    /// count from the start of `text`.
    pub fn new(text: &'text str, policy: RowWidthPolicy) -> Self {
        let content = text.trim_start_matches(is_leading_space);
        let prefix = &text[..text.len() - content.len()];
        let skipped_lines = SourceLines::new(prefix).count() - 1;

        Self {
            lines: SourceLines::new(content),
            line_number: skipped_lines,
            policy,
        }
    }
}

impl Iterator for GlyphRows<'_> {
    type Item = Result<u8, RowLengthError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;

            let Some(token) = parse_row(self.line_number, line) else {
                log::trace!("line {}: no glyph row", self.line_number);
                continue;
            };

            let row = token.pack(self.policy);
            if let Ok(byte) = row {
                log::trace!("line {}: {} => {byte:#04x}", token.line, token.markers);
            }
            return Some(row);
        }
    }
}

/// Returns `true` if `c` ends a source line.
///
/// `\r\n` counts as a single break; every other line break is one character.
const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n'
            | '\x0b'
            | '\x0c'
            | '\r'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Returns `true` if `c` is skipped at the very start of a font source.
///
/// This is Unicode whitespace plus the ASCII separator controls `\x1c` to `\x1f`.
fn is_leading_space(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\x1c'..='\x1f')
}

/// Splits text into lines on every character accepted by [`is_line_break`] and on `\r\n`.
#[derive(Clone, Debug)]
struct SourceLines<'text> {
    /// The text following the most recently returned line.
    rest: Option<&'text str>,
}

impl<'text> SourceLines<'text> {
    /// Creates a new [`SourceLines`] over `text`.
    const fn new(text: &'text str) -> Self {
        Self { rest: Some(text) }
    }
}

impl<'text> Iterator for SourceLines<'text> {
    type Item = &'text str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        let Some((end, separator)) = rest.char_indices().find(|&(_, c)| is_line_break(c)) else {
            self.rest = None;
            return Some(rest);
        };

        let separator_len = if rest[end..].starts_with("\r\n") {
            2
        } else {
            separator.len_utf8()
        };
        self.rest = Some(&rest[end + separator_len..]);
        Some(&rest[..end])
    }
}

/// Encodes `text` into one packed byte per glyph row using [`RowWidthPolicy::Lenient`].
///
/// # Errors
///
/// Returns [`RowLengthError`] for the first glyph row wider than [`ROW_WIDTH`].
#[cfg(feature = "std")]
pub fn encode(text: &str) -> Result<Vec<u8>, RowLengthError> {
    encode_with(text, RowWidthPolicy::Lenient)
}

/// Encodes `text` into one packed byte per glyph row, checking row widths against `policy`.
///
/// # Errors
///
/// Returns [`RowLengthError`] for the first glyph row whose width `policy` does not allow.
#[cfg(feature = "std")]
pub fn encode_with(text: &str, policy: RowWidthPolicy) -> Result<Vec<u8>, RowLengthError> {
    GlyphRows::new(text, policy).collect()
}

/// Encodes `text` into `writer`, returning the number of glyph rows written.
///
/// # Errors
///
/// - [`EncodeError::Row`]: Returned if a glyph row's width is not allowed by `policy`. The rows
///   preceding it have already been written.
/// - [`EncodeError::Io`]: Returned if writing to `writer` fails.
#[cfg(feature = "std")]
pub fn encode_into<W: Write>(
    text: &str,
    policy: RowWidthPolicy,
    mut writer: W,
) -> Result<usize, EncodeError> {
    let mut count = 0;
    for row in GlyphRows::new(text, policy) {
        writer.write_all(&[row?])?;
        count += 1;
    }

    Ok(count)
}

/// A glyph row whose width is not allowed by the active [`RowWidthPolicy`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct RowLengthError {
    /// The 1-based number of the offending line.
    pub line: usize,
    /// The number of pixels in the offending row.
    pub width: usize,
    /// The [`RowWidthPolicy`] the row violated.
    pub policy: RowWidthPolicy,
}

impl fmt::Display for RowLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = match self.policy {
            RowWidthPolicy::Lenient => "at most",
            RowWidthPolicy::Exact => "exactly",
        };

        write!(
            f,
            "line {}: glyph row is {} pixels wide, expected {bound} {ROW_WIDTH}",
            self.line, self.width
        )
    }
}

impl error::Error for RowLengthError {}

/// Various errors that can occur while encoding into a writer.
#[cfg(feature = "std")]
#[derive(Debug)]
pub enum EncodeError {
    /// A glyph row had a width that is not allowed.
    Row(RowLengthError),
    /// An error occurred while writing a packed row.
    Io(io::Error),
}

#[cfg(feature = "std")]
impl From<RowLengthError> for EncodeError {
    fn from(value: RowLengthError) -> Self {
        Self::Row(value)
    }
}

#[cfg(feature = "std")]
impl From<io::Error> for EncodeError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "std")]
impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(error) => write!(f, "invalid glyph row: {error}"),
            Self::Io(error) => write!(f, "error writing glyph row: {error}"),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Row(error) => Some(error),
            Self::Io(error) => Some(error),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::{
        EncodeError, GlyphRows, RowLengthError, RowWidthPolicy, encode, encode_into, encode_with,
        parse_row,
    };

    const LETTER_A: &str = "\
0x41 'A'
........
...**...
...**...
..*..*..
..*..*..
.*....*.
.******.
*......*
";

    #[test]
    fn empty_source() {
        assert_eq!(encode("").unwrap(), []);
        assert_eq!(encode("  \n\n\t").unwrap(), []);
    }

    #[test]
    fn single_rows() {
        assert_eq!(encode("........").unwrap(), [0x00]);
        assert_eq!(encode("********").unwrap(), [0xFF]);
        assert_eq!(encode("*.*.*.*.").unwrap(), [0xAA]);
        assert_eq!(encode("@@@@@@@@").unwrap(), [0xFF]);
        assert_eq!(encode(".......@").unwrap(), [0x01]);
        assert_eq!(encode("@*@*....").unwrap(), [0xF0]);
    }

    #[test]
    fn one_byte_per_row() {
        let bytes = encode(LETTER_A).unwrap();

        assert_eq!(bytes, [0x00, 0x18, 0x18, 0x24, 0x24, 0x42, 0x7E, 0x81]);
    }

    #[test]
    fn non_row_lines_are_skipped() {
        let source = "# comment\n\n0x20 ' '\n  ........\n****....\nend\n";

        assert_eq!(encode(source).unwrap(), [0xF0]);
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(encode("****.... row 0\n.*.*.*.*|").unwrap(), [0xF0, 0x55]);
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        assert_eq!(encode("\n\n   \r\n\t*.......").unwrap(), [0x80]);
        assert_eq!(encode("*.......").unwrap(), encode("\n\n*.......").unwrap());
    }

    #[test]
    fn line_endings() {
        assert_eq!(encode("********\r\n........\r\n").unwrap(), [0xFF, 0x00]);
        assert_eq!(encode("********\r........\r").unwrap(), [0xFF, 0x00]);
        assert_eq!(encode("********\x0c........").unwrap(), [0xFF, 0x00]);
        assert_eq!(encode("@@@@@@@@\x0b*.......\x1e.......*").unwrap(), [0xFF, 0x80, 0x01]);
        assert_eq!(
            encode("********\u{2028}........\u{85}*.......\u{2029}.*......").unwrap(),
            [0xFF, 0x00, 0x80, 0x40]
        );
    }

    #[test]
    fn line_numbers_follow_all_line_breaks() {
        let error = encode("........\x0c........\u{2028}.........").unwrap_err();

        assert_eq!(error.line, 3);
    }

    #[test]
    fn leading_separator_controls_are_ignored() {
        assert_eq!(encode("\x1c\x1f\u{3000} *.......").unwrap(), [0x80]);

        let error = encode("\x1d\x0c\x1f*********").unwrap_err();
        assert_eq!(error.line, 3);
    }

    #[test]
    fn wide_row_is_rejected() {
        let error = encode("........\n*********\n").unwrap_err();

        assert_eq!(
            error,
            RowLengthError {
                line: 2,
                width: 9,
                policy: RowWidthPolicy::Lenient,
            }
        );
    }

    #[test]
    fn wide_row_line_counts_skipped_prefix() {
        let error = encode("\n\n\n@@@@@@@@@@@@\n").unwrap_err();

        assert_eq!(error.line, 4);
        assert_eq!(error.width, 12);
    }

    #[test]
    fn narrow_row_lenient() {
        assert_eq!(encode("*....").unwrap(), [0x10]);
        assert_eq!(encode("@").unwrap(), [0x01]);
    }

    #[test]
    fn narrow_row_exact() {
        let error = encode_with("********\n*....\n", RowWidthPolicy::Exact).unwrap_err();

        assert_eq!(error.line, 2);
        assert_eq!(error.width, 5);
        assert_eq!(error.policy, RowWidthPolicy::Exact);
        assert_eq!(
            encode_with("********", RowWidthPolicy::Exact).unwrap(),
            [0xFF]
        );
    }

    #[test]
    fn deterministic() {
        assert_eq!(encode(LETTER_A).unwrap(), encode(LETTER_A).unwrap());
    }

    #[test]
    fn parse_row_token() {
        let token = parse_row(7, "..@*xyz").unwrap();

        assert_eq!(token.line(), 7);
        assert_eq!(token.markers(), "..@*");
        assert_eq!(token.width(), 4);
        assert!(token.pixels().eq([false, false, true, true]));
        assert!(parse_row(1, " ........").is_none());
        assert!(parse_row(1, "").is_none());
    }

    #[test]
    fn rows_continue_after_error() {
        let rows: Vec<_> = GlyphRows::new("*********\n********\n", RowWidthPolicy::Lenient).collect();

        assert!(rows[0].is_err());
        assert_eq!(rows[1], Ok(0xFF));
    }

    #[test]
    fn encode_into_counts_rows() {
        let mut blob = Vec::new();
        let count = encode_into(LETTER_A, RowWidthPolicy::Exact, &mut blob).unwrap();

        assert_eq!(count, 8);
        assert_eq!(blob, encode(LETTER_A).unwrap());
    }

    #[test]
    fn encode_into_reports_row_error() {
        let mut blob = Vec::new();
        let error = encode_into("@@@@@@@@\n@@@@@@@@@\n", RowWidthPolicy::Lenient, &mut blob)
            .unwrap_err();

        assert!(matches!(error, EncodeError::Row(RowLengthError { line: 2, .. })));
        assert_eq!(blob, [0xFF]);
    }

    #[test]
    fn error_message() {
        let error = encode("..........").unwrap_err();

        assert_eq!(
            error.to_string(),
            "line 1: glyph row is 10 pixels wide, expected at most 8"
        );
    }
}
