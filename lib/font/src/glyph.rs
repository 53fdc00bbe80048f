//! Interface for reading glyphs out of an encoded glyph blob.

use core::fmt::{self, Write};

/// The number of rows in a glyph when no other height is specified.
pub const DEFAULT_GLYPH_HEIGHT: u8 = 16;

/// A table of [`Glyph`]s stored back to back in a packed glyph blob.
///
/// Each row occupies one byte, so glyph `n` starts at byte `n * height`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphTable<'buffer> {
    /// The buffer that contains the glyph data.
    buffer: &'buffer [u8],
    /// The height of each glyph.
    height: u8,
}

impl<'buffer> GlyphTable<'buffer> {
    /// Creates a new [`GlyphTable`] over `buffer` with glyphs of `height` rows.
    pub const fn new(buffer: &'buffer [u8], height: u8) -> Self {
        Self { buffer, height }
    }

    /// Returns the [`Glyph`] at `index` or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Glyph<'buffer>> {
        let start = index.checked_mul(usize::from(self.height))?;
        let end = start.checked_add(usize::from(self.height))?;
        if self.height == 0 || end > self.buffer.len() {
            return None;
        }

        Some(Glyph {
            buffer: &self.buffer[start..end],
        })
    }

    /// Returns the [`Glyph`] indexed by the code point of `c` or `None` if out of bounds.
    pub fn get_char(&self, c: char) -> Option<Glyph<'buffer>> {
        let index = usize::try_from(u32::from(c)).ok()?;
        self.get(index)
    }

    /// Returns the height of a [`Glyph`] in rows.
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the number of complete [`Glyph`]s in this [`GlyphTable`].
    pub const fn glyph_count(&self) -> usize {
        match self.height {
            0 => 0,
            height => self.buffer.len() / height as usize,
        }
    }
}

/// Stores the on/off layout of a specific glyph in a font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The packed rows of the glyph, top row first.
    buffer: &'buffer [u8],
}

impl Glyph<'_> {
    /// Returns the number of rows in this [`Glyph`].
    pub const fn height(&self) -> usize {
        self.buffer.len()
    }
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            rows: self.buffer.iter(),
        }
    }
}

impl fmt::Display for Glyph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in *self {
            writeln!(f, "{row}")?;
        }

        Ok(())
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Debug)]
pub struct GlyphRowsIter<'buffer> {
    /// The packed rows that have not been returned yet.
    rows: core::slice::Iter<'buffer, u8>,
}

impl Iterator for GlyphRowsIter<'_> {
    type Item = GlyphRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().copied().map(GlyphRow)
    }
}

/// A row in the [`Glyph`], one bit per pixel with the leftmost pixel in the most significant bit.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow(pub u8);

impl IntoIterator for GlyphRow {
    type Item = bool;
    type IntoIter = GlyphRowIter;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowIter {
            row: self.0,
            index: 0,
        }
    }
}

impl fmt::Display for GlyphRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pixel in *self {
            f.write_char(if pixel { '@' } else { '.' })?;
        }

        Ok(())
    }
}

/// An [`Iterator`] over the pixels in a [`GlyphRow`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowIter {
    /// The packed row.
    row: u8,
    /// The index of the pixel value to be returned.
    index: u8,
}

impl Iterator for GlyphRowIter {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= 8 {
            return None;
        }

        let bit = (self.row >> (7 - self.index)) & 0b1;

        self.index += 1;
        Some(bit == 1)
    }
}
