//! Positional walk across the tab-delimited columns of one line.

use memchr::memchr;

use crate::error::ParseError;

/// Cursor over the columns of a single line buffer.
///
/// The cursor carries no state beyond its offset into the line. Each call to
/// [`next_column`](Self::next_column) returns the span up to (but excluding)
/// the next tab and leaves the offset immediately past that tab, so a missing
/// separator is detected at the column where it happens rather than once at
/// the end of the row.
pub(crate) struct ColumnCursor<'line> {
    line: &'line [u8],
    offset: usize,
}

impl<'line> ColumnCursor<'line> {
    pub(crate) fn new(line: &'line [u8]) -> Self {
        Self { line, offset: 0 }
    }

    /// Returns the next tab-terminated span and advances past the tab.
    ///
    /// Reaching the end of the line before a tab is a
    /// [`ParseError::TooFewColumns`] failure, including for the final column
    /// of a row: every column the caller asks for must be tab-terminated.
    pub(crate) fn next_column(&mut self) -> Result<&'line [u8], ParseError> {
        let rest = &self.line[self.offset..];
        let tab = memchr(b'\t', rest).ok_or(ParseError::TooFewColumns)?;
        self.offset += tab + 1;
        Ok(&rest[..tab])
    }

    /// Walks `n` columns without interpreting their contents.
    pub(crate) fn skip_columns(&mut self, n: usize) -> Result<(), ParseError> {
        for _ in 0..n {
            self.next_column()?;
        }
        Ok(())
    }
}
