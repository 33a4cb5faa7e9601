//! The streaming stats parser implementation.
//!
//! One record per line, eleven tab-separated columns; the parser consumes
//! column 1 (a base64-encoded path, decoded into a reusable fixed buffer)
//! and column 8 (a single-byte entry-type tag), and walks over everything
//! between them without interpretation.
//!
//! # Examples
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use statmodem::StatsParser;
//!
//! let listing = "L3RtcC9hLnNpZg==\t10\t1\t100\t100\t0\t0\tf\t0\t0\tx\n";
//! let mut parser = StatsParser::new(Cursor::new(listing));
//! while parser.advance() {
//!     if let Some(record) = parser.record() {
//!         assert_eq!(record.path(), b"/tmp/a.sif");
//!         assert!(record.is_file());
//!     }
//! }
//! assert!(parser.error().is_none());
//! ```

use std::io::{BufRead, Read};

use crate::columns::ColumnCursor;
use crate::error::ParseError;
use crate::options::ParserOptions;
use crate::path_buffer::PathBuffer;

/// Entry-type tag marking a regular file.
pub const FILE_TYPE: u8 = b'f';

/// Longest supported input line in bytes, excluding the terminator.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Columns between the path and the entry type, walked but never read.
const SKIPPED_COLUMNS: usize = 6;

/// Outcome of the most recent advance.
///
/// `Failed` and `Exhausted` are terminal: once entered, every further
/// advance returns `false` without touching the input. `Failed` carries the
/// sticky error.
#[derive(Debug)]
enum State {
    Ready,
    Yielded,
    Blank,
    Skipped,
    Failed(ParseError),
    Exhausted,
}

/// One successfully parsed record.
///
/// The path borrows the parser's internal decode buffer, so a record lives
/// only until the next advance: the borrow checker requires callers to copy
/// the path bytes out before asking for another record.
#[derive(Debug, Clone, Copy)]
pub struct Record<'scan> {
    entry_type: u8,
    path: &'scan [u8],
}

impl<'scan> Record<'scan> {
    /// The decoded path bytes of column 1.
    #[must_use]
    pub fn path(&self) -> &'scan [u8] {
        self.path
    }

    /// The raw entry-type byte of column 8.
    ///
    /// Only [`FILE_TYPE`] is distinguished by name; every other value is
    /// passed through for the caller to interpret or ignore.
    #[must_use]
    pub fn entry_type(&self) -> u8 {
        self.entry_type
    }

    /// Whether the entry is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.entry_type == FILE_TYPE
    }
}

/// Streaming parser over a stats listing.
///
/// Construct one parser per input stream and drive it with
/// [`advance`](Self::advance) until it reports termination; the current
/// record is read through [`record`](Self::record) between advances. After
/// the loop, [`error`](Self::error) distinguishes clean end of input from a
/// failure.
///
/// The parser owns a line buffer and a fixed-size path decode buffer for
/// its whole lifetime; no per-record allocation happens while scanning.
pub struct StatsParser<R> {
    reader: R,
    line: Vec<u8>,
    path: PathBuffer,
    entry_type: u8,
    state: State,
    options: ParserOptions,
}

impl<R: BufRead> StatsParser<R> {
    /// Creates a parser over uncompressed stats data with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParserOptions::default())
    }

    /// Creates a parser with explicit [`ParserOptions`].
    pub fn with_options(reader: R, options: ParserOptions) -> Self {
        Self {
            reader,
            line: Vec::with_capacity(MAX_LINE_LENGTH),
            path: PathBuffer::new(),
            entry_type: 0,
            state: State::Ready,
            options,
        }
    }

    /// Reads and parses the next line of the listing.
    ///
    /// Returns `true` while the stream keeps going: either a record is now
    /// available through [`record`](Self::record), or the line was blank
    /// and exposed nothing. Returns `false` once the input is exhausted or
    /// an error latched; [`error`](Self::error) tells the two apart. After
    /// a failure every further call returns `false`.
    #[must_use]
    pub fn advance(&mut self) -> bool {
        if matches!(self.state, State::Failed(_) | State::Exhausted) {
            return false;
        }

        match self.read_line() {
            Ok(0) => {
                self.state = State::Exhausted;
                false
            }
            Ok(_) => self.parse_line(),
            Err(err) => self.fail(err),
        }
    }

    /// The record produced by the most recent advance, if it yielded one.
    ///
    /// Blank and skipped lines, termination, and the time before the first
    /// advance all answer `None`.
    #[must_use]
    pub fn record(&self) -> Option<Record<'_>> {
        match self.state {
            State::Yielded => Some(Record {
                entry_type: self.entry_type,
                path: self.path.as_slice(),
            }),
            _ => None,
        }
    }

    /// The sticky error that stopped the stream, if any.
    ///
    /// End of input is never reported here: after a clean scan this stays
    /// `None`.
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        match &self.state {
            State::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Reads one line into the reusable line buffer, strips its terminator,
    /// and returns the raw byte count (0 at end of input).
    ///
    /// The read is bounded so a pathological line cannot grow the buffer
    /// past [`MAX_LINE_LENGTH`] plus its terminator.
    fn read_line(&mut self) -> Result<usize, ParseError> {
        self.line.clear();

        let bound = (MAX_LINE_LENGTH + 2) as u64;
        let count = self
            .reader
            .by_ref()
            .take(bound)
            .read_until(b'\n', &mut self.line)?;

        if self.line.last() == Some(&b'\n') {
            self.line.pop();
            if self.line.last() == Some(&b'\r') {
                self.line.pop();
            }
        }

        if self.line.len() > MAX_LINE_LENGTH {
            return Err(ParseError::LineTooLong);
        }

        Ok(count)
    }

    fn parse_line(&mut self) -> bool {
        // A terminator on its own, or a single stray byte, is tolerated as
        // blank rather than failed.
        if self.line.len() <= 1 {
            self.state = State::Blank;
            return true;
        }

        match Self::parse_record(&self.line, &mut self.path) {
            Ok(entry_type) => {
                self.entry_type = entry_type;
                self.state = State::Yielded;
                true
            }
            Err(ParseError::BadPath | ParseError::TooFewColumns)
                if self.options.skip_malformed =>
            {
                self.state = State::Skipped;
                true
            }
            Err(err) => self.fail(err),
        }
    }

    /// Walks the fixed column layout of one non-blank line: column 1 is the
    /// encoded path, columns 2–7 are skipped, column 8 holds the entry type.
    ///
    /// Column errors take precedence over decode errors on the same line.
    fn parse_record(line: &[u8], path: &mut PathBuffer) -> Result<u8, ParseError> {
        let mut columns = ColumnCursor::new(line);

        let encoded = columns.next_column()?;
        columns.skip_columns(SKIPPED_COLUMNS)?;
        let entry_type = columns
            .next_column()?
            .first()
            .copied()
            .ok_or(ParseError::TooFewColumns)?;

        path.decode(encoded)?;

        Ok(entry_type)
    }

    fn fail(&mut self, err: ParseError) -> bool {
        self.state = State::Failed(err);
        false
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{MAX_LINE_LENGTH, StatsParser};
    use crate::error::ParseError;
    use crate::options::ParserOptions;

    const WELL_FORMED: &str = "L3RtcC9hLnNpZg==\t10\t1\t100\t100\t0\t0\tf\t0\t0\tx\n";

    fn parser(input: &str) -> StatsParser<Cursor<Vec<u8>>> {
        StatsParser::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn yields_path_and_entry_type() {
        let mut p = parser(WELL_FORMED);
        assert!(p.advance());
        let record = p.record().unwrap();
        assert_eq!(record.path(), b"/tmp/a.sif");
        assert_eq!(record.entry_type(), b'f');
        assert!(record.is_file());
    }

    #[test]
    fn non_file_entry_types_pass_through() {
        let mut p = parser("L3RtcA==\t10\t1\t100\t100\t0\t0\td\t0\t0\tx\n");
        assert!(p.advance());
        let record = p.record().unwrap();
        assert_eq!(record.entry_type(), b'd');
        assert!(!record.is_file());
    }

    #[test]
    fn no_record_before_the_first_advance() {
        let p = parser(WELL_FORMED);
        assert!(p.record().is_none());
        assert!(p.error().is_none());
    }

    #[test]
    fn blank_lines_keep_going_without_a_record() {
        let mut p = parser("\n\nx\n");
        for _ in 0..3 {
            assert!(p.advance());
            assert!(p.record().is_none());
        }
        assert!(!p.advance());
        assert!(p.error().is_none());
    }

    #[test]
    fn empty_input_is_a_clean_end() {
        let mut p = parser("");
        assert!(!p.advance());
        assert!(p.record().is_none());
        assert!(p.error().is_none());
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let mut p = parser("L3RtcC9hLnNpZg==\t10\t1\t100\t100\t0\t0\tf\t0\t0\tx\r\n");
        assert!(p.advance());
        assert_eq!(p.record().unwrap().path(), b"/tmp/a.sif");
    }

    #[test]
    fn final_line_without_terminator_still_parses() {
        let mut p = parser("L3RtcC9hLnNpZg==\t10\t1\t100\t100\t0\t0\tf\t0\t0\tx");
        assert!(p.advance());
        assert_eq!(p.record().unwrap().path(), b"/tmp/a.sif");
        assert!(!p.advance());
        assert!(p.error().is_none());
    }

    #[test]
    fn empty_entry_type_column_fails_closed() {
        let mut p = parser("L3RtcA==\t10\t1\t100\t100\t0\t0\t\t0\t0\tx\n");
        assert!(!p.advance());
        assert!(matches!(p.error(), Some(ParseError::TooFewColumns)));
    }

    #[test]
    fn overlong_lines_latch_line_too_long() {
        let mut line = vec![b'A'; MAX_LINE_LENGTH + 16];
        line.push(b'\n');
        let mut p = StatsParser::new(Cursor::new(line));
        assert!(!p.advance());
        assert!(matches!(p.error(), Some(ParseError::LineTooLong)));
    }

    #[test]
    fn line_of_exactly_the_maximum_length_is_read() {
        // A maximum-length line that is still malformed parses far enough to
        // fail on columns, not on length.
        let mut line = vec![b'A'; MAX_LINE_LENGTH];
        line.push(b'\n');
        let mut p = StatsParser::new(Cursor::new(line));
        assert!(!p.advance());
        assert!(matches!(p.error(), Some(ParseError::TooFewColumns)));
    }

    #[test]
    fn failure_is_sticky_across_later_good_lines() {
        let mut input = String::from("bad path\t1\t1\t1\t1\t1\t1\tf\t0\t0\tx\n");
        input.push_str(WELL_FORMED);
        let mut p = parser(&input);
        assert!(!p.advance());
        assert!(matches!(p.error(), Some(ParseError::BadPath)));
        assert!(!p.advance());
        assert!(matches!(p.error(), Some(ParseError::BadPath)));
    }

    #[test]
    fn skip_malformed_demotes_record_failures() {
        let mut input = String::from("bad path\t1\t1\t1\t1\t1\t1\tf\t0\t0\tx\n");
        input.push_str("L3RtcA==\t1\n");
        input.push_str(WELL_FORMED);
        let options = ParserOptions {
            skip_malformed: true,
        };
        let mut p = StatsParser::with_options(
            Cursor::new(input.into_bytes()),
            options,
        );

        assert!(p.advance());
        assert!(p.record().is_none());
        assert!(p.advance());
        assert!(p.record().is_none());
        assert!(p.advance());
        assert_eq!(p.record().unwrap().path(), b"/tmp/a.sif");
        assert!(!p.advance());
        assert!(p.error().is_none());
    }

    #[test]
    fn skip_malformed_still_halts_on_overlong_lines() {
        let mut line = vec![b'A'; MAX_LINE_LENGTH + 16];
        line.push(b'\n');
        let options = ParserOptions {
            skip_malformed: true,
        };
        let mut p = StatsParser::with_options(Cursor::new(line), options);
        assert!(!p.advance());
        assert!(matches!(p.error(), Some(ParseError::LineTooLong)));
    }
}
