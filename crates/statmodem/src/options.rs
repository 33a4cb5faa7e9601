/// Configuration options for the stats parser.
///
/// # Examples
///
/// ```rust
/// use statmodem::{ParserOptions, StatsParser};
///
/// let options = ParserOptions {
///     skip_malformed: true,
///     ..Default::default()
/// };
/// let parser = StatsParser::with_options(std::io::empty(), options);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Whether to skip malformed records instead of halting the stream.
    ///
    /// By default the first record whose path column fails to decode, or
    /// whose row is missing columns, latches a sticky error: the advance
    /// reporting it and every advance after it return `false`. Callers that
    /// prefer resilience over strictness can enable this option to demote
    /// those two failures to skipped lines — the advance succeeds and
    /// exposes no record, and scanning continues with the next line.
    ///
    /// Oversized lines and read failures always halt the stream regardless
    /// of this option.
    ///
    /// # Default
    ///
    /// `false`
    pub skip_malformed: bool,
}
