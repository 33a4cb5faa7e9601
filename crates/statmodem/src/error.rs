use std::io;

use thiserror::Error;

/// The first error encountered while scanning a listing.
///
/// Errors are sticky: once [`StatsParser`](crate::StatsParser) latches one,
/// every further advance reports termination and
/// [`error`](crate::StatsParser::error) keeps returning the same value until
/// the parser is discarded. End of input is not an error and never appears
/// here.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The path column could not be decoded as standard padded base64, or
    /// exceeded the encoded length bound.
    #[error("invalid file format: path is not base64 encoded")]
    BadPath,

    /// A line ran out before the fixed column layout was satisfied.
    #[error("invalid file format: too few tab separated columns")]
    TooFewColumns,

    /// A line exceeded [`MAX_LINE_LENGTH`](crate::MAX_LINE_LENGTH) bytes.
    #[error("invalid file format: line too long")]
    LineTooLong,

    /// Reading from the underlying stream failed.
    #[error("stats read failed: {0}")]
    Io(#[from] io::Error),
}
