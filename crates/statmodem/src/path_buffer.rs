//! Reusable fixed-capacity decode target for the base64 path column.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::ParseError;

/// Longest base64-encoded path column the parser accepts, in bytes.
pub const MAX_ENCODED_PATH_LENGTH: usize = 1024;

/// Capacity of the path buffer: the decoded length of a
/// [`MAX_ENCODED_PATH_LENGTH`]-byte base64 input.
pub const MAX_DECODED_PATH_LENGTH: usize = MAX_ENCODED_PATH_LENGTH / 4 * 3;

/// The single decode target every record's path field is written into.
///
/// The storage lives for the whole life of the owning parser and is
/// overwritten on each decode; views into it are only meaningful until the
/// next decode call.
pub(crate) struct PathBuffer {
    bytes: [u8; MAX_DECODED_PATH_LENGTH],
    len: usize,
}

impl PathBuffer {
    pub(crate) fn new() -> Self {
        Self {
            bytes: [0; MAX_DECODED_PATH_LENGTH],
            len: 0,
        }
    }

    /// Decodes a span of standard padded base64 in place of the previous
    /// contents.
    ///
    /// Spans longer than [`MAX_ENCODED_PATH_LENGTH`] are rejected before any
    /// byte is written, so the buffer cannot overflow. Malformed input
    /// (invalid characters, bad padding, wrong length) is
    /// [`ParseError::BadPath`].
    pub(crate) fn decode(&mut self, encoded: &[u8]) -> Result<(), ParseError> {
        if encoded.len() > MAX_ENCODED_PATH_LENGTH {
            return Err(ParseError::BadPath);
        }

        self.len = STANDARD
            .decode_slice(encoded, &mut self.bytes)
            .map_err(|_| ParseError::BadPath)?;

        Ok(())
    }

    /// The decoded bytes of the most recent successful decode.
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}
