//! A streaming parser for line-oriented, tab-delimited stats listings in
//! which the first column is a base64-encoded filesystem path.
//!
//! Each record decodes into a single reusable buffer owned by the parser, so
//! scanning a listing of any length performs no per-record heap allocation.
//! See [`StatsParser`] for the advance-then-read loop.

mod columns;
mod error;
mod options;
mod parser;
mod path_buffer;

pub use error::ParseError;
pub use options::ParserOptions;
pub use parser::{FILE_TYPE, MAX_LINE_LENGTH, Record, StatsParser};
pub use path_buffer::{MAX_DECODED_PATH_LENGTH, MAX_ENCODED_PATH_LENGTH};
