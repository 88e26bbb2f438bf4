//! Decode-side error types.

use std::io;
use thiserror::Error;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors produced while decoding a run-length encoded stream.
///
/// Offsets are zero-based byte positions in the encoded input.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A literal byte was read but no run-length digits follow it, either
    /// because the stream ended or because the next byte is not a digit.
    #[error("malformed input: literal byte at offset {offset} has no run length")]
    MalformedInput { offset: u64 },

    /// The digit run parses to a value that does not fit in a `u64`.
    #[error("run length at offset {offset} exceeds the supported maximum")]
    RunLengthOverflow { offset: u64 },

    /// The underlying source or sink failed. Retrying is the caller's
    /// responsibility, not the codec's.
    #[error("I/O error")]
    Io(#[from] io::Error),
}
