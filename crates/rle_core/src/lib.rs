//! Run-length encoding codec shared by the `rle` command-line utility.
//!
//! The wire format is a plain concatenation of tokens. Each token is one
//! raw literal byte followed by the run length as ASCII decimal digits,
//! with no delimiter inside the token and none between tokens:
//!
//! ```text
//! "aaab"  <->  a3b1
//! ```
//!
//! There is no header, checksum, or end marker. Because the digit run has
//! no terminator, the format is positional: the first byte of every token
//! is the literal, regardless of its value, so the digit characters
//! `'0'..='9'` are themselves valid literals and digit scanning only starts
//! after the literal has been consumed.
//!
//! Encoding is infallible apart from I/O; decoding fails on a token whose
//! digit run is empty (see [`DecodeError`]).

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::{decode_bytes, decode_stream};
pub use encoder::{encode_bytes, encode_stream};
pub use error::{DecodeError, DecodeResult};

/// A maximal sequence of identical bytes, as a (value, count) pair.
///
/// Runs are transient: the encoder owns one as its scan accumulator and the
/// decoder produces one per parsed token. In any valid encoder output,
/// adjacent runs carry different values and every length is at least 1.
/// Lengths are `u64`, so a single run may represent up to `u64::MAX`
/// repetitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub value: u8,
    pub length: u64,
}
