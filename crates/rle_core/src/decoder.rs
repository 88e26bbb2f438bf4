//! Streaming run-length decoder.

use std::io::{self, Read, Write};

use crate::error::{DecodeError, DecodeResult};
use crate::Run;

// Repeated literals are written through a fixed buffer rather than one
// write_all call per byte.
const REPEAT_CHUNK: usize = 4096;

/// Decode a run-length encoded stream from `reader` into `writer`.
///
/// Tokens are parsed with an explicit two-step tokenizer: exactly one
/// literal byte is consumed first, unconditionally, then the maximal
/// contiguous digit run that follows. A token whose digit run is empty is
/// malformed. Input that ends exactly at a token boundary is a clean stop.
///
/// Decoding has no partial-success mode: it fails at the first malformed
/// token, and bytes already written to `writer` before the failure are not
/// rolled back.
pub fn decode_stream<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> DecodeResult<()> {
    let mut tokens = TokenReader::new(reader);
    let mut parsed = 0u64;

    while let Some(run) = tokens.next_token()? {
        write_run(writer, run)?;
        parsed += 1;
    }

    tracing::trace!(tokens = parsed, "decode finished");
    Ok(())
}

/// Decode an in-memory slice, returning the original bytes.
pub fn decode_bytes(input: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len());
    let mut reader = input;
    decode_stream(&mut reader, &mut output)?;
    Ok(output)
}

/// Pulls tokens off a byte stream, tracking the input offset for
/// diagnostics. One byte of lookahead is kept because the digit run has no
/// terminator: the byte that ends it is the next token's literal.
struct TokenReader<R: Read> {
    bytes: io::Bytes<R>,
    lookahead: Option<u8>,
    offset: u64,
}

impl<R: Read> TokenReader<R> {
    fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            lookahead: None,
            offset: 0,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.lookahead.take() {
            self.offset += 1;
            return Ok(Some(byte));
        }
        match self.bytes.next() {
            Some(Ok(byte)) => {
                self.offset += 1;
                Ok(Some(byte))
            }
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }

    fn put_back(&mut self, byte: u8) {
        self.lookahead = Some(byte);
        self.offset -= 1;
    }

    fn next_token(&mut self) -> DecodeResult<Option<Run>> {
        let literal_offset = self.offset;
        let value = match self.next_byte()? {
            Some(byte) => byte,
            // End of input at a token boundary: clean stop.
            None => return Ok(None),
        };

        let mut length: u64 = 0;
        let mut digits = 0usize;
        while let Some(byte) = self.next_byte()? {
            if byte.is_ascii_digit() {
                length = length
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(u64::from(byte - b'0')))
                    .ok_or(DecodeError::RunLengthOverflow {
                        offset: self.offset - 1,
                    })?;
                digits += 1;
            } else {
                self.put_back(byte);
                break;
            }
        }

        if digits == 0 {
            return Err(DecodeError::MalformedInput {
                offset: literal_offset,
            });
        }

        Ok(Some(Run { value, length }))
    }
}

fn write_run<W: Write>(writer: &mut W, run: Run) -> io::Result<()> {
    let buffer = [run.value; REPEAT_CHUNK];
    let mut remaining = run.length;
    while remaining > 0 {
        let take = remaining.min(REPEAT_CHUNK as u64) as usize;
        writer.write_all(&buffer[..take])?;
        remaining -= take as u64;
    }
    Ok(())
}
