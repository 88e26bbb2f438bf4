//! Streaming run-length encoder.

use std::io::{self, Read, Write};

use crate::Run;

/// Encode every byte of `reader` into `writer` as run-length tokens.
///
/// The scan keeps a single pending [`Run`]: the first byte seeds it, each
/// equal byte extends it, and a differing byte flushes it as a token before
/// starting the next run. Runs are therefore maximal and adjacent tokens
/// never share a literal value. Empty input produces empty output.
pub fn encode_stream<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<()> {
    let mut pending: Option<Run> = None;
    let mut tokens = 0u64;

    for byte in reader.bytes() {
        let byte = byte?;
        match pending {
            Some(ref mut run) if run.value == byte => run.length += 1,
            Some(run) => {
                write_token(writer, run)?;
                tokens += 1;
                pending = Some(Run { value: byte, length: 1 });
            }
            None => pending = Some(Run { value: byte, length: 1 }),
        }
    }

    // The final run is only known complete at end of input; flushing it
    // here is what keeps the last bytes of the stream from being lost.
    if let Some(run) = pending {
        write_token(writer, run)?;
        tokens += 1;
    }

    tracing::trace!(tokens, "encode finished");
    Ok(())
}

/// Encode an in-memory slice, returning the encoded bytes.
pub fn encode_bytes(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut reader = input;
    // Reads from a slice and writes into a Vec cannot fail.
    encode_stream(&mut reader, &mut output).expect("in-memory encode cannot fail");
    output
}

fn write_token<W: Write>(writer: &mut W, run: Run) -> io::Result<()> {
    writer.write_all(&[run.value])?;
    write!(writer, "{}", run.length)
}
