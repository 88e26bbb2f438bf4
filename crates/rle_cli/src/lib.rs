//! `rle` command-line utility for run-length compression/decompression.
//!
//! A gzip-style front end over the `rle_core` codec. With no file operands
//! the tool filters stdin to stdout; otherwise each operand is rewritten in
//! place (`file` becomes `file.rle` and back), following the usual
//! compression-utility conventions for -c/-k/-f/-t.

use anyhow::{Context, Result};
use rle_core::{decode_stream, encode_stream};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct RleOptions {
    pub decompress: bool,
    pub stdout: bool,
    pub keep: bool,
    pub force: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub test: bool,
}

/// CLI entry point for the `rle` utility.
pub fn rle_cli(args: &[String]) -> Result<()> {
    let mut options = RleOptions::default();
    let mut input_files = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--decompress" | "--uncompress" => {
                options.decompress = true;
            }
            "-z" | "--compress" => {
                options.decompress = false;
            }
            "-c" | "--stdout" | "--to-stdout" => {
                options.stdout = true;
            }
            "-k" | "--keep" => {
                options.keep = true;
            }
            "-f" | "--force" => {
                options.force = true;
            }
            "-v" | "--verbose" => {
                options.verbose = true;
            }
            "-q" | "--quiet" => {
                options.quiet = true;
            }
            "-t" | "--test" => {
                options.test = true;
            }
            "-h" | "--help" => {
                print_rle_help();
                return Ok(());
            }
            "-V" | "--version" => {
                print_rle_version();
                return Ok(());
            }
            arg if arg.starts_with('-') => {
                // Combined short options, e.g. -dc or -kvf
                if arg.len() > 2 && !arg.starts_with("--") {
                    for ch in arg[1..].chars() {
                        match ch {
                            'd' => options.decompress = true,
                            'z' => options.decompress = false,
                            'c' => options.stdout = true,
                            'k' => options.keep = true,
                            'f' => options.force = true,
                            'v' => options.verbose = true,
                            'q' => options.quiet = true,
                            't' => options.test = true,
                            _ => return Err(anyhow::anyhow!("Unknown option: -{}", ch)),
                        }
                    }
                } else {
                    return Err(anyhow::anyhow!("Unknown option: {}", arg));
                }
            }
            filename => {
                input_files.push(filename.to_string());
            }
        }
        i += 1;
    }

    debug!(
        decompress = options.decompress,
        test = options.test,
        files = input_files.len(),
        "parsed command line"
    );

    // Test mode wins over compress/decompress.
    if options.test {
        return test_rle_files(&input_files, &options);
    }

    if input_files.is_empty() {
        process_stdio(&options)
    } else {
        process_files(&input_files, &options)
    }
}

/// Filter stdin to stdout in the selected direction.
fn process_stdio(options: &RleOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut reader = BufReader::new(stdin.lock());
    let mut writer = BufWriter::new(stdout.lock());

    if options.decompress {
        decompress(&mut reader, &mut writer).context("Failed to decompress from stdin")?;
    } else {
        compress(&mut reader, &mut writer).context("Failed to compress from stdin")?;
    }

    writer.flush().context("Failed to flush output")?;
    Ok(())
}

/// Process each file operand, reporting per-file failures and continuing.
fn process_files(input_files: &[String], options: &RleOptions) -> Result<()> {
    let mut all_success = true;

    for filename in input_files {
        if let Err(e) = process_single_file(filename, options) {
            if !options.quiet {
                eprintln!("rle: {filename}: {e:#}");
            }
            all_success = false;
        }
    }

    if !all_success {
        return Err(anyhow::anyhow!("Some files failed to process"));
    }

    Ok(())
}

fn process_single_file(filename: &str, options: &RleOptions) -> Result<()> {
    let input_path = Path::new(filename);

    if !input_path.exists() {
        return Err(anyhow::anyhow!("No such file or directory"));
    }

    let original_size = input_path.metadata()?.len();

    let output_filename = if options.stdout {
        None
    } else if options.decompress {
        Some(determine_decompressed_filename(filename))
    } else {
        Some(determine_compressed_filename(filename))
    };

    if let Some(ref out_file) = output_filename {
        if Path::new(out_file).exists() && !options.force {
            return Err(anyhow::anyhow!("Output file '{}' already exists", out_file));
        }
    }

    let input_file = File::open(input_path)
        .with_context(|| format!("Cannot open input file '{filename}'"))?;
    let mut reader = BufReader::new(input_file);

    if options.stdout {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());

        if options.decompress {
            decompress(&mut reader, &mut writer)?;
        } else {
            compress(&mut reader, &mut writer)?;
        }
        writer.flush()?;
    } else if let Some(output_file) = output_filename {
        let out_file = File::create(&output_file)
            .with_context(|| format!("Cannot create output file '{output_file}'"))?;
        let mut writer = BufWriter::new(out_file);

        if options.decompress {
            decompress(&mut reader, &mut writer)?;
        } else {
            compress(&mut reader, &mut writer)?;
        }
        writer.flush()?;

        let final_size = Path::new(&output_file).metadata()?.len();

        if !options.keep {
            std::fs::remove_file(input_path)
                .with_context(|| format!("Cannot remove input file '{filename}'"))?;
        }

        if !options.quiet && options.verbose {
            print_file_stats(filename, options, original_size, final_size);
        }
    }

    Ok(())
}

fn print_file_stats(filename: &str, options: &RleOptions, original_size: u64, final_size: u64) {
    if options.decompress {
        println!("  {filename}: done");
        return;
    }

    let ratio = if original_size > 0 {
        final_size as f64 / original_size as f64
    } else {
        0.0
    };
    let compression_ratio = if ratio > 0.0 { 1.0 / ratio } else { 0.0 };
    let bits_per_byte = if original_size > 0 {
        (final_size * 8) as f64 / original_size as f64
    } else {
        0.0
    };
    let saved_percent = (1.0 - ratio) * 100.0;

    println!(
        "  {filename}: {compression_ratio:.1}:1, {bits_per_byte:.1} bits/byte, {saved_percent:.2}% saved, {original_size} in, {final_size} out."
    );
}

/// Run-length encode a stream. Only fails on I/O.
fn compress<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<()> {
    encode_stream(reader, writer).context("Failed to run-length encode data")?;
    Ok(())
}

/// Run-length decode a stream. Fails on I/O or malformed input.
fn decompress<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<()> {
    decode_stream(reader, writer).context("Failed to run-length decode data")?;
    Ok(())
}

/// Determine compressed filename by appending the .rle extension.
fn determine_compressed_filename(input: &str) -> String {
    format!("{input}.rle")
}

/// Determine decompressed filename by removing the .rle extension.
fn determine_decompressed_filename(input: &str) -> String {
    match input.strip_suffix(".rle") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{input}.out"),
    }
}

/// Check integrity of encoded files by decoding them to a discarding sink.
fn test_rle_files(files: &[String], options: &RleOptions) -> Result<()> {
    if files.is_empty() {
        return Err(anyhow::anyhow!("No files to test"));
    }

    let mut all_success = true;
    for filename in files {
        match test_single_file(filename) {
            Ok(()) => {
                if !options.quiet {
                    println!("{filename}: ok");
                }
            }
            Err(e) => {
                if !options.quiet {
                    eprintln!("rle: {filename}: {e:#}");
                }
                all_success = false;
            }
        }
    }

    if !all_success {
        return Err(anyhow::anyhow!("Some files failed the integrity test"));
    }

    Ok(())
}

fn test_single_file(filename: &str) -> Result<()> {
    let file = File::open(filename).with_context(|| format!("Cannot open file '{filename}'"))?;

    let mut reader = BufReader::new(file);
    let mut null_writer = NullWriter;

    decompress(&mut reader, &mut null_writer)
        .with_context(|| format!("Integrity test failed for '{filename}'"))?;

    Ok(())
}

/// Discards all data written to it; used by test mode.
struct NullWriter;

impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn print_rle_help() {
    println!("rle - run-length encode or decode files");
    println!();
    println!("usage: rle [flags and input files in any order]");
    println!();
    println!("   -h --help           print this message");
    println!("   -z --compress       compress (default)");
    println!("   -d --decompress     decompress");
    println!("   -c --stdout         output to standard out, keep input files");
    println!("   -k --keep           keep (don't delete) input files");
    println!("   -f --force          overwrite existing output files");
    println!("   -t --test           test encoded file integrity");
    println!("   -q --quiet          suppress noncritical messages");
    println!("   -v --verbose        print per-file statistics");
    println!("   -V --version        display software version");
    println!();
    println!("   If no file names are given, rle reads from standard input and");
    println!("   writes to standard output.");
    println!();
    println!("   The encoding stores each run of identical bytes as the byte");
    println!("   followed by its decimal repeat count; input with few repeated");
    println!("   bytes will grow rather than shrink.");
}

fn print_rle_version() {
    println!("rle {}", env!("CARGO_PKG_VERSION"));
    println!("Run-length encoding utility.");
}
