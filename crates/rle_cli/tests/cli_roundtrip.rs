//! File-level tests for the `rle` command line front end.

use rle_cli::rle_cli;
use std::fs;
use tempfile::TempDir;

fn arg(path: impl AsRef<std::path::Path>) -> String {
    path.as_ref().to_str().unwrap().to_string()
}

#[test]
fn test_compress_then_decompress_restores_the_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, b"aaabbbcccc").unwrap();

    rle_cli(&["-k".to_string(), arg(&input)]).unwrap();

    let encoded = dir.path().join("sample.txt.rle");
    assert_eq!(fs::read(&encoded).unwrap(), b"a3b3c4");
    // -k left the original in place
    assert!(input.exists());

    fs::remove_file(&input).unwrap();
    rle_cli(&["-d".to_string(), arg(&encoded)]).unwrap();

    assert_eq!(fs::read(&input).unwrap(), b"aaabbbcccc");
    // default mode removes the processed input
    assert!(!encoded.exists());
}

#[test]
fn test_empty_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty");
    fs::write(&input, b"").unwrap();

    rle_cli(&["-k".to_string(), arg(&input)]).unwrap();
    let encoded = dir.path().join("empty.rle");
    assert_eq!(fs::read(&encoded).unwrap(), b"");

    rle_cli(&["-d".to_string(), "-f".to_string(), arg(&encoded)]).unwrap();
    assert_eq!(fs::read(&input).unwrap(), b"");
}

#[test]
fn test_refuses_to_clobber_existing_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data");
    fs::write(&input, b"xxxx").unwrap();
    fs::write(dir.path().join("data.rle"), b"stale").unwrap();

    let err = rle_cli(&["-q".to_string(), arg(&input)]);
    assert!(err.is_err());
    // the stale output was not touched
    assert_eq!(fs::read(dir.path().join("data.rle")).unwrap(), b"stale");

    // --force overwrites it
    rle_cli(&["-q".to_string(), "-f".to_string(), "-k".to_string(), arg(&input)]).unwrap();
    assert_eq!(fs::read(dir.path().join("data.rle")).unwrap(), b"x4");
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(rle_cli(&["-q".to_string(), arg(missing)]).is_err());
}

#[test]
fn test_integrity_test_mode() {
    let dir = TempDir::new().unwrap();

    let good = dir.path().join("good.rle");
    fs::write(&good, b"a3b1").unwrap();
    rle_cli(&["-t".to_string(), "-q".to_string(), arg(&good)]).unwrap();

    // a lone literal with no run length is malformed
    let bad = dir.path().join("bad.rle");
    fs::write(&bad, b"a").unwrap();
    assert!(rle_cli(&["-t".to_string(), "-q".to_string(), arg(&bad)]).is_err());

    // test mode never rewrites or removes files
    assert!(good.exists());
    assert!(bad.exists());
}

#[test]
fn test_one_bad_file_does_not_stop_the_rest() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    let present = dir.path().join("present");
    fs::write(&present, b"zzz").unwrap();

    let result = rle_cli(&[
        "-q".to_string(),
        "-k".to_string(),
        arg(&missing),
        arg(&present),
    ]);

    // overall failure is reported, but the good operand was still processed
    assert!(result.is_err());
    assert_eq!(fs::read(dir.path().join("present.rle")).unwrap(), b"z3");
}

#[test]
fn test_decompressing_unsuffixed_file_appends_out() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("blob");
    fs::write(&input, b"m5").unwrap();

    rle_cli(&["-d".to_string(), "-k".to_string(), arg(&input)]).unwrap();
    assert_eq!(fs::read(dir.path().join("blob.out")).unwrap(), b"mmmmm");
}
