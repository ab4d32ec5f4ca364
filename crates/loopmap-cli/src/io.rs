/// File and stdin reading with size enforcement.
///
/// This module is the single entry point for input I/O in the `loopmap`
/// binary. Neither library crate touches the filesystem.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads the entire contents of `source` into memory.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) if the file is missing, unreadable, or
/// larger than `max_size` bytes.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<Vec<u8>, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => {
            let stdin = std::io::stdin();
            read_capped(stdin.lock(), max_size)
        }
    }
}

// ---------------------------------------------------------------------------
// Disk files
// ---------------------------------------------------------------------------

fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))
}

fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    if kind == ErrorKind::NotFound {
        CliError::InputNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

/// Reads `reader` to the end, failing once more than `max_size` bytes arrive.
///
/// One byte past the limit is requested so that a stream of exactly
/// `max_size` bytes is accepted.
fn read_capped<R: Read>(reader: R, max_size: u64) -> Result<Vec<u8>, CliError> {
    let mut buf = Vec::new();
    reader
        .take(max_size.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| CliError::IoError {
            source: "-".to_owned(),
            detail: e.to_string(),
        })?;

    if buf.len() as u64 > max_size {
        return Err(CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: max_size,
            actual: None,
        });
    }
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
