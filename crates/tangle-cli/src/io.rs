/// Script reading with size enforcement and UTF-8 validation.
///
/// This module is the single entry point for all input I/O in the `tangle`
/// binary; `tangle-core` never touches the filesystem.
///
/// Key behaviours:
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - UTF-8 validation via `std::str::from_utf8` with byte-offset reporting.
/// - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::Read as _;
use std::path::{Path, PathBuf};

use crate::cli::PathOrStdin;
use crate::error::CliError;

/// Default cap on script size. Editing scripts are tiny; anything above a
/// mebibyte is almost certainly not a script.
pub const DEFAULT_MAX_SCRIPT_SIZE: u64 = 1024 * 1024;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for a missing or unreadable file, a
/// source exceeding `max_size`, any other I/O error, or invalid UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

/// Reads a disk file, enforcing the size limit and UTF-8 requirement.
fn read_file(path: &PathBuf, max_size: u64) -> Result<String, CliError> {
    // Size check via metadata: no allocation until the size is known good.
    let file_size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => return Err(io_error_to_cli(&e, path)),
    };

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => return Err(io_error_to_cli(&e, path)),
    };

    bytes_to_string(&bytes, &path.display().to_string())
}

/// Maps a `std::io::Error` from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.to_path_buf(),
        },
        // Everything else is wrapped generically; a few common kinds are
        // named explicitly to satisfy the exhaustiveness lint.
        std::io::ErrorKind::InvalidData
        | std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::IsADirectory
        | std::io::ErrorKind::Interrupted
        | std::io::ErrorKind::UnexpectedEof
        | std::io::ErrorKind::TimedOut
        | std::io::ErrorKind::Other
        | _ => CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads stdin through a capped reader so the allocation is bounded.
fn read_stdin(max_size: u64) -> Result<String, CliError> {
    let mut buffer = Vec::new();
    let stdin = std::io::stdin();
    let mut capped = stdin.lock().take(max_size + 1);

    if let Err(e) = capped.read_to_end(&mut buffer) {
        return Err(CliError::StdinReadError {
            detail: e.to_string(),
        });
    }

    if buffer.len() as u64 > max_size {
        return Err(CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: max_size,
            actual: None,
        });
    }

    bytes_to_string(&buffer, "-")
}

// ---------------------------------------------------------------------------
// UTF-8 validation
// ---------------------------------------------------------------------------

/// Converts raw bytes to a `String`, reporting the offset of the first
/// invalid UTF-8 sequence on failure.
fn bytes_to_string(bytes: &[u8], source: &str) -> Result<String, CliError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(CliError::InvalidUtf8 {
            source: source.to_owned(),
            byte_offset: e.valid_up_to(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
