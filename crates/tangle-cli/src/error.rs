/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `tangle` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2** — input failure: the script could not be read or parsed
///   at all. These errors terminate before any sketch is built.
/// - Exit code **1** — logical failure: the script was well-formed but an
///   operation failed (connecting a dead node, exceeding the edge cap), or
///   `--fail-on-cycles` was set and cycles were found.
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions the `tangle` CLI can produce.
///
/// [`CliError::message`] returns the human-readable string printed to stderr
/// before exiting with [`CliError::exit_code`].
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// The script file could not be found.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read the script file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the script size limit.
    FileTooLarge {
        /// Label for the source (`"-"` for stdin, or the path).
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Label for the source.
        source: String,
        /// Byte offset of the first invalid sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the variants above.
    IoError {
        /// Label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// A script line could not be parsed.
    ScriptError {
        /// 1-based line number of the malformed line.
        line: usize,
        /// What was wrong with it.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// A well-formed script line was executed and the core rejected it.
    OpFailed {
        /// 1-based line number of the failing operation.
        line: usize,
        /// The core error message.
        detail: String,
    },

    /// `--fail-on-cycles` was set and the final sketch contains cycles.
    CyclesFound {
        /// How many cycles were reported.
        count: usize,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2` — input failure (unreadable or unparsable script).
    /// - `1` — logical failure (rejected operation, cycles found).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ScriptError { .. } => 2,

            Self::OpFailed { .. } | Self::CyclesFound { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: script too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: script too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::ScriptError { line, detail } => {
                format!("error: script line {line}: {detail}")
            }
            Self::OpFailed { line, detail } => {
                format!("error: script line {line}: {detail}")
            }
            Self::CyclesFound { count } => {
                format!("error: {count} cycle(s) found")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
