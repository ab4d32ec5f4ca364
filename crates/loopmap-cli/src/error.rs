/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `loopmap` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The workbook could not be read or does
///   not have the expected shape, so no analysis ran.
/// - Exit code **1**: the analysis ran but could not finish or its results
///   could not be written.
///
/// Finding zero loops is a success and has no variant here.
use std::fmt;
use std::path::PathBuf;

use loopmap_core::EnumerateError;
use loopmap_excel::{ExportError, ImportError};

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `loopmap` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// The input path does not exist.
    InputNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read the input.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes; `None` for stdin.
        actual: Option<u64>,
    },

    /// Any other I/O error while reading the input.
    IoError {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The workbook has no sheet with the configured name.
    MissingSheet {
        /// Name of the sheet.
        sheet: String,
    },

    /// The sheet's header row lacks a configured column.
    MissingRequiredColumn {
        /// Name of the sheet.
        sheet: String,
        /// Name of the column.
        column: String,
    },

    /// The input is not a readable `.xlsx` workbook.
    ParseFailed {
        /// Description of the decoding failure.
        detail: String,
    },

    // --- Exit code 1: run failures ---
    /// The report workbook or stdout could not be written.
    OutputWriteFailed {
        /// Destination label (path or `"stdout"`).
        target: String,
        /// The underlying error message.
        detail: String,
    },

    /// Cycle enumeration stopped before completing.
    Cancelled {
        /// Why enumeration stopped.
        reason: EnumerateError,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::IoError { .. }
            | Self::MissingSheet { .. }
            | Self::MissingRequiredColumn { .. }
            | Self::ParseFailed { .. } => 2,

            Self::OutputWriteFailed { .. } | Self::Cancelled { .. } => 1,
        }
    }

    /// Wraps an export failure for the workbook at `target`.
    pub fn output(target: impl Into<String>, e: &ExportError) -> Self {
        Self::OutputWriteFailed {
            target: target.into(),
            detail: e.to_string(),
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::InputNotFound { path } => {
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
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::MissingSheet { sheet } => {
                format!("error: workbook has no sheet named {sheet:?}")
            }
            Self::MissingRequiredColumn { sheet, column } => {
                format!("error: sheet {sheet:?} has no {column:?} column")
            }
            Self::ParseFailed { detail } => {
                format!("error: could not read workbook: {detail}")
            }
            Self::OutputWriteFailed { target, detail } => {
                format!("error: failed to write {target}: {detail}")
            }
            Self::Cancelled { reason } => format!("error: {reason}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

impl From<ImportError> for CliError {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::MissingSheet { sheet } => Self::MissingSheet { sheet },
            ImportError::MissingRequiredColumn { sheet, column } => {
                Self::MissingRequiredColumn { sheet, column }
            }
            ImportError::ExcelRead { detail } => Self::ParseFailed { detail },
        }
    }
}

impl From<EnumerateError> for CliError {
    fn from(reason: EnumerateError) -> Self {
        Self::Cancelled { reason }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
