/// Errors produced by the workbook adapters.
use thiserror::Error;

/// Failures while reading a connections workbook.
///
/// Incomplete rows are not errors; they are passed through to the graph
/// builder, which drops them.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The configured sheet is not present in the workbook.
    #[error("missing required sheet: {sheet:?}")]
    MissingSheet {
        /// Name of the required sheet.
        sheet: String,
    },

    /// The header row lacks a required column.
    #[error("missing required column {column:?} in sheet {sheet:?}")]
    MissingRequiredColumn {
        /// Name of the sheet.
        sheet: String,
        /// Name of the missing column.
        column: String,
    },

    /// calamine could not open or decode the workbook.
    #[error("Excel read error: {detail}")]
    ExcelRead {
        /// Human-readable description of the error.
        detail: String,
    },
}

/// Failures while writing a workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// rust_xlsxwriter rejected a sheet, cell, or the final workbook.
    #[error("Excel write error: {detail}")]
    ExcelWrite {
        /// Human-readable description of the error.
        detail: String,
    },

    /// The finished workbook could not be written to its destination.
    #[error("I/O error: {detail}")]
    Io {
        /// Human-readable description of the error.
        detail: String,
    },
}
