#![deny(clippy::print_stdout, clippy::print_stderr)]
//! Workbook adapters for loopmap.
//!
//! The `calamine` and `rust_xlsxwriter` dependencies are confined to this
//! crate and do not bleed into `loopmap-core`.
//!
//! # Sheet layout
//!
//! | Direction | Sheet | Columns |
//! |---|---|---|
//! | Input | Connections | From, To (case-insensitive, extra columns ignored) |
//! | Output | Loop_Report | Loop ID, Length, Full Path |
//! | Output | For_Kumu_Import | From, To, Tags |
//!
//! All sheet and column names are configurable through [`ImportConfig`] and
//! [`ExportConfig`].

pub mod error;
mod export;
mod import;
mod sheet;

pub use error::{ExportError, ImportError};
pub use export::{
    EDGE_TAGS_SHEET, ExportConfig, LOOP_REPORT_SHEET, export_connections, export_report,
    export_report_with,
};
pub use import::{
    DEFAULT_FROM_COLUMN, DEFAULT_SHEET, DEFAULT_TO_COLUMN, ImportConfig, read_connections,
};
