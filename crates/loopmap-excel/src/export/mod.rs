/// Workbook writers: the two-tab loop report and the connections sheet.
///
/// Every writer builds the whole workbook in memory with `rust_xlsxwriter`
/// and then copies the finished bytes to the caller's writer, so a failure
/// never leaves a half-written file behind in the buffer.
use std::io::Write;

use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::debug;

use loopmap_core::{EdgeRecord, EdgeTagRow, LoopReportRow};

use crate::error::ExportError;
use crate::import::ImportConfig;

mod sheets;
mod style;

use style::xlsx_err;

/// Default name of the per-loop report sheet.
pub const LOOP_REPORT_SHEET: &str = "Loop_Report";
/// Default name of the per-edge tagging sheet.
pub const EDGE_TAGS_SHEET: &str = "For_Kumu_Import";

/// Sheet names for [`export_report_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub loop_report_sheet: String,
    pub edge_tags_sheet: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            loop_report_sheet: LOOP_REPORT_SHEET.to_owned(),
            edge_tags_sheet: EDGE_TAGS_SHEET.to_owned(),
        }
    }
}

/// Writes the two-tab loop report workbook with default sheet names.
///
/// # Errors
///
/// Returns [`ExportError`] if the workbook cannot be built or written.
pub fn export_report<W: Write>(
    report: &[LoopReportRow],
    tags: &[EdgeTagRow],
    writer: W,
) -> Result<(), ExportError> {
    export_report_with(report, tags, &ExportConfig::default(), writer)
}

/// Writes the two-tab loop report workbook.
///
/// The report sheet comes first, followed by the edge tagging sheet.
///
/// # Errors
///
/// Returns [`ExportError`] if a sheet name is rejected, a sheet would exceed
/// the worksheet row limit, or the bytes cannot be written.
pub fn export_report_with<W: Write>(
    report: &[LoopReportRow],
    tags: &[EdgeTagRow],
    config: &ExportConfig,
    writer: W,
) -> Result<(), ExportError> {
    let mut wb = Workbook::new();
    sheets::write_loop_report(add_sheet(&mut wb, &config.loop_report_sheet)?, report)?;
    sheets::write_edge_tags(add_sheet(&mut wb, &config.edge_tags_sheet)?, tags)?;
    finish(&mut wb, writer)?;
    debug!(
        loops = report.len(),
        tagged_edges = tags.len(),
        "wrote loop report workbook"
    );
    Ok(())
}

/// Writes `records` as a single connections sheet laid out per `config`.
///
/// Absent endpoints are left as blank cells. The result reads back through
/// [`crate::read_connections`] with the same config.
///
/// # Errors
///
/// Returns [`ExportError`] if the workbook cannot be built or written.
pub fn export_connections<W: Write>(
    records: &[EdgeRecord],
    config: &ImportConfig,
    writer: W,
) -> Result<(), ExportError> {
    let mut wb = Workbook::new();
    sheets::write_connections(add_sheet(&mut wb, &config.sheet)?, records, config)?;
    finish(&mut wb, writer)?;
    debug!(rows = records.len(), "wrote connections workbook");
    Ok(())
}

fn add_sheet<'a>(wb: &'a mut Workbook, name: &str) -> Result<&'a mut Worksheet, ExportError> {
    wb.add_worksheet().set_name(name).map_err(xlsx_err)
}

fn finish<W: Write>(wb: &mut Workbook, mut writer: W) -> Result<(), ExportError> {
    let xlsx_bytes = wb.save_to_buffer().map_err(xlsx_err)?;
    writer.write_all(&xlsx_bytes).map_err(|e| ExportError::Io {
        detail: e.to_string(),
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        detail: e.to_string(),
    })
}
