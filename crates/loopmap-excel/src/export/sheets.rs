/// Row layouts for each exported sheet.
use rust_xlsxwriter::Worksheet;

use loopmap_core::{EdgeRecord, EdgeTagRow, LoopReportRow};

use super::style::{data_row, set_column_widths, write_cell, write_header_row};
use crate::error::ExportError;
use crate::import::ImportConfig;

/// One row per loop under `Loop ID`, `Length`, `Full Path`.
pub(crate) fn write_loop_report(
    worksheet: &mut Worksheet,
    rows: &[LoopReportRow],
) -> Result<(), ExportError> {
    write_header_row(worksheet, &["Loop ID", "Length", "Full Path"])?;
    set_column_widths(worksheet, &[(0, 12.0), (1, 8.0), (2, 80.0)])?;

    for (i, row) in rows.iter().enumerate() {
        let r = data_row(i)?;
        let length = u32::try_from(row.length).map_err(|_| ExportError::ExcelWrite {
            detail: format!("{}: length {} out of range", row.loop_id, row.length),
        })?;
        write_cell(worksheet, r, 0, row.loop_id.as_str())?;
        write_cell(worksheet, r, 1, length)?;
        write_cell(worksheet, r, 2, row.full_path.as_str())?;
    }
    Ok(())
}

pub(crate) fn write_edge_tags(
    worksheet: &mut Worksheet,
    rows: &[EdgeTagRow],
) -> Result<(), ExportError> {
    write_header_row(worksheet, &["From", "To", "Tags"])?;
    set_column_widths(worksheet, &[(0, 24.0), (1, 24.0), (2, 40.0)])?;

    for (i, row) in rows.iter().enumerate() {
        let r = data_row(i)?;
        write_cell(worksheet, r, 0, row.from.as_str())?;
        write_cell(worksheet, r, 1, row.to.as_str())?;
        write_cell(worksheet, r, 2, row.tags.as_str())?;
    }
    Ok(())
}

/// Blank cells are left for absent endpoints.
pub(crate) fn write_connections(
    worksheet: &mut Worksheet,
    records: &[EdgeRecord],
    config: &ImportConfig,
) -> Result<(), ExportError> {
    write_header_row(
        worksheet,
        &[config.from_column.as_str(), config.to_column.as_str()],
    )?;
    set_column_widths(worksheet, &[(0, 24.0), (1, 24.0)])?;

    for (i, record) in records.iter().enumerate() {
        let r = data_row(i)?;
        if let Some(from) = &record.from {
            write_cell(worksheet, r, 0, from.as_str())?;
        }
        if let Some(to) = &record.to {
            write_cell(worksheet, r, 1, to.as_str())?;
        }
    }
    Ok(())
}
