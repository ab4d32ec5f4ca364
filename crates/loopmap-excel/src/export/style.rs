/// Header styling and cell-write helpers shared by every exported sheet.
use rust_xlsxwriter::{Format, IntoExcelData, Worksheet, XlsxError};

use crate::error::ExportError;

pub(crate) fn xlsx_err(e: XlsxError) -> ExportError {
    ExportError::ExcelWrite {
        detail: e.to_string(),
    }
}

/// Converts a zero-based data row position into a worksheet row below the
/// header.
pub(crate) fn data_row(position: usize) -> Result<u32, ExportError> {
    position
        .checked_add(1)
        .and_then(|r| u32::try_from(r).ok())
        .ok_or_else(|| ExportError::ExcelWrite {
            detail: format!("row {position} exceeds the worksheet row limit"),
        })
}

pub(crate) fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    val: impl IntoExcelData,
) -> Result<(), ExportError> {
    worksheet.write(row, col, val).map(|_| ()).map_err(xlsx_err)
}

/// Writes a bold header into row 0 and freezes it.
pub(crate) fn write_header_row(
    worksheet: &mut Worksheet,
    headers: &[&str],
) -> Result<(), ExportError> {
    let bold = Format::new().set_bold();
    for (col, header) in (0u16..).zip(headers) {
        worksheet
            .write_with_format(0, col, *header, &bold)
            .map_err(xlsx_err)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_err)?;
    Ok(())
}

pub(crate) fn set_column_widths(
    worksheet: &mut Worksheet,
    widths: &[(u16, f64)],
) -> Result<(), ExportError> {
    for &(col, width) in widths {
        worksheet.set_column_width(col, width).map_err(xlsx_err)?;
    }
    Ok(())
}
