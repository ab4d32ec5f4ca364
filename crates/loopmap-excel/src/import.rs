/// Reads `From`/`To` relationship rows out of a connections workbook.
use std::io::{Read, Seek};

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use tracing::debug;

use loopmap_core::EdgeRecord;

use crate::error::ImportError;
use crate::sheet::{build_header_index, read_optional_string, require_column};

/// Default name of the sheet holding the relationship rows.
pub const DEFAULT_SHEET: &str = "Connections";
/// Default source-column header.
pub const DEFAULT_FROM_COLUMN: &str = "From";
/// Default target-column header.
pub const DEFAULT_TO_COLUMN: &str = "To";

/// Where to find the relationship rows in a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Sheet name, matched exactly.
    pub sheet: String,
    /// Source-column header, matched case-insensitively.
    pub from_column: String,
    /// Target-column header, matched case-insensitively.
    pub to_column: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_SHEET.to_owned(),
            from_column: DEFAULT_FROM_COLUMN.to_owned(),
            to_column: DEFAULT_TO_COLUMN.to_owned(),
        }
    }
}

/// Reads every data row of the configured sheet as an [`EdgeRecord`].
///
/// The reader must be positioned at the start of a `.xlsx` file. Rows with
/// a blank `From` or `To` cell are returned with that side set to `None`;
/// the graph builder decides what to do with them.
///
/// # Errors
///
/// - [`ImportError::MissingSheet`] if the sheet does not exist.
/// - [`ImportError::MissingRequiredColumn`] if the header row lacks either
///   column.
/// - [`ImportError::ExcelRead`] if the workbook cannot be decoded.
pub fn read_connections<R: Read + Seek>(
    reader: R,
    config: &ImportConfig,
) -> Result<Vec<EdgeRecord>, ImportError> {
    let mut workbook: Xlsx<R> =
        open_workbook_from_rs(reader).map_err(|e: calamine::XlsxError| ImportError::ExcelRead {
            detail: e.to_string(),
        })?;

    let sheet = get_sheet(&mut workbook, &config.sheet)?;
    records_from_range(&sheet, config)
}

fn records_from_range(
    sheet: &Range<Data>,
    config: &ImportConfig,
) -> Result<Vec<EdgeRecord>, ImportError> {
    let headers = build_header_index(sheet);
    let from_col = require_column(&headers, &config.sheet, &config.from_column)?;
    let to_col = require_column(&headers, &config.sheet, &config.to_column)?;

    let records: Vec<EdgeRecord> = sheet
        .rows()
        .skip(1)
        .map(|row| EdgeRecord {
            from: read_optional_string(row, from_col),
            to: read_optional_string(row, to_col),
        })
        .collect();

    let incomplete = records.iter().filter(|r| r.endpoints().is_none()).count();
    debug!(
        sheet = %config.sheet,
        rows = records.len(),
        incomplete,
        "read connection rows"
    );
    Ok(records)
}

fn get_sheet<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<Data>, ImportError> {
    if !workbook.sheet_names().iter().any(|s| s == name) {
        return Err(ImportError::MissingSheet {
            sheet: name.to_owned(),
        });
    }
    workbook
        .worksheet_range(name)
        .map_err(|e| ImportError::ExcelRead {
            detail: format!("failed to read sheet {name:?}: {e}"),
        })
}
