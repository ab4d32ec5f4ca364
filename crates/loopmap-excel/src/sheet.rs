/// Header indexing and cell extraction for calamine worksheet ranges.
use std::collections::HashMap;

use calamine::{Data, Range};

use crate::error::ImportError;

/// Builds a lowercased column-name → column-index map from the first row.
///
/// Blank headers are skipped. When a header repeats, the leftmost column
/// wins.
pub fn build_header_index(sheet: &Range<Data>) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    let Some(row) = sheet.rows().next() else {
        return map;
    };
    for (col_idx, cell) in row.iter().enumerate() {
        let header = cell_to_string(cell).trim().to_lowercase();
        if !header.is_empty() {
            map.entry(header).or_insert(col_idx);
        }
    }
    map
}

/// Converts a cell to a `String`, text verbatim.
///
/// Whole floats render without a fractional part; empty and error cells
/// render as the empty string.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if *f == f.floor() && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Looks up the column index for `header` (case-insensitive, trimmed).
pub fn require_column(
    headers: &HashMap<String, usize>,
    sheet_name: &str,
    header: &str,
) -> Result<usize, ImportError> {
    headers
        .get(&header.trim().to_lowercase())
        .copied()
        .ok_or_else(|| ImportError::MissingRequiredColumn {
            sheet: sheet_name.to_owned(),
            column: header.to_owned(),
        })
}

/// Reads the cell at `col`; `None` if the row is short or the cell is blank.
///
/// Surrounding whitespace is kept: `"A "` and `"A"` are different labels.
pub fn read_optional_string(row: &[Data], col: usize) -> Option<String> {
    let val = cell_to_string(row.get(col).unwrap_or(&Data::Empty));
    if val.trim().is_empty() { None } else { Some(val) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(rows: &[&[Data]]) -> Range<Data> {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width as u32 - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_owned())
    }

    #[test]
    fn headers_are_trimmed_and_lowercased() {
        let sheet = range(&[&[s(" From "), s("TO"), Data::Empty, s("Note")]]);
        let headers = build_header_index(&sheet);
        assert_eq!(headers.get("from"), Some(&0));
        assert_eq!(headers.get("to"), Some(&1));
        assert_eq!(headers.get("note"), Some(&3));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn leftmost_duplicate_header_wins() {
        let sheet = range(&[&[s("From"), s("from")]]);
        assert_eq!(build_header_index(&sheet).get("from"), Some(&0));
    }

    #[test]
    fn require_column_reports_requested_name() {
        let sheet = range(&[&[s("From")]]);
        let headers = build_header_index(&sheet);
        assert_eq!(require_column(&headers, "Connections", "FROM").ok(), Some(0));
        let err = require_column(&headers, "Connections", "To");
        assert!(matches!(
            err,
            Err(ImportError::MissingRequiredColumn { ref sheet, ref column })
                if sheet == "Connections" && column == "To"
        ));
    }

    #[test]
    fn cell_rendering() {
        assert_eq!(cell_to_string(&Data::Float(42.0)), "42");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&s("  x ")), "  x ");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn optional_string_handles_short_rows_and_blanks() {
        let row = [s("a"), s("   "), s("a ")];
        assert_eq!(read_optional_string(&row, 0), Some("a".to_owned()));
        assert_eq!(read_optional_string(&row, 1), None);
        assert_eq!(read_optional_string(&row, 2), Some("a ".to_owned()));
        assert_eq!(read_optional_string(&row, 5), None);
    }
}
