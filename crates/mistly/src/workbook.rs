//! Deployment workbook loading.
//!
//! Reads one worksheet with calamine and hands the core a grid addressed
//! from cell A1, whatever the sheet's used range is.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use mistly_core::{CellValue, ProvisioningSheet};

use crate::error::CliError;

/// Load `sheet` from the workbook at `path`.
pub fn read_sheet(path: &Path, sheet: &str) -> Result<ProvisioningSheet, CliError> {
    let fail = |reason: String| CliError::Workbook {
        path: path.display().to_string(),
        sheet: sheet.to_owned(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| fail(e.to_string()))?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(fail(format!("no sheet named '{sheet}'")));
    }
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| fail(e.to_string()))?;

    tracing::debug!(sheet, rows = range.height(), "worksheet loaded");
    Ok(ProvisioningSheet::new(grid_from_range(&range)))
}

/// Rebuild an A1-anchored grid from a used range that may start further in.
pub fn grid_from_range(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let start_row = usize::try_from(start_row).unwrap_or_default();
    let start_col = usize::try_from(start_col).unwrap_or_default();

    let mut grid = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![CellValue::Null; start_col];
        cells.extend(row.iter().map(cell_value));
        grid.push(cells);
    }
    grid
}

/// Spreadsheet cell to core cell. Error cells read as empty.
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            CellValue::Text(s.clone())
        }
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_cell_kinds() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Null);
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(cell_value(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(
            cell_value(&Data::String("HQ".into())),
            CellValue::Text("HQ".into())
        );
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::Null
        );
    }

    #[test]
    fn grid_is_anchored_at_a1() {
        // Used range B2:C3.
        let mut range: Range<Data> = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("Acme".into()));
        range.set_value((2, 2), Data::Float(2.0));

        let grid = grid_from_range(&range);
        assert_eq!(grid.len(), 3);
        assert!(grid[0].is_empty());
        assert_eq!(grid[1][1], CellValue::Text("Acme".into()));
        assert_eq!(grid[1][0], CellValue::Null);
        assert_eq!(grid[2][2], CellValue::Float(2.0));

        let sheet = ProvisioningSheet::new(grid);
        assert_eq!(sheet.cell(1, 1), &CellValue::Text("Acme".into()));
    }

    #[test]
    fn empty_range_gives_empty_grid() {
        let range: Range<Data> = Range::empty();
        assert!(grid_from_range(&range).is_empty());
    }
}
