// ── In-memory deployment sheet ──
//
// A rectangular grid of cells plus the fixed positions of the metadata
// cells, the variable header row, and the first site row. The file reader
// lives in the CLI; this module only slices the grid.

use crate::model::CellValue;

static EMPTY_CELL: CellValue = CellValue::Null;

/// Fixed cell positions of the deployment template (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// (row, column) of the new organization name.
    pub org_name_cell: (usize, usize),
    /// (row, column) of the organization id to clone from.
    pub source_org_cell: (usize, usize),
    /// Row holding the `{{variable}}` headers.
    pub header_row: usize,
    /// First row describing a site.
    pub first_site_row: usize,
    /// Column where variable headers begin.
    pub variable_start_column: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            org_name_cell: (1, 0),
            source_org_cell: (1, 7),
            header_row: 4,
            first_site_row: 5,
            variable_start_column: 10,
        }
    }
}

/// One site row: its zero-based sheet index and its cells.
#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    pub index: usize,
    pub cells: &'a [CellValue],
}

impl<'a> SheetRow<'a> {
    pub fn new(index: usize, cells: &'a [CellValue]) -> Self {
        Self { index, cells }
    }

    /// 1-based row number as shown in a spreadsheet application.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_blank)
    }
}

/// A deployment sheet loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct ProvisioningSheet {
    rows: Vec<Vec<CellValue>>,
    layout: SheetLayout,
}

impl ProvisioningSheet {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            rows,
            layout: SheetLayout::default(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: SheetLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Cell at (row, column); missing cells read as `Null`.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// New organization name from the metadata cell.
    pub fn org_name(&self) -> String {
        let (row, column) = self.layout.org_name_cell;
        self.cell(row, column).to_text().trim().to_owned()
    }

    /// Source organization id from the metadata cell, trimmed.
    pub fn source_org_id(&self) -> String {
        let (row, column) = self.layout.source_org_cell;
        self.cell(row, column).to_text().trim().to_owned()
    }

    /// The variable header row (empty if the sheet is shorter).
    pub fn header_row(&self) -> &[CellValue] {
        self.rows
            .get(self.layout.header_row)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Site rows in sheet order, skipping rows whose cells are all blank.
    pub fn site_rows(&self) -> impl Iterator<Item = SheetRow<'_>> {
        self.rows
            .iter()
            .enumerate()
            .skip(self.layout.first_site_row)
            .map(|(index, cells)| SheetRow::new(index, cells))
            .filter(|row| !row.is_blank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    fn sample() -> ProvisioningSheet {
        let mut rows = vec![vec![CellValue::Null; 12]; 8];
        rows[1][0] = text("Acme");
        rows[1][7] = text("  org-123 ");
        rows[4][10] = text("{{wifi_psk}}");
        rows[5][0] = text("HQ");
        rows[7][0] = text("Branch");
        ProvisioningSheet::new(rows)
    }

    #[test]
    fn reads_metadata_cells() {
        let sheet = sample();
        assert_eq!(sheet.org_name(), "Acme");
        assert_eq!(sheet.source_org_id(), "org-123");
        assert_eq!(sheet.header_row()[10], text("{{wifi_psk}}"));
    }

    #[test]
    fn skips_blank_site_rows() {
        let sheet = sample();
        let indexes: Vec<usize> = sheet.site_rows().map(|r| r.index).collect();
        assert_eq!(indexes, vec![5, 7]);
        assert_eq!(sheet.site_rows().next().map(|r| r.number()), Some(6));
    }

    #[test]
    fn short_sheet_reads_as_empty() {
        let sheet = ProvisioningSheet::new(vec![vec![text("only")]]);
        assert_eq!(sheet.source_org_id(), "");
        assert!(sheet.header_row().is_empty());
        assert_eq!(sheet.site_rows().count(), 0);
        assert_eq!(sheet.cell(40, 40), &CellValue::Null);
    }
}
