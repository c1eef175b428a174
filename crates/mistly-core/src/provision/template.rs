// ── Variable column discovery ──

use crate::model::CellValue;

/// Opening marker of a variable header cell.
pub const OPEN_MARKER: &str = "{{";
/// Closing marker of a variable header cell.
pub const CLOSE_MARKER: &str = "}}";

/// A header column that carries a site variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateColumn {
    pub column: usize,
    pub variable: String,
}

/// The variable columns of a deployment sheet, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSchema {
    columns: Vec<TemplateColumn>,
}

impl TemplateSchema {
    /// Scan `header` from `start_column` rightwards.
    ///
    /// Stops at the first blank (or missing) header cell. Text cells of the
    /// form `{{name}}` become variable columns named `name`; anything else
    /// before the stop is skipped.
    pub fn detect(header: &[CellValue], start_column: usize) -> Self {
        let columns = header
            .iter()
            .enumerate()
            .skip(start_column)
            .take_while(|(_, cell)| !cell.is_blank())
            .filter_map(|(column, cell)| {
                let variable = cell.as_str().and_then(variable_name)?;
                Some(TemplateColumn {
                    column,
                    variable: variable.to_owned(),
                })
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[TemplateColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemplateColumn> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a TemplateSchema {
    type Item = &'a TemplateColumn;
    type IntoIter = std::slice::Iter<'a, TemplateColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Strip exactly one marker pair; `None` unless both markers are present
/// without overlapping and the name is non-empty.
fn variable_name(header: &str) -> Option<&str> {
    let name = header
        .strip_prefix(OPEN_MARKER)?
        .strip_suffix(CLOSE_MARKER)?;
    (!name.is_empty()).then_some(name)
}
