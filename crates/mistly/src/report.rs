//! CSV inventory report.

use std::io::Write;
use std::path::Path;

use mistly_core::InventoryRecord;
use mistly_core::model::REPORT_COLUMNS;

use crate::error::CliError;

/// Write one CSV row per record, header included even when empty.
pub fn write_inventory<W: Write>(writer: W, records: &[InventoryRecord]) -> Result<(), CliError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(REPORT_COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the report to `path`, replacing any existing file.
pub fn write_inventory_file(path: &Path, records: &[InventoryRecord]) -> Result<(), CliError> {
    let file = std::fs::File::create(path)?;
    write_inventory(file, records)?;
    tracing::info!(path = %path.display(), records = records.len(), "inventory written");
    Ok(())
}
