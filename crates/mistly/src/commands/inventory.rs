//! Inventory command handler.

use std::path::Path;

use serde::Serialize;
use tabled::Tabled;

use mistly_core::{CoreError, InventoryPipeline, InventoryReport};

use crate::cli::{GlobalOpts, InventoryArgs};
use crate::config;
use crate::error::CliError;
use crate::output;
use crate::report;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FailureView<'a> {
    level: String,
    entity_name: &'a str,
    entity_id: &'a str,
    error: String,
    payload: Option<&'a str>,
}

impl<'a> FailureView<'a> {
    fn new(err: &'a CoreError) -> Self {
        let (level, entity_name, entity_id) = match err {
            CoreError::Fetch {
                level,
                entity_name,
                entity_id,
                ..
            } => (level.to_string(), entity_name.as_str(), entity_id.as_str()),
            _ => (String::new(), "", ""),
        };
        Self {
            level,
            entity_name,
            entity_id,
            error: err.to_string(),
            payload: err.api_payload(),
        }
    }
}

#[derive(Serialize)]
struct InventoryView<'a> {
    msp_id: &'a str,
    output_file: String,
    devices: usize,
    failures: Vec<FailureView<'a>>,
}

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Error")]
    error: String,
}

fn detail(view: &InventoryView<'_>) -> String {
    let mut out = format!(
        "Wrote {} devices from MSP {} to {}",
        view.devices, view.msp_id, view.output_file
    );
    if !view.failures.is_empty() {
        let rows: Vec<FailureRow> = view
            .failures
            .iter()
            .map(|f| FailureRow {
                level: f.level.clone(),
                entity: f.entity_name.to_owned(),
                id: f.entity_id.to_owned(),
                error: f.error.clone(),
            })
            .collect();
        out.push_str("\nSkipped branches:\n");
        out.push_str(&output::render_table(&rows));
    }
    out
}

fn view<'a>(msp_id: &'a str, path: &Path, report: &'a InventoryReport) -> InventoryView<'a> {
    InventoryView {
        msp_id,
        output_file: path.display().to_string(),
        devices: report.records.len(),
        failures: report.failures.iter().map(FailureView::new).collect(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: InventoryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let session = config::open_session(global)?;
    let msp_id = session.msp_id()?.to_owned();

    let report = InventoryPipeline::new(&session.mist)?
        .collect(&msp_id)
        .await?;
    report::write_inventory_file(&args.output_file, &report.records)?;

    let view = view(&msp_id, &args.output_file, &report);
    let out = output::render_single(global.output, &view, detail)?;
    output::print_output(&out, global.quiet);

    if !report.is_complete() {
        return Err(CliError::PartialFailure {
            summary: format!(
                "{} listing(s) failed; the report omits those branches",
                report.failures.len()
            ),
        });
    }
    Ok(())
}
