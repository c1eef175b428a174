//! Provisioning command handler.

use serde::Serialize;
use tabled::Tabled;

use mistly_core::{CloneResult, ProvisioningPipeline, ProvisioningReport, RowOutcome};

use crate::cli::{GlobalOpts, OutputFormat, ProvisionArgs};
use crate::config;
use crate::error::CliError;
use crate::output::{self, Tone};
use crate::workbook;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct OutcomeView<'a> {
    row: usize,
    site_name: Option<&'a str>,
    status: &'static str,
    site_id: Option<&'a str>,
    error: Option<String>,
    payload: Option<&'a str>,
}

impl<'a> From<&'a RowOutcome> for OutcomeView<'a> {
    fn from(o: &'a RowOutcome) -> Self {
        Self {
            row: o.row(),
            site_name: o.site_name(),
            status: o.label(),
            site_id: o.site_id(),
            error: o.error().map(ToString::to_string),
            payload: o.error().and_then(mistly_core::CoreError::api_payload),
        }
    }
}

#[derive(Serialize)]
struct ProvisionView<'a> {
    org: &'a CloneResult,
    variables: Vec<&'a str>,
    provisioned: usize,
    failed: usize,
    rows: Vec<OutcomeView<'a>>,
}

impl<'a> From<&'a ProvisioningReport> for ProvisionView<'a> {
    fn from(r: &'a ProvisioningReport) -> Self {
        Self {
            org: &r.clone,
            variables: r.schema.iter().map(|c| c.variable.as_str()).collect(),
            provisioned: r.provisioned(),
            failed: r.failed(),
            rows: r.outcomes.iter().map(OutcomeView::from).collect(),
        }
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Row")]
    row: usize,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Site ID")]
    site_id: String,
    #[tabled(rename = "Error")]
    error: String,
}

fn outcome_row(o: &OutcomeView<'_>, color: bool) -> OutcomeRow {
    let tone = match o.status {
        "provisioned" => Tone::Good,
        "variables failed" => Tone::Warn,
        _ => Tone::Bad,
    };
    let error = match (&o.error, o.payload) {
        (Some(e), Some(p)) if !p.is_empty() => format!("{e}\n{p}"),
        (Some(e), _) => e.clone(),
        (None, _) => String::new(),
    };
    OutcomeRow {
        row: o.row,
        site: o.site_name.unwrap_or_default().to_owned(),
        status: output::paint(o.status, tone, color),
        site_id: o.site_id.unwrap_or_default().to_owned(),
        error,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ProvisionArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let sheet = workbook::read_sheet(&args.workbook, &args.sheet)?;
    let session = config::open_session(global)?;
    let client = session.mist.build_client()?;

    let report = ProvisioningPipeline::new(&client).provision(&sheet).await?;
    let view = ProvisionView::from(&report);

    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        eprintln!(
            "Cloned org '{}' as {} ({} variables per site)",
            report.clone.org_name,
            report.clone.new_org_id,
            report.schema.len()
        );
    }

    let color = output::should_color(global.color);
    let out = output::render_single(global.output, &view, |v| {
        let rows: Vec<OutcomeRow> = v.rows.iter().map(|o| outcome_row(o, color)).collect();
        output::render_table(&rows)
    })?;
    output::print_output(&out, global.quiet);

    if view.failed > 0 {
        return Err(CliError::PartialFailure {
            summary: format!("{} of {} site rows failed", view.failed, view.rows.len()),
        });
    }
    Ok(())
}
