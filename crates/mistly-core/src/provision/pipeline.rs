// ── Provisioning orchestration ──
//
// Rows run strictly one after another in sheet order. The clone happens
// first and is the only step whose failure ends the run; every row-level
// failure is folded into that row's `RowOutcome`.

use mistly_api::MistClient;
use tracing::{info, warn};

use crate::error::CoreError;

use super::cloner::{CloneResult, TenantCloner, validate_source_org_id};
use super::row::normalize;
use super::sheet::{ProvisioningSheet, SheetRow};
use super::site::SiteProvisioner;
use super::template::TemplateSchema;

/// Terminal state of one site row.
#[derive(Debug)]
pub enum RowOutcome {
    /// Site created and variables applied.
    Provisioned {
        row: usize,
        site_name: String,
        site_id: String,
    },
    /// Site created, variable update failed. The site exists unconfigured.
    VariablesFailed {
        row: usize,
        site_name: String,
        site_id: String,
        error: CoreError,
    },
    /// Site creation failed; no variable update was attempted.
    SiteCreationFailed {
        row: usize,
        site_name: String,
        error: CoreError,
    },
    /// Row could not be read; no request was sent for it.
    Rejected { row: usize, error: CoreError },
}

impl RowOutcome {
    /// 1-based sheet row number.
    pub fn row(&self) -> usize {
        match self {
            Self::Provisioned { row, .. }
            | Self::VariablesFailed { row, .. }
            | Self::SiteCreationFailed { row, .. }
            | Self::Rejected { row, .. } => *row,
        }
    }

    pub fn site_name(&self) -> Option<&str> {
        match self {
            Self::Provisioned { site_name, .. }
            | Self::VariablesFailed { site_name, .. }
            | Self::SiteCreationFailed { site_name, .. } => Some(site_name),
            Self::Rejected { .. } => None,
        }
    }

    pub fn site_id(&self) -> Option<&str> {
        match self {
            Self::Provisioned { site_id, .. } | Self::VariablesFailed { site_id, .. } => {
                Some(site_id)
            }
            Self::SiteCreationFailed { .. } | Self::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Provisioned { .. } => None,
            Self::VariablesFailed { error, .. }
            | Self::SiteCreationFailed { error, .. }
            | Self::Rejected { error, .. } => Some(error),
        }
    }

    /// `true` if the site now exists, with or without variables.
    pub fn site_created(&self) -> bool {
        self.site_id().is_some()
    }

    /// Short status label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Provisioned { .. } => "provisioned",
            Self::VariablesFailed { .. } => "variables failed",
            Self::SiteCreationFailed { .. } => "site failed",
            Self::Rejected { .. } => "rejected",
        }
    }
}

/// Result of a complete provisioning run.
#[derive(Debug)]
pub struct ProvisioningReport {
    pub clone: CloneResult,
    pub schema: TemplateSchema,
    pub outcomes: Vec<RowOutcome>,
}

impl ProvisioningReport {
    /// Rows whose site and variables were both applied.
    pub fn provisioned(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Provisioned { .. }))
    }

    /// Rows with any failure.
    pub fn failed(&self) -> usize {
        self.count(|o| o.error().is_some())
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Drives a deployment sheet through clone → create site → bind variables.
pub struct ProvisioningPipeline<'a> {
    client: &'a MistClient,
}

impl<'a> ProvisioningPipeline<'a> {
    pub fn new(client: &'a MistClient) -> Self {
        Self { client }
    }

    /// Provision a whole sheet.
    ///
    /// Fails only on a bad source org id (before any request) or a failed
    /// clone (before any site request). Otherwise returns one outcome per
    /// non-blank site row.
    pub async fn provision(
        &self,
        sheet: &ProvisioningSheet,
    ) -> Result<ProvisioningReport, CoreError> {
        let source_org_id = sheet.source_org_id();
        validate_source_org_id(&source_org_id)?;

        let org_name = sheet.org_name();
        if org_name.is_empty() {
            warn!("org name cell is empty");
        }

        let clone = TenantCloner::new(self.client)
            .clone_org(&source_org_id, &org_name)
            .await?;

        let schema =
            TemplateSchema::detect(sheet.header_row(), sheet.layout().variable_start_column);
        info!(variables = schema.len(), "template columns detected");

        let outcomes = self.run(sheet.site_rows(), &schema, &clone).await;
        Ok(ProvisioningReport {
            clone,
            schema,
            outcomes,
        })
    }

    /// Provision each row under the cloned org, in order.
    pub async fn run<'r>(
        &self,
        rows: impl IntoIterator<Item = SheetRow<'r>>,
        schema: &TemplateSchema,
        clone: &CloneResult,
    ) -> Vec<RowOutcome> {
        let sites = SiteProvisioner::new(self.client);
        let mut outcomes = Vec::new();

        for row in rows {
            let outcome = Self::provision_row(&sites, &row, schema, &clone.new_org_id).await;
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn provision_row(
        sites: &SiteProvisioner<'_>,
        row: &SheetRow<'_>,
        schema: &TemplateSchema,
        org_id: &str,
    ) -> RowOutcome {
        let (spec, bindings) = match normalize(row, schema) {
            Ok(parts) => parts,
            Err(error) => {
                warn!(row = row.number(), %error, "row rejected");
                return RowOutcome::Rejected {
                    row: row.number(),
                    error,
                };
            }
        };
        let site_name = spec.display_name();

        let site_id = match sites.create_site(org_id, &spec).await {
            Ok(id) => id,
            Err(error) => {
                return RowOutcome::SiteCreationFailed {
                    row: row.number(),
                    site_name,
                    error,
                };
            }
        };

        match sites.bind_variables(&site_id, &site_name, &bindings).await {
            Ok(()) => RowOutcome::Provisioned {
                row: row.number(),
                site_name,
                site_id,
            },
            Err(error) => RowOutcome::VariablesFailed {
                row: row.number(),
                site_name,
                site_id,
                error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error() -> mistly_api::Error {
        mistly_api::Error::Api {
            status: 500,
            message: "boom".into(),
            body: String::new(),
        }
    }

    #[test]
    fn outcome_accessors() {
        let ok = RowOutcome::Provisioned {
            row: 6,
            site_name: "HQ".into(),
            site_id: "s-1".into(),
        };
        assert_eq!(ok.row(), 6);
        assert_eq!(ok.site_id(), Some("s-1"));
        assert!(ok.site_created());
        assert!(ok.error().is_none());

        let unbound = RowOutcome::VariablesFailed {
            row: 7,
            site_name: "Branch".into(),
            site_id: "s-2".into(),
            error: CoreError::VariableBinding {
                site_name: "Branch".into(),
                site_id: "s-2".into(),
                source: api_error(),
            },
        };
        assert!(unbound.site_created());
        assert!(unbound.error().is_some());
        assert_eq!(unbound.label(), "variables failed");

        let rejected = RowOutcome::Rejected {
            row: 9,
            error: CoreError::Format {
                row: 9,
                message: "too short".into(),
            },
        };
        assert!(!rejected.site_created());
        assert_eq!(rejected.site_name(), None);
    }
}
