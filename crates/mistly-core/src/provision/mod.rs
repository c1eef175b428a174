// ── Sheet-driven provisioning ──
//
// Clone once, then per row: create the site, and only if that worked,
// apply its variables. Rows never affect each other.

pub mod cloner;
pub mod pipeline;
pub mod row;
pub mod sheet;
pub mod site;
pub mod template;

pub use cloner::{CloneResult, TenantCloner};
pub use pipeline::{ProvisioningPipeline, ProvisioningReport, RowOutcome};
pub use row::normalize;
pub use sheet::{ProvisioningSheet, SheetLayout, SheetRow};
pub use site::SiteProvisioner;
pub use template::{TemplateColumn, TemplateSchema};
