//! Pipelines that drive the Mist cloud API for `mistly` (CLI) consumers.
//!
//! - **Provisioning** ([`provision`]): turns a deployment sheet into live
//!   resources: one org clone, then per row a site creation followed by a
//!   site-variable update. The clone is a hard prerequisite; per-row
//!   failures are captured as [`RowOutcome`] values and never stop the run.
//!
//! - **Inventory** ([`inventory`]): crawls MSP → orgs → sites → device
//!   stats and flattens every device into an [`InventoryRecord`]. A failed
//!   listing empties only its own branch; the failure is recorded in the
//!   [`InventoryReport`] and the crawl moves on to the next sibling.
//!
//! Both pipelines issue one request at a time against a shared
//! [`mistly_api::MistClient`] built from an immutable [`MistConfig`].

pub mod config;
pub mod error;
pub mod inventory;
pub mod model;
pub mod provision;
pub mod region;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CrawlStrategy, MistConfig, TlsVerification};
pub use error::CoreError;
pub use inventory::{HierarchyCrawler, InventoryPipeline, InventoryReport};
pub use model::{CellValue, CrawlLevel, InventoryRecord, LatLng, SiteSpec, VariableBindings};
pub use provision::{
    CloneResult, ProvisioningPipeline, ProvisioningReport, ProvisioningSheet, RowOutcome,
    SheetLayout, SheetRow, SiteProvisioner, TemplateColumn, TemplateSchema, TenantCloner,
};
pub use region::CloudRegion;

pub use mistly_api::RetryPolicy;
