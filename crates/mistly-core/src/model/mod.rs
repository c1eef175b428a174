// ── Domain model ──

pub mod cell;
pub mod inventory;
pub mod site;

pub use cell::CellValue;
pub use inventory::{CrawlLevel, InventoryRecord, REPORT_COLUMNS};
pub use site::{LatLng, SiteSpec, VariableBindings};
