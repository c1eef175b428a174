// ── MSP inventory crawl ──
//
// MSP → orgs → sites → device stats, visited depth-first in API order.
// A failed listing turns into an empty branch plus a recorded `Fetch`
// error; siblings are still visited.

pub mod crawler;
pub mod pipeline;
pub mod record;

pub use crawler::HierarchyCrawler;
pub use pipeline::{InventoryPipeline, InventoryReport};
pub use record::flatten;
