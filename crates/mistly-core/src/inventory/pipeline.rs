// ── Inventory orchestration ──

use mistly_api::MistClient;
use tracing::info;

use super::crawler::HierarchyCrawler;
use super::record::flatten;
use crate::config::{CrawlStrategy, MistConfig};
use crate::error::CoreError;
use crate::model::InventoryRecord;

/// Flat device inventory of an MSP plus the branches that could not be read.
#[derive(Debug, Default)]
pub struct InventoryReport {
    /// One record per device, in traversal order.
    pub records: Vec<InventoryRecord>,
    /// `CoreError::Fetch` entries for every listing that failed.
    pub failures: Vec<CoreError>,
}

impl InventoryReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Walks an MSP tree and flattens every device it finds.
pub struct InventoryPipeline {
    client: MistClient,
    strategy: CrawlStrategy,
}

impl InventoryPipeline {
    pub fn new(config: &MistConfig) -> Result<Self, CoreError> {
        Ok(Self {
            client: config.build_client()?,
            strategy: config.strategy,
        })
    }

    /// Crawl `msp_id` and collect one record per device.
    ///
    /// Only a blank MSP id is an error. A failing listing, including the
    /// top-level org listing, produces an incomplete report.
    pub async fn collect(&self, msp_id: &str) -> Result<InventoryReport, CoreError> {
        let msp_id = msp_id.trim();
        if msp_id.is_empty() {
            return Err(CoreError::configuration("MSP id is empty"));
        }

        let report = match self.strategy {
            CrawlStrategy::Sequential => self.collect_sequential(msp_id).await,
        };
        info!(
            records = report.records.len(),
            failures = report.failures.len(),
            "inventory collected"
        );
        Ok(report)
    }

    async fn collect_sequential(&self, msp_id: &str) -> InventoryReport {
        let mut crawler = HierarchyCrawler::new(&self.client);
        let mut records = Vec::new();

        for org in crawler.list_orgs(msp_id).await {
            info!(org = org.name.as_deref().unwrap_or("<unnamed>"), "crawling org");
            for site in crawler.list_sites(&org).await {
                for device in crawler.list_device_stats(&site).await {
                    records.push(flatten(&org, &site, &device));
                }
            }
        }

        InventoryReport {
            records,
            failures: crawler.into_failures(),
        }
    }
}
