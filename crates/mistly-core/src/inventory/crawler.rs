// ── Hierarchy crawler ──

use mistly_api::MistClient;
use mistly_api::models::{DeviceStat, Org, Site};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::CrawlLevel;

/// Fetches one level of the MSP tree at a time.
///
/// Every listing either returns its entries or an empty list; failures
/// are kept on the crawler and handed back through [`into_failures`].
///
/// [`into_failures`]: HierarchyCrawler::into_failures
pub struct HierarchyCrawler<'a> {
    client: &'a MistClient,
    failures: Vec<CoreError>,
}

impl<'a> HierarchyCrawler<'a> {
    pub fn new(client: &'a MistClient) -> Self {
        Self {
            client,
            failures: Vec::new(),
        }
    }

    /// Orgs managed by `msp_id`.
    pub async fn list_orgs(&mut self, msp_id: &str) -> Vec<Org> {
        let result = self.client.list_msp_orgs(msp_id).await;
        self.settle(result, CrawlLevel::Orgs, msp_id, msp_id)
    }

    /// Sites of `org`. An org without an id has no branch to walk.
    pub async fn list_sites(&mut self, org: &Org) -> Vec<Site> {
        let name = org.name.as_deref().unwrap_or("<unnamed>");
        let Some(org_id) = org.id.as_deref() else {
            warn!(org = name, "org has no id, skipping");
            return Vec::new();
        };
        let result = self.client.list_org_sites(org_id).await;
        self.settle(result, CrawlLevel::Sites, name, org_id)
    }

    /// Device stats of `site`. A site without an id has no branch to walk.
    pub async fn list_device_stats(&mut self, site: &Site) -> Vec<DeviceStat> {
        let name = site.name.as_deref().unwrap_or("<unnamed>");
        let Some(site_id) = site.id.as_deref() else {
            warn!(site = name, "site has no id, skipping");
            return Vec::new();
        };
        let result = self.client.list_site_device_stats(site_id).await;
        self.settle(result, CrawlLevel::Devices, name, site_id)
    }

    /// Failures recorded during the crawl, in the order they happened.
    pub fn into_failures(self) -> Vec<CoreError> {
        self.failures
    }

    fn settle<T>(
        &mut self,
        result: Result<Vec<T>, mistly_api::Error>,
        level: CrawlLevel,
        entity_name: &str,
        entity_id: &str,
    ) -> Vec<T> {
        match result {
            Ok(items) => {
                debug!(%level, entity = entity_name, count = items.len(), "listing fetched");
                items
            }
            Err(source) => {
                warn!(%level, entity = entity_name, error = %source, "listing failed, branch skipped");
                self.failures.push(CoreError::Fetch {
                    level,
                    entity_name: entity_name.to_owned(),
                    entity_id: entity_id.to_owned(),
                    source,
                });
                Vec::new()
            }
        }
    }
}
