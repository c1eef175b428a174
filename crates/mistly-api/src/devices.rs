// Device statistics endpoint

use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::DeviceStat;

impl MistClient {
    /// List statistics for every device at a site, all types and statuses.
    ///
    /// `GET /sites/{site_id}/stats/devices?type=all&status=all`
    pub async fn list_site_device_stats(&self, site_id: &str) -> Result<Vec<DeviceStat>, Error> {
        debug!(site_id, "listing device stats");
        self.get_paged(
            &["sites", site_id, "stats", "devices"],
            &[("type", "all".into()), ("status", "all".into())],
        )
        .await
    }
}
