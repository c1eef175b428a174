// ── Inventory report types ──

use serde::Serialize;
use strum::Display;

/// Which listing of the MSP tree a crawl step fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CrawlLevel {
    /// Orgs of an MSP.
    Orgs,
    /// Sites of an org.
    Sites,
    /// Device stats of a site.
    Devices,
}

/// One device, denormalized with the org and site it was found under.
///
/// Serialized field names are the CSV report headers. Every device field
/// is optional: absent keys in the API payload stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryRecord {
    #[serde(rename = "Org Name")]
    pub org_name: Option<String>,
    #[serde(rename = "Org ID")]
    pub org_id: Option<String>,
    #[serde(rename = "Site Name")]
    pub site_name: Option<String>,
    #[serde(rename = "MAC")]
    pub mac: Option<String>,
    #[serde(rename = "Type")]
    pub device_type: Option<String>,
    #[serde(rename = "Model")]
    pub model: Option<String>,
    #[serde(rename = "Serial")]
    pub serial: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Hostname")]
    pub hostname: Option<String>,
    #[serde(rename = "IP")]
    pub ip: Option<String>,
    #[serde(rename = "External IP")]
    pub ext_ip: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Firmware")]
    pub firmware: Option<String>,
    #[serde(rename = "Uptime (s)")]
    pub uptime_secs: Option<f64>,
    #[serde(rename = "# Clients")]
    pub num_clients: Option<u64>,
    #[serde(rename = "# WLANs")]
    pub num_wlans: Option<u64>,
    #[serde(rename = "Tx bps")]
    pub tx_bps: Option<f64>,
    #[serde(rename = "Rx bps")]
    pub rx_bps: Option<f64>,
    #[serde(rename = "Tx bytes")]
    pub tx_bytes: Option<u64>,
    #[serde(rename = "Rx bytes")]
    pub rx_bytes: Option<u64>,
    #[serde(rename = "Tx pkts")]
    pub tx_pkts: Option<u64>,
    #[serde(rename = "Rx pkts")]
    pub rx_pkts: Option<u64>,
    #[serde(rename = "CPU Temp (C)")]
    pub cpu_temp_c: Option<f64>,
    #[serde(rename = "Ambient Temp (C)")]
    pub ambient_temp_c: Option<f64>,
    #[serde(rename = "Humidity (%)")]
    pub humidity_pct: Option<f64>,
    #[serde(rename = "Power Source")]
    pub power_src: Option<String>,
    #[serde(rename = "PoE Budget")]
    pub power_budget: Option<f64>,
    #[serde(rename = "Locked")]
    pub locked: Option<bool>,
}

/// CSV header row, in report column order.
pub const REPORT_COLUMNS: [&str; 28] = [
    "Org Name",
    "Org ID",
    "Site Name",
    "MAC",
    "Type",
    "Model",
    "Serial",
    "Name",
    "Hostname",
    "IP",
    "External IP",
    "Status",
    "Firmware",
    "Uptime (s)",
    "# Clients",
    "# WLANs",
    "Tx bps",
    "Rx bps",
    "Tx bytes",
    "Rx bytes",
    "Tx pkts",
    "Rx pkts",
    "CPU Temp (C)",
    "Ambient Temp (C)",
    "Humidity (%)",
    "Power Source",
    "PoE Budget",
    "Locked",
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serialized_keys_match_report_columns() {
        let value = serde_json::to_value(InventoryRecord::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), REPORT_COLUMNS.len());
        for column in REPORT_COLUMNS {
            assert!(object.contains_key(column), "missing column {column}");
        }
    }

    #[test]
    fn crawl_level_display() {
        assert_eq!(CrawlLevel::Sites.to_string(), "sites");
        assert_eq!(CrawlLevel::Devices.to_string(), "devices");
    }
}
