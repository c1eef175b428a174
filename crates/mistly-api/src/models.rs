// Mist API request and response types
//
// Only the fields the pipelines read are modelled explicitly. Every read
// field is optional and decoded leniently: payload shape varies by device
// type and firmware, so a value of the wrong type reads as `None` instead
// of failing the whole listing. Anything else lands in `extra`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// ── Write path ───────────────────────────────────────────────────────

/// Body of `POST /orgs/{org_id}/clone`.
#[derive(Debug, Clone, Serialize)]
pub struct CloneOrgRequest<'a> {
    pub name: &'a str,
}

/// Minimal response of a create call: the new resource's identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
}

/// Body of `PUT /sites/{site_id}/setting` carrying site variables.
#[derive(Debug, Clone, Serialize)]
pub struct SiteVarsUpdate<'a, V: Serialize> {
    pub vars: &'a V,
}

// ── Read path ────────────────────────────────────────────────────────

/// Organization entry from `GET /msps/{msp_id}/orgs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Org {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub msp_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Site entry from `GET /orgs/{org_id}/sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub org_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Device statistics entry from `GET /sites/{site_id}/stats/devices`.
///
/// Access points, switches and gateways share this endpoint, so nearly
/// every field is absent for some device type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceStat {
    #[serde(default, deserialize_with = "lenient")]
    pub mac: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub serial: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ext_ip: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub uptime: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub num_clients: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub num_wlans: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub tx_bps: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub rx_bps: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub tx_bytes: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub rx_bytes: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub tx_pkts: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub rx_pkts: Option<u64>,
    /// Nested environment readings (APs only).
    #[serde(default, deserialize_with = "lenient")]
    pub env_stat: Option<EnvStat>,
    #[serde(default, deserialize_with = "lenient")]
    pub power_src: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub power_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub locked: Option<bool>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Environment sensor block nested inside `DeviceStat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvStat {
    #[serde(default, deserialize_with = "lenient")]
    pub cpu_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ambient_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decode an optional field, reading a value of the wrong type as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
