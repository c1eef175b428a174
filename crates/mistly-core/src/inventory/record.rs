// ── Device record mapping ──

use mistly_api::models::{DeviceStat, Org, Site};

use crate::model::InventoryRecord;

/// Denormalize one device with the org and site it belongs to.
///
/// Missing keys stay `None`, including the whole `env_stat` block.
pub fn flatten(org: &Org, site: &Site, device: &DeviceStat) -> InventoryRecord {
    let env = device.env_stat.as_ref();

    InventoryRecord {
        org_name: org.name.clone(),
        org_id: org.id.clone(),
        site_name: site.name.clone(),
        mac: device.mac.clone(),
        device_type: device.device_type.clone(),
        model: device.model.clone(),
        serial: device.serial.clone(),
        name: device.name.clone(),
        hostname: device.hostname.clone(),
        ip: device.ip.clone(),
        ext_ip: device.ext_ip.clone(),
        status: device.status.clone(),
        firmware: device.version.clone(),
        uptime_secs: device.uptime,
        num_clients: device.num_clients,
        num_wlans: device.num_wlans,
        tx_bps: device.tx_bps,
        rx_bps: device.rx_bps,
        tx_bytes: device.tx_bytes,
        rx_bytes: device.rx_bytes,
        tx_pkts: device.tx_pkts,
        rx_pkts: device.rx_pkts,
        cpu_temp_c: env.and_then(|e| e.cpu_temp),
        ambient_temp_c: env.and_then(|e| e.ambient_temp),
        humidity_pct: env.and_then(|e| e.humidity),
        power_src: device.power_src.clone(),
        power_budget: device.power_budget,
        locked: device.locked,
    }
}
