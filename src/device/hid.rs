//! USB device enumeration through hidapi
//!
//! Used where sysfs is not available. HID exposes usages rather than
//! interface class triples, so each filter is translated to the usage of
//! the collection its boot interface reports.

use super::{DeviceError, DeviceFilter, UsbBackend, UsbDevice};
use hidapi::HidApi;
use std::collections::BTreeMap;

/// Reads USB HID device information through the platform HID stack
#[derive(Debug, Clone, Copy, Default)]
pub struct HidBackend;

impl UsbBackend for HidBackend {
    fn devices(&self, filters: &[DeviceFilter]) -> Result<Vec<UsbDevice>, DeviceError> {
        let usages: Vec<(u16, u16)> = filters.iter().filter_map(DeviceFilter::hid_usage).collect();
        let api = HidApi::new().map_err(|e| DeviceError::Unavailable(e.to_string()))?;

        // One physical keyboard shows up once per collection; keep the first
        let mut matched = BTreeMap::new();
        for info in api.device_list() {
            if !usages.contains(&(info.usage_page(), info.usage())) {
                continue;
            }
            let serial_number = info.serial_number().map(str::to_string);
            let key = (info.vendor_id(), info.product_id(), serial_number.clone());
            matched.entry(key).or_insert_with(|| UsbDevice {
                bus_id: info.path().to_string_lossy().into_owned(),
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
                manufacturer_name: info.manufacturer_string().map(str::to_string),
                product_name: info.product_string().map(str::to_string),
                serial_number,
            });
        }

        log::debug!("hidapi listed {} matching device(s)", matched.len());
        Ok(matched.into_values().collect())
    }
}
