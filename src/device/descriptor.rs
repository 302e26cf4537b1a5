//! Connected USB device description

use serde::Serialize;

/// A USB device as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsbDevice {
    /// Bus path of the device (e.g. `1-2.3`)
    pub bus_id: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer_name: Option<String>,
    pub product_name: Option<String>,
    pub serial_number: Option<String>,
}

impl UsbDevice {
    /// Name to show in lists: product name, falling back to the IDs
    pub fn display_name(&self) -> String {
        match (&self.manufacturer_name, &self.product_name) {
            (Some(manufacturer), Some(product)) if !product.contains(manufacturer.as_str()) => {
                format!("{} {}", manufacturer, product)
            }
            (_, Some(product)) => product.clone(),
            _ => format!("USB device {:04x}:{:04x}", self.vendor_id, self.product_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(manufacturer: Option<&str>, product: Option<&str>) -> UsbDevice {
        UsbDevice {
            bus_id: "1-2".to_string(),
            vendor_id: 0x046d,
            product_id: 0xc31c,
            manufacturer_name: manufacturer.map(str::to_string),
            product_name: product.map(str::to_string),
            serial_number: None,
        }
    }

    #[test]
    fn display_name_combines_manufacturer_and_product() {
        let dev = device(Some("Logitech"), Some("USB Keyboard"));
        assert_eq!(dev.display_name(), "Logitech USB Keyboard");
    }

    #[test]
    fn display_name_skips_repeated_manufacturer() {
        let dev = device(Some("Keychron"), Some("Keychron K2"));
        assert_eq!(dev.display_name(), "Keychron K2");
    }

    #[test]
    fn display_name_falls_back_to_ids() {
        let dev = device(Some("Logitech"), None);
        assert_eq!(dev.display_name(), "USB device 046d:c31c");
    }
}
