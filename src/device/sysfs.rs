//! USB device enumeration through sysfs
//!
//! The kernel exposes every USB device as `/sys/bus/usb/devices/<bus>` and
//! each of its interfaces as `<bus>:<config>.<interface>`. Interface
//! directories carry the class triple; the parent device directory carries
//! the IDs and the decoded string descriptors.

use super::{DeviceError, DeviceFilter, InterfaceClass, UsbBackend, UsbDevice};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where Linux publishes USB devices
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/bus/usb/devices";

/// Reads USB device information from a sysfs tree
#[derive(Debug, Clone)]
pub struct SysfsBackend {
    root: PathBuf,
}

impl SysfsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn interface_class(dir: &Path) -> Result<InterfaceClass, DeviceError> {
        Ok(InterfaceClass {
            class_code: read_hex_u8(&dir.join("bInterfaceClass"))?,
            subclass_code: read_hex_u8(&dir.join("bInterfaceSubClass"))?,
            protocol_code: read_hex_u8(&dir.join("bInterfaceProtocol"))?,
        })
    }

    fn device(&self, bus_id: &str) -> Result<UsbDevice, DeviceError> {
        let dir = self.root.join(bus_id);
        Ok(UsbDevice {
            bus_id: bus_id.to_string(),
            vendor_id: read_hex_u16(&dir.join("idVendor"))?,
            product_id: read_hex_u16(&dir.join("idProduct"))?,
            manufacturer_name: read_optional_string(&dir.join("manufacturer"))?,
            product_name: read_optional_string(&dir.join("product"))?,
            serial_number: read_optional_string(&dir.join("serial"))?,
        })
    }
}

impl Default for SysfsBackend {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT)
    }
}

impl UsbBackend for SysfsBackend {
    fn devices(&self, filters: &[DeviceFilter]) -> Result<Vec<UsbDevice>, DeviceError> {
        if !self.root.is_dir() {
            return Err(DeviceError::Unavailable(format!(
                "{} does not exist",
                self.root.display()
            )));
        }

        // Keyed by bus id so a composite keyboard with several matching
        // interfaces is listed once, in a stable order
        let mut matched = BTreeMap::new();

        for entry in fs::read_dir(&self.root)?.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some((bus_id, _interface)) = name.split_once(':') else {
                continue;
            };
            if matched.contains_key(bus_id) {
                continue;
            }

            let class = match Self::interface_class(&entry.path()) {
                Ok(class) => class,
                Err(e) => {
                    log::debug!("skipping interface {}: {}", name, e);
                    continue;
                }
            };
            if !filters.iter().any(|f| f.matches(&class)) {
                continue;
            }

            match self.device(bus_id) {
                Ok(device) => {
                    matched.insert(bus_id.to_string(), device);
                }
                Err(e) => log::warn!("matching interface {} has unreadable parent: {}", name, e),
            }
        }

        Ok(matched.into_values().collect())
    }
}

fn read_attribute(path: &Path) -> Result<String, DeviceError> {
    Ok(fs::read_to_string(path)?.trim().to_string())
}

fn read_hex_u8(path: &Path) -> Result<u8, DeviceError> {
    let value = read_attribute(path)?;
    u8::from_str_radix(&value, 16).map_err(|_| DeviceError::InvalidAttribute {
        path: path.to_path_buf(),
        value,
    })
}

fn read_hex_u16(path: &Path) -> Result<u16, DeviceError> {
    let value = read_attribute(path)?;
    u16::from_str_radix(&value, 16).map_err(|_| DeviceError::InvalidAttribute {
        path: path.to_path_buf(),
        value,
    })
}

/// String descriptors are optional; devices without them have no file
fn read_optional_string(path: &Path) -> Result<Option<String>, DeviceError> {
    match fs::read_to_string(path) {
        Ok(value) => {
            let value = value.trim();
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
