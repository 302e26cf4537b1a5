//! USB keyboard identification
//!
//! A device request enumerates USB devices whose interfaces match a class
//! filter, on a worker thread so the UI keeps running. The caller then lets
//! the user pick one of the matches.

mod descriptor;
mod filter;
#[cfg(not(target_os = "linux"))]
mod hid;
mod request;
mod sysfs;

pub use descriptor::UsbDevice;
pub use filter::{DeviceFilter, InterfaceClass};
pub use request::{DeviceError, DeviceRequest, UsbBackend};
pub use sysfs::{SysfsBackend, DEFAULT_SYSFS_ROOT};

#[cfg(not(target_os = "linux"))]
pub use hid::HidBackend;

use crate::config::DeviceConfig;
use std::sync::Arc;

/// Backend for this platform: sysfs on Linux, hidapi elsewhere
pub fn platform_backend(config: &DeviceConfig) -> Arc<dyn UsbBackend> {
    #[cfg(target_os = "linux")]
    {
        Arc::new(SysfsBackend::new(config.sysfs_root.clone()))
    }

    #[cfg(not(target_os = "linux"))]
    {
        log::debug!("ignoring sysfs root {}", config.sysfs_root.display());
        Arc::new(HidBackend)
    }
}
