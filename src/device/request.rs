//! Asynchronous device requests

use super::{DeviceFilter, UsbDevice};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use thiserror::Error;

/// Errors a device request can end with
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No connected device matched the filters
    #[error("No matching USB device found")]
    NoMatchingDevice,
    /// The user dismissed the device chooser
    #[error("Device selection cancelled")]
    Cancelled,
    /// USB device information is not available on this system
    #[error("USB device information unavailable: {0}")]
    Unavailable(String),
    /// IO error while reading device information
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// A device attribute could not be parsed
    #[error("Invalid value {value:?} in {}", .path.display())]
    InvalidAttribute { path: PathBuf, value: String },
}

/// Source of USB device information
pub trait UsbBackend: Send + Sync {
    /// List connected devices with at least one interface matching any of
    /// the filters
    fn devices(&self, filters: &[DeviceFilter]) -> Result<Vec<UsbDevice>, DeviceError>;
}

/// A device enumeration running on a worker thread
pub struct DeviceRequest {
    rx: mpsc::Receiver<Result<Vec<UsbDevice>, DeviceError>>,
}

impl DeviceRequest {
    /// Start enumerating devices in the background
    pub fn spawn(backend: Arc<dyn UsbBackend>, filters: Vec<DeviceFilter>) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = backend.devices(&filters);
            // The receiver is gone if the app quit while we were enumerating
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// Poll for the result without blocking.
    ///
    /// Returns `None` while the request is still pending.
    pub fn try_resolve(&self) -> Option<Result<Vec<UsbDevice>, DeviceError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(DeviceError::Unavailable(
                "device enumeration stopped unexpectedly".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct FixedBackend(Vec<UsbDevice>);

    impl UsbBackend for FixedBackend {
        fn devices(&self, _filters: &[DeviceFilter]) -> Result<Vec<UsbDevice>, DeviceError> {
            Ok(self.0.clone())
        }
    }

    struct PanickingBackend;

    impl UsbBackend for PanickingBackend {
        fn devices(&self, _filters: &[DeviceFilter]) -> Result<Vec<UsbDevice>, DeviceError> {
            panic!("backend failure");
        }
    }

    fn wait(request: &DeviceRequest) -> Result<Vec<UsbDevice>, DeviceError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = request.try_resolve() {
                return result;
            }
            assert!(Instant::now() < deadline, "request never resolved");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn request_resolves_with_backend_devices() {
        let device = UsbDevice {
            bus_id: "3-1".to_string(),
            vendor_id: 1,
            product_id: 2,
            manufacturer_name: None,
            product_name: Some("Model X".to_string()),
            serial_number: None,
        };
        let request = DeviceRequest::spawn(
            Arc::new(FixedBackend(vec![device.clone()])),
            vec![DeviceFilter::HID_KEYBOARD],
        );
        assert_eq!(wait(&request).unwrap(), vec![device]);
    }

    #[test]
    fn dead_worker_resolves_as_unavailable() {
        let request = DeviceRequest::spawn(Arc::new(PanickingBackend), Vec::new());
        assert!(matches!(wait(&request), Err(DeviceError::Unavailable(_))));
    }

    #[test]
    fn error_messages() {
        assert_eq!(DeviceError::NoMatchingDevice.to_string(), "No matching USB device found");
        let err = DeviceError::InvalidAttribute {
            path: PathBuf::from("/sys/x/idVendor"),
            value: "zz".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value \"zz\" in /sys/x/idVendor");
    }
}
