//! Selection of the global key listener

use super::{KeyEvent, KeyboardListener};
use std::sync::mpsc;

#[cfg(target_os = "linux")]
use super::EvdevListener;

/// Where key events come from for this session
pub enum KeySource {
    /// Raw input devices (Linux)
    #[cfg(target_os = "linux")]
    Evdev(EvdevListener),
    /// Portable key state polling
    DeviceQuery(KeyboardListener),
    /// No listener could be attached; the UI runs but sees no keys
    Unavailable,
}

impl KeySource {
    /// Attach the best available listener. On Linux, evdev is tried first
    /// and device_query is only opened when evdev is unusable.
    pub fn attach(event_tx: mpsc::Sender<KeyEvent>) -> Self {
        #[cfg(target_os = "linux")]
        let event_tx = match EvdevListener::try_new(event_tx.clone()) {
            Some(evdev) => {
                for path in evdev.device_paths() {
                    log::info!("reading keys from {}", path.display());
                }
                return Self::Evdev(evdev);
            }
            None => {
                log::warn!("falling back to device_query: {}", super::evdev_status());
                event_tx
            }
        };

        Self::from_fallback(KeyboardListener::new(event_tx))
    }

    fn from_fallback(listener: Option<KeyboardListener>) -> Self {
        match listener {
            Some(listener) => Self::DeviceQuery(listener),
            None => {
                log::error!("no key listener available; key presses will not be shown");
                Self::Unavailable
            }
        }
    }

    /// Poll the listener; returns the number of events sent
    pub fn poll(&mut self) -> usize {
        match self {
            #[cfg(target_os = "linux")]
            Self::Evdev(evdev) => evdev.poll(),
            Self::DeviceQuery(listener) => listener.poll(),
            Self::Unavailable => 0,
        }
    }

    /// Name shown in the status bar
    pub fn name(&self) -> String {
        match self {
            #[cfg(target_os = "linux")]
            Self::Evdev(evdev) => format!("evdev ({} device(s))", evdev.device_count()),
            Self::DeviceQuery(_) => "device_query".to_string(),
            Self::Unavailable => "none".to_string(),
        }
    }
}
