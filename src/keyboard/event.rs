//! Keyboard event types and listener

use super::KeyCode;
use device_query::{DeviceQuery, DeviceState};
use std::sync::mpsc;
use std::time::Instant;

/// Type of keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    /// Key was pressed down
    Press,
    /// Key was released
    Release,
}

/// A keyboard event
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// The key code
    pub key: KeyCode,
    /// Type of event (press/release)
    pub event_type: KeyEventType,
    /// When the event occurred
    pub timestamp: Instant,
    /// Set once a handler claims the key, so the terminal's own binding for
    /// it must not run
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: KeyCode, event_type: KeyEventType, timestamp: Instant) -> Self {
        Self {
            key,
            event_type,
            timestamp,
            default_prevented: false,
        }
    }

    pub fn press(key: KeyCode) -> Self {
        Self::new(key, KeyEventType::Press, Instant::now())
    }

    pub fn release(key: KeyCode) -> Self {
        Self::new(key, KeyEventType::Release, Instant::now())
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Keyboard listener that polls for key state changes
pub struct KeyboardListener {
    device_state: DeviceState,
    last_keys: Vec<device_query::Keycode>,
    event_tx: mpsc::Sender<KeyEvent>,
}

impl KeyboardListener {
    /// Create a new keyboard listener.
    ///
    /// Returns `None` when the platform key state cannot be queried, such as
    /// on Linux without an X display.
    pub fn new(event_tx: mpsc::Sender<KeyEvent>) -> Option<Self> {
        Some(Self {
            device_state: DeviceState::checked_new()?,
            last_keys: Vec::new(),
            event_tx,
        })
    }

    /// Poll for keyboard state changes
    /// Returns the number of events generated
    pub fn poll(&mut self) -> usize {
        let now = Instant::now();
        let current_keys = self.device_state.get_keys();
        let mut event_count = 0;

        for key in &current_keys {
            if !self.last_keys.contains(key) {
                let event = KeyEvent::new(KeyCode::from(*key), KeyEventType::Press, now);
                if self.event_tx.send(event).is_ok() {
                    event_count += 1;
                }
            }
        }

        for key in &self.last_keys {
            if !current_keys.contains(key) {
                let event = KeyEvent::new(KeyCode::from(*key), KeyEventType::Release, now);
                if self.event_tx.send(event).is_ok() {
                    event_count += 1;
                }
            }
        }

        self.last_keys = current_keys;
        event_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_is_not_prevented() {
        let event = KeyEvent::press(KeyCode(30));
        assert_eq!(event.event_type, KeyEventType::Press);
        assert!(!event.default_prevented());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn listener_without_display_is_none() {
        std::env::remove_var("DISPLAY");
        let (tx, _rx) = mpsc::channel();
        assert!(KeyboardListener::new(tx).is_none());
    }

    #[test]
    fn prevent_default_sticks() {
        let mut event = KeyEvent::release(KeyCode(15));
        event.prevent_default();
        event.prevent_default();
        assert!(event.default_prevented());
        assert_eq!(event.event_type, KeyEventType::Release);
    }
}
