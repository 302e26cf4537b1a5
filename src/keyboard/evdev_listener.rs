//! Raw evdev-based keyboard listener for Linux
//!
//! Reads `/dev/input/event*` directly, which reports keys the portable
//! listener never sees (PrintScreen, Pause, Fn on some laptops, the numpad
//! Enter and decimal keys).

use super::{KeyCode, KeyEvent, KeyEventType};
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::libc;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;
use thiserror::Error;

/// Error type for evdev operations
#[derive(Debug, Error)]
pub enum EvdevError {
    /// No keyboard devices found
    #[error("No keyboard devices found")]
    NoDevices,
    /// Permission denied accessing device
    #[error("Permission denied accessing {0}")]
    PermissionDenied(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Device enumeration failed
    #[error("Device enumeration failed: {0}")]
    EnumerationFailed(String),
}

const EV_KEY: u16 = 0x01;
const INPUT_EVENT_SIZE: usize = std::mem::size_of::<libc::input_event>();

/// Key event value for auto-repeat
const VALUE_REPEAT: i32 = 2;

/// The fields of a kernel `input_event` that follow its timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawKeyEvent {
    event_type: u16,
    code: u16,
    value: i32,
}

impl RawKeyEvent {
    /// Decode one `input_event` record. The timestamp is skipped; the
    /// listener stamps events with its own monotonic clock.
    fn parse(record: &[u8]) -> Option<Self> {
        if record.len() != INPUT_EVENT_SIZE {
            return None;
        }
        let tail = &record[INPUT_EVENT_SIZE - 8..];
        Some(Self {
            event_type: u16::from_ne_bytes([tail[0], tail[1]]),
            code: u16::from_ne_bytes([tail[2], tail[3]]),
            value: i32::from_ne_bytes([tail[4], tail[5], tail[6], tail[7]]),
        })
    }
}

/// Find all keyboard input devices
fn find_keyboard_devices() -> Result<Vec<PathBuf>, EvdevError> {
    let input_dir = PathBuf::from("/dev/input");
    if !input_dir.exists() {
        return Err(EvdevError::EnumerationFailed(
            "/dev/input does not exist".to_string(),
        ));
    }

    let mut keyboards: Vec<PathBuf> = fs::read_dir(&input_dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("event"))
        })
        .filter(|path| is_keyboard_device(path))
        .collect();

    if keyboards.is_empty() {
        return Err(EvdevError::NoDevices);
    }

    keyboards.sort();
    Ok(keyboards)
}

/// Check if a device is a keyboard by examining /sys/class/input
fn is_keyboard_device(device_path: &Path) -> bool {
    let Some(name) = device_path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    let caps_path = format!("/sys/class/input/{}/device/capabilities/key", name);
    if let Ok(caps) = fs::read_to_string(&caps_path) {
        // Hex bitmap of supported keys; a keyboard advertises dozens
        let total_bits: u32 = caps
            .split_whitespace()
            .filter_map(|hex| u64::from_str_radix(hex, 16).ok())
            .map(|n| n.count_ones())
            .sum();
        return total_bits > 50;
    }

    let name_path = format!("/sys/class/input/{}/device/name", name);
    if let Ok(dev_name) = fs::read_to_string(&name_path) {
        let dev_name_lower = dev_name.to_lowercase();
        return dev_name_lower.contains("keyboard") || dev_name_lower.contains("kbd");
    }
    false
}

/// Open each device non-blocking. Devices we may not read, or that vanished
/// since the scan, are skipped; the returned paths match the opened files.
fn open_devices(paths: Vec<PathBuf>) -> Result<(Vec<File>, Vec<PathBuf>), EvdevError> {
    let mut devices = Vec::new();
    let mut opened = Vec::new();

    for path in paths {
        match File::open(&path) {
            Ok(file) => {
                fcntl(file.as_raw_fd(), FcntlArg::F_SETFL(OFlag::O_NONBLOCK))
                    .map_err(io::Error::from)?;
                devices.push(file);
                opened.push(path);
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::PermissionDenied | io::ErrorKind::NotFound
                ) =>
            {
                log::debug!("skipping {}: {}", path.display(), e);
            }
            Err(e) => return Err(EvdevError::Io(e)),
        }
    }

    Ok((devices, opened))
}

/// Evdev-based keyboard listener for raw scancode detection
pub struct EvdevListener {
    devices: Vec<File>,
    device_paths: Vec<PathBuf>,
    pressed_keys: HashSet<u16>,
    event_tx: mpsc::Sender<KeyEvent>,
    buffer: Vec<u8>,
}

impl EvdevListener {
    /// Create a new evdev listener
    pub fn new(event_tx: mpsc::Sender<KeyEvent>) -> Result<Self, EvdevError> {
        let (devices, device_paths) = open_devices(find_keyboard_devices()?)?;

        if devices.is_empty() {
            return Err(EvdevError::PermissionDenied(
                "keyboard devices. Try running with sudo or add user to 'input' group".to_string(),
            ));
        }

        log::info!("evdev listener attached to {} device(s)", devices.len());

        Ok(Self {
            devices,
            device_paths,
            pressed_keys: HashSet::new(),
            event_tx,
            buffer: vec![0u8; INPUT_EVENT_SIZE * 64],
        })
    }

    /// Try to create an evdev listener, return None if not available
    pub fn try_new(event_tx: mpsc::Sender<KeyEvent>) -> Option<Self> {
        match Self::new(event_tx) {
            Ok(listener) => Some(listener),
            Err(e) => {
                log::warn!("evdev unavailable: {}", e);
                None
            }
        }
    }

    /// Get the number of connected devices
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Get device paths
    pub fn device_paths(&self) -> &[PathBuf] {
        &self.device_paths
    }

    /// Poll for keyboard events
    /// Returns the number of events generated
    pub fn poll(&mut self) -> usize {
        let now = Instant::now();
        let mut event_count = 0;

        for device in &mut self.devices {
            loop {
                let bytes_read = match device.read(&mut self.buffer) {
                    Ok(n) if n >= INPUT_EVENT_SIZE => n,
                    Ok(_) => break,
                    Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                    Err(e) => {
                        log::debug!("evdev read failed: {}", e);
                        break;
                    }
                };

                for record in self.buffer[..bytes_read].chunks_exact(INPUT_EVENT_SIZE) {
                    let Some(raw) = RawKeyEvent::parse(record) else {
                        continue;
                    };
                    if let Some(event_type) =
                        Self::transition(&mut self.pressed_keys, raw)
                    {
                        let event = KeyEvent::new(KeyCode::new(raw.code), event_type, now);
                        if self.event_tx.send(event).is_ok() {
                            event_count += 1;
                        }
                    }
                }
            }
        }

        event_count
    }

    /// Turn a raw kernel event into a press/release transition, dropping
    /// non-key events, auto-repeats, and duplicate transitions.
    fn transition(pressed: &mut HashSet<u16>, raw: RawKeyEvent) -> Option<KeyEventType> {
        if raw.event_type != EV_KEY || raw.value == VALUE_REPEAT {
            return None;
        }
        if raw.value != 0 {
            pressed.insert(raw.code).then_some(KeyEventType::Press)
        } else {
            pressed.remove(&raw.code).then_some(KeyEventType::Release)
        }
    }
}

/// Get a status message about evdev availability
pub fn evdev_status() -> String {
    match find_keyboard_devices() {
        Ok(devices) => format!("{} keyboard device(s) found", devices.len()),
        Err(EvdevError::NoDevices) => "No keyboard devices found".to_string(),
        Err(EvdevError::PermissionDenied(_)) => {
            "Permission denied - run with sudo or add user to 'input' group".to_string()
        }
        Err(e) => format!("Error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event_type: u16, code: u16, value: i32) -> Vec<u8> {
        let mut bytes = vec![0u8; INPUT_EVENT_SIZE - 8];
        bytes.extend_from_slice(&event_type.to_ne_bytes());
        bytes.extend_from_slice(&code.to_ne_bytes());
        bytes.extend_from_slice(&value.to_ne_bytes());
        bytes
    }

    #[test]
    fn parse_reads_trailing_fields() {
        let raw = RawKeyEvent::parse(&record(EV_KEY, 30, 1)).unwrap();
        assert_eq!(raw, RawKeyEvent { event_type: EV_KEY, code: 30, value: 1 });
        assert!(RawKeyEvent::parse(&[0u8; 4]).is_none());
    }

    #[test]
    fn transition_skips_repeats_and_duplicates() {
        let mut pressed = HashSet::new();
        let down = RawKeyEvent { event_type: EV_KEY, code: 30, value: 1 };
        let repeat = RawKeyEvent { value: VALUE_REPEAT, ..down };
        let up = RawKeyEvent { value: 0, ..down };

        assert_eq!(EvdevListener::transition(&mut pressed, down), Some(KeyEventType::Press));
        assert_eq!(EvdevListener::transition(&mut pressed, repeat), None);
        assert_eq!(EvdevListener::transition(&mut pressed, down), None);
        assert_eq!(EvdevListener::transition(&mut pressed, up), Some(KeyEventType::Release));
        assert_eq!(EvdevListener::transition(&mut pressed, up), None);
    }

    #[test]
    fn transition_ignores_non_key_events() {
        let mut pressed = HashSet::new();
        let sync = RawKeyEvent { event_type: 0, code: 0, value: 0 };
        assert_eq!(EvdevListener::transition(&mut pressed, sync), None);
        assert!(pressed.is_empty());
    }

    #[test]
    fn open_devices_keeps_only_opened_paths() {
        let present = std::env::temp_dir().join(format!("keys-check-event-{}", std::process::id()));
        fs::write(&present, b"").unwrap();
        let missing = PathBuf::from("/dev/input/keys-check-missing-event");

        let (devices, paths) = open_devices(vec![missing, present.clone()]).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(paths, vec![present.clone()]);

        let _ = fs::remove_file(&present);
    }

    #[test]
    fn test_evdev_status() {
        let status = evdev_status();
        assert!(!status.is_empty());
    }
}
