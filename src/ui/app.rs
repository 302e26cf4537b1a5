//! Main application state and logic

use super::chooser::DeviceChooser;
use super::theme::ThemeColors;
use super::toast::Notifications;
use crate::config::{Config, Theme};
use crate::device::{self, DeviceError, DeviceFilter, DeviceRequest, UsbBackend, UsbDevice};
use crate::keyboard::{is_suppressed, Highlighter, KeyCode, KeyEvent, VisualBoard};
use crossterm::event::{KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;

pub const DEVICE_CONNECTED_MESSAGE: &str = "USB Device Successfully Connected!";
pub const DEVICE_FAILED_MESSAGE: &str = "Failed to request USB device access!";

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// What happened to a key read from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The key is on the suppression list; no binding ran
    Suppressed,
    /// A binding ran
    Handled,
    /// No binding for this key
    Ignored,
}

/// Where the device request currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Enumerating,
    Choosing,
}

/// Main application
pub struct App {
    /// Application state
    pub state: AppState,
    /// Configuration
    pub config: Config,
    /// Key highlighting and press counting
    highlighter: Highlighter,
    /// Product name of the last successfully selected device
    keyboard_name: String,
    /// Last successfully selected device
    connected_device: Option<UsbDevice>,
    /// Toast notifications
    pub notifications: Notifications,
    theme: Theme,
    backend: Arc<dyn UsbBackend>,
    pending_request: Option<DeviceRequest>,
    chooser: Option<DeviceChooser>,
    /// Application start time
    pub start_time: Instant,
    /// Name of the active key listener, for the status bar
    pub listener_name: String,
}

impl App {
    pub fn new(config: Config) -> Self {
        let backend = device::platform_backend(&config.device);
        Self::with_backend(config, backend)
    }

    /// Create an app reading devices from the given backend
    pub fn with_backend(config: Config, backend: Arc<dyn UsbBackend>) -> Self {
        Self {
            state: AppState::Running,
            highlighter: Highlighter::new(VisualBoard::default()),
            keyboard_name: String::new(),
            connected_device: None,
            notifications: Notifications::new(config.toast_duration(), config.ui.max_toasts),
            theme: config.ui.theme,
            backend,
            pending_request: None,
            chooser: None,
            start_time: Instant::now(),
            listener_name: String::from("none"),
            config,
        }
    }

    /// Process a keyboard event from the key listener
    pub fn process_event(&mut self, event: &mut KeyEvent) {
        self.highlighter.handle_event(event);
        if event.default_prevented() {
            log::trace!("default action suppressed for {}", event.key);
        }
    }

    pub fn press_count(&self) -> u64 {
        self.highlighter.press_count()
    }

    pub fn keyboard_name(&self) -> &str {
        &self.keyboard_name
    }

    pub fn connected_device(&self) -> Option<&UsbDevice> {
        self.connected_device.as_ref()
    }

    pub fn board(&self) -> &VisualBoard {
        self.highlighter.board()
    }

    pub fn chooser(&self) -> Option<&DeviceChooser> {
        self.chooser.as_ref()
    }

    pub fn request_phase(&self) -> RequestPhase {
        if self.chooser.is_some() {
            RequestPhase::Choosing
        } else if self.pending_request.is_some() {
            RequestPhase::Enumerating
        } else {
            RequestPhase::Idle
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_theme(self.theme)
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn toggle_dark_mode(&mut self) {
        self.theme = self.theme.toggled();
        log::debug!("theme switched to {:?}", self.theme);
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Start a device request for USB boot keyboards.
    ///
    /// Ignored while another request is still open.
    pub fn request_device(&mut self) {
        if self.request_phase() != RequestPhase::Idle {
            log::debug!("device request already in progress");
            return;
        }
        log::info!("requesting USB keyboard access");
        self.pending_request = Some(DeviceRequest::spawn(
            Arc::clone(&self.backend),
            vec![DeviceFilter::HID_KEYBOARD],
        ));
    }

    /// Check on a pending device request; call once per tick
    pub fn poll_device_request(&mut self) {
        let Some(result) = self
            .pending_request
            .as_ref()
            .and_then(DeviceRequest::try_resolve)
        else {
            return;
        };
        self.pending_request = None;

        match result {
            Ok(devices) => {
                log::debug!("{} matching device(s)", devices.len());
                match DeviceChooser::new(devices) {
                    Some(chooser) => self.chooser = Some(chooser),
                    None => self.resolve_device_request(Err(DeviceError::NoMatchingDevice)),
                }
            }
            Err(e) => self.resolve_device_request(Err(e)),
        }
    }

    /// Confirm the device highlighted in the chooser
    pub fn choose_device(&mut self) {
        if let Some(chooser) = self.chooser.take() {
            self.resolve_device_request(Ok(chooser.into_selected()));
        }
    }

    /// Dismiss the chooser without selecting
    pub fn cancel_chooser(&mut self) {
        if self.chooser.take().is_some() {
            self.resolve_device_request(Err(DeviceError::Cancelled));
        }
    }

    /// Apply the outcome of a device request
    pub fn resolve_device_request(&mut self, outcome: Result<UsbDevice, DeviceError>) {
        match outcome {
            Ok(device) => {
                match serde_json::to_string(&device) {
                    Ok(json) => log::debug!("device: {}", json),
                    Err(e) => log::debug!("device not serializable: {}", e),
                }
                log::info!(
                    "manufacturer: {}",
                    device.manufacturer_name.as_deref().unwrap_or("<none>")
                );
                log::info!(
                    "product: {}",
                    device.product_name.as_deref().unwrap_or("<none>")
                );
                self.keyboard_name = device.product_name.clone().unwrap_or_default();
                self.connected_device = Some(device);
                self.notifications.success(DEVICE_CONNECTED_MESSAGE);
            }
            Err(e) => {
                log::error!("device request failed: {}", e);
                self.notifications.error(DEVICE_FAILED_MESSAGE);
            }
        }
    }

    /// Handle a key read from the terminal.
    ///
    /// Suppressed keys are swallowed before any binding is considered, the
    /// same way the key listener cancels their default action.
    pub fn handle_terminal_key(&mut self, key: CtKeyEvent) -> KeyDisposition {
        if KeyCode::from_terminal(&key.code).is_some_and(is_suppressed) {
            return KeyDisposition::Suppressed;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                CtKeyCode::Char('q') | CtKeyCode::Char('c') => self.quit(),
                CtKeyCode::Char('u') => self.request_device(),
                CtKeyCode::Char('d') => self.toggle_dark_mode(),
                _ => return KeyDisposition::Ignored,
            }
            return KeyDisposition::Handled;
        }

        let Some(chooser) = self.chooser.as_mut() else {
            return KeyDisposition::Ignored;
        };
        match key.code {
            CtKeyCode::Down => chooser.next(),
            CtKeyCode::Up => chooser.prev(),
            CtKeyCode::Enter => self.choose_device(),
            CtKeyCode::Esc => self.cancel_chooser(),
            _ => return KeyDisposition::Ignored,
        }
        KeyDisposition::Handled
    }

    /// Housekeeping run once per frame
    pub fn tick(&mut self) {
        self.poll_device_request();
        self.notifications.prune();
    }

    /// Get elapsed time formatted
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
