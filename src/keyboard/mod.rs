//! Keyboard events, layout, and highlighting

pub mod board;
mod event;
#[cfg(target_os = "linux")]
mod evdev_listener;
pub mod highlight;
pub mod keymap;
pub mod layout;
mod source;
#[cfg(test)]
pub(crate) mod test_helpers;

pub use board::{KeyAppearance, KeyElement, KeyVisual, VisualBoard};
pub use event::{KeyEvent, KeyEventType, KeyboardListener};
#[cfg(target_os = "linux")]
pub use evdev_listener::{evdev_status, EvdevError, EvdevListener};
pub use highlight::{is_suppressed, Highlighter, SUPPRESSED_KEYS};
pub use keymap::KeyCode;
pub use layout::{Layout, SectionKind};
pub use source::KeySource;
