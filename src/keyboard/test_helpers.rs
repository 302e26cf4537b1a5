//! Shared test utilities for keyboard modules
//!
//! Provides common helper functions for creating test events and fixtures.

use super::highlight::Highlighter;
use super::{KeyCode, KeyEvent, KeyEventType};
use std::time::Instant;

/// Key code by standard name; panics on unknown names
pub fn key(name: &str) -> KeyCode {
    KeyCode::from_name(name).unwrap_or_else(|| panic!("unknown key name {}", name))
}

/// Creates a key press event stamped now
pub fn press(key: KeyCode) -> KeyEvent {
    KeyEvent::new(key, KeyEventType::Press, Instant::now())
}

/// Creates a key release event stamped now
pub fn release(key: KeyCode) -> KeyEvent {
    KeyEvent::new(key, KeyEventType::Release, Instant::now())
}

/// Press and release a key through the highlighter
pub fn tap(highlighter: &mut Highlighter, key: KeyCode) {
    highlighter.handle_event(&mut press(key));
    highlighter.handle_event(&mut release(key));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_creates_press_event() {
        let event = press(KeyCode(30));
        assert_eq!(event.key, KeyCode(30));
        assert_eq!(event.event_type, KeyEventType::Press);
    }

    #[test]
    fn release_creates_release_event() {
        let event = release(key("KeyS"));
        assert_eq!(event.key, KeyCode(31));
        assert_eq!(event.event_type, KeyEventType::Release);
    }
}
