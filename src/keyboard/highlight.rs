//! Key-event highlighter
//!
//! Turns press/release events into visual state on the [`VisualBoard`] and
//! counts completed presses. Keys on the suppression list have their default
//! action cancelled before any highlighting happens.

use super::board::VisualBoard;
use super::{KeyCode, KeyEvent, KeyEventType};

/// Keys whose default action is cancelled when pressed.
///
/// These would otherwise trigger terminal or host side effects (focus
/// changes, scrolling, lock toggles) while the user is testing them.
pub const SUPPRESSED_KEYS: &[&str] = &[
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
    "Tab", "CapsLock", "Backspace", "PrintScreen", "ScrollLock", "Pause",
    "Insert", "Home", "PageUp", "Delete", "End", "PageDown", "NumLock", "Fn",
];

/// Whether a key's default action is suppressed
pub fn is_suppressed(code: KeyCode) -> bool {
    code.name().is_some_and(|name| SUPPRESSED_KEYS.contains(&name))
}

/// Maps key events onto the board and keeps the press counter
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    board: VisualBoard,
    press_count: u64,
}

impl Highlighter {
    pub fn new(board: VisualBoard) -> Self {
        Self {
            board,
            press_count: 0,
        }
    }

    /// Cancel the default action of suppressed keys
    pub fn prevent_defaults(event: &mut KeyEvent) {
        if is_suppressed(event.key) {
            event.prevent_default();
        }
    }

    /// Handle a key press: suppress, then mark the element as pressed
    pub fn handle_key_down(&mut self, event: &mut KeyEvent) {
        Self::prevent_defaults(event);
        if let Some(element) = self.board.element_mut(event.key) {
            element.visual.highlighted = true;
            element.visual.down = true;
        }
    }

    /// Handle a key release: mark the element as released and count the
    /// press. Keys without an element are ignored.
    pub fn handle_key_up(&mut self, event: &KeyEvent) {
        if let Some(element) = self.board.element_mut(event.key) {
            element.visual.down = false;
            element.visual.released = true;
            self.press_count += 1;
        }
    }

    pub fn handle_event(&mut self, event: &mut KeyEvent) {
        match event.event_type {
            KeyEventType::Press => self.handle_key_down(event),
            KeyEventType::Release => self.handle_key_up(event),
        }
    }

    pub fn press_count(&self) -> u64 {
        self.press_count
    }

    pub fn board(&self) -> &VisualBoard {
        &self.board
    }
}
