//! Static keyboard layout definition
//!
//! The layout is declarative: three sections (main block, navigation
//! cluster, numeric pad), each six rows tall, where every slot is either a
//! key tagged with its physical code or an empty gap. Nothing here is
//! computed from the environment.

use super::KeyCode;

/// Standard key width in character cells
pub const KEY_WIDTH: u16 = 4;

/// Rows per section
pub const SECTION_ROWS: usize = 6;

/// The three blocks of a full-size keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Function row and alphanumeric block
    Main,
    /// Print/Scroll/Pause, editing keys and arrows
    Navigation,
    /// Numeric keypad
    Numpad,
}

/// A single position in a layout row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A key with its label and width in cells
    Key {
        code: KeyCode,
        label: &'static str,
        width: u16,
    },
    /// Empty space of the given width in cells
    Gap(u16),
}

impl Slot {
    pub fn width(&self) -> u16 {
        match self {
            Self::Key { width, .. } => *width,
            Self::Gap(width) => *width,
        }
    }
}

/// One block of keys
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub rows: [Vec<Slot>; SECTION_ROWS],
}

/// A complete keyboard layout
#[derive(Debug, Clone)]
pub struct Layout {
    pub sections: Vec<Section>,
}

/// Standard-width key by physical code name.
///
/// Every name used in the layout tables is present in the keymap; the
/// layout tests check this.
fn key(name: &'static str, label: &'static str) -> Slot {
    wide(name, label, KEY_WIDTH)
}

fn wide(name: &'static str, label: &'static str, width: u16) -> Slot {
    Slot::Key {
        code: KeyCode::from_name(name).unwrap_or(super::keymap::UNKNOWN_KEY),
        label,
        width,
    }
}

fn main_block() -> Section {
    let w = KEY_WIDTH;
    Section {
        kind: SectionKind::Main,
        rows: [
            vec![
                key("Escape", "Esc"),
                Slot::Gap(w),
                key("F1", "F1"),
                key("F2", "F2"),
                key("F3", "F3"),
                key("F4", "F4"),
                Slot::Gap(1),
                key("F5", "F5"),
                key("F6", "F6"),
                key("F7", "F7"),
                key("F8", "F8"),
                Slot::Gap(1),
                key("F9", "F9"),
                key("F10", "F10"),
                key("F11", "F11"),
                key("F12", "F12"),
            ],
            vec![
                key("Backquote", "`"),
                key("Digit1", "1"),
                key("Digit2", "2"),
                key("Digit3", "3"),
                key("Digit4", "4"),
                key("Digit5", "5"),
                key("Digit6", "6"),
                key("Digit7", "7"),
                key("Digit8", "8"),
                key("Digit9", "9"),
                key("Digit0", "0"),
                key("Minus", "-"),
                key("Equal", "="),
                wide("Backspace", "Bksp", w + 3),
            ],
            vec![
                wide("Tab", "Tab", w + 1),
                key("KeyQ", "Q"),
                key("KeyW", "W"),
                key("KeyE", "E"),
                key("KeyR", "R"),
                key("KeyT", "T"),
                key("KeyY", "Y"),
                key("KeyU", "U"),
                key("KeyI", "I"),
                key("KeyO", "O"),
                key("KeyP", "P"),
                key("BracketLeft", "["),
                key("BracketRight", "]"),
                wide("Backslash", "\\", w + 1),
            ],
            vec![
                wide("CapsLock", "Caps", w + 2),
                key("KeyA", "A"),
                key("KeyS", "S"),
                key("KeyD", "D"),
                key("KeyF", "F"),
                key("KeyG", "G"),
                key("KeyH", "H"),
                key("KeyJ", "J"),
                key("KeyK", "K"),
                key("KeyL", "L"),
                key("Semicolon", ";"),
                key("Quote", "'"),
                wide("Enter", "Enter", w + 4),
            ],
            vec![
                wide("ShiftLeft", "Shift", w + 4),
                key("KeyZ", "Z"),
                key("KeyX", "X"),
                key("KeyC", "C"),
                key("KeyV", "V"),
                key("KeyB", "B"),
                key("KeyN", "N"),
                key("KeyM", "M"),
                key("Comma", ","),
                key("Period", "."),
                key("Slash", "/"),
                wide("ShiftRight", "Shift", w + 7),
            ],
            vec![
                wide("ControlLeft", "Ctrl", w + 1),
                wide("MetaLeft", "Win", w + 1),
                wide("AltLeft", "Alt", w + 1),
                wide("Space", "", (w + 1) * 6 - 1),
                wide("AltRight", "Alt", w + 1),
                wide("ControlRight", "Ctrl", w + 1),
                wide("Fn", "Fn", w + 1),
            ],
        ],
    }
}

fn navigation_cluster() -> Section {
    Section {
        kind: SectionKind::Navigation,
        rows: [
            vec![
                key("PrintScreen", "Prt"),
                key("ScrollLock", "Scr"),
                key("Pause", "Pse"),
            ],
            vec![
                key("Insert", "Ins"),
                key("Home", "Home"),
                key("PageUp", "PgUp"),
            ],
            vec![
                key("Delete", "Del"),
                key("End", "End"),
                key("PageDown", "PgDn"),
            ],
            vec![],
            vec![Slot::Gap(KEY_WIDTH), key("ArrowUp", "\u{2191}")],
            vec![
                key("ArrowLeft", "\u{2190}"),
                key("ArrowDown", "\u{2193}"),
                key("ArrowRight", "\u{2192}"),
            ],
        ],
    }
}

fn numeric_pad() -> Section {
    Section {
        kind: SectionKind::Numpad,
        rows: [
            vec![],
            vec![
                key("NumLock", "Num"),
                key("NumpadDivide", "/"),
                key("NumpadMultiply", "*"),
                key("NumpadSubtract", "-"),
            ],
            vec![
                key("Numpad7", "7"),
                key("Numpad8", "8"),
                key("Numpad9", "9"),
                key("NumpadAdd", "+"),
            ],
            vec![key("Numpad4", "4"), key("Numpad5", "5"), key("Numpad6", "6")],
            vec![
                key("Numpad1", "1"),
                key("Numpad2", "2"),
                key("Numpad3", "3"),
                key("NumpadEnter", "Ent"),
            ],
            vec![wide("Numpad0", "0", KEY_WIDTH * 2 + 1), key("NumpadDecimal", ".")],
        ],
    }
}

impl Layout {
    /// Full-size US keyboard: main block, navigation cluster, numeric pad
    pub fn standard() -> Self {
        Self {
            sections: vec![main_block(), navigation_cluster(), numeric_pad()],
        }
    }

    /// All keys in the layout, in section/row/column order
    pub fn keys(&self) -> impl Iterator<Item = (SectionKind, usize, &Slot)> {
        self.sections.iter().flat_map(|section| {
            section.rows.iter().enumerate().flat_map(move |(row, slots)| {
                slots
                    .iter()
                    .filter(|slot| matches!(slot, Slot::Key { .. }))
                    .map(move |slot| (section.kind, row, slot))
            })
        })
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}
