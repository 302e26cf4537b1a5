//! Physical key codes and their standard names

/// Represents a physical key code (Linux evdev scancode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

/// Scancode reported for keys the listener could not translate
pub const UNKNOWN_KEY: KeyCode = KeyCode(0);

/// Standard physical key code names, indexed by scancode.
///
/// Names follow the layout-independent `KeyboardEvent.code` convention, so
/// `KeyA` is the key left of `KeyS` regardless of the active keymap.
static KEY_NAMES: &[(u16, &str)] = &[
    (1, "Escape"),
    (2, "Digit1"),
    (3, "Digit2"),
    (4, "Digit3"),
    (5, "Digit4"),
    (6, "Digit5"),
    (7, "Digit6"),
    (8, "Digit7"),
    (9, "Digit8"),
    (10, "Digit9"),
    (11, "Digit0"),
    (12, "Minus"),
    (13, "Equal"),
    (14, "Backspace"),
    (15, "Tab"),
    (16, "KeyQ"),
    (17, "KeyW"),
    (18, "KeyE"),
    (19, "KeyR"),
    (20, "KeyT"),
    (21, "KeyY"),
    (22, "KeyU"),
    (23, "KeyI"),
    (24, "KeyO"),
    (25, "KeyP"),
    (26, "BracketLeft"),
    (27, "BracketRight"),
    (28, "Enter"),
    (29, "ControlLeft"),
    (30, "KeyA"),
    (31, "KeyS"),
    (32, "KeyD"),
    (33, "KeyF"),
    (34, "KeyG"),
    (35, "KeyH"),
    (36, "KeyJ"),
    (37, "KeyK"),
    (38, "KeyL"),
    (39, "Semicolon"),
    (40, "Quote"),
    (41, "Backquote"),
    (42, "ShiftLeft"),
    (43, "Backslash"),
    (44, "KeyZ"),
    (45, "KeyX"),
    (46, "KeyC"),
    (47, "KeyV"),
    (48, "KeyB"),
    (49, "KeyN"),
    (50, "KeyM"),
    (51, "Comma"),
    (52, "Period"),
    (53, "Slash"),
    (54, "ShiftRight"),
    (55, "NumpadMultiply"),
    (56, "AltLeft"),
    (57, "Space"),
    (58, "CapsLock"),
    (59, "F1"),
    (60, "F2"),
    (61, "F3"),
    (62, "F4"),
    (63, "F5"),
    (64, "F6"),
    (65, "F7"),
    (66, "F8"),
    (67, "F9"),
    (68, "F10"),
    (69, "NumLock"),
    (70, "ScrollLock"),
    (71, "Numpad7"),
    (72, "Numpad8"),
    (73, "Numpad9"),
    (74, "NumpadSubtract"),
    (75, "Numpad4"),
    (76, "Numpad5"),
    (77, "Numpad6"),
    (78, "NumpadAdd"),
    (79, "Numpad1"),
    (80, "Numpad2"),
    (81, "Numpad3"),
    (82, "Numpad0"),
    (83, "NumpadDecimal"),
    (86, "IntlBackslash"),
    (87, "F11"),
    (88, "F12"),
    (96, "NumpadEnter"),
    (97, "ControlRight"),
    (98, "NumpadDivide"),
    (99, "PrintScreen"),
    (100, "AltRight"),
    (102, "Home"),
    (103, "ArrowUp"),
    (104, "PageUp"),
    (105, "ArrowLeft"),
    (106, "ArrowRight"),
    (107, "End"),
    (108, "ArrowDown"),
    (109, "PageDown"),
    (110, "Insert"),
    (111, "Delete"),
    (119, "Pause"),
    (125, "MetaLeft"),
    (126, "MetaRight"),
    (127, "ContextMenu"),
    (464, "Fn"),
];

impl KeyCode {
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    /// Standard physical code name (`"KeyA"`, `"F1"`, `"Digit1"`, ...)
    pub fn name(&self) -> Option<&'static str> {
        KEY_NAMES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
    }

    /// Look up a key code by its standard physical code name
    pub fn from_name(name: &str) -> Option<Self> {
        KEY_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(code, _)| Self(*code))
    }

    /// Translate a terminal key event into the physical key it most likely
    /// came from.
    ///
    /// Terminals report logical keys, so this is best effort: characters are
    /// mapped through a US layout and modifier-only events are not reported
    /// at all by most terminals.
    pub fn from_terminal(code: &crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode as CT;

        let name = match code {
            CT::F(n @ 1..=12) => return Self::from_name(&format!("F{}", n)),
            CT::Esc => "Escape",
            CT::Tab | CT::BackTab => "Tab",
            CT::Backspace => "Backspace",
            CT::Enter => "Enter",
            CT::CapsLock => "CapsLock",
            CT::NumLock => "NumLock",
            CT::ScrollLock => "ScrollLock",
            CT::PrintScreen => "PrintScreen",
            CT::Pause => "Pause",
            CT::Menu => "ContextMenu",
            CT::Insert => "Insert",
            CT::Delete => "Delete",
            CT::Home => "Home",
            CT::End => "End",
            CT::PageUp => "PageUp",
            CT::PageDown => "PageDown",
            CT::Up => "ArrowUp",
            CT::Down => "ArrowDown",
            CT::Left => "ArrowLeft",
            CT::Right => "ArrowRight",
            CT::Char(c) => return Self::from_char(*c),
            _ => return None,
        };
        Self::from_name(name)
    }

    fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() {
            return Self::from_name(&format!("Key{}", c.to_ascii_uppercase()));
        }
        if c.is_ascii_digit() {
            return Self::from_name(&format!("Digit{}", c));
        }
        let name = match c {
            ' ' => "Space",
            '`' | '~' => "Backquote",
            '-' | '_' => "Minus",
            '=' | '+' => "Equal",
            '[' | '{' => "BracketLeft",
            ']' | '}' => "BracketRight",
            '\\' | '|' => "Backslash",
            ';' | ':' => "Semicolon",
            '\'' | '"' => "Quote",
            ',' | '<' => "Comma",
            '.' | '>' => "Period",
            '/' | '?' => "Slash",
            '!' => "Digit1",
            '@' => "Digit2",
            '#' => "Digit3",
            '$' => "Digit4",
            '%' => "Digit5",
            '^' => "Digit6",
            '&' => "Digit7",
            '*' => "Digit8",
            '(' => "Digit9",
            ')' => "Digit0",
            _ => return None,
        };
        Self::from_name(name)
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Scancode({})", self.0),
        }
    }
}

impl From<device_query::Keycode> for KeyCode {
    fn from(keycode: device_query::Keycode) -> Self {
        use device_query::Keycode as DK;
        // Map device_query keycodes to Linux evdev scancodes
        let code = match keycode {
            DK::Escape => 1,
            DK::Key1 => 2,
            DK::Key2 => 3,
            DK::Key3 => 4,
            DK::Key4 => 5,
            DK::Key5 => 6,
            DK::Key6 => 7,
            DK::Key7 => 8,
            DK::Key8 => 9,
            DK::Key9 => 10,
            DK::Key0 => 11,
            DK::Minus => 12,
            DK::Equal => 13,
            DK::Backspace => 14,
            DK::Tab => 15,
            DK::Q => 16,
            DK::W => 17,
            DK::E => 18,
            DK::R => 19,
            DK::T => 20,
            DK::Y => 21,
            DK::U => 22,
            DK::I => 23,
            DK::O => 24,
            DK::P => 25,
            DK::LeftBracket => 26,
            DK::RightBracket => 27,
            DK::Enter => 28,
            DK::LControl => 29,
            DK::A => 30,
            DK::S => 31,
            DK::D => 32,
            DK::F => 33,
            DK::G => 34,
            DK::H => 35,
            DK::J => 36,
            DK::K => 37,
            DK::L => 38,
            DK::Semicolon => 39,
            DK::Apostrophe => 40,
            DK::Grave => 41,
            DK::LShift => 42,
            DK::BackSlash => 43,
            DK::Z => 44,
            DK::X => 45,
            DK::C => 46,
            DK::V => 47,
            DK::B => 48,
            DK::N => 49,
            DK::M => 50,
            DK::Comma => 51,
            DK::Dot => 52,
            DK::Slash => 53,
            DK::RShift => 54,
            DK::LAlt => 56,
            DK::Space => 57,
            DK::CapsLock => 58,
            DK::F1 => 59,
            DK::F2 => 60,
            DK::F3 => 61,
            DK::F4 => 62,
            DK::F5 => 63,
            DK::F6 => 64,
            DK::F7 => 65,
            DK::F8 => 66,
            DK::F9 => 67,
            DK::F10 => 68,
            DK::F11 => 87,
            DK::F12 => 88,
            DK::RControl => 97,
            DK::RAlt => 100,
            DK::Home => 102,
            DK::Up => 103,
            DK::PageUp => 104,
            DK::Left => 105,
            DK::Right => 106,
            DK::End => 107,
            DK::Down => 108,
            DK::PageDown => 109,
            DK::Insert => 110,
            DK::Delete => 111,
            DK::LMeta => 125,
            DK::RMeta => 126,
            // Numpad keys
            DK::Numpad0 => 82,
            DK::Numpad1 => 79,
            DK::Numpad2 => 80,
            DK::Numpad3 => 81,
            DK::Numpad4 => 75,
            DK::Numpad5 => 76,
            DK::Numpad6 => 77,
            DK::Numpad7 => 71,
            DK::Numpad8 => 72,
            DK::Numpad9 => 73,
            DK::NumpadSubtract => 74,
            DK::NumpadAdd => 78,
            DK::NumpadDivide => 98,
            DK::NumpadMultiply => 55,
            _ => return UNKNOWN_KEY,
        };
        Self(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode as CT;

    #[test]
    fn name_lookup_uses_physical_code_names() {
        assert_eq!(KeyCode(30).name(), Some("KeyA"));
        assert_eq!(KeyCode(2).name(), Some("Digit1"));
        assert_eq!(KeyCode(59).name(), Some("F1"));
        assert_eq!(KeyCode(464).name(), Some("Fn"));
        assert_eq!(KeyCode(999).name(), None);
    }

    #[test]
    fn from_name_reverses_name() {
        for (code, name) in KEY_NAMES {
            assert_eq!(KeyCode::from_name(name), Some(KeyCode(*code)));
        }
        assert_eq!(KeyCode::from_name("NotAKey"), None);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = KEY_NAMES.iter().map(|(_, n)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), KEY_NAMES.len());
    }

    #[test]
    fn display_falls_back_to_scancode() {
        assert_eq!(KeyCode(57).to_string(), "Space");
        assert_eq!(KeyCode(600).to_string(), "Scancode(600)");
    }

    #[test]
    fn device_query_keys_translate() {
        assert_eq!(KeyCode::from(device_query::Keycode::A), KeyCode(30));
        assert_eq!(KeyCode::from(device_query::Keycode::F12), KeyCode(88));
        assert_eq!(KeyCode::from(device_query::Keycode::Numpad0).name(), Some("Numpad0"));
    }

    #[test]
    fn terminal_keys_translate() {
        assert_eq!(KeyCode::from_terminal(&CT::F(5)).and_then(|k| k.name()), Some("F5"));
        assert_eq!(KeyCode::from_terminal(&CT::F(20)), None);
        assert_eq!(KeyCode::from_terminal(&CT::BackTab).and_then(|k| k.name()), Some("Tab"));
        assert_eq!(KeyCode::from_terminal(&CT::PageDown).and_then(|k| k.name()), Some("PageDown"));
        assert_eq!(KeyCode::from_terminal(&CT::Char('A')).and_then(|k| k.name()), Some("KeyA"));
        assert_eq!(KeyCode::from_terminal(&CT::Char('?')).and_then(|k| k.name()), Some("Slash"));
        assert_eq!(KeyCode::from_terminal(&CT::Char('7')).and_then(|k| k.name()), Some("Digit7"));
        assert_eq!(KeyCode::from_terminal(&CT::Char('é')), None);
    }
}
