//! Theme color definitions for the UI
//!
//! Provides dark and light color palettes that can be switched at runtime.

use crate::config::Theme;
use ratatui::style::Color;

/// Complete color palette for the UI
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Main background
    pub bg: Color,
    /// Primary foreground text
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (headings, borders)
    pub accent: Color,
    /// Success toasts
    pub green: Color,
    /// Error toasts
    pub red: Color,
    /// Key idle (untested) background
    pub key_off: Color,
    /// Key pressed background
    pub key_on: Color,
    /// Key tested and released background
    pub key_released: Color,
    /// Key label text (idle/released)
    pub key_text: Color,
    /// Key label text (pressed)
    pub key_text_on: Color,
}

impl ThemeColors {
    /// Create a color palette for the given theme variant
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(30, 41, 59),
            fg: Color::Rgb(226, 232, 240),
            dim: Color::Rgb(100, 116, 139),
            accent: Color::Rgb(80, 200, 220),
            green: Color::Rgb(80, 200, 120),
            red: Color::Rgb(240, 90, 100),
            key_off: Color::Rgb(51, 65, 85),
            key_on: Color::Rgb(240, 180, 80),
            key_released: Color::Rgb(80, 200, 120),
            key_text: Color::Rgb(226, 232, 240),
            key_text_on: Color::Rgb(20, 20, 25),
        }
    }

    /// High contrast for bright terminals
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 248),
            fg: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(130, 130, 150),
            accent: Color::Rgb(0, 130, 160),
            green: Color::Rgb(30, 150, 70),
            red: Color::Rgb(200, 50, 60),
            key_off: Color::Rgb(220, 220, 228),
            key_on: Color::Rgb(180, 120, 0),
            key_released: Color::Rgb(30, 150, 70),
            key_text: Color::Rgb(50, 50, 60),
            key_text_on: Color::Rgb(255, 255, 255),
        }
    }
}
