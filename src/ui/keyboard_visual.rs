//! Visual keyboard layout rendering

use super::theme::ThemeColors;
use crate::keyboard::{KeyAppearance, KeyElement, SectionKind, VisualBoard};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

/// Minimum rows needed to draw the board
pub const BOARD_HEIGHT: u16 = 6;

/// Visual representation of a keyboard
pub struct KeyboardVisual<'a> {
    board: &'a VisualBoard,
    colors: ThemeColors,
}

impl<'a> KeyboardVisual<'a> {
    pub fn new(board: &'a VisualBoard, colors: ThemeColors) -> Self {
        Self { board, colors }
    }

    fn key_style(&self, element: &KeyElement) -> Style {
        let c = &self.colors;
        match element.visual.appearance() {
            KeyAppearance::Pressed => Style::default()
                .fg(c.key_text_on)
                .bg(c.key_on)
                .add_modifier(Modifier::BOLD),
            KeyAppearance::Released => Style::default().fg(c.key_text_on).bg(c.key_released),
            KeyAppearance::Idle => Style::default().fg(c.key_text).bg(c.key_off),
        }
    }

    /// Sections that fit in `width`, dropping the numpad first and then the
    /// navigation cluster
    fn visible_sections(&self, width: u16) -> Vec<SectionKind> {
        let sections = self.board.sections();
        (1..=sections.len())
            .rev()
            .map(|n| &sections[..n])
            .find(|fit| fit.last().is_some_and(|s| s.x + s.width <= width))
            .map(|fit| fit.iter().map(|s| s.kind).collect())
            .unwrap_or_default()
    }
}

impl<'a> Widget for KeyboardVisual<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = self.visible_sections(area.width);
        if visible.is_empty() || area.height < BOARD_HEIGHT {
            buf.set_string(
                area.x,
                area.y,
                "\u{2328} Window too small",
                Style::default().fg(self.colors.fg),
            );
            return;
        }

        let shown_width = self
            .board
            .sections()
            .iter()
            .filter(|s| visible.contains(&s.kind))
            .map(|s| s.x + s.width)
            .max()
            .unwrap_or(0);
        let x0 = area.x + (area.width - shown_width) / 2;
        let y0 = area.y + (area.height - BOARD_HEIGHT) / 2;

        for element in self.board.elements() {
            if !visible.contains(&element.section) {
                continue;
            }
            let label = format!("{:^w$}", element.label, w = element.width as usize);
            buf.set_stringn(
                x0 + element.x,
                y0 + element.row,
                label,
                element.width as usize,
                self.key_style(element),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::test_helpers::{key, press};
    use crate::keyboard::Highlighter;

    fn render(board: &VisualBoard, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, BOARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        KeyboardVisual::new(board, ThemeColors::dark()).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn wide_area_shows_all_sections() {
        let board = VisualBoard::default();
        let buf = render(&board, board.width());
        let top = row_text(&buf, 0);
        assert!(top.contains("Esc"));
        assert!(top.contains("F12"));
        assert!(top.contains("Prt"));
        assert!(row_text(&buf, 1).contains("Num"));
    }

    #[test]
    fn narrow_area_drops_numpad_first() {
        let board = VisualBoard::default();
        let numpad = board.sections()[2];
        let buf = render(&board, numpad.x - 1);
        assert!(row_text(&buf, 0).contains("Prt"));
        assert!(!row_text(&buf, 1).contains("Num"));
    }

    #[test]
    fn tiny_area_shows_message() {
        let board = VisualBoard::default();
        let buf = render(&board, 20);
        assert!(row_text(&buf, 0).contains("Window too small"));
    }

    #[test]
    fn pressed_key_uses_pressed_colors() {
        let mut hl = Highlighter::default();
        hl.handle_key_down(&mut press(key("Escape")));
        let buf = render(hl.board(), hl.board().width());
        let colors = ThemeColors::dark();
        assert_eq!(buf[(0, 0)].bg, colors.key_on);
        // F1 untouched
        let f1 = hl.board().element(key("F1")).unwrap();
        assert_eq!(buf[(f1.x, 0)].bg, colors.key_off);
    }
}
