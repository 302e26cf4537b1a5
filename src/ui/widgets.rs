//! Custom TUI widgets

use super::app::RequestPhase;
use super::chooser::DeviceChooser;
use super::theme::ThemeColors;
use super::toast::{Notifications, ToastKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

/// Title line with the theme indicator
pub struct Header {
    dark: bool,
    colors: ThemeColors,
}

impl Header {
    pub fn new(dark: bool, colors: ThemeColors) -> Self {
        Self { dark, colors }
    }
}

impl Widget for Header {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let icon = if self.dark { "\u{2600}" } else { "\u{263E}" };
        let line = Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(self.colors.accent)),
            Span::styled(
                "Keys Check",
                Style::default()
                    .fg(self.colors.fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// Device request button, press counter and connected keyboard
pub struct AccessPanel<'a> {
    press_count: u64,
    keyboard_name: &'a str,
    phase: RequestPhase,
    colors: ThemeColors,
}

impl<'a> AccessPanel<'a> {
    pub fn new(press_count: u64, keyboard_name: &'a str, phase: RequestPhase, colors: ThemeColors) -> Self {
        Self {
            press_count,
            keyboard_name,
            phase,
            colors,
        }
    }
}

impl<'a> Widget for AccessPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let c = self.colors;
        let button = match self.phase {
            RequestPhase::Idle => " [Ctrl+U] Request USB Device Access ",
            RequestPhase::Enumerating => " Looking for USB keyboards... ",
            RequestPhase::Choosing => " Choose a keyboard ",
        };
        let label = Style::default().fg(c.dim);
        let value = Style::default().fg(c.fg).add_modifier(Modifier::BOLD);

        let lines = [
            Line::from(Span::styled(button, Style::default().fg(c.bg).bg(c.accent))),
            Line::from(vec![
                Span::styled("Key press counter: ", label),
                Span::styled(self.press_count.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Current Keyboard: ", label),
                Span::styled(self.keyboard_name, value),
            ]),
        ];

        for (i, line) in lines.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }
            buf.set_line(area.x + 1, y, line, area.width.saturating_sub(1));
        }
    }
}

/// Toasts stacked in the top-right corner of `area`
pub struct ToastStack<'a> {
    notifications: &'a Notifications,
    colors: ThemeColors,
}

impl<'a> ToastStack<'a> {
    pub fn new(notifications: &'a Notifications, colors: ThemeColors) -> Self {
        Self {
            notifications,
            colors,
        }
    }
}

impl<'a> Widget for ToastStack<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y;
        for toast in self.notifications.active() {
            if y + 3 > area.y + area.height {
                break;
            }
            let (symbol, color) = match toast.kind {
                ToastKind::Success => ("\u{2714}", self.colors.green),
                ToastKind::Error => ("\u{2716}", self.colors.red),
            };
            let text = format!(
                " {} {}  {} ",
                symbol,
                toast.message,
                toast.shown_at.format("%H:%M:%S")
            );
            let width = (text.chars().count() as u16 + 2).min(area.width);
            let rect = Rect::new(area.x + area.width - width, y, width, 3);

            Clear.render(rect, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(self.colors.bg));
            let inner = block.inner(rect);
            block.render(rect, buf);
            buf.set_stringn(
                inner.x,
                inner.y,
                &text,
                inner.width as usize,
                Style::default().fg(self.colors.fg),
            );
            buf.set_stringn(inner.x + 1, inner.y, symbol, 1, Style::default().fg(color));
            y += 3;
        }
    }
}

/// Popup listing the devices a request found
pub struct DeviceChooserPopup<'a> {
    chooser: &'a DeviceChooser,
    colors: ThemeColors,
}

impl<'a> DeviceChooserPopup<'a> {
    pub fn new(chooser: &'a DeviceChooser, colors: ThemeColors) -> Self {
        Self { chooser, colors }
    }
}

impl<'a> Widget for DeviceChooserPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let c = self.colors;
        let rows = self.chooser.devices().len() as u16;
        let height = (rows + 4).min(area.height);
        let width = 60.min(area.width);
        let rect = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        Clear.render(rect, buf);
        let block = Block::default()
            .title(" Select a USB keyboard ")
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(c.accent))
            .style(Style::default().bg(c.bg));
        let inner = block.inner(rect);
        block.render(rect, buf);

        for (i, device) in self.chooser.devices().iter().enumerate() {
            let y = inner.y + i as u16;
            if y + 1 >= inner.y + inner.height {
                break;
            }
            let selected = i == self.chooser.selected_index();
            let style = if selected {
                Style::default().fg(c.bg).bg(c.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(c.fg)
            };
            let text = format!(
                " {} {:04x}:{:04x}  {}",
                if selected { "\u{25B6}" } else { " " },
                device.vendor_id,
                device.product_id,
                device.display_name()
            );
            buf.set_stringn(inner.x, y, format!("{:<w$}", text, w = inner.width as usize), inner.width as usize, style);
        }

        if inner.height > 0 {
            buf.set_stringn(
                inner.x,
                inner.y + inner.height - 1,
                " \u{2191}\u{2193} select   Enter connect   Esc cancel",
                inner.width as usize,
                Style::default().fg(c.dim),
            );
        }
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    listener: &'a str,
    elapsed: &'a str,
    tested: usize,
    total: usize,
    colors: ThemeColors,
}

impl<'a> StatusBar<'a> {
    pub fn new(listener: &'a str, elapsed: &'a str, tested: usize, total: usize, colors: ThemeColors) -> Self {
        Self {
            listener,
            elapsed,
            tested,
            total,
            colors,
        }
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(self.colors.dim).fg(self.colors.bg);
        for x in area.x..area.x + area.width {
            buf.set_string(x, area.y, " ", bg_style);
        }

        let left = " ^U device | ^D dark mode | ^Q quit ";
        buf.set_string(area.x, area.y, left, bg_style.add_modifier(Modifier::BOLD));

        let right = format!(
            " {} | Tested {}/{} | {} ",
            self.listener, self.tested, self.total, self.elapsed
        );
        let right_x = area.x + area.width.saturating_sub(right.chars().count() as u16);
        buf.set_string(right_x, area.y, &right, bg_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::UsbDevice;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn access_panel_shows_counter_and_name() {
        let area = Rect::new(0, 0, 50, 3);
        let mut buf = Buffer::empty(area);
        AccessPanel::new(42, "Model X", RequestPhase::Idle, ThemeColors::light()).render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Request USB Device Access"));
        assert!(out.contains("Key press counter: 42"));
        assert!(out.contains("Current Keyboard: Model X"));
    }

    #[test]
    fn toast_stack_renders_messages() {
        let mut notifications = Notifications::default();
        notifications.error("Failed to request USB device access!");
        let area = Rect::new(0, 0, 70, 10);
        let mut buf = Buffer::empty(area);
        ToastStack::new(&notifications, ThemeColors::dark()).render(area, &mut buf);
        assert!(text(&buf).contains("Failed to request USB device access!"));
    }

    #[test]
    fn chooser_popup_lists_devices() {
        let chooser = DeviceChooser::new(vec![UsbDevice {
            bus_id: "1-1".to_string(),
            vendor_id: 0x046d,
            product_id: 0xc31c,
            manufacturer_name: None,
            product_name: Some("USB Keyboard".to_string()),
            serial_number: None,
        }])
        .unwrap();
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        DeviceChooserPopup::new(&chooser, ThemeColors::light()).render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("046d:c31c  USB Keyboard"));
        assert!(out.contains("Esc cancel"));
    }

    #[test]
    fn status_bar_reports_coverage() {
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new("evdev", "01:05", 3, 103, ThemeColors::dark()).render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Tested 3/103"));
        assert!(out.contains("01:05"));
    }
}
