//! On-screen key elements and the code-to-element table
//!
//! The board is built once from a [`Layout`]: element positions are
//! resolved up front and every key code gets a direct index into the
//! element list, so event handling never searches the layout.

use super::layout::{Layout, SectionKind, Slot, KEY_WIDTH};
use super::KeyCode;
use std::collections::HashMap;

/// Gap between key caps and between sections, in cells
const KEY_SPACING: u16 = 1;
const SECTION_SPACING: u16 = 3;

/// Visual state flags of one key element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyVisual {
    /// The key has been pressed at least once
    pub highlighted: bool,
    /// The key is currently held down
    pub down: bool,
    /// The key has been released at least once
    pub released: bool,
}

/// How a key element should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAppearance {
    /// Never touched
    Idle,
    /// Currently held down
    Pressed,
    /// Tested and released
    Released,
}

impl KeyVisual {
    pub fn appearance(&self) -> KeyAppearance {
        if self.down {
            KeyAppearance::Pressed
        } else if self.released {
            KeyAppearance::Released
        } else {
            KeyAppearance::Idle
        }
    }
}

/// A key as drawn on screen
#[derive(Debug, Clone)]
pub struct KeyElement {
    pub code: KeyCode,
    pub label: &'static str,
    pub section: SectionKind,
    /// Row within the section (0 = top)
    pub row: u16,
    /// Horizontal offset in cells from the left edge of the board
    pub x: u16,
    /// Width in cells
    pub width: u16,
    pub visual: KeyVisual,
}

/// Horizontal extent of one section on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionExtent {
    pub kind: SectionKind,
    pub x: u16,
    pub width: u16,
}

/// All key elements of a layout plus the lookup table addressing them
#[derive(Debug, Clone)]
pub struct VisualBoard {
    elements: Vec<KeyElement>,
    table: HashMap<KeyCode, usize>,
    sections: Vec<SectionExtent>,
}

impl VisualBoard {
    /// Resolve positions and build the code-to-element table
    pub fn from_layout(layout: &Layout) -> Self {
        let mut elements = Vec::new();
        let mut table = HashMap::new();
        let mut sections = Vec::with_capacity(layout.sections.len());
        let mut section_x = 0u16;

        for section in &layout.sections {
            let mut section_width = 0u16;

            for (row, slots) in section.rows.iter().enumerate() {
                let mut x = section_x;
                for slot in slots {
                    if let Slot::Key { code, label, width } = *slot {
                        table.insert(code, elements.len());
                        elements.push(KeyElement {
                            code,
                            label,
                            section: section.kind,
                            row: row as u16,
                            x,
                            width,
                            visual: KeyVisual::default(),
                        });
                    }
                    x += slot.width() + KEY_SPACING;
                }
                let row_width = (x - section_x).saturating_sub(KEY_SPACING);
                section_width = section_width.max(row_width);
            }

            sections.push(SectionExtent {
                kind: section.kind,
                x: section_x,
                width: section_width.max(KEY_WIDTH),
            });
            section_x += section_width + SECTION_SPACING;
        }

        Self {
            elements,
            table,
            sections,
        }
    }

    /// Element for a key code, if the layout has one
    pub fn element(&self, code: KeyCode) -> Option<&KeyElement> {
        self.table.get(&code).map(|&i| &self.elements[i])
    }

    pub fn element_mut(&mut self, code: KeyCode) -> Option<&mut KeyElement> {
        self.table.get(&code).map(|&i| &mut self.elements[i])
    }

    pub fn contains(&self, code: KeyCode) -> bool {
        self.table.contains_key(&code)
    }

    pub fn elements(&self) -> &[KeyElement] {
        &self.elements
    }

    pub fn sections(&self) -> &[SectionExtent] {
        &self.sections
    }

    /// Total board width in cells
    pub fn width(&self) -> u16 {
        self.sections
            .last()
            .map(|s| s.x + s.width)
            .unwrap_or(0)
    }

    /// Number of keys that have been pressed at least once
    pub fn tested_count(&self) -> usize {
        self.elements.iter().filter(|e| e.visual.highlighted).count()
    }

    /// Clear the visual state of every element
    pub fn reset(&mut self) {
        for element in &mut self.elements {
            element.visual = KeyVisual::default();
        }
    }
}

impl Default for VisualBoard {
    fn default() -> Self {
        Self::from_layout(&Layout::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(name: &str) -> KeyCode {
        KeyCode::from_name(name).unwrap()
    }

    #[test]
    fn every_layout_key_is_addressable() {
        let layout = Layout::standard();
        let board = VisualBoard::from_layout(&layout);
        assert_eq!(board.elements().len(), layout.keys().count());
        for element in board.elements() {
            assert_eq!(board.element(element.code).unwrap().code, element.code);
        }
    }

    #[test]
    fn unmapped_code_has_no_element() {
        let board = VisualBoard::default();
        assert!(board.element(code("ContextMenu")).is_none());
        assert!(board.element(KeyCode(0)).is_none());
        assert!(!board.contains(KeyCode(9999)));
    }

    #[test]
    fn positions_follow_row_order() {
        let board = VisualBoard::default();
        let q = board.element(code("KeyQ")).unwrap();
        let w = board.element(code("KeyW")).unwrap();
        assert_eq!(q.row, w.row);
        assert_eq!(w.x, q.x + q.width + KEY_SPACING);

        let esc = board.element(code("Escape")).unwrap();
        assert_eq!((esc.row, esc.x), (0, 0));
    }

    #[test]
    fn sections_do_not_overlap() {
        let board = VisualBoard::default();
        let sections = board.sections();
        assert_eq!(sections.len(), 3);
        for pair in sections.windows(2) {
            assert!(pair[0].x + pair[0].width < pair[1].x);
        }
        for element in board.elements() {
            let extent = sections.iter().find(|s| s.kind == element.section).unwrap();
            assert!(element.x >= extent.x);
            assert!(element.x + element.width <= extent.x + extent.width);
        }
    }

    #[test]
    fn arrow_up_sits_over_arrow_down() {
        let board = VisualBoard::default();
        let up = board.element(code("ArrowUp")).unwrap();
        let down = board.element(code("ArrowDown")).unwrap();
        assert_eq!(up.x, down.x);
        assert_eq!(up.row + 1, down.row);
    }

    #[test]
    fn appearance_prefers_down_over_released() {
        let mut visual = KeyVisual::default();
        assert_eq!(visual.appearance(), KeyAppearance::Idle);
        visual.highlighted = true;
        visual.down = true;
        visual.released = true;
        assert_eq!(visual.appearance(), KeyAppearance::Pressed);
        visual.down = false;
        assert_eq!(visual.appearance(), KeyAppearance::Released);
    }

    #[test]
    fn reset_clears_visuals() {
        let mut board = VisualBoard::default();
        board.element_mut(code("KeyA")).unwrap().visual.highlighted = true;
        assert_eq!(board.tested_count(), 1);
        board.reset();
        assert_eq!(board.tested_count(), 0);
    }
}
