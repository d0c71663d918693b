//! The title bar "File" drop-down.

use crate::geometry::{Point, Rect};

const ITEM_HEIGHT: u32 = 24;
const SEPARATOR_HEIGHT: u32 = 7;
const MENU_WIDTH: u32 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        action: MenuAction,
        label: &'static str,
        shortcut: Option<&'static str>,
    },
    Separator,
}

const ENTRIES: [MenuEntry; 3] = [
    MenuEntry::Item {
        action: MenuAction::Open,
        label: "Open",
        shortcut: Some("Ctrl+O"),
    },
    MenuEntry::Separator,
    MenuEntry::Item {
        action: MenuAction::Close,
        label: "Close",
        shortcut: None,
    },
];

/// Result of a press while the menu is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPress {
    /// Press was outside the menu; it closes and the press is consumed.
    Dismissed,
    /// Press landed on a separator or the menu border.
    Ignored,
    Chosen(MenuAction),
}

#[derive(Debug, Default)]
pub struct FileMenu {
    anchor: Rect,
    open: bool,
    hovered: Option<usize>,
}

impl FileMenu {
    /// `anchor` is the title bar button the menu drops down from.
    pub fn set_anchor(&mut self, anchor: Rect) {
        self.anchor = anchor;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.hovered = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.hovered = None;
    }

    pub fn entries(&self) -> &'static [MenuEntry] {
        &ENTRIES
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn popup_rect(&self) -> Rect {
        let height = ENTRIES.iter().map(entry_height).sum();
        Rect::new(self.anchor.x, self.anchor.bottom(), MENU_WIDTH, height)
    }

    pub fn entry_rect(&self, index: usize) -> Rect {
        let popup = self.popup_rect();
        let offset: u32 = ENTRIES[..index].iter().map(entry_height).sum();
        let height = ENTRIES.get(index).map_or(0, entry_height);
        Rect::new(popup.x, popup.y + offset as i32, popup.width, height)
    }

    fn entry_at(&self, p: Point) -> Option<usize> {
        (0..ENTRIES.len()).find(|&i| self.entry_rect(i).contains(p))
    }

    /// Track hover; returns true when the highlighted entry changed.
    pub fn hover(&mut self, p: Point) -> bool {
        let hovered = self
            .entry_at(p)
            .filter(|&i| matches!(ENTRIES[i], MenuEntry::Item { .. }));
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    pub fn press(&mut self, p: Point) -> MenuPress {
        if !self.popup_rect().contains(p) {
            self.close();
            return MenuPress::Dismissed;
        }
        match self.entry_at(p).map(|i| ENTRIES[i]) {
            Some(MenuEntry::Item { action, .. }) => {
                self.close();
                MenuPress::Chosen(action)
            }
            _ => MenuPress::Ignored,
        }
    }
}

fn entry_height(entry: &MenuEntry) -> u32 {
    match entry {
        MenuEntry::Item { .. } => ITEM_HEIGHT,
        MenuEntry::Separator => SEPARATOR_HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> FileMenu {
        let mut m = FileMenu::default();
        m.set_anchor(Rect::new(8, 8, 56, 28));
        m.toggle();
        m
    }

    #[test]
    fn open_sits_above_separator_and_close() {
        let m = menu();
        assert_eq!(m.entry_rect(0), Rect::new(8, 36, 160, 24));
        assert_eq!(m.entry_rect(1), Rect::new(8, 60, 160, 7));
        assert_eq!(m.entry_rect(2), Rect::new(8, 67, 160, 24));
    }

    #[test]
    fn pressing_items_closes_menu() {
        let mut m = menu();
        assert_eq!(m.press(Point::new(20.0, 40.0)), MenuPress::Chosen(MenuAction::Open));
        assert!(!m.is_open());
        m.toggle();
        assert_eq!(m.press(Point::new(20.0, 62.0)), MenuPress::Ignored);
        assert!(m.is_open());
        assert_eq!(m.press(Point::new(20.0, 80.0)), MenuPress::Chosen(MenuAction::Close));
    }

    #[test]
    fn outside_press_dismisses() {
        let mut m = menu();
        assert_eq!(m.press(Point::new(500.0, 500.0)), MenuPress::Dismissed);
        assert!(!m.is_open());
    }

    #[test]
    fn separator_is_never_hovered() {
        let mut m = menu();
        assert!(m.hover(Point::new(20.0, 40.0)));
        assert_eq!(m.hovered(), Some(0));
        assert!(m.hover(Point::new(20.0, 62.0)));
        assert_eq!(m.hovered(), None);
    }
}
