//! Menu list view
//!
//! A header row followed by a window of items. The selection wraps at both
//! ends and the window scrolls so the selection is always visible.

use heapless::Vec;

use crate::screen::Screen;

/// Maximum items a view can hold
pub const MAX_MENU_ITEMS: usize = 32;

const MARKER: &str = "> ";
const PADDING: &str = "  ";

/// Selectable list with a header
#[derive(Debug, Clone)]
pub struct MenuView<'a> {
    header: &'a str,
    items: Vec<&'a str, MAX_MENU_ITEMS>,
    selected: usize,
    offset: usize,
}

impl<'a> MenuView<'a> {
    /// Create a view; items past [`MAX_MENU_ITEMS`] are dropped
    pub fn new<I>(header: &'a str, items: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            header,
            items: items.into_iter().take(MAX_MENU_ITEMS).collect(),
            selected: 0,
            offset: 0,
        }
    }

    /// Header text
    pub fn header(&self) -> &'a str {
        self.header
    }

    /// Item labels
    pub fn items(&self) -> &[&'a str] {
        &self.items
    }

    /// Selected index; meaningless for an empty view
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// First item shown
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the selection down, wrapping to the top
    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Move the selection up, wrapping to the bottom
    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.items.len() - 1);
        }
    }

    /// Jump to an item; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Render into a screen: header on row 0, items below
    pub fn render<const ROWS: usize, const COLS: usize>(
        &mut self,
        screen: &mut Screen<ROWS, COLS>,
    ) {
        let window = ROWS.saturating_sub(1);
        self.scroll_to_selection(window);

        screen.clear();
        screen.set_line(0, self.header);

        let mut line: heapless::String<COLS> = heapless::String::new();
        let visible = self.items.iter().enumerate().skip(self.offset).take(window);
        for (row, (index, label)) in visible.enumerate() {
            line.clear();
            let prefix = if index == self.selected { MARKER } else { PADDING };
            let _ = line.push_str(prefix);
            for c in label.chars() {
                if line.push(c).is_err() {
                    break;
                }
            }
            screen.set_line(row + 1, &line);
            if index == self.selected {
                screen.set_highlight(row + 1, 0, COLS.min(u8::MAX as usize) as u8);
            }
        }
    }

    fn scroll_to_selection(&mut self, window: usize) {
        if window == 0 {
            self.offset = self.selected;
        } else if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + window {
            self.offset = self.selected + 1 - window;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec as StdVec;

    const WIFI: [&str; 5] = [
        "Scan Wifi",
        "Scan Stations",
        "Add SSID Random",
        "Add SSID",
        "List AP",
    ];

    #[test]
    fn test_selection_wraps() {
        let mut view = MenuView::new("Wifi Utilities:", WIFI);
        view.prev();
        assert_eq!(view.selected(), 4);
        view.next();
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn test_empty_view_does_not_move() {
        let mut view = MenuView::new("Empty", []);
        view.next();
        view.prev();
        assert_eq!(view.selected(), 0);
        assert!(!view.select(0));
    }

    #[test]
    fn test_render_marks_selection() {
        let mut view = MenuView::new("Wifi Utilities:", WIFI);
        view.select(1);
        let mut screen: Screen<6, 24> = Screen::new();
        view.render(&mut screen);

        let rows: StdVec<&str> = screen.lines().collect();
        assert_eq!(rows[0], "Wifi Utilities:");
        assert_eq!(rows[1], "  Scan Wifi");
        assert_eq!(rows[2], "> Scan Stations");
        assert_eq!(screen.selection(), Some((2, 0, 24)));
    }

    #[test]
    fn test_window_follows_selection() {
        let mut view = MenuView::new("Wifi Utilities:", WIFI);
        let mut screen: Screen<3, 24> = Screen::new();

        view.select(4);
        view.render(&mut screen);
        assert_eq!(view.offset(), 3);
        assert_eq!(screen.get_line(2), Some("> List AP"));

        // Wrapping to the top scrolls back
        view.next();
        view.render(&mut screen);
        assert_eq!(view.offset(), 0);
        assert_eq!(screen.get_line(1), Some("> Scan Wifi"));
    }
}
