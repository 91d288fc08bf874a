//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

/// Default number of character rows
pub const SCREEN_ROWS: usize = 16;

/// Default number of character columns
pub const SCREEN_COLS: usize = 64;

/// Screen buffer for text-mode displays
///
/// Holds what should be on the display; [`crate::render`] pushes it to a
/// backend. Text longer than `COLS` bytes is cut at a character boundary.
#[derive(Clone)]
pub struct Screen<const ROWS: usize = SCREEN_ROWS, const COLS: usize = SCREEN_COLS> {
    /// Current display content
    lines: [String<COLS>; ROWS],
    /// Selection/highlight state per row (start_col, end_col)
    highlights: [Option<(u8, u8)>; ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl<const ROWS: usize, const COLS: usize> Default for Screen<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> Screen<ROWS, COLS> {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; ROWS],
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; ROWS];
        self.dirty = true;
    }

    /// Set the content of a specific row
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        line.clear();
        let mut end = text.len().min(COLS);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        // Cannot fail: `end` is within capacity
        let _ = line.push_str(&text[..end]);
        self.dirty = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Set highlight (invert) region for a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if let Some(highlight) = self.highlights.get_mut(row) {
            *highlight = Some((start_col, end_col));
            self.dirty = true;
        }
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// First highlighted row as (row, start_col, end_col)
    pub fn selection(&self) -> Option<(u8, u8, u8)> {
        self.highlights
            .iter()
            .enumerate()
            .find_map(|(row, h)| h.map(|(start, end)| (row as u8, start, end)))
    }
}

#[cfg(feature = "defmt")]
impl<const ROWS: usize, const COLS: usize> defmt::Format for Screen<ROWS, COLS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
