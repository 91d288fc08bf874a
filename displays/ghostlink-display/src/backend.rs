//! Display backend trait
//!
//! Defines the interface for anything that can show a [`Screen`].

use crate::screen::Screen;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering character screens.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert a region on the specified row (for selection highlighting)
    ///
    /// `end_col` is exclusive.
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Display size as (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}

/// Push a screen through a backend
///
/// Rows beyond the backend's height are skipped. Marks the screen clean on
/// success.
pub fn render<B, const ROWS: usize, const COLS: usize>(
    screen: &mut Screen<ROWS, COLS>,
    backend: &mut B,
) -> Result<(), DisplayError>
where
    B: DisplayBackend + ?Sized,
{
    let (_, height) = backend.dimensions();
    backend.clear()?;
    for (row, line) in screen.lines().enumerate().take(height as usize) {
        if !line.is_empty() {
            backend.draw_text(row as u8, 0, line)?;
        }
        if let Some((start, end)) = screen.get_highlight(row) {
            backend.invert_region(row as u8, start, end)?;
        }
    }
    backend.flush()?;
    screen.mark_clean();
    Ok(())
}
