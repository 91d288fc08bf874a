//! Menu, prompt, dialog and picker widgets

use ghostlink_hal::EntryName;
use heapless::String;

use super::surface::ResponseSurface;
use crate::menu::Menu;

/// Maximum length of a prompted value
pub const MAX_INPUT_LEN: usize = 64;

/// Outcome of a two-button confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DialogOutcome {
    /// OK / confirm button
    Confirm,
    /// Cancel / back button
    Cancel,
}

/// List-selection widget
pub trait MenuWidget {
    /// Show a menu and wait for a choice
    ///
    /// Returns the selected item index, or `None` when the user backed out.
    fn show(&mut self, menu: &Menu) -> Option<usize>;
}

/// Single-line text entry widget
pub trait PromptWidget {
    /// Ask for one line of text
    ///
    /// Returns `None` when the user cancelled.
    fn prompt(&mut self, header: &str, default: &str) -> Option<String<MAX_INPUT_LEN>>;
}

/// Modal dialogs
pub trait DialogWidget {
    /// Two-button confirmation
    fn confirm(&mut self, header: &str, text: &str) -> DialogOutcome;

    /// Blocking message with a single dismiss button
    fn message(&mut self, header: &str, text: &str);
}

/// File picker over stored payloads
pub trait FilePicker {
    /// Let the user pick one of `entries`
    ///
    /// Returns the index into `entries`, or `None` when cancelled.
    fn pick(&mut self, header: &str, entries: &[EntryName]) -> Option<usize>;
}

/// Everything the controller needs from the user interface
pub trait Ui: MenuWidget + PromptWidget + DialogWidget + FilePicker {
    /// Surface type used to show firmware output
    type Surface: ResponseSurface;

    /// The response surface
    fn surface(&mut self) -> &mut Self::Surface;
}
