//! Events that trigger navigation transitions

use crate::menu::MenuId;

/// Events that can move the user through the menu tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEvent {
    // Menu events
    /// User selected an item that opens a submenu
    Open(MenuId),
    /// User backed out of the current menu
    Back,

    // Bridge events
    /// A command cycle finished; show this menu next
    CycleDone(MenuId),
    /// A command cycle gave up after the firmware went quiet
    GiveUp,

    // Exit dialog events
    /// User confirmed the exit dialog
    Confirm,
    /// User cancelled the exit dialog
    Cancel,
}
