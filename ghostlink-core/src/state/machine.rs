//! Navigation state machine definition

use super::events::NavEvent;
use crate::menu::{MenuId, MenuTree};

/// Navigation states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavState {
    /// A menu is shown
    Menu(MenuId),
    /// Exit confirmation dialog is shown
    ConfirmExit,
    /// Session is over
    Exited,
}

impl Default for NavState {
    fn default() -> Self {
        NavState::Menu(MenuId::ROOT)
    }
}

impl NavState {
    /// Menu currently shown, if any
    pub fn menu(&self) -> Option<MenuId> {
        match self {
            NavState::Menu(id) => Some(*id),
            _ => None,
        }
    }

    /// Check if the session is over
    pub fn is_exited(&self) -> bool {
        matches!(self, NavState::Exited)
    }

    /// Process an event and return the next state
    ///
    /// Events that make no sense in the current state leave it unchanged.
    pub fn transition(self, event: NavEvent, tree: &MenuTree) -> Self {
        use NavEvent::*;
        use NavState::*;

        match (self, event) {
            // Menu transitions
            (Menu(_), Open(id)) if tree.menu(id).is_some() => Menu(id),
            (Menu(id), Back) => match tree.parent(id) {
                Some(parent) => Menu(parent),
                None => ConfirmExit,
            },
            (Menu(_), CycleDone(id)) if tree.menu(id).is_some() => Menu(id),
            (Menu(_), CycleDone(_)) => Menu(MenuId::ROOT),
            (Menu(_), GiveUp) => ConfirmExit,

            // ConfirmExit transitions
            (ConfirmExit, Confirm) => Exited,
            (ConfirmExit, Cancel) => Menu(MenuId::ROOT),

            // Exited is final
            (Exited, _) => Exited,

            // Invalid transitions: stay in current state
            (state, _) => state,
        }
    }
}
