//! Session state
//!
//! Replaces the loose navigation globals of a script with one value owned
//! by the controller.

use super::{NavEvent, NavState};
use crate::bridge::Cycle;
use crate::menu::{MenuId, MenuTree};

/// Navigation and bookkeeping for one run
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: NavState,
    exit_requested: bool,
    cycles: u32,
    last_cycle: Option<Cycle>,
}

impl Session {
    /// Start at the root menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Current navigation state
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Menu shown right now, if any
    pub fn current(&self) -> Option<MenuId> {
        self.state.menu()
    }

    /// Whether the user asked to leave the tree
    ///
    /// Set by backing out of the root or by an idle give-up; cleared when
    /// the exit dialog is cancelled.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Completed bridge cycles
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Most recent bridge cycle
    pub fn last_cycle(&self) -> Option<&Cycle> {
        self.last_cycle.as_ref()
    }

    /// Record a finished cycle
    pub fn record(&mut self, cycle: Cycle) {
        self.cycles = self.cycles.saturating_add(1);
        self.last_cycle = Some(cycle);
    }

    /// Apply an event and return the new state
    pub fn apply(&mut self, event: NavEvent, tree: &MenuTree) -> NavState {
        let next = self.state.transition(event, tree);
        match (self.state, next) {
            (NavState::Menu(_), NavState::ConfirmExit) => self.exit_requested = true,
            (NavState::ConfirmExit, NavState::Menu(_)) => self.exit_requested = false,
            _ => {}
        }
        if next != self.state {
            log::trace!("nav {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        next
    }
}
