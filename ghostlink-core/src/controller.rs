//! Session controller
//!
//! Drives the navigation state machine against the user-interface
//! collaborators and hands selected actions to the bridge.

use ghostlink_hal::{Clock, PayloadStore, StorageError, Uart, UartTx};
use ghostlink_protocol::{Catalog, CommandError, PayloadKind, Upload};
use log::{debug, info, warn};

use crate::bridge::{Bridge, BridgeError, Cycle, ExitReason};
use crate::config::SessionConfig;
use crate::input::{validate_index, validate_text, InputError, Strictness};
use crate::menu::{ArgSpec, Entry, Leaf, MenuId, MenuTree};
use crate::state::{NavEvent, NavState, Session};
use crate::traits::{DialogOutcome, Ui};

/// Largest payload that can be uploaded
pub const MAX_PAYLOAD_LEN: usize = 4096;

const ERROR_HEADER: &str = "Error";
const EXIT_HEADER: &str = "Exit";
const EXIT_TEXT: &str = "Press OK to exit, Cancel to return.";

/// Counters for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    /// Completed bridge cycles
    pub cycles: u32,
    /// Prompted values that were rejected
    pub rejected_inputs: u32,
    /// Commands that could not be written
    pub transport_errors: u32,
    /// Whether the final `stop` on exit reached the transport
    pub exit_stop_sent: bool,
}

/// Menu-driven remote control session
pub struct Controller<T, C> {
    bridge: Bridge<T, C>,
    tree: MenuTree,
    catalog: Catalog,
    strictness: Strictness,
    session: Session,
    summary: RunSummary,
    payload: [u8; MAX_PAYLOAD_LEN],
}

impl<T, C> Controller<T, C>
where
    T: Uart,
    C: Clock,
{
    /// Create a controller starting at the root menu
    pub fn new(
        bridge: Bridge<T, C>,
        tree: MenuTree,
        catalog: Catalog,
        strictness: Strictness,
    ) -> Self {
        Self {
            bridge,
            tree,
            catalog,
            strictness,
            session: Session::new(),
            summary: RunSummary::default(),
            payload: [0; MAX_PAYLOAD_LEN],
        }
    }

    /// Create a controller from session configuration
    pub fn from_config(
        link: T,
        clock: C,
        tree: MenuTree,
        catalog: Catalog,
        config: &SessionConfig,
    ) -> Self {
        let bridge = Bridge::new(link, clock, config.bridge);
        Self::new(bridge, tree, catalog, config.strictness)
    }

    /// Navigation and cycle bookkeeping
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Counters so far
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// The bridge
    pub fn bridge(&self) -> &Bridge<T, C> {
        &self.bridge
    }

    /// Give back the bridge
    pub fn into_bridge(self) -> Bridge<T, C> {
        self.bridge
    }

    /// Run until the user confirms the exit dialog
    pub fn run<U, P>(&mut self, ui: &mut U, store: &mut P) -> RunSummary
    where
        U: Ui,
        P: PayloadStore,
    {
        info!("session started");
        while !self.session.state().is_exited() {
            self.step(ui, store);
        }
        info!("session ended after {} cycles", self.summary.cycles);
        self.summary
    }

    /// Handle one user interaction and return the new state
    pub fn step<U, P>(&mut self, ui: &mut U, store: &mut P) -> NavState
    where
        U: Ui,
        P: PayloadStore,
    {
        match self.session.state() {
            NavState::Menu(id) => self.show_menu(id, ui, store),
            NavState::ConfirmExit => self.confirm_exit(ui),
            NavState::Exited => NavState::Exited,
        }
    }

    fn show_menu<U, P>(&mut self, id: MenuId, ui: &mut U, store: &mut P) -> NavState
    where
        U: Ui,
        P: PayloadStore,
    {
        let Some(menu) = self.tree.menu(id).copied() else {
            warn!("menu {} missing, back to root", id.0);
            return self.session.apply(NavEvent::CycleDone(MenuId::ROOT), &self.tree);
        };

        let Some(index) = ui.show(&menu) else {
            return self.session.apply(NavEvent::Back, &self.tree);
        };

        match menu.entry(index) {
            Some(Entry::Submenu(target)) => {
                self.session.apply(NavEvent::Open(target), &self.tree)
            }
            Some(Entry::Leaf(leaf)) => self.run_leaf(id, leaf, ui),
            Some(Entry::Upload(kind)) => self.run_upload(id, kind, ui, store),
            None => {
                debug!("selection {} out of range in menu {}", index, id.0);
                self.session.state()
            }
        }
    }

    fn confirm_exit<U: Ui>(&mut self, ui: &mut U) -> NavState {
        match ui.confirm(EXIT_HEADER, EXIT_TEXT) {
            DialogOutcome::Confirm => {
                self.summary.exit_stop_sent = self.bridge.send_stop();
                self.session.apply(NavEvent::Confirm, &self.tree)
            }
            DialogOutcome::Cancel => self.session.apply(NavEvent::Cancel, &self.tree),
        }
    }

    fn run_leaf<U: Ui>(&mut self, id: MenuId, leaf: Leaf, ui: &mut U) -> NavState {
        let input = match leaf.arg {
            ArgSpec::None => None,
            ArgSpec::Text { header } | ArgSpec::Index { header } => {
                match ui.prompt(header, "") {
                    Some(input) => Some(input),
                    // Cancelled prompt: nothing is sent
                    None => return self.session.state(),
                }
            }
        };

        let arg = match (leaf.arg, input.as_deref()) {
            (ArgSpec::Text { .. }, Some(text)) => {
                validate_text(text, self.strictness).map(Some)
            }
            (ArgSpec::Index { .. }, Some(text)) => {
                validate_index(text, self.strictness).map(Some)
            }
            _ => Ok(None),
        };
        let arg = match arg {
            Ok(arg) => arg.filter(|a| !a.is_empty()),
            Err(e) => return self.reject(e, ui),
        };

        let command = match self.catalog.command(leaf.action, arg) {
            Ok(command) => command,
            Err(e) => {
                warn!("cannot build command for {}: {:?}", leaf.action.key(), e);
                self.summary.rejected_inputs += 1;
                let text = match e {
                    CommandError::TooLong => "Input too long.",
                    _ => "Invalid characters entered.",
                };
                ui.message(ERROR_HEADER, text);
                return self.session.state();
            }
        };

        let result = self.bridge.send_command(&command, id, ui.surface());
        self.finish(id, result, ui)
    }

    fn run_upload<U, P>(
        &mut self,
        id: MenuId,
        kind: PayloadKind,
        ui: &mut U,
        store: &mut P,
    ) -> NavState
    where
        U: Ui,
        P: PayloadStore,
    {
        let entries = match store.entries() {
            Ok(entries) if !entries.is_empty() => entries,
            Ok(_) | Err(StorageError::NotFound | StorageError::Unavailable) => {
                ui.message(ERROR_HEADER, "No payloads found.");
                return self.session.state();
            }
            Err(e) => {
                warn!("payload listing failed: {:?}", e);
                ui.message(ERROR_HEADER, "Cannot read payloads.");
                return self.session.state();
            }
        };

        let Some(name) = ui.pick(kind.label(), &entries).and_then(|i| entries.get(i)) else {
            return self.session.state();
        };

        match store.size(name) {
            Ok(size) if size > MAX_PAYLOAD_LEN => {
                warn!("payload {} is {} bytes, limit {}", name, size, MAX_PAYLOAD_LEN);
                ui.message(ERROR_HEADER, "Payload too large.");
                return self.session.state();
            }
            Ok(_) => {}
            Err(e) => {
                warn!("payload {} unavailable: {:?}", name, e);
                ui.message(ERROR_HEADER, "Cannot read payload.");
                return self.session.state();
            }
        }

        let len = match store.read(name, &mut self.payload) {
            Ok(len) => len,
            Err(e) => {
                warn!("payload {} read failed: {:?}", name, e);
                ui.message(ERROR_HEADER, "Cannot read payload.");
                return self.session.state();
            }
        };

        let upload = match Upload::new(kind, &self.payload[..len]) {
            Ok(upload) => upload,
            Err(e) => {
                warn!("payload {} rejected: {:?}", name, e);
                ui.message(ERROR_HEADER, "Payload contains a form feed.");
                return self.session.state();
            }
        };

        info!("uploading {} as {}", name, kind.label());
        let result = self.bridge.upload(&upload, id, ui.surface());
        self.finish(id, result, ui)
    }

    fn reject<U: Ui>(&mut self, error: InputError, ui: &mut U) -> NavState {
        debug!("input rejected: {:?}", error);
        self.summary.rejected_inputs += 1;
        ui.message(ERROR_HEADER, error.message());
        self.session.state()
    }

    fn finish<U: Ui>(
        &mut self,
        id: MenuId,
        result: Result<Cycle, BridgeError<<T as UartTx>::Error>>,
        ui: &mut U,
    ) -> NavState {
        match result {
            Ok(cycle) => {
                self.summary.cycles += 1;
                self.session.record(cycle);
                let event = match cycle.reason {
                    ExitReason::Dismissed => NavEvent::CycleDone(cycle.return_to),
                    ExitReason::IdleTimeout => NavEvent::GiveUp,
                };
                self.session.apply(event, &self.tree)
            }
            Err(BridgeError::Transport(_)) => {
                warn!("command not written, staying in menu {}", id.0);
                self.summary.transport_errors += 1;
                ui.message(ERROR_HEADER, "Device not responding.");
                self.session.apply(NavEvent::CycleDone(id), &self.tree)
            }
        }
    }
}
