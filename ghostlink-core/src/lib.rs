//! Platform-agnostic core logic for the GhostLink remote control
//!
//! This crate contains all application logic that does not depend on a
//! specific serial port, screen or input device:
//!
//! - Collaborator traits (response surface, menu, prompt, dialog, picker)
//! - The command/response bridge
//! - The table-driven menu tree
//! - Navigation state machine and session state
//! - Input validation
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bridge;
pub mod config;
pub mod controller;
pub mod input;
pub mod menu;
pub mod state;
pub mod traits;

pub use bridge::{Bridge, BridgeError, Cycle, ExitReason};
pub use controller::{Controller, RunSummary};
pub use menu::{MenuId, MenuTree};
pub use state::{NavEvent, NavState, Session};
