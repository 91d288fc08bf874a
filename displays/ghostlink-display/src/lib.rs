//! Text-mode views for the GhostLink remote control
//!
//! This crate provides:
//! - `Screen`, a fixed character buffer with per-row highlights
//! - `TextLog`, the model behind the streaming response surface
//! - `MenuView`, a header plus item list with a scrolling selection
//! - `DisplayBackend` for whatever actually puts characters somewhere
//!
//! # Architecture
//!
//! ```text
//!   firmware bytes ──► TextLog ──┐
//!                                ├──► Screen ──► render() ──► DisplayBackend
//!   menu items ─────► MenuView ──┘
//! ```
//!
//! Views only ever write into a `Screen`. A backend may be a terminal, an
//! OLED driver or a test recorder; views do not care which.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod menu_view;
pub mod screen;
pub mod text_log;

// Re-export key types
pub use backend::{render, DisplayBackend, DisplayError};
pub use menu_view::{MenuView, MAX_MENU_ITEMS};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use text_log::{TextLog, LOG_LINES, LOG_WIDTH};
