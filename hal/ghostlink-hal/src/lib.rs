//! GhostLink Hardware Abstraction Layer
//!
//! This crate defines the traits the remote control needs from the
//! platform it runs on. The same application code drives a real serial
//! port on a host, a UART on a handheld, or a scripted fake in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (ghostlink-host, etc.)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ghostlink-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  serial port  │       │  test doubles │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial link to the firmware
//! - [`time::Clock`] - Monotonic milliseconds and blocking delay
//! - [`storage::PayloadStore`] - Read-only byte storage for payload scripts

#![no_std]
#![deny(unsafe_code)]

pub mod storage;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use storage::{EntryName, PayloadStore, StorageError};
pub use time::Clock;
pub use uart::{Uart, UartConfig, UartRx, UartTx};
