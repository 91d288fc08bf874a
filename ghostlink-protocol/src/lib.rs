//! GhostESP serial command protocol
//!
//! This crate defines what GhostLink writes to the GhostESP firmware over
//! the serial link. The firmware speaks a line-oriented command shell:
//!
//! ```text
//! ┌──────────────────────────────┬──────────┐
//! │ COMMAND (ASCII, space flags) │ LINE END │
//! │ 1–128B                       │ 0–2B     │
//! └──────────────────────────────┴──────────┘
//! ```
//!
//! There is no length prefix, no checksum and no acknowledgement. Payload
//! uploads embed raw script bytes after a command prefix and end with a
//! form feed instead of a line ending.
//!
//! Everything the firmware sends back is opaque display text; this crate
//! does not parse responses.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod catalog;
pub mod command;
pub mod upload;

pub use catalog::{Action, Catalog, CatalogError, CatalogVersion, MAX_OVERRIDES};
pub use command::{Command, CommandError, LineEnding, MAX_COMMAND_LEN, MAX_LINE_LEN, STOP};
pub use upload::{PayloadKind, Upload, UploadError, PAYLOAD_TERMINATOR};
