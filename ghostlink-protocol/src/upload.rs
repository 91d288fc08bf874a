//! Payload upload framing
//!
//! Two commands carry a raw script body instead of a single line:
//!
//! ```text
//! ┌─────────────────┬──────────────────┬──────┐
//! │ PREFIX          │ BODY (raw bytes) │ 0x0C │
//! │ "controller -s "│ 0–n B            │ 1B   │
//! └─────────────────┴──────────────────┴──────┘
//! ```
//!
//! The body is sent verbatim. The form feed ends the upload, so it may not
//! appear inside the body.

/// Byte that terminates an upload body
pub const PAYLOAD_TERMINATOR: u8 = 0x0C;

/// Which firmware subsystem receives the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PayloadKind {
    /// Bluetooth controller emulation script
    Controller,
    /// USB HID control script
    UsbControl,
}

impl PayloadKind {
    /// Command prefix, including the trailing space
    pub fn prefix(self) -> &'static str {
        match self {
            PayloadKind::Controller => "controller -s ",
            PayloadKind::UsbControl => "usbcontrol -s ",
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            PayloadKind::Controller => "Controller Script",
            PayloadKind::UsbControl => "USB Control Script",
        }
    }
}

/// Errors from building an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UploadError {
    /// Body contains the terminator byte at this offset
    TerminatorInBody(usize),
}

/// A payload upload borrowing its body from storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upload<'a> {
    kind: PayloadKind,
    body: &'a [u8],
}

impl<'a> Upload<'a> {
    /// Build an upload, rejecting bodies that would end early
    pub fn new(kind: PayloadKind, body: &'a [u8]) -> Result<Self, UploadError> {
        if let Some(pos) = body.iter().position(|&b| b == PAYLOAD_TERMINATOR) {
            return Err(UploadError::TerminatorInBody(pos));
        }
        Ok(Self { kind, body })
    }

    /// Target subsystem
    pub fn kind(&self) -> PayloadKind {
        self.kind
    }

    /// Raw script body
    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    /// The three wire segments, in write order
    pub fn segments(&self) -> [&'a [u8]; 3] {
        [
            self.kind.prefix().as_bytes(),
            self.body,
            core::slice::from_ref(&PAYLOAD_TERMINATOR),
        ]
    }

    /// Total bytes on the wire
    pub fn wire_len(&self) -> usize {
        self.kind.prefix().len() + self.body.len() + 1
    }
}
