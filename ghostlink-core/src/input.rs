//! Prompted input validation
//!
//! Prompted values are checked before anything is written to the serial
//! link. How strict the check is depends on [`Strictness`]: the strict mode
//! rejects empty values, the lenient mode lets them through and the
//! command is sent without an argument.

use core::num::IntErrorKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Validation mode for prompted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strictness {
    /// Reject empty values
    #[default]
    Strict,
    /// Accept empty values
    Lenient,
}

/// Why a prompted value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Nothing was entered
    Empty,
    /// Not an integer
    NotANumber,
    /// An integer too large to be any list position
    OutOfRange,
}

impl InputError {
    /// Text for the error dialog
    pub fn message(self) -> &'static str {
        match self {
            InputError::Empty => "Nothing entered.",
            InputError::NotANumber => "Invalid number entered.",
            InputError::OutOfRange => "Number out of range.",
        }
    }
}

/// Validate a list index such as an AP or station number
///
/// Any integer is accepted, signed or not, as long as it fits in an `i64`.
/// The firmware decides whether the position exists. Surrounding whitespace
/// is ignored. Returns the trimmed value; an empty string is only returned
/// in lenient mode.
pub fn validate_index(input: &str, strictness: Strictness) -> Result<&str, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return match strictness {
            Strictness::Strict => Err(InputError::Empty),
            Strictness::Lenient => Ok(trimmed),
        };
    }
    match trimmed.parse::<i64>() {
        Ok(_) => Ok(trimmed),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(InputError::OutOfRange),
            _ => Err(InputError::NotANumber),
        },
    }
}

/// Validate free text such as an SSID
///
/// Text is passed through unchanged. Strict mode rejects blank input.
pub fn validate_text(input: &str, strictness: Strictness) -> Result<&str, InputError> {
    if strictness == Strictness::Strict && input.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(input)
}
