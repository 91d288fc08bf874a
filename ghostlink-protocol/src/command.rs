//! Command line encoding
//!
//! A command is one line of text for the firmware shell, e.g. `scanap` or
//! `attack -t beacon -r`. The line ending is configurable because older
//! firmware builds accept bare commands and newer ones read whole lines.

use heapless::{String, Vec};

/// Maximum command length in bytes, excluding the line ending
pub const MAX_COMMAND_LEN: usize = 128;

/// Maximum encoded line size (command + CRLF)
pub const MAX_LINE_LEN: usize = MAX_COMMAND_LEN + 2;

/// Cancel signal written after every command cycle
pub const STOP: &str = "stop";

/// Errors that can occur while building or encoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Command text is empty
    Empty,
    /// Command exceeds [`MAX_COMMAND_LEN`]
    TooLong,
    /// Command contains a line break or form feed
    ForbiddenByte,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Line terminator appended to each command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LineEnding {
    /// Nothing appended; firmware splits on read timeout
    None,
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Terminator bytes
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::None => b"",
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
        }
    }
}

/// A single firmware command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    text: String<MAX_COMMAND_LEN>,
}

impl Command {
    /// Build a command from literal text
    pub fn new(text: &str) -> Result<Self, CommandError> {
        Self::with_arg(text, None)
    }

    /// Build a command from a base spelling and an optional argument
    ///
    /// A present, non-empty argument is appended after a single space.
    /// An empty argument leaves the base command unchanged.
    pub fn with_arg(base: &str, arg: Option<&str>) -> Result<Self, CommandError> {
        if base.is_empty() {
            return Err(CommandError::Empty);
        }

        let mut text = String::new();
        push_checked(&mut text, base)?;
        if let Some(arg) = arg.filter(|a| !a.is_empty()) {
            push_checked(&mut text, " ")?;
            push_checked(&mut text, arg)?;
        }

        Ok(Self { text })
    }

    /// The `stop` command
    pub fn stop() -> Self {
        let mut text = String::new();
        // STOP is a short constant, always fits
        let _ = text.push_str(STOP);
        Self { text }
    }

    /// Command text without line ending
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Whether this is the `stop` command
    pub fn is_stop(&self) -> bool {
        self.text.as_str() == STOP
    }

    /// Encode this command into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, ending: LineEnding, buffer: &mut [u8]) -> Result<usize, CommandError> {
        let body = self.text.as_bytes();
        let tail = ending.as_bytes();
        let len = body.len() + tail.len();
        if buffer.len() < len {
            return Err(CommandError::BufferTooSmall);
        }

        buffer[..body.len()].copy_from_slice(body);
        buffer[body.len()..len].copy_from_slice(tail);
        Ok(len)
    }

    /// Encode this command into a heapless Vec
    pub fn encode_to_vec(&self, ending: LineEnding) -> Vec<u8, MAX_LINE_LEN> {
        let mut buffer = [0u8; MAX_LINE_LEN];
        // MAX_LINE_LEN covers the longest command plus the longest ending
        let len = self.encode(ending, &mut buffer).unwrap_or(0);
        let mut vec = Vec::new();
        let _ = vec.extend_from_slice(&buffer[..len]);
        vec
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.text.as_str());
    }
}

fn push_checked(text: &mut String<MAX_COMMAND_LEN>, part: &str) -> Result<(), CommandError> {
    if part.bytes().any(|b| matches!(b, b'\r' | b'\n' | 0x0C)) {
        return Err(CommandError::ForbiddenByte);
    }
    text.push_str(part).map_err(|_| CommandError::TooLong)
}
