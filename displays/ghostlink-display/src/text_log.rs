//! Streaming text log
//!
//! Model behind the response surface: raw firmware bytes go in, wrapped
//! lines come out. Only the newest [`LOG_LINES`] lines are kept.
//!
//! - `\n` ends a line, `\r` is dropped, a tab becomes a space
//! - other control bytes are dropped
//! - malformed UTF-8 shows as `?`; sequences split across appends are
//!   reassembled

use heapless::{Deque, String, Vec};

use crate::screen::Screen;

/// Default scrollback in lines
pub const LOG_LINES: usize = 128;

/// Default wrap width in bytes
pub const LOG_WIDTH: usize = 64;

/// Header capacity
const HEADER_LEN: usize = 64;

const REPLACEMENT: char = '?';

/// Bounded, wrapping text log
pub struct TextLog<const LINES: usize = LOG_LINES, const WIDTH: usize = LOG_WIDTH> {
    header: String<HEADER_LEN>,
    lines: Deque<String<WIDTH>, LINES>,
    current: String<WIDTH>,
    /// Bytes of an unfinished UTF-8 sequence
    pending: Vec<u8, 4>,
    expected: usize,
    open: bool,
    bytes: usize,
    evicted: usize,
}

impl<const LINES: usize, const WIDTH: usize> Default for TextLog<LINES, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LINES: usize, const WIDTH: usize> TextLog<LINES, WIDTH> {
    /// Create a closed, empty log
    pub fn new() -> Self {
        Self {
            header: String::new(),
            lines: Deque::new(),
            current: String::new(),
            pending: Vec::new(),
            expected: 0,
            open: false,
            bytes: 0,
            evicted: 0,
        }
    }

    /// Reset content and start streaming under `header`
    pub fn open(&mut self, header: &str) {
        self.reset();
        self.header.clear();
        for c in header.chars() {
            if self.header.push(c).is_err() {
                break;
            }
        }
        self.open = true;
    }

    /// Stop streaming; content stays readable
    ///
    /// A UTF-8 sequence cut off by the end of the stream shows as `?`.
    pub fn close(&mut self) {
        if !self.pending.is_empty() {
            self.pending.clear();
            self.push_char(REPLACEMENT);
        }
        self.open = false;
    }

    /// Whether the log is streaming
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Drop all content and counters
    pub fn reset(&mut self) {
        self.lines.clear();
        self.current.clear();
        self.pending.clear();
        self.expected = 0;
        self.bytes = 0;
        self.evicted = 0;
    }

    /// Header given to [`TextLog::open`]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Exact number of bytes appended since the last reset
    pub fn byte_count(&self) -> usize {
        self.bytes
    }

    /// Lines dropped from the front of the scrollback
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Number of lines, counting an unfinished last line
    pub fn line_count(&self) -> usize {
        self.lines.len() + usize::from(!self.current.is_empty())
    }

    /// Append raw bytes
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes += bytes.len();
        for &byte in bytes {
            self.push_byte(byte);
        }
    }

    /// All retained lines, oldest first, including an unfinished last line
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let partial = (!self.current.is_empty()).then_some(self.current.as_str());
        self.lines.iter().map(|l| l.as_str()).chain(partial)
    }

    /// The newest `rows` lines, oldest first
    pub fn tail(&self, rows: usize) -> impl Iterator<Item = &str> {
        let skip = self.line_count().saturating_sub(rows);
        self.lines().skip(skip)
    }

    /// Draw the header and the newest lines into a screen
    pub fn render_into<const ROWS: usize, const COLS: usize>(
        &self,
        screen: &mut Screen<ROWS, COLS>,
    ) {
        screen.clear();
        screen.set_line(0, &self.header);
        screen.set_highlight(0, 0, COLS.min(u8::MAX as usize) as u8);
        for (row, line) in self.tail(ROWS.saturating_sub(1)).enumerate() {
            screen.set_line(row + 1, line);
        }
    }

    fn push_byte(&mut self, byte: u8) {
        if !self.pending.is_empty() {
            if is_continuation(byte) {
                // Cannot overflow: expected <= 4
                let _ = self.pending.push(byte);
                if self.pending.len() == self.expected {
                    self.finish_sequence();
                }
                return;
            }
            self.pending.clear();
            self.push_char(REPLACEMENT);
        }

        match byte {
            b'\n' => self.end_line(),
            b'\r' => {}
            b'\t' => self.push_char(' '),
            0x00..=0x1F | 0x7F => {}
            0x20..=0x7E => self.push_char(byte as char),
            _ => match sequence_len(byte) {
                Some(len) => {
                    self.expected = len;
                    let _ = self.pending.push(byte);
                }
                None => self.push_char(REPLACEMENT),
            },
        }
    }

    fn finish_sequence(&mut self) {
        let decoded = core::str::from_utf8(&self.pending)
            .ok()
            .and_then(|s| s.chars().next());
        self.pending.clear();
        self.push_char(decoded.unwrap_or(REPLACEMENT));
    }

    fn push_char(&mut self, c: char) {
        if self.current.len() + c.len_utf8() > WIDTH {
            self.end_line();
        }
        // Cannot fail after the wrap above unless WIDTH < 4
        let _ = self.current.push(c);
    }

    fn end_line(&mut self) {
        let line = core::mem::take(&mut self.current);
        if self.lines.is_full() {
            self.lines.pop_front();
            self.evicted += 1;
        }
        // Cannot fail: a slot was just freed
        let _ = self.lines.push_back(line);
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
