//! Plain output surface for `--send`
//!
//! Response bytes are copied to the output as they arrive, minus carriage
//! returns. The surface closes itself after a fixed listening time.

use std::io::Write;
use std::time::{Duration, Instant};

use ghostlink_core::traits::ResponseSurface;
use log::warn;

pub struct StreamSurface<W> {
    out: W,
    listen: Duration,
    opened: Option<Instant>,
    bytes: usize,
}

impl<W: Write> StreamSurface<W> {
    pub fn new(out: W, listen: Duration) -> Self {
        Self {
            out,
            listen,
            opened: None,
            bytes: 0,
        }
    }

    /// Bytes received since the surface was opened
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResponseSurface for StreamSurface<W> {
    fn open(&mut self, _header: &str) {
        self.opened = Some(Instant::now());
        self.bytes = 0;
    }

    fn append(&mut self, bytes: &[u8]) {
        self.bytes += bytes.len();
        let text: Vec<u8> = bytes.iter().copied().filter(|b| *b != b'\r').collect();
        if self.out.write_all(&text).and_then(|_| self.out.flush()).is_err() {
            warn!("output closed");
        }
    }

    fn is_open(&mut self) -> bool {
        self.opened
            .map(|at| at.elapsed() < self.listen)
            .unwrap_or(false)
    }
}
