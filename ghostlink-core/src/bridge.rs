//! Command/response bridge
//!
//! One bridge cycle writes a command to the firmware, streams whatever comes
//! back into a [`ResponseSurface`] until the user dismisses it, then writes
//! `stop`:
//!
//! ```text
//!  write cmd ─► open surface ─► drain stale ─► ┌─ read (poll timeout) ─┐
//!                                              │  bytes → append       │
//!                                              └─ while surface open ◄─┘
//!                                                        │
//!                                                   write "stop"
//! ```
//!
//! A read that returns nothing is not an error. The firmware being silent
//! and the firmware being unplugged look the same from here.

use ghostlink_hal::{Clock, Uart, UartTx};
use ghostlink_protocol::{Command, Upload, MAX_LINE_LEN};
use log::{debug, info, trace, warn};

use crate::config::BridgeConfig;
use crate::menu::MenuId;
use crate::traits::ResponseSurface;

/// Size of one read chunk
const READ_CHUNK: usize = 64;

/// Why the streaming loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExitReason {
    /// User closed the surface
    Dismissed,
    /// Firmware stayed silent past the give-up window
    IdleTimeout,
}

/// Result of one completed bridge cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Menu to show next
    pub return_to: MenuId,
    /// Why streaming stopped
    pub reason: ExitReason,
    /// Bytes appended to the surface
    pub bytes_received: usize,
    /// Stale bytes discarded before streaming
    pub bytes_drained: usize,
    /// Poll reads made while streaming
    pub reads: u32,
    /// Reads that failed and were treated as silence
    pub read_errors: u32,
    /// Whether the trailing `stop` reached the transport
    pub stop_sent: bool,
}

/// Bridge errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError<E> {
    /// Command could not be written; `stop` was still attempted
    Transport(E),
}

/// Serial command/response bridge
///
/// Owns the firmware link and a clock. Stateless between cycles.
pub struct Bridge<T, C> {
    link: T,
    clock: C,
    config: BridgeConfig,
}

impl<T, C> Bridge<T, C>
where
    T: Uart,
    C: Clock,
{
    /// Create a bridge over a link
    pub fn new(link: T, clock: C, config: BridgeConfig) -> Self {
        Self {
            link,
            clock,
            config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Access the underlying link
    pub fn link(&self) -> &T {
        &self.link
    }

    /// Mutable access to the underlying link
    pub fn link_mut(&mut self) -> &mut T {
        &mut self.link
    }

    /// Access the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Give back the link and clock
    pub fn into_parts(self) -> (T, C) {
        (self.link, self.clock)
    }

    /// Run one command cycle
    ///
    /// Writes `command`, streams the response into `surface` until it is
    /// dismissed, then writes `stop`. The returned [`Cycle`] names the menu
    /// to go back to.
    pub fn send_command<S>(
        &mut self,
        command: &Command,
        return_to: MenuId,
        surface: &mut S,
    ) -> Result<Cycle, BridgeError<<T as UartTx>::Error>>
    where
        S: ResponseSurface + ?Sized,
    {
        debug!("sending '{}'", command);
        if let Err(e) = self.write_line(command) {
            warn!("write of '{}' failed, sending stop anyway", command);
            self.send_stop();
            return Err(BridgeError::Transport(e));
        }
        Ok(self.stream(command.as_str(), return_to, surface))
    }

    /// Run one payload upload cycle
    ///
    /// Same as [`Bridge::send_command`] but writes the upload prefix, the raw
    /// body and the terminator instead of a command line.
    pub fn upload<S>(
        &mut self,
        upload: &Upload<'_>,
        return_to: MenuId,
        surface: &mut S,
    ) -> Result<Cycle, BridgeError<<T as UartTx>::Error>>
    where
        S: ResponseSurface + ?Sized,
    {
        debug!(
            "uploading {} ({} bytes)",
            upload.kind().label(),
            upload.body().len()
        );
        let written = upload
            .segments()
            .iter()
            .try_for_each(|segment| self.link.write_all(segment))
            .and_then(|_| self.link.flush());
        if let Err(e) = written {
            warn!("upload write failed, sending stop anyway");
            self.send_stop();
            return Err(BridgeError::Transport(e));
        }
        Ok(self.stream(upload.kind().label(), return_to, surface))
    }

    /// Write `stop` once
    ///
    /// Best effort: failures are logged, not retried. Returns whether the
    /// write succeeded.
    pub fn send_stop(&mut self) -> bool {
        match self.write_line(&Command::stop()) {
            Ok(()) => {
                trace!("stop sent");
                true
            }
            Err(_) => {
                warn!("stop could not be written");
                false
            }
        }
    }

    fn write_line(&mut self, command: &Command) -> Result<(), <T as UartTx>::Error> {
        let mut line = [0u8; MAX_LINE_LEN];
        // A Command never exceeds MAX_COMMAND_LEN, so the line always fits
        let len = command
            .encode(self.config.line_ending, &mut line)
            .unwrap_or(0);
        self.link.write_all(&line[..len])?;
        self.link.flush()
    }

    fn stream<S>(&mut self, header: &str, return_to: MenuId, surface: &mut S) -> Cycle
    where
        S: ResponseSurface + ?Sized,
    {
        surface.open(header);

        let mut cycle = Cycle {
            return_to,
            reason: ExitReason::Dismissed,
            bytes_received: 0,
            bytes_drained: 0,
            reads: 0,
            read_errors: 0,
            stop_sent: false,
        };

        match self
            .link
            .drain(self.config.drain_timeout_ms, self.config.max_drain_reads)
        {
            Ok(0) => {}
            Ok(n) => {
                debug!("discarded {} stale bytes", n);
                cycle.bytes_drained = n;
            }
            Err(_) => warn!("drain failed"),
        }

        let mut buf = [0u8; READ_CHUNK];
        let mut last_rx_ms = self.clock.now_ms();

        while surface.is_open() {
            let received = self.poll(&mut buf, self.config.poll_timeout_ms, &mut cycle);
            if received > 0 {
                surface.append(&buf[..received]);
                cycle.bytes_received += received;
                last_rx_ms = self.clock.now_ms();
                continue;
            }

            let Some(give_up) = self.config.idle_give_up else {
                continue;
            };
            if self.clock.elapsed_ms(last_rx_ms) < give_up.silence_ms as u64 {
                continue;
            }

            info!(
                "no data for {} ms, retrying once in {} ms",
                give_up.silence_ms, give_up.retry_delay_ms
            );
            self.clock.delay_ms(give_up.retry_delay_ms);
            if !surface.is_open() {
                break;
            }
            let received = self.poll(&mut buf, self.config.poll_timeout_ms, &mut cycle);
            if received > 0 {
                surface.append(&buf[..received]);
                cycle.bytes_received += received;
                last_rx_ms = self.clock.now_ms();
                continue;
            }

            self.clock.delay_ms(give_up.final_delay_ms);
            cycle.reason = ExitReason::IdleTimeout;
            break;
        }

        cycle.stop_sent = self.send_stop();
        debug!(
            "cycle done: {:?}, {} bytes in {} reads",
            cycle.reason, cycle.bytes_received, cycle.reads
        );
        cycle
    }

    /// One bounded read; errors count as silence
    fn poll(&mut self, buf: &mut [u8], timeout_ms: u32, cycle: &mut Cycle) -> usize {
        cycle.reads += 1;
        match self.link.read_timeout(buf, timeout_ms) {
            Ok(n) => {
                if n > 0 {
                    trace!("rx {} bytes", n);
                }
                n
            }
            Err(_) => {
                cycle.read_errors += 1;
                warn!("read failed, treating as silence");
                0
            }
        }
    }
}
