//! Serial port transport
//!
//! Wraps a `serial` system port in the HAL's UART traits. A read that times
//! out is reported as zero bytes, never as an error.

use std::io::{self, Read, Write};
use std::time::Duration;

use ghostlink_hal::uart::{DataBits, Parity, StopBits};
use ghostlink_hal::{UartConfig, UartRx, UartTx};
use log::debug;
use serial::prelude::*;
use serial::SystemPort;

use crate::error::{HostError, Result};

/// Firmware link over a serial device
pub struct SerialLink {
    port: SystemPort,
    timeout_ms: Option<u32>,
}

impl SerialLink {
    /// Open and configure a serial device
    pub fn open(path: &str, config: &UartConfig) -> Result<Self> {
        let to_host = |source| HostError::Serial {
            path: path.to_string(),
            source,
        };

        let mut port = serial::open(path).map_err(to_host)?;
        port.reconfigure(&|s| {
            s.set_baud_rate(serial::BaudRate::from_speed(config.baudrate as usize))?;
            s.set_char_size(match config.data_bits {
                DataBits::Seven => serial::Bits7,
                DataBits::Eight => serial::Bits8,
            });
            s.set_parity(match config.parity {
                Parity::None => serial::ParityNone,
                Parity::Even => serial::ParityEven,
                Parity::Odd => serial::ParityOdd,
            });
            s.set_stop_bits(match config.stop_bits {
                StopBits::One => serial::Stop1,
                StopBits::Two => serial::Stop2,
            });
            s.set_flow_control(serial::FlowNone);
            Ok(())
        })
        .map_err(to_host)?;

        debug!("opened {} at {} baud", path, config.baudrate);
        Ok(Self {
            port,
            timeout_ms: None,
        })
    }

    fn set_timeout(&mut self, timeout_ms: u32) -> io::Result<()> {
        if self.timeout_ms != Some(timeout_ms) {
            self.port
                .set_timeout(Duration::from_millis(timeout_ms as u64))
                .map_err(io::Error::from)?;
            self.timeout_ms = Some(timeout_ms);
        }
        Ok(())
    }
}

impl UartTx for SerialLink {
    type Error = io::Error;

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        Write::write_all(&mut self.port, data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.port)
    }
}

impl UartRx for SerialLink {
    type Error = io::Error;

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: u32) -> io::Result<usize> {
        self.set_timeout(timeout_ms)?;
        loop {
            match self.port.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if e.kind() == io::ErrorKind::TimedOut => return Ok(0),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(0),
                Err(e) => return Err(e),
            }
        }
    }
}
