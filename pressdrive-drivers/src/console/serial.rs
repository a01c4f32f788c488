//! Serial operator console
//!
//! Wraps any byte stream implementing `embedded-io` [`Read`],
//! [`ReadReady`] and [`Write`] (a UART, USB CDC-ACM, ...). Reads never
//! block: a byte is only taken when the port reports one is ready.
//!
//! Output lines are terminated with `\r\n`. A failed write drops the
//! line and bumps [`SerialConsole::dropped_lines`]; the control loop
//! keeps running.

use embedded_io::{Read, ReadReady, Write};
use pressdrive_core::traits::{CommandInput, TelemetryOutput};

/// Line terminator sent after every output line
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Serial console over an `embedded-io` port
pub struct SerialConsole<T> {
    port: T,
    dropped_lines: u32,
}

impl<T> SerialConsole<T>
where
    T: Read + ReadReady + Write,
{
    /// Create a new console
    pub fn new(port: T) -> Self {
        Self {
            port,
            dropped_lines: 0,
        }
    }

    /// Lines lost to write errors since creation
    pub fn dropped_lines(&self) -> u32 {
        self.dropped_lines
    }

    /// Get mutable access to the port
    pub fn port_mut(&mut self) -> &mut T {
        &mut self.port
    }

    /// Release the port
    pub fn free(self) -> T {
        self.port
    }
}

impl<T> CommandInput for SerialConsole<T>
where
    T: Read + ReadReady + Write,
{
    fn read_byte(&mut self) -> Option<u8> {
        match self.port.read_ready() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Console read_ready failed");
                return None;
            }
        }

        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Console read failed");
                None
            }
        }
    }
}

impl<T> TelemetryOutput for SerialConsole<T>
where
    T: Read + ReadReady + Write,
{
    fn write_line(&mut self, line: &str) {
        let result = self
            .port
            .write_all(line.as_bytes())
            .and_then(|()| self.port.write_all(LINE_ENDING));

        if result.is_err() {
            self.dropped_lines = self.dropped_lines.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("Console write failed ({} lines dropped)", self.dropped_lines);
        }
    }
}
