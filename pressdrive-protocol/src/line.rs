//! Line assembly from a raw byte stream
//!
//! The serial transport delivers bytes one at a time. [`LineBuffer`]
//! collects them until a line terminator and then hands the complete
//! line out by value, leaving itself empty for the next command.

use core::fmt;

use heapless::{String, Vec};

/// Maximum accepted command line length in bytes (excluding terminator)
pub const MAX_LINE_LEN: usize = 64;

/// A complete command line
pub type Line = String<MAX_LINE_LEN>;

/// Errors reported when a line terminator is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; the whole line was discarded
    TooLong,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::TooLong => write!(f, "line longer than {} bytes", MAX_LINE_LEN),
            LineError::InvalidUtf8 => f.write_str("line is not valid UTF-8"),
        }
    }
}

/// Accumulates bytes into command lines
///
/// Both `\n` and `\r` terminate a line. A terminator with nothing
/// buffered is ignored, so `\r\n` endings produce a single line.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Set once a byte had to be dropped; cleared at the next terminator
    overflowed: bool,
}

impl LineBuffer {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Discard any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of bytes currently buffered
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && !self.overflowed
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty
    /// line, `Ok(None)` when more bytes are needed, or `Err` when the
    /// completed line had to be discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match byte {
            b'\n' | b'\r' => self.finish(),
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                Ok(None)
            }
        }
    }

    fn finish(&mut self) -> Result<Option<Line>, LineError> {
        if self.overflowed {
            self.reset();
            return Err(LineError::TooLong);
        }
        if self.buffer.is_empty() {
            return Ok(None);
        }

        let bytes = core::mem::take(&mut self.buffer);
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| LineError::InvalidUtf8)
    }
}
