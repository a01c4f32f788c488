//! Operator console traits
//!
//! The console is the text channel to the operator. The core consumes
//! raw bytes and produces complete lines; framing and line endings on
//! the wire are the implementation's business.

/// Source of command bytes
pub trait CommandInput {
    /// Take the next received byte, if one is available
    ///
    /// Must not block.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Sink for response and telemetry lines
pub trait TelemetryOutput {
    /// Write one line; the implementation appends the line terminator
    fn write_line(&mut self, line: &str);
}
