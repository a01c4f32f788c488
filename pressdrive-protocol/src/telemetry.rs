//! Per-tick pressure telemetry
//!
//! Once per control tick the controller prints the six latest readings,
//! tab separated with two decimals, in axis order P1..P6:
//!
//! ```text
//! 0.00\t1.25\t5.01\t0.00\t14.98\t0.00
//! ```
//!
//! The host side of the link separates these lines from event lines
//! with [`classify_line`].

use core::fmt::Write;

use heapless::String;

use crate::axis::AXIS_COUNT;

/// Maximum rendered telemetry line length in bytes
pub const MAX_TELEMETRY_LEN: usize = 96;

/// Banner printed once when the controller starts
pub const HEADER_LINES: [&str; 3] = [
    "Pressure Readings:",
    "P1\tP2\tP3\tP4\tP5\tP6",
    "----------------------------------------",
];

/// Prefixes that mark an event line on the host side
const EVENT_PREFIXES: [&str; 6] = ["SET:", "DONE:", "ERR:", "STOP:", "OK:", "MOV:"];

/// Render one telemetry line
pub fn format_readings(readings: &[f32; AXIS_COUNT]) -> String<MAX_TELEMETRY_LEN> {
    let mut line = String::new();
    for (i, psi) in readings.iter().enumerate() {
        // Readings are clamped to the sensor span, so six "dd.dd" fields fit
        if i > 0 {
            let pushed = line.push('\t');
            debug_assert!(pushed.is_ok(), "telemetry line overflow");
        }
        let written = write!(line, "{:.2}", psi);
        debug_assert!(written.is_ok(), "telemetry line overflow");
    }
    line
}

/// Parse a telemetry line back into readings
///
/// Accepts exactly six tab-separated numeric fields; anything else is
/// not a telemetry line.
pub fn parse_readings(line: &str) -> Option<[f32; AXIS_COUNT]> {
    let mut readings = [0.0f32; AXIS_COUNT];
    let mut fields = line.trim().split('\t');

    for slot in readings.iter_mut() {
        let field = fields.next()?.trim();
        if field.is_empty()
            || !field
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'))
        {
            return None;
        }
        *slot = field.parse().ok()?;
    }

    if fields.next().is_some() {
        return None;
    }
    Some(readings)
}

/// A line received by the host, classified
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostLine<'a> {
    /// Telemetry with six readings
    Readings([f32; AXIS_COUNT]),
    /// Acknowledgment, completion or error line
    Event(&'a str),
    /// Banner or anything unrecognised
    Other(&'a str),
}

/// Classify a line received from the controller
pub fn classify_line(line: &str) -> HostLine<'_> {
    let line = line.trim();
    if let Some(readings) = parse_readings(line) {
        return HostLine::Readings(readings);
    }
    if EVENT_PREFIXES.iter().any(|prefix| line.contains(prefix)) {
        return HostLine::Event(line);
    }
    HostLine::Other(line)
}
