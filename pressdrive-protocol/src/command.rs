//! Operator command grammar
//!
//! Three line forms are accepted, checked in this order:
//!
//! ```text
//! stop                 halt every axis (case-insensitive)
//! M<1-6><+|-><steps>   relative manual move, e.g. M1+100, m6-050
//! P<1-6>-<psi>         closed-loop pressure target, e.g. P3-5.00
//! ```
//!
//! Note that the `-` in the pressure form is a separator, not a sign.

use core::fmt;

use crate::axis::{AxisId, TargetRange};

/// Keyword that halts every axis
const STOP_KEYWORD: &str = "stop";

/// A validated operator intent
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Halt every axis and drive all outputs low
    StopAll,
    /// Open-loop relative move; the sign selects the direction
    ManualMove { axis: AxisId, steps: i32 },
    /// Closed-loop move toward a target pressure
    SetPressure { axis: AxisId, target_psi: f32 },
}

impl Command {
    /// Axis addressed by this command, or `None` for broadcasts
    pub fn axis(&self) -> Option<AxisId> {
        match self {
            Command::StopAll => None,
            Command::ManualMove { axis, .. } | Command::SetPressure { axis, .. } => Some(*axis),
        }
    }
}

/// Reasons a command line is rejected
///
/// A rejected command has no side effects on any axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line does not match any accepted form
    MalformedCommand,
    /// Axis digit outside 1..=6
    InvalidAxis,
    /// Manual move of zero steps
    InvalidStepCount,
    /// Pressure target outside the configured range
    OutOfRange,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MalformedCommand => f.write_str("Format: P#-# or M#±steps"),
            CommandError::InvalidAxis => f.write_str("Axis must be 1-6"),
            CommandError::InvalidStepCount => f.write_str("Steps must be nonzero"),
            CommandError::OutOfRange => f.write_str("Target out of range"),
        }
    }
}

/// Parse one command line
///
/// Surrounding whitespace is ignored and the command letters are
/// case-insensitive. `range` bounds the accepted pressure targets.
pub fn parse_command(line: &str, range: &TargetRange) -> Result<Command, CommandError> {
    let line = line.trim();

    if line.eq_ignore_ascii_case(STOP_KEYWORD) {
        return Ok(Command::StopAll);
    }

    let mut chars = line.chars();
    match chars.next() {
        Some('M') | Some('m') => parse_manual_move(chars.as_str()),
        Some('P') | Some('p') => parse_set_pressure(chars.as_str(), range),
        _ => Err(CommandError::MalformedCommand),
    }
}

/// Split the axis digit off the front of `rest`
fn parse_axis(rest: &str) -> Result<(AxisId, &str), CommandError> {
    let mut chars = rest.chars();
    let digit = chars.next().ok_or(CommandError::MalformedCommand)?;
    if !digit.is_ascii_digit() {
        return Err(CommandError::MalformedCommand);
    }
    let axis = AxisId::from_digit(digit).ok_or(CommandError::InvalidAxis)?;
    Ok((axis, chars.as_str()))
}

/// `<axis><+|-><steps>`
fn parse_manual_move(rest: &str) -> Result<Command, CommandError> {
    let (axis, rest) = parse_axis(rest)?;

    let mut chars = rest.chars();
    let negative = match chars.next() {
        Some('+') => false,
        Some('-') => true,
        _ => return Err(CommandError::MalformedCommand),
    };

    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::MalformedCommand);
    }

    let magnitude: u32 = digits
        .parse()
        .map_err(|_| CommandError::MalformedCommand)?;
    if magnitude == 0 {
        return Err(CommandError::InvalidStepCount);
    }
    let magnitude = i32::try_from(magnitude).map_err(|_| CommandError::MalformedCommand)?;

    let steps = if negative { -magnitude } else { magnitude };
    Ok(Command::ManualMove { axis, steps })
}

/// `<axis>-<psi>`
fn parse_set_pressure(rest: &str, range: &TargetRange) -> Result<Command, CommandError> {
    let (axis, rest) = parse_axis(rest)?;

    let value = rest
        .strip_prefix('-')
        .ok_or(CommandError::MalformedCommand)?;
    if value.is_empty() {
        return Err(CommandError::MalformedCommand);
    }

    let target_psi: f32 = value
        .parse()
        .map_err(|_| CommandError::MalformedCommand)?;
    if !range.contains(target_psi) {
        return Err(CommandError::OutOfRange);
    }

    Ok(Command::SetPressure { axis, target_psi })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: TargetRange = TargetRange::new(0.0, 15.0);

    fn axis(label: u8) -> AxisId {
        AxisId::from_label(label).unwrap()
    }

    #[test]
    fn test_parse_stop() {
        assert_eq!(parse_command("stop", &RANGE), Ok(Command::StopAll));
        assert_eq!(parse_command("  STOP \r", &RANGE), Ok(Command::StopAll));
        assert_eq!(parse_command("Stop", &RANGE), Ok(Command::StopAll));
    }

    #[test]
    fn test_parse_set_pressure() {
        assert_eq!(
            parse_command("P3-5.00", &RANGE),
            Ok(Command::SetPressure {
                axis: axis(3),
                target_psi: 5.0
            })
        );
        assert_eq!(
            parse_command("p1-0", &RANGE),
            Ok(Command::SetPressure {
                axis: axis(1),
                target_psi: 0.0
            })
        );
    }

    #[test]
    fn test_parse_manual_move() {
        assert_eq!(
            parse_command("M1+100", &RANGE),
            Ok(Command::ManualMove {
                axis: axis(1),
                steps: 100
            })
        );
        assert_eq!(
            parse_command("m6-050", &RANGE),
            Ok(Command::ManualMove {
                axis: axis(6),
                steps: -50
            })
        );
    }

    #[test]
    fn test_malformed() {
        for line in [
            "bogus", "", "M", "P", "M1", "M1*5", "M1+", "M1++5", "M1+5x", "M12+5", "P1+5",
            "P1-", "P1-abc", "Mx+5", "stop now",
        ] {
            assert_eq!(
                parse_command(line, &RANGE),
                Err(CommandError::MalformedCommand),
                "line {:?}",
                line
            );
        }
    }

    #[test]
    fn test_invalid_axis() {
        assert_eq!(
            parse_command("M7+10", &RANGE),
            Err(CommandError::InvalidAxis)
        );
        assert_eq!(
            parse_command("M0-10", &RANGE),
            Err(CommandError::InvalidAxis)
        );
        assert_eq!(
            parse_command("P9-1.0", &RANGE),
            Err(CommandError::InvalidAxis)
        );
    }

    #[test]
    fn test_zero_steps() {
        assert_eq!(
            parse_command("M2+0", &RANGE),
            Err(CommandError::InvalidStepCount)
        );
        assert_eq!(
            parse_command("M2-000", &RANGE),
            Err(CommandError::InvalidStepCount)
        );
    }

    #[test]
    fn test_step_overflow() {
        assert_eq!(
            parse_command("M1+2147483648", &RANGE),
            Err(CommandError::MalformedCommand)
        );
        assert_eq!(
            parse_command("M1+99999999999", &RANGE),
            Err(CommandError::MalformedCommand)
        );
        assert!(parse_command("M1+2147483647", &RANGE).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        let narrow = TargetRange::new(0.25, 12.5);
        assert_eq!(
            parse_command("P1-12.6", &narrow),
            Err(CommandError::OutOfRange)
        );
        assert_eq!(
            parse_command("P1-0.1", &narrow),
            Err(CommandError::OutOfRange)
        );
        assert_eq!(
            parse_command("P1--3", &RANGE),
            Err(CommandError::OutOfRange)
        );
        assert_eq!(
            parse_command("P1-nan", &RANGE),
            Err(CommandError::OutOfRange)
        );
        assert!(parse_command("P1-12.5", &narrow).is_ok());
    }

    #[test]
    fn test_command_axis() {
        assert_eq!(Command::StopAll.axis(), None);
        let cmd = parse_command("M4-1", &RANGE).unwrap();
        assert_eq!(cmd.axis(), Some(axis(4)));
    }
}
