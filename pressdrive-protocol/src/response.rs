//! Acknowledgment, event and error lines sent to the operator
//!
//! Every command produces exactly one [`Response`]; axes that finish
//! their motion produce one more.

use core::fmt::{self, Write};

use heapless::String;

use crate::axis::AxisId;
use crate::command::CommandError;

/// Maximum rendered response length in bytes
pub const MAX_RESPONSE_LEN: usize = 96;

/// A rendered response line (without line terminator)
pub type ResponseLine = String<MAX_RESPONSE_LEN>;

/// Lines the controller sends besides telemetry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Pressure target accepted
    TargetSet { axis: AxisId, target_psi: f32 },
    /// Manual move accepted
    MoveAccepted { axis: AxisId, steps: i32 },
    /// Every axis halted
    Stopped,
    /// Axis settled within tolerance of its pressure target
    TargetReached { axis: AxisId, psi: f32 },
    /// Axis finished its manual move
    ManualComplete { axis: AxisId },
    /// Command rejected; no axis was changed
    Rejected(CommandError),
}

impl Response {
    /// Check if this is an `ERR:` line
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Rejected(_))
    }

    /// Render into a fixed-capacity line
    ///
    /// Every form fits in [`MAX_RESPONSE_LEN`] for targets inside a
    /// [`TargetRange`](crate::TargetRange) and any `i32` step count.
    pub fn to_line(&self) -> ResponseLine {
        let mut line = ResponseLine::new();
        let written = write!(line, "{}", self);
        debug_assert!(written.is_ok(), "response line overflow");
        line
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::TargetSet { axis, target_psi } => {
                write!(f, "SET: P{} -> {:.2} psi", axis, target_psi)
            }
            Response::MoveAccepted { axis, steps } => {
                write!(f, "MOV: M{} {:+} steps", axis, steps)
            }
            Response::Stopped => f.write_str("STOP: All motors halted"),
            Response::TargetReached { axis, psi } => {
                write!(f, "DONE: P{} = {:.2} psi", axis, psi)
            }
            Response::ManualComplete { axis } => {
                write!(f, "DONE: M{} manual move complete", axis)
            }
            Response::Rejected(error) => write!(f, "ERR: {}", error),
        }
    }
}

impl From<CommandError> for Response {
    fn from(error: CommandError) -> Self {
        Response::Rejected(error)
    }
}
