//! Per-tick axis outcomes

use crate::traits::StepBurst;

/// Result of advancing one axis by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisEvent {
    /// Axis is idle; nothing to do
    NoOp,
    /// Emit this burst; the axis keeps its mode
    Step(StepBurst),
    /// Reading settled within tolerance; axis is now idle
    ReachedTarget(f32),
    /// Emit this final burst; the manual move is finished and the axis is idle
    ManualComplete(StepBurst),
}

impl AxisEvent {
    /// Step pulses to emit for this event, if any
    pub fn burst(&self) -> Option<StepBurst> {
        match self {
            AxisEvent::Step(burst) | AxisEvent::ManualComplete(burst) => Some(*burst),
            AxisEvent::NoOp | AxisEvent::ReachedTarget(_) => None,
        }
    }

    /// Check if the axis returned to idle on this tick
    pub fn is_completion(&self) -> bool {
        matches!(self, AxisEvent::ReachedTarget(_) | AxisEvent::ManualComplete(_))
    }
}
