//! Axis control modes

/// What an axis is currently doing
///
/// Pressure seeking and manual stepping are mutually exclusive; entering
/// one discards the other.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisMode {
    /// Not moving
    Idle,
    /// Closed loop: step toward `target_psi` until within tolerance
    PressureSeeking { target_psi: f32 },
    /// Open loop: emit `remaining` signed steps, ignoring the sensor
    ///
    /// `remaining` is never zero while in this mode.
    ManualStepping { remaining: i32 },
}

impl AxisMode {
    /// Check if the axis is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, AxisMode::Idle)
    }

    /// Pressure target, if seeking
    pub fn target_psi(&self) -> Option<f32> {
        match self {
            AxisMode::PressureSeeking { target_psi } => Some(*target_psi),
            _ => None,
        }
    }

    /// Remaining manual steps, if stepping
    pub fn remaining_steps(&self) -> Option<i32> {
        match self {
            AxisMode::ManualStepping { remaining } => Some(*remaining),
            _ => None,
        }
    }
}
