//! Axis state machine
//!
//! An axis is one stepper-driven actuator plus the pressure sensor that
//! closes its loop. Commands move it into a seeking or stepping mode;
//! [`Axis::advance`] is called once per tick and moves it back to idle
//! when the motion is done.
//!
//! `advance` never emits more than the per-tick step budget, so the time
//! an axis can block the loop is bounded regardless of how far the motor
//! still has to travel.

pub mod event;
pub mod mode;

pub use event::AxisEvent;
pub use mode::AxisMode;

use pressdrive_protocol::{AxisId, CommandError};

use crate::config::{AxisConfig, ControlPolicy};
use crate::traits::{Direction, StepBurst};

/// One actuator axis
#[derive(Debug, Clone)]
pub struct Axis {
    id: AxisId,
    config: AxisConfig,
    policy: ControlPolicy,
    mode: AxisMode,
}

impl Axis {
    /// Create an idle axis
    pub fn new(id: AxisId, config: AxisConfig, policy: ControlPolicy) -> Self {
        Self {
            id,
            config,
            policy,
            mode: AxisMode::Idle,
        }
    }

    /// Get the axis id
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Get the static wiring
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Get the control policy
    pub fn policy(&self) -> &ControlPolicy {
        &self.policy
    }

    /// Get the current mode
    pub fn mode(&self) -> AxisMode {
        self.mode
    }

    /// Check if the axis is idle
    pub fn is_idle(&self) -> bool {
        self.mode.is_idle()
    }

    /// Start seeking a pressure target
    ///
    /// Replaces any manual move in progress. Outputs are not touched
    /// until the next [`advance`](Self::advance).
    pub fn set_pressure_target(&mut self, target_psi: f32) -> Result<(), CommandError> {
        if !self.policy.target_range.contains(target_psi) {
            return Err(CommandError::OutOfRange);
        }
        self.mode = AxisMode::PressureSeeking { target_psi };
        Ok(())
    }

    /// Start a relative manual move
    ///
    /// Replaces any pressure target in progress.
    pub fn set_manual_move(&mut self, steps: i32) -> Result<(), CommandError> {
        if steps == 0 {
            return Err(CommandError::InvalidStepCount);
        }
        self.mode = AxisMode::ManualStepping { remaining: steps };
        Ok(())
    }

    /// Drop whatever the axis was doing
    ///
    /// The caller is responsible for driving the step and direction
    /// outputs low.
    pub fn stop(&mut self) {
        self.mode = AxisMode::Idle;
    }

    /// Advance the axis by one tick
    ///
    /// `current_psi` is this axis' latest reading; `max_steps_per_tick`
    /// bounds the burst. A budget of zero is treated as one, since it
    /// could never finish a manual move.
    pub fn advance(&mut self, current_psi: f32, max_steps_per_tick: u32) -> AxisEvent {
        let budget = max_steps_per_tick.max(1);

        match self.mode {
            AxisMode::Idle => AxisEvent::NoOp,

            AxisMode::PressureSeeking { target_psi } => {
                if self.policy.within_tolerance(current_psi, target_psi) {
                    self.mode = AxisMode::Idle;
                    return AxisEvent::ReachedTarget(current_psi);
                }

                let direction = if current_psi < target_psi {
                    Direction::Forward
                } else {
                    Direction::Reverse
                };
                AxisEvent::Step(StepBurst::new(direction, budget))
            }

            AxisMode::ManualStepping { remaining } => {
                let steps = remaining.unsigned_abs().min(budget);
                let burst = StepBurst::new(Direction::from_signed(remaining), steps);

                // |burst| <= |remaining|, so the difference fits back into i32
                let left = (remaining as i64 - burst.signed_steps()) as i32;
                if left == 0 {
                    self.mode = AxisMode::Idle;
                    AxisEvent::ManualComplete(burst)
                } else {
                    self.mode = AxisMode::ManualStepping { remaining: left };
                    AxisEvent::Step(burst)
                }
            }
        }
    }
}
