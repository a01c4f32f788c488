//! Stepper output trait
//!
//! Abstracts the step/direction interface of a stepper driver (A4988,
//! DRV8825, TMC in step/dir mode, ...).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of linear travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Toward higher pressure (direction output high)
    Forward,
    /// Toward lower pressure (direction output low)
    Reverse,
}

impl Direction {
    /// Direction for a signed step count (zero maps to forward)
    pub fn from_signed(steps: i32) -> Self {
        if steps < 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Sign applied to a step count travelling in this direction
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// A bounded run of step pulses in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepBurst {
    /// Travel direction for the whole burst
    pub direction: Direction,
    /// Number of pulses
    pub steps: u32,
}

impl StepBurst {
    /// Create a new burst
    pub const fn new(direction: Direction, steps: u32) -> Self {
        Self { direction, steps }
    }

    /// Signed displacement of this burst
    pub fn signed_steps(&self) -> i64 {
        self.direction.sign() as i64 * self.steps as i64
    }
}

/// Trait for step/direction outputs
///
/// Pulse generation blocks for the configured high and low hold times.
/// Implementations may use busy-wait delays or a hardware timer as long
/// as `pulse` returns only after the full pulse has been emitted.
pub trait StepperOutput {
    /// Set the direction output
    fn set_direction(&mut self, direction: Direction);

    /// Emit one step pulse: step high, hold, step low, hold
    fn pulse(&mut self);

    /// Drive both step and direction outputs low
    fn release(&mut self);

    /// Duration of one pulse (high plus low time) in microseconds
    ///
    /// The scheduler checks this against the tick period before it
    /// accepts the output.
    fn pulse_period_us(&self) -> u64;

    /// Emit a whole burst
    ///
    /// Direction is set once before the first pulse.
    fn emit_burst(&mut self, burst: StepBurst) {
        self.set_direction(burst.direction);
        for _ in 0..burst.steps {
            self.pulse();
        }
    }
}
