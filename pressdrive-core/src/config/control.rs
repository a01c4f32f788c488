//! Control policy and loop timing
//!
//! The accepted target range and the arrival tolerance have changed
//! between hardware revisions, so both live here as named defaults that a
//! board can override rather than being baked into the algorithm.

use core::fmt;

use pressdrive_protocol::TargetRange;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest accepted pressure target (psi)
pub const DEFAULT_TARGET_MIN_PSI: f32 = 0.0;

/// Highest accepted pressure target (psi)
pub const DEFAULT_TARGET_MAX_PSI: f32 = 15.0;

/// Deadband around a target within which an axis counts as arrived (psi)
pub const DEFAULT_TOLERANCE_PSI: f32 = 0.05;

/// Rounding margin added to the tolerance band
///
/// Readings and targets such as 5.05 or 0.95 have no exact `f32` form, so
/// a reading sitting on the band edge can differ from the target by a
/// hair more than the tolerance.
pub const TOLERANCE_EPSILON_PSI: f32 = 1e-4;

/// Step pulses an axis may emit per tick
pub const DEFAULT_STEPS_PER_TICK: u32 = 10;

/// Scheduler tick period (10 ms, 100 Hz)
pub const DEFAULT_TICK_PERIOD_US: u32 = 10_000;

/// Step output high and low hold time
pub const DEFAULT_PULSE_US: u32 = 500;

/// Closed-loop policy carried by every axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlPolicy {
    /// Accepted pressure targets
    pub target_range: TargetRange,
    /// Arrival deadband, see [`ControlPolicy::within_tolerance`]
    pub tolerance_psi: f32,
}

impl ControlPolicy {
    /// Check whether a reading counts as arrived at `target_psi`
    ///
    /// The band edge is inclusive. NaN readings never arrive.
    pub fn within_tolerance(&self, current_psi: f32, target_psi: f32) -> bool {
        let error = current_psi - target_psi;
        let band = self.tolerance_psi + TOLERANCE_EPSILON_PSI;
        error >= -band && error <= band
    }
}

impl Default for ControlPolicy {
    fn default() -> Self {
        Self {
            target_range: TargetRange::new(DEFAULT_TARGET_MIN_PSI, DEFAULT_TARGET_MAX_PSI),
            tolerance_psi: DEFAULT_TOLERANCE_PSI,
        }
    }
}

/// Complete control loop configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Closed-loop policy
    pub policy: ControlPolicy,
    /// Maximum step pulses per axis per tick
    pub steps_per_tick: u32,
    /// Tick period in microseconds
    pub tick_period_us: u32,
    /// Step output high time in microseconds
    pub pulse_high_us: u32,
    /// Step output low time in microseconds
    pub pulse_low_us: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            policy: ControlPolicy::default(),
            steps_per_tick: DEFAULT_STEPS_PER_TICK,
            tick_period_us: DEFAULT_TICK_PERIOD_US,
            pulse_high_us: DEFAULT_PULSE_US,
            pulse_low_us: DEFAULT_PULSE_US,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `steps_per_tick` is zero; no axis could ever move
    ZeroStepsPerTick,
    /// `tick_period_us` is zero
    ZeroTickPeriod,
    /// A pulse phase has zero duration
    ZeroPulseWidth,
    /// Tolerance is negative or not finite
    InvalidTolerance,
    /// Target range is inverted or not finite
    InvalidTargetRange,
    /// One axis' worst-case burst is longer than a tick
    BurstExceedsTick,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroStepsPerTick => f.write_str("steps per tick must be nonzero"),
            ConfigError::ZeroTickPeriod => f.write_str("tick period must be nonzero"),
            ConfigError::ZeroPulseWidth => f.write_str("pulse high/low time must be nonzero"),
            ConfigError::InvalidTolerance => f.write_str("tolerance must be finite and >= 0"),
            ConfigError::InvalidTargetRange => f.write_str("target range must be finite, min <= max"),
            ConfigError::BurstExceedsTick => f.write_str("step burst longer than one tick"),
        }
    }
}

impl ControlConfig {
    /// Duration of a single step pulse (high + low)
    pub fn pulse_period_us(&self) -> u64 {
        self.pulse_high_us as u64 + self.pulse_low_us as u64
    }

    /// Longest time one axis can block the loop within a tick
    pub fn worst_case_burst_us(&self) -> u64 {
        self.steps_per_tick as u64 * self.pulse_period_us()
    }

    /// Check the configuration for values the loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_tick == 0 {
            return Err(ConfigError::ZeroStepsPerTick);
        }
        if self.tick_period_us == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.pulse_high_us == 0 || self.pulse_low_us == 0 {
            return Err(ConfigError::ZeroPulseWidth);
        }
        if !self.policy.tolerance_psi.is_finite() || self.policy.tolerance_psi < 0.0 {
            return Err(ConfigError::InvalidTolerance);
        }
        if !self.policy.target_range.is_valid() {
            return Err(ConfigError::InvalidTargetRange);
        }
        self.check_pulse_period(self.pulse_period_us())
    }

    /// Check that a full burst at `pulse_period_us` per pulse fits in a tick
    ///
    /// Used for the configured pulse timing and for every stepper output
    /// the scheduler is given.
    pub fn check_pulse_period(&self, pulse_period_us: u64) -> Result<(), ConfigError> {
        let burst_us = self.steps_per_tick as u64 * pulse_period_us;
        if burst_us > self.tick_period_us as u64 {
            return Err(ConfigError::BurstExceedsTick);
        }
        Ok(())
    }
}
