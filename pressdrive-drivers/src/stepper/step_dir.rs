//! Step/direction stepper driver
//!
//! Drives any stepper driver with a STEP and a DIR input (A4988, DRV8825,
//! TMC2209 in standalone mode). One pulse is STEP high for
//! `pulse_high_us`, then STEP low for `pulse_low_us`; the driver advances
//! one (micro)step on the rising edge.
//!
//! Timing comes from a blocking [`DelayNs`], so the caller is stalled for
//! the whole burst.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use pressdrive_core::config::{ControlConfig, DEFAULT_PULSE_US};
use pressdrive_core::traits::{Direction, StepperOutput};

/// Step/direction driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepDirConfig {
    /// STEP high time in microseconds
    pub pulse_high_us: u32,
    /// STEP low time in microseconds
    pub pulse_low_us: u32,
    /// If true, forward travel drives DIR low
    pub invert_direction: bool,
}

impl StepDirConfig {
    /// Take the pulse timing from the loop configuration
    ///
    /// Keeps the driver's real burst length equal to the one
    /// [`ControlConfig::validate`] checked.
    pub fn from_control(control: &ControlConfig, invert_direction: bool) -> Self {
        Self {
            pulse_high_us: control.pulse_high_us,
            pulse_low_us: control.pulse_low_us,
            invert_direction,
        }
    }

    /// Duration of one pulse in microseconds
    pub fn pulse_period_us(&self) -> u64 {
        self.pulse_high_us as u64 + self.pulse_low_us as u64
    }
}

impl Default for StepDirConfig {
    fn default() -> Self {
        Self {
            pulse_high_us: DEFAULT_PULSE_US,
            pulse_low_us: DEFAULT_PULSE_US,
            invert_direction: false,
        }
    }
}

/// Step/direction driver
///
/// Pins must be infallible; GPIO outputs on every supported MCU are.
pub struct StepDirDriver<STEP, DIR, D> {
    step: STEP,
    dir: DIR,
    delay: D,
    config: StepDirConfig,
}

impl<STEP, DIR, D> StepDirDriver<STEP, DIR, D>
where
    STEP: OutputPin<Error = Infallible>,
    DIR: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    /// Create a new driver with both outputs low
    pub fn new(step: STEP, dir: DIR, delay: D, config: StepDirConfig) -> Self {
        let mut driver = Self {
            step,
            dir,
            delay,
            config,
        };
        driver.release();
        driver
    }

    /// Get the configuration
    pub fn config(&self) -> &StepDirConfig {
        &self.config
    }

    /// Release the pins and delay
    pub fn free(self) -> (STEP, DIR, D) {
        (self.step, self.dir, self.delay)
    }
}

impl<STEP, DIR, D> StepperOutput for StepDirDriver<STEP, DIR, D>
where
    STEP: OutputPin<Error = Infallible>,
    DIR: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    fn set_direction(&mut self, direction: Direction) {
        let forward = direction == Direction::Forward;
        // Infallible pins; the results carry no information
        let _ = if forward != self.config.invert_direction {
            self.dir.set_high()
        } else {
            self.dir.set_low()
        };
    }

    fn pulse(&mut self) {
        let _ = self.step.set_high();
        self.delay.delay_us(self.config.pulse_high_us);
        let _ = self.step.set_low();
        self.delay.delay_us(self.config.pulse_low_us);
    }

    fn release(&mut self) {
        let _ = self.step.set_low();
        let _ = self.dir.set_low();
    }

    fn pulse_period_us(&self) -> u64 {
        self.config.pulse_period_us()
    }
}
