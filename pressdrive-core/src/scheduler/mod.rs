//! Fixed-rate cooperative scheduler
//!
//! [`AxisController`] owns the six axes and applies commands to them.
//! [`Scheduler`] drives it from real hardware: it drains the console,
//! samples the sensors every tick and turns axis events into step pulses.

pub mod controller;
pub mod executor;

pub use controller::AxisController;
pub use executor::{PollOutcome, Scheduler};
