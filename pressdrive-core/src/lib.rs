//! Board-agnostic control core for the six-axis pressure actuator
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (analog front end, stepper, console, clock)
//! - Pressure transducer transfer function and sensor channel mapping
//! - Per-axis state machine (pressure seeking vs. manual stepping)
//! - Fixed-rate cooperative scheduler
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod axis;
pub mod config;
pub mod scheduler;
pub mod sensor;
pub mod traits;

pub use pressdrive_protocol as protocol;
pub use pressdrive_protocol::{AxisId, AXIS_COUNT};
