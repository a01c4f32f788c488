//! Hardware abstraction traits
//!
//! These traits define the interface between the control core and
//! board-specific implementations.

pub mod clock;
pub mod console;
pub mod sensor;
pub mod stepper;

pub use clock::MonotonicClock;
pub use console::{CommandInput, TelemetryOutput};
pub use sensor::AnalogFrontEnd;
pub use stepper::{Direction, StepBurst, StepperOutput};
