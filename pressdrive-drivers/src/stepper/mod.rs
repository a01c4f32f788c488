//! Stepper driver implementations

pub mod step_dir;
// pub mod tmc2209;  // Future: UART-configured current and microstepping

pub use step_dir::{StepDirConfig, StepDirDriver};
