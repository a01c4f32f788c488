//! Configuration types
//!
//! Board-agnostic configuration: the closed-loop control policy, loop
//! timing, and the static wiring of each axis.

pub mod control;
pub mod hardware;

pub use control::*;
pub use hardware::*;
