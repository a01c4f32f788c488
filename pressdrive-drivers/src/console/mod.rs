//! Operator console implementations

pub mod serial;

pub use serial::SerialConsole;
