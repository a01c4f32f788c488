//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pressdrive-core on top of the embedded-hal ecosystem:
//!
//! - Stepper outputs (step/direction drivers such as A4988 or DRV8825)
//! - Operator console over any `embedded-io` serial port

#![no_std]
#![deny(unsafe_code)]

pub mod console;
pub mod stepper;
