//! Pressure sensing
//!
//! Raw ADC codes are turned into psi by a [`TransducerModel`] and
//! collected, one per axis, into [`SensorReadings`] by a [`SensorBank`].

pub mod bank;
pub mod transducer;

pub use bank::{SensorBank, SensorReadings};
pub use transducer::{convert, TransducerModel, ABP_015PG_5V, ADC_CODE_SPAN};
