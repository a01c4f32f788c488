//! Hardware wiring types
//!
//! Static identity of each axis: which outputs drive its stepper and
//! which analog channel reads its pressure sensor.

use pressdrive_protocol::AXIS_COUNT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Channels per analog front end
pub const CHANNELS_PER_FRONT_END: u8 = 3;

/// One of the two 3-channel analog front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrontEnd {
    /// Front end A (address pin to GND), wired to P4..P6
    A,
    /// Front end B (address pin to VCC), wired to P1..P3
    B,
}

/// Location of a pressure sensor on the analog front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorChannel {
    /// Which front end
    pub front_end: FrontEnd,
    /// Channel on that front end (0..3)
    pub channel: u8,
}

impl SensorChannel {
    /// Create a new sensor channel
    pub const fn new(front_end: FrontEnd, channel: u8) -> Self {
        Self { front_end, channel }
    }
}

/// Static wiring of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisConfig {
    /// GPIO number of the step output
    pub step_pin: u8,
    /// GPIO number of the direction output
    pub dir_pin: u8,
    /// Pressure sensor belonging to this axis
    pub sensor: SensorChannel,
}

impl AxisConfig {
    /// Create a new axis config
    pub const fn new(step_pin: u8, dir_pin: u8, sensor: SensorChannel) -> Self {
        Self {
            step_pin,
            dir_pin,
            sensor,
        }
    }
}

/// Wiring of the production board, indexed by axis (P1..P6)
///
/// The sensor mapping is crossed: front end B feeds P1..P3 and front end
/// A feeds P4..P6. This follows the physical harness.
pub const BOARD_AXES: [AxisConfig; AXIS_COUNT] = [
    AxisConfig::new(19, 14, SensorChannel::new(FrontEnd::B, 0)),
    AxisConfig::new(18, 27, SensorChannel::new(FrontEnd::B, 1)),
    AxisConfig::new(5, 26, SensorChannel::new(FrontEnd::B, 2)),
    AxisConfig::new(17, 25, SensorChannel::new(FrontEnd::A, 0)),
    AxisConfig::new(16, 32, SensorChannel::new(FrontEnd::A, 1)),
    AxisConfig::new(4, 33, SensorChannel::new(FrontEnd::A, 2)),
];
