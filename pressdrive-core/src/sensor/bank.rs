//! Sampling all six pressure channels

use pressdrive_protocol::{AxisId, AXIS_COUNT};

use super::transducer::TransducerModel;
use crate::config::{AxisConfig, FrontEnd};
use crate::traits::AnalogFrontEnd;

/// Latest pressure per axis in psi, each in `[0, full_scale]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReadings([f32; AXIS_COUNT]);

impl SensorReadings {
    /// Create readings from raw values
    pub const fn new(values: [f32; AXIS_COUNT]) -> Self {
        Self(values)
    }

    /// Reading for one axis
    pub fn get(&self, axis: AxisId) -> f32 {
        self.0[axis.index()]
    }

    /// Overwrite the reading for one axis
    pub fn set(&mut self, axis: AxisId, psi: f32) {
        self.0[axis.index()] = psi;
    }

    /// All readings in axis order
    pub fn as_array(&self) -> &[f32; AXIS_COUNT] {
        &self.0
    }
}

/// The two analog front ends plus the sensor model
///
/// Channel-to-axis routing comes from each axis' [`AxisConfig`].
pub struct SensorBank<A, B> {
    front_end_a: A,
    front_end_b: B,
    model: TransducerModel,
}

impl<A: AnalogFrontEnd, B: AnalogFrontEnd> SensorBank<A, B> {
    /// Create a new sensor bank
    pub fn new(front_end_a: A, front_end_b: B, model: TransducerModel) -> Self {
        Self {
            front_end_a,
            front_end_b,
            model,
        }
    }

    /// Get the transducer model
    pub fn model(&self) -> &TransducerModel {
        &self.model
    }

    /// Get mutable access to the front ends
    pub fn front_ends_mut(&mut self) -> (&mut A, &mut B) {
        (&mut self.front_end_a, &mut self.front_end_b)
    }

    /// Read one front end channel and convert it to psi
    pub fn read_psi(&mut self, front_end: FrontEnd, channel: u8) -> f32 {
        let (raw, full_scale) = match front_end {
            FrontEnd::A => (
                self.front_end_a.read_raw(channel),
                self.front_end_a.full_scale_volts(),
            ),
            FrontEnd::B => (
                self.front_end_b.read_raw(channel),
                self.front_end_b.full_scale_volts(),
            ),
        };
        self.model.convert(raw, full_scale)
    }

    /// Sample every axis' sensor into `readings`
    ///
    /// Front end A is read before front end B, each in channel order,
    /// regardless of which axes they feed.
    pub fn sample(&mut self, axes: &[AxisConfig; AXIS_COUNT], readings: &mut SensorReadings) {
        for front_end in [FrontEnd::A, FrontEnd::B] {
            for (axis, config) in AxisId::all().zip(axes.iter()) {
                if config.sensor.front_end == front_end {
                    let psi = self.read_psi(front_end, config.sensor.channel);
                    readings.set(axis, psi);
                }
            }
        }
    }
}
