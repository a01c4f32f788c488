//! Analog front end trait

/// Trait for a multi-channel analog front end
///
/// Implementations wrap the ADC driver; gain and data-rate setup
/// happens before the front end is handed to the core.
pub trait AnalogFrontEnd {
    /// Read the signed 16-bit conversion result of one channel
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_raw(&mut self, channel: u8) -> i16;

    /// Input voltage corresponding to a full-scale code (+32768)
    fn full_scale_volts(&self) -> f32;
}
