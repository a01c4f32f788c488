//! Pressure transducer transfer function
//!
//! Ratiometric analog pressure sensors map a pressure range linearly onto
//! an output voltage window that stops short of both supply rails:
//!
//! ```text
//! psi = (volts - zero_volts) / span_volts * full_scale_psi
//! ```
//!
//! Both the voltage and the resulting pressure are clamped, so a sensor
//! stuck at a rail reads as 0 or full scale rather than as an error.

/// Codes per full-scale input for a signed 16-bit converter
pub const ADC_CODE_SPAN: f32 = 32768.0;

/// Linear transducer model
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransducerModel {
    /// Output voltage at 0 psi
    pub zero_volts: f32,
    /// Output voltage swing from 0 psi to full scale
    pub span_volts: f32,
    /// Pressure at the top of the span
    pub full_scale_psi: f32,
    /// Highest voltage accepted from the converter (sensor supply)
    pub supply_volts: f32,
}

/// Honeywell ABPDANV015PGAA5: 0-15 psi gauge, 5 V supply, 10%-90% output
///
/// 0.45 V at 0 psi, 4.75 V at 15 psi.
pub const ABP_015PG_5V: TransducerModel = TransducerModel {
    zero_volts: 0.45,
    span_volts: 4.3,
    full_scale_psi: 15.0,
    supply_volts: 5.0,
};

impl TransducerModel {
    /// Convert a raw code to volts, clamped to `[0, supply_volts]`
    pub fn volts(&self, raw_code: i16, full_scale_volts: f32) -> f32 {
        let volts = raw_code as f32 * (full_scale_volts / ADC_CODE_SPAN);
        volts.clamp(0.0, self.supply_volts)
    }

    /// Convert clamped volts to psi, clamped to `[0, full_scale_psi]`
    pub fn volts_to_psi(&self, volts: f32) -> f32 {
        let psi = (volts - self.zero_volts) / self.span_volts * self.full_scale_psi;
        psi.clamp(0.0, self.full_scale_psi)
    }

    /// Convert a raw code straight to psi
    pub fn convert(&self, raw_code: i16, full_scale_volts: f32) -> f32 {
        self.volts_to_psi(self.volts(raw_code, full_scale_volts))
    }
}

/// Convert a raw code to psi using the production sensor
pub fn convert(raw_code: i16, full_scale_volts: f32) -> f32 {
    ABP_015PG_5V.convert(raw_code, full_scale_volts)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Full-scale range at PGA gain 2/3
    const FSR: f32 = 6.144;

    fn code_for_volts(volts: f32) -> i16 {
        (volts / FSR * ADC_CODE_SPAN) as i16
    }

    fn approx(a: f32, b: f32) -> bool {
        let d = a - b;
        d > -0.01 && d < 0.01
    }

    #[test]
    fn test_zero_point() {
        let psi = convert(code_for_volts(0.45), FSR);
        assert!(approx(psi, 0.0), "got {}", psi);
    }

    #[test]
    fn test_full_scale_point() {
        let psi = convert(code_for_volts(4.75), FSR);
        assert!(approx(psi, 15.0), "got {}", psi);
    }

    #[test]
    fn test_midpoint() {
        // 0.45 + 4.3 / 2 = 2.6 V -> 7.5 psi
        let psi = convert(code_for_volts(2.6), FSR);
        assert!(approx(psi, 7.5), "got {}", psi);
    }

    #[test]
    fn test_clamps_low() {
        assert_eq!(convert(0, FSR), 0.0);
        assert_eq!(convert(-12_000, FSR), 0.0);
        assert_eq!(convert(i16::MIN, FSR), 0.0);
        // Below the 0.45 V zero point
        assert_eq!(convert(code_for_volts(0.2), FSR), 0.0);
    }

    #[test]
    fn test_clamps_high() {
        assert_eq!(convert(code_for_volts(4.9), FSR), 15.0);
        assert_eq!(convert(code_for_volts(5.5), FSR), 15.0);
        assert_eq!(convert(i16::MAX, FSR), 15.0);
    }

    #[test]
    fn test_voltage_clamp() {
        assert_eq!(ABP_015PG_5V.volts(i16::MAX, FSR), 5.0);
        assert_eq!(ABP_015PG_5V.volts(-1, FSR), 0.0);
    }

    #[test]
    fn test_substitute_model() {
        // 0.5-4.5 V, 0-100 psi part
        let model = TransducerModel {
            zero_volts: 0.5,
            span_volts: 4.0,
            full_scale_psi: 100.0,
            supply_volts: 5.0,
        };
        assert!(approx(model.volts_to_psi(2.5), 50.0));
        assert_eq!(model.volts_to_psi(4.9), 100.0);
    }
}
