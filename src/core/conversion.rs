//! Converter count to distance conversion for the GP2Y0A21YK0F sensor.
//!
//! ```text
//! voltage  = (count / 1024) * reference_voltage + 0.001
//! distance = 0.29998 * voltage ^ -1.173          (meters)
//! ```
//!
//! The power curve is fitted to the sensor datasheet's voltage/distance
//! plot. The small voltage offset keeps a zero count finite.

use libm::pow;

use crate::core::samples::{DistanceSample, RawSample};

/// Converter full scale, in counts.
pub const RESOLUTION: f64 = 1024.0;

/// Offset added to the normalized voltage before the power curve.
pub const VOLTAGE_EPSILON: f64 = 0.001;

/// Multiplicative constant of the fitted curve.
pub const CURVE_COEFFICIENT: f64 = 0.29998;

/// Exponent of the fitted curve.
pub const CURVE_EXPONENT: f64 = -1.173;

/// Reference voltage the deployed board normalizes readings with.
pub const DEFAULT_REFERENCE_VOLTAGE: f64 = 5.3;

/// Scales a raw count to volts against `reference_voltage` full scale.
#[inline]
pub fn normalize(raw: RawSample, reference_voltage: f64) -> f64 {
    (f64::from(raw) / RESOLUTION) * reference_voltage
}

/// Converts one raw count to a distance in meters.
///
/// Total over `u16`: range checks belong to the sample source.
#[inline]
pub fn convert(raw: RawSample, reference_voltage: f64) -> DistanceSample {
    let voltage = normalize(raw, reference_voltage) + VOLTAGE_EPSILON;
    CURVE_COEFFICIENT * pow(voltage, CURVE_EXPONENT)
}

/// [`convert`] bound to a fixed reference voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageConverter {
    reference_voltage: f64,
}

impl VoltageConverter {
    #[inline]
    pub const fn new(reference_voltage: f64) -> Self {
        Self { reference_voltage }
    }

    #[inline]
    pub const fn reference_voltage(&self) -> f64 {
        self.reference_voltage
    }

    #[inline]
    pub fn convert(&self, raw: RawSample) -> DistanceSample {
        convert(raw, self.reference_voltage)
    }
}

impl Default for VoltageConverter {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_VOLTAGE)
    }
}
