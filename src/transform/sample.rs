//! Numeric domains a sample stream can live in, and the cast back from the working domain.

use std::fmt::{Debug, Display};

/// Full-scale magnitude used when mapping normalized levels onto 16-bit PCM.
pub const PCM16_FULL_SCALE: f64 = i16::MAX as f64;

/// A sample type the square-wave transforms can read and produce.
///
/// The working domain is always `f64`. Converting back follows one fixed rule for integer
/// domains: round half away from zero, saturate to the type range, map NaN to zero.
pub trait PcmSample: Copy + PartialOrd + Debug + Display {
    /// The sign boundary used by the zero-crossing decision.
    const ZERO: Self;
    /// Short name of the numeric type, used in reports.
    const TYPE_NAME: &'static str;

    /// Widen to the `f64` working domain without changing scale.
    fn to_working(self) -> f64;

    /// Narrow a working-domain value that is already on this type's scale.
    fn from_working(value: f64) -> Self;

    /// Map a normalized-domain level (where 1.0 is full scale) into this type.
    fn from_unit_level(level: f64) -> Self;
}

impl PcmSample for i16 {
    const ZERO: Self = 0;
    const TYPE_NAME: &'static str = "int16";

    fn to_working(self) -> f64 {
        f64::from(self)
    }

    fn from_working(value: f64) -> Self {
        quantize_pcm16(value)
    }

    fn from_unit_level(level: f64) -> Self {
        quantize_pcm16(level * PCM16_FULL_SCALE)
    }
}

impl PcmSample for f32 {
    const ZERO: Self = 0.0;
    const TYPE_NAME: &'static str = "float32";

    fn to_working(self) -> f64 {
        f64::from(self)
    }

    fn from_working(value: f64) -> Self {
        value as f32
    }

    fn from_unit_level(level: f64) -> Self {
        level as f32
    }
}

impl PcmSample for f64 {
    const ZERO: Self = 0.0;
    const TYPE_NAME: &'static str = "float64";

    fn to_working(self) -> f64 {
        self
    }

    fn from_working(value: f64) -> Self {
        value
    }

    fn from_unit_level(level: f64) -> Self {
        level
    }
}

/// Round half away from zero, then saturate into the `i16` range. NaN becomes 0.
pub fn quantize_pcm16(value: f64) -> i16 {
    if value.is_nan() {
        return 0;
    }
    let rounded = value.round();
    if rounded >= f64::from(i16::MAX) {
        i16::MAX
    } else if rounded <= f64::from(i16::MIN) {
        i16::MIN
    } else {
        rounded as i16
    }
}
