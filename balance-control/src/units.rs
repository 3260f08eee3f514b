//! Sensor sample types and ADC-count to physical-unit conversion
//!
//! The sensors are read through a 10-bit ADC, giving counts in `[0, 1024)`
//! with 512 as the midpoint for a zero physical signal. Conversion to
//! rad/s and g is a pure affine map; out-of-range counts still convert,
//! nothing here can fail.
//!
//! # Scaling
//! ```text
//! gyro_rate = GYRO_RAD_PER_COUNT * (512 - gyro_raw + gyro_offset)
//! accel_g   = ACCEL_G_PER_COUNT * (accel_raw - 512 [+ X_TRIM])
//! ```
//! where `gyro_offset` comes from the gyro trim pot and `X_TRIM` is a fixed
//! mechanical correction for the forward lean of the sensor board.

use crate::trims::Trims;

/// ADC resolution (10-bit = 1024 steps)
pub const ADC_RANGE: u16 = 1024;

/// ADC midpoint representing a zero physical signal
pub const ADC_MID: u16 = 512;

/// Rated full-scale range of the rate gyro in degrees per second
pub const GYRO_MAX_DEG_PER_SEC: f32 = 150.0;

/// Radians per degree
const DEG_TO_RAD: f32 = 0.017_453_292_5;

/// Gyro scale factor from ADC counts to rad/s
pub const GYRO_RAD_PER_COUNT: f32 =
    GYRO_MAX_DEG_PER_SEC * 2.0 / ADC_RANGE as f32 * DEG_TO_RAD;

/// Rated full-scale range of the accelerometer in g
pub const ACCEL_MAX_G: f32 = 1.7;

/// Accelerometer scale factor from ADC counts to g
pub const ACCEL_G_PER_COUNT: f32 = ACCEL_MAX_G * 2.0 / ADC_RANGE as f32;

/// Fixed forward-tilt correction on the x axis, in ADC counts.
/// More negative tilts the balance point forwards.
pub const X_TRIM: f32 = 8.0;

/// One tick's worth of raw sensor counts, immutable after capture
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Rate gyro, counts
    pub gyro: u16,
    /// Accelerometer x axis (forward/backward), counts
    pub accel_x: u16,
    /// Accelerometer y axis (up/down), counts
    pub accel_y: u16,
}

/// A raw sample converted to physical units
///
/// `accel_x_g` doubles as a small-angle tilt approximation: for small x,
/// sin(x) (what the accelerometer measures) is approximately x.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalSample {
    /// Angular rate around the wheel axis in rad/s, positive tilting back
    pub gyro_rate: f32,
    /// Specific force along the forward axis in g
    pub accel_x_g: f32,
    /// Specific force along the vertical axis in g
    pub accel_y_g: f32,
}

/// Converts raw counts to physical units using the current trim values
pub fn convert(raw: RawSample, trims: &Trims) -> PhysicalSample {
    let gyro_offset = (f32::from(trims.gyro_offset) - f32::from(ADC_MID)) * 0.1;
    PhysicalSample {
        gyro_rate: GYRO_RAD_PER_COUNT
            * (f32::from(ADC_MID) - f32::from(raw.gyro) + gyro_offset),
        accel_x_g: ACCEL_G_PER_COUNT
            * (f32::from(raw.accel_x) - f32::from(ADC_MID) + X_TRIM),
        accel_y_g: ACCEL_G_PER_COUNT * (f32::from(raw.accel_y) - f32::from(ADC_MID)),
    }
}
