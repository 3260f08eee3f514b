//! Complementary-filter tilt estimation
//!
//! Integrating the gyro rate yields an absolute tilt estimate that drifts
//! over time. Adding the low-passed accelerometer reading, which for small
//! angles approximates the absolute tilt, continuously corrects that drift.
//! Because the correction enters the integral (not just a proportional
//! blend), the accumulated `tilt_integral` also serves as the controller's
//! integral term.

use crate::control::TILT_INT_GAIN;
use crate::units::GYRO_RAD_PER_COUNT;

/// Saturation bound for the tilt integral, expressed so the integral term
/// can contribute at most 300 counts worth of rate to the speed command.
pub const MAX_TILT_INT: f32 = 300.0 * GYRO_RAD_PER_COUNT / TILT_INT_GAIN;

/// Drift-corrected tilt angle and its clamped time integral
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltEstimate {
    /// Estimated tilt in radians, positive tilting back
    pub tilt_rad: f32,
    /// Accumulated tilt, clamped to `±MAX_TILT_INT`
    pub tilt_integral: f32,
}

impl TiltEstimate {
    /// Re-seeds the estimate at the instant the vehicle is righted.
    ///
    /// The accelerometer reading is taken as the absolute tilt and the
    /// integral restarts from zero so stale windup from before a fall can
    /// never drive the motors.
    pub fn seed(&mut self, tilt_rad: f32) {
        self.tilt_rad = tilt_rad;
        self.tilt_integral = 0.0;
    }

    /// Advances the estimate by one tick's tilt delta (gyro rate plus the
    /// filtered accelerometer correction), saturating the integral.
    pub fn update(&mut self, tilt_delta: f32) {
        self.tilt_rad += tilt_delta;
        self.tilt_integral += self.tilt_rad;
        self.tilt_integral = self.tilt_integral.clamp(-MAX_TILT_INT, MAX_TILT_INT);
    }
}
