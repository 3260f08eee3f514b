//! Safety state machine gating the controller's output
//!
//! The vehicle is either toppled ([`BalanceState::Fallen`]), waiting for the
//! operator to stand it back up ([`BalanceState::AwaitingUpright`]) or in
//! closed-loop control ([`BalanceState::Balancing`]). Falling over is the
//! system's only fault condition and its recovery path is deliberate:
//! shut the motors off and wait until the vehicle is held level again.
//!
//! The fall check uses the *filtered* x signal so that one-tick
//! accelerometer spikes from motor vibration cannot trip it, while the
//! re-level check uses the *raw* x signal so that the operator righting the
//! vehicle is detected without filter lag.

use crate::units::PhysicalSample;
use libm::fabsf;

/// Vertical g below which gravity is no longer mostly along the up axis
pub const FALL_Y_THRESHOLD_G: f32 = 0.1;

/// Filtered lateral g beyond which the vehicle has toppled
pub const FALL_X_THRESHOLD_G: f32 = 0.6;

/// Half-width of the deadband around level that re-arms the controller
pub const LEVEL_DEADBAND_G: f32 = 0.02;

/// Current safety state; exactly one instance, owned by the balance loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BalanceState {
    /// Toppled; motors forced off
    Fallen,
    /// Waiting to be stood up within the level deadband; motors off
    AwaitingUpright,
    /// Normal closed-loop operation
    Balancing,
}

/// True when the vehicle has toppled: gravity has left the up axis and the
/// sustained lateral tilt is large.
pub fn toppled(sample: &PhysicalSample, x_filtered_g: f32) -> bool {
    sample.accel_y_g < FALL_Y_THRESHOLD_G && fabsf(x_filtered_g) > FALL_X_THRESHOLD_G
}

/// True when the vehicle sits within the narrow deadband around level
pub fn level(sample: &PhysicalSample) -> bool {
    -LEVEL_DEADBAND_G < sample.accel_x_g && sample.accel_x_g < LEVEL_DEADBAND_G
}
