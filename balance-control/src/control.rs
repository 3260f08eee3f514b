//! PID-style speed controller
//!
//! The proportional term acts on the tilt estimate (itself the integral of
//! the gyro rate), the integral term on the accumulated (clamped) tilt, and
//! the derivative term on the raw gyro rate. That arrangement is the
//! standard one for rate-gyro balance control: the "derivative" already
//! exists as a sensor signal, so no differentiation happens anywhere.
//!
//! The proportional and derivative gains fold in the live trim pot values so
//! the response can be tuned with a screwdriver while the vehicle runs. The
//! gains are recomputed from the trim state every tick; they are pure
//! functions with no cached state.

use crate::estimator::TiltEstimate;
use crate::trims::Trims;
use crate::units::GYRO_RAD_PER_COUNT;

/// Tilt gain contributed per proportional trim pot count
const TILT_GAIN_PER_COUNT: f32 = 0.025 / 512.0;

/// Rate gain contributed per derivative trim pot count
const D_TILT_GAIN_PER_COUNT: f32 = 3.5 / 512.0;

/// Integral gain; fixed at the value a centered trim pot would give
pub const TILT_INT_GAIN: f32 = (0.002 / 512.0) * 512.0 / GYRO_RAD_PER_COUNT;

/// Proportional gain on the estimated tilt, from the current trim state
pub fn tilt_gain(trims: &Trims) -> f32 {
    TILT_GAIN_PER_COUNT * f32::from(trims.tilt_gain) / GYRO_RAD_PER_COUNT
}

/// Derivative gain on the raw gyro rate, from the current trim state
pub fn d_tilt_gain(trims: &Trims) -> f32 {
    D_TILT_GAIN_PER_COUNT * f32::from(trims.d_tilt_gain) / GYRO_RAD_PER_COUNT
}

/// Computes the signed speed command for the current tick
pub fn speed(estimate: &TiltEstimate, gyro_rate: f32, trims: &Trims) -> f32 {
    estimate.tilt_rad * tilt_gain(trims)
        + estimate.tilt_integral * TILT_INT_GAIN
        + gyro_rate * d_tilt_gain(trims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::fabsf;

    #[test]
    fn zero_state_commands_zero_speed() {
        let estimate = TiltEstimate::default();
        assert_eq!(speed(&estimate, 0.0, &Trims::default()), 0.0);
    }

    #[test]
    fn gains_scale_linearly_with_trim_counts() {
        let mut trims = Trims::default();
        let center_p = tilt_gain(&trims);
        let center_d = d_tilt_gain(&trims);

        trims.tilt_gain = 1024;
        trims.d_tilt_gain = 256;
        assert!(fabsf(tilt_gain(&trims) - 2.0 * center_p) < 1e-3);
        assert!(fabsf(d_tilt_gain(&trims) - 0.5 * center_d) < 1e-3);
    }

    #[test]
    fn each_term_contributes_with_its_own_sign() {
        let trims = Trims::default();
        let tilted_back = TiltEstimate {
            tilt_rad: 0.05,
            tilt_integral: 0.0,
        };
        assert!(speed(&tilted_back, 0.0, &trims) > 0.0);

        let wound_up_forward = TiltEstimate {
            tilt_rad: 0.0,
            tilt_integral: -1.0,
        };
        assert!(speed(&wound_up_forward, 0.0, &trims) < 0.0);

        let still = TiltEstimate::default();
        assert!(speed(&still, 0.01, &trims) > 0.0);
    }
}
