//! The per-tick balance pipeline
//!
//! [`BalanceLoop`] owns every piece of controller state (filter delay
//! lines, tilt estimate, safety state and trim values) and advances all of
//! it exactly once per call to [`BalanceLoop::tick`]. The caller guarantees
//! the fixed tick period; nothing in here measures time, every coefficient
//! assumes the nominal period held since the last call.
//!
//! Per tick: convert the raw sample to physical units, run the
//! accelerometer filter (in every state, so its delay lines stay warm),
//! step the safety state machine, update the estimator and controller when
//! balancing, map the speed to motor outputs, and advance the trim
//! schedule.

use crate::control;
use crate::estimator::TiltEstimate;
use crate::filter::{Biquad, ACCEL_X_LOW_PASS};
use crate::motor::{self, MotorCommand};
use crate::state::{self, BalanceState};
use crate::trims::{TrimChannel, TrimSampler, Trims};
use crate::units::{self, PhysicalSample, RawSample};

/// Everything one tick produces
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutput {
    /// Output to write to the motor hardware this tick
    pub command: MotorCommand,
    /// Safety state after this tick
    pub state: BalanceState,
    /// Converted sensor sample, for diagnostics
    pub sample: PhysicalSample,
    /// Trim pot the caller should re-sample this tick, if any
    pub trim_request: Option<TrimChannel>,
}

/// Owned state of the whole stabilization pipeline
pub struct BalanceLoop {
    x_filter: Biquad,
    state: BalanceState,
    estimate: TiltEstimate,
    trims: Trims,
    sampler: TrimSampler,
}

impl Default for BalanceLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceLoop {
    /// A freshly powered-on controller: filters zeroed, trims centered,
    /// waiting to be stood upright.
    pub fn new() -> Self {
        Self {
            x_filter: Biquad::new(ACCEL_X_LOW_PASS),
            state: BalanceState::AwaitingUpright,
            estimate: TiltEstimate::default(),
            trims: Trims::default(),
            sampler: TrimSampler::new(),
        }
    }

    /// Current safety state
    pub fn state(&self) -> BalanceState {
        self.state
    }

    /// Current trim pot readings
    pub fn trims(&self) -> Trims {
        self.trims
    }

    /// Current tilt estimate
    pub fn estimate(&self) -> TiltEstimate {
        self.estimate
    }

    /// Stores a trim pot reading requested via [`TickOutput::trim_request`]
    pub fn apply_trim(&mut self, channel: TrimChannel, counts: u16) {
        self.trims.set(channel, counts);
    }

    /// Runs one control cycle. Must be called at the fixed tick rate.
    pub fn tick(&mut self, raw: RawSample) -> TickOutput {
        let sample = units::convert(raw, &self.trims);
        let x_filtered = self.x_filter.update(sample.accel_x_g);

        let mut speed = 0.0;
        if state::toppled(&sample, x_filtered) {
            // Fell over: shut the motors off and demand a fresh re-level.
            self.state = BalanceState::Fallen;
        } else {
            match self.state {
                BalanceState::Fallen | BalanceState::AwaitingUpright => {
                    self.state = BalanceState::AwaitingUpright;
                    // Wait until the operator holds the vehicle level, then
                    // seed the estimator from the accelerometer. Output
                    // stays off until the next tick.
                    if state::level(&sample) {
                        self.estimate.seed(sample.accel_x_g);
                        self.state = BalanceState::Balancing;
                    }
                }
                BalanceState::Balancing => {
                    self.estimate.update(sample.gyro_rate + x_filtered);
                    speed = control::speed(&self.estimate, sample.gyro_rate, &self.trims);
                }
            }
        }

        TickOutput {
            command: motor::map_speed(speed),
            state: self.state,
            sample,
            trim_request: self.sampler.tick(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ADC_MID, X_TRIM};

    /// Raw counts for a vehicle standing exactly level
    fn level_raw() -> RawSample {
        RawSample {
            gyro: ADC_MID,
            accel_x: ADC_MID - X_TRIM as u16,
            accel_y: ADC_MID + 300,
        }
    }

    #[test]
    fn boots_awaiting_upright_and_arms_on_a_level_sample() {
        let mut balance = BalanceLoop::new();
        assert_eq!(balance.state(), BalanceState::AwaitingUpright);

        let out = balance.tick(level_raw());
        assert_eq!(out.state, BalanceState::Balancing);
        // The arming tick itself keeps the motors off.
        assert_eq!(out.command, MotorCommand::STOP);
    }

    #[test]
    fn never_level_never_arms() {
        let mut balance = BalanceLoop::new();
        let leaning = RawSample {
            gyro: ADC_MID,
            accel_x: ADC_MID + 40, // well outside the deadband
            accel_y: ADC_MID + 300,
        };
        for _ in 0..5000 {
            let out = balance.tick(leaning);
            assert_eq!(out.state, BalanceState::AwaitingUpright);
            assert_eq!(out.command, MotorCommand::STOP);
        }
    }

    #[test]
    fn trim_requests_follow_the_schedule() {
        let mut balance = BalanceLoop::new();
        let mut requests = 0;
        for tick in 0..1501 {
            let out = balance.tick(level_raw());
            if let Some(channel) = out.trim_request {
                requests += 1;
                balance.apply_trim(channel, 600);
            }
            assert!(
                matches!(tick, 500 | 1000 | 1500) == out.trim_request.is_some(),
                "unexpected request state at tick {tick}"
            );
        }
        assert_eq!(requests, 3);
        assert_eq!(balance.trims().d_tilt_gain, 600);
        assert_eq!(balance.trims().tilt_gain, 600);
        assert_eq!(balance.trims().gyro_offset, 600);
    }
}
