//! Trim pot values and the staggered sampling schedule
//!
//! Three trim potentiometers tune the controller at runtime: proportional
//! gain, derivative gain and the gyro zero offset. Reading all three in one
//! tick would add three ADC conversions to that cycle's control computation,
//! so the reads are staggered across a 1500-tick round-robin. Each pot is
//! refreshed about every 1.5 s at the ~977 Hz tick rate, at most one extra
//! read per tick.
//!
//! The sampler itself is hardware-free: [`TrimSampler::tick`] returns which
//! channel is due this tick (if any) and the caller performs the actual read
//! and stores the result with [`Trims::set`].

use crate::units::ADC_MID;

/// Tick at which the derivative gain pot is re-sampled
const D_TILT_GAIN_SLOT: u32 = 500;

/// Tick at which the proportional gain pot is re-sampled
const TILT_GAIN_SLOT: u32 = 1000;

/// Tick at which the gyro offset pot is re-sampled; also wraps the counter
const GYRO_OFFSET_SLOT: u32 = 1500;

/// The three runtime-adjustable calibration inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrimChannel {
    /// Derivative gain pot
    DTiltGain,
    /// Proportional gain pot
    TiltGain,
    /// Gyro zero-offset pot
    GyroOffset,
}

/// Latest raw trim pot readings, in ADC counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Trims {
    /// Derivative gain pot, counts
    pub d_tilt_gain: u16,
    /// Proportional gain pot, counts
    pub tilt_gain: u16,
    /// Gyro zero-offset pot, counts
    pub gyro_offset: u16,
}

impl Default for Trims {
    /// All pots assumed centered until first sampled
    fn default() -> Self {
        Self {
            d_tilt_gain: ADC_MID,
            tilt_gain: ADC_MID,
            gyro_offset: ADC_MID,
        }
    }
}

impl Trims {
    /// Stores a freshly sampled pot reading
    pub fn set(&mut self, channel: TrimChannel, counts: u16) {
        match channel {
            TrimChannel::DTiltGain => self.d_tilt_gain = counts,
            TrimChannel::TiltGain => self.tilt_gain = counts,
            TrimChannel::GyroOffset => self.gyro_offset = counts,
        }
    }
}

/// Free-running tick counter deciding which trim pot (if any) to read
#[derive(Debug, Default)]
pub struct TrimSampler {
    counter: u32,
}

impl TrimSampler {
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Advances the schedule by one tick, returning the channel due now
    pub fn tick(&mut self) -> Option<TrimChannel> {
        let due = match self.counter {
            D_TILT_GAIN_SLOT => Some(TrimChannel::DTiltGain),
            TILT_GAIN_SLOT => Some(TrimChannel::TiltGain),
            GYRO_OFFSET_SLOT => {
                self.counter = 0;
                Some(TrimChannel::GyroOffset)
            }
            _ => None,
        };
        self.counter += 1;
        due
    }
}
