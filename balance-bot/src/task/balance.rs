//! Control tick task
//!
//! Runs the whole stabilization pipeline at a fixed ~977 Hz: sample the
//! three primary analog inputs, hand them to the `balance-control` pipeline
//! and write the resulting direction and duty cycle to both motor channels.
//!
//! # Timing contract
//!
//! Every coefficient in the pipeline assumes a constant sample interval.
//! `Ticker` advances its deadline by the period the moment it fires, so the
//! time spent in the tick body never shifts the start of the next cycle.
//! This is the async equivalent of rearming a countdown timer first thing
//! in an interrupt handler. If the body ever overruns the period the next firing
//! is late; that overrun is not detected or corrected for.
//!
//! At most one extra ADC read per tick happens for the trim pots, on the
//! staggered schedule the pipeline requests.

use balance_control::balance::BalanceLoop;
use balance_control::motor::Direction;
use balance_control::trims::TrimChannel;
use balance_control::units::{RawSample, ADC_MID};
use defmt::info;
use embassy_rp::adc::{Adc, Async as AdcAsync, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::pwm;
use embassy_time::{Duration, Ticker};

use crate::system::resources::{Irqs, MotorDriverResources, SensorResources};
use crate::system::snapshot::{self, Snapshot};

/// Control tick period: 1024 µs ≈ 977 Hz
const TICK_PERIOD: Duration = Duration::from_micros(1024);

/// PWM wrap value; the pipeline emits 8-bit duty cycles, so the compare
/// value is the duty cycle directly
const PWM_TOP: u16 = 255;

/// PWM carrier frequency (cheaper DC motors often work better at lower
/// frequencies)
const PWM_FREQ_HZ: u32 = 10_000;

/// The RP2350 ADC is 12-bit; the pipeline's conversion constants are
/// calibrated for a 10-bit sensor domain
const ADC_SHIFT: u16 = 2;

/// One bounded-time analog read, scaled to the 10-bit domain.
/// A failed conversion reads as the midpoint (zero physical signal) rather
/// than slamming the controller with a rail value.
async fn read_counts(adc: &mut Adc<'static, AdcAsync>, channel: &mut Channel<'static>) -> u16 {
    adc.read(channel).await.unwrap_or(ADC_MID << ADC_SHIFT) >> ADC_SHIFT
}

#[embassy_executor::task]
pub async fn balance(s: SensorResources, m: MotorDriverResources) {
    let mut adc = Adc::new(s.adc, Irqs, AdcConfig::default());
    let mut gyro = Channel::new_pin(s.gyro_pin, Pull::None);
    let mut accel_x = Channel::new_pin(s.accel_x_pin, Pull::None);
    let mut accel_y = Channel::new_pin(s.accel_y_pin, Pull::None);
    let mut d_tilt_gain_pot = Channel::new_pin(s.d_tilt_gain_pin, Pull::None);
    let mut tilt_gain_pot = Channel::new_pin(s.tilt_gain_pin, Pull::None);
    let mut gyro_offset_pot = Channel::new_pin(s.gyro_offset_pin, Pull::None);

    // 8-bit PWM at ~10kHz: divider chosen so (top + 1) counts hit the
    // carrier frequency from the 150MHz system clock.
    let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();
    let divider = (clock_freq_hz / (PWM_FREQ_HZ * (u32::from(PWM_TOP) + 1))) as u8;
    let mut pwm_config = pwm::Config::default();
    pwm_config.divider = divider.into();
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = 0;

    // Motors held off and pointing forward until the first tick decides
    // otherwise.
    let mut dir_a = Output::new(m.dir_a_pin, Level::High);
    let mut dir_b = Output::new(m.dir_b_pin, Level::High);
    let mut pwm_a = pwm::Pwm::new_output_a(m.pwm_a_slice, m.pwm_a_pin, pwm_config.clone());
    let mut pwm_b = pwm::Pwm::new_output_a(m.pwm_b_slice, m.pwm_b_pin, pwm_config.clone());

    let mut balance = BalanceLoop::new();
    let mut last_state = balance.state();
    info!("balance loop running, tick period {} us", TICK_PERIOD.as_micros());

    let mut ticker = Ticker::every(TICK_PERIOD);
    loop {
        ticker.next().await;

        let raw = RawSample {
            gyro: read_counts(&mut adc, &mut gyro).await,
            accel_x: read_counts(&mut adc, &mut accel_x).await,
            accel_y: read_counts(&mut adc, &mut accel_y).await,
        };

        let out = balance.tick(raw);

        // State transitions are the only thing worth logging at tick rate.
        if out.state != last_state {
            info!("balance state {} -> {}", last_state, out.state);
            last_state = out.state;
        }

        // Outputs are written every tick, including zero duty.
        let direction = match out.command.direction {
            Direction::Forward => Level::High,
            Direction::Reverse => Level::Low,
        };
        dir_a.set_level(direction);
        dir_b.set_level(direction);
        pwm_config.compare_a = u16::from(out.command.duty_a);
        pwm_a.set_config(&pwm_config);
        pwm_config.compare_a = u16::from(out.command.duty_b);
        pwm_b.set_config(&pwm_config);

        if let Some(channel) = out.trim_request {
            let counts = match channel {
                TrimChannel::DTiltGain => read_counts(&mut adc, &mut d_tilt_gain_pot).await,
                TrimChannel::TiltGain => read_counts(&mut adc, &mut tilt_gain_pot).await,
                TrimChannel::GyroOffset => read_counts(&mut adc, &mut gyro_offset_pot).await,
            };
            balance.apply_trim(channel, counts);
        }

        snapshot::publish(Snapshot {
            raw,
            trims: balance.trims(),
        });
    }
}
