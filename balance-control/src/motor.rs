//! Mapping from the signed speed command to per-motor outputs
//!
//! Small speed commands need disproportionately more duty cycle before the
//! motors overcome stall friction, so the magnitude runs through a
//! square-root gain curve before saturation. Direction comes from the sign
//! of the *unshaped* speed so a tiny command still picks the right polarity.
//! Each channel carries its own scale factor to absorb mechanical
//! differences between the two drive motors.

use libm::{fabsf, sqrtf};

/// Gain applied to the square root of the speed magnitude
const CURVE_GAIN: f32 = 7.0;

/// Full-scale duty cycle
const DUTY_MAX: f32 = 255.0;

/// Allowances for mechanical differences in motors
const MOTOR_A_FACTOR: f32 = 1.0;
const MOTOR_B_FACTOR: f32 = 1.0;

/// Spin direction shared by both drive motors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
}

/// Per-tick output to the motor hardware; computed fresh, no history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    /// Direction for both channels, from the sign of the speed command
    pub direction: Direction,
    /// Duty cycle for motor channel A
    pub duty_a: u8,
    /// Duty cycle for motor channel B
    pub duty_b: u8,
}

impl MotorCommand {
    /// Both channels off, direction forward
    pub const STOP: MotorCommand = MotorCommand {
        direction: Direction::Forward,
        duty_a: 0,
        duty_b: 0,
    };
}

/// Square-root stall-compensation curve, saturated at full duty
pub fn duty_curve(speed_magnitude: f32) -> f32 {
    let duty = CURVE_GAIN * sqrtf(speed_magnitude);
    if duty > DUTY_MAX { DUTY_MAX } else { duty }
}

/// Maps a signed speed command to direction and per-motor duty cycles
pub fn map_speed(speed: f32) -> MotorCommand {
    let direction = if speed < 0.0 {
        Direction::Reverse
    } else {
        Direction::Forward
    };
    let duty = duty_curve(fabsf(speed));
    MotorCommand {
        direction,
        duty_a: (duty * MOTOR_A_FACTOR).clamp(0.0, DUTY_MAX) as u8,
        duty_b: (duty * MOTOR_B_FACTOR).clamp(0.0, DUTY_MAX) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duty_curve_known_pairs() {
        assert_eq!(duty_curve(0.0), 0.0);
        assert!(fabsf(duty_curve(1.0) - 7.0) < 1e-5);
        assert!(fabsf(duty_curve(4.0) - 14.0) < 1e-5);
        assert!(fabsf(duty_curve(100.0) - 70.0) < 1e-4);
        // (255/7)^2 ≈ 1327.0 is where the curve saturates
        assert_eq!(duty_curve(1400.0), 255.0);
    }

    #[test]
    fn zero_speed_stops_both_motors() {
        assert_eq!(map_speed(0.0), MotorCommand::STOP);
    }

    #[test]
    fn direction_follows_the_sign_of_the_raw_speed() {
        assert_eq!(map_speed(0.001).direction, Direction::Forward);
        assert_eq!(map_speed(-0.001).direction, Direction::Reverse);
        // Magnitude is symmetric around zero.
        assert_eq!(map_speed(-9.0).duty_a, map_speed(9.0).duty_a);
    }

    #[test]
    fn duty_never_leaves_the_eight_bit_range() {
        for speed in [-1.0e6, -1400.0, -1.0, 0.0, 0.5, 1400.0, 1.0e6] {
            let command = map_speed(speed);
            // u8 bounds hold by type; check the cap engages where expected
            if fabsf(speed) >= 1400.0 {
                assert_eq!(command.duty_a, 255);
                assert_eq!(command.duty_b, 255);
            }
        }
    }
}
