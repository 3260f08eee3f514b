//! Hardware Resource Management
//!
//! Allocates pins and peripherals to the tasks that own them. The board is
//! an RP2350B package: the six analog inputs (gyro, two accelerometer axes
//! and three trim pots) need six ADC-capable pins, which only exist on the
//! B package (GPIO40-47).
//!
//! # Resource Groups
//! - Sensors: the ADC peripheral plus all six analog input pins, owned
//!   exclusively by the balance task so no lock sits in the tick path
//! - Motor Driver: direction GPIOs and PWM channels for both drive motors

use assign_resources::assign_resources;
use embassy_rp::adc::InterruptHandler as AdcInterruptHandler;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals;

assign_resources! {
    /// ADC peripheral and analog inputs: rate gyro, accelerometer x/y,
    /// and the three trim pots
    sensors: SensorResources {
        adc: ADC,
        gyro_pin: PIN_40,
        accel_x_pin: PIN_41,
        accel_y_pin: PIN_42,
        d_tilt_gain_pin: PIN_43,
        tilt_gain_pin: PIN_44,
        gyro_offset_pin: PIN_45,
    },
    /// Direction GPIOs and PWM channels for the two drive motors
    motor_driver: MotorDriverResources {
        dir_a_pin: PIN_12,
        dir_b_pin: PIN_13,
        pwm_a_slice: PWM_SLICE1,
        pwm_a_pin: PIN_2,
        pwm_b_slice: PWM_SLICE2,
        pwm_b_pin: PIN_4,
    },
}

bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});
