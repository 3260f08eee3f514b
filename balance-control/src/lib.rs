//! Stabilization pipeline for a two-wheeled self-balancing robot
//!
//! Everything with algorithmic content lives here, free of hardware types so
//! the whole pipeline runs under `cargo test` on the host:
//! - ADC-count to physical-unit conversion
//! - 2nd-order IIR low-pass filtering of the accelerometer signal
//! - complementary-filter tilt estimation with a clamped integral
//! - the fallen / awaiting-upright / balancing safety state machine
//! - the PID-style speed controller
//! - the square-root duty-cycle output mapping
//! - the staggered trim-pot sampling schedule
//!
//! The firmware crate owns pins, ADC and PWM; once per tick it hands a
//! [`units::RawSample`] to [`balance::BalanceLoop::tick`] and writes the
//! returned [`motor::MotorCommand`] to the motor driver.
//!
//! All state is held in explicit structs owned by [`balance::BalanceLoop`].
//! Constructing a fresh loop yields a fully reset controller, which keeps
//! every behavior reproducible in tests.

#![no_std]

pub mod balance;
pub mod control;
pub mod estimator;
pub mod filter;
pub mod motor;
pub mod state;
pub mod trims;
pub mod units;
