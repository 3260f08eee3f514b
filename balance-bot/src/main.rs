//! Balancing robot firmware entry point
//!
//! Initializes the RP2350, splits the hardware resources and spawns the
//! control tick task (plus the diagnostic trace task when built with the
//! `calibration` feature).

#![no_std]
#![no_main]

use crate::system::resources::{AssignedResources, MotorDriverResources, SensorResources};
use crate::task::balance::balance;
#[cfg(feature = "calibration")]
use crate::task::diagnostics::diagnostics;
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    info!("starting up");

    // Split the resources into separate groups, one per task.
    let r = split_resources!(p);

    spawner.spawn(balance(r.sensors, r.motor_driver)).unwrap();
    #[cfg(feature = "calibration")]
    spawner.spawn(diagnostics()).unwrap();
}
