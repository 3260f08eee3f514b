pub mod balance;
#[cfg(feature = "calibration")]
pub mod diagnostics;
