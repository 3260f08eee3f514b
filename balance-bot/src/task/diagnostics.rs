//! Raw-state trace for calibration (feature `calibration`)
//!
//! Prints the latest raw gyro/accelerometer counts and the three trim pot
//! readings twice a second. Used with the vehicle on a stand to read off
//! sensor midpoints and set the trim pots; this is tracing, not error
//! reporting. The snapshot read happens inside one critical section so the
//! fields always belong to the same tick.

use defmt::info;
use embassy_time::{Duration, Ticker};

use crate::system::snapshot;

/// Trace interval (2 Hz is comfortable to read off a terminal)
const TRACE_INTERVAL: Duration = Duration::from_millis(500);

#[embassy_executor::task]
pub async fn diagnostics() {
    let mut ticker = Ticker::every(TRACE_INTERVAL);
    loop {
        ticker.next().await;

        if let Some(snapshot) = snapshot::latest() {
            info!(
                "gyro: {} x: {} y: {}",
                snapshot.raw.gyro, snapshot.raw.accel_x, snapshot.raw.accel_y
            );
            info!(
                "d_tilt pot: {} tilt pot: {} gyro offset pot: {}",
                snapshot.trims.d_tilt_gain, snapshot.trims.tilt_gain, snapshot.trims.gyro_offset
            );
        }
    }
}
