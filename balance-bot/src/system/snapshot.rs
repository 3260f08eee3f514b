//! Latest-reading snapshot shared with the diagnostic task
//!
//! The balance task publishes its raw sensor counts and trim values once
//! per tick; the diagnostic task reads them at a much lower rate. Both
//! sides go through a scoped critical section so a reader always sees one
//! consistent multi-field snapshot; without it the tick task could
//! preempt a reader between fields.

use balance_control::trims::Trims;
use balance_control::units::RawSample;
use core::cell::Cell;
use critical_section::Mutex;
use defmt::Format;

/// One tick's raw sensor counts and the trim values in effect
#[derive(Debug, Clone, Copy, Format)]
pub struct Snapshot {
    /// Raw gyro and accelerometer counts
    pub raw: RawSample,
    /// Raw trim pot counts
    pub trims: Trims,
}

/// Latest published snapshot; `None` until the first tick has run
static LATEST: Mutex<Cell<Option<Snapshot>>> = Mutex::new(Cell::new(None));

/// Publishes this tick's snapshot (called from the balance task)
pub fn publish(snapshot: Snapshot) {
    critical_section::with(|cs| LATEST.borrow(cs).set(Some(snapshot)));
}

/// Returns the latest snapshot as one consistent unit
pub fn latest() -> Option<Snapshot> {
    critical_section::with(|cs| LATEST.borrow(cs).get())
}
