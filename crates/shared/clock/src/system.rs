use chronicle_core::Timestamp;
use chronicle_ports::Clock;
use chrono::Utc;

/// Real system clock
///
/// This simply returns the current wall-clock time and is what the physical
/// stamps of a normal run come from.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
