use chronicle_core::Timestamp;
use chronicle_ports::Clock;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Fixed physical clock that only moves when told to
///
/// Time is held as Unix milliseconds, the resolution event lines are
/// rendered at. Shared between processes through an `Arc`.
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: Timestamp) -> Arc<Self> {
        Arc::new(Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        })
    }

    /// Create a clock frozen at the Unix epoch
    pub fn at_epoch() -> Arc<Self> {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Move time forward; negative durations are ignored
    pub fn advance(&self, duration: Duration) {
        let step = duration.num_milliseconds().max(0);
        self.millis.fetch_add(step, Ordering::SeqCst);
    }

    /// Jump to an explicit time
    ///
    /// Warning: this can move time backwards.
    pub fn set_time(&self, time: Timestamp) {
        self.millis.store(time.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            millis: AtomicI64::new(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_until_advanced() {
        let clock = ManualClock::at_epoch();

        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let time2 = clock.now();
        assert_eq!(time1, time2);

        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now() - time1, Duration::seconds(5));
    }

    #[test]
    fn test_negative_advance_ignored() {
        let clock = ManualClock::at_epoch();
        clock.advance(Duration::milliseconds(-10));
        assert_eq!(clock.now().timestamp_millis(), 0);
    }

    #[test]
    fn test_set_time() {
        let clock = ManualClock::at_epoch();
        let target = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap();

        clock.set_time(target);

        assert_eq!(clock.now(), target);
    }
}
