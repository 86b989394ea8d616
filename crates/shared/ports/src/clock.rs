use chronicle_core::Timestamp;

/// Port for physical time
///
/// This allows the simulation to use different time sources:
/// - Real system time for the binary
/// - Fixed, manually advanced time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
