use chrono::{DateTime, Utc};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Scalar logical time (Lamport counter or one vector component)
pub type LogicalTime = u64;
