use serde::{Deserialize, Serialize};

use super::{ClockSnapshot, ProcessId};

/// A message payload paired with the sender's clock at send time
///
/// Fields are private: an envelope cannot change after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    sender: ProcessId,
    content: String,
    snapshot: ClockSnapshot,
}

impl MessageEnvelope {
    /// Build an envelope around an owned copy of the sender's clock
    pub fn new(sender: ProcessId, content: impl Into<String>, snapshot: ClockSnapshot) -> Self {
        Self {
            sender,
            content: content.into(),
            snapshot,
        }
    }

    /// Greeting used by simulated processes, unique per sender and round
    pub fn greeting(sender: ProcessId, round: u32, snapshot: ClockSnapshot) -> Self {
        Self::new(
            sender,
            format!("Hello from process {} (round {})", sender, round),
            snapshot,
        )
    }

    pub fn sender(&self) -> ProcessId {
        self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Clock state of the sender when the message was sent
    pub fn snapshot(&self) -> &ClockSnapshot {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_content() {
        let envelope = MessageEnvelope::greeting(ProcessId(2), 3, ClockSnapshot::Lamport(4));

        assert_eq!(envelope.content(), "Hello from process 2 (round 3)");
        assert_eq!(envelope.sender(), ProcessId(2));
        assert_eq!(envelope.snapshot(), &ClockSnapshot::Lamport(4));
    }

    #[test]
    fn test_envelope_owns_its_snapshot() {
        let mut live = vec![1, 0, 0];
        let envelope = MessageEnvelope::new(
            ProcessId(0),
            "hi",
            ClockSnapshot::Vector(live.clone()),
        );

        live[0] = 9;

        assert_eq!(envelope.snapshot().vector(), Some(&[1, 0, 0][..]));
    }
}
