//! Mailbox fabric - one inbound FIFO queue per process
//!
//! Every process holds a clone of the [`MailboxDirectory`] and may deliver to
//! any mailbox in it. The receiving half of each queue is a [`Mailbox`] that
//! moves into its owning process, so only the owner can take from it. That
//! single-consumer rule is carried by the channel types rather than by locks.

use chronicle_core::{MessageEnvelope, ProcessId};
use tokio::sync::mpsc;

use crate::error::MailboxError;

/// Outcome of handing an envelope to a mailbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Queued for the destination
    Queued,
    /// Destination already finished; the envelope was dropped unread
    Stranded,
}

/// Sending side of every mailbox of a run, indexed by process id
#[derive(Debug, Clone)]
pub struct MailboxDirectory {
    senders: Vec<mpsc::UnboundedSender<MessageEnvelope>>,
}

impl MailboxDirectory {
    /// Number of mailboxes (and processes) in the run
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Enqueue an envelope at the back of `to`'s mailbox
    ///
    /// Never blocks. A mailbox whose owner has finished no longer accepts
    /// messages; the envelope is dropped exactly as an unread message would be.
    pub fn deliver(
        &self,
        to: ProcessId,
        envelope: MessageEnvelope,
    ) -> Result<Delivery, MailboxError> {
        let sender = self
            .senders
            .get(to.index())
            .ok_or(MailboxError::UnknownProcess(to))?;

        match sender.send(envelope) {
            Ok(()) => Ok(Delivery::Queued),
            Err(_) => {
                log::debug!("Mailbox of process {} is closed, message stranded", to);
                Ok(Delivery::Stranded)
            }
        }
    }
}

/// Receiving side of one process's mailbox
#[derive(Debug)]
pub struct Mailbox {
    owner: ProcessId,
    receiver: mpsc::UnboundedReceiver<MessageEnvelope>,
}

impl Mailbox {
    pub fn owner(&self) -> ProcessId {
        self.owner
    }

    /// Take the oldest envelope, if any, without waiting
    pub fn try_take(&mut self) -> Option<MessageEnvelope> {
        self.receiver.try_recv().ok()
    }

    /// Close the mailbox and drop everything still queued
    ///
    /// Returns how many envelopes were never read.
    pub fn discard_pending(&mut self) -> usize {
        self.receiver.close();
        let mut discarded = 0;
        while self.receiver.try_recv().is_ok() {
            discarded += 1;
        }
        discarded
    }
}

/// Create a fresh mailbox per process for one run
///
/// Returns the shared directory plus the mailboxes in process-id order.
pub fn fabric(process_count: usize) -> (MailboxDirectory, Vec<Mailbox>) {
    let mut senders = Vec::with_capacity(process_count);
    let mut mailboxes = Vec::with_capacity(process_count);

    for owner in ProcessId::all(process_count) {
        let (sender, receiver) = mpsc::unbounded_channel();
        senders.push(sender);
        mailboxes.push(Mailbox { owner, receiver });
    }

    (MailboxDirectory { senders }, mailboxes)
}
