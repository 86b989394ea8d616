use chronicle_core::ProcessId;
use chronicle_ports::ClockError;
use thiserror::Error;

/// Errors from the mailbox fabric
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailboxError {
    #[error("No mailbox for process {0}")]
    UnknownProcess(ProcessId),

    #[error("Process {0} cannot send to itself")]
    SelfDelivery(ProcessId),
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("Mailbox error: {0}")]
    Mailbox(#[from] MailboxError),

    #[error("Process {process} panicked: {reason}")]
    ProcessPanicked { process: ProcessId, reason: String },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
