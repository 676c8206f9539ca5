use shared::protocol::HostAction;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no host channel wired")]
    Unavailable,
    #[error("failed to serialize host action: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("host rejected send: {0}")]
    Send(String),
}

/// One-way boundary to the embedding host. A send is fire-and-forget: the
/// widget never waits for, retries, or interprets the host's side of it, and
/// the order store is not touched until the next full refresh.
pub trait HostChannel: Send + Sync {
    fn send(&self, action: &HostAction) -> Result<(), DispatchError>;
}

/// Stand-in for hosts wired without an outbound channel.
pub struct MissingHostChannel;

impl HostChannel for MissingHostChannel {
    fn send(&self, _action: &HostAction) -> Result<(), DispatchError> {
        Err(DispatchError::Unavailable)
    }
}
