//! Session transport seam.
//!
//! Delivery is reliable and ordered within one session; a failed session
//! surfaces as `IouError::Transport`, which callers must keep distinct from a
//! business rejection. Session establishment itself is the transport's concern,
//! not the protocol's.

pub mod messages;
pub mod mock;

pub use messages::{MessageEnvelope, SessionMessage};

use crate::foundation::{Hash32, PartyId, Result};
use async_trait::async_trait;
use bincode::Options;

/// One end of an established, ordered, bidirectional message channel.
#[async_trait]
pub trait Session: Send {
    async fn send(&mut self, message: SessionMessage) -> Result<()>;

    /// Suspends until the counterparty's next message arrives or the session
    /// fails. This is the protocol's suspension point.
    async fn receive(&mut self) -> Result<SessionMessage>;

    fn counterparty(&self) -> &PartyId;
}

impl std::fmt::Debug for dyn Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("counterparty", self.counterparty()).finish()
    }
}

/// Transport bound to one local party.
#[async_trait]
pub trait SessionTransport: Send + Sync {
    async fn open_session(&self, counterparty: &PartyId) -> Result<Box<dyn Session>>;

    /// Suspends until a counterparty opens a session to the local party.
    async fn accept_session(&self) -> Result<Box<dyn Session>>;
}

/// Canonical digest of a payload, carried in every envelope and re-checked on
/// receive so corruption is caught at the transport edge.
pub fn payload_hash(payload: &SessionMessage) -> Result<Hash32> {
    let bytes = bincode::DefaultOptions::new().with_fixint_encoding().serialize(payload)?;
    Ok(*blake3::hash(&bytes).as_bytes())
}
