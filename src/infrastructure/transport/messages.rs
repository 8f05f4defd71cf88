use crate::domain::model::TransactionProposal;
use crate::foundation::{ErrorCode, Hash32, PartyId, PublicKeyBytes};
use serde::{Deserialize, Serialize};

/// Everything that may cross the session boundary. Validation failures never
/// travel as errors; they become an explicit `Rejection`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionMessage {
    /// Initiator -> responder: the proposal plus the hash the initiator signed,
    /// so the responder can prove it is looking at the same bytes.
    SignatureRequest { proposal: TransactionProposal, proposal_hash: Hash32 },
    /// Responder -> initiator: co-signature over the canonical proposal bytes.
    SignatureResponse { signer: PublicKeyBytes, signature: Vec<u8> },
    /// Responder -> initiator: structured refusal. Also used for cancellation
    /// after a request has been sent, so no task is left suspended.
    Rejection { code: ErrorCode, reason: String, rejecting_party: PartyId },
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MessageEnvelope {
    pub sender: PartyId,
    pub seq_no: u64,
    pub timestamp_nanos: u64,
    pub payload: SessionMessage,
    pub payload_hash: Hash32,
}
