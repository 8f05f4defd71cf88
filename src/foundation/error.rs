use secp256k1::Error as SecpError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable discriminant for every error variant.
///
/// Rejection messages crossing the session boundary carry one of these so the
/// peer can classify the failure without parsing the display string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ContractViolation,
    ApprovalDenied,
    SignatureMismatch,
    MissingSignature,
    TransportFailure,
    Timeout,
    CommitConflict,
    SerializationError,
    CryptoError,
    UnknownParty,
    InvalidStateTransition,
    StorageError,
    Message,
}

#[derive(Debug, Error)]
pub enum IouError {
    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("approval denied: {0}")]
    ApprovalDenied(String),

    #[error("signature does not verify against the proposal bytes that were sent")]
    SignatureMismatch,

    #[error("required signature missing for signer {signer}")]
    MissingSignature { signer: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("timed out after {waited_millis}ms awaiting counterparty reply")]
    Timeout { waited_millis: u64 },

    #[error("input already consumed by a concurrent commit: {input}")]
    CommitConflict { input: String },

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("crypto failure: {0}")]
    Crypto(String),

    #[error("unknown party: {0}")]
    UnknownParty(String),

    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("{0}")]
    Message(String),
}

impl IouError {
    pub fn code(&self) -> ErrorCode {
        match self {
            IouError::ContractViolation(_) => ErrorCode::ContractViolation,
            IouError::ApprovalDenied(_) => ErrorCode::ApprovalDenied,
            IouError::SignatureMismatch => ErrorCode::SignatureMismatch,
            IouError::MissingSignature { .. } => ErrorCode::MissingSignature,
            IouError::Transport(_) => ErrorCode::TransportFailure,
            IouError::Timeout { .. } => ErrorCode::Timeout,
            IouError::CommitConflict { .. } => ErrorCode::CommitConflict,
            IouError::Serialization(_) => ErrorCode::SerializationError,
            IouError::Crypto(_) => ErrorCode::CryptoError,
            IouError::UnknownParty(_) => ErrorCode::UnknownParty,
            IouError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            IouError::Storage(_) => ErrorCode::StorageError,
            IouError::Message(_) => ErrorCode::Message,
        }
    }
}

impl From<bincode::Error> for IouError {
    fn from(err: bincode::Error) -> Self {
        IouError::Serialization(err.to_string())
    }
}

impl From<SecpError> for IouError {
    fn from(err: SecpError) -> Self {
        IouError::Crypto(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IouError>;
