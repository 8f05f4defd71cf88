use crate::foundation::{DEFAULT_APPROVAL_MAX_VALUE, DEFAULT_RESPONSE_TIMEOUT_MILLIS, DEFAULT_SESSION_BUFFER};
use serde::{Deserialize, Serialize};

/// Tunables for one protocol participant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Upper bound (exclusive) the responder's default policy will co-sign for.
    #[serde(default = "default_approval_max_value")]
    pub approval_max_value: i64,
    /// Bound on the wait at the remote-signature suspension point.
    #[serde(default = "default_response_timeout_millis")]
    pub response_timeout_millis: u64,
    /// Per-session channel capacity for the in-process transport.
    #[serde(default = "default_session_buffer")]
    pub session_buffer: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            approval_max_value: default_approval_max_value(),
            response_timeout_millis: default_response_timeout_millis(),
            session_buffer: default_session_buffer(),
        }
    }
}

fn default_approval_max_value() -> i64 {
    DEFAULT_APPROVAL_MAX_VALUE
}

fn default_response_timeout_millis() -> u64 {
    DEFAULT_RESPONSE_TIMEOUT_MILLIS
}

fn default_session_buffer() -> usize {
    DEFAULT_SESSION_BUFFER
}
