/// Default upper bound (exclusive) a counterparty will co-sign for.
pub const DEFAULT_APPROVAL_MAX_VALUE: i64 = 100;

/// Default bound on the wait for a counterparty reply before the attempt is aborted.
pub const DEFAULT_RESPONSE_TIMEOUT_MILLIS: u64 = 3_000;

/// Default per-session channel capacity for the in-process transport.
pub const DEFAULT_SESSION_BUFFER: usize = 32;
