//! Commit authority seam: the system's only critical section.
//!
//! Conflict detection and commitment are one atomic operation. Check-then-commit
//! must not be separable by a concurrent committer, so the in-memory authority
//! holds a single lock across both.

use crate::domain::model::TransactionProposal;
use crate::foundation::{IouError, Result, StateRef};
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Mutex;

pub trait CommitAuthority: Send + Sync {
    /// Atomically check every consumed input for prior consumption and, if none
    /// conflicts, record the transition as permanent ledger state.
    fn commit(&self, proposal: &TransactionProposal) -> Result<()>;
}

struct LedgerInner {
    consumed: HashSet<StateRef>,
    committed: Vec<TransactionProposal>,
}

/// Authoritative ledger state behind a single mutex.
pub struct InMemoryLedger {
    inner: Mutex<LedgerInner>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self { inner: Mutex::new(LedgerInner { consumed: HashSet::new(), committed: Vec::new() }) }
    }

    pub fn committed_count(&self) -> usize {
        self.inner.lock().expect("ledger lock poisoned").committed.len()
    }

    pub fn is_consumed(&self, input: &StateRef) -> bool {
        self.inner.lock().expect("ledger lock poisoned").consumed.contains(input)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitAuthority for InMemoryLedger {
    fn commit(&self, proposal: &TransactionProposal) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|_| IouError::Storage("ledger lock poisoned".to_string()))?;
        for input in &proposal.consumed_inputs {
            if inner.consumed.contains(input) {
                debug!("commit rejected input={} reason=double-spend", input);
                return Err(IouError::CommitConflict { input: input.to_string() });
            }
        }
        for input in &proposal.consumed_inputs {
            inner.consumed.insert(*input);
        }
        inner.committed.push(proposal.clone());
        info!(
            "proposal committed inputs_consumed={} outputs_created={} ledger_size={}",
            proposal.consumed_inputs.len(),
            proposal.produced_outputs.len(),
            inner.committed.len()
        );
        Ok(())
    }
}
