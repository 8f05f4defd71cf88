//! Checkpoint storage seam.
//!
//! The initiator writes a `StoredProposal` at every phase change so a run
//! suspended at a network wait resumes from durable state instead of a live
//! call stack. Persistent backends stay out of scope; the memory store keeps
//! the contract honest for tests.

use crate::domain::model::StoredProposal;
use crate::foundation::{IouError, ProposalId, Result};
use std::collections::HashMap;
use std::sync::Mutex;

pub trait ProposalStore: Send + Sync {
    fn put(&self, id: &ProposalId, record: StoredProposal) -> Result<()>;
    fn get(&self, id: &ProposalId) -> Result<Option<StoredProposal>>;
    fn list_ids(&self) -> Result<Vec<ProposalId>>;
}

pub struct MemoryProposalStore {
    inner: Mutex<HashMap<ProposalId, StoredProposal>>,
}

impl MemoryProposalStore {
    pub fn new() -> Self {
        Self { inner: Mutex::new(HashMap::new()) }
    }
}

impl Default for MemoryProposalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalStore for MemoryProposalStore {
    fn put(&self, id: &ProposalId, record: StoredProposal) -> Result<()> {
        let mut guard = self.inner.lock().map_err(|_| IouError::Storage("store lock poisoned".to_string()))?;
        guard.insert(*id, record);
        Ok(())
    }

    fn get(&self, id: &ProposalId) -> Result<Option<StoredProposal>> {
        let guard = self.inner.lock().map_err(|_| IouError::Storage("store lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn list_ids(&self) -> Result<Vec<ProposalId>> {
        let guard = self.inner.lock().map_err(|_| IouError::Storage("store lock poisoned".to_string()))?;
        let mut ids: Vec<ProposalId> = guard.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
