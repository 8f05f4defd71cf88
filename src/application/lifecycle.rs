use crate::domain::model::ProposalPhase;
use crate::foundation::{ErrorCode, ProposalId, PublicKeyBytes};
use log::trace;
use std::sync::Arc;

/// Hooks fired as a protocol run moves through its phases. Default bodies are
/// empty so observers implement only what they care about.
pub trait ProtocolObserver: Send + Sync {
    fn on_phase_changed(&self, _id: &ProposalId, _old_phase: &ProposalPhase, _new_phase: &ProposalPhase) {}
    fn on_signature_collected(&self, _id: &ProposalId, _signer: &PublicKeyBytes) {}
    fn on_committed(&self, _id: &ProposalId) {}
    fn on_rejected(&self, _id: &ProposalId, _code: ErrorCode, _reason: &str) {}
    fn on_aborted(&self, _id: &ProposalId, _cause: &str) {}
}

pub struct NoopObserver;

impl ProtocolObserver for NoopObserver {}

pub struct CompositeObserver {
    observers: Vec<Arc<dyn ProtocolObserver>>,
}

impl CompositeObserver {
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn ProtocolObserver>) {
        self.observers.push(observer);
    }
}

impl Default for CompositeObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolObserver for CompositeObserver {
    fn on_phase_changed(&self, id: &ProposalId, old_phase: &ProposalPhase, new_phase: &ProposalPhase) {
        trace!("on_phase_changed dispatch observer_count={} proposal_id={}", self.observers.len(), id);
        for observer in &self.observers {
            observer.on_phase_changed(id, old_phase, new_phase);
        }
    }

    fn on_signature_collected(&self, id: &ProposalId, signer: &PublicKeyBytes) {
        for observer in &self.observers {
            observer.on_signature_collected(id, signer);
        }
    }

    fn on_committed(&self, id: &ProposalId) {
        for observer in &self.observers {
            observer.on_committed(id);
        }
    }

    fn on_rejected(&self, id: &ProposalId, code: ErrorCode, reason: &str) {
        for observer in &self.observers {
            observer.on_rejected(id, code, reason);
        }
    }

    fn on_aborted(&self, id: &ProposalId, cause: &str) {
        for observer in &self.observers {
            observer.on_aborted(id, cause);
        }
    }
}
