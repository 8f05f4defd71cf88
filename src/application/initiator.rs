//! Initiator side: the signature-collection state machine driver.
//!
//! Each run walks Drafted -> LocallySigned -> AwaitingRemoteSignature ->
//! FullySigned -> Committed, checkpointing the proposal to the store at every
//! phase change. The checkpoint written before the network wait is what makes
//! the suspension point safe: resumption reloads state, it does not restore a
//! call stack.

use crate::application::finality::FinalityCommitter;
use crate::application::lifecycle::ProtocolObserver;
use crate::domain::model::{Party, ProposalPhase, ProtocolOutcome, StoredProposal, TransactionProposal, ValidationVerdict};
use crate::domain::{contract, hashes, state_machine};
use crate::foundation::{now_nanos, ErrorCode, IouError, PartyId, ProposalId, Result};
use crate::infrastructure::config::ProtocolConfig;
use crate::infrastructure::identity::IdentityProvider;
use crate::infrastructure::signing::SigningService;
use crate::infrastructure::storage::ProposalStore;
use crate::infrastructure::transport::{Session, SessionMessage, SessionTransport};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::time::{timeout, Duration};

pub struct Initiator {
    identity: Party,
    transport: Arc<dyn SessionTransport>,
    signing: Arc<dyn SigningService>,
    identities: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProposalStore>,
    committer: FinalityCommitter,
    observer: Arc<dyn ProtocolObserver>,
    config: ProtocolConfig,
}

impl Initiator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity: Party,
        transport: Arc<dyn SessionTransport>,
        signing: Arc<dyn SigningService>,
        identities: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProposalStore>,
        committer: FinalityCommitter,
        observer: Arc<dyn ProtocolObserver>,
        config: ProtocolConfig,
    ) -> Self {
        Self { identity, transport, signing, identities, store, committer, observer, config }
    }

    /// Propose an IOU of `value` owed to us by `counterparty` and drive the
    /// protocol to its terminal outcome. Synchronous from the caller's view.
    pub async fn propose_iou(&self, value: i64, counterparty: &PartyId) -> Result<ProtocolOutcome> {
        let counterparty_key = self.identities.resolve(counterparty)?;
        let borrower = Party::new(counterparty.clone(), counterparty_key);
        let mut proposal = TransactionProposal::issuance(value, self.identity.clone(), borrower);
        let proposal_hash = hashes::proposal_hash(&proposal)?;
        let id = ProposalId::new(proposal_hash);
        let mut phase = ProposalPhase::Drafted;
        self.checkpoint(&id, &proposal, &phase)?;
        info!("proposal drafted proposal_id={} value={} counterparty={}", id, value, counterparty);

        // Fail fast: an invalid proposal never reaches the wire.
        if let ValidationVerdict::Rejected { reason } = contract::validate(&proposal) {
            self.transition(&id, &proposal, &mut phase, ProposalPhase::Rejected { reason: reason.clone() })?;
            self.observer.on_rejected(&id, ErrorCode::ContractViolation, &reason);
            return Ok(ProtocolOutcome::Rejected {
                code: ErrorCode::ContractViolation,
                reason,
                rejecting_party: self.identity.id.clone(),
            });
        }

        let own_signature = self.signing.sign(&proposal_hash, &self.identity.id)?;
        proposal.collected_signatures.insert(self.identity.key.clone(), own_signature);
        self.transition(&id, &proposal, &mut phase, ProposalPhase::LocallySigned)?;
        self.observer.on_signature_collected(&id, &self.identity.key);

        let mut session = match self.transport.open_session(counterparty).await {
            Ok(session) => session,
            Err(err) => return self.abort(&id, &proposal, &mut phase, err),
        };
        if let Err(err) = session
            .send(SessionMessage::SignatureRequest { proposal: proposal.clone(), proposal_hash })
            .await
        {
            return self.abort(&id, &proposal, &mut phase, err);
        }
        // Checkpoint before suspending on the reply.
        self.transition(&id, &proposal, &mut phase, ProposalPhase::AwaitingRemoteSignature)?;

        let waited_millis = self.config.response_timeout_millis;
        let reply = match timeout(Duration::from_millis(waited_millis), session.receive()).await {
            Err(_) => return self.abort(&id, &proposal, &mut phase, IouError::Timeout { waited_millis }),
            Ok(Err(err)) => return self.abort(&id, &proposal, &mut phase, err),
            Ok(Ok(reply)) => reply,
        };

        match reply {
            SessionMessage::Rejection { code, reason, rejecting_party } => {
                self.transition(&id, &proposal, &mut phase, ProposalPhase::Rejected { reason: reason.clone() })?;
                self.observer.on_rejected(&id, code, &reason);
                warn!("proposal rejected by counterparty proposal_id={} code={:?} reason={}", id, code, reason);
                Ok(ProtocolOutcome::Rejected { code, reason, rejecting_party })
            }
            SessionMessage::SignatureResponse { signer, signature } => {
                let expected_signer = &proposal.produced_outputs[0].borrower.key;
                if signer != *expected_signer || !self.signing.verify(&proposal_hash, &signature, &signer) {
                    // The reply does not bind to the exact bytes we sent; this
                    // is an integrity fault, not a business decision.
                    let reason = IouError::SignatureMismatch.to_string();
                    self.transition(&id, &proposal, &mut phase, ProposalPhase::Rejected { reason: reason.clone() })?;
                    self.observer.on_rejected(&id, ErrorCode::SignatureMismatch, &reason);
                    warn!("counterparty signature rejected proposal_id={} reason=signature-mismatch", id);
                    return Ok(ProtocolOutcome::Rejected {
                        code: ErrorCode::SignatureMismatch,
                        reason,
                        rejecting_party: self.identity.id.clone(),
                    });
                }
                proposal.collected_signatures.insert(signer.clone(), signature);
                self.transition(&id, &proposal, &mut phase, ProposalPhase::FullySigned)?;
                self.observer.on_signature_collected(&id, &signer);
                debug!("all signatures collected proposal_id={} signer_count={}", id, proposal.collected_signatures.len());

                match self.committer.commit(&proposal) {
                    Ok(()) => {
                        self.transition(&id, &proposal, &mut phase, ProposalPhase::Committed)?;
                        self.observer.on_committed(&id);
                        info!("proposal committed proposal_id={}", id);
                        Ok(ProtocolOutcome::Committed(proposal))
                    }
                    Err(err) => {
                        let code = err.code();
                        let reason = err.to_string();
                        self.transition(&id, &proposal, &mut phase, ProposalPhase::Rejected { reason: reason.clone() })?;
                        self.observer.on_rejected(&id, code, &reason);
                        warn!("commit failed proposal_id={} code={:?} reason={}", id, code, reason);
                        Ok(ProtocolOutcome::Rejected { code, reason, rejecting_party: self.identity.id.clone() })
                    }
                }
            }
            SessionMessage::SignatureRequest { .. } => {
                self.abort(&id, &proposal, &mut phase, IouError::Transport("unexpected signature request from counterparty".to_string()))
            }
        }
    }

    /// Reload a checkpoint, e.g. after process interruption at a suspension point.
    pub fn load_checkpoint(&self, id: &ProposalId) -> Result<Option<StoredProposal>> {
        self.store.get(id)
    }

    fn transition(&self, id: &ProposalId, proposal: &TransactionProposal, phase: &mut ProposalPhase, to: ProposalPhase) -> Result<()> {
        state_machine::validate_transition(phase, &to)?;
        let old_phase = std::mem::replace(phase, to);
        self.checkpoint(id, proposal, phase)?;
        self.observer.on_phase_changed(id, &old_phase, phase);
        Ok(())
    }

    fn checkpoint(&self, id: &ProposalId, proposal: &TransactionProposal, phase: &ProposalPhase) -> Result<()> {
        self.store.put(
            id,
            StoredProposal { proposal: proposal.clone(), phase: phase.clone(), updated_at_nanos: now_nanos() },
        )
    }

    /// Operational failure: nothing was committed, safe to retry with a fresh
    /// proposal. Deliberately distinct from `Rejected`.
    fn abort(&self, id: &ProposalId, proposal: &TransactionProposal, phase: &mut ProposalPhase, err: IouError) -> Result<ProtocolOutcome> {
        let cause = err.to_string();
        self.transition(id, proposal, phase, ProposalPhase::Aborted { cause: cause.clone() })?;
        self.observer.on_aborted(id, &cause);
        warn!("proposal aborted proposal_id={} cause={}", id, cause);
        Ok(ProtocolOutcome::Aborted { cause })
    }
}
