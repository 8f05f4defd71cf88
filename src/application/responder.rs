//! Responder side of the signature-collection protocol.
//!
//! Sub-machine per inbound session: Received -> Validated -> Approved|Rejected.
//! The responder re-runs the contract ruleset itself - the initiator could be
//! faulty or malicious - then applies its own approval policy. On acceptance it
//! signs exactly the bytes it validated; on refusal it replies with a
//! structured rejection and signs nothing.

use crate::domain::model::{Party, TransactionProposal, ValidationVerdict};
use crate::domain::policy::ApprovalPolicy;
use crate::domain::{contract, hashes};
use crate::foundation::{ErrorCode, Hash32, IouError, ProposalId, Result};
use crate::infrastructure::signing::SigningService;
use crate::infrastructure::transport::{Session, SessionMessage, SessionTransport};
use log::{debug, info, warn};
use std::sync::Arc;

pub struct Responder {
    identity: Party,
    transport: Arc<dyn SessionTransport>,
    signing: Arc<dyn SigningService>,
    policy: Arc<dyn ApprovalPolicy>,
}

impl Responder {
    pub fn new(
        identity: Party,
        transport: Arc<dyn SessionTransport>,
        signing: Arc<dyn SigningService>,
        policy: Arc<dyn ApprovalPolicy>,
    ) -> Self {
        Self { identity, transport, signing, policy }
    }

    /// Accept sessions forever, handling each on its own task. Returns only
    /// when the transport shuts down.
    pub async fn serve(self: Arc<Self>) -> Result<()> {
        loop {
            let session = self.transport.accept_session().await?;
            let responder = Arc::clone(&self);
            tokio::spawn(async move {
                if let Err(err) = responder.handle_session(session).await {
                    warn!("responder session failed party={} error={}", responder.identity.id, err);
                }
            });
        }
    }

    /// Drive one inbound session to a signature or a rejection.
    pub async fn handle_session(&self, mut session: Box<dyn Session>) -> Result<()> {
        let message = session.receive().await?;
        let SessionMessage::SignatureRequest { proposal, proposal_hash } = message else {
            return Err(IouError::Transport("expected a signature request to open the exchange".to_string()));
        };
        let id = ProposalId::new(proposal_hash);
        debug!("proposal received party={} proposal_id={} state=received", self.identity.id, id);

        // The claimed hash must match the content we will validate and sign.
        let computed_hash = hashes::proposal_hash(&proposal)?;
        if computed_hash != proposal_hash {
            return self
                .reject(&mut session, &id, ErrorCode::SignatureMismatch, "proposal hash does not match proposal content")
                .await;
        }

        if let ValidationVerdict::Rejected { reason } = contract::validate(&proposal) {
            return self.reject(&mut session, &id, ErrorCode::ContractViolation, &reason).await;
        }

        if !self.is_addressed_to_us(&proposal) {
            return self
                .reject(&mut session, &id, ErrorCode::ApprovalDenied, "proposal does not name this party as borrower")
                .await;
        }

        if let Err(reason) = self.verify_initiator_signature(&proposal, &computed_hash) {
            return self.reject(&mut session, &id, ErrorCode::SignatureMismatch, &reason).await;
        }
        debug!("proposal validated party={} proposal_id={} state=validated", self.identity.id, id);

        if let ValidationVerdict::Rejected { reason } = self.policy.approve(&proposal) {
            return self.reject(&mut session, &id, ErrorCode::ApprovalDenied, &reason).await;
        }

        let signature = self.signing.sign(&computed_hash, &self.identity.id)?;
        session
            .send(SessionMessage::SignatureResponse { signer: self.identity.key.clone(), signature })
            .await?;
        info!("proposal approved party={} proposal_id={} state=approved", self.identity.id, id);
        Ok(())
    }

    fn is_addressed_to_us(&self, proposal: &TransactionProposal) -> bool {
        // Contract validation already pinned exactly one output.
        proposal
            .produced_outputs
            .first()
            .map(|output| output.borrower.id == self.identity.id)
            .unwrap_or(false)
    }

    /// The lender must already have signed the bytes it is asking us to co-sign.
    fn verify_initiator_signature(&self, proposal: &TransactionProposal, hash: &Hash32) -> std::result::Result<(), String> {
        let lender_key = &proposal.produced_outputs[0].lender.key;
        let Some(signature) = proposal.collected_signatures.get(lender_key) else {
            return Err("initiator has not signed the proposal".to_string());
        };
        if !self.signing.verify(hash, signature, lender_key) {
            return Err("initiator signature does not verify against the proposal".to_string());
        }
        Ok(())
    }

    async fn reject(&self, session: &mut Box<dyn Session>, id: &ProposalId, code: ErrorCode, reason: &str) -> Result<()> {
        warn!("proposal rejected party={} proposal_id={} code={:?} reason={}", self.identity.id, id, code, reason);
        session
            .send(SessionMessage::Rejection {
                code,
                reason: reason.to_string(),
                rejecting_party: self.identity.id.clone(),
            })
            .await
    }
}
