//! Finality: the last admissibility gate before a proposal becomes ledger state.
//!
//! A commit authority never trusts upstream validation, so the contract ruleset
//! and every required signature are re-checked here even though both parties
//! already ran them. Only then is the atomic check-then-commit invoked.

use crate::domain::model::TransactionProposal;
use crate::domain::{contract, hashes, ValidationVerdict};
use crate::foundation::{IouError, Result};
use crate::infrastructure::ledger::CommitAuthority;
use crate::infrastructure::signing::SigningService;
use log::{debug, warn};
use std::sync::Arc;

pub struct FinalityCommitter {
    signing: Arc<dyn SigningService>,
    authority: Arc<dyn CommitAuthority>,
}

impl FinalityCommitter {
    pub fn new(signing: Arc<dyn SigningService>, authority: Arc<dyn CommitAuthority>) -> Self {
        Self { signing, authority }
    }

    /// Commit a fully signed proposal. Partial signature sets are never
    /// committed: every identity in `required_signers` must have a valid
    /// signature over the canonical proposal bytes.
    pub fn commit(&self, proposal: &TransactionProposal) -> Result<()> {
        if let ValidationVerdict::Rejected { reason } = contract::validate(proposal) {
            warn!("commit refused reason={}", reason);
            return Err(IouError::ContractViolation(reason));
        }

        let proposal_hash = hashes::proposal_hash(proposal)?;
        for signer in proposal.command.required_signers() {
            match proposal.collected_signatures.get(signer) {
                None => {
                    warn!("commit refused signer={} reason=missing-signature", signer);
                    return Err(IouError::MissingSignature { signer: signer.to_string() });
                }
                Some(signature) => {
                    if !self.signing.verify(&proposal_hash, signature, signer) {
                        warn!("commit refused signer={} reason=signature-mismatch", signer);
                        return Err(IouError::SignatureMismatch);
                    }
                }
            }
        }

        debug!(
            "signatures verified signer_count={} proposal_hash={}",
            proposal.collected_signatures.len(),
            hex::encode(proposal_hash)
        );
        self.authority.commit(proposal)
    }
}
