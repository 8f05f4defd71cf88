//! Canonical proposal bytes and hashing.
//!
//! Signatures are verified over exact proposal content, so the encoding must be
//! deterministic: bincode with fixed-width integers, hashed with blake3. The
//! signature map is excluded so every signer covers identical bytes regardless
//! of collection order.

use crate::domain::model::{IouCommand, ObligationState, TransactionProposal};
use crate::foundation::{Hash32, ProposalId, Result, StateRef};
use bincode::Options;
use serde::Serialize;

const SIGNABLE_DOMAIN_TAG: &[u8] = b"iou-core/proposal/v1";

#[derive(Serialize)]
struct SignableView<'a> {
    consumed_inputs: &'a [StateRef],
    produced_outputs: &'a [ObligationState],
    command: &'a IouCommand,
}

/// Deterministic byte representation of everything a signature covers.
pub fn canonical_signable_bytes(proposal: &TransactionProposal) -> Result<Vec<u8>> {
    let view = SignableView {
        consumed_inputs: &proposal.consumed_inputs,
        produced_outputs: &proposal.produced_outputs,
        command: &proposal.command,
    };
    let bytes = bincode::DefaultOptions::new().with_fixint_encoding().serialize(&view)?;
    Ok(bytes)
}

/// Blake3 digest of the canonical signable bytes, under a domain tag.
pub fn proposal_hash(proposal: &TransactionProposal) -> Result<Hash32> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(SIGNABLE_DOMAIN_TAG);
    hasher.update(&canonical_signable_bytes(proposal)?);
    Ok(*hasher.finalize().as_bytes())
}

pub fn proposal_id(proposal: &TransactionProposal) -> Result<ProposalId> {
    Ok(ProposalId::new(proposal_hash(proposal)?))
}
