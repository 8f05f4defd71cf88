//! The contract ruleset: the durable acceptance rule for IOU issuance.
//!
//! Pure and deterministic. Both parties run it independently (a responder never
//! trusts the initiator's pass) and the finality committer runs it once more
//! before touching the ledger.

use crate::domain::model::{IouCommand, TransactionProposal, ValidationVerdict};

/// Checks run in this fixed order; the first failure short-circuits and becomes
/// the rejection reason.
pub fn validate(proposal: &TransactionProposal) -> ValidationVerdict {
    // Exactly one command, and it must be Create. The match stays exhaustive so
    // a new command variant forces a rule decision here.
    let required_signers = match &proposal.command {
        IouCommand::Create { required_signers } => required_signers,
    };

    if !proposal.consumed_inputs.is_empty() {
        return ValidationVerdict::rejected("no inputs should be consumed when issuing an iou");
    }
    if proposal.produced_outputs.len() != 1 {
        return ValidationVerdict::rejected("there should be exactly one output obligation");
    }

    let output = &proposal.produced_outputs[0];
    if output.value <= 0 {
        return ValidationVerdict::rejected("the iou's value must be positive");
    }
    if output.lender.id == output.borrower.id {
        return ValidationVerdict::rejected("the lender and the borrower cannot be the same party");
    }

    if required_signers.len() != 2 {
        return ValidationVerdict::rejected("there must be exactly two required signers");
    }
    // Superset containment, not set equality: both keys must be present. The
    // count check above already pins the cardinality.
    if !required_signers.contains(&output.borrower.key) || !required_signers.contains(&output.lender.key) {
        return ValidationVerdict::rejected("the borrower and lender must both be required signers");
    }

    ValidationVerdict::Accepted
}
