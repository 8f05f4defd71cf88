//! Counterparty approval policy: business-risk rules distinct from contract
//! legality. A proposal can be contractually valid yet commercially
//! unacceptable to the party asked to co-sign it.

use crate::domain::model::{TransactionProposal, ValidationVerdict};
use crate::foundation::DEFAULT_APPROVAL_MAX_VALUE;

pub trait ApprovalPolicy: Send + Sync {
    /// Invoked only by the responding party, after its own contract pass
    /// accepted the same proposal.
    fn approve(&self, proposal: &TransactionProposal) -> ValidationVerdict;
}

/// Refuses to co-sign obligations at or above a fixed value.
pub struct ValueThresholdPolicy {
    max_value: i64,
}

impl ValueThresholdPolicy {
    pub fn new(max_value: i64) -> Self {
        Self { max_value }
    }
}

impl Default for ValueThresholdPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_APPROVAL_MAX_VALUE)
    }
}

impl ApprovalPolicy for ValueThresholdPolicy {
    fn approve(&self, proposal: &TransactionProposal) -> ValidationVerdict {
        let Some(output) = proposal.produced_outputs.first() else {
            return ValidationVerdict::rejected("no output obligation to evaluate");
        };
        if output.value >= self.max_value {
            return ValidationVerdict::rejected(format!(
                "the iou's value is too high: {} exceeds the approval limit {}",
                output.value, self.max_value
            ));
        }
        ValidationVerdict::Accepted
    }
}
