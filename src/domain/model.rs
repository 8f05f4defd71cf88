use crate::foundation::{ErrorCode, PartyId, PublicKeyBytes, StateRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Public-key-bearing party reference.
///
/// Equality of parties is decided by `id`; the key is carried so the pure
/// validator can check signer requirements without an identity lookup.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Party {
    pub id: PartyId,
    pub key: PublicKeyBytes,
}

impl Party {
    pub fn new(id: impl Into<PartyId>, key: PublicKeyBytes) -> Self {
        Self { id: id.into(), key }
    }
}

/// The ledger fact being created: `lender` is owed `value` by `borrower`.
///
/// Immutable once committed; later transitions supersede, they never mutate.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ObligationState {
    pub value: i64,
    pub lender: Party,
    pub borrower: Party,
}

/// Tagged transition command - append only.
///
/// Adding a transition type means adding a variant here plus its rules in
/// `contract`, not a new dispatch hierarchy.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IouCommand {
    Create { required_signers: Vec<PublicKeyBytes> },
}

impl IouCommand {
    pub fn required_signers(&self) -> &[PublicKeyBytes] {
        match self {
            IouCommand::Create { required_signers } => required_signers,
        }
    }
}

/// Candidate state transition. Owned and mutated exclusively by the initiator;
/// the responder only ever produces a signature or a rejection for it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TransactionProposal {
    /// Prior states this transition consumes. Empty for issuance.
    pub consumed_inputs: Vec<StateRef>,
    /// States this transition creates. Exactly one for issuance.
    pub produced_outputs: Vec<ObligationState>,
    pub command: IouCommand,
    /// Signer key -> signature over the canonical signable bytes. Starts empty,
    /// grows as the protocol proceeds. Excluded from the signable bytes so every
    /// signer covers identical content.
    pub collected_signatures: BTreeMap<PublicKeyBytes, Vec<u8>>,
}

impl TransactionProposal {
    /// Issuance proposal: no inputs, one output, `Create` requiring both keys.
    pub fn issuance(value: i64, lender: Party, borrower: Party) -> Self {
        let required_signers = vec![lender.key.clone(), borrower.key.clone()];
        Self {
            consumed_inputs: Vec::new(),
            produced_outputs: vec![ObligationState { value, lender, borrower }],
            command: IouCommand::Create { required_signers },
            collected_signatures: BTreeMap::new(),
        }
    }
}

/// Result of a validation pass. Never partial: a proposal is admissible as a
/// whole or rejected with the first failed check as the reason.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ValidationVerdict {
    Accepted,
    Rejected { reason: String },
}

impl ValidationVerdict {
    pub fn rejected(reason: impl Into<String>) -> Self {
        ValidationVerdict::Rejected { reason: reason.into() }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationVerdict::Accepted)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationVerdict::Accepted => None,
            ValidationVerdict::Rejected { reason } => Some(reason),
        }
    }
}

/// Named checkpoint states of the signature-collection machine.
///
/// `Rejected` and `Aborted` carry their cause so a reloaded checkpoint still
/// explains why the attempt ended.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProposalPhase {
    Drafted,
    LocallySigned,
    AwaitingRemoteSignature,
    FullySigned,
    Committed,
    Rejected { reason: String },
    Aborted { cause: String },
}

/// Terminal result of one protocol run.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ProtocolOutcome {
    Committed(TransactionProposal),
    Rejected { code: ErrorCode, reason: String, rejecting_party: PartyId },
    Aborted { cause: String },
}

impl ProtocolOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, ProtocolOutcome::Committed(_))
    }
}

/// Durable checkpoint record: everything needed to resume a suspended run
/// without replaying validation or re-requesting an obtained signature.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StoredProposal {
    pub proposal: TransactionProposal,
    pub phase: ProposalPhase,
    pub updated_at_nanos: u64,
}
