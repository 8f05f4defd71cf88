use crate::domain::model::ProposalPhase;
use crate::foundation::IouError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum PhaseState {
    Drafted,
    LocallySigned,
    AwaitingRemoteSignature,
    FullySigned,
    Committed,
    Rejected,
    Aborted,
}

const VALID_TRANSITIONS: &[(PhaseState, PhaseState)] = &[
    (PhaseState::Drafted, PhaseState::LocallySigned),
    (PhaseState::Drafted, PhaseState::Rejected),
    (PhaseState::LocallySigned, PhaseState::AwaitingRemoteSignature),
    (PhaseState::LocallySigned, PhaseState::Rejected),
    (PhaseState::LocallySigned, PhaseState::Aborted),
    (PhaseState::AwaitingRemoteSignature, PhaseState::FullySigned),
    (PhaseState::AwaitingRemoteSignature, PhaseState::Rejected),
    (PhaseState::AwaitingRemoteSignature, PhaseState::Aborted),
    (PhaseState::FullySigned, PhaseState::Committed),
    (PhaseState::FullySigned, PhaseState::Rejected),
];

fn phase_state(phase: &ProposalPhase) -> PhaseState {
    match phase {
        ProposalPhase::Drafted => PhaseState::Drafted,
        ProposalPhase::LocallySigned => PhaseState::LocallySigned,
        ProposalPhase::AwaitingRemoteSignature => PhaseState::AwaitingRemoteSignature,
        ProposalPhase::FullySigned => PhaseState::FullySigned,
        ProposalPhase::Committed => PhaseState::Committed,
        ProposalPhase::Rejected { .. } => PhaseState::Rejected,
        ProposalPhase::Aborted { .. } => PhaseState::Aborted,
    }
}

pub fn validate_transition(from: &ProposalPhase, to: &ProposalPhase) -> Result<(), IouError> {
    let from_state = phase_state(from);
    let to_state = phase_state(to);
    if from_state == to_state {
        return Ok(());
    }
    if VALID_TRANSITIONS.contains(&(from_state, to_state)) {
        Ok(())
    } else {
        Err(IouError::InvalidStateTransition { from: format!("{:?}", from), to: format!("{:?}", to) })
    }
}

pub fn is_terminal(phase: &ProposalPhase) -> bool {
    matches!(
        phase,
        ProposalPhase::Committed | ProposalPhase::Rejected { .. } | ProposalPhase::Aborted { .. }
    )
}
