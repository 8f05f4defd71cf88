use crate::fixtures::ProposalBuilder;
use iou_core::domain::hashes::{canonical_signable_bytes, proposal_hash, proposal_id};
use iou_core::foundation::{ProposalId, StateRef};

#[test]
fn test_hash_when_same_proposal_then_deterministic() {
    let a = ProposalBuilder::default().build();
    let b = ProposalBuilder::default().build();
    assert_eq!(proposal_hash(&a).expect("hash"), proposal_hash(&b).expect("hash"));
    assert_eq!(canonical_signable_bytes(&a).expect("bytes"), canonical_signable_bytes(&b).expect("bytes"));
}

#[test]
fn test_hash_when_signatures_are_appended_then_hash_is_unchanged() {
    let unsigned = ProposalBuilder::default().build();
    let mut signed = unsigned.clone();
    let signer = signed.command.required_signers()[0].clone();
    signed.collected_signatures.insert(signer, vec![0xAB; 64]);
    // Every signer covers identical content regardless of collection order.
    assert_eq!(proposal_hash(&unsigned).expect("hash"), proposal_hash(&signed).expect("hash"));
}

#[test]
fn test_hash_when_value_changes_then_hash_changes() {
    let fifty = ProposalBuilder::default().value(50).build();
    let sixty = ProposalBuilder::default().value(60).build();
    assert_ne!(proposal_hash(&fifty).expect("hash"), proposal_hash(&sixty).expect("hash"));
}

#[test]
fn test_hash_when_inputs_change_then_hash_changes() {
    let issuance = ProposalBuilder::default().build();
    let spending = ProposalBuilder::default().consumed_input(StateRef::new([1u8; 32])).build();
    assert_ne!(proposal_hash(&issuance).expect("hash"), proposal_hash(&spending).expect("hash"));
}

#[test]
fn test_proposal_id_when_derived_then_matches_hash() {
    let proposal = ProposalBuilder::default().build();
    let id = proposal_id(&proposal).expect("id");
    assert_eq!(id, ProposalId::new(proposal_hash(&proposal).expect("hash")));
}
