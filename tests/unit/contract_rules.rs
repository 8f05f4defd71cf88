use crate::fixtures::{test_key, test_party, ProposalBuilder, TEST_OUTSIDER_SEED};
use iou_core::domain::contract;
use iou_core::domain::ObligationState;
use iou_core::foundation::StateRef;

#[test]
fn test_contract_when_issuance_is_well_formed_then_accepts() {
    let proposal = ProposalBuilder::default().value(50).build();
    assert!(contract::validate(&proposal).is_accepted());
}

#[test]
fn test_contract_when_value_is_zero_then_rejects() {
    let proposal = ProposalBuilder::default().value(0).build();
    let verdict = contract::validate(&proposal);
    assert_eq!(verdict.reason(), Some("the iou's value must be positive"));
}

#[test]
fn test_contract_when_value_is_negative_then_rejects() {
    let proposal = ProposalBuilder::default().value(-5).build();
    assert!(!contract::validate(&proposal).is_accepted());
}

#[test]
fn test_contract_when_lender_and_borrower_are_same_party_then_rejects() {
    let proposal = ProposalBuilder::default().borrower(test_party("alice", 1)).build();
    let verdict = contract::validate(&proposal);
    assert_eq!(verdict.reason(), Some("the lender and the borrower cannot be the same party"));
}

#[test]
fn test_contract_when_same_id_with_different_keys_then_still_rejects() {
    // Identity is decided by the party id, not the key material.
    let proposal = ProposalBuilder::default().value(10).borrower(test_party("alice", TEST_OUTSIDER_SEED)).build();
    assert!(!contract::validate(&proposal).is_accepted());
}

#[test]
fn test_contract_when_inputs_are_consumed_then_rejects() {
    let proposal = ProposalBuilder::default().consumed_input(StateRef::new([7u8; 32])).build();
    let verdict = contract::validate(&proposal);
    assert_eq!(verdict.reason(), Some("no inputs should be consumed when issuing an iou"));
}

#[test]
fn test_contract_when_more_than_one_output_then_rejects() {
    let extra = ObligationState { value: 1, lender: test_party("carol", 3), borrower: test_party("dave", 4) };
    let proposal = ProposalBuilder::default().extra_output(extra).build();
    let verdict = contract::validate(&proposal);
    assert_eq!(verdict.reason(), Some("there should be exactly one output obligation"));
}

#[test]
fn test_contract_when_borrower_key_is_not_a_signer_then_rejects() {
    let signers = vec![test_key(1), test_key(TEST_OUTSIDER_SEED)];
    let proposal = ProposalBuilder::default().required_signers(signers).build();
    let verdict = contract::validate(&proposal);
    assert_eq!(verdict.reason(), Some("the borrower and lender must both be required signers"));
}

#[test]
fn test_contract_when_lender_key_is_not_a_signer_then_rejects() {
    let signers = vec![test_key(2), test_key(TEST_OUTSIDER_SEED)];
    let proposal = ProposalBuilder::default().required_signers(signers).build();
    assert!(!contract::validate(&proposal).is_accepted());
}

#[test]
fn test_contract_when_signer_count_is_not_two_then_rejects() {
    let one = ProposalBuilder::default().required_signers(vec![test_key(1)]).build();
    assert_eq!(contract::validate(&one).reason(), Some("there must be exactly two required signers"));

    // Both keys present but a third signer pushes the count past two.
    let three = ProposalBuilder::default()
        .required_signers(vec![test_key(1), test_key(2), test_key(TEST_OUTSIDER_SEED)])
        .build();
    assert_eq!(contract::validate(&three).reason(), Some("there must be exactly two required signers"));
}

#[test]
fn test_contract_when_signer_order_differs_then_still_accepts() {
    let proposal = ProposalBuilder::default().required_signers(vec![test_key(2), test_key(1)]).build();
    assert!(contract::validate(&proposal).is_accepted());
}

#[test]
fn test_contract_when_validated_twice_then_verdict_is_identical() {
    let proposal = ProposalBuilder::default().value(0).build();
    let first = contract::validate(&proposal);
    let second = contract::validate(&proposal);
    assert_eq!(first, second);
}
