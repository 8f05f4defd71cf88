use crate::fixtures::ProposalBuilder;
use iou_core::domain::contract;
use iou_core::domain::policy::{ApprovalPolicy, ValueThresholdPolicy};

#[test]
fn test_policy_when_value_below_threshold_then_both_passes_accept() {
    let proposal = ProposalBuilder::default().value(50).build();
    assert!(contract::validate(&proposal).is_accepted());
    assert!(ValueThresholdPolicy::default().approve(&proposal).is_accepted());
}

#[test]
fn test_policy_when_value_just_below_threshold_then_accepts() {
    let proposal = ProposalBuilder::default().value(99).build();
    assert!(ValueThresholdPolicy::default().approve(&proposal).is_accepted());
}

#[test]
fn test_policy_when_value_at_threshold_then_rejects() {
    let proposal = ProposalBuilder::default().value(100).build();
    // Contractually valid, commercially unacceptable: the two passes are independent.
    assert!(contract::validate(&proposal).is_accepted());
    assert!(!ValueThresholdPolicy::default().approve(&proposal).is_accepted());
}

#[test]
fn test_policy_when_value_above_threshold_then_rejects_with_reason() {
    let proposal = ProposalBuilder::default().value(150).build();
    let verdict = ValueThresholdPolicy::default().approve(&proposal);
    let reason = verdict.reason().expect("rejection reason");
    assert!(reason.contains("150"), "reason should name the value: {reason}");
}

#[test]
fn test_policy_when_threshold_is_customized_then_bound_moves() {
    let proposal = ProposalBuilder::default().value(50).build();
    assert!(!ValueThresholdPolicy::new(10).approve(&proposal).is_accepted());
    assert!(ValueThresholdPolicy::new(51).approve(&proposal).is_accepted());
}
