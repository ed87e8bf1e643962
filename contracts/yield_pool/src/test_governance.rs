extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address,
};

use crate::governance::PROPOSAL_WINDOW;
use crate::rate_model::RateModelConfig;
use crate::rewards::{PRECISION, SECONDS_PER_YEAR};
use crate::test::{mint, setup};
use crate::ContractError;

// ── Two-phase commit ──────────────────────────────────────────────────────────

#[test]
fn test_propose_then_confirm_commits() {
    let (env, client, owner, principal, _reward, _source) =
        setup(500, RateModelConfig::Ema(PRECISION / 2));

    // 100 × a year's seconds staked → rate = bps / 100 exactly.
    let staker = Address::generate(&env);
    let stake = (SECONDS_PER_YEAR as i128) * 100;
    mint(&env, &principal, &staker, stake);
    client.stake(&staker, &staker, &stake);
    assert_eq!(client.pool_info().rate_per_second_a, 5);

    env.ledger().set_sequence_number(1_000);
    let committed = client.propose_or_commit(&owner, &800);
    assert!(!committed, "first call only proposes");

    let pending = client.pending_parameter_info();
    assert!(pending.in_progress);
    assert_eq!(pending.proposed_bps, 800);
    assert_eq!(pending.proposed_at_sequence, 1_000);
    assert_eq!(client.pool_info().target_yield_bps, 500);

    env.ledger().set_sequence_number(1_001);
    let committed = client.propose_or_commit(&owner, &800);
    assert!(committed);

    assert!(!client.pending_parameter_info().in_progress);
    let info = client.pool_info();
    assert_eq!(info.target_yield_bps, 800);
    assert_eq!(info.rate_per_second_a, 8, "emission recomputed on commit");
}

#[test]
fn test_same_sequence_confirmation_does_not_commit() {
    let (env, client, owner, _principal, _reward, _source) =
        setup(500, RateModelConfig::Ema(PRECISION / 2));

    env.ledger().set_sequence_number(1_000);
    client.propose_or_commit(&owner, &800);
    let committed = client.propose_or_commit(&owner, &800);

    assert!(!committed, "same-sequence resubmission must not commit");
    assert_eq!(client.pool_info().target_yield_bps, 500);

    // The original proposal is still the live one.
    let pending = client.pending_parameter_info();
    assert!(pending.in_progress);
    assert_eq!(pending.proposed_at_sequence, 1_000);
}

#[test]
fn test_expired_window_restarts_proposal() {
    let (env, client, owner, _principal, _reward, _source) =
        setup(500, RateModelConfig::Ema(PRECISION / 2));

    env.ledger().set_sequence_number(2_000);
    client.propose_or_commit(&owner, &800);

    env.ledger().set_sequence_number(2_000 + PROPOSAL_WINDOW + 1);
    let committed = client.propose_or_commit(&owner, &800);

    assert!(!committed, "stale confirmation restarts instead of committing");
    assert_eq!(client.pool_info().target_yield_bps, 500);

    let pending = client.pending_parameter_info();
    assert!(pending.in_progress);
    assert_eq!(pending.proposed_at_sequence, 2_000 + PROPOSAL_WINDOW + 1);

    // The restarted proposal can be confirmed normally.
    env.ledger().set_sequence_number(2_000 + PROPOSAL_WINDOW + 2);
    assert!(client.propose_or_commit(&owner, &800));
    assert_eq!(client.pool_info().target_yield_bps, 800);
}

#[test]
fn test_window_edge_still_commits() {
    let (env, client, owner, _principal, _reward, _source) =
        setup(500, RateModelConfig::Ema(PRECISION / 2));

    env.ledger().set_sequence_number(2_000);
    client.propose_or_commit(&owner, &800);

    env.ledger().set_sequence_number(2_000 + PROPOSAL_WINDOW);
    assert!(client.propose_or_commit(&owner, &800));
    assert_eq!(client.pool_info().target_yield_bps, 800);
}

#[test]
fn test_changed_value_restarts_proposal() {
    let (env, client, owner, _principal, _reward, _source) =
        setup(500, RateModelConfig::Ema(PRECISION / 2));

    env.ledger().set_sequence_number(3_000);
    client.propose_or_commit(&owner, &800);

    env.ledger().set_sequence_number(3_001);
    let committed = client.propose_or_commit(&owner, &900);

    assert!(!committed, "a different value starts a fresh proposal");
    assert_eq!(client.pool_info().target_yield_bps, 500);

    let pending = client.pending_parameter_info();
    assert_eq!(pending.proposed_bps, 900);
    assert_eq!(pending.proposed_at_sequence, 3_001);

    env.ledger().set_sequence_number(3_002);
    assert!(client.propose_or_commit(&owner, &900));
    assert_eq!(client.pool_info().target_yield_bps, 900);
}

// ── Validation & authorization ────────────────────────────────────────────────

#[test]
fn test_propose_by_non_owner_fails() {
    let (env, client, _owner, _principal, _reward, _source) =
        setup(500, RateModelConfig::Ema(PRECISION / 2));

    let intruder = Address::generate(&env);
    let result = client.try_propose_or_commit(&intruder, &800);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_propose_out_of_range_fails() {
    let (_env, client, owner, _principal, _reward, _source) =
        setup(500, RateModelConfig::Ema(PRECISION / 2));

    let result = client.try_propose_or_commit(&owner, &10_001);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ParameterOutOfRange),
        _ => unreachable!("Expected ParameterOutOfRange error"),
    }
}

#[test]
fn test_propose_blocked_while_paused() {
    let (_env, client, owner, _principal, _reward, _source) =
        setup(500, RateModelConfig::Ema(PRECISION / 2));

    client.pause(&owner);

    let result = client.try_propose_or_commit(&owner, &800);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Paused),
        _ => unreachable!("Expected Paused error"),
    }
}
