extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::Client as TokenClient,
    Address,
};

use crate::rate_model::RateModelConfig;
use crate::rewards::{MINIMUM_STAKE, PRECISION};
use crate::test::{mint, setup};
use crate::ContractError;

fn half_alpha() -> RateModelConfig {
    RateModelConfig::Ema(PRECISION / 2)
}

// ── Gate matrix ───────────────────────────────────────────────────────────────

#[test]
fn test_pauser_can_pause_owner_can_unpause() {
    let (env, client, owner, _principal, _reward, _source) = setup(500, half_alpha());

    let pauser = Address::generate(&env);
    client.set_pauser(&owner, &pauser);
    assert_eq!(client.get_pauser(), Some(pauser.clone()));

    client.pause(&pauser);
    assert!(client.is_paused());

    // The pauser cannot lift the freeze.
    let result = client.try_unpause(&pauser);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    client.unpause(&owner);
    assert!(!client.is_paused());
}

#[test]
fn test_owner_can_pause_directly() {
    let (_env, client, owner, _principal, _reward, _source) = setup(500, half_alpha());

    client.pause(&owner);
    assert!(client.is_paused());
}

#[test]
fn test_random_caller_cannot_pause() {
    let (env, client, _owner, _principal, _reward, _source) = setup(500, half_alpha());

    let intruder = Address::generate(&env);
    let result = client.try_pause(&intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_paused_blocks_mutating_entry_points() {
    let (env, client, owner, principal, reward, source) = setup(500, half_alpha());

    let staker = Address::generate(&env);
    mint(&env, &principal, &staker, 2 * MINIMUM_STAKE);
    mint(&env, &reward, &source, 1_000);
    client.stake(&staker, &staker, &(2 * MINIMUM_STAKE));

    client.pause(&owner);

    match client.try_stake(&staker, &staker, &MINIMUM_STAKE) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Paused),
        _ => unreachable!("Expected Paused error"),
    }
    match client.try_withdraw(&staker, &MINIMUM_STAKE) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Paused),
        _ => unreachable!("Expected Paused error"),
    }
    match client.try_claim(&staker) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Paused),
        _ => unreachable!("Expected Paused error"),
    }
    match client.try_deliver_reward(&source, &1_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Paused),
        _ => unreachable!("Expected Paused error"),
    }
}

// ── pause_withdraw ────────────────────────────────────────────────────────────

#[test]
fn test_pause_withdraw_requires_pause() {
    let (env, client, _owner, principal, _reward, _source) = setup(500, half_alpha());

    let staker = Address::generate(&env);
    mint(&env, &principal, &staker, 2 * MINIMUM_STAKE);
    client.stake(&staker, &staker, &(2 * MINIMUM_STAKE));

    let result = client.try_pause_withdraw(&staker, &MINIMUM_STAKE);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotPaused),
        _ => unreachable!("Expected NotPaused error"),
    }
}

#[test]
fn test_pause_withdraw_moves_principal_without_settlement() {
    let (env, client, owner, principal, _reward, _source) = setup(10_000, half_alpha());

    let staker = Address::generate(&env);
    mint(&env, &principal, &staker, 4 * MINIMUM_STAKE);
    env.ledger().set_timestamp(0);
    client.stake(&staker, &staker, &(4 * MINIMUM_STAKE));

    // Let stream A accrue, then freeze.
    env.ledger().set_timestamp(1_000_000);
    client.pause(&owner);
    let before = client.pool_info();

    env.ledger().set_timestamp(2_000_000);
    let moved = client.pause_withdraw(&staker, &MINIMUM_STAKE);
    assert_eq!(moved, MINIMUM_STAKE);

    let after = client.pool_info();
    // No sync, no settlement: accumulators and the clock are untouched.
    assert_eq!(after.acc_per_share_a, before.acc_per_share_a);
    assert_eq!(after.acc_per_share_b, before.acc_per_share_b);
    assert_eq!(after.last_accrual_time, before.last_accrual_time);
    assert_eq!(after.total_staked, before.total_staked - MINIMUM_STAKE);

    // Only principal moved; nothing was minted or paid from the pot.
    assert_eq!(
        TokenClient::new(&env, &principal).balance(&staker),
        MINIMUM_STAKE
    );
}

#[test]
fn test_pause_withdraw_dust_upgrade_and_zeroed_debts() {
    let (env, client, owner, principal, _reward, _source) = setup(10_000, half_alpha());

    let staker = Address::generate(&env);
    mint(&env, &principal, &staker, 2 * MINIMUM_STAKE);
    env.ledger().set_timestamp(0);
    client.stake(&staker, &staker, &(2 * MINIMUM_STAKE));

    env.ledger().set_timestamp(1_000);
    client.pause(&owner);

    // The requested remainder would be dust, so everything leaves.
    let moved = client.pause_withdraw(&staker, &(MINIMUM_STAKE + MINIMUM_STAKE / 2));
    assert_eq!(moved, 2 * MINIMUM_STAKE);

    let position = client.get_position(&staker);
    assert_eq!(position.principal, 0);
    assert_eq!(position.debt_a, 0);
    assert_eq!(position.debt_b, 0);
    assert_eq!(client.pool_info().total_staked, 0);
}

#[test]
fn test_pause_withdraw_validation() {
    let (env, client, owner, principal, _reward, _source) = setup(500, half_alpha());

    let staker = Address::generate(&env);
    mint(&env, &principal, &staker, 2 * MINIMUM_STAKE);
    client.stake(&staker, &staker, &(2 * MINIMUM_STAKE));
    client.pause(&owner);

    match client.try_pause_withdraw(&staker, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ZeroAmount),
        _ => unreachable!("Expected ZeroAmount error"),
    }
    match client.try_pause_withdraw(&staker, &(3 * MINIMUM_STAKE)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientPrincipal),
        _ => unreachable!("Expected InsufficientPrincipal error"),
    }
}

// ── Emergency sweep ───────────────────────────────────────────────────────────

#[test]
fn test_emergency_transfer_sweeps_and_pauses() {
    let (env, client, owner, principal, reward, source) = setup(500, half_alpha());

    let staker = Address::generate(&env);
    mint(&env, &principal, &staker, 4 * MINIMUM_STAKE);
    env.ledger().set_timestamp(0);
    client.stake(&staker, &staker, &(4 * MINIMUM_STAKE));

    mint(&env, &reward, &source, 5_000);
    env.ledger().set_timestamp(10);
    client.deliver_reward(&source, &5_000);

    let recovery = Address::generate(&env);
    client.emergency_transfer(&owner, &recovery);

    assert!(client.is_paused());
    assert_eq!(TokenClient::new(&env, &principal).balance(&client.address), 0);
    assert_eq!(TokenClient::new(&env, &reward).balance(&client.address), 0);
    assert_eq!(
        TokenClient::new(&env, &principal).balance(&recovery),
        4 * MINIMUM_STAKE
    );
    assert_eq!(TokenClient::new(&env, &reward).balance(&recovery), 5_000);
}

#[test]
fn test_emergency_transfer_owner_only() {
    let (env, client, _owner, _principal, _reward, _source) = setup(500, half_alpha());

    let intruder = Address::generate(&env);
    let result = client.try_emergency_transfer(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_emergency_transfer_rejects_self_recipient() {
    let (_env, client, owner, _principal, _reward, _source) = setup(500, half_alpha());

    let result = client.try_emergency_transfer(&owner, &client.address);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAddress),
        _ => unreachable!("Expected InvalidAddress error"),
    }
}
