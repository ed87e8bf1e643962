use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub principal_token: Address,
    pub reward_token: Address,
    pub shared_pot: bool,
    pub target_yield_bps: u32,
    pub timestamp: u64,
}

/// Fired when principal is deposited for a beneficiary.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub payer: Address,
    pub beneficiary: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when principal is withdrawn. `amount` is what actually moved,
/// which exceeds `requested` when the dust rule upgraded the withdrawal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub requested: i128,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when accrued rewards are settled to an account.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    pub reward_a: i128,
    pub reward_b: i128,
    pub timestamp: u64,
}

/// Fired when the reward source pushes stream-B tokens into the pot.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardDeliveredEvent {
    pub source: Address,
    pub amount: i128,
    /// Stream-B rate after the model absorbed the delivery.
    pub rate_per_second: i128,
    pub timestamp: u64,
}

/// Fired when a yield change enters (or restarts) its proposal phase.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldChangeProposedEvent {
    pub proposed_bps: u32,
    pub sequence: u32,
    pub timestamp: u64,
}

/// Fired when a proposed yield change is confirmed and applied.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldChangeCommittedEvent {
    pub target_yield_bps: u32,
    pub sequence: u32,
    pub timestamp: u64,
}

/// Fired when the EMA smoothing weight changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlphaSetEvent {
    pub alpha: i128,
    pub timestamp: u64,
}

/// Fired when the linear depletion window changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepletionDurationSetEvent {
    pub duration: u64,
    pub rate_per_second: i128,
    pub timestamp: u64,
}

/// Fired when the authorized reward source changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSourceSetEvent {
    pub source: Address,
    pub timestamp: u64,
}

/// Fired when the designated pauser changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauserSetEvent {
    pub pauser: Address,
    pub timestamp: u64,
}

/// Fired when the pool freezes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PausedEvent {
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when the pool resumes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnpausedEvent {
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when the owner drains both token balances to a recovery address.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencySweepEvent {
    pub recipient: Address,
    pub principal_amount: i128,
    pub reward_amount: i128,
    pub timestamp: u64,
}

/// Fired when principal leaves through the paused-only recovery path.
/// No rewards settle on this path.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseWithdrawnEvent {
    pub staker: Address,
    pub requested: i128,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    principal_token: Address,
    reward_token: Address,
    shared_pot: bool,
    target_yield_bps: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            principal_token,
            reward_token,
            shared_pot,
            target_yield_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    payer: Address,
    beneficiary: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), beneficiary.clone()),
        StakedEvent {
            payer,
            beneficiary,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    staker: Address,
    requested: i128,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            requested,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(env: &Env, staker: Address, reward_a: i128, reward_b: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardsClaimedEvent {
            staker,
            reward_a,
            reward_b,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_delivered(env: &Env, source: Address, amount: i128, rate_per_second: i128) {
    env.events().publish(
        (symbol_short!("RWD_DLVR"),),
        RewardDeliveredEvent {
            source,
            amount,
            rate_per_second,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_yield_change_proposed(env: &Env, proposed_bps: u32, sequence: u32) {
    env.events().publish(
        (symbol_short!("YLD_PROP"),),
        YieldChangeProposedEvent {
            proposed_bps,
            sequence,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_yield_change_committed(env: &Env, target_yield_bps: u32, sequence: u32) {
    env.events().publish(
        (symbol_short!("YLD_CMIT"),),
        YieldChangeCommittedEvent {
            target_yield_bps,
            sequence,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_alpha_set(env: &Env, alpha: i128) {
    env.events().publish(
        (symbol_short!("ALPHA_SET"),),
        AlphaSetEvent {
            alpha,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_depletion_duration_set(env: &Env, duration: u64, rate_per_second: i128) {
    env.events().publish(
        (symbol_short!("DUR_SET"),),
        DepletionDurationSetEvent {
            duration,
            rate_per_second,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_source_set(env: &Env, source: Address) {
    env.events().publish(
        (symbol_short!("SRC_SET"),),
        RewardSourceSetEvent {
            source,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pauser_set(env: &Env, pauser: Address) {
    env.events().publish(
        (symbol_short!("PSR_SET"),),
        PauserSetEvent {
            pauser,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PausedEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        UnpausedEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_sweep(
    env: &Env,
    recipient: Address,
    principal_amount: i128,
    reward_amount: i128,
) {
    env.events().publish(
        (symbol_short!("EMRG_SWP"),),
        EmergencySweepEvent {
            recipient,
            principal_amount,
            reward_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_withdrawn(env: &Env, staker: Address, requested: i128, amount: i128) {
    env.events().publish(
        (symbol_short!("P_WDRW"), staker.clone()),
        PauseWithdrawnEvent {
            staker,
            requested,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
