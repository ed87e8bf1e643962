#![no_std]

pub mod events;
pub mod governance;
pub mod pause;
pub mod rate_model;
pub mod rewards;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

use governance::Outcome;
use rate_model::{RateModel, RateModelConfig};
use rewards::{MAX_BPS, MINIMUM_STAKE};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PAUSER: Symbol = symbol_short!("PAUSER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const PRINCIPAL_TOKEN: Symbol = symbol_short!("PRN_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const REWARD_SOURCE: Symbol = symbol_short!("RWD_SRC");
const SHARED_POT: Symbol = symbol_short!("SHR_POT");
const TARGET_BPS: Symbol = symbol_short!("TGT_BPS");
const RATE_A: Symbol = symbol_short!("RATE_A");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const ACC_A: Symbol = symbol_short!("ACC_A");
const ACC_B: Symbol = symbol_short!("ACC_B");
const LAST_ACCRUAL: Symbol = symbol_short!("LAST_ACC");
const RATE_MODEL: Symbol = symbol_short!("RATEMODL");

// Per-account persistent storage uses tuple keys:  (POSITION, account)
const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAddress = 4,
    ParameterOutOfRange = 5,
    ZeroAmount = 6,
    BelowMinimumStake = 7,
    InsufficientPrincipal = 8,
    SameInstantDelivery = 9,
    RateModelMismatch = 10,
    Paused = 11,
    NotPaused = 12,
    SharedPotMismatch = 13,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Per-account stake principal and the two reward-debt markers.
///
/// A zeroed position is kept in storage rather than deleted; `principal == 0`
/// always implies both debts are zero.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub principal: i128,
    pub debt_a: i128,
    pub debt_b: i128,
}

/// Snapshot of the global pool state returned by `pool_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub total_staked: i128,
    pub acc_per_share_a: i128,
    pub acc_per_share_b: i128,
    pub last_accrual_time: u64,
    pub rate_per_second_a: i128,
    pub rate_per_second_b: i128,
    pub target_yield_bps: u32,
    pub paused: bool,
}

/// Amounts settled by a `claim`, per stream.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedRewards {
    pub reward_a: i128,
    pub reward_b: i128,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn load_amount(env: &Env, key: &Symbol) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

fn load_address(env: &Env, key: &Symbol) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(ContractError::NotInitialized)
}

fn load_rate_model(env: &Env) -> Result<RateModel, ContractError> {
    env.storage()
        .instance()
        .get(&RATE_MODEL)
        .ok_or(ContractError::NotInitialized)
}

fn position_key(account: &Address) -> (Symbol, Address) {
    (POSITION, account.clone())
}

fn load_position(env: &Env, account: &Address) -> Position {
    let key = position_key(account);
    match env.storage().persistent().get(&key) {
        Some(position) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            position
        }
        None => Position {
            principal: 0,
            debt_a: 0,
            debt_b: 0,
        },
    }
}

fn store_position(env: &Env, account: &Address, position: &Position) {
    let key = position_key(account);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// In-memory result of replaying the accrual interval since the last sync.
struct Projection {
    acc_per_share_a: i128,
    acc_per_share_b: i128,
    distributed_b: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct YieldPoolContract;

#[contractimpl]
impl YieldPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `principal_token` – SAC address accounts deposit; the contract must
    ///   be its admin so stream-A rewards can be minted.
    /// * `reward_token`    – SAC address stream-B rewards are paid from.
    /// * `shared_pot`      – declares that both addresses are the same token
    ///   instance, in which case staked principal is excluded from the
    ///   stream-B pot.
    /// * `target_yield_bps` – stream-A annual yield on staked principal.
    /// * `config`          – stream-B rate model: `Ema(alpha)` or
    ///   `Linear(depletion_duration)`.
    pub fn initialize(
        env: Env,
        owner: Address,
        principal_token: Address,
        reward_token: Address,
        shared_pot: bool,
        target_yield_bps: u32,
        config: RateModelConfig,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if target_yield_bps > MAX_BPS {
            return Err(ContractError::ParameterOutOfRange);
        }
        // The pot cap must know whether staked principal shares the reward
        // balance; an implicit address comparison at accrual time is not
        // acceptable, so the flag has to agree with the addresses up front.
        if shared_pot != (principal_token == reward_token) {
            return Err(ContractError::SharedPotMismatch);
        }

        let now = env.ledger().timestamp();
        let model = RateModel::from_config(&config, now)?;

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&PRINCIPAL_TOKEN, &principal_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&SHARED_POT, &shared_pot);
        env.storage().instance().set(&TARGET_BPS, &target_yield_bps);
        env.storage().instance().set(&LAST_ACCRUAL, &now);
        env.storage().instance().set(&RATE_MODEL, &model);
        // TOTAL_STAKED, ACC_A, ACC_B, and RATE_A start at zero;
        // unwrap_or(0) handles absent keys, so no explicit init needed.

        events::publish_initialized(
            &env,
            owner,
            principal_token,
            reward_token,
            shared_pot,
            target_yield_bps,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` principal for `beneficiary`, paid by `payer`.
    ///
    /// The pool is synced and the beneficiary's accrued rewards are measured
    /// against their *old* principal before the deposit takes effect, so new
    /// tokens never earn retroactively.
    pub fn stake(
        env: Env,
        payer: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        payer.require_auth();

        if amount < MINIMUM_STAKE {
            return Err(ContractError::BelowMinimumStake);
        }

        Self::sync_pool(&env)?;

        let acc_a = load_amount(&env, &ACC_A);
        let acc_b = load_amount(&env, &ACC_B);

        let mut position = load_position(&env, &beneficiary);
        let owed_a = rewards::pending(position.principal, acc_a, position.debt_a);
        let owed_b = rewards::pending(position.principal, acc_b, position.debt_b);

        // Pull the principal from the payer into the contract.
        let principal_token = load_address(&env, &PRINCIPAL_TOKEN)?;
        token::Client::new(&env, &principal_token).transfer(
            &payer,
            &env.current_contract_address(),
            &amount,
        );

        position.principal = position.principal.saturating_add(amount);
        position.debt_a = rewards::debt_baseline(position.principal, acc_a);
        position.debt_b = rewards::debt_baseline(position.principal, acc_b);
        store_position(&env, &beneficiary, &position);

        let new_total = load_amount(&env, &TOTAL_STAKED).saturating_add(amount);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Self::recompute_emission(&env, new_total);

        Self::deliver_owed(&env, &beneficiary, owed_a, owed_b)?;

        events::publish_staked(&env, payer, beneficiary, amount, new_total);

        Ok(())
    }

    /// Withdraw `amount` principal, settling accrued rewards first.
    ///
    /// A remainder strictly between zero and the minimum stake would be an
    /// unviable residual position, so the withdrawal silently upgrades to
    /// the full principal. Returns the amount actually moved.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        Self::sync_pool(&env)?;

        let mut position = load_position(&env, &staker);
        if position.principal < amount {
            return Err(ContractError::InsufficientPrincipal);
        }

        let remainder = position.principal.saturating_sub(amount);
        let actual = if remainder > 0 && remainder < MINIMUM_STAKE {
            position.principal
        } else {
            amount
        };

        let acc_a = load_amount(&env, &ACC_A);
        let acc_b = load_amount(&env, &ACC_B);
        let owed_a = rewards::pending(position.principal, acc_a, position.debt_a);
        let owed_b = rewards::pending(position.principal, acc_b, position.debt_b);

        position.principal = position.principal.saturating_sub(actual);
        position.debt_a = rewards::debt_baseline(position.principal, acc_a);
        position.debt_b = rewards::debt_baseline(position.principal, acc_b);
        store_position(&env, &staker, &position);

        let new_total = load_amount(&env, &TOTAL_STAKED).saturating_sub(actual);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Self::recompute_emission(&env, new_total);

        // Internal state is final; only now touch the token contracts.
        let principal_token = load_address(&env, &PRINCIPAL_TOKEN)?;
        token::Client::new(&env, &principal_token).transfer(
            &env.current_contract_address(),
            &staker,
            &actual,
        );
        Self::deliver_owed(&env, &staker, owed_a, owed_b)?;

        events::publish_withdrawn(&env, staker, amount, actual, new_total);

        Ok(actual)
    }

    /// Settle all accrued rewards for `staker` without touching principal.
    pub fn claim(env: Env, staker: Address) -> Result<ClaimedRewards, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        staker.require_auth();

        Self::sync_pool(&env)?;

        let acc_a = load_amount(&env, &ACC_A);
        let acc_b = load_amount(&env, &ACC_B);

        let mut position = load_position(&env, &staker);
        let owed_a = rewards::pending(position.principal, acc_a, position.debt_a);
        let owed_b = rewards::pending(position.principal, acc_b, position.debt_b);

        position.debt_a = rewards::debt_baseline(position.principal, acc_a);
        position.debt_b = rewards::debt_baseline(position.principal, acc_b);
        store_position(&env, &staker, &position);

        Self::deliver_owed(&env, &staker, owed_a, owed_b)?;

        events::publish_rewards_claimed(&env, staker, owed_a, owed_b);

        Ok(ClaimedRewards {
            reward_a: owed_a,
            reward_b: owed_b,
        })
    }

    // ── Reward delivery (stream B) ──────────────────────────────────────────

    /// Push `amount` reward tokens into the pot and fold the event into the
    /// rate model. Only the configured reward source may deliver.
    ///
    /// The pool syncs before the model changes, so the elapsed interval
    /// accrues at the old rate and the new rate applies going forward.
    pub fn deliver_reward(env: Env, source: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        source.require_auth();

        let configured = load_address(&env, &REWARD_SOURCE).map_err(|_| ContractError::Unauthorized)?;
        if source != configured {
            return Err(ContractError::Unauthorized);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        Self::sync_pool(&env)?;

        let mut model = load_rate_model(&env)?;
        model.record_delivery(amount, env.ledger().timestamp())?;
        env.storage().instance().set(&RATE_MODEL, &model);

        let reward_token = load_address(&env, &REWARD_TOKEN)?;
        token::Client::new(&env, &reward_token).transfer(
            &source,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_reward_delivered(&env, source, amount, model.current_rate());

        Ok(())
    }

    // ── Governance ──────────────────────────────────────────────────────────

    /// Two-phase change of the target annual yield.
    ///
    /// The first call with a value records a proposal at the current ledger
    /// sequence; a second call with the identical value at a later sequence
    /// inside the window commits it. A changed value or an expired window
    /// restarts the proposal. Returns `true` when the call committed.
    pub fn propose_or_commit(
        env: Env,
        caller: Address,
        target_bps: u32,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if target_bps > MAX_BPS {
            return Err(ContractError::ParameterOutOfRange);
        }

        let sequence = env.ledger().sequence();
        let pending = governance::load(&env);

        match governance::evaluate(&pending, target_bps, sequence) {
            Outcome::Proposed => {
                governance::store(
                    &env,
                    &governance::PendingParameter {
                        proposed_bps: target_bps,
                        proposed_at_sequence: sequence,
                        in_progress: true,
                    },
                );
                events::publish_yield_change_proposed(&env, target_bps, sequence);
                Ok(false)
            }
            Outcome::Held => Ok(false),
            Outcome::Committed => {
                // Settle the elapsed interval at the old yield before the
                // parameter changes.
                Self::sync_pool(&env)?;

                env.storage().instance().set(&TARGET_BPS, &target_bps);
                governance::clear(&env);
                Self::recompute_emission(&env, load_amount(&env, &TOTAL_STAKED));

                events::publish_yield_change_committed(&env, target_bps, sequence);
                Ok(true)
            }
        }
    }

    // ── Owner configuration ─────────────────────────────────────────────────

    /// Replace the EMA smoothing weight (`0 < alpha ≤ 10^18`).
    ///
    /// Stays available while paused so a misconfigured model can be fixed
    /// during an incident.
    pub fn set_alpha(env: Env, caller: Address, alpha: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        Self::sync_pool(&env)?;

        let mut model = load_rate_model(&env)?;
        model.set_alpha(alpha)?;
        env.storage().instance().set(&RATE_MODEL, &model);

        events::publish_alpha_set(&env, alpha);

        Ok(())
    }

    /// Replace the linear depletion window; the rate for the remaining
    /// balance re-derives immediately.
    pub fn set_depletion_duration(
        env: Env,
        caller: Address,
        duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        Self::sync_pool(&env)?;

        let mut model = load_rate_model(&env)?;
        model.set_depletion_duration(duration)?;
        env.storage().instance().set(&RATE_MODEL, &model);

        events::publish_depletion_duration_set(&env, duration, model.current_rate());

        Ok(())
    }

    /// Designate the address allowed to push stream-B rewards.
    pub fn set_reward_source(
        env: Env,
        caller: Address,
        source: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if source == env.current_contract_address() {
            return Err(ContractError::InvalidAddress);
        }

        env.storage().instance().set(&REWARD_SOURCE, &source);

        events::publish_reward_source_set(&env, source);

        Ok(())
    }

    /// Designate the address allowed to pause the pool.
    pub fn set_pauser(env: Env, caller: Address, pauser: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if pauser == env.current_contract_address() {
            return Err(ContractError::InvalidAddress);
        }

        env.storage().instance().set(&PAUSER, &pauser);

        events::publish_pauser_set(&env, pauser);

        Ok(())
    }

    // ── Pause / emergency ───────────────────────────────────────────────────

    /// Freeze staking, withdrawal, claims, delivery, and governance.
    /// The designated pauser or the owner may engage the freeze.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let owner = load_address(&env, &OWNER)?;
        let pauser: Option<Address> = env.storage().instance().get(&PAUSER);
        if caller != owner && Some(&caller) != pauser.as_ref() {
            return Err(ContractError::Unauthorized);
        }

        pause::set_paused(&env, true);

        events::publish_paused(&env, caller);

        Ok(())
    }

    /// Resume normal operation. Owner only.
    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        pause::set_paused(&env, false);

        events::publish_unpaused(&env, caller);

        Ok(())
    }

    /// Sweep the contract's full token balances to `recipient` and force a
    /// pause. Owner only. Reward state is left as-is; stakers recover
    /// principal afterwards through `pause_withdraw`.
    pub fn emergency_transfer(
        env: Env,
        caller: Address,
        recipient: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let contract = env.current_contract_address();
        if recipient == contract {
            return Err(ContractError::InvalidAddress);
        }

        pause::set_paused(&env, true);

        let principal_token = load_address(&env, &PRINCIPAL_TOKEN)?;
        let principal_client = token::Client::new(&env, &principal_token);
        let principal_amount = principal_client.balance(&contract);
        if principal_amount > 0 {
            principal_client.transfer(&contract, &recipient, &principal_amount);
        }

        // With a shared pot there is only one balance, already swept above.
        let shared: bool = env.storage().instance().get(&SHARED_POT).unwrap_or(false);
        let mut reward_amount = 0i128;
        if !shared {
            let reward_token = load_address(&env, &REWARD_TOKEN)?;
            let reward_client = token::Client::new(&env, &reward_token);
            reward_amount = reward_client.balance(&contract);
            if reward_amount > 0 {
                reward_client.transfer(&contract, &recipient, &reward_amount);
            }
        }

        events::publish_emergency_sweep(&env, recipient, principal_amount, reward_amount);

        Ok(())
    }

    /// Principal-only escape hatch, available exclusively while paused.
    ///
    /// Moves principal out with the usual dust upgrade but performs no
    /// reward settlement and no pool sync, so it works even when
    /// reward-stream state is inconsistent (e.g. after a sweep). Forfeits
    /// any unsettled rewards on a full exit. Returns the amount moved.
    pub fn pause_withdraw(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_paused(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let mut position = load_position(&env, &staker);
        if position.principal < amount {
            return Err(ContractError::InsufficientPrincipal);
        }

        let remainder = position.principal.saturating_sub(amount);
        let actual = if remainder > 0 && remainder < MINIMUM_STAKE {
            position.principal
        } else {
            amount
        };

        position.principal = position.principal.saturating_sub(actual);
        if position.principal == 0 {
            position.debt_a = 0;
            position.debt_b = 0;
        }
        store_position(&env, &staker, &position);

        let new_total = load_amount(&env, &TOTAL_STAKED).saturating_sub(actual);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        // The emission rate is a pure function of the total; re-deriving it
        // is not a pool sync and touches no accumulator.
        Self::recompute_emission(&env, new_total);

        let principal_token = load_address(&env, &PRINCIPAL_TOKEN)?;
        token::Client::new(&env, &principal_token).transfer(
            &env.current_contract_address(),
            &staker,
            &actual,
        );

        events::publish_pause_withdrawn(&env, staker, amount, actual);

        Ok(actual)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Forward-projected stream-A reward for `account`, as if the pool
    /// synced now.
    pub fn pending_reward_a(env: Env, account: Address) -> i128 {
        let Ok(model) = load_rate_model(&env) else {
            return 0;
        };
        let projection = Self::project_accrual(&env, &model);
        let position = load_position(&env, &account);
        rewards::pending(position.principal, projection.acc_per_share_a, position.debt_a)
    }

    /// Forward-projected stream-B reward for `account`, including the pot
    /// cap a real sync would apply.
    pub fn pending_reward_b(env: Env, account: Address) -> i128 {
        let Ok(model) = load_rate_model(&env) else {
            return 0;
        };
        let projection = Self::project_accrual(&env, &model);
        let position = load_position(&env, &account);
        rewards::pending(position.principal, projection.acc_per_share_b, position.debt_b)
    }

    /// Raw stored position for `account`; zeroed if none exists.
    pub fn get_position(env: Env, account: Address) -> Position {
        load_position(&env, &account)
    }

    /// Stored (not projected) global pool state.
    pub fn pool_info(env: Env) -> PoolInfo {
        let rate_per_second_b = match load_rate_model(&env) {
            Ok(model) => model.current_rate(),
            Err(_) => 0,
        };
        PoolInfo {
            total_staked: load_amount(&env, &TOTAL_STAKED),
            acc_per_share_a: load_amount(&env, &ACC_A),
            acc_per_share_b: load_amount(&env, &ACC_B),
            last_accrual_time: env.storage().instance().get(&LAST_ACCRUAL).unwrap_or(0),
            rate_per_second_a: load_amount(&env, &RATE_A),
            rate_per_second_b,
            target_yield_bps: env.storage().instance().get(&TARGET_BPS).unwrap_or(0),
            paused: pause::is_paused(&env),
        }
    }

    /// The governance singleton; idle when no proposal is in flight.
    pub fn pending_parameter_info(env: Env) -> governance::PendingParameter {
        governance::load(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        load_address(&env, &OWNER)
    }

    pub fn get_pauser(env: Env) -> Option<Address> {
        env.storage().instance().get(&PAUSER)
    }

    pub fn get_reward_source(env: Env) -> Option<Address> {
        env.storage().instance().get(&REWARD_SOURCE)
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the pool is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner = load_address(env, &OWNER)?;
        if *caller != owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Stream-B pot available for distribution: the contract's reward-token
    /// balance, minus staked principal when both streams share one token.
    fn available_reward_pot(env: &Env, total_staked: i128) -> i128 {
        let Some(reward_token) = env.storage().instance().get::<_, Address>(&REWARD_TOKEN)
        else {
            return 0;
        };
        let balance =
            token::Client::new(env, &reward_token).balance(&env.current_contract_address());
        let shared: bool = env.storage().instance().get(&SHARED_POT).unwrap_or(false);
        let available = if shared {
            balance.saturating_sub(total_staked)
        } else {
            balance
        };
        available.max(0)
    }

    /// Replay the interval since the last accrual without writing anything.
    ///
    /// Shared by `sync_pool` and the pending-reward views so a projection
    /// can never disagree with what a sync would commit.
    fn project_accrual(env: &Env, model: &RateModel) -> Projection {
        let acc_per_share_a = load_amount(env, &ACC_A);
        let acc_per_share_b = load_amount(env, &ACC_B);

        let now = env.ledger().timestamp();
        let last: u64 = env.storage().instance().get(&LAST_ACCRUAL).unwrap_or(0);
        let total_staked = load_amount(env, &TOTAL_STAKED);

        if now <= last || total_staked <= 0 {
            return Projection {
                acc_per_share_a,
                acc_per_share_b,
                distributed_b: 0,
            };
        }

        let elapsed = now.saturating_sub(last);

        let minted_a = rewards::stream_a_accrual(load_amount(env, &RATE_A), elapsed);
        let acc_per_share_a = rewards::accrue_per_share(acc_per_share_a, minted_a, total_staked);

        // Stream B never distributes more than the pot holds right now.
        let potential_b = rewards::stream_b_accrual(model.current_rate(), elapsed);
        let distributed_b = potential_b.min(Self::available_reward_pot(env, total_staked));
        let acc_per_share_b =
            rewards::accrue_per_share(acc_per_share_b, distributed_b, total_staked);

        Projection {
            acc_per_share_a,
            acc_per_share_b,
            distributed_b,
        }
    }

    /// Bring the pool up to the current ledger time.
    ///
    /// With nothing staked only the clock advances: undistributed reward
    /// value stays in the pot rather than accruing to an empty pool.
    fn sync_pool(env: &Env) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let last: u64 = env.storage().instance().get(&LAST_ACCRUAL).unwrap_or(0);
        if now <= last {
            return Ok(());
        }

        let total_staked = load_amount(env, &TOTAL_STAKED);
        if total_staked <= 0 {
            env.storage().instance().set(&LAST_ACCRUAL, &now);
            return Ok(());
        }

        let mut model = load_rate_model(env)?;
        let projection = Self::project_accrual(env, &model);

        env.storage().instance().set(&ACC_A, &projection.acc_per_share_a);
        env.storage().instance().set(&ACC_B, &projection.acc_per_share_b);
        env.storage().instance().set(&LAST_ACCRUAL, &now);

        if projection.distributed_b > 0 {
            model.record_distribution(projection.distributed_b);
            env.storage().instance().set(&RATE_MODEL, &model);
        }

        Ok(())
    }

    /// Re-derive the stream-A rate after any change to the staked total or
    /// the target yield.
    fn recompute_emission(env: &Env, total_staked: i128) {
        let target_bps: u32 = env.storage().instance().get(&TARGET_BPS).unwrap_or(0);
        let rate = rewards::emission_rate(total_staked, target_bps);
        env.storage().instance().set(&RATE_A, &rate);
    }

    /// Issue the external deliveries for settled rewards: stream A mints
    /// the principal token, stream B pays out of the reward pot. Callers
    /// commit every internal write before reaching this point.
    fn deliver_owed(
        env: &Env,
        account: &Address,
        owed_a: i128,
        owed_b: i128,
    ) -> Result<(), ContractError> {
        if owed_a > 0 {
            let principal_token = load_address(env, &PRINCIPAL_TOKEN)?;
            token::StellarAssetClient::new(env, &principal_token).mint(account, &owed_a);
        }
        if owed_b > 0 {
            let reward_token = load_address(env, &REWARD_TOKEN)?;
            token::Client::new(env, &reward_token).transfer(
                &env.current_contract_address(),
                account,
                &owed_b,
            );
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_governance;

#[cfg(test)]
mod test_pause;
