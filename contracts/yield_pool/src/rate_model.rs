use soroban_sdk::contracttype;

use crate::rewards::{self, PRECISION};
use crate::ContractError;

// ── States ──────────────────────────────────────────────────────────────────

/// Exponentially-smoothed rate fed by irregular push deliveries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmaState {
    /// PRECISION-scaled tokens per second.
    pub smoothed_rate: i128,
    pub last_event_time: u64,
    /// Weight of a new observation, in `(0, PRECISION]`.
    pub alpha: i128,
    /// False until the first delivery seeds the smoother.
    pub seeded: bool,
}

/// Rate that pays a standing balance out linearly over a fixed window.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinearState {
    /// Delivered but not yet distributed reward units.
    pub reward_balance: i128,
    /// PRECISION-scaled tokens per second; always
    /// `reward_balance × PRECISION / depletion_duration`.
    pub rate_per_second: i128,
    pub depletion_duration: u64,
}

/// The stream-B rate source, chosen once at initialization.
///
/// The accrual engine only ever calls `current_rate`, `record_delivery`,
/// and `record_distribution` — variant-specific behavior stays behind this
/// seam.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RateModel {
    Ema(EmaState),
    Linear(LinearState),
}

/// Constructor-time model selection: `Ema(alpha)` or `Linear(duration)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RateModelConfig {
    Ema(i128),
    Linear(u64),
}

// ── Behavior ────────────────────────────────────────────────────────────────

impl RateModel {
    /// Build and validate the model chosen at initialization.
    ///
    /// `now` seeds the EMA event clock so the first delivery has a
    /// well-defined elapsed interval.
    pub fn from_config(config: &RateModelConfig, now: u64) -> Result<Self, ContractError> {
        match config {
            RateModelConfig::Ema(alpha) => {
                if *alpha <= 0 || *alpha > PRECISION {
                    return Err(ContractError::ParameterOutOfRange);
                }
                Ok(RateModel::Ema(EmaState {
                    smoothed_rate: 0,
                    last_event_time: now,
                    alpha: *alpha,
                    seeded: false,
                }))
            }
            RateModelConfig::Linear(duration) => {
                if *duration == 0 {
                    return Err(ContractError::ParameterOutOfRange);
                }
                Ok(RateModel::Linear(LinearState {
                    reward_balance: 0,
                    rate_per_second: 0,
                    depletion_duration: *duration,
                }))
            }
        }
    }

    /// Current stream-B rate, PRECISION-scaled tokens per second.
    pub fn current_rate(&self) -> i128 {
        match self {
            RateModel::Ema(state) => state.smoothed_rate,
            RateModel::Linear(state) => state.rate_per_second,
        }
    }

    /// Fold a push delivery into the rate.
    ///
    /// EMA: blends the delivery's instantaneous rate into the smoothed one
    /// (first event seeds it outright) and advances the event clock. A
    /// second delivery in the same ledger is rejected — an instantaneous
    /// rate over zero elapsed time is undefined.
    ///
    /// Linear: grows the standing balance and re-derives the payout rate.
    pub fn record_delivery(&mut self, amount: i128, now: u64) -> Result<(), ContractError> {
        match self {
            RateModel::Ema(state) => {
                let elapsed = now.saturating_sub(state.last_event_time);
                if elapsed == 0 {
                    return Err(ContractError::SameInstantDelivery);
                }

                let instant = rewards::instant_rate(amount, elapsed);
                state.smoothed_rate = if state.seeded {
                    rewards::ema_blend(state.smoothed_rate, instant, state.alpha)
                } else {
                    instant
                };
                state.last_event_time = now;
                state.seeded = true;
                Ok(())
            }
            RateModel::Linear(state) => {
                state.reward_balance = state.reward_balance.saturating_add(amount);
                state.rate_per_second =
                    rewards::linear_rate(state.reward_balance, state.depletion_duration);
                Ok(())
            }
        }
    }

    /// Notify the model that `amount` reward units left the pot during a
    /// pool sync. The linear variant shrinks its balance and re-derives the
    /// rate, guaranteeing depletion to zero; the EMA variant tracks
    /// deliveries only.
    pub fn record_distribution(&mut self, amount: i128) {
        if let RateModel::Linear(state) = self {
            state.reward_balance = state.reward_balance.saturating_sub(amount).max(0);
            state.rate_per_second =
                rewards::linear_rate(state.reward_balance, state.depletion_duration);
        }
    }

    /// Replace the EMA smoothing weight. Applies to future deliveries only.
    pub fn set_alpha(&mut self, alpha: i128) -> Result<(), ContractError> {
        match self {
            RateModel::Ema(state) => {
                if alpha <= 0 || alpha > PRECISION {
                    return Err(ContractError::ParameterOutOfRange);
                }
                state.alpha = alpha;
                Ok(())
            }
            RateModel::Linear(_) => Err(ContractError::RateModelMismatch),
        }
    }

    /// Replace the linear depletion window and re-derive the rate for the
    /// remaining balance.
    pub fn set_depletion_duration(&mut self, duration: u64) -> Result<(), ContractError> {
        match self {
            RateModel::Linear(state) => {
                if duration == 0 {
                    return Err(ContractError::ParameterOutOfRange);
                }
                state.depletion_duration = duration;
                state.rate_per_second =
                    rewards::linear_rate(state.reward_balance, duration);
                Ok(())
            }
            RateModel::Ema(_) => Err(ContractError::RateModelMismatch),
        }
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
