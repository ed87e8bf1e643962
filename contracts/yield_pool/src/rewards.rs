/// Fixed-point scaling factor.
///
/// Per-share accumulators, stream-B rates, and the EMA alpha are all stored
/// multiplied by this constant so sub-unit precision survives integer
/// division.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Smallest stake a position may hold. One whole token at Stellar's
/// 7 decimal places.
pub const MINIMUM_STAKE: i128 = 10_000_000;

/// Basis-point denominator for the target annual yield.
pub const MAX_BPS: u32 = 10_000;

/// 365-day year used by the emission model.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

// ── Core accumulator math ───────────────────────────────────────────────────

/// Fold `distributed` reward units into a per-share accumulator.
///
/// ```text
/// new_acc = stored + distributed × PRECISION / total_staked
/// ```
///
/// With `total_staked <= 0` the accumulator is returned unchanged: an empty
/// pool allocates nothing, and the undistributed value simply stays in the
/// pot.
#[allow(clippy::arithmetic_side_effects)]
pub fn accrue_per_share(stored: i128, distributed: i128, total_staked: i128) -> i128 {
    if total_staked <= 0 || distributed <= 0 {
        return stored;
    }

    let delta = distributed.saturating_mul(PRECISION) / total_staked;
    stored.saturating_add(delta)
}

/// Stream-A reward minted over `elapsed` seconds at a plain tokens-per-second
/// rate.
pub fn stream_a_accrual(rate_per_second: i128, elapsed: u64) -> i128 {
    rate_per_second.saturating_mul(elapsed as i128)
}

/// Stream-B reward released over `elapsed` seconds at a PRECISION-scaled
/// rate. The caller caps the result at the available pot balance.
#[allow(clippy::arithmetic_side_effects)]
pub fn stream_b_accrual(rate_per_second: i128, elapsed: u64) -> i128 {
    rate_per_second.saturating_mul(elapsed as i128) / PRECISION
}

/// Reward owed to a position since its last baseline.
///
/// ```text
/// owed = principal × acc_per_share / PRECISION − debt
/// ```
///
/// Floored at zero: a debt above the current entitlement (possible only via
/// the emergency principal-recovery path, which skips settlement) must never
/// manufacture a negative claim.
#[allow(clippy::arithmetic_side_effects)]
pub fn pending(principal: i128, acc_per_share: i128, debt: i128) -> i128 {
    if principal <= 0 {
        return 0;
    }

    let entitled = principal.saturating_mul(acc_per_share) / PRECISION;
    entitled.saturating_sub(debt).max(0)
}

/// Debt marker for a position settled against the current accumulator.
#[allow(clippy::arithmetic_side_effects)]
pub fn debt_baseline(principal: i128, acc_per_share: i128) -> i128 {
    if principal <= 0 {
        return 0;
    }
    principal.saturating_mul(acc_per_share) / PRECISION
}

// ── Emission model (stream A) ───────────────────────────────────────────────

/// Tokens-per-second emission implied by the target annual yield.
///
/// ```text
/// rate = total_staked × target_yield_bps / MAX_BPS / SECONDS_PER_YEAR
/// ```
///
/// Zero when nothing is staked. Recomputed on every change to
/// `total_staked` and on each governance commit.
#[allow(clippy::arithmetic_side_effects)]
pub fn emission_rate(total_staked: i128, target_yield_bps: u32) -> i128 {
    if total_staked <= 0 {
        return 0;
    }

    total_staked.saturating_mul(target_yield_bps as i128) / (MAX_BPS as i128)
        / (SECONDS_PER_YEAR as i128)
}

// ── Rate-model helpers (stream B) ───────────────────────────────────────────

/// PRECISION-scaled instantaneous rate of a single delivery event.
///
/// `elapsed` must be non-zero; the caller rejects same-instant deliveries
/// before reaching this point.
#[allow(clippy::arithmetic_side_effects)]
pub fn instant_rate(amount: i128, elapsed: u64) -> i128 {
    amount.saturating_mul(PRECISION) / (elapsed as i128)
}

/// Exponential smoothing step.
///
/// ```text
/// new = (alpha × instant + (PRECISION − alpha) × smoothed) / PRECISION
/// ```
///
/// With `alpha` strictly inside `(0, PRECISION)` the result lands strictly
/// between the old smoothed rate and the instantaneous one, bounding how far
/// a single bursty delivery can move the rate.
#[allow(clippy::arithmetic_side_effects)]
pub fn ema_blend(smoothed: i128, instant: i128, alpha: i128) -> i128 {
    let weighted_new = alpha.saturating_mul(instant);
    let weighted_old = PRECISION.saturating_sub(alpha).saturating_mul(smoothed);
    weighted_new.saturating_add(weighted_old) / PRECISION
}

/// PRECISION-scaled rate that pays `reward_balance` out linearly over
/// `depletion_duration` seconds.
#[allow(clippy::arithmetic_side_effects)]
pub fn linear_rate(reward_balance: i128, depletion_duration: u64) -> i128 {
    if depletion_duration == 0 || reward_balance <= 0 {
        return 0;
    }
    reward_balance.saturating_mul(PRECISION) / (depletion_duration as i128)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
