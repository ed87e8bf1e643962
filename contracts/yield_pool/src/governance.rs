use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

const PENDING: Symbol = symbol_short!("PENDING");

/// Ledger-sequence window inside which a proposal must be confirmed.
pub const PROPOSAL_WINDOW: u32 = 100;

/// The governance singleton: at most one yield-change proposal in flight.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingParameter {
    pub proposed_bps: u32,
    pub proposed_at_sequence: u32,
    pub in_progress: bool,
}

impl PendingParameter {
    pub fn idle() -> Self {
        PendingParameter {
            proposed_bps: 0,
            proposed_at_sequence: 0,
            in_progress: false,
        }
    }
}

/// What a `propose_or_commit` call does, decided before any state is touched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Start (or restart) the proposal at the current sequence.
    Proposed,
    /// Same value resubmitted at the same sequence — nothing changes.
    Held,
    /// Confirmation inside the window: apply the value.
    Committed,
}

/// Two-phase-commit decision rule.
///
/// A call (re)proposes when idle, when the value changed, or when the stored
/// proposal aged past `PROPOSAL_WINDOW` sequence numbers. It commits only
/// when the identical value is confirmed at a strictly later sequence inside
/// the window. Every call therefore either advances toward a commit or
/// restarts the proposal — the protocol cannot wedge, and no single call
/// both proposes and applies a value.
pub fn evaluate(pending: &PendingParameter, value: u32, sequence: u32) -> Outcome {
    if !pending.in_progress
        || pending.proposed_bps != value
        || sequence.saturating_sub(pending.proposed_at_sequence) > PROPOSAL_WINDOW
    {
        return Outcome::Proposed;
    }
    if sequence > pending.proposed_at_sequence {
        return Outcome::Committed;
    }
    Outcome::Held
}

// ── Storage ─────────────────────────────────────────────────────────────────

pub fn load(env: &Env) -> PendingParameter {
    env.storage()
        .instance()
        .get(&PENDING)
        .unwrap_or_else(PendingParameter::idle)
}

pub fn store(env: &Env, pending: &PendingParameter) {
    env.storage().instance().set(&PENDING, pending);
}

pub fn clear(env: &Env) {
    env.storage().instance().remove(&PENDING);
}

// ── Unit tests ──────────────────────────────────────────────────────────────
