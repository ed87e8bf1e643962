use soroban_sdk::{symbol_short, Env, Symbol};

use crate::ContractError;

const PAUSED: Symbol = symbol_short!("PAUSED");

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Guard for the ordinary mutating entry points.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Guard for the emergency principal-recovery path, which is only available
/// while the pool is frozen.
pub fn require_paused(env: &Env) -> Result<(), ContractError> {
    if !is_paused(env) {
        return Err(ContractError::NotPaused);
    }
    Ok(())
}
