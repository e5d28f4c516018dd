//! Vault configuration stored in instance storage.

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::reward_tiers::RewardPolicy;
use crate::{DataKey, Error};

/// Default minimum impact score released for settlement (30.00).
pub const DEFAULT_MIN_IMPACT_SCORE: u32 = 3_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    /// Ethereum-style address of the oracle signing key.
    pub oracle: BytesN<20>,
    /// Token contract rewards are paid in.
    pub reward_token: Address,
    pub min_impact_score: u32,
    pub reward_policy: RewardPolicy,
}

/// # Errors
/// `NotInitialized` before `initialize`.
pub fn get(e: &Env) -> Result<VaultConfig, Error> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set(e: &Env, config: &VaultConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}
