//! Reward tier table and reward policy.
//!
//! The tier table maps impact-score thresholds to fixed payouts. It is kept
//! sorted by descending threshold and always ends at threshold 0, so every
//! valid score resolves to exactly one tier: the highest threshold not above
//! the score.

use soroban_sdk::{contracttype, Env, Vec};

use crate::types::MAX_IMPACT_SCORE;
use crate::{DataKey, Error};

/// One unit of the reward token (7 decimals).
pub const TOKEN_UNIT: i128 = 10_000_000;

/// One row of the tier table.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTier {
    pub min_score: u32,
    pub amount: i128,
}

/// How the payout is derived from an attestation.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardPolicy {
    /// Pay `token_reward` as signed by the oracle.
    Direct,
    /// Pay the tier payout for the impact score.
    Tiered,
    /// Pay `token_reward`, capped at the tier payout.
    CappedByTier,
}

/// Default table: ≥90.00 → 100, ≥75.00 → 50, ≥50.00 → 20, ≥25.00 → 5, else 1.
#[must_use]
pub fn default_tiers(e: &Env) -> Vec<RewardTier> {
    let mut tiers = Vec::new(e);
    for (min_score, whole) in [(9_000u32, 100i128), (7_500, 50), (5_000, 20), (2_500, 5), (0, 1)] {
        tiers.push_back(RewardTier {
            min_score,
            amount: whole * TOKEN_UNIT,
        });
    }
    tiers
}

/// Validates a tier table: non-empty, thresholds strictly descending and
/// within the score scale, final threshold 0, positive amounts.
///
/// # Errors
/// `InvalidTierTable` when any rule is broken.
pub fn validate_tiers(tiers: &Vec<RewardTier>) -> Result<(), Error> {
    if tiers.is_empty() {
        return Err(Error::InvalidTierTable);
    }
    let mut previous: Option<u32> = None;
    for tier in tiers.iter() {
        if tier.amount <= 0 || tier.min_score > MAX_IMPACT_SCORE {
            return Err(Error::InvalidTierTable);
        }
        if let Some(prev) = previous {
            if tier.min_score >= prev {
                return Err(Error::InvalidTierTable);
            }
        }
        previous = Some(tier.min_score);
    }
    if previous != Some(0) {
        return Err(Error::InvalidTierTable);
    }
    Ok(())
}

#[must_use]
pub fn get_tiers(e: &Env) -> Vec<RewardTier> {
    e.storage()
        .instance()
        .get(&DataKey::RewardTiers)
        .unwrap_or_else(|| default_tiers(e))
}

/// Replaces the tier table. Admin only (enforced by caller).
pub fn set_tiers(e: &Env, tiers: &Vec<RewardTier>) -> Result<(), Error> {
    validate_tiers(tiers)?;
    e.storage().instance().set(&DataKey::RewardTiers, tiers);
    Ok(())
}

/// Payout of the highest tier whose threshold is at or below `impact_score`.
#[must_use]
pub fn tier_reward(tiers: &Vec<RewardTier>, impact_score: u32) -> i128 {
    for tier in tiers.iter() {
        if impact_score >= tier.min_score {
            return tier.amount;
        }
    }
    0
}

/// Resolves the amount paid for an attestation under `policy`.
///
/// # Errors
/// `ZeroAmount` if the policy resolves to nothing payable.
pub fn resolve_reward(
    e: &Env,
    policy: RewardPolicy,
    impact_score: u32,
    token_reward: i128,
) -> Result<i128, Error> {
    let amount = match policy {
        RewardPolicy::Direct => token_reward,
        RewardPolicy::Tiered => tier_reward(&get_tiers(e), impact_score),
        RewardPolicy::CappedByTier => {
            core::cmp::min(token_reward, tier_reward(&get_tiers(e), impact_score))
        }
    };
    if amount <= 0 {
        return Err(Error::ZeroAmount);
    }
    Ok(amount)
}
