//! Settlement of oracle attestations.
//!
//! `Received -> Verified -> Settled`, or `Received -> Rejected`. Every check
//! runs before the first write, so a rejected attestation leaves no trace.
//! After verification the event and nonce are marked processed, the reward is
//! paid from the vault's reserve and the volunteer's reputation is updated.
//! A failure after the markers are written returns an error, and the host
//! rolls back the whole invocation, markers included.

use soroban_sdk::{log, token, Address, Env, String};

use crate::types::{Attestation, OracleSignature, SettlementReceipt, MAX_IMPACT_SCORE};
use crate::verifier::{self, SignatureVerifier};
use crate::{config, events, replay, reputation, reward_tiers, DataKey, Error};

/// Stateless checks of steps 1-4: replay, expiry, score range, identities and
/// amount.
///
/// # Errors
/// The specific rejection reason.
pub fn validate(
    e: &Env,
    attestation: &Attestation,
    min_impact_score: u32,
) -> Result<(), Error> {
    replay::ensure_fresh(e, &attestation.event_id, &attestation.nonce)?;

    if e.ledger().timestamp() > attestation.expires_at {
        return Err(Error::PayloadExpired);
    }
    if attestation.impact_score > MAX_IMPACT_SCORE {
        return Err(Error::InvalidImpactScore);
    }
    if attestation.impact_score < min_impact_score {
        return Err(Error::ScoreBelowMinimum);
    }

    // The vault itself stands in for the null identity.
    let vault = e.current_contract_address();
    if attestation.volunteer == vault || attestation.beneficiary == vault {
        return Err(Error::InvalidAddress);
    }
    if attestation.token_reward <= 0 {
        return Err(Error::ZeroAmount);
    }
    Ok(())
}

fn pay_reward(e: &Env, reward_token: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    let client = token::Client::new(e, reward_token);
    let vault = e.current_contract_address();
    if client.balance(&vault) < amount {
        log!(e, "reward reserve too low", amount);
        return Err(Error::MintOrTransferFailed);
    }
    client.transfer(&vault, to, &amount);
    Ok(())
}

/// Consumes `attestation` exactly once. Returns the volunteer's new
/// cumulative score.
///
/// # Errors
/// Any validation failure, `InvalidSignature`, `MintOrTransferFailed`,
/// `BannedParticipant` or `Overflow`.
pub fn settle<V: SignatureVerifier>(
    e: &Env,
    verifier: &V,
    attestation: &Attestation,
    signature: &OracleSignature,
) -> Result<u64, Error> {
    let cfg = config::get(e)?;

    validate(e, attestation, cfg.min_impact_score)?;
    verifier::verify(e, verifier, attestation, signature, &cfg.oracle)?;

    replay::mark_processed(e, &attestation.event_id, &attestation.nonce);

    let reward = reward_tiers::resolve_reward(
        e,
        cfg.reward_policy,
        attestation.impact_score,
        attestation.token_reward,
    )?;
    pay_reward(e, &cfg.reward_token, &attestation.volunteer, reward)?;

    let new_score = reputation::update(
        e,
        &attestation.volunteer,
        attestation.impact_score,
        &attestation.event_hash,
    )?;

    let now = e.ledger().timestamp();
    e.storage().persistent().set(
        &DataKey::Receipt(attestation.event_id.clone()),
        &SettlementReceipt {
            event_id: attestation.event_id.clone(),
            nonce: attestation.nonce.clone(),
            volunteer: attestation.volunteer.clone(),
            impact_score: attestation.impact_score,
            reward,
            settled_at: now,
        },
    );

    let mut stats = reputation::get_stats(e);
    stats.settlement_count = stats
        .settlement_count
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    stats.total_rewards = stats
        .total_rewards
        .checked_add(reward)
        .ok_or(Error::Overflow)?;
    reputation::set_stats(e, &stats);

    events::emit_reward_settled(e, attestation, reward, new_score);
    Ok(new_score)
}

#[must_use]
pub fn get_receipt(e: &Env, event_id: &String) -> Option<SettlementReceipt> {
    e.storage()
        .persistent()
        .get(&DataKey::Receipt(event_id.clone()))
}
