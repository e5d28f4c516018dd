//! Replay protection for settled attestations.
//!
//! Every settled attestation leaves two permanent markers: one under its
//! `event_id` and one under its `nonce`. Either marker blocks a second
//! settlement, so a re-issued claim attestation (fresh nonce, same event)
//! and a replayed one (same nonce) are both rejected. Markers are never
//! removed.

use soroban_sdk::{Env, String};

use crate::{DataKey, Error};

#[must_use]
pub fn is_event_processed(e: &Env, event_id: &String) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::ProcessedEvent(event_id.clone()))
}

#[must_use]
pub fn is_nonce_used(e: &Env, nonce: &String) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::ProcessedNonce(nonce.clone()))
}

/// Fails if either key was already consumed.
///
/// # Errors
/// `EventAlreadyProcessed` for a seen event, `NonceAlreadyUsed` for a seen nonce.
pub fn ensure_fresh(e: &Env, event_id: &String, nonce: &String) -> Result<(), Error> {
    if is_event_processed(e, event_id) {
        return Err(Error::EventAlreadyProcessed);
    }
    if is_nonce_used(e, nonce) {
        return Err(Error::NonceAlreadyUsed);
    }
    Ok(())
}

/// Marks both keys consumed. Call only after every validation has passed.
pub fn mark_processed(e: &Env, event_id: &String, nonce: &String) {
    e.storage()
        .persistent()
        .set(&DataKey::ProcessedEvent(event_id.clone()), &true);
    e.storage()
        .persistent()
        .set(&DataKey::ProcessedNonce(nonce.clone()), &true);
}
