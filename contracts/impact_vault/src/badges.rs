//! Soulbound achievement badges.
//!
//! Nine fixed badges, each a monotone predicate over
//! `(event_count, score_delta, cumulative_score)`. A participant's badges are
//! one `u32` bit mask; a set bit is never cleared, and awarding an earned
//! badge again is a no-op that emits nothing.

use soroban_sdk::{Address, Env, Vec};

use crate::events;
use crate::types::Badge;
use crate::DataKey;

pub const ALL_BADGES: [Badge; 9] = [
    Badge::FirstStep,
    Badge::Helper,
    Badge::Devoted,
    Badge::Champion,
    Badge::Legend,
    Badge::HighImpact,
    Badge::PerfectScore,
    Badge::Centurion,
    Badge::Titan,
];

pub const HIGH_IMPACT_MIN_DELTA: u32 = 9_000;
pub const PERFECT_SCORE_DELTA: u32 = 10_000;
pub const CENTURION_MIN_SCORE: u64 = 10_000;
pub const TITAN_MIN_SCORE: u64 = 100_000;

impl Badge {
    #[must_use]
    pub fn bit(self) -> u32 {
        1u32 << (self as u32)
    }

    /// Trigger predicate for this badge.
    #[must_use]
    pub fn is_triggered(self, event_count: u32, score_delta: u32, cumulative_score: u64) -> bool {
        match self {
            Badge::FirstStep => event_count >= 1,
            Badge::Helper => event_count >= 5,
            Badge::Devoted => event_count >= 10,
            Badge::Champion => event_count >= 25,
            Badge::Legend => event_count >= 100,
            Badge::HighImpact => score_delta >= HIGH_IMPACT_MIN_DELTA,
            Badge::PerfectScore => score_delta >= PERFECT_SCORE_DELTA,
            Badge::Centurion => cumulative_score >= CENTURION_MIN_SCORE,
            Badge::Titan => cumulative_score >= TITAN_MIN_SCORE,
        }
    }
}

/// Mask of every badge whose predicate holds for the given inputs.
#[must_use]
pub fn triggered_mask(event_count: u32, score_delta: u32, cumulative_score: u64) -> u32 {
    ALL_BADGES
        .iter()
        .filter(|b| b.is_triggered(event_count, score_delta, cumulative_score))
        .fold(0u32, |mask, b| mask | b.bit())
}

#[must_use]
pub fn get_mask(e: &Env, participant: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::Badges(participant.clone()))
        .unwrap_or(0)
}

#[must_use]
pub fn has_badge(e: &Env, participant: &Address, badge: Badge) -> bool {
    get_mask(e, participant) & badge.bit() != 0
}

#[must_use]
pub fn list(e: &Env, participant: &Address) -> Vec<Badge> {
    let mask = get_mask(e, participant);
    let mut out = Vec::new(e);
    for badge in ALL_BADGES {
        if mask & badge.bit() != 0 {
            out.push_back(badge);
        }
    }
    out
}

/// Awards every newly triggered, not yet earned badge and emits one event per
/// award. Returns the mask of badges awarded by this call.
pub fn award_new(
    e: &Env,
    participant: &Address,
    event_count: u32,
    score_delta: u32,
    cumulative_score: u64,
) -> u32 {
    let earned = get_mask(e, participant);
    let fresh = triggered_mask(event_count, score_delta, cumulative_score) & !earned;
    if fresh == 0 {
        return 0;
    }
    e.storage()
        .persistent()
        .set(&DataKey::Badges(participant.clone()), &(earned | fresh));
    for badge in ALL_BADGES {
        if fresh & badge.bit() != 0 {
            events::emit_badge_earned(e, participant, badge);
        }
    }
    fresh
}
