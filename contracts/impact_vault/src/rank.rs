//! Rank System
//!
//! Assigns ranks (Citizen, Guardian, Champion, Sovereign, Apex) from the
//! cumulative score. Thresholds use the same ×100 fixed point as scores.
//! Citizen: [0, GUARDIAN), Guardian: [GUARDIAN, CHAMPION), Champion:
//! [CHAMPION, SOVEREIGN), Sovereign: [SOVEREIGN, APEX), Apex: [APEX, ..)

use soroban_sdk::{Address, Env};

use crate::events;
use crate::types::Rank;

pub const RANK_GUARDIAN_MIN: u64 = 10_000; // 100.00
pub const RANK_CHAMPION_MIN: u64 = 50_000; // 500.00
pub const RANK_SOVEREIGN_MIN: u64 = 200_000; // 2000.00
pub const RANK_APEX_MIN: u64 = 1_000_000; // 10000.00

/// Returns the rank for a cumulative score.
#[must_use]
pub fn rank_for_score(score: u64) -> Rank {
    if score >= RANK_APEX_MIN {
        Rank::Apex
    } else if score >= RANK_SOVEREIGN_MIN {
        Rank::Sovereign
    } else if score >= RANK_CHAMPION_MIN {
        Rank::Champion
    } else if score >= RANK_GUARDIAN_MIN {
        Rank::Guardian
    } else {
        Rank::Citizen
    }
}

/// Emits a rank change event if the rank changed.
pub fn emit_rank_change_if_needed(e: &Env, participant: &Address, old_rank: Rank, new_rank: Rank) {
    if old_rank != new_rank {
        events::emit_rank_changed(e, participant, old_rank, new_rank);
    }
}
