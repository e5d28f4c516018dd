//! Leaderboard storage.
//!
//! Participants are appended once, on their first settlement, to an
//! insertion-ordered list stored one slot per index. Scores are never copied
//! into the list; pages read the live reputation record. A bounded top index
//! sorted by score is maintained incrementally on every reputation update.
//!
//! Banning drops a participant from the top index without backfilling the
//! freed slot, since finding the next-best participant means scanning the
//! whole list. [`refresh_top`] re-offers a slice of the list to the index so
//! a ranker can restore it page by page.

use soroban_sdk::{Address, Env, Vec};

use crate::rank::rank_for_score;
use crate::reputation;
use crate::types::LeaderboardEntry;
use crate::DataKey;

/// Capacity of the score-sorted top index.
pub const TOP_INDEX_SIZE: u32 = 50;

#[must_use]
pub fn len(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::LeaderboardLen)
        .unwrap_or(0)
}

/// Appends a participant. Caller guarantees it is their first settlement.
pub fn append(e: &Env, participant: &Address) {
    let index = len(e);
    e.storage()
        .persistent()
        .set(&DataKey::LeaderboardAt(index), participant);
    e.storage()
        .instance()
        .set(&DataKey::LeaderboardLen, &(index + 1));
}

fn entry(e: &Env, participant: Address) -> LeaderboardEntry {
    let score = reputation::cumulative_score(e, &participant);
    LeaderboardEntry {
        participant,
        score,
        rank: rank_for_score(score),
    }
}

/// Slice `[offset, min(offset + limit, len))` of the insertion-ordered list.
/// Banned participants are skipped, so a page may hold fewer than `limit`
/// entries.
#[must_use]
pub fn page(e: &Env, offset: u32, limit: u32) -> Vec<LeaderboardEntry> {
    let mut out = Vec::new(e);
    let total = len(e);
    if offset >= total {
        return out;
    }
    let end = core::cmp::min(offset.saturating_add(limit), total);
    for i in offset..end {
        let participant: Option<Address> = e.storage().persistent().get(&DataKey::LeaderboardAt(i));
        if let Some(participant) = participant {
            if !reputation::is_banned(e, &participant) {
                out.push_back(entry(e, participant));
            }
        }
    }
    out
}

fn top_index(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get(&DataKey::TopIndex)
        .unwrap_or(Vec::new(e))
}

fn remove_from(top: &mut Vec<Address>, participant: &Address) {
    for i in 0..top.len() {
        if top.get_unchecked(i) == *participant {
            top.remove(i);
            return;
        }
    }
}

/// Repositions `participant` in the top index after their score became
/// `score`. Ties keep the earlier holder ahead.
pub fn touch_top(e: &Env, participant: &Address, score: u64) {
    let mut top = top_index(e);
    remove_from(&mut top, participant);
    let mut at = top.len();
    for i in 0..top.len() {
        if reputation::cumulative_score(e, &top.get_unchecked(i)) < score {
            at = i;
            break;
        }
    }
    if at >= TOP_INDEX_SIZE {
        e.storage().instance().set(&DataKey::TopIndex, &top);
        return;
    }
    top.insert(at, participant.clone());
    while top.len() > TOP_INDEX_SIZE {
        top.pop_back();
    }
    e.storage().instance().set(&DataKey::TopIndex, &top);
}

/// Drops a participant from the top index (used on ban).
pub fn drop_from_top(e: &Env, participant: &Address) {
    let mut top = top_index(e);
    remove_from(&mut top, participant);
    e.storage().instance().set(&DataKey::TopIndex, &top);
}

/// Re-offers participants `[offset, min(offset + limit, len))` to the top
/// index, skipping banned ones. Returns how many were considered.
pub fn refresh_top(e: &Env, offset: u32, limit: u32) -> u32 {
    let total = len(e);
    if offset >= total {
        return 0;
    }
    let end = core::cmp::min(offset.saturating_add(limit), total);
    for i in offset..end {
        let participant: Option<Address> = e.storage().persistent().get(&DataKey::LeaderboardAt(i));
        if let Some(participant) = participant {
            if !reputation::is_banned(e, &participant) {
                let score = reputation::cumulative_score(e, &participant);
                touch_top(e, &participant, score);
            }
        }
    }
    end - offset
}

/// Highest-scoring participants, best first, at most `limit`.
#[must_use]
pub fn top(e: &Env, limit: u32) -> Vec<LeaderboardEntry> {
    let mut out = Vec::new(e);
    for participant in top_index(e).iter() {
        if out.len() >= limit {
            break;
        }
        if !reputation::is_banned(e, &participant) {
            out.push_back(entry(e, participant));
        }
    }
    out
}
