//! Append-only reputation ledger.
//!
//! Holds the per-participant record, the score history, ban flags and the
//! global counters. `update` is the only writer of reputation and runs inside
//! the settlement call, so badges and rank always see the fully updated score.
//! Banning blocks future updates and hides the participant from leaderboard
//! reads; nothing already recorded is deleted.

use soroban_sdk::{Address, BytesN, Env, Vec};

use crate::types::{GlobalStats, ReputationRecord, ScoreHistoryEntry};
use crate::{badges, events, leaderboard, rank, DataKey, Error};

#[must_use]
pub fn get_record(e: &Env, participant: &Address) -> Option<ReputationRecord> {
    e.storage()
        .persistent()
        .get(&DataKey::Reputation(participant.clone()))
}

#[must_use]
pub fn cumulative_score(e: &Env, participant: &Address) -> u64 {
    get_record(e, participant)
        .map(|r| r.cumulative_score)
        .unwrap_or(0)
}

#[must_use]
pub fn history(e: &Env, participant: &Address) -> Vec<ScoreHistoryEntry> {
    let mut out = Vec::new(e);
    let count = get_record(e, participant).map(|r| r.event_count).unwrap_or(0);
    for i in 0..count {
        let entry: Option<ScoreHistoryEntry> = e
            .storage()
            .persistent()
            .get(&DataKey::History(participant.clone(), i));
        if let Some(entry) = entry {
            out.push_back(entry);
        }
    }
    out
}

#[must_use]
pub fn get_stats(e: &Env) -> GlobalStats {
    e.storage()
        .instance()
        .get(&DataKey::Stats)
        .unwrap_or_default()
}

pub fn set_stats(e: &Env, stats: &GlobalStats) {
    e.storage().instance().set(&DataKey::Stats, stats);
}

#[must_use]
pub fn is_banned(e: &Env, participant: &Address) -> bool {
    e.storage()
        .persistent()
        .get(&DataKey::Banned(participant.clone()))
        .unwrap_or(false)
}

/// Bans a participant. Moderator only (enforced by caller).
pub fn ban(e: &Env, participant: &Address) {
    e.storage()
        .persistent()
        .set(&DataKey::Banned(participant.clone()), &true);
    leaderboard::drop_from_top(e, participant);
    events::emit_participant_banned(e, participant);
}

/// Lifts a ban. Moderator only (enforced by caller).
pub fn unban(e: &Env, participant: &Address) {
    e.storage()
        .persistent()
        .remove(&DataKey::Banned(participant.clone()));
    if let Some(record) = get_record(e, participant) {
        leaderboard::touch_top(e, participant, record.cumulative_score);
    }
    events::emit_participant_unbanned(e, participant);
}

/// Applies one settled event to `participant` and returns the new cumulative
/// score.
///
/// # Errors
/// `BannedParticipant` if the participant is banned, `Overflow` if a counter
/// would wrap.
pub fn update(
    e: &Env,
    participant: &Address,
    score_delta: u32,
    event_hash: &BytesN<32>,
) -> Result<u64, Error> {
    if is_banned(e, participant) {
        return Err(Error::BannedParticipant);
    }
    let now = e.ledger().timestamp();
    let existing = get_record(e, participant);
    let first_event = existing.is_none();
    let mut record = existing.unwrap_or_else(ReputationRecord::empty);
    let old_rank = record.rank;

    record.cumulative_score = record
        .cumulative_score
        .checked_add(u64::from(score_delta))
        .ok_or(Error::Overflow)?;
    let history_index = record.event_count;
    record.event_count = record.event_count.checked_add(1).ok_or(Error::Overflow)?;
    record.last_updated_at = now;

    e.storage().persistent().set(
        &DataKey::History(participant.clone(), history_index),
        &ScoreHistoryEntry {
            score_delta,
            timestamp: now,
            event_hash: event_hash.clone(),
        },
    );

    let mut stats = get_stats(e);
    if first_event {
        leaderboard::append(e, participant);
        stats.participant_count = stats
            .participant_count
            .checked_add(1)
            .ok_or(Error::Overflow)?;
    }
    stats.total_score = stats
        .total_score
        .checked_add(u64::from(score_delta))
        .ok_or(Error::Overflow)?;
    set_stats(e, &stats);

    badges::award_new(
        e,
        participant,
        record.event_count,
        score_delta,
        record.cumulative_score,
    );

    record.rank = rank::rank_for_score(record.cumulative_score);
    e.storage()
        .persistent()
        .set(&DataKey::Reputation(participant.clone()), &record);
    rank::emit_rank_change_if_needed(e, participant, old_rank, record.rank);

    leaderboard::touch_top(e, participant, record.cumulative_score);

    events::emit_reputation_updated(
        e,
        participant,
        score_delta,
        record.cumulative_score,
        record.event_count,
    );
    Ok(record.cumulative_score)
}

/// Records off-chain computed leaderboard positions. Ranker only (enforced by
/// caller).
///
/// # Errors
/// `ArrayLengthMismatch` if the two vectors differ in length.
pub fn batch_update_positions(
    e: &Env,
    participants: &Vec<Address>,
    positions: &Vec<u32>,
) -> Result<(), Error> {
    if participants.len() != positions.len() {
        return Err(Error::ArrayLengthMismatch);
    }
    for (participant, position) in participants.iter().zip(positions.iter()) {
        e.storage()
            .persistent()
            .set(&DataKey::Position(participant), &position);
    }
    events::emit_ranks_batch_updated(e, participants.len());
    Ok(())
}

#[must_use]
pub fn get_position(e: &Env, participant: &Address) -> Option<u32> {
    e.storage()
        .persistent()
        .get(&DataKey::Position(participant.clone()))
}
