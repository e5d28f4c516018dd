//! Reputation records, ranks and badges.

use soroban_sdk::{contracttype, Address, BytesN};

/// Per-participant reputation. `cumulative_score` never decreases.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReputationRecord {
    pub cumulative_score: u64,
    pub event_count: u32,
    pub last_updated_at: u64,
    pub rank: Rank,
}

impl ReputationRecord {
    #[must_use]
    pub fn empty() -> Self {
        ReputationRecord {
            cumulative_score: 0,
            event_count: 0,
            last_updated_at: 0,
            rank: Rank::Citizen,
        }
    }
}

/// One immutable entry per settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoreHistoryEntry {
    pub score_delta: u32,
    pub timestamp: u64,
    pub event_hash: BytesN<32>,
}

/// Leaderboard row. `score` and `rank` are read from the live record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderboardEntry {
    pub participant: Address,
    pub score: u64,
    pub rank: Rank,
}

/// Network-wide counters.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlobalStats {
    pub participant_count: u32,
    pub settlement_count: u64,
    pub total_score: u64,
    pub total_rewards: i128,
}

/// Reputation rank derived from cumulative score (fixed point ×100).
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Rank {
    Citizen = 0,
    Guardian = 1,
    Champion = 2,
    Sovereign = 3,
    Apex = 4,
}

/// Soulbound achievement. The discriminant is the bit position in the
/// participant's badge mask.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Badge {
    FirstStep = 0,
    Helper = 1,
    Devoted = 2,
    Champion = 3,
    Legend = 4,
    HighImpact = 5,
    PerfectScore = 6,
    Centurion = 7,
    Titan = 8,
}
