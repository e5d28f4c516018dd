//! Protocol data types for settlement and reputation.
//!
//! Includes the oracle Attestation, its detached signature, the settlement
//! receipt, and the per-participant reputation records.

pub mod attestation;
pub mod reputation;

pub use attestation::{Attestation, OracleSignature, SettlementReceipt, MAX_IMPACT_SCORE};
pub use reputation::{
    Badge, GlobalStats, LeaderboardEntry, Rank, ReputationRecord, ScoreHistoryEntry,
};
