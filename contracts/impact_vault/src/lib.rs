#![no_std]

//! # Impact Vault Contract
//!
//! Settles oracle-signed impact attestations exactly once, pays the
//! volunteer's reward from the vault's reserve and records soulbound
//! reputation: cumulative score, score history, badges, rank and the
//! leaderboard.

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, BytesN, Env, String, Vec};

pub mod access_control;
pub mod badges;
pub mod codec;
pub mod config;
pub mod events;
pub mod leaderboard;
pub mod rank;
pub mod replay;
pub mod reputation;
pub mod reward_tiers;
pub mod settlement;
pub mod types;
pub mod verifier;

pub use access_control::Role;
pub use config::VaultConfig;
pub use reward_tiers::{RewardPolicy, RewardTier};
pub use types::{
    Attestation, Badge, GlobalStats, LeaderboardEntry, OracleSignature, Rank, ReputationRecord,
    ScoreHistoryEntry, SettlementReceipt,
};

use verifier::Secp256k1Verifier;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Config,
    RewardTiers,
    Role(Address, Role),
    ProcessedEvent(String),
    ProcessedNonce(String),
    Receipt(String),
    Reputation(Address),
    History(Address, u32),
    Badges(Address),
    Banned(Address),
    Position(Address),
    LeaderboardLen,
    LeaderboardAt(u32),
    TopIndex,
    Stats,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidSignature = 4,
    EventAlreadyProcessed = 5,
    NonceAlreadyUsed = 6,
    PayloadExpired = 7,
    ScoreBelowMinimum = 8,
    InvalidImpactScore = 9,
    InvalidAddress = 10,
    ZeroAmount = 11,
    MintOrTransferFailed = 12,
    BannedParticipant = 13,
    ArrayLengthMismatch = 14,
    InvalidTierTable = 15,
    InvalidConfig = 16,
    Overflow = 17,
}

#[contract]
pub struct ImpactVault;

#[contractimpl]
impl ImpactVault {
    // ── Initialization ──────────────────────────────────────────────

    /// One-time setup. `admin` receives every role; `oracle` is the
    /// 20-byte address of the oracle signing key; rewards are paid in
    /// `reward_token`.
    pub fn initialize(
        e: Env,
        admin: Address,
        oracle: BytesN<20>,
        reward_token: Address,
    ) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        e.storage().instance().set(&DataKey::Admin, &admin);
        config::set(
            &e,
            &VaultConfig {
                oracle: oracle.clone(),
                reward_token,
                min_impact_score: config::DEFAULT_MIN_IMPACT_SCORE,
                reward_policy: RewardPolicy::Direct,
            },
        );
        for role in [Role::Admin, Role::Moderator, Role::Ranker] {
            access_control::grant(&e, &admin, &admin, role);
        }
        events::emit_initialized(&e, &admin, &oracle);
        Ok(())
    }

    // ── Settlement ──────────────────────────────────────────────────

    /// Settles an oracle attestation: verifies it, pays the reward and
    /// updates the volunteer's reputation. Returns the new cumulative score.
    pub fn settle(e: Env, attestation: Attestation, signature: OracleSignature) -> Result<u64, Error> {
        settlement::settle(&e, &Secp256k1Verifier, &attestation, &signature)
    }

    /// Digest the oracle must sign for `attestation`.
    pub fn attestation_digest(e: Env, attestation: Attestation) -> BytesN<32> {
        codec::signing_digest(&e, &attestation).to_bytes()
    }

    pub fn is_event_processed(e: Env, event_id: String) -> bool {
        replay::is_event_processed(&e, &event_id)
    }

    pub fn is_nonce_used(e: Env, nonce: String) -> bool {
        replay::is_nonce_used(&e, &nonce)
    }

    pub fn get_settlement(e: Env, event_id: String) -> Option<SettlementReceipt> {
        settlement::get_receipt(&e, &event_id)
    }

    /// Reward `settle` would pay right now for this score and oracle amount.
    pub fn preview_reward(e: Env, impact_score: u32, token_reward: i128) -> Result<i128, Error> {
        let cfg = config::get(&e)?;
        reward_tiers::resolve_reward(&e, cfg.reward_policy, impact_score, token_reward)
    }

    // ── Reputation reads ────────────────────────────────────────────

    /// Reputation record; an all-zero Citizen record for unknown participants.
    pub fn get_reputation(e: Env, participant: Address) -> ReputationRecord {
        reputation::get_record(&e, &participant).unwrap_or_else(ReputationRecord::empty)
    }

    pub fn get_cumulative_score(e: Env, participant: Address) -> u64 {
        reputation::cumulative_score(&e, &participant)
    }

    pub fn get_score_history(e: Env, participant: Address) -> Vec<ScoreHistoryEntry> {
        reputation::history(&e, &participant)
    }

    pub fn get_badges(e: Env, participant: Address) -> Vec<Badge> {
        badges::list(&e, &participant)
    }

    pub fn has_badge(e: Env, participant: Address, badge: Badge) -> bool {
        badges::has_badge(&e, &participant, badge)
    }

    pub fn get_rank(e: Env, participant: Address) -> Rank {
        rank::rank_for_score(reputation::cumulative_score(&e, &participant))
    }

    pub fn get_leaderboard_page(e: Env, offset: u32, limit: u32) -> Vec<LeaderboardEntry> {
        leaderboard::page(&e, offset, limit)
    }

    pub fn get_leaderboard_len(e: Env) -> u32 {
        leaderboard::len(&e)
    }

    pub fn get_top_participants(e: Env, limit: u32) -> Vec<LeaderboardEntry> {
        leaderboard::top(&e, limit)
    }

    pub fn get_position(e: Env, participant: Address) -> Option<u32> {
        reputation::get_position(&e, &participant)
    }

    pub fn get_global_stats(e: Env) -> GlobalStats {
        reputation::get_stats(&e)
    }

    pub fn get_participant_count(e: Env) -> u32 {
        reputation::get_stats(&e).participant_count
    }

    pub fn is_banned(e: Env, participant: Address) -> bool {
        reputation::is_banned(&e, &participant)
    }

    // ── Moderation ──────────────────────────────────────────────────

    pub fn ban_address(e: Env, caller: Address, participant: Address) -> Result<(), Error> {
        access_control::require_role(&e, &caller, Role::Moderator)?;
        reputation::ban(&e, &participant);
        Ok(())
    }

    pub fn unban_address(e: Env, caller: Address, participant: Address) -> Result<(), Error> {
        access_control::require_role(&e, &caller, Role::Moderator)?;
        reputation::unban(&e, &participant);
        Ok(())
    }

    /// Publishes leaderboard positions computed off-chain.
    pub fn batch_update_positions(
        e: Env,
        caller: Address,
        participants: Vec<Address>,
        positions: Vec<u32>,
    ) -> Result<(), Error> {
        access_control::require_role(&e, &caller, Role::Ranker)?;
        reputation::batch_update_positions(&e, &participants, &positions)
    }

    /// Backfills the top index from a slice of the leaderboard. Returns the
    /// number of participants considered.
    pub fn refresh_top_participants(
        e: Env,
        caller: Address,
        offset: u32,
        limit: u32,
    ) -> Result<u32, Error> {
        access_control::require_role(&e, &caller, Role::Ranker)?;
        Ok(leaderboard::refresh_top(&e, offset, limit))
    }

    // ── Administration ──────────────────────────────────────────────

    pub fn grant_role(e: Env, caller: Address, account: Address, role: Role) -> Result<(), Error> {
        access_control::require_role(&e, &caller, Role::Admin)?;
        access_control::grant(&e, &caller, &account, role);
        Ok(())
    }

    pub fn revoke_role(e: Env, caller: Address, account: Address, role: Role) -> Result<(), Error> {
        access_control::require_role(&e, &caller, Role::Admin)?;
        access_control::revoke(&e, &caller, &account, role);
        Ok(())
    }

    pub fn has_role(e: Env, account: Address, role: Role) -> bool {
        access_control::has_role(&e, &account, role)
    }

    /// Rotates the oracle signing key.
    pub fn set_oracle(e: Env, caller: Address, oracle: BytesN<20>) -> Result<(), Error> {
        access_control::require_role(&e, &caller, Role::Admin)?;
        let mut cfg = config::get(&e)?;
        cfg.oracle = oracle.clone();
        config::set(&e, &cfg);
        events::emit_oracle_updated(&e, &oracle);
        Ok(())
    }

    pub fn set_reward_config(
        e: Env,
        caller: Address,
        policy: RewardPolicy,
        min_impact_score: u32,
    ) -> Result<(), Error> {
        access_control::require_role(&e, &caller, Role::Admin)?;
        if min_impact_score > types::MAX_IMPACT_SCORE {
            return Err(Error::InvalidConfig);
        }
        let mut cfg = config::get(&e)?;
        cfg.reward_policy = policy;
        cfg.min_impact_score = min_impact_score;
        config::set(&e, &cfg);
        events::emit_reward_config_updated(&e, policy, min_impact_score);
        Ok(())
    }

    pub fn set_reward_tiers(e: Env, caller: Address, tiers: Vec<RewardTier>) -> Result<(), Error> {
        access_control::require_role(&e, &caller, Role::Admin)?;
        reward_tiers::set_tiers(&e, &tiers)?;
        let cfg = config::get(&e)?;
        events::emit_reward_config_updated(&e, cfg.reward_policy, cfg.min_impact_score);
        Ok(())
    }

    pub fn get_reward_tiers(e: Env) -> Vec<RewardTier> {
        reward_tiers::get_tiers(&e)
    }

    pub fn get_config(e: Env) -> Result<VaultConfig, Error> {
        config::get(&e)
    }

    pub fn get_admin(e: Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }
}

#[cfg(test)]
mod test_badges;
#[cfg(test)]
mod test_reward_tiers;
#[cfg(test)]
mod test_settlement;
