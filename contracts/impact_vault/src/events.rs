//! Contract events. One helper per event; topics lead with the event name.

use soroban_sdk::{contracttype, Address, BytesN, Env, String, Symbol};

use crate::access_control::Role;
use crate::reward_tiers::RewardPolicy;
use crate::types::{Attestation, Badge, Rank};

/// Payload of `reward_settled`: every attestation field, the amount paid and
/// the volunteer's new cumulative score.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSettled {
    pub volunteer: Address,
    pub beneficiary: Address,
    pub impact_score: u32,
    pub token_reward: i128,
    pub reward_paid: i128,
    pub zk_proof_hash: BytesN<32>,
    pub event_hash: BytesN<32>,
    pub nonce: String,
    pub expires_at: u64,
    pub new_cumulative_score: u64,
}

pub fn emit_initialized(e: &Env, admin: &Address, oracle: &BytesN<20>) {
    e.events().publish(
        (Symbol::new(e, "initialized"),),
        (admin.clone(), oracle.clone()),
    );
}

pub fn emit_reward_settled(e: &Env, a: &Attestation, reward_paid: i128, new_cumulative_score: u64) {
    e.events().publish(
        (Symbol::new(e, "reward_settled"), a.event_id.clone()),
        RewardSettled {
            volunteer: a.volunteer.clone(),
            beneficiary: a.beneficiary.clone(),
            impact_score: a.impact_score,
            token_reward: a.token_reward,
            reward_paid,
            zk_proof_hash: a.zk_proof_hash.clone(),
            event_hash: a.event_hash.clone(),
            nonce: a.nonce.clone(),
            expires_at: a.expires_at,
            new_cumulative_score,
        },
    );
}

pub fn emit_reputation_updated(
    e: &Env,
    participant: &Address,
    score_delta: u32,
    cumulative_score: u64,
    event_count: u32,
) {
    e.events().publish(
        (Symbol::new(e, "reputation_updated"), participant.clone()),
        (score_delta, cumulative_score, event_count),
    );
}

pub fn emit_badge_earned(e: &Env, participant: &Address, badge: Badge) {
    e.events().publish(
        (Symbol::new(e, "badge_earned"), participant.clone()),
        badge,
    );
}

pub fn emit_rank_changed(e: &Env, participant: &Address, old_rank: Rank, new_rank: Rank) {
    e.events().publish(
        (Symbol::new(e, "rank_changed"), participant.clone()),
        (old_rank, new_rank),
    );
}

pub fn emit_ranks_batch_updated(e: &Env, count: u32) {
    e.events()
        .publish((Symbol::new(e, "ranks_batch_updated"),), count);
}

pub fn emit_participant_banned(e: &Env, participant: &Address) {
    e.events()
        .publish((Symbol::new(e, "participant_banned"),), participant.clone());
}

pub fn emit_participant_unbanned(e: &Env, participant: &Address) {
    e.events()
        .publish((Symbol::new(e, "participant_unbanned"),), participant.clone());
}

pub fn emit_role_granted(e: &Env, account: &Address, role: Role, caller: &Address) {
    e.events().publish(
        (Symbol::new(e, "role_granted"), account.clone()),
        (role, caller.clone()),
    );
}

pub fn emit_role_revoked(e: &Env, account: &Address, role: Role, caller: &Address) {
    e.events().publish(
        (Symbol::new(e, "role_revoked"), account.clone()),
        (role, caller.clone()),
    );
}

pub fn emit_oracle_updated(e: &Env, oracle: &BytesN<20>) {
    e.events()
        .publish((Symbol::new(e, "oracle_updated"),), oracle.clone());
}

pub fn emit_reward_config_updated(e: &Env, policy: RewardPolicy, min_impact_score: u32) {
    e.events().publish(
        (Symbol::new(e, "reward_config_updated"),),
        (policy, min_impact_score),
    );
}
