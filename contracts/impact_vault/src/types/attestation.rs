//! Attestation data structure.
//!
//! An attestation is the oracle's signed claim that a beneficial action took
//! place and scored `impact_score`. It is consumed at most once, keyed by both
//! `event_id` and `nonce`.

use soroban_sdk::{contracttype, Address, BytesN, String};

/// Upper bound of the impact score scale (100.00 with two implied decimals).
pub const MAX_IMPACT_SCORE: u32 = 10_000;

/// Oracle attestation for one verified impact event.
///
/// # Fields
/// * `event_id` - Oracle-assigned event identifier.
/// * `volunteer` - Participant who performed the action and receives the reward.
/// * `beneficiary` - Recipient of the action.
/// * `impact_score` - Score in fixed point ×100, `0..=10_000`.
/// * `token_reward` - Oracle-computed reward in the reward token's smallest unit.
/// * `zk_proof_hash` - Commitment to the beneficiary's zero-knowledge proof.
/// * `event_hash` - Hash of the canonical evidence bundle.
/// * `nonce` - Unique per attestation; re-issued claims carry a fresh one.
/// * `expires_at` - Ledger timestamp after which the attestation is void.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attestation {
    pub event_id: String,
    pub volunteer: Address,
    pub beneficiary: Address,
    pub impact_score: u32,
    pub token_reward: i128,
    pub zk_proof_hash: BytesN<32>,
    pub event_hash: BytesN<32>,
    pub nonce: String,
    pub expires_at: u64,
}

/// Recoverable secp256k1 signature: compact `r || s` and the recovery id.
/// Recovery ids 27/28 (Ethereum `v`) are accepted alongside 0/1.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleSignature {
    pub signature: BytesN<64>,
    pub recovery_id: u32,
}

/// Stored once per settled event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementReceipt {
    pub event_id: String,
    pub nonce: String,
    pub volunteer: Address,
    pub impact_score: u32,
    pub reward: i128,
    pub settled_at: u64,
}
