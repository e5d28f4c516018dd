//! Tests for attestation settlement: validation order, payout, receipts,
//! reward policies and rollback on failure.

#![cfg(test)]

use crate::reward_tiers::TOKEN_UNIT;
use crate::test_setup::*;
use crate::*;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

// ============================================================================
// HAPPY PATH
// ============================================================================

#[test]
fn test_settle_pays_reward_and_records_reputation() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 7_550);

    let new_score = settle_signed(&e, &s, &a);

    assert_eq!(new_score, 7_550);
    assert_eq!(s.token.balance(&volunteer), ORACLE_REWARD);
    assert_eq!(s.token.balance(&s.vault), RESERVE - ORACLE_REWARD);
    assert!(s.client.is_event_processed(&a.event_id));
    assert!(s.client.is_nonce_used(&a.nonce));

    let record = s.client.get_reputation(&volunteer);
    assert_eq!(record.cumulative_score, 7_550);
    assert_eq!(record.event_count, 1);
    assert_eq!(record.last_updated_at, NOW);
}

#[test]
fn test_settle_stores_receipt() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 7_550);
    settle_signed(&e, &s, &a);

    let receipt = s.client.get_settlement(&a.event_id).unwrap();
    assert_eq!(receipt.event_id, a.event_id);
    assert_eq!(receipt.nonce, a.nonce);
    assert_eq!(receipt.volunteer, volunteer);
    assert_eq!(receipt.impact_score, 7_550);
    assert_eq!(receipt.reward, ORACLE_REWARD);
    assert_eq!(receipt.settled_at, NOW);
}

#[test]
fn test_settle_updates_global_stats() {
    let e = Env::default();
    let s = setup(&e);
    let v1 = Address::generate(&e);
    let v2 = Address::generate(&e);
    settle_event(&e, &s, 1, &v1, 5_000);
    settle_event(&e, &s, 2, &v1, 6_000);
    settle_event(&e, &s, 3, &v2, 4_000);

    let stats = s.client.get_global_stats();
    assert_eq!(stats.participant_count, 2);
    assert_eq!(stats.settlement_count, 3);
    assert_eq!(stats.total_score, 15_000);
    assert_eq!(stats.total_rewards, 3 * ORACLE_REWARD);
    assert_eq!(s.client.get_participant_count(), 2);
}

#[test]
fn test_settle_emits_reward_settled_event() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    settle_event(&e, &s, 1, &volunteer, 7_550);

    assert_eq!(count_events(&e, "reward_settled"), 1);
}

#[test]
fn test_score_bounds_inclusive() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    assert_eq!(settle_event(&e, &s, 1, &volunteer, 3_000), 3_000);
    assert_eq!(settle_event(&e, &s, 2, &volunteer, 10_000), 13_000);
}

#[test]
fn test_settle_at_exact_expiry_accepted() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 5_000);
    e.ledger().set_timestamp(a.expires_at);
    assert_eq!(settle_signed(&e, &s, &a), 5_000);
}

// ============================================================================
// REJECTIONS
// ============================================================================

#[test]
fn test_expired_attestation_rejected() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 7_550);
    let sig = sign(&e, &s.client, &s.oracle_key, &a);

    e.ledger().set_timestamp(a.expires_at + 1);
    assert_eq!(s.client.try_settle(&a, &sig), Err(Ok(Error::PayloadExpired)));
    assert!(!s.client.is_event_processed(&a.event_id));
}

#[test]
fn test_expired_attestation_rejected_regardless_of_signature() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 7_550);
    let forged = sign(&e, &s.client, &secret(0x01), &a);

    e.ledger().set_timestamp(a.expires_at + 1);
    assert_eq!(s.client.try_settle(&a, &forged), Err(Ok(Error::PayloadExpired)));
    assert_eq!(
        s.client.try_settle(&a, &blank_signature(&e)),
        Err(Ok(Error::PayloadExpired))
    );
}

#[test]
fn test_score_below_minimum_rejected() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 2_999);
    let sig = sign(&e, &s.client, &s.oracle_key, &a);
    assert_eq!(s.client.try_settle(&a, &sig), Err(Ok(Error::ScoreBelowMinimum)));
}

#[test]
fn test_score_above_scale_rejected() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 10_001);
    let sig = sign(&e, &s.client, &s.oracle_key, &a);
    assert_eq!(s.client.try_settle(&a, &sig), Err(Ok(Error::InvalidImpactScore)));
}

#[test]
fn test_zero_and_negative_reward_rejected() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);

    let mut zero = attestation(&e, 1, &volunteer, 7_550);
    zero.token_reward = 0;
    let sig = sign(&e, &s.client, &s.oracle_key, &zero);
    assert_eq!(s.client.try_settle(&zero, &sig), Err(Ok(Error::ZeroAmount)));

    let mut negative = attestation(&e, 2, &volunteer, 7_550);
    negative.token_reward = -5;
    let sig = sign(&e, &s.client, &s.oracle_key, &negative);
    assert_eq!(s.client.try_settle(&negative, &sig), Err(Ok(Error::ZeroAmount)));
}

#[test]
fn test_vault_as_volunteer_or_beneficiary_rejected() {
    let e = Env::default();
    let s = setup(&e);

    let a = attestation(&e, 1, &s.vault, 7_550);
    let sig = sign(&e, &s.client, &s.oracle_key, &a);
    assert_eq!(s.client.try_settle(&a, &sig), Err(Ok(Error::InvalidAddress)));

    let volunteer = Address::generate(&e);
    let mut b = attestation(&e, 2, &volunteer, 7_550);
    b.beneficiary = s.vault.clone();
    let sig = sign(&e, &s.client, &s.oracle_key, &b);
    assert_eq!(s.client.try_settle(&b, &sig), Err(Ok(Error::InvalidAddress)));
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_settle_before_initialize_fails() {
    let e = Env::default();
    e.mock_all_auths();
    let vault = e.register(ImpactVault, ());
    let client = ImpactVaultClient::new(&e, &vault);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 7_550);
    client.settle(&a, &blank_signature(&e));
}

// ============================================================================
// ATOMICITY
// ============================================================================

#[test]
fn test_failed_payout_rolls_back_markers() {
    let e = Env::default();
    let s = setup_with_reserve(&e, ORACLE_REWARD - 1);
    let volunteer = Address::generate(&e);
    let a = attestation(&e, 1, &volunteer, 7_550);
    let sig = sign(&e, &s.client, &s.oracle_key, &a);

    assert_eq!(
        s.client.try_settle(&a, &sig),
        Err(Ok(Error::MintOrTransferFailed))
    );
    assert!(!s.client.is_event_processed(&a.event_id));
    assert!(!s.client.is_nonce_used(&a.nonce));
    assert_eq!(s.client.get_reputation(&volunteer).event_count, 0);
}

#[test]
fn test_banned_volunteer_cannot_settle() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    s.client.ban_address(&s.admin, &volunteer);

    let a = attestation(&e, 1, &volunteer, 7_550);
    let sig = sign(&e, &s.client, &s.oracle_key, &a);
    assert_eq!(
        s.client.try_settle(&a, &sig),
        Err(Ok(Error::BannedParticipant))
    );
    assert_eq!(s.token.balance(&volunteer), 0);
    assert!(!s.client.is_event_processed(&a.event_id));
}

#[test]
fn test_ban_is_scoped_to_one_participant() {
    let e = Env::default();
    let s = setup(&e);
    let banned = Address::generate(&e);
    let other = Address::generate(&e);
    s.client.ban_address(&s.admin, &banned);

    assert_eq!(settle_event(&e, &s, 1, &other, 5_000), 5_000);
}

// ============================================================================
// REWARD POLICIES
// ============================================================================

#[test]
fn test_tiered_policy_pays_tier_amount() {
    let e = Env::default();
    let s = setup(&e);
    s.client
        .set_reward_config(&s.admin, &RewardPolicy::Tiered, &3_000);
    let volunteer = Address::generate(&e);
    settle_event(&e, &s, 1, &volunteer, 7_550);
    assert_eq!(s.token.balance(&volunteer), 50 * TOKEN_UNIT);
}

#[test]
fn test_capped_policy_limits_oracle_amount() {
    let e = Env::default();
    let s = setup(&e);
    s.client
        .set_reward_config(&s.admin, &RewardPolicy::CappedByTier, &3_000);

    let generous = Address::generate(&e);
    let mut a = attestation(&e, 1, &generous, 7_550);
    a.token_reward = 500 * TOKEN_UNIT;
    settle_signed(&e, &s, &a);
    assert_eq!(s.token.balance(&generous), 50 * TOKEN_UNIT);

    let modest = Address::generate(&e);
    settle_event(&e, &s, 2, &modest, 7_550);
    assert_eq!(s.token.balance(&modest), ORACLE_REWARD);
}

#[test]
fn test_lowered_minimum_accepts_lower_scores() {
    let e = Env::default();
    let s = setup(&e);
    s.client
        .set_reward_config(&s.admin, &RewardPolicy::Direct, &1_000);
    let volunteer = Address::generate(&e);
    assert_eq!(settle_event(&e, &s, 1, &volunteer, 1_000), 1_000);
}
