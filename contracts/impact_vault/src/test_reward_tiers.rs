//! Tests for the reward tier table and reward policies.

#![cfg(test)]

use crate::reward_tiers::{default_tiers, tier_reward, validate_tiers, TOKEN_UNIT};
use crate::test_setup::*;
use crate::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, Env, Vec};

fn tier(min_score: u32, whole: i128) -> RewardTier {
    RewardTier {
        min_score,
        amount: whole * TOKEN_UNIT,
    }
}

#[test]
fn test_default_table_lookup() {
    let e = Env::default();
    let tiers = default_tiers(&e);
    assert_eq!(tier_reward(&tiers, 7_550), 50 * TOKEN_UNIT);
    assert_eq!(tier_reward(&tiers, 9_999), 100 * TOKEN_UNIT);
    assert_eq!(tier_reward(&tiers, 10_000), 100 * TOKEN_UNIT);
    assert_eq!(tier_reward(&tiers, 0), TOKEN_UNIT);
}

#[test]
fn test_thresholds_are_inclusive() {
    let e = Env::default();
    let tiers = default_tiers(&e);
    assert_eq!(tier_reward(&tiers, 9_000), 100 * TOKEN_UNIT);
    assert_eq!(tier_reward(&tiers, 8_999), 50 * TOKEN_UNIT);
    assert_eq!(tier_reward(&tiers, 5_000), 20 * TOKEN_UNIT);
    assert_eq!(tier_reward(&tiers, 2_500), 5 * TOKEN_UNIT);
    assert_eq!(tier_reward(&tiers, 2_499), TOKEN_UNIT);
}

#[test]
fn test_validate_rejects_bad_tables() {
    let e = Env::default();
    let empty: Vec<RewardTier> = Vec::new(&e);
    assert_eq!(validate_tiers(&empty), Err(Error::InvalidTierTable));

    let ascending = vec![&e, tier(0, 1), tier(5_000, 20)];
    assert_eq!(validate_tiers(&ascending), Err(Error::InvalidTierTable));

    let duplicate = vec![&e, tier(5_000, 20), tier(5_000, 10), tier(0, 1)];
    assert_eq!(validate_tiers(&duplicate), Err(Error::InvalidTierTable));

    let no_floor = vec![&e, tier(9_000, 100), tier(5_000, 20)];
    assert_eq!(validate_tiers(&no_floor), Err(Error::InvalidTierTable));

    let off_scale = vec![&e, tier(10_001, 100), tier(0, 1)];
    assert_eq!(validate_tiers(&off_scale), Err(Error::InvalidTierTable));

    let free = vec![&e, tier(5_000, 20), tier(0, 0)];
    assert_eq!(validate_tiers(&free), Err(Error::InvalidTierTable));

    assert_eq!(validate_tiers(&default_tiers(&e)), Ok(()));
}

#[test]
fn test_admin_replaces_table() {
    let e = Env::default();
    let s = setup(&e);
    let table = vec![&e, tier(8_000, 40), tier(0, 2)];
    s.client.set_reward_tiers(&s.admin, &table);
    assert_eq!(s.client.get_reward_tiers(), table);

    s.client
        .set_reward_config(&s.admin, &RewardPolicy::Tiered, &3_000);
    assert_eq!(s.client.preview_reward(&7_550, &ORACLE_REWARD), 2 * TOKEN_UNIT);
    assert_eq!(s.client.preview_reward(&8_000, &ORACLE_REWARD), 40 * TOKEN_UNIT);
}

#[test]
fn test_invalid_table_not_stored() {
    let e = Env::default();
    let s = setup(&e);
    let bad = vec![&e, tier(5_000, 20)];
    assert_eq!(
        s.client.try_set_reward_tiers(&s.admin, &bad),
        Err(Ok(Error::InvalidTierTable))
    );
    assert_eq!(s.client.get_reward_tiers(), default_tiers(&e));
}

#[test]
fn test_non_admin_cannot_set_tiers() {
    let e = Env::default();
    let s = setup(&e);
    let stranger = Address::generate(&e);
    assert_eq!(
        s.client.try_set_reward_tiers(&stranger, &default_tiers(&e)),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn test_preview_per_policy() {
    let e = Env::default();
    let s = setup(&e);

    assert_eq!(s.client.preview_reward(&7_550, &ORACLE_REWARD), ORACLE_REWARD);

    s.client
        .set_reward_config(&s.admin, &RewardPolicy::Tiered, &3_000);
    assert_eq!(s.client.preview_reward(&7_550, &ORACLE_REWARD), 50 * TOKEN_UNIT);

    s.client
        .set_reward_config(&s.admin, &RewardPolicy::CappedByTier, &3_000);
    assert_eq!(
        s.client.preview_reward(&7_550, &(200 * TOKEN_UNIT)),
        50 * TOKEN_UNIT
    );
    assert_eq!(s.client.preview_reward(&7_550, &ORACLE_REWARD), ORACLE_REWARD);
}

#[test]
fn test_preview_rejects_zero_direct_reward() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.client.try_preview_reward(&7_550, &0),
        Err(Ok(Error::ZeroAmount))
    );
}
