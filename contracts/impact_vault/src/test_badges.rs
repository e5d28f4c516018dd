//! Tests for soulbound badges: trigger predicates, idempotent awards and
//! badge events.

#![cfg(test)]

use crate::badges::{self, triggered_mask};
use crate::test_setup::*;
use crate::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, Env};

#[test]
fn test_event_count_predicates() {
    assert!(Badge::FirstStep.is_triggered(1, 3_000, 3_000));
    assert!(!Badge::Helper.is_triggered(4, 3_000, 12_000));
    assert!(Badge::Helper.is_triggered(5, 3_000, 15_000));
    assert!(!Badge::Devoted.is_triggered(9, 3_000, 27_000));
    assert!(Badge::Devoted.is_triggered(10, 3_000, 30_000));
    assert!(Badge::Legend.is_triggered(100, 3_000, 300_000));
}

#[test]
fn test_twenty_fifth_event_holds_helper_and_champion() {
    let mask = triggered_mask(25, 3_000, 75_000);
    assert_ne!(mask & Badge::Helper.bit(), 0);
    assert_ne!(mask & Badge::Devoted.bit(), 0);
    assert_ne!(mask & Badge::Champion.bit(), 0);
    assert_eq!(mask & Badge::Legend.bit(), 0);
}

#[test]
fn test_score_predicates() {
    assert!(!Badge::HighImpact.is_triggered(1, 8_999, 8_999));
    assert!(Badge::HighImpact.is_triggered(1, 9_000, 9_000));
    assert!(!Badge::PerfectScore.is_triggered(1, 9_999, 9_999));
    assert!(Badge::PerfectScore.is_triggered(1, 10_000, 10_000));
    assert!(!Badge::Centurion.is_triggered(2, 3_000, 9_999));
    assert!(Badge::Centurion.is_triggered(2, 3_000, 10_000));
    assert!(Badge::Titan.is_triggered(20, 5_000, 100_000));
}

#[test]
fn test_award_is_idempotent() {
    let e = Env::default();
    let s = setup(&e);
    let participant = Address::generate(&e);

    e.as_contract(&s.vault, || {
        let first = badges::award_new(&e, &participant, 1, 9_500, 9_500);
        assert_eq!(first, Badge::FirstStep.bit() | Badge::HighImpact.bit());
        assert_eq!(badges::award_new(&e, &participant, 1, 9_500, 9_500), 0);

        let next = badges::award_new(&e, &participant, 2, 3_000, 12_500);
        assert_eq!(next, Badge::Centurion.bit());
        assert!(badges::has_badge(&e, &participant, Badge::HighImpact));
    });
}

#[test]
fn test_first_settlement_earns_first_step() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    settle_event(&e, &s, 1, &volunteer, 5_000);
    assert_eq!(count_events(&e, "badge_earned"), 1);

    assert_eq!(s.client.get_badges(&volunteer), vec![&e, Badge::FirstStep]);
}

#[test]
fn test_earned_badge_not_awarded_again() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    settle_event(&e, &s, 1, &volunteer, 5_000);
    settle_event(&e, &s, 2, &volunteer, 3_000);
    assert_eq!(count_events(&e, "badge_earned"), 0);

    assert_eq!(s.client.get_badges(&volunteer), vec![&e, Badge::FirstStep]);
}

#[test]
fn test_badges_accumulate_across_settlements() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    for n in 1..=5 {
        settle_event(&e, &s, n, &volunteer, 3_000);
    }
    assert!(s.client.has_badge(&volunteer, &Badge::FirstStep));
    assert!(s.client.has_badge(&volunteer, &Badge::Helper));
    assert!(s.client.has_badge(&volunteer, &Badge::Centurion));
    assert!(!s.client.has_badge(&volunteer, &Badge::Devoted));
    assert!(!s.client.has_badge(&volunteer, &Badge::HighImpact));
}

#[test]
fn test_perfect_score_earns_both_score_badges() {
    let e = Env::default();
    let s = setup(&e);
    let volunteer = Address::generate(&e);
    settle_event(&e, &s, 1, &volunteer, 10_000);
    assert_eq!(count_events(&e, "badge_earned"), 4);

    assert_eq!(
        s.client.get_badges(&volunteer),
        vec![
            &e,
            Badge::FirstStep,
            Badge::HighImpact,
            Badge::PerfectScore,
            Badge::Centurion
        ]
    );
}

#[test]
fn test_unknown_participant_has_no_badges() {
    let e = Env::default();
    let s = setup(&e);
    let nobody = Address::generate(&e);
    assert!(s.client.get_badges(&nobody).is_empty());
    assert!(!s.client.has_badge(&nobody, &Badge::FirstStep));
}
