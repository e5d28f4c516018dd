use soroban_sdk::{Address, Env, String, Symbol};

use crate::{Outcome, Phase};

pub fn emit_case_opened(e: &Env, event_id: &String, author: &Address, high_risk: bool, closes_at: u64) {
    e.events().publish(
        (Symbol::new(e, "case_opened"), event_id.clone()),
        (author.clone(), high_risk, closes_at),
    );
}

pub fn emit_vote_cast(e: &Env, event_id: &String, voter: &Address, approve: bool, phase: Phase) {
    e.events().publish(
        (Symbol::new(e, "vote_cast"), event_id.clone()),
        (voter.clone(), approve, phase),
    );
}

pub fn emit_phase_advanced(e: &Env, event_id: &String, from: Phase, to: Phase) {
    e.events().publish(
        (Symbol::new(e, "phase_advanced"), event_id.clone()),
        (from, to),
    );
}

pub fn emit_case_resolved(e: &Env, event_id: &String, outcome: Outcome, approve_count: u32, reject_count: u32) {
    e.events().publish(
        (Symbol::new(e, "case_resolved"), event_id.clone()),
        (outcome, approve_count, reject_count),
    );
}

pub fn emit_case_expired(e: &Env, event_id: &String, expired_at: u64) {
    e.events().publish(
        (Symbol::new(e, "case_expired"), event_id.clone()),
        expired_at,
    );
}

pub fn emit_claim_authorized(e: &Env, event_id: &String, author: &Address) {
    e.events().publish(
        (Symbol::new(e, "claim_authorized"), event_id.clone()),
        author.clone(),
    );
}
