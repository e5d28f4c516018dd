//! Read-only view of voter reputation, served by the impact vault.
//!
//! Participants banned in the vault may not vote in any phase.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "ReputationSourceClient")]
pub trait ReputationSource {
    /// Cumulative reputation score, fixed point ×100.
    fn get_cumulative_score(env: Env, participant: Address) -> u64;

    fn is_banned(env: Env, participant: Address) -> bool;
}

/// Current cumulative score of `voter` according to `source`.
pub fn score_of(env: &Env, source: &Address, voter: &Address) -> u64 {
    ReputationSourceClient::new(env, source).get_cumulative_score(voter)
}

pub fn is_banned(env: &Env, source: &Address, voter: &Address) -> bool {
    ReputationSourceClient::new(env, source).is_banned(voter)
}
