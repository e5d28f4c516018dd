//! Phase schedule of a case.
//!
//! Regular cases: `ChampionOnly` over `[created_at, phase2_opens_at)`, then
//! `Open` through `closes_at` inclusive. High-risk cases stay in
//! `ChampionAudit` for the whole window. Every case is `Closed` once resolved
//! or after `closes_at`.

use crate::{DisputeCase, Outcome, Phase};

#[must_use]
pub fn phase_at(case: &DisputeCase, now: u64) -> Phase {
    if case.outcome != Outcome::Pending || now > case.closes_at {
        return Phase::Closed;
    }
    if case.high_risk {
        Phase::ChampionAudit
    } else if now < case.phase2_opens_at {
        Phase::ChampionOnly
    } else {
        Phase::Open
    }
}

/// Whether only champions may vote in `phase`.
#[must_use]
pub fn champions_only(phase: Phase) -> bool {
    matches!(phase, Phase::ChampionOnly | Phase::ChampionAudit)
}
