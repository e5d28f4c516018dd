#![no_std]

//! # Community Review Contract
//!
//! Quorum voting on submissions the oracle flagged instead of approving.
//! A case opens in a champion-only phase and then admits every participant;
//! high-risk cases stay champion-only for their whole window. The first vote
//! that reaches quorum fixes the outcome. An approved case lets its author
//! request one claim, which the oracle answers with a fresh attestation
//! settled by the impact vault.

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, log, Address, Env, String, Vec};

pub mod events;
pub mod phase;
pub mod reputation_source;

pub const DEFAULT_QUORUM: u32 = 3;
/// 500.00 cumulative points.
pub const DEFAULT_CHAMPION_THRESHOLD: u64 = 50_000;
pub const DEFAULT_PHASE1_DURATION: u64 = 24 * 60 * 60;
pub const DEFAULT_PHASE2_DURATION: u64 = 48 * 60 * 60;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Config,
    Case(String),
    Vote(String, Address),
    CaseCount,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Phase {
    ChampionOnly,
    Open,
    ChampionAudit,
    Closed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Outcome {
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReviewConfig {
    /// Account allowed to open cases.
    pub oracle: Address,
    /// Contract answering `get_cumulative_score`.
    pub reputation_source: Address,
    pub quorum: u32,
    pub champion_threshold: u64,
    pub phase1_duration: u64,
    pub phase2_duration: u64,
}

/// One flagged submission. `phase` is the phase last observed by a write;
/// reads report the phase at the current ledger time.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DisputeCase {
    pub event_id: String,
    pub author: Address,
    pub high_risk: bool,
    pub phase: Phase,
    pub quorum: u32,
    pub approve_count: u32,
    pub reject_count: u32,
    pub voters: Vec<Address>,
    pub outcome: Outcome,
    pub created_at: u64,
    pub phase2_opens_at: u64,
    pub closes_at: u64,
    pub resolved_at: u64,
    pub expired: bool,
    pub claimed: bool,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    CaseNotFound = 4,
    CaseExists = 5,
    CaseResolved = 6,
    AlreadyVoted = 7,
    VotingWindowClosed = 8,
    NotEligible = 9,
    AuthorCannotVote = 10,
    CaseNotApproved = 11,
    DuplicateClaim = 12,
    WindowStillOpen = 13,
    InvalidConfig = 14,
}

fn load_config(env: &Env) -> Result<ReviewConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

fn validate_config(cfg: &ReviewConfig) -> Result<(), Error> {
    if cfg.quorum == 0 || cfg.phase1_duration == 0 || cfg.phase2_duration == 0 {
        return Err(Error::InvalidConfig);
    }
    Ok(())
}

fn load_case(env: &Env, event_id: &String) -> Result<DisputeCase, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Case(event_id.clone()))
        .ok_or(Error::CaseNotFound)
}

fn store_case(env: &Env, case: &DisputeCase) {
    env.storage()
        .persistent()
        .set(&DataKey::Case(case.event_id.clone()), case);
}

fn finalize(env: &Env, case: &mut DisputeCase, outcome: Outcome) {
    case.outcome = outcome;
    case.phase = Phase::Closed;
    case.resolved_at = env.ledger().timestamp();
    events::emit_case_resolved(env, &case.event_id, outcome, case.approve_count, case.reject_count);
}

#[contract]
pub struct CommunityReview;

#[contractimpl]
impl CommunityReview {
    /// One-time setup with default quorum, threshold and phase durations.
    pub fn initialize(
        env: Env,
        admin: Address,
        oracle: Address,
        reputation_source: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(
            &DataKey::Config,
            &ReviewConfig {
                oracle,
                reputation_source,
                quorum: DEFAULT_QUORUM,
                champion_threshold: DEFAULT_CHAMPION_THRESHOLD,
                phase1_duration: DEFAULT_PHASE1_DURATION,
                phase2_duration: DEFAULT_PHASE2_DURATION,
            },
        );
        Ok(())
    }

    /// Replaces the configuration. Open cases keep the schedule and quorum
    /// they were opened with.
    pub fn set_config(env: Env, admin: Address, config: ReviewConfig) -> Result<(), Error> {
        admin.require_auth();
        let stored: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if stored != admin {
            return Err(Error::Unauthorized);
        }
        validate_config(&config)?;
        env.storage().instance().set(&DataKey::Config, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<ReviewConfig, Error> {
        load_config(&env)
    }

    // ── Cases ───────────────────────────────────────────────────────

    /// Opens a review case for a flagged submission. Oracle only.
    pub fn open_case(
        env: Env,
        oracle: Address,
        event_id: String,
        author: Address,
        high_risk: bool,
    ) -> Result<(), Error> {
        oracle.require_auth();
        let cfg = load_config(&env)?;
        if oracle != cfg.oracle {
            return Err(Error::Unauthorized);
        }
        if env
            .storage()
            .persistent()
            .has(&DataKey::Case(event_id.clone()))
        {
            return Err(Error::CaseExists);
        }

        let now = env.ledger().timestamp();
        let phase1_ends_at = now
            .checked_add(cfg.phase1_duration)
            .ok_or(Error::InvalidConfig)?;
        let closes_at = phase1_ends_at
            .checked_add(cfg.phase2_duration)
            .ok_or(Error::InvalidConfig)?;
        let phase2_opens_at = if high_risk { closes_at } else { phase1_ends_at };
        let case = DisputeCase {
            event_id: event_id.clone(),
            author: author.clone(),
            high_risk,
            phase: if high_risk {
                Phase::ChampionAudit
            } else {
                Phase::ChampionOnly
            },
            quorum: cfg.quorum,
            approve_count: 0,
            reject_count: 0,
            voters: Vec::new(&env),
            outcome: Outcome::Pending,
            created_at: now,
            phase2_opens_at,
            closes_at,
            resolved_at: 0,
            expired: false,
            claimed: false,
        };
        store_case(&env, &case);

        let count: u64 = env
            .storage()
            .instance()
            .get(&DataKey::CaseCount)
            .unwrap_or(0);
        env.storage().instance().set(&DataKey::CaseCount, &(count + 1));

        events::emit_case_opened(&env, &event_id, &author, high_risk, closes_at);
        Ok(())
    }

    /// Casts one vote. Returns the case outcome after the vote, `Pending`
    /// until quorum is reached.
    pub fn vote(env: Env, voter: Address, event_id: String, approve: bool) -> Result<Outcome, Error> {
        voter.require_auth();
        let cfg = load_config(&env)?;
        let mut case = load_case(&env, &event_id)?;

        if case.outcome != Outcome::Pending {
            return Err(Error::CaseResolved);
        }
        let phase = phase::phase_at(&case, env.ledger().timestamp());
        if phase == Phase::Closed {
            return Err(Error::VotingWindowClosed);
        }
        if voter == case.author {
            return Err(Error::AuthorCannotVote);
        }
        let vote_key = DataKey::Vote(event_id.clone(), voter.clone());
        if env.storage().persistent().has(&vote_key) {
            return Err(Error::AlreadyVoted);
        }
        if reputation_source::is_banned(&env, &cfg.reputation_source, &voter) {
            log!(&env, "banned voter");
            return Err(Error::NotEligible);
        }
        if phase::champions_only(phase) {
            let score = reputation_source::score_of(&env, &cfg.reputation_source, &voter);
            if score < cfg.champion_threshold {
                log!(&env, "voter below champion threshold", score);
                return Err(Error::NotEligible);
            }
        }

        if phase != case.phase {
            events::emit_phase_advanced(&env, &event_id, case.phase, phase);
            case.phase = phase;
        }

        env.storage().persistent().set(&vote_key, &approve);
        if approve {
            case.approve_count += 1;
        } else {
            case.reject_count += 1;
        }
        case.voters.push_back(voter.clone());
        events::emit_vote_cast(&env, &event_id, &voter, approve, phase);

        if case.approve_count + case.reject_count >= case.quorum {
            let outcome = if case.approve_count > case.reject_count {
                Outcome::Approved
            } else {
                Outcome::Rejected
            };
            finalize(&env, &mut case, outcome);
        }

        store_case(&env, &case);
        Ok(case.outcome)
    }

    /// Closes a case whose window ended without quorum. It resolves as
    /// rejected and is marked expired.
    pub fn close_expired(env: Env, event_id: String) -> Result<(), Error> {
        let mut case = load_case(&env, &event_id)?;
        if case.outcome != Outcome::Pending {
            return Err(Error::CaseResolved);
        }
        let now = env.ledger().timestamp();
        if now <= case.closes_at {
            return Err(Error::WindowStillOpen);
        }
        case.expired = true;
        events::emit_case_expired(&env, &event_id, now);
        finalize(&env, &mut case, Outcome::Rejected);
        store_case(&env, &case);
        Ok(())
    }

    /// Authorizes the one claim of an approved case. The oracle answers
    /// `claim_authorized` with a fresh attestation for the author.
    pub fn request_claim(env: Env, author: Address, event_id: String) -> Result<(), Error> {
        author.require_auth();
        let mut case = load_case(&env, &event_id)?;
        if author != case.author {
            return Err(Error::Unauthorized);
        }
        if case.outcome != Outcome::Approved {
            return Err(Error::CaseNotApproved);
        }
        if case.claimed {
            return Err(Error::DuplicateClaim);
        }
        case.claimed = true;
        store_case(&env, &case);
        events::emit_claim_authorized(&env, &event_id, &author);
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// The case with its phase as of the current ledger time.
    pub fn get_case(env: Env, event_id: String) -> Result<DisputeCase, Error> {
        let mut case = load_case(&env, &event_id)?;
        case.phase = phase::phase_at(&case, env.ledger().timestamp());
        Ok(case)
    }

    pub fn has_voted(env: Env, event_id: String, voter: Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Vote(event_id, voter))
    }

    /// `Some(approve)` for a cast vote.
    pub fn get_vote(env: Env, event_id: String, voter: Address) -> Option<bool> {
        env.storage()
            .persistent()
            .get(&DataKey::Vote(event_id, voter))
    }

    pub fn get_case_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::CaseCount)
            .unwrap_or(0)
    }
}
