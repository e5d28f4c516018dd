//! Role-based access control.
//!
//! Grants are stored per `(account, role)`. Entry points call
//! [`require_role`] before touching business state.

use soroban_sdk::{contracttype, Address, Env};

use crate::{events, DataKey, Error};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Configuration and role management.
    Admin,
    /// Ban and unban participants.
    Moderator,
    /// Publish leaderboard positions.
    Ranker,
}

#[must_use]
pub fn has_role(e: &Env, account: &Address, role: Role) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Role(account.clone(), role))
        .unwrap_or(false)
}

/// Requires `caller` to authorize the call and hold `role`.
///
/// # Errors
/// `Unauthorized` if the role is missing.
pub fn require_role(e: &Env, caller: &Address, role: Role) -> Result<(), Error> {
    caller.require_auth();
    if !has_role(e, caller, role) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn grant(e: &Env, caller: &Address, account: &Address, role: Role) {
    e.storage()
        .instance()
        .set(&DataKey::Role(account.clone(), role), &true);
    events::emit_role_granted(e, account, role, caller);
}

pub fn revoke(e: &Env, caller: &Address, account: &Address, role: Role) {
    e.storage()
        .instance()
        .remove(&DataKey::Role(account.clone(), role));
    events::emit_role_revoked(e, account, role, caller);
}
