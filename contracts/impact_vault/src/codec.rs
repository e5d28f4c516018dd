//! Canonical attestation encoding and signing digest.
//!
//! Every field is serialised to XDR and framed as `len (u32 BE) || bytes`
//! behind a fixed domain tag, so two different field tuples can never produce
//! the same byte string. The oracle signs the Ethereum personal-message digest
//! of `keccak256(encoding)`.

use soroban_sdk::crypto::Hash;
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{Bytes, Env};

use crate::types::Attestation;

/// Domain separator prepended to every encoding.
pub const ATTESTATION_DOMAIN: &[u8] = b"IMPACT_ATTESTATION_V1";

/// Prefix of an Ethereum personal-message over a 32-byte hash.
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

fn push_field(buf: &mut Bytes, field: Bytes) {
    buf.extend_from_array(&field.len().to_be_bytes());
    buf.append(&field);
}

/// Length-prefixed encoding of the attestation fields in fixed order.
#[must_use]
pub fn encode(env: &Env, a: &Attestation) -> Bytes {
    let mut buf = Bytes::from_slice(env, ATTESTATION_DOMAIN);
    push_field(&mut buf, a.event_id.clone().to_xdr(env));
    push_field(&mut buf, a.volunteer.clone().to_xdr(env));
    push_field(&mut buf, a.beneficiary.clone().to_xdr(env));
    push_field(&mut buf, a.impact_score.to_xdr(env));
    push_field(&mut buf, a.token_reward.to_xdr(env));
    push_field(&mut buf, a.zk_proof_hash.clone().to_xdr(env));
    push_field(&mut buf, a.event_hash.clone().to_xdr(env));
    push_field(&mut buf, a.nonce.clone().to_xdr(env));
    push_field(&mut buf, a.expires_at.to_xdr(env));
    buf
}

/// keccak256 over the canonical encoding.
#[must_use]
pub fn canonical_hash(env: &Env, a: &Attestation) -> Hash<32> {
    env.crypto().keccak256(&encode(env, a))
}

/// Digest the oracle actually signs: the personal-message hash of
/// [`canonical_hash`].
#[must_use]
pub fn signing_digest(env: &Env, a: &Attestation) -> Hash<32> {
    let mut msg = Bytes::from_slice(env, ETH_SIGNED_MESSAGE_PREFIX);
    msg.extend_from_array(&canonical_hash(env, a).to_array());
    env.crypto().keccak256(&msg)
}
