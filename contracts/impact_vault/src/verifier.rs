//! Oracle signature verification.
//!
//! Recovers the signer of a digest and compares it to the registered oracle.
//! Recovery sits behind [`SignatureVerifier`] so settlement can run against a
//! substitute verifier in unit tests.

use soroban_sdk::crypto::Hash;
use soroban_sdk::{Bytes, BytesN, Env};

use crate::codec;
use crate::types::{Attestation, OracleSignature};
use crate::Error;

/// Recovers a 20-byte signer address from a digest and signature.
pub trait SignatureVerifier {
    fn recover(
        &self,
        env: &Env,
        digest: &Hash<32>,
        signature: &OracleSignature,
    ) -> Result<BytesN<20>, Error>;
}

/// Order `n` of the secp256k1 group, big-endian.
pub const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// `n / 2`, the largest accepted `s`.
pub const HALF_CURVE_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Host-backed secp256k1 recovery, Ethereum address derivation.
pub struct Secp256k1Verifier;

impl SignatureVerifier for Secp256k1Verifier {
    fn recover(
        &self,
        env: &Env,
        digest: &Hash<32>,
        signature: &OracleSignature,
    ) -> Result<BytesN<20>, Error> {
        let recovery_id = normalize_recovery_id(signature.recovery_id)?;
        check_scalars(&signature.signature.to_array())?;
        let public_key = env
            .crypto()
            .secp256k1_recover(digest, &signature.signature, recovery_id);
        Ok(signer_address(env, &public_key))
    }
}

/// Accepts 0/1 and the Ethereum `v` values 27/28.
fn normalize_recovery_id(recovery_id: u32) -> Result<u32, Error> {
    match recovery_id {
        0 | 1 => Ok(recovery_id),
        27 | 28 => Ok(recovery_id - 27),
        _ => Err(Error::InvalidSignature),
    }
}

/// Requires `r` in `[1, n)` and `s` in `[1, n/2]`. The host traps on
/// anything else, so out-of-range signatures are rejected here.
fn check_scalars(signature: &[u8; 64]) -> Result<(), Error> {
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&signature[..32]);
    s.copy_from_slice(&signature[32..]);
    let zero = [0u8; 32];
    if r == zero || r >= CURVE_ORDER || s == zero || s > HALF_CURVE_ORDER {
        return Err(Error::InvalidSignature);
    }
    Ok(())
}

/// Last 20 bytes of keccak256 over the uncompressed key without its 0x04 tag.
#[must_use]
pub fn signer_address(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
    let key = public_key.to_array();
    let hash = env
        .crypto()
        .keccak256(&Bytes::from_slice(env, &key[1..]))
        .to_array();
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    BytesN::from_array(env, &address)
}

/// Checks that `signature` over the attestation was produced by `expected`.
/// Side-effect free.
pub fn verify<V: SignatureVerifier>(
    env: &Env,
    verifier: &V,
    attestation: &Attestation,
    signature: &OracleSignature,
    expected: &BytesN<20>,
) -> Result<(), Error> {
    let digest = codec::signing_digest(env, attestation);
    let recovered = verifier.recover(env, &digest, signature)?;
    if recovered != *expected {
        return Err(Error::InvalidSignature);
    }
    Ok(())
}
