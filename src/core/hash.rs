//! Seed Hashing
//!
//! SHA-256 over the literal text of seeds:
//! - Chain advancement (`next = sha256_hex(current)`)
//! - Salted seeds for outcome extraction
//! - Commitment terminal hashes

use sha2::{Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type SeedHash = [u8; 32];

/// Compute a plain SHA-256 of arbitrary data.
pub fn hash_bytes(data: &[u8]) -> SeedHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-256 of `key || data`.
///
/// This is a keyed hash by plain concatenation, not RFC 2104 HMAC. Public
/// verifiers for salted crash chains expect exactly this construction.
pub fn hash_with_key(key: &[u8], data: &[u8]) -> SeedHash {
    let mut hasher = Sha256::new();
    hasher.update(key);
    hasher.update(data);
    hasher.finalize().into()
}

/// Lowercase hex SHA-256 digest of `data`.
#[inline]
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(hash_bytes(data))
}

/// Lowercase hex digest of `salt || seed`, both taken as text bytes.
///
/// The salt characters themselves are hashed, never their decoded binary
/// value.
#[inline]
pub fn salted_seed_hex(salt: &str, seed: &str) -> String {
    hex::encode(hash_with_key(salt.as_bytes(), seed.as_bytes()))
}

/// Apply the chain hash `steps` times to `seed`.
pub fn advance_hex(seed: &str, steps: u64) -> String {
    let mut current = seed.to_owned();
    for _ in 0..steps {
        current = sha256_hex(current.as_bytes());
    }
    current
}

// =============================================================================
// TESTS
// =============================================================================
