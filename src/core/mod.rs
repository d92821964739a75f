//! Core deterministic primitives.
//!
//! Everything an independent verifier has to reproduce bit-for-bit lives
//! here: digests, input validation, the precision boundary and the
//! cent-exact multiplier type.

pub mod hash;
pub mod multiplier;
pub mod precision;
pub mod seed;

// Re-export core types
pub use hash::{salted_seed_hex, sha256_hex, SeedHash};
pub use multiplier::{Multiplier, Outcome};
pub use precision::{extract_bits, normalize_significant, unit_interval};
pub use seed::{HouseEdge, InputError, Salt, Seed};
