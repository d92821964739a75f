//! Outcome Derivation
//!
//! `(seed, salt, house edge) -> multiplier`, reproduced step for step so that
//! any third-party verifier lands on the same cent:
//!
//! 1. Salted seeds are replaced by `sha256_hex(salt || seed)`.
//! 2. The leading 52 bits give `r`.
//! 3. `X = r / 2^52`, rounded to 9 significant digits.
//! 4. `X' = (100 - h) / (1 - X)`.
//! 5. `floor(X')` cents, clamped to at least `1.00x`.
//!
//! The order matters: each stage truncates precision.

use serde::Serialize;
use tracing::warn;

use crate::core::hash::salted_seed_hex;
use crate::core::multiplier::{Multiplier, Outcome};
use crate::core::precision::{leading_bits, normalize_significant, unit_interval};
use crate::core::seed::{HouseEdge, InputError, Salt, Seed};

/// Derive the outcome of one round.
pub fn derive(seed: &Seed, salt: &Salt, edge: HouseEdge) -> Outcome {
    let bits = if salt.is_empty() {
        leading_bits(seed.as_str())
    } else {
        leading_bits(&salted_seed_hex(salt.as_str(), seed.as_str()))
    };
    let outcome = edge_adjust(normalize_significant(bits), edge);
    if outcome.is_unbounded() {
        warn!(seed = %seed, "draw rounded to 1.0, outcome is unbounded");
    }
    outcome
}

/// [`derive`] over raw strings, validating them first.
///
/// An empty `salt` selects the unsalted path.
pub fn derive_str(seed: &str, salt: &str, house_edge: f64) -> Result<Outcome, InputError> {
    let seed = Seed::parse(seed)?;
    let salt = Salt::parse(salt)?;
    let edge = HouseEdge::new(house_edge)?;
    Ok(derive(&seed, &salt, edge))
}

/// Apply the house edge to a normalized draw `x` in `[0, 1]`.
///
/// `x == 1.0` has no finite payout and yields [`Outcome::Unbounded`].
pub fn edge_adjust(x: f64, edge: HouseEdge) -> Outcome {
    let denominator = 1.0 - x;
    if denominator == 0.0 {
        return Outcome::Unbounded;
    }

    let floored = (edge.payout_numerator() / denominator).floor();
    // Negative payouts (edge above 100%) fall under the clamp; `as` saturates.
    let cents = if floored > 0.0 { floored as u64 } else { 0 };
    Outcome::Multiplier(Multiplier::clamped(cents))
}

/// Every intermediate value of one derivation, for published audits.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Derivation {
    /// Seed as supplied.
    pub seed: Seed,
    /// Digest the bits were taken from (the seed itself when unsalted).
    pub hashed_seed: String,
    /// Leading 52 bits.
    pub bits: u64,
    /// `bits / 2^52` before rounding.
    pub raw: f64,
    /// Draw after 9 significant digit rounding.
    pub normalized: f64,
    /// Final outcome.
    pub outcome: Outcome,
}

/// [`derive`], keeping the intermediate values.
pub fn explain(seed: &Seed, salt: &Salt, edge: HouseEdge) -> Derivation {
    let hashed_seed = if salt.is_empty() {
        seed.as_str().to_owned()
    } else {
        salted_seed_hex(salt.as_str(), seed.as_str())
    };
    let bits = leading_bits(&hashed_seed);
    let normalized = normalize_significant(bits);

    Derivation {
        seed: seed.clone(),
        hashed_seed,
        bits,
        raw: unit_interval(bits),
        normalized,
        outcome: edge_adjust(normalized, edge),
    }
}

// =============================================================================
// TESTS
// =============================================================================
