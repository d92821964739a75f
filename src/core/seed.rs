//! Chain Inputs
//!
//! Validated wrappers for the three caller-supplied parameters of a chain:
//! the seed, the salt and the house edge. Malformed values are rejected here,
//! before any hashing happens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::sha256_hex;
use crate::DEFAULT_HOUSE_EDGE;

/// Rejected chain input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Seed string was empty.
    #[error("seed must not be empty")]
    EmptySeed,

    /// Seed contains a non-hexadecimal character.
    #[error("seed has non-hex character {found:?} at position {position}")]
    NonHexSeed {
        /// Byte offset of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// Salt contains a non-hexadecimal character.
    #[error("salt has non-hex character {found:?} at position {position}")]
    NonHexSalt {
        /// Byte offset of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// House edge is NaN or infinite.
    #[error("house edge must be a finite percentage, got {0}")]
    InvalidHouseEdge(f64),

    /// House edge text is not a number.
    #[error("house edge {0:?} is not a number")]
    UnparsableHouseEdge(String),
}

fn first_non_hex(s: &str) -> Option<(usize, char)> {
    s.char_indices().find(|(_, c)| !c.is_ascii_hexdigit())
}

// =============================================================================
// SEED
// =============================================================================

/// Hex-encoded hash anchoring one step of the chain.
///
/// The text is kept exactly as supplied. Chain hashing runs over the literal
/// characters, so `"AB"` and `"ab"` start different chains; seeds produced by
/// the crate are always lowercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

impl Seed {
    /// Validate a seed: non-empty, hexadecimal only.
    pub fn parse(value: impl Into<String>) -> Result<Self, InputError> {
        let value = value.into();
        if value.is_empty() {
            return Err(InputError::EmptySeed);
        }
        if let Some((position, found)) = first_non_hex(&value) {
            return Err(InputError::NonHexSeed { position, found });
        }
        Ok(Self(value))
    }

    /// Wrap a digest produced by this crate (always valid lowercase hex).
    #[inline]
    pub(crate) fn from_digest(digest: String) -> Self {
        debug_assert!(first_non_hex(&digest).is_none() && !digest.is_empty());
        Self(digest)
    }

    /// The seed text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The following seed in the chain: SHA-256 of this seed's text.
    #[inline]
    pub fn next(&self) -> Seed {
        Self::from_digest(sha256_hex(self.0.as_bytes()))
    }

    /// Consume into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Seed {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Seed {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl AsRef<str> for Seed {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// SALT
// =============================================================================

/// Public, chain-constant salt folded into each seed before extraction.
///
/// An empty salt means the unsalted derivation path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Salt(String);

impl Salt {
    /// Validate a salt: empty, or hexadecimal only.
    pub fn parse(value: impl Into<String>) -> Result<Self, InputError> {
        let value = value.into();
        if let Some((position, found)) = first_non_hex(&value) {
            return Err(InputError::NonHexSalt { position, found });
        }
        Ok(Self(value))
    }

    /// The unsalted variant.
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Is this the unsalted variant?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The salt text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Salt {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Salt {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Salt> for String {
    fn from(salt: Salt) -> Self {
        salt.0
    }
}

// =============================================================================
// HOUSE EDGE
// =============================================================================

/// Percentage of expected value retained by the operator.
///
/// Recognised range is `[0, 100)`, but any finite value is accepted; values
/// at or above 100 simply clamp every outcome to the minimum multiplier.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HouseEdge(f64);

impl Default for HouseEdge {
    fn default() -> Self {
        Self(DEFAULT_HOUSE_EDGE)
    }
}

impl HouseEdge {
    /// Create a house edge from a percentage.
    pub fn new(percent: f64) -> Result<Self, InputError> {
        if !percent.is_finite() {
            return Err(InputError::InvalidHouseEdge(percent));
        }
        Ok(Self(percent))
    }

    /// Edge in percent.
    #[inline]
    pub fn percent(self) -> f64 {
        self.0
    }

    /// Numerator of the edge-adjusted payout, `100 - h`.
    #[inline]
    pub fn payout_numerator(self) -> f64 {
        100.0 - self.0
    }
}

impl fmt::Display for HouseEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for HouseEdge {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let percent: f64 = s
            .trim()
            .trim_end_matches('%')
            .parse()
            .map_err(|_| InputError::UnparsableHouseEdge(s.to_owned()))?;
        Self::new(percent)
    }
}

impl TryFrom<f64> for HouseEdge {
    type Error = InputError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HouseEdge> for f64 {
    fn from(edge: HouseEdge) -> Self {
        edge.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
