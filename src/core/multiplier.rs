//! Cent-Exact Multipliers
//!
//! Outcomes are kept as integer hundredths so that a derived value never
//! passes through a lossy float on its way to display or comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Hundredths per whole multiplier unit.
pub const CENTS_PER_UNIT: u64 = 100;

/// Textual form of [`Outcome::Unbounded`].
pub const UNBOUNDED_TEXT: &str = "unbounded";

/// Rejected multiplier text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid multiplier {0:?}: expected a decimal with at most two fraction digits")]
pub struct MultiplierParseError(pub String);

/// Payout multiplier in hundredths (`421` is `4.21x`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiplier(u64);

impl Multiplier {
    /// Smallest multiplier a game can produce (`1.00x`).
    pub const MIN: Multiplier = Multiplier(CENTS_PER_UNIT);

    /// Multiplier from a raw cents value.
    #[inline]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Multiplier from a floored cents value, clamped to [`Multiplier::MIN`].
    #[inline]
    pub fn clamped(cents: u64) -> Self {
        Self(cents.max(Self::MIN.0))
    }

    /// Value in hundredths.
    #[inline]
    pub const fn cents(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / CENTS_PER_UNIT, self.0 % CENTS_PER_UNIT)
    }
}

impl FromStr for Multiplier {
    type Err = MultiplierParseError;

    /// Accepts `"4.21"`, `"2.6"`, `"1"` and an optional trailing `x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MultiplierParseError(s.to_owned());
        let text = s.trim();
        let text = text.strip_suffix(['x', 'X']).unwrap_or(text);

        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty()
            || fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let fraction = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<u64>().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(fraction))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for Multiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Multiplier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Result of one game round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Game busted at this multiplier.
    Multiplier(Multiplier),

    /// The drawn float rounded to exactly 1.0, leaving the edge-adjusted
    /// payout undefined. Recorded for that round only; the chain continues.
    Unbounded,
}

impl Outcome {
    /// Is this the unbounded sentinel?
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// The multiplier, if bounded.
    #[inline]
    pub fn multiplier(&self) -> Option<Multiplier> {
        match self {
            Self::Multiplier(m) => Some(*m),
            Self::Unbounded => None,
        }
    }

    /// Value in hundredths, if bounded.
    #[inline]
    pub fn cents(&self) -> Option<u64> {
        self.multiplier().map(Multiplier::cents)
    }
}

impl From<Multiplier> for Outcome {
    fn from(m: Multiplier) -> Self {
        Self::Multiplier(m)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multiplier(m) => fmt::Display::fmt(m, f),
            Self::Unbounded => f.write_str(UNBOUNDED_TEXT),
        }
    }
}

impl FromStr for Outcome {
    type Err = MultiplierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case(UNBOUNDED_TEXT) || text.eq_ignore_ascii_case("inf") {
            return Ok(Self::Unbounded);
        }
        text.parse().map(Self::Multiplier)
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================
