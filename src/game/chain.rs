//! Hash Chain Generator
//!
//! Produces `(seed, outcome)` pairs where each seed is the SHA-256 of the
//! previous one:
//!
//! ```text
//!   entry 0          entry 1                entry 2
//!   seed_0  ──sha──▶ seed_1  ──sha──▶       seed_2  ...
//!     │                │                      │
//!   derive           derive                 derive
//!     ▼                ▼                      ▼
//!   outcome_0        outcome_1              outcome_2
//! ```
//!
//! Chains anchored by a public commitment run to millions of entries, so
//! generation is a lazy iterator holding only the rolling seed. A consumer
//! that stops pulling stops all work; skipping with [`Iterator::nth`] or
//! [`Chain::starting_at`] only hashes, it never derives skipped outcomes.
//!
//! The salt is applied inside derivation only. The chain itself always
//! advances by the plain, unsalted hash.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::multiplier::Outcome;
use crate::core::seed::{HouseEdge, InputError, Salt, Seed};
use crate::game::outcome::derive;

/// One generated round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// Position in the chain, starting at 0 for the initial seed.
    pub index: u64,
    /// Seed of this round.
    pub seed: Seed,
    /// Derived outcome.
    pub outcome: Outcome,
}

// =============================================================================
// SEED CHAIN
// =============================================================================

/// Lazy walk over the seeds of a chain, without deriving outcomes.
///
/// Seed advancement is the only sequential part of a chain. Callers wanting
/// throughput can collect seeds here and derive outcomes in any order.
#[derive(Clone, Debug)]
pub struct SeedChain {
    current: Seed,
    /// `current` was already emitted and must be hashed before the next one.
    advance_pending: bool,
    remaining: u64,
}

impl SeedChain {
    /// Seeds `0..length` starting from `initial`.
    pub fn new(initial: Seed, length: u64) -> Self {
        Self {
            current: initial,
            advance_pending: false,
            remaining: length,
        }
    }

    /// Seeds left to emit.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Drop the next `n` seeds, hashing but not emitting them.
    ///
    /// Returns the number actually skipped (less than `n` only when the chain
    /// runs out). Exhausting the chain never computes an unused hash.
    pub fn skip_seeds(&mut self, n: u64) -> u64 {
        if n >= self.remaining {
            let skipped = self.remaining;
            self.remaining = 0;
            return skipped;
        }
        for _ in 0..n {
            self.advance();
        }
        self.remaining -= n;
        n
    }

    #[inline]
    fn advance(&mut self) {
        if self.advance_pending {
            self.current = self.current.next();
        }
        self.advance_pending = true;
    }
}

impl Iterator for SeedChain {
    type Item = Seed;

    fn next(&mut self) -> Option<Seed> {
        if self.remaining == 0 {
            return None;
        }
        self.advance();
        self.remaining -= 1;
        Some(self.current.clone())
    }

    fn nth(&mut self, n: usize) -> Option<Seed> {
        self.skip_seeds(n as u64);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for SeedChain {}

// =============================================================================
// CHAIN
// =============================================================================

/// Lazy `(seed, outcome)` chain.
#[derive(Clone, Debug)]
pub struct Chain {
    seeds: SeedChain,
    salt: Salt,
    edge: HouseEdge,
    next_index: u64,
}

impl Chain {
    /// Chain of `length` entries from `initial`.
    pub fn new(initial: Seed, salt: Salt, edge: HouseEdge, length: u64) -> Self {
        debug!(
            length,
            salted = !salt.is_empty(),
            house_edge = edge.percent(),
            "chain created"
        );
        Self {
            seeds: SeedChain::new(initial, length),
            salt,
            edge,
            next_index: 0,
        }
    }

    /// Same chain, resumed at entry `start`. Indices keep their position in
    /// the full chain.
    pub fn starting_at(initial: Seed, salt: Salt, edge: HouseEdge, length: u64, start: u64) -> Self {
        let mut chain = Self::new(initial, salt, edge, length);
        chain.skip_entries(start);
        debug!(start, remaining = chain.remaining(), "chain resumed");
        chain
    }

    /// Entries left to emit.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.seeds.remaining()
    }

    /// Index the next emitted entry will carry.
    #[inline]
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Salt applied during derivation.
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// House edge applied during derivation.
    pub fn house_edge(&self) -> HouseEdge {
        self.edge
    }

    /// Skip `n` entries without deriving their outcomes.
    pub fn skip_entries(&mut self, n: u64) -> u64 {
        let skipped = self.seeds.skip_seeds(n);
        self.next_index += skipped;
        skipped
    }
}

impl Iterator for Chain {
    type Item = ChainEntry;

    fn next(&mut self) -> Option<ChainEntry> {
        let seed = self.seeds.next()?;
        let outcome = derive(&seed, &self.salt, self.edge);
        let index = self.next_index;
        self.next_index += 1;
        trace!(index, %seed, %outcome, "entry derived");
        Some(ChainEntry { index, seed, outcome })
    }

    fn nth(&mut self, n: usize) -> Option<ChainEntry> {
        self.skip_entries(n as u64);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.seeds.size_hint()
    }
}

impl FusedIterator for Chain {}

/// Lazily generate `length` entries from `initial`.
pub fn generate_chain(initial: Seed, salt: Salt, edge: HouseEdge, length: u64) -> Chain {
    Chain::new(initial, salt, edge, length)
}

/// Validate raw inputs and materialize a whole chain.
///
/// Holds every entry in memory; use [`generate_chain`] for long chains.
pub fn collect_chain(
    initial: &str,
    salt: &str,
    house_edge: f64,
    length: u64,
) -> Result<Vec<ChainEntry>, InputError> {
    let initial = Seed::parse(initial)?;
    let salt = Salt::parse(salt)?;
    let edge = HouseEdge::new(house_edge)?;
    Ok(generate_chain(initial, salt, edge, length).collect())
}

// =============================================================================
// TESTS
// =============================================================================
