//! Chain Commitment
//!
//! Commit to a whole chain before any game is played. Publishing the hash of
//! the final seed binds the operator to every seed in the chain, because each
//! one must hash forward to the commitment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::hash::advance_hex;
use crate::core::seed::Seed;
use crate::proof::verify::VerificationError;

/// Published commitment to a chain of known length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainCommitment {
    /// SHA-256 of the last entry's seed (the initial seed hashed `length`
    /// times).
    pub terminal_hash: Seed,

    /// Number of entries in the committed chain.
    pub length: u64,
}

impl ChainCommitment {
    /// Commitment from a published terminal hash.
    pub fn new(terminal_hash: Seed, length: u64) -> Self {
        Self { terminal_hash, length }
    }

    /// Compute the commitment for a chain generated from `initial`.
    pub fn for_chain(initial: &Seed, length: u64) -> Self {
        let terminal = Seed::from_digest(advance_hex(initial.as_str(), length));
        debug!(length, terminal = %terminal, "chain commitment computed");
        Self::new(terminal, length)
    }

    /// Find `seed` in the committed chain.
    ///
    /// Hashes forward at most `length` times. Returns the entry index in
    /// generation order (`0` is the initial seed).
    pub fn locate(&self, seed: &Seed) -> Result<u64, VerificationError> {
        let mut current = seed.clone();
        for steps in 1..=self.length {
            current = current.next();
            if current.as_str().eq_ignore_ascii_case(self.terminal_hash.as_str()) {
                let index = self.length - steps;
                debug!(index, steps, "seed located in committed chain");
                return Ok(index);
            }
        }
        Err(VerificationError::NotInChain {
            max_steps: self.length,
        })
    }

    /// Play-order game number of entry `index`.
    ///
    /// The last generated entry is played first (game 1), so the reveal of
    /// each game never exposes the seeds of games yet to come.
    pub fn game_number(&self, index: u64) -> Option<u64> {
        (index < self.length).then(|| self.length - index)
    }

    /// Entry index played as game `game` (inverse of [`Self::game_number`]).
    pub fn index_of_game(&self, game: u64) -> Option<u64> {
        (1..=self.length).contains(&game).then(|| self.length - game)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::chain::SeedChain;

    const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";

    fn zero() -> Seed {
        Seed::parse(ZERO_SEED).unwrap()
    }

    #[test]
    fn test_commitment_is_hash_of_last_seed() {
        let commitment = ChainCommitment::for_chain(&zero(), 5);
        assert_eq!(
            commitment.terminal_hash.as_str(),
            "74e28f4be99caf2180ed3724cfd20120ca6558db2fe7fe7b94a94078fd60afbc"
        );
        let last = SeedChain::new(zero(), 5).last().unwrap();
        assert_eq!(last.next(), commitment.terminal_hash);
    }

    #[test]
    fn test_locate_every_entry() {
        let commitment = ChainCommitment::for_chain(&zero(), 8);
        for (index, seed) in SeedChain::new(zero(), 8).enumerate() {
            assert_eq!(commitment.locate(&seed).unwrap(), index as u64);
        }
    }

    #[test]
    fn test_locate_rejects_foreign_seed() {
        let commitment = ChainCommitment::for_chain(&zero(), 8);
        let foreign = Seed::parse("ab".repeat(32)).unwrap();
        assert_eq!(
            commitment.locate(&foreign),
            Err(VerificationError::NotInChain { max_steps: 8 })
        );
        // The terminal hash itself is not an entry.
        assert!(commitment.locate(&commitment.terminal_hash).is_err());
    }

    #[test]
    fn test_locate_accepts_uppercase_commitment() {
        let commitment = ChainCommitment::for_chain(&zero(), 3);
        let shouted = ChainCommitment::new(
            Seed::parse(commitment.terminal_hash.as_str().to_ascii_uppercase()).unwrap(),
            3,
        );
        assert_eq!(shouted.locate(&zero()).unwrap(), 0);
    }

    #[test]
    fn test_game_numbering() {
        let commitment = ChainCommitment::for_chain(&zero(), 10);
        assert_eq!(commitment.game_number(9), Some(1));
        assert_eq!(commitment.game_number(0), Some(10));
        assert_eq!(commitment.game_number(10), None);
        assert_eq!(commitment.index_of_game(1), Some(9));
        assert_eq!(commitment.index_of_game(0), None);
        assert_eq!(commitment.index_of_game(11), None);
    }
}
