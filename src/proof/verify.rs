//! Verification API
//!
//! Recompute published games from their seeds and compare. All checks are
//! pure recomputation; nothing the operator publishes is trusted beyond the
//! seeds themselves.

use tracing::{debug, warn};

use crate::core::multiplier::Outcome;
use crate::core::seed::{HouseEdge, InputError, Salt, Seed};
use crate::game::chain::ChainEntry;
use crate::game::outcome::derive;

/// Errors that can occur during verification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerificationError {
    /// A seed is not the hash of its predecessor.
    #[error("broken link: expected seed {expected}, got {got}")]
    BrokenLink {
        /// Hash of the previous seed.
        expected: Seed,
        /// Seed actually published.
        got: Seed,
    },

    /// Entries are not consecutive.
    #[error("index gap: expected entry {expected}, got {got}")]
    IndexGap {
        /// Index following the previous entry.
        expected: u64,
        /// Index actually published.
        got: u64,
    },

    /// Published outcome differs from the recomputed one.
    #[error("outcome mismatch: computed {computed}, claimed {claimed}")]
    OutcomeMismatch {
        /// Outcome recomputed from the seed.
        computed: Outcome,
        /// Outcome the operator published.
        claimed: Outcome,
    },

    /// Seed does not hash forward to the commitment.
    #[error("seed does not reach the commitment within {max_steps} hashes")]
    NotInChain {
        /// Hashes tried.
        max_steps: u64,
    },

    /// Malformed verification input.
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Check that `next` is the chain successor of `previous`.
pub fn verify_link(previous: &Seed, next: &Seed) -> Result<(), VerificationError> {
    let expected = previous.next();
    if expected.as_str().eq_ignore_ascii_case(next.as_str()) {
        Ok(())
    } else {
        Err(VerificationError::BrokenLink {
            expected,
            got: next.clone(),
        })
    }
}

/// Recompute one outcome and compare it with the published value.
pub fn verify_outcome(
    seed: &Seed,
    salt: &Salt,
    edge: HouseEdge,
    claimed: Outcome,
) -> Result<(), VerificationError> {
    let computed = derive(seed, salt, edge);
    if computed == claimed {
        Ok(())
    } else {
        Err(VerificationError::OutcomeMismatch { computed, claimed })
    }
}

/// Result of verifying a single published entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryResult {
    /// Published index.
    pub index: u64,
    /// Outcome recomputed from the seed.
    pub computed: Outcome,
    /// Outcome the operator published.
    pub claimed: Outcome,
    /// Does the entry follow its predecessor (always true for the first)?
    pub linked: bool,
    /// Did this entry pass every check?
    pub valid: bool,
}

/// Verification result for a list of published entries.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    /// Did verification pass?
    pub valid: bool,

    /// Per-entry results, in input order.
    pub entries: Vec<EntryResult>,

    /// Every failure found, with the index of the entry it concerns.
    pub errors: Vec<(u64, VerificationError)>,
}

impl VerificationReport {
    /// First failure, if any.
    pub fn first_error(&self) -> Option<&(u64, VerificationError)> {
        self.errors.first()
    }

    /// Number of entries that passed.
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }
}

/// Verify a run of consecutive published entries.
///
/// Checks every entry instead of stopping at the first failure: outcomes are
/// recomputed from each published seed, and each entry after the first must
/// carry the next index and the hash of the previous seed.
pub fn verify_entries(entries: &[ChainEntry], salt: &Salt, edge: HouseEdge) -> VerificationReport {
    let mut results = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();
    let mut previous: Option<&ChainEntry> = None;

    for entry in entries {
        let mut linked = true;

        if let Some(prev) = previous {
            // Published indices are untrusted; nothing may follow u64::MAX.
            let expected_index = prev.index.checked_add(1);
            if expected_index != Some(entry.index) {
                linked = false;
                errors.push((
                    entry.index,
                    VerificationError::IndexGap {
                        expected: expected_index.unwrap_or(u64::MAX),
                        got: entry.index,
                    },
                ));
            }
            if let Err(e) = verify_link(&prev.seed, &entry.seed) {
                linked = false;
                errors.push((entry.index, e));
            }
        }

        let computed = derive(&entry.seed, salt, edge);
        let matches = computed == entry.outcome;
        if !matches {
            errors.push((
                entry.index,
                VerificationError::OutcomeMismatch {
                    computed,
                    claimed: entry.outcome,
                },
            ));
        }

        results.push(EntryResult {
            index: entry.index,
            computed,
            claimed: entry.outcome,
            linked,
            valid: linked && matches,
        });
        previous = Some(entry);
    }

    let valid = errors.is_empty();
    if valid {
        debug!(entries = results.len(), "published entries verified");
    } else {
        warn!(entries = results.len(), failures = errors.len(), "published entries failed verification");
    }

    VerificationReport {
        valid,
        entries: results,
        errors,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::multiplier::Multiplier;
    use crate::game::chain::collect_chain;

    const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
    const REFERENCE_SALT: &str = "0000000000000000000301e2801a9a9598bfb114e574a91a887f2132f33047e6";

    fn salt() -> Salt {
        Salt::parse(REFERENCE_SALT).unwrap()
    }

    fn published(length: u64) -> Vec<ChainEntry> {
        collect_chain(ZERO_SEED, REFERENCE_SALT, 1.0, length).unwrap()
    }

    #[test]
    fn test_honest_chain_verifies() {
        let report = verify_entries(&published(12), &salt(), HouseEdge::default());
        assert!(report.valid);
        assert_eq!(report.valid_count(), 12);
        assert!(report.first_error().is_none());
    }

    #[test]
    fn test_empty_list_verifies() {
        let report = verify_entries(&[], &salt(), HouseEdge::default());
        assert!(report.valid);
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_tampered_outcome_detected() {
        let mut entries = published(6);
        entries[3].outcome = Outcome::from(Multiplier::from_cents(5000));

        let report = verify_entries(&entries, &salt(), HouseEdge::default());
        assert!(!report.valid);
        assert_eq!(report.valid_count(), 5);
        assert_eq!(
            report.first_error(),
            Some(&(
                3,
                VerificationError::OutcomeMismatch {
                    computed: Outcome::from(Multiplier::from_cents(1164)),
                    claimed: Outcome::from(Multiplier::from_cents(5000)),
                }
            ))
        );
    }

    #[test]
    fn test_swapped_seed_breaks_links() {
        let mut entries = published(5);
        entries.swap(1, 2);
        let report = verify_entries(&entries, &salt(), HouseEdge::default());
        assert!(!report.valid);
        assert!(report
            .errors
            .iter()
            .any(|(_, e)| matches!(e, VerificationError::BrokenLink { .. })));
        assert!(report
            .errors
            .iter()
            .any(|(_, e)| matches!(e, VerificationError::IndexGap { .. })));
        // Outcomes still match their own seeds.
        assert!(report.entries.iter().all(|e| e.computed == e.claimed));
    }

    #[test]
    fn test_entry_after_last_index_is_a_gap() {
        let entries: Vec<ChainEntry> = serde_json::from_str(
            r#"[
                {"index": 18446744073709551615, "seed": "00", "outcome": "1.00"},
                {"index": 0, "seed": "11", "outcome": "1.00"}
            ]"#,
        )
        .unwrap();

        let report = verify_entries(&entries, &Salt::none(), HouseEdge::default());
        assert!(!report.valid);
        assert!(!report.entries[1].linked);
        assert!(report.errors.contains(&(
            0,
            VerificationError::IndexGap {
                expected: u64::MAX,
                got: 0,
            }
        )));
    }

    #[test]
    fn test_wrong_salt_fails_outcomes_only() {
        let report = verify_entries(&published(4), &Salt::none(), HouseEdge::default());
        assert!(!report.valid);
        assert!(report.entries.iter().all(|e| e.linked));
    }

    #[test]
    fn test_verify_link() {
        let entries = published(2);
        assert!(verify_link(&entries[0].seed, &entries[1].seed).is_ok());
        assert!(matches!(
            verify_link(&entries[1].seed, &entries[0].seed),
            Err(VerificationError::BrokenLink { .. })
        ));
    }

    #[test]
    fn test_verify_outcome() {
        let seed = Seed::parse(ZERO_SEED).unwrap();
        let claimed: Outcome = "4.21".parse().unwrap();
        assert!(verify_outcome(&seed, &salt(), HouseEdge::default(), claimed).is_ok());
        assert!(verify_outcome(&seed, &salt(), HouseEdge::new(2.0).unwrap(), claimed).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = VerificationError::OutcomeMismatch {
            computed: Outcome::Unbounded,
            claimed: Outcome::from(Multiplier::MIN),
        };
        assert_eq!(err.to_string(), "outcome mismatch: computed unbounded, claimed 1.00");
        let err: VerificationError = InputError::EmptySeed.into();
        assert_eq!(err.to_string(), "seed must not be empty");
    }
}
