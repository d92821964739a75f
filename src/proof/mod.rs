//! Third-Party Verification
//!
//! Lets a player check an operator's published games:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    VERIFICATION                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  commitment.rs - Terminal hash published before play         │
//! │  verify.rs     - Link, outcome and whole-list checks         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operators generate a chain forward and play it backward: the hash of the
//! last seed is published up front, and every revealed game seed must hash
//! forward to it.

pub mod commitment;
pub mod verify;

// Re-export key types
pub use commitment::ChainCommitment;
pub use verify::{
    verify_entries, verify_link, verify_outcome, EntryResult, VerificationError,
    VerificationReport,
};
