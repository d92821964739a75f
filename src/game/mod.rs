//! Outcome generation.
//!
//! `outcome` maps one seed to one game result; `chain` walks the hash-linked
//! seed sequence and applies it to every step.

pub mod chain;
pub mod outcome;

pub use chain::{collect_chain, generate_chain, Chain, ChainEntry, SeedChain};
pub use outcome::{derive, derive_str, edge_adjust, explain, Derivation};
