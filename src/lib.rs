//! # Crash Chain
//!
//! Provably fair outcome derivation for crash-style games.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        CRASH CHAIN                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Deterministic primitives                │
//! │  ├── hash.rs       - SHA-256 hex digests, salted seed hash   │
//! │  ├── seed.rs       - Validated seed / salt / house edge      │
//! │  ├── precision.rs  - 52-bit extraction, 9 sig-digit rounding │
//! │  └── multiplier.rs - Cent-exact multipliers and outcomes     │
//! │                                                              │
//! │  game/             - Outcome generation                      │
//! │  ├── outcome.rs    - seed + salt + edge -> outcome           │
//! │  └── chain.rs      - Lazy hash-linked chain iterator         │
//! │                                                              │
//! │  proof/            - Third-party verification                │
//! │  ├── commitment.rs - Terminal hash commitments               │
//! │  └── verify.rs     - Link / outcome / entry verification     │
//! │                                                              │
//! │  config.rs         - Chain parameters (env, JSON)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Every outcome is a pure function of `(seed, salt, house edge)`. Given the
//! same inputs, any implementation following the same derivation rules
//! produces **identical chains**, which is what lets players verify a game
//! operator after the fact.
//!
//! ```
//! use crash_chain::{generate_chain, HouseEdge, Salt, Seed};
//!
//! let seed = Seed::parse("0000000000000000000000000000000000000000000000000000000000000000").unwrap();
//! let salt = Salt::parse("0000000000000000000301e2801a9a9598bfb114e574a91a887f2132f33047e6").unwrap();
//!
//! let first = generate_chain(seed, salt, HouseEdge::default(), 1).next().unwrap();
//! assert_eq!(first.outcome.to_string(), "4.21");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod proof;

// Re-export commonly used types
pub use crate::config::{ChainConfig, ConfigError};
pub use crate::core::multiplier::{Multiplier, Outcome};
pub use crate::core::seed::{HouseEdge, InputError, Salt, Seed};
pub use crate::game::chain::{collect_chain, generate_chain, Chain, ChainEntry, SeedChain};
pub use crate::game::outcome::{derive, derive_str};
pub use crate::proof::commitment::ChainCommitment;
pub use crate::proof::verify::{verify_entries, verify_link, verify_outcome, VerificationError, VerificationReport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of most significant hash bits used to draw an outcome.
pub const OUTCOME_BITS: u32 = 52;

/// Significant decimal digits kept when normalizing the drawn float.
pub const SIGNIFICANT_DIGITS: u32 = 9;

/// Default house edge, in percent.
pub const DEFAULT_HOUSE_EDGE: f64 = 1.0;
