//! # Shared Types Crate
//!
//! Chain identifiers and encoding helpers used by every verifier subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: chain names, confirmation defaults and the
//!   `0x`-hex conventions are defined once here.
//! - **Pure**: nothing in this crate performs I/O.

pub mod chain;
pub mod encoding;
pub mod errors;

pub use chain::*;
pub use encoding::*;
pub use errors::*;

/// 32-byte hash (Keccak-256 output, attestation ids, payment references).
pub type Hash = [u8; 32];

/// Largest integer a JSON number can carry without precision loss (`2^53 - 1`).
///
/// UTXO indices and block-number bounds must lie in `[0, MAX_SAFE_INTEGER)`.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;
