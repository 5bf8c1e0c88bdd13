//! # SC-03 Verification
//!
//! Attestation workflows and the boundary operations clients call.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (Ports & Adapters)
//!
//! ## Purpose
//!
//! - `Payment`, `BalanceDecreasingTransaction`, `ConfirmedBlockHeightExists`
//!   and `ReferencedPaymentNonexistence` workflows over an indexed query manager
//! - Verdict reasons mapped onto `VALID` / `INVALID` / `INDETERMINATE`
//! - `verify`, `mic`, `prepare_request`, `verify_fdc` per `(type, chain)` pair
//!
//! ## Module Structure
//!
//! ```text
//! sc-03-verification/
//! ├── domain/          # statuses, attestation types, typed bodies, DTOs
//! ├── ports/           # AttestationVerifier (inbound), TransactionParser (outbound)
//! ├── workflows/       # the four verification workflows
//! ├── service.rs       # VerifierService
//! └── adapters/        # JsonTransactionParser
//! ```
//!
//! ## Verdicts
//!
//! | Class | Meaning | Client action |
//! |-------|---------|---------------|
//! | `VALID` | The claim holds | Use the response |
//! | `INVALID` | The claim is false | Final |
//! | `INDETERMINATE` | The indexer cannot decide yet | Retry later |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod workflows;

// Re-exports
pub use adapters::JsonTransactionParser;
pub use domain::*;
pub use ports::{AttestationVerifier, ChainTransaction, ParseError, TransactionParser};
pub use service::VerifierService;
pub use workflows::{VerifiedBody, WorkflowResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
