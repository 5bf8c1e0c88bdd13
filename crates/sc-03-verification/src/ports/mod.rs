//! # Ports Layer
//!
//! - Inbound: `AttestationVerifier`
//! - Outbound: `TransactionParser` / `ChainTransaction`

pub mod inbound;
pub mod outbound;

pub use inbound::AttestationVerifier;
pub use outbound::*;
