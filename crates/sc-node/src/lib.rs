//! # Verifier Node
//!
//! Process-level wiring for the attestation verifier.
//!
//! ## Modular Structure
//!
//! - `config` - Environment configuration
//! - `telemetry` - Log subscriber setup
//! - `wiring` - Indexer loading, verifier construction, request routing
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install the log subscriber
//! 3. Load attestation definitions (fails fast on a broken schema)
//! 4. Load the indexer snapshot
//! 5. Wire one verifier per attestation type
//! 6. Verify the configured request file, if any

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod telemetry;
pub mod wiring;

pub use config::{ConfigError, VerifierConfig};
pub use telemetry::{init_logging, TelemetryError};
pub use wiring::{load_definitions, load_indexer_store, Verifiers, WiringError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
