//! # State Connector Verifier Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs             # BTC indexer around height 3490151, request builders
//!     ├── verification_flows.rs   # verdicts through the wired node
//!     └── boundary_flows.rs       # MIC, ABI request/response, index range guards
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sc-tests
//! cargo test -p sc-tests integration::verification_flows
//! ```

pub mod integration;
