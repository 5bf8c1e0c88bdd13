//! # Domain Errors
//!
//! Failures of the indexer store or of a malformed query. Data availability
//! outcomes of the synchronized queries are statuses, not errors.

use thiserror::Error;

/// Indexed query errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexerError {
    /// Block query must name exactly one of `blockNumber` and `hash`.
    #[error("Invalid block query: {0}")]
    InvalidBlockQuery(String),

    /// Store could not be reached or the query failed.
    #[error("Indexer store unavailable: {0}")]
    StoreUnavailable(String),

    /// A row violates the indexer schema.
    #[error("Corrupted indexer row: {0}")]
    CorruptedRow(String),
}
