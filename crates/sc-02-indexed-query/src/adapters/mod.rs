//! # Adapters Layer
//!
//! - `InMemoryIndexerStore`: in-process indexer tables

pub mod memory_store;

pub use memory_store::{InMemoryIndexerStore, IndexerSnapshot};
