//! # Ports Layer
//!
//! - Inbound: `IndexedQueryManager`
//! - Outbound: `IndexerStore`, `UtxoIndexerStore`

pub mod inbound;
pub mod outbound;

pub use inbound::IndexedQueryManager;
pub use outbound::{IndexerStore, UtxoIndexerStore};
