//! # SC-02 Indexed Query
//!
//! Confirmation-depth-aware reads over a replicated indexer database.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (Ports & Adapters)
//!
//! ## Purpose
//!
//! - Block and transaction lookups for UTXO (BTC, DOGE) and account (XRP) chains
//! - Confirmed lookups that tell "absent" apart from "indexer not caught up"
//! - Window search for payment references bounded by an overflow block
//!
//! ## Module Structure
//!
//! ```text
//! sc-02-indexed-query/
//! ├── domain/          # rows, query params, projections, Confirmations
//! ├── ports/           # IndexedQueryManager (inbound), IndexerStore (outbound)
//! ├── service/         # UTXO and account managers, synchronization contract
//! └── adapters/        # InMemoryIndexerStore
//! ```
//!
//! ## Synchronization
//!
//! | Query | Outcome |
//! |-------|---------|
//! | confirmed transaction found at depth | `Ok` |
//! | transaction absent, indexer within the confirmation window | `NotExist` |
//! | anything the indexer cannot vouch for | `SystemFailure` |
//! | block height above `tip - confirmations` | `NotExist` |
//! | referenced search without an overflow block at depth | `NoOverflowBlock` |
//! | referenced search with a pruned or missing minimal block | `NoBoundary` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryIndexerStore, IndexerSnapshot};
pub use domain::*;
pub use ports::{IndexedQueryManager, IndexerStore, UtxoIndexerStore};
pub use service::{AccountIndexedQueryManager, UtxoIndexedQueryManager};

use shared_types::{ChainFamily, ChainType};
use std::sync::Arc;

/// Build the manager matching the chain's family over a store that serves
/// both families.
pub fn query_manager_for<S>(
    store: Arc<S>,
    chain: ChainType,
    confirmations: Confirmations,
) -> Arc<dyn IndexedQueryManager>
where
    S: UtxoIndexerStore + 'static,
{
    match chain.family() {
        ChainFamily::Utxo => Arc::new(UtxoIndexedQueryManager::new(store, chain, confirmations)),
        ChainFamily::Account => {
            Arc::new(AccountIndexedQueryManager::new(store, chain, confirmations))
        }
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
