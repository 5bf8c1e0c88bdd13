//! # Outbound Ports
//!
//! Read access to the replicated indexer database. Schema ownership is
//! external; implementations only issue reads.

use crate::domain::{
    DbBlock, DbTransaction, DbUtxoCoinbaseInput, DbUtxoInput, DbUtxoOutput, IndexerError,
    PruneSyncState, TipSyncState, TransactionQueryParams,
};
use async_trait::async_trait;

/// Block, transaction and sync-state tables common to every chain family.
#[async_trait]
pub trait IndexerStore: Send + Sync {
    /// Tip sync row, if the indexer has written one.
    async fn tip_state(&self) -> Result<Option<TipSyncState>, IndexerError>;

    /// Prune sync row, if pruning is active.
    async fn prune_state(&self) -> Result<Option<PruneSyncState>, IndexerError>;

    /// Block at `block_number`.
    async fn block_by_number(&self, block_number: u64) -> Result<Option<DbBlock>, IndexerError>;

    /// Block with `block_hash` (no `0x` prefix, any case).
    async fn block_by_hash(&self, block_hash: &str) -> Result<Option<DbBlock>, IndexerError>;

    /// Highest confirmed block with `timestamp < before`.
    async fn last_confirmed_block_before(
        &self,
        before: u64,
    ) -> Result<Option<DbBlock>, IndexerError>;

    /// Lowest confirmed block with `block_number > after_number` and
    /// `timestamp > after_timestamp`.
    async fn first_confirmed_block_after(
        &self,
        after_timestamp: u64,
        after_number: u64,
    ) -> Result<Option<DbBlock>, IndexerError>;

    /// Transactions matching every set filter, ordered by height then id.
    async fn transactions(
        &self,
        params: &TransactionQueryParams,
    ) -> Result<Vec<DbTransaction>, IndexerError>;
}

/// Input/output sub-tables of UTXO chains.
#[async_trait]
pub trait UtxoIndexerStore: IndexerStore {
    /// Regular inputs of a transaction, by input index.
    async fn utxo_inputs(&self, transaction_id: &str) -> Result<Vec<DbUtxoInput>, IndexerError>;

    /// Coinbase inputs of a transaction, by input index.
    async fn utxo_coinbase_inputs(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<DbUtxoCoinbaseInput>, IndexerError>;

    /// Outputs of a transaction, by output index.
    async fn utxo_outputs(&self, transaction_id: &str)
        -> Result<Vec<DbUtxoOutput>, IndexerError>;
}
