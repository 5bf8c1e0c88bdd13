//! # Inbound Ports
//!
//! The query contract shared by both chain families. Implementations supply
//! the primitive reads; the synchronized entry points used by verification
//! workflows are provided on top of them.

use crate::domain::{
    BlockQueryParams, ConfirmedBlockQueryResponse, ConfirmedTransactionQueryResponse,
    IndexedBlockResult, IndexerError, PruneSyncState, ReferencedTransactionsQueryParams,
    ReferencedTransactionsQueryResponse, TipSyncState, TransactionQueryParams,
    TransactionQueryResult,
};
use crate::service::sync;
use async_trait::async_trait;
use shared_types::ChainType;

/// Confirmation-aware queries over the indexer database.
#[async_trait]
pub trait IndexedQueryManager: Send + Sync {
    /// Chain this manager serves.
    fn chain_type(&self) -> ChainType;

    /// Confirmations currently required for finality. Re-read on every call.
    fn number_of_confirmations(&self) -> u64;

    /// Tip sync row.
    async fn tip_state(&self) -> Result<Option<TipSyncState>, IndexerError>;

    /// Prune sync row.
    async fn prune_state(&self) -> Result<Option<PruneSyncState>, IndexerError>;

    /// Block by height or hash. Absence is `Ok(None)`.
    ///
    /// ## Errors
    ///
    /// - `InvalidBlockQuery`: neither or both keys given
    async fn query_block(
        &self,
        params: &BlockQueryParams,
    ) -> Result<Option<IndexedBlockResult>, IndexerError>;

    /// Transactions matching a conjunctive filter, with the blocks at the
    /// filter's height bounds.
    async fn query_transactions(
        &self,
        params: &TransactionQueryParams,
    ) -> Result<TransactionQueryResult, IndexerError>;

    /// Highest confirmed block with `timestamp < given`.
    async fn get_last_confirmed_block_strictly_before_time(
        &self,
        timestamp: u64,
    ) -> Result<Option<IndexedBlockResult>, IndexerError>;

    /// Lowest confirmed block past both `block_number` and `timestamp`.
    async fn get_first_confirmed_overflow_block(
        &self,
        timestamp: u64,
        block_number: u64,
    ) -> Result<Option<IndexedBlockResult>, IndexerError>;

    /// Last confirmed height; 0 while the indexer has no tip row.
    async fn get_last_confirmed_block_number(&self) -> Result<u64, IndexerError> {
        Ok(self
            .tip_state()
            .await?
            .map_or(0, |tip| tip.latest_indexed_height))
    }

    /// Timestamp of the latest indexed block; 0 while the indexer has no tip row.
    async fn get_latest_block_timestamp(&self) -> Result<u64, IndexerError> {
        Ok(self.tip_state().await?.map_or(0, |tip| tip.timestamp))
    }

    /// Lowest retained height; 0 when nothing was pruned.
    async fn get_bottom_block_number(&self) -> Result<u64, IndexerError> {
        Ok(self
            .prune_state()
            .await?
            .map_or(0, |prune| prune.bottom_block_number))
    }

    /// Whether the indexer is within the confirmation window of the tip.
    async fn is_indexer_synced(&self) -> Result<bool, IndexerError> {
        let confirmations = self.number_of_confirmations();
        Ok(self
            .tip_state()
            .await?
            .is_some_and(|tip| tip.is_synced(confirmations)))
    }

    /// Transaction by id, only if buried under the required confirmations.
    async fn get_confirmed_transaction(
        &self,
        transaction_id: &str,
    ) -> ConfirmedTransactionQueryResponse {
        sync::confirmed_transaction(self, transaction_id).await
    }

    /// Block at `block_number`, only if buried under the required confirmations.
    async fn get_confirmed_block(&self, block_number: u64) -> ConfirmedBlockQueryResponse {
        sync::confirmed_block(self, block_number).await
    }

    /// Transactions carrying a payment reference between the minimal block
    /// and the first overflow block.
    async fn get_referenced_transactions(
        &self,
        params: &ReferencedTransactionsQueryParams,
    ) -> ReferencedTransactionsQueryResponse {
        sync::referenced_transactions(self, params).await
    }
}
